//! Users API Library
//!
//! This library provides the core functionality for the Users API,
//! including domain types, repositories, and the HTTP layer.

pub mod api;
pub mod config;
pub mod domain;
pub mod infrastructure;
