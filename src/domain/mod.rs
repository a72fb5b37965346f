// Domain layer module exports
// Following Hexagonal Architecture
// Domain is independent of infrastructure concerns

pub mod repositories;
pub mod user;
