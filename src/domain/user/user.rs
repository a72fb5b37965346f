/// A persisted user row
///
/// The `id` is the primary key and the only uniqueness constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub country: String,
    pub profile_picture: String,
}

/// User data for insertion
///
/// `id: None` lets storage assign the identifier. A caller-supplied id is
/// inserted as-is and collides with any existing row holding it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewUser {
    pub id: Option<u64>,
    pub first_name: String,
    pub last_name: String,
    pub country: String,
    pub profile_picture: String,
}

impl NewUser {
    /// Materializes the row once storage has settled on an id
    pub fn into_user(self, id: u64) -> User {
        User {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            country: self.country,
            profile_picture: self.profile_picture,
        }
    }
}

/// Partial update of a user's mutable fields
///
/// A field is `Some` only when it should be overwritten. Empty strings are
/// never stored here, so a field cannot be cleared through an update.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub country: Option<String>,
    pub profile_picture: Option<String>,
}

impl UserChanges {
    /// Builds a change set, dropping absent and empty values
    pub fn from_non_empty(
        first_name: Option<String>,
        last_name: Option<String>,
        country: Option<String>,
        profile_picture: Option<String>,
    ) -> Self {
        Self {
            first_name: non_empty(first_name),
            last_name: non_empty(last_name),
            country: non_empty(country),
            profile_picture: non_empty(profile_picture),
        }
    }

    pub fn first_name(mut self, value: impl Into<String>) -> Self {
        self.first_name = non_empty(Some(value.into()));
        self
    }

    pub fn last_name(mut self, value: impl Into<String>) -> Self {
        self.last_name = non_empty(Some(value.into()));
        self
    }

    pub fn country(mut self, value: impl Into<String>) -> Self {
        self.country = non_empty(Some(value.into()));
        self
    }

    pub fn profile_picture(mut self, value: impl Into<String>) -> Self {
        self.profile_picture = non_empty(Some(value.into()));
        self
    }

    /// True when applying these changes would leave a row untouched
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.country.is_none()
            && self.profile_picture.is_none()
    }

    /// Overwrites only the fields present in this change set
    pub fn apply_to(&self, user: &mut User) {
        if let Some(first_name) = &self.first_name {
            user.first_name.clone_from(first_name);
        }
        if let Some(last_name) = &self.last_name {
            user.last_name.clone_from(last_name);
        }
        if let Some(country) = &self.country {
            user.country.clone_from(country);
        }
        if let Some(profile_picture) = &self.profile_picture {
            user.profile_picture.clone_from(profile_picture);
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: 7,
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            country: "UK".to_string(),
            profile_picture: "https://example.com/ada.png".to_string(),
        }
    }

    #[test]
    fn empty_strings_are_dropped() {
        let changes = UserChanges::from_non_empty(
            Some(String::new()),
            None,
            Some("FR".to_string()),
            Some(String::new()),
        );

        assert_eq!(changes.first_name, None);
        assert_eq!(changes.last_name, None);
        assert_eq!(changes.country.as_deref(), Some("FR"));
        assert_eq!(changes.profile_picture, None);
    }

    #[test]
    fn default_changes_are_empty() {
        assert!(UserChanges::default().is_empty());
        assert!(UserChanges::from_non_empty(Some(String::new()), None, None, None).is_empty());
    }

    #[test]
    fn builder_ignores_empty_values() {
        let changes = UserChanges::default().first_name("Grace").last_name("");
        assert_eq!(changes.first_name.as_deref(), Some("Grace"));
        assert_eq!(changes.last_name, None);
        assert!(!changes.is_empty());
    }

    #[test]
    fn apply_overwrites_only_present_fields() {
        let mut user = sample_user();
        UserChanges::default().first_name("Augusta").apply_to(&mut user);

        assert_eq!(user.first_name, "Augusta");
        assert_eq!(user.last_name, "Lovelace");
        assert_eq!(user.country, "UK");
        assert_eq!(user.profile_picture, "https://example.com/ada.png");
    }

    #[test]
    fn apply_empty_changes_is_noop() {
        let mut user = sample_user();
        UserChanges::default().apply_to(&mut user);
        assert_eq!(user, sample_user());
    }

    #[test]
    fn new_user_keeps_fields_under_assigned_id() {
        let new_user = NewUser {
            id: None,
            first_name: "Alan".to_string(),
            last_name: "Turing".to_string(),
            country: "UK".to_string(),
            profile_picture: String::new(),
        };

        let user = new_user.into_user(42);
        assert_eq!(user.id, 42);
        assert_eq!(user.first_name, "Alan");
        assert_eq!(user.last_name, "Turing");
        assert_eq!(user.profile_picture, "");
    }
}
