//! User model

use serde::{Deserialize, Serialize};

/// The signed-in portal user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub department: String,
}

impl User {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        role: impl Into<String>,
        department: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            role: role.into(),
            department: department.into(),
        }
    }

    /// Initials for avatar badges ("John Doe" -> "JD")
    pub fn initials(&self) -> String {
        initials(&self.name)
    }
}

impl Default for User {
    /// The fixed identity used until the login service hands out real profiles
    fn default() -> Self {
        Self::new(
            "1",
            "John Doe",
            "john.doe@tecnics.com",
            "admin",
            "Information Technology",
        )
    }
}

/// First character of every space-separated word
pub fn initials(name: &str) -> String {
    name.split(' ')
        .filter_map(|word| word.chars().next())
        .collect()
}
