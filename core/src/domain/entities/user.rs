//! User entity representing a registered account.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity representing a registered account
///
/// The password hash is never serialized, so a `User` can be embedded in an
/// identity token or returned over HTTP as is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier for the user
    pub uid: Uuid,

    /// Login email, unique across users
    pub email: String,

    /// Password hash
    #[serde(skip_serializing, default)]
    pub password: String,

    /// Display name
    #[serde(default)]
    pub name: String,

    /// Public URL of the profile image, empty when none is set
    #[serde(default)]
    pub image_url: String,

    /// Personal website
    #[serde(default)]
    pub website: String,
}

impl User {
    /// Creates a new user with a freshly generated id
    pub fn new(email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            uid: Uuid::new_v4(),
            email: email.into(),
            password: password_hash.into(),
            name: String::new(),
            image_url: String::new(),
            website: String::new(),
        }
    }

    /// Copy of the user with the password hash cleared
    pub fn sanitized(&self) -> Self {
        Self {
            password: String::new(),
            ..self.clone()
        }
    }

    pub fn has_image(&self) -> bool {
        !self.image_url.is_empty()
    }

    /// Overwrites the editable profile fields
    pub fn apply_details(&mut self, details: UserDetails) {
        self.name = details.name;
        self.email = details.email;
        self.website = details.website;
    }
}

/// Editable profile fields
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserDetails {
    pub name: String,
    pub email: String,
    pub website: String,
}
