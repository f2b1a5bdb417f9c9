use serde::Deserialize;
use serde::Serialize;

use crate::domain::repository::Document;

/// Registered user as stored in the `users` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", default)]
    pub id: String,
    pub user_name: String,
    pub password_hash: String,
    #[serde(default)]
    pub is_admin: bool,
}

impl Document for User {
    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

impl From<&User> for auth::TokenSubject {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id.clone(),
            user_name: user.user_name.clone(),
            is_admin: user.is_admin,
        }
    }
}

/// Request to register a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub new_password: String,
    #[serde(default)]
    pub confirm_new_password: String,
    #[serde(default)]
    pub is_admin: bool,
}

impl UserDto {
    /// User record for this request, without identifier or password hash.
    pub fn to_user(&self) -> User {
        User {
            id: String::new(),
            user_name: self.user_name.clone(),
            password_hash: String::new(),
            is_admin: self.is_admin,
        }
    }
}

/// User listing entry. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    #[serde(rename(deserialize = "_id", serialize = "id"))]
    pub id: String,
    pub user_name: String,
    #[serde(default)]
    pub is_admin: bool,
}
