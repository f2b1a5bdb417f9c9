use serde::Deserialize;
use serde::Serialize;

use crate::domain::repository::Document;

/// Entry of a list. Only ever stored embedded in its [`List`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// A user's list, stored in the `lists` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct List {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    pub name: String,
    #[serde(default)]
    pub items: Vec<Item>,
}

impl Document for List {
    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

/// Request body for creating or replacing a list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListDto {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub items: Vec<Item>,
}

impl ListDto {
    pub fn to_list(&self) -> List {
        List {
            id: String::new(),
            user_id: String::new(),
            name: self.name.clone(),
            items: self.items.clone(),
        }
    }
}

/// Listing entry: identifier and name only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSummary {
    #[serde(rename(deserialize = "_id", serialize = "id"))]
    pub id: String,
    pub name: String,
}
