//! Address Model
//!
//! Per-user address book. At most one address per user carries
//! `is_primary`; marking one primary unsets the others.

use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

use super::serde_thing;

pub type AddressId = Thing;

/// Shipping address
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    #[serde(
        with = "serde_thing::option",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub id: Option<AddressId>,
    pub user: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address: String,
    pub pincode: String,
    pub city: String,
    pub state: String,
    pub phone_number: String,
    #[serde(default)]
    pub is_primary: bool,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

/// Address for creation (without id/user)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressCreate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address: String,
    pub pincode: String,
    pub city: String,
    pub state: String,
    pub phone_number: String,
}

/// Address for update (all optional)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AddressUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pincode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_primary: Option<bool>,
}
