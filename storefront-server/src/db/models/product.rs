//! Product Model
//!
//! Catalog documents. Prices are stored as plain numbers in major
//! currency units; minor-unit conversion happens only at the payment
//! gateway boundary.

use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

use super::serde_thing;

pub type ProductId = Thing;

/// Product model matching the catalog schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(
        with = "serde_thing::option",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub id: Option<ProductId>,
    pub name: String,
    pub brand: Option<String>,
    pub description: Option<String>,
    pub main_image: Option<String>,
    pub root_category: Option<String>,
    pub initial_price: Option<f64>,
    pub final_price: f64,
    #[serde(default)]
    pub discount: f64,
    pub currency: Option<String>,
    pub rating: Option<f64>,
    pub reviews_count: Option<i64>,
    #[serde(default = "default_true")]
    pub in_stock: bool,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

fn default_true() -> bool {
    true
}

/// Product for creation (without id)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub brand: Option<String>,
    pub description: Option<String>,
    pub main_image: Option<String>,
    pub root_category: Option<String>,
    pub initial_price: Option<f64>,
    pub final_price: f64,
    pub discount: Option<f64>,
    pub currency: Option<String>,
    pub rating: Option<f64>,
    pub reviews_count: Option<i64>,
    pub in_stock: Option<bool>,
}

/// Product for update (all optional)
///
/// Absent fields are skipped on serialization so a MERGE leaves them
/// untouched instead of nulling them out.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviews_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<bool>,
}
