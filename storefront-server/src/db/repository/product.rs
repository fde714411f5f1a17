//! Product Repository

use serde::Deserialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, make_thing, strip_table_prefix};
use crate::db::models::{Product, ProductCreate, ProductUpdate};
use crate::utils::now_millis;

const TABLE: &str = "product";

/// Sort orders accepted by `search`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductSort {
    #[default]
    Featured,
    PriceAsc,
    PriceDesc,
    Rating,
    Discount,
    Newest,
}

impl ProductSort {
    /// Parse the client-facing sort key; unknown values fall back to featured
    pub fn parse(s: &str) -> Self {
        match s {
            "price-asc" => Self::PriceAsc,
            "price-desc" => Self::PriceDesc,
            "rating" => Self::Rating,
            "discount" => Self::Discount,
            "newest" => Self::Newest,
            _ => Self::Featured,
        }
    }

    /// Static ORDER BY clause; sort keys never reach the query as user input
    fn order_clause(&self) -> &'static str {
        match self {
            Self::Featured => "",
            Self::PriceAsc => " ORDER BY final_price ASC",
            Self::PriceDesc => " ORDER BY final_price DESC",
            Self::Rating => " ORDER BY rating DESC",
            Self::Discount => " ORDER BY discount DESC",
            Self::Newest => " ORDER BY created_at DESC",
        }
    }
}

/// Result page returned by `search`
#[derive(Debug)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub total: i64,
}

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all products
    pub async fn find_all(&self) -> RepoResult<Vec<Product>> {
        let products: Vec<Product> = self.base.db().query("SELECT * FROM product").await?.take(0)?;
        Ok(products)
    }

    /// Find product by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Product>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let product: Option<Product> = self.base.db().select((TABLE, pure_id)).await?;
        Ok(product)
    }

    /// Case-insensitive text search over name and brand with pagination.
    ///
    /// An empty query matches everything. Returns the requested page and
    /// the total match count so the client can render pagination.
    pub async fn search(
        &self,
        query: Option<&str>,
        sort: ProductSort,
        page: i64,
        limit: i64,
    ) -> RepoResult<ProductPage> {
        let page = page.max(1);
        let limit = limit.clamp(1, 100);
        let start = (page - 1) * limit;

        let trimmed = query.map(str::trim).unwrap_or("");
        let filter = if trimmed.is_empty() {
            ""
        } else {
            " WHERE string::lowercase(name) CONTAINS $q OR string::lowercase(brand ?? '') CONTAINS $q"
        };

        let select = format!(
            "SELECT * FROM product{filter}{} LIMIT $limit START $start",
            sort.order_clause()
        );
        let count = format!("SELECT count() AS total FROM product{filter} GROUP ALL");

        let q_lower = trimmed.to_lowercase();
        let mut result = self
            .base
            .db()
            .query(select)
            .query(count)
            .bind(("q", q_lower))
            .bind(("limit", limit))
            .bind(("start", start))
            .await?;

        let products: Vec<Product> = result.take(0)?;

        #[derive(Deserialize)]
        struct CountRow {
            total: i64,
        }
        let counts: Vec<CountRow> = result.take(1)?;
        let total = counts.first().map(|c| c.total).unwrap_or(0);

        Ok(ProductPage { products, total })
    }

    /// Create a new product
    pub async fn create(&self, data: ProductCreate) -> RepoResult<Product> {
        let now = now_millis();
        let product = Product {
            id: None,
            name: data.name,
            brand: data.brand,
            description: data.description,
            main_image: data.main_image,
            root_category: data.root_category,
            initial_price: data.initial_price,
            final_price: data.final_price,
            discount: data.discount.unwrap_or(0.0),
            currency: data.currency,
            rating: data.rating,
            reviews_count: data.reviews_count,
            in_stock: data.in_stock.unwrap_or(true),
            created_at: now,
            updated_at: now,
        };

        let created: Option<Product> = self.base.db().create(TABLE).content(product).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create product".to_string()))
    }

    /// Update a product
    pub async fn update(&self, id: &str, data: ProductUpdate) -> RepoResult<Product> {
        let pure_id = strip_table_prefix(TABLE, id);
        if self.find_by_id(pure_id).await?.is_none() {
            return Err(RepoError::NotFound(format!("Product {} not found", id)));
        }

        let thing = make_thing(TABLE, pure_id);
        self.base
            .db()
            .query("UPDATE $thing MERGE $data")
            .query("UPDATE $thing SET updated_at = $now")
            .bind(("thing", thing))
            .bind(("data", data))
            .bind(("now", now_millis()))
            .await?;

        self.find_by_id(pure_id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)))
    }

    /// Hard delete a product
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let pure_id = strip_table_prefix(TABLE, id);
        let deleted: Option<Product> = self.base.db().delete((TABLE, pure_id)).await?;
        Ok(deleted.is_some())
    }
}
