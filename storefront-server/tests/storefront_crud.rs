//! Repository-level semantics against an embedded database:
//! cart merging, wishlist uniqueness, primary-address exclusivity,
//! order ownership and catalog search.

use storefront_server::db::DbService;
use storefront_server::db::models::{
    AddressCreate, AddressUpdate, OrderCreate, OrderItem, ProductCreate, ProductUpdate,
};
use storefront_server::db::repository::product::{ProductPage, ProductSort};
use storefront_server::db::repository::{
    AddressRepository, CartRepository, OrderRepository, ProductRepository, RepoError,
    WishlistRepository,
};

struct TestDb {
    _dir: tempfile::TempDir,
    service: DbService,
}

async fn setup() -> TestDb {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().to_str().expect("utf8 path").to_string();
    let service = DbService::new(&path).await.expect("open db");
    TestDb { _dir: dir, service }
}

fn thing_to_string(thing: &surrealdb::sql::Thing) -> String {
    thing.to_string()
}

// ========== Cart ==========

#[tokio::test]
async fn cart_add_merges_quantity_for_same_product() {
    let db = setup().await;
    let repo = CartRepository::new(db.service.db.clone());

    let first = repo
        .add_or_merge("user_a", "product:p1", 2)
        .await
        .expect("first add");
    assert_eq!(first.quantity, 2);

    let merged = repo
        .add_or_merge("user_a", "product:p1", 3)
        .await
        .expect("second add");
    assert_eq!(merged.quantity, 5);
    assert_eq!(merged.id, first.id);

    // One row per (user, product).
    let items = repo.find_by_user("user_a").await.expect("list");
    assert_eq!(items.len(), 1);
}

#[tokio::test]
async fn cart_rows_are_isolated_per_user() {
    let db = setup().await;
    let repo = CartRepository::new(db.service.db.clone());

    repo.add_or_merge("user_a", "product:p1", 1)
        .await
        .expect("add a");
    repo.add_or_merge("user_b", "product:p1", 4)
        .await
        .expect("add b");

    let a = repo.find_by_user("user_a").await.expect("list a");
    let b = repo.find_by_user("user_b").await.expect("list b");
    assert_eq!(a.len(), 1);
    assert_eq!(a[0].quantity, 1);
    assert_eq!(b.len(), 1);
    assert_eq!(b[0].quantity, 4);
}

#[tokio::test]
async fn cart_delete_is_owner_scoped() {
    let db = setup().await;
    let repo = CartRepository::new(db.service.db.clone());

    let item = repo
        .add_or_merge("user_a", "product:p1", 1)
        .await
        .expect("add");
    let id = thing_to_string(item.id.as_ref().expect("item id"));

    // Another user cannot delete it.
    let deleted = repo.delete(&id, "user_b").await.expect("foreign delete");
    assert!(!deleted);
    assert_eq!(repo.find_by_user("user_a").await.expect("list").len(), 1);

    let deleted = repo.delete(&id, "user_a").await.expect("own delete");
    assert!(deleted);
    assert!(repo.find_by_user("user_a").await.expect("list").is_empty());
}

#[tokio::test]
async fn cart_clear_user_is_idempotent() {
    let db = setup().await;
    let repo = CartRepository::new(db.service.db.clone());

    repo.add_or_merge("user_a", "product:p1", 1)
        .await
        .expect("add");
    repo.clear_user("user_a").await.expect("clear");
    assert!(repo.find_by_user("user_a").await.expect("list").is_empty());

    // Clearing an already-empty cart is not an error.
    repo.clear_user("user_a").await.expect("clear again");
}

// ========== Wishlist ==========

#[tokio::test]
async fn wishlist_rejects_duplicate_product() {
    let db = setup().await;
    let repo = WishlistRepository::new(db.service.db.clone());

    repo.add("user_a", "product:p1").await.expect("first add");

    let duplicate = repo.add("user_a", "product:p1").await;
    assert!(matches!(duplicate, Err(RepoError::Duplicate(_))));

    // A different user may wishlist the same product.
    repo.add("user_b", "product:p1").await.expect("other user");
}

#[tokio::test]
async fn wishlist_quantity_update_is_owner_scoped() {
    let db = setup().await;
    let repo = WishlistRepository::new(db.service.db.clone());

    let item = repo.add("user_a", "product:p1").await.expect("add");
    let id = thing_to_string(item.id.as_ref().expect("item id"));

    let updated = repo
        .set_quantity(&id, "user_a", 3)
        .await
        .expect("own update");
    assert_eq!(updated.quantity, 3);

    let foreign = repo.set_quantity(&id, "user_b", 7).await;
    assert!(matches!(foreign, Err(RepoError::NotFound(_))));
}

// ========== Addresses ==========

fn sample_address() -> AddressCreate {
    AddressCreate {
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        address: "12 Analytical Row".to_string(),
        pincode: "560001".to_string(),
        city: "Bangalore".to_string(),
        state: "Karnataka".to_string(),
        phone_number: "9999999999".to_string(),
    }
}

#[tokio::test]
async fn promoting_an_address_demotes_the_previous_primary() {
    let db = setup().await;
    let repo = AddressRepository::new(db.service.db.clone());

    let first = repo
        .create("user_a", sample_address())
        .await
        .expect("first");
    let second = repo
        .create("user_a", sample_address())
        .await
        .expect("second");
    assert!(!first.is_primary);
    assert!(!second.is_primary);

    let first_id = thing_to_string(first.id.as_ref().expect("id"));
    let second_id = thing_to_string(second.id.as_ref().expect("id"));

    let promote = AddressUpdate {
        is_primary: Some(true),
        ..Default::default()
    };
    repo.update(&first_id, "user_a", promote.clone())
        .await
        .expect("promote first");
    repo.update(&second_id, "user_a", promote)
        .await
        .expect("promote second");

    let addresses = repo.find_by_user("user_a").await.expect("list");
    let primaries: Vec<_> = addresses.iter().filter(|a| a.is_primary).collect();
    assert_eq!(primaries.len(), 1);
    assert_eq!(
        thing_to_string(primaries[0].id.as_ref().expect("id")),
        second_id
    );
}

#[tokio::test]
async fn address_update_and_delete_are_owner_scoped() {
    let db = setup().await;
    let repo = AddressRepository::new(db.service.db.clone());

    let created = repo
        .create("user_a", sample_address())
        .await
        .expect("create");
    let id = thing_to_string(created.id.as_ref().expect("id"));

    let foreign = repo
        .update(
            &id,
            "user_b",
            AddressUpdate {
                city: Some("Elsewhere".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(foreign, Err(RepoError::NotFound(_))));

    assert!(!repo.delete(&id, "user_b").await.expect("foreign delete"));
    assert!(repo.delete(&id, "user_a").await.expect("own delete"));
}

// ========== Orders ==========

fn sample_order(user: &str) -> OrderCreate {
    OrderCreate {
        user: user.to_string(),
        items: vec![OrderItem {
            product: "product:p1".to_string(),
            quantity: 1,
            price: 10.0,
        }],
        total_amount: 10.0,
        currency: "USD".to_string(),
    }
}

#[tokio::test]
async fn order_delete_is_owner_scoped() {
    let db = setup().await;
    let repo = OrderRepository::new(db.service.db.clone());

    let order = repo.create(sample_order("user_a")).await.expect("create");
    let id = thing_to_string(order.id.as_ref().expect("id"));

    assert!(!repo.delete_for_user(&id, "user_b").await.expect("foreign"));
    assert!(
        repo.find_by_id(&id)
            .await
            .expect("lookup")
            .is_some()
    );

    assert!(repo.delete_for_user(&id, "user_a").await.expect("own"));
    assert!(repo.find_by_id(&id).await.expect("lookup").is_none());
}

#[tokio::test]
async fn gateway_order_id_lookup_finds_the_right_order() {
    let db = setup().await;
    let repo = OrderRepository::new(db.service.db.clone());

    let order = repo.create(sample_order("user_a")).await.expect("create");
    let id = thing_to_string(order.id.as_ref().expect("id"));
    repo.set_gateway_order(&id, "gw_42").await.expect("attach");

    let found = repo
        .find_by_gateway_order_id("gw_42")
        .await
        .expect("lookup")
        .expect("order");
    assert_eq!(thing_to_string(found.id.as_ref().expect("id")), id);

    assert!(
        repo.find_by_gateway_order_id("gw_nope")
            .await
            .expect("lookup")
            .is_none()
    );
}

// ========== Products ==========

fn product(name: &str, price: f64, rating: f64, discount: f64) -> ProductCreate {
    ProductCreate {
        name: name.to_string(),
        brand: Some("Acme".to_string()),
        description: None,
        main_image: None,
        root_category: Some("gadgets".to_string()),
        initial_price: Some(price * 1.25),
        final_price: price,
        discount: Some(discount),
        currency: Some("USD".to_string()),
        rating: Some(rating),
        reviews_count: Some(10),
        in_stock: None,
    }
}

async fn seed_products(repo: &ProductRepository) {
    repo.create(product("Blue Widget", 10.0, 4.5, 5.0))
        .await
        .expect("seed 1");
    repo.create(product("Red Widget", 20.0, 3.0, 25.0))
        .await
        .expect("seed 2");
    repo.create(product("Green Gizmo", 15.0, 5.0, 0.0))
        .await
        .expect("seed 3");
}

#[tokio::test]
async fn search_filters_by_name_case_insensitively() {
    let db = setup().await;
    let repo = ProductRepository::new(db.service.db.clone());
    seed_products(&repo).await;

    let ProductPage { products, total } = repo
        .search(Some("WIDGET"), ProductSort::Featured, 1, 28)
        .await
        .expect("search");
    assert_eq!(total, 2);
    assert_eq!(products.len(), 2);
    assert!(products.iter().all(|p| p.name.contains("Widget")));
}

#[tokio::test]
async fn search_sorts_by_price() {
    let db = setup().await;
    let repo = ProductRepository::new(db.service.db.clone());
    seed_products(&repo).await;

    let page = repo
        .search(None, ProductSort::PriceAsc, 1, 28)
        .await
        .expect("asc");
    let prices: Vec<f64> = page.products.iter().map(|p| p.final_price).collect();
    assert_eq!(prices, vec![10.0, 15.0, 20.0]);

    let page = repo
        .search(None, ProductSort::PriceDesc, 1, 28)
        .await
        .expect("desc");
    let prices: Vec<f64> = page.products.iter().map(|p| p.final_price).collect();
    assert_eq!(prices, vec![20.0, 15.0, 10.0]);
}

#[tokio::test]
async fn search_paginates_and_reports_the_full_total() {
    let db = setup().await;
    let repo = ProductRepository::new(db.service.db.clone());
    seed_products(&repo).await;

    let page = repo
        .search(None, ProductSort::PriceAsc, 1, 2)
        .await
        .expect("page 1");
    assert_eq!(page.products.len(), 2);
    assert_eq!(page.total, 3);

    let page = repo
        .search(None, ProductSort::PriceAsc, 2, 2)
        .await
        .expect("page 2");
    assert_eq!(page.products.len(), 1);
    assert_eq!(page.total, 3);
    assert_eq!(page.products[0].final_price, 20.0);
}

#[tokio::test]
async fn update_merges_only_provided_fields() {
    let db = setup().await;
    let repo = ProductRepository::new(db.service.db.clone());

    let created = repo
        .create(product("Blue Widget", 10.0, 4.5, 5.0))
        .await
        .expect("create");
    let id = thing_to_string(created.id.as_ref().expect("id"));

    let updated = repo
        .update(
            &id,
            ProductUpdate {
                final_price: Some(8.0),
                ..Default::default()
            },
        )
        .await
        .expect("update");

    assert_eq!(updated.final_price, 8.0);
    // Untouched fields survive the merge.
    assert_eq!(updated.name, "Blue Widget");
    assert_eq!(updated.brand.as_deref(), Some("Acme"));
    assert!(updated.updated_at >= created.updated_at);
}
