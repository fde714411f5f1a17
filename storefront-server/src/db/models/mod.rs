//! Database Models

// Serde helpers
pub mod serde_thing;

// Catalog
pub mod product;

// Per-user collections
pub mod address;
pub mod cart_item;
pub mod wishlist_item;

// Orders
pub mod order;

// Re-exports
pub use address::{Address, AddressCreate, AddressId, AddressUpdate};
pub use cart_item::{CartItem, CartItemCreate, CartItemId, CartItemUpdate};
pub use order::{Order, OrderCreate, OrderId, OrderItem, OrderStatus};
pub use product::{Product, ProductCreate, ProductId, ProductUpdate};
pub use wishlist_item::{WishlistItem, WishlistItemCreate, WishlistItemId, WishlistItemUpdate};
