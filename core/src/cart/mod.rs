// marketplace/src/cart/mod.rs

pub mod store;

pub use store::{CartState, CartStore, DEFAULT_CART_KEY};
