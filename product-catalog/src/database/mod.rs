mod connection;

pub use connection::{CATEGORIES, PRODUCTS, check_health, connect, open};
