//! Database Models

pub mod order;
pub mod product;
pub mod user;

pub use order::{
    LineItem, NotificationState, Order, OrderCreate, OrderStatus, ShippingAddress,
};
pub use product::{Product, ProductCreate};
pub use user::{User, UserCreate};
