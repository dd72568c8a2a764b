//! Plain data types shared by the actors, the stores and the catalog engine.

mod product;
mod user;

pub use product::{Product, ProductFields, ProductId};
pub use user::{User, UserCreate, UserId};
