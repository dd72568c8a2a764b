//! Typed clients wrapping the generic [`ResourceClient`](resource_actor::ResourceClient).

mod product_client;
mod user_client;

pub use product_client::ProductClient;
pub use user_client::UserClient;
