pub mod order_client;

pub use order_client::*;
