pub mod client;
pub mod types;

pub use client::{create_client, TbaClient, DEFAULT_BASE_URL};
