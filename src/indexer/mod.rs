pub mod client;
pub mod types;


pub use client::{IndexError, VectorIndexClient};
pub use types::{UpsertRequest, UpsertResponse, VectorEntry};
