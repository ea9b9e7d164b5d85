pub mod auth;
pub mod client;
pub mod error;
pub mod handlers;
pub mod models;
pub mod push;
pub mod service;
pub mod store;

pub use error::ApiError;
pub use store::{Store, StorageError};
