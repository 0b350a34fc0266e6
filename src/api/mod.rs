//! Content API client module for REST communication

mod client;
mod error;
mod traits;
mod wire;

pub use client::{ApiClient, AuthContext, DEFAULT_BASE_URL};
pub use error::ApiError;
pub use traits::ContentApi;

#[cfg(test)]
pub use traits::MockContentApi;
