mod client;
mod config;
mod params;
mod response;

pub use client::{ApiClient, AUTHORIZATION_HEADER};
pub use config::ClientConfig;
pub use params::{ListParams, DEFAULT_PAGE_LIMIT};
pub use response::ApiResponse;
