pub mod client;
pub mod endpoints;
pub mod error;

pub use client::{ApiClient, Credentials};
pub use endpoints::{EndpointError, EndpointResolver, ServiceRole};
pub use error::ApiError;
