#![forbid(unsafe_code)]

pub mod content;
pub mod error;
pub mod http;
pub mod memory;

pub use content::ContentGateway;
pub use error::GatewayError;
pub use http::{GatewayConfig, HttpContentGateway};
pub use memory::InMemoryContentGateway;
