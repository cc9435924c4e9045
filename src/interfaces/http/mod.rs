//! HTTP REST API interfaces
//!
//! - `common`: response envelope, query types, validated JSON extractor
//! - `modules`: handlers per resource plus request-id and metrics middleware
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod modules;
pub mod router;

pub use router::{create_api_router, ApiDoc, ApiServices};
