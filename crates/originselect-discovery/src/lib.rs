pub mod client;
pub mod error;
pub mod query;
pub mod shape;
pub mod types;

pub use client::{DiscoveryClient, DEFAULT_TIMEOUT};
pub use error::DiscoveryError;
pub use query::build_query_label;
pub use shape::{shape_brands, shape_products, ShapedResponse, DISCLAIMER};
pub use types::{DiscoverParams, DiscoverRequest, RefineParams, RefineRequest};
