pub mod error;
pub mod server;
pub mod tools;

pub use error::ToolError;
pub use server::{serve_stdio, DiscoveryServer};
pub use tools::{ToolDescriptor, ToolKind, ToolOutcome, ToolRegistry};
