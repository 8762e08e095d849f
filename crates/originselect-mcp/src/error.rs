use originselect_core::CoreError;
use originselect_discovery::DiscoveryError;
use thiserror::Error;

/// Failures inside a tool handler.
///
/// The registry reports these to the agent as `{"error": "<message>"}`;
/// they never abort the server.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("invalid arguments for {tool}: {source}")]
    InvalidArguments {
        tool: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Missing \"intent\": pass the intent object from a previous search_products response")]
    MissingIntent,

    #[error("Missing \"modifications\": provide at least one modification")]
    MissingModifications,

    #[error(transparent)]
    Validation(#[from] CoreError),

    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    #[error("failed to encode tool result: {0}")]
    Encode(#[from] serde_json::Error),
}
