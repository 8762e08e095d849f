//! The six discovery tools and the registry that dispatches to them.

mod refine_search;
mod search_brands;
mod search_products;
mod static_data;

use std::time::Instant;

use originselect_discovery::DiscoveryClient;
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};

use crate::error::ToolError;

pub use refine_search::{refine_search, RefineSearchArgs};
pub use search_brands::{search_brands, SearchBrandsArgs};
pub use search_products::{search_products, SearchProductsArgs};
pub use static_data::{get_categories, get_countries, get_values};

/// Name, description and JSON argument schema of one tool.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    SearchProducts,
    SearchBrands,
    RefineSearch,
    GetValues,
    GetCategories,
    GetCountries,
}

impl ToolKind {
    /// Every tool, in listing order.
    pub const ALL: [ToolKind; 6] = [
        ToolKind::SearchProducts,
        ToolKind::SearchBrands,
        ToolKind::RefineSearch,
        ToolKind::GetValues,
        ToolKind::GetCategories,
        ToolKind::GetCountries,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::SearchProducts => "search_products",
            ToolKind::SearchBrands => "search_brands",
            ToolKind::RefineSearch => "refine_search",
            ToolKind::GetValues => "get_values",
            ToolKind::GetCategories => "get_categories",
            ToolKind::GetCountries => "get_countries",
        }
    }

    /// Exact, case-sensitive lookup.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.name() == name)
    }

    #[must_use]
    pub fn descriptor(self) -> ToolDescriptor {
        match self {
            ToolKind::SearchProducts => search_products::descriptor(),
            ToolKind::SearchBrands => search_brands::descriptor(),
            ToolKind::RefineSearch => refine_search::descriptor(),
            ToolKind::GetValues => static_data::values_descriptor(),
            ToolKind::GetCategories => static_data::categories_descriptor(),
            ToolKind::GetCountries => static_data::countries_descriptor(),
        }
    }
}

/// Result of one invocation, ready for the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolOutcome {
    pub payload: Value,
    /// Set only for requests that never reached a handler.
    pub is_error: bool,
}

impl ToolOutcome {
    /// Pretty-printed JSON, as sent in the text content block.
    #[must_use]
    pub fn to_text(&self) -> String {
        serde_json::to_string_pretty(&self.payload).unwrap_or_else(|_| self.payload.to_string())
    }
}

/// Lists tool descriptors and routes invocations to handlers.
///
/// Holds no per-call state; concurrent invocations are independent.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    client: DiscoveryClient,
}

impl ToolRegistry {
    #[must_use]
    pub fn new(client: DiscoveryClient) -> Self {
        Self { client }
    }

    #[must_use]
    pub fn list(&self) -> Vec<ToolDescriptor> {
        ToolKind::ALL.into_iter().map(ToolKind::descriptor).collect()
    }

    /// Runs the tool called `name`.
    ///
    /// Unknown names produce an error-flagged outcome without touching the
    /// backend. Handler failures become `{"error": ...}` payloads.
    pub async fn invoke(&self, name: &str, arguments: Option<Value>) -> ToolOutcome {
        let Some(tool) = ToolKind::from_name(name) else {
            tracing::warn!(tool = name, "unknown tool requested");
            return ToolOutcome {
                payload: json!({ "error": format!("Unknown tool: {name}") }),
                is_error: true,
            };
        };

        let started = Instant::now();
        let arguments = arguments.filter(|a| !a.is_null()).unwrap_or_else(|| json!({}));
        let result = self.dispatch(tool, arguments).await;
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        let payload = match result {
            Ok(payload) => {
                tracing::info!(tool = name, elapsed_ms, "tool call finished");
                payload
            }
            Err(e) => {
                tracing::warn!(tool = name, elapsed_ms, error = %e, "tool call failed");
                json!({ "error": e.to_string() })
            }
        };

        ToolOutcome {
            payload,
            is_error: false,
        }
    }

    async fn dispatch(&self, tool: ToolKind, arguments: Value) -> Result<Value, ToolError> {
        match tool {
            ToolKind::SearchProducts => {
                let args = parse_args(tool, arguments)?;
                encode(&search_products(&self.client, args).await?)
            }
            ToolKind::SearchBrands => {
                let args = parse_args(tool, arguments)?;
                encode(&search_brands(&self.client, args).await?)
            }
            ToolKind::RefineSearch => {
                let args = parse_args(tool, arguments)?;
                encode(&refine_search(&self.client, args).await?)
            }
            ToolKind::GetValues => encode(&get_values()),
            ToolKind::GetCategories => encode(&get_categories()),
            ToolKind::GetCountries => encode(&get_countries()),
        }
    }
}

fn parse_args<T: DeserializeOwned>(tool: ToolKind, arguments: Value) -> Result<T, ToolError> {
    serde_json::from_value(arguments).map_err(|source| ToolError::InvalidArguments {
        tool: tool.name(),
        source,
    })
}

fn encode<T: Serialize>(value: &T) -> Result<Value, ToolError> {
    Ok(serde_json::to_value(value)?)
}

/// Reads an optional argument where `null` and `""` mean "use the default".
pub(crate) fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(value) => serde_json::from_value(value).map(Some).map_err(D::Error::custom),
    }
}

/// Turns an agent-supplied limit into a positive count capped at `max`.
///
/// Missing, zero or negative limits fall back to `default`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn normalize_limit(limit: Option<f64>, default: u32, max: u32) -> u32 {
    match limit {
        Some(l) if l.is_finite() && l >= 1.0 => (l.round() as u32).clamp(1, max),
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use originselect_core::catalog::{CATEGORIES, COUNTRIES, VALUES};

    use super::*;

    fn offline_registry() -> ToolRegistry {
        ToolRegistry::new(
            DiscoveryClient::new("http://127.0.0.1:9").expect("client construction should not fail"),
        )
    }

    #[test]
    fn list_returns_six_tools_in_order() {
        let names: Vec<&str> = offline_registry().list().iter().map(|d| d.name).collect();
        assert_eq!(
            names,
            vec![
                "search_products",
                "search_brands",
                "refine_search",
                "get_values",
                "get_categories",
                "get_countries"
            ]
        );
    }

    #[test]
    fn every_schema_is_an_object_schema() {
        for descriptor in offline_registry().list() {
            assert_eq!(
                descriptor.input_schema["type"],
                json!("object"),
                "{} schema",
                descriptor.name
            );
            assert!(descriptor.input_schema["properties"].is_object());
            assert!(!descriptor.description.is_empty());
        }
    }

    #[test]
    fn search_products_schema_enums_come_from_catalog() {
        let schema = ToolKind::SearchProducts.descriptor().input_schema;
        assert_eq!(schema["properties"]["country"]["enum"], json!(COUNTRIES));
        assert_eq!(schema["properties"]["category"]["enum"], json!(CATEGORIES));
        assert_eq!(schema["properties"]["values"]["items"]["enum"], json!(VALUES));
    }

    #[test]
    fn refine_search_schema_requires_intent_and_modifications() {
        let schema = ToolKind::RefineSearch.descriptor().input_schema;
        assert_eq!(schema["required"], json!(["intent", "modifications"]));
    }

    #[test]
    fn from_name_is_exact() {
        assert_eq!(
            ToolKind::from_name("get_values"),
            Some(ToolKind::GetValues)
        );
        assert_eq!(ToolKind::from_name("Get_Values"), None);
        assert_eq!(ToolKind::from_name("get_values "), None);
    }

    #[tokio::test]
    async fn unknown_tool_is_error_flagged() {
        let outcome = offline_registry().invoke("delete_everything", None).await;
        assert!(outcome.is_error);
        assert_eq!(
            outcome.payload,
            json!({"error": "Unknown tool: delete_everything"})
        );
    }

    #[tokio::test]
    async fn static_tools_ignore_arguments() {
        let registry = offline_registry();
        let bare = registry.invoke("get_countries", None).await;
        let with_args = registry
            .invoke("get_countries", Some(json!({"unexpected": true})))
            .await;
        assert_eq!(bare, with_args);
        assert!(!bare.is_error);
        assert_eq!(bare.payload["total"], json!(2));
    }

    #[tokio::test]
    async fn malformed_arguments_become_error_payload() {
        let outcome = offline_registry()
            .invoke("search_products", Some(json!({"limit": "many"})))
            .await;
        assert!(!outcome.is_error);
        let message = outcome.payload["error"].as_str().unwrap();
        assert!(
            message.starts_with("invalid arguments for search_products"),
            "unexpected message: {message}"
        );
    }

    #[test]
    fn to_text_is_pretty_json() {
        let outcome = ToolOutcome {
            payload: json!({"total": 2}),
            is_error: false,
        };
        assert_eq!(outcome.to_text(), "{\n  \"total\": 2\n}");
    }

    #[tokio::test]
    async fn unknown_market_is_an_argument_error() {
        let outcome = offline_registry()
            .invoke("search_brands", Some(json!({"market": "mars"})))
            .await;
        assert!(outcome.payload["error"]
            .as_str()
            .is_some_and(|e| e.starts_with("invalid arguments for search_brands")));
    }

    #[test]
    fn normalize_limit_defaults_and_caps() {
        assert_eq!(normalize_limit(None, 12, 50), 12);
        assert_eq!(normalize_limit(Some(0.0), 12, 50), 12);
        assert_eq!(normalize_limit(Some(-3.0), 12, 50), 12);
        assert_eq!(normalize_limit(Some(8.0), 12, 50), 8);
        assert_eq!(normalize_limit(Some(500.0), 12, 50), 50);
        assert_eq!(normalize_limit(Some(f64::NAN), 10, 20), 10);
    }
}
