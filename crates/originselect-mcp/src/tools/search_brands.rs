//! `search_brands`: brand discovery over the same backend endpoint.

use originselect_core::catalog::{CATEGORIES, COUNTRIES, MARKETS, VALUES};
use originselect_core::{IntentType, Market, SearchIntent};
use originselect_discovery::{shape_brands, DiscoverParams, DiscoveryClient, ShapedResponse};
use serde::Deserialize;
use serde_json::json;

use super::{blank_as_none, normalize_limit, ToolDescriptor};
use crate::error::ToolError;

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 20;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchBrandsArgs {
    pub country: Option<String>,
    pub values: Option<Vec<String>>,
    pub category: Option<String>,
    pub brand: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub market: Option<Market>,
    pub limit: Option<f64>,
}

impl SearchBrandsArgs {
    /// A named brand is a direct lookup; anything else is a mixed search.
    /// Products are kept to one since only brands are returned.
    #[must_use]
    pub fn into_params(self) -> DiscoverParams {
        let intent_type = if self.brand.as_deref().is_some_and(|b| !b.is_empty()) {
            IntentType::Brand
        } else {
            IntentType::Mixed
        };

        DiscoverParams {
            query: None,
            intent: SearchIntent {
                intent_type,
                country: self.country,
                category: self.category,
                values: self.values.unwrap_or_default(),
                brand: self.brand,
                ..SearchIntent::default()
            },
            market: self.market,
            limit: Some(1),
            brands_limit: Some(normalize_limit(self.limit, DEFAULT_LIMIT, MAX_LIMIT)),
            collections_limit: None,
        }
    }
}

/// Searches brands and returns only the brand half of the response.
///
/// # Errors
///
/// Returns [`ToolError::Discovery`] if the backend call fails.
pub async fn search_brands(
    client: &DiscoveryClient,
    args: SearchBrandsArgs,
) -> Result<ShapedResponse, ToolError> {
    let params = args.into_params();
    let response = client.discover(&params).await?;
    Ok(shape_brands(&response))
}

pub(super) fn descriptor() -> ToolDescriptor {
    ToolDescriptor {
        name: "search_brands",
        description: "Search for ethical and origin-verified brands on OriginSelect. Filter by \
country of origin, ethical values (women-owned, b-corp, organic, etc.), and product category. \
Returns brand details including values, website, and product count.",
        input_schema: json!({
            "type": "object",
            "properties": {
                "country": {
                    "type": "string",
                    "description": "Country of origin to filter by",
                    "enum": COUNTRIES
                },
                "values": {
                    "type": "array",
                    "items": { "type": "string", "enum": VALUES },
                    "description": "Ethical/ownership values to filter by"
                },
                "category": {
                    "type": "string",
                    "description": "Product category the brand operates in",
                    "enum": CATEGORIES
                },
                "brand": {
                    "type": "string",
                    "description": "Brand name to look up directly"
                },
                "market": {
                    "type": "string",
                    "description": "Market scope",
                    "enum": MARKETS,
                    "default": "all"
                },
                "limit": {
                    "type": "number",
                    "description": "Maximum number of brands to return (1-20)",
                    "default": DEFAULT_LIMIT
                }
            }
        }),
    }
}
