//! `search_products`: the primary discovery tool.

use originselect_core::catalog::{CATEGORIES, CLASSIFICATIONS, COUNTRIES, MARKETS, VALUES};
use originselect_core::{IntentType, Market, SearchIntent};
use originselect_discovery::types::{DEFAULT_BRANDS_LIMIT, DEFAULT_COLLECTIONS_LIMIT, DEFAULT_LIMIT};
use originselect_discovery::{shape_products, DiscoverParams, DiscoveryClient, ShapedResponse};
use serde::Deserialize;
use serde_json::json;

use super::{blank_as_none, normalize_limit, ToolDescriptor};
use crate::error::ToolError;

const MAX_LIMIT: u32 = 50;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchProductsArgs {
    pub query: Option<String>,
    pub country: Option<String>,
    pub category: Option<String>,
    pub values: Option<Vec<String>>,
    pub brand: Option<String>,
    pub keywords: Option<Vec<String>>,
    pub price_max: Option<f64>,
    pub classification: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub market: Option<Market>,
    pub limit: Option<f64>,
}

impl SearchProductsArgs {
    #[must_use]
    pub fn into_params(self) -> DiscoverParams {
        DiscoverParams {
            query: self.query,
            intent: SearchIntent {
                intent_type: IntentType::Product,
                country: self.country,
                category: self.category,
                values: self.values.unwrap_or_default(),
                keywords: self.keywords.unwrap_or_default(),
                brand: self.brand,
                price_max: self.price_max,
                classification: self.classification,
                ..SearchIntent::default()
            },
            market: self.market,
            limit: Some(normalize_limit(self.limit, DEFAULT_LIMIT, MAX_LIMIT)),
            brands_limit: Some(DEFAULT_BRANDS_LIMIT),
            collections_limit: Some(DEFAULT_COLLECTIONS_LIMIT),
        }
    }
}

/// Searches products with a structured intent and shapes the full response.
///
/// # Errors
///
/// Returns [`ToolError::Validation`] for a negative `priceMax` and
/// [`ToolError::Discovery`] if the backend call fails.
pub async fn search_products(
    client: &DiscoveryClient,
    args: SearchProductsArgs,
) -> Result<ShapedResponse, ToolError> {
    let params = args.into_params();
    params.intent.validate()?;
    let response = client.discover(&params).await?;
    Ok(shape_products(&response))
}

pub(super) fn descriptor() -> ToolDescriptor {
    ToolDescriptor {
        name: "search_products",
        description: "Search OriginSelect's curated catalog of ethical, origin-verified products. \
Filter by country of origin, ethical values (e.g., women-owned, organic, b-corp), product \
category, brand, and price. Returns ranked products with purchase links, plus related brands \
and collections. The response includes an `intent` object that can be passed to refine_search.",
        input_schema: json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Optional natural language query for context (e.g., \"non-toxic baby shampoo from Canada\"). Structured fields below take precedence."
                },
                "country": {
                    "type": "string",
                    "description": "Country of origin to filter by",
                    "enum": COUNTRIES
                },
                "category": {
                    "type": "string",
                    "description": "Product category",
                    "enum": CATEGORIES
                },
                "values": {
                    "type": "array",
                    "items": { "type": "string", "enum": VALUES },
                    "description": "Ethical/ownership values to filter by (e.g., [\"women-owned\", \"organic\", \"non-toxic\"])"
                },
                "brand": {
                    "type": "string",
                    "description": "Brand name to search for"
                },
                "keywords": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Specific product keywords (e.g., [\"shampoo\", \"moisturizer\"])"
                },
                "priceMax": {
                    "type": "number",
                    "description": "Maximum price in dollars"
                },
                "classification": {
                    "type": "string",
                    "description": "Canadian brand classification filter",
                    "enum": CLASSIFICATIONS
                },
                "market": {
                    "type": "string",
                    "description": "Market scope: \"canada\" for Canadian products only, \"global\" for international, \"all\" for both",
                    "enum": MARKETS,
                    "default": "all"
                },
                "limit": {
                    "type": "number",
                    "description": "Maximum number of products to return (1-50)",
                    "default": DEFAULT_LIMIT
                }
            }
        }),
    }
}
