//! Request parameters and JSON bodies for the discovery API.
//!
//! `*Params` carry what a caller knows; `*Request` is the exact body sent,
//! with defaults applied.

use originselect_core::{Market, Modification, SearchIntent};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::query::{build_query_label, non_empty};

pub const DEFAULT_LIMIT: u32 = 12;
pub const DEFAULT_BRANDS_LIMIT: u32 = 5;
pub const DEFAULT_COLLECTIONS_LIMIT: u32 = 3;

/// Parameters for `POST /api/ai/discover`.
#[derive(Debug, Clone, Default)]
pub struct DiscoverParams {
    /// Optional label; generated from `intent` when absent or empty.
    pub query: Option<String>,
    pub intent: SearchIntent,
    pub market: Option<Market>,
    /// Products to return. `None` and `Some(0)` both mean the default.
    pub limit: Option<u32>,
    pub brands_limit: Option<u32>,
    pub collections_limit: Option<u32>,
}

/// Body of `POST /api/ai/discover`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoverRequest {
    pub query: String,
    pub market: Market,
    pub limit: u32,
    pub brands_limit: u32,
    pub collections_limit: u32,
    pub structured_intent: SearchIntent,
}

impl DiscoverRequest {
    #[must_use]
    pub fn from_params(params: &DiscoverParams) -> Self {
        let src = &params.intent;
        let structured_intent = SearchIntent {
            intent_type: src.intent_type,
            country: owned_non_empty(src.country.as_deref()),
            category: owned_non_empty(src.category.as_deref()),
            values: src.values.clone(),
            keywords: src.keywords.clone(),
            brand: owned_non_empty(src.brand.as_deref()),
            price_min: src.price_min.filter(|p| *p != 0.0),
            price_max: src.price_max.filter(|p| *p != 0.0),
            classification: owned_non_empty(src.classification.as_deref()),
            ..SearchIntent::default()
        };

        let query = owned_non_empty(params.query.as_deref())
            .unwrap_or_else(|| build_query_label(&structured_intent));

        Self {
            query,
            market: params.market.unwrap_or_default(),
            limit: effective_limit(params.limit),
            brands_limit: params.brands_limit.unwrap_or(DEFAULT_BRANDS_LIMIT),
            collections_limit: params
                .collections_limit
                .unwrap_or(DEFAULT_COLLECTIONS_LIMIT),
            structured_intent,
        }
    }
}

/// Parameters for `POST /api/ai/refine`.
#[derive(Debug, Clone, Default)]
pub struct RefineParams {
    /// Intent object from a previous response, passed back untouched.
    pub intent: Map<String, Value>,
    pub modifications: Vec<Modification>,
    pub market: Option<Market>,
    pub limit: Option<u32>,
    pub brands_limit: Option<u32>,
    pub collections_limit: Option<u32>,
}

/// Body of `POST /api/ai/refine`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefineRequest {
    pub intent: Map<String, Value>,
    pub modifications: Vec<Modification>,
    pub market: String,
    pub limit: u32,
    pub brands_limit: u32,
    pub collections_limit: u32,
}

impl RefineRequest {
    /// Market precedence: explicit override, then the intent's own `market`,
    /// then `all`.
    #[must_use]
    pub fn from_params(params: &RefineParams) -> Self {
        let market = params.market.map_or_else(
            || {
                params
                    .intent
                    .get("market")
                    .and_then(Value::as_str)
                    .filter(|m| !m.is_empty())
                    .map_or_else(|| Market::All.to_string(), str::to_owned)
            },
            |m| m.to_string(),
        );

        Self {
            intent: params.intent.clone(),
            modifications: params.modifications.clone(),
            market,
            limit: effective_limit(params.limit),
            brands_limit: params.brands_limit.unwrap_or(DEFAULT_BRANDS_LIMIT),
            collections_limit: params
                .collections_limit
                .unwrap_or(DEFAULT_COLLECTIONS_LIMIT),
        }
    }
}

fn effective_limit(limit: Option<u32>) -> u32 {
    limit.filter(|l| *l > 0).unwrap_or(DEFAULT_LIMIT)
}

fn owned_non_empty(s: Option<&str>) -> Option<String> {
    non_empty(s).map(str::to_owned)
}
