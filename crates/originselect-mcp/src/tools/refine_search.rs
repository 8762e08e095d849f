//! `refine_search`: applies modifications to an intent the backend already
//! produced, skipping query parsing.

use originselect_core::catalog::MARKETS;
use originselect_core::{Market, Modification};
use originselect_discovery::types::DEFAULT_LIMIT;
use originselect_discovery::{shape_products, DiscoveryClient, RefineParams, ShapedResponse};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::{blank_as_none, normalize_limit, ToolDescriptor};
use crate::error::ToolError;

const MAX_LIMIT: u32 = 50;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefineSearchArgs {
    pub intent: Option<Map<String, Value>>,
    pub modifications: Option<Vec<Modification>>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub market: Option<Market>,
    pub limit: Option<f64>,
}

impl RefineSearchArgs {
    /// Checks the required fields and coerces string prices to numbers.
    /// Modifications otherwise reach the backend exactly as sent.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::MissingIntent`] or
    /// [`ToolError::MissingModifications`].
    pub fn into_params(self) -> Result<RefineParams, ToolError> {
        let intent = self.intent.ok_or(ToolError::MissingIntent)?;
        let modifications = self
            .modifications
            .filter(|m| !m.is_empty())
            .ok_or(ToolError::MissingModifications)?;

        let modifications = modifications
            .into_iter()
            .enumerate()
            .map(|(index, modification)| {
                if let Err(e) = modification.check_shape() {
                    tracing::warn!(index, error = %e, "forwarding modification the backend may reject");
                }
                modification.coerce_numeric()
            })
            .collect();

        Ok(RefineParams {
            intent,
            modifications,
            market: self.market,
            limit: Some(normalize_limit(self.limit, DEFAULT_LIMIT, MAX_LIMIT)),
            ..RefineParams::default()
        })
    }
}

/// Refines a previous search and shapes the result like `search_products`.
///
/// # Errors
///
/// Missing arguments are reported before any request is made; backend
/// failures surface as [`ToolError::Discovery`].
pub async fn refine_search(
    client: &DiscoveryClient,
    args: RefineSearchArgs,
) -> Result<ShapedResponse, ToolError> {
    let params = args.into_params()?;
    tracing::debug!(
        modifications = params.modifications.len(),
        "refining previous intent"
    );
    let response = client.refine(&params).await?;
    Ok(shape_products(&response))
}

pub(super) fn descriptor() -> ToolDescriptor {
    ToolDescriptor {
        name: "refine_search",
        description: "Refine a previous product search by adding/removing filters. Takes the \
intent object from a prior search_products response and applies modifications. No new query \
parsing needed, so this is a fast refinement.

Examples:
- Add a value: { action: \"add\", field: \"values\", value: \"organic\" }
- Remove a value: { action: \"remove\", field: \"values\", value: \"vegan\" }
- Change country: { action: \"modify\", field: \"country\", value: \"Canada\" }
- Set max price: { action: \"modify\", field: \"priceMax\", value: 30 }
- Change category: { action: \"modify\", field: \"category\", value: \"Beauty\" }",
        input_schema: json!({
            "type": "object",
            "properties": {
                "intent": {
                    "type": "object",
                    "description": "The intent object returned from a previous search_products call. Pass it unchanged.",
                    "properties": {
                        "intentType": { "type": "string" },
                        "country": { "type": "string" },
                        "category": { "type": "string" },
                        "values": { "type": "array", "items": { "type": "string" } },
                        "keywords": { "type": "array", "items": { "type": "string" } },
                        "brand": { "type": "string" },
                        "priceMax": { "type": "number" },
                        "priceMin": { "type": "number" },
                        "classification": { "type": "string" }
                    }
                },
                "modifications": {
                    "type": "array",
                    "description": "Array of modifications to apply to the intent",
                    "items": {
                        "type": "object",
                        "properties": {
                            "action": {
                                "type": "string",
                                "enum": ["add", "remove", "modify"],
                                "description": "\"add\" to append a value/keyword, \"remove\" to strip one, \"modify\" to change a scalar field"
                            },
                            "field": {
                                "type": "string",
                                "enum": [
                                    "values", "keywords", "excludes", "country", "category",
                                    "classification", "priceMax", "priceMin", "market"
                                ],
                                "description": "The intent field to modify"
                            },
                            "value": {
                                "type": "string",
                                "description": "The value to add, remove, or set. Use strings for all fields (e.g., \"30\" for priceMax)."
                            }
                        },
                        "required": ["action", "value"]
                    }
                },
                "market": {
                    "type": "string",
                    "enum": MARKETS,
                    "description": "Market scope override"
                },
                "limit": {
                    "type": "number",
                    "description": "Max products to return (1-50)",
                    "default": DEFAULT_LIMIT
                }
            },
            "required": ["intent", "modifications"]
        }),
    }
}
