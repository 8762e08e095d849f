//! Catalog listings served without a backend call.

use originselect_core::catalog::{value_label, CATEGORIES, COUNTRIES, VALUES};
use serde::Serialize;
use serde_json::json;

use super::ToolDescriptor;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueEntry {
    pub token: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValuesListing {
    pub values: Vec<ValueEntry>,
    pub total: usize,
    pub usage: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoriesListing {
    pub categories: &'static [&'static str],
    pub total: usize,
    pub usage: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountriesListing {
    pub countries: &'static [&'static str],
    pub total: usize,
    pub usage: &'static str,
}

#[must_use]
pub fn get_values() -> ValuesListing {
    ValuesListing {
        values: VALUES
            .iter()
            .map(|&token| ValueEntry {
                token,
                label: value_label(token),
            })
            .collect(),
        total: VALUES.len(),
        usage: "Pass the \"token\" values in the \"values\" array when calling search_products or search_brands.",
    }
}

#[must_use]
pub fn get_categories() -> CategoriesListing {
    CategoriesListing {
        categories: &CATEGORIES,
        total: CATEGORIES.len(),
        usage: "Pass a category name in the \"category\" field when calling search_products or search_brands.",
    }
}

#[must_use]
pub fn get_countries() -> CountriesListing {
    CountriesListing {
        countries: &COUNTRIES,
        total: COUNTRIES.len(),
        usage: "Pass a country name in the \"country\" field when calling search_products or search_brands.",
    }
}

fn no_arguments() -> serde_json::Value {
    json!({ "type": "object", "properties": {} })
}

pub(super) fn values_descriptor() -> ToolDescriptor {
    ToolDescriptor {
        name: "get_values",
        description: "List all supported ethical/ownership values that can be used to filter \
products and brands. Returns canonical value tokens with display labels.",
        input_schema: no_arguments(),
    }
}

pub(super) fn categories_descriptor() -> ToolDescriptor {
    ToolDescriptor {
        name: "get_categories",
        description: "List all supported product categories that can be used to filter products \
and brands.",
        input_schema: no_arguments(),
    }
}

pub(super) fn countries_descriptor() -> ToolDescriptor {
    ToolDescriptor {
        name: "get_countries",
        description: "List all supported countries of origin that can be used to filter products \
and brands. Currently supports Canada and USA.",
        input_schema: no_arguments(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_listing_labels_every_token() {
        let listing = get_values();
        assert_eq!(listing.total, 21);
        assert_eq!(listing.values.len(), 21);
        assert_eq!(
            listing.values[0],
            ValueEntry {
                token: "women-owned",
                label: "Women-Owned"
            }
        );
        assert!(listing
            .values
            .iter()
            .any(|v| v.token == "b-corp" && v.label == "B Corp Certified"));
    }

    #[test]
    fn categories_and_countries_serialize_with_totals() {
        let categories = serde_json::to_value(get_categories()).unwrap();
        assert_eq!(categories["total"], json!(17));
        assert_eq!(categories["categories"], json!(CATEGORIES));

        let countries = serde_json::to_value(get_countries()).unwrap();
        assert_eq!(
            countries,
            json!({
                "countries": ["Canada", "USA"],
                "total": 2,
                "usage": "Pass a country name in the \"country\" field when calling search_products or search_brands."
            })
        );
    }
}
