//! Human-readable labels for structured searches.
//!
//! The backend records `query` for session history; with a structured intent
//! present it never parses it.

use originselect_core::SearchIntent;

const FALLBACK_LABEL: &str = "product search";

/// Builds a label such as `"organic, vegan Beauty shampoo by Acme from Canada under $30"`.
///
/// Clauses appear in a fixed order and only when their field is set. Returns
/// `"product search"` when nothing is set.
#[must_use]
pub fn build_query_label(intent: &SearchIntent) -> String {
    let mut parts: Vec<String> = Vec::new();

    if !intent.values.is_empty() {
        parts.push(intent.values.join(", "));
    }
    if let Some(category) = non_empty(intent.category.as_deref()) {
        parts.push(category.to_owned());
    }
    if !intent.keywords.is_empty() {
        parts.push(intent.keywords.join(" "));
    }
    if let Some(brand) = non_empty(intent.brand.as_deref()) {
        parts.push(format!("by {brand}"));
    }
    if let Some(country) = non_empty(intent.country.as_deref()) {
        parts.push(format!("from {country}"));
    }
    if let Some(price) = intent.price_max.filter(|p| *p != 0.0 && !p.is_nan()) {
        parts.push(format!("under ${price}"));
    }

    let label = parts.join(" ");
    if label.trim().is_empty() {
        FALLBACK_LABEL.to_string()
    } else {
        label
    }
}

pub(crate) fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|v| !v.is_empty())
}
