//! Canonical filter vocabularies accepted by the discovery backend.
//!
//! These lists mirror the backend's intent validator. Tool schemas draw their
//! `enum` constraints from here, and the static tools return them verbatim.

/// Ethical and ownership value tokens, in canonical display order.
pub const VALUES: [&str; 21] = [
    "women-owned",
    "black-owned",
    "indigenous-owned",
    "latino-owned",
    "aapi-owned",
    "veteran-owned",
    "family-owned",
    "lgbtq-owned",
    "minority-owned",
    "b-corp",
    "organic",
    "sustainable",
    "vegan",
    "non-gmo",
    "fair-trade",
    "social-impact",
    "fragrance-free",
    "plastic-free",
    "cruelty-free",
    "non-toxic",
    "gluten-free",
];

pub const COUNTRIES: [&str; 2] = ["Canada", "USA"];

pub const CATEGORIES: [&str; 17] = [
    "Beauty",
    "Personal Care",
    "Baby",
    "Health & Wellness",
    "Supplements",
    "Home & Kitchen",
    "Cleaning",
    "Food & Grocery",
    "Beverages",
    "Pet Care",
    "Fashion",
    "Accessories",
    "Electronics",
    "Office",
    "Outdoors",
    "Sports",
    "Toys",
];

/// Canadian brand classification filters.
pub const CLASSIFICATIONS: [&str; 3] = [
    "fully-canadian",
    "canadian-manufactured",
    "canadian-operations",
];

pub const MARKETS: [&str; 3] = ["canada", "global", "all"];

/// Display labels keyed by value token.
pub const VALUE_LABELS: [(&str, &str); 21] = [
    ("women-owned", "Women-Owned"),
    ("black-owned", "Black-Owned"),
    ("indigenous-owned", "Indigenous-Owned"),
    ("latino-owned", "Latino-Owned"),
    ("aapi-owned", "AAPI-Owned"),
    ("veteran-owned", "Veteran-Owned"),
    ("family-owned", "Family-Owned"),
    ("lgbtq-owned", "LGBTQ+-Owned"),
    ("minority-owned", "Minority-Owned"),
    ("b-corp", "B Corp Certified"),
    ("organic", "Organic"),
    ("sustainable", "Sustainable"),
    ("vegan", "Vegan"),
    ("non-gmo", "Non-GMO"),
    ("fair-trade", "Fair Trade"),
    ("social-impact", "Social Impact"),
    ("fragrance-free", "Fragrance-Free"),
    ("plastic-free", "Plastic-Free"),
    ("cruelty-free", "Cruelty-Free"),
    ("non-toxic", "Non-Toxic"),
    ("gluten-free", "Gluten-Free"),
];

/// Backend product flag fields and the value token each one implies.
///
/// Order is significant: derived value lists follow this order.
pub const VALUE_FLAGS: [(&str, &str); 21] = [
    ("womenOwned", "women-owned"),
    ("blackOwned", "black-owned"),
    ("indigenousOwned", "indigenous-owned"),
    ("latinoOwned", "latino-owned"),
    ("aapiOwned", "aapi-owned"),
    ("veteranOwned", "veteran-owned"),
    ("familyOwned", "family-owned"),
    ("lgbtqOwned", "lgbtq-owned"),
    ("minorityOwned", "minority-owned"),
    ("bCorp", "b-corp"),
    ("organic", "organic"),
    ("sustainable", "sustainable"),
    ("vegan", "vegan"),
    ("nonGmo", "non-gmo"),
    ("fairTrade", "fair-trade"),
    ("socialImpact", "social-impact"),
    ("fragranceFree", "fragrance-free"),
    ("plasticFree", "plastic-free"),
    ("crueltyFree", "cruelty-free"),
    ("nonToxic", "non-toxic"),
    ("glutenFree", "gluten-free"),
];

/// Returns the display label for a value token, or the token itself when it
/// is not in the catalog.
#[must_use]
pub fn value_label(token: &str) -> &str {
    VALUE_LABELS
        .iter()
        .find(|(t, _)| *t == token)
        .map_or(token, |(_, label)| *label)
}
