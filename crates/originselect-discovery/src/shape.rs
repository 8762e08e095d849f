//! Reshapes raw discovery responses into the payload returned to agents.
//!
//! The backend serves a storefront as well as agents, so its records carry
//! legacy aliases (`title`/`name`, `brand`/`brand_extracted`), boolean flag
//! columns instead of value lists, and several generations of purchase-link
//! fields. Shaping picks one name per concept and drops the rest.
//!
//! Fallbacks use JavaScript truthiness because the backend does: `0`, `""`,
//! `false` and `null` all count as absent. Nothing here fails on missing
//! data; only `success` being falsy produces a [`Failure`].

use originselect_core::catalog::VALUE_FLAGS;
use serde::Serialize;
use serde_json::{json, Value};

/// Appended to every successful payload.
pub const DISCLAIMER: &str = "Values and certifications are based on brand-reported data. Visit the product or brand website to verify specific claims before purchasing.";

const DEFAULT_ERROR: &str = "Request failed";
const PRODUCTS_FAILURE_MESSAGE: &str = "Unable to retrieve products";
const BRANDS_FAILURE_MESSAGE: &str = "Unable to retrieve brands";

/// Agent-facing result of one discovery call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ShapedResponse {
    Failure(Failure),
    Products(ProductsPayload),
    Brands(BrandsPayload),
}

impl ShapedResponse {
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, ShapedResponse::Failure(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub error: Value,
    pub message: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductsPayload {
    pub summary: Value,
    pub products: Vec<ProductRecord>,
    pub brands: Vec<BrandRecord>,
    pub collections: Vec<CollectionRecord>,
    /// Intent the backend executed; agents send it back to `refine_search`.
    pub intent: Option<Value>,
    pub total_products: u64,
    pub latency_ms: Option<Value>,
    pub disclaimer: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandsPayload {
    pub summary: Value,
    pub brands: Vec<BrandRecord>,
    pub total_brands: usize,
    pub latency_ms: Option<Value>,
    pub disclaimer: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub name: Value,
    pub brand: Value,
    pub category: Value,
    pub country: Value,
    pub price: Option<Value>,
    pub values: Vec<Value>,
    pub description: Value,
    pub purchase_url: Option<String>,
    pub store_links: Vec<StoreLink>,
    pub image_url: Option<Value>,
    pub verified: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreLink {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandRecord {
    pub name: Value,
    pub country: Value,
    pub values: Value,
    pub website: Option<Value>,
    pub description: Option<Value>,
    pub product_count: u64,
    pub verified: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionRecord {
    pub title: Value,
    pub description: Value,
    pub product_count: u64,
}

/// Shapes a discover or refine response carrying products, brands and
/// collections.
#[must_use]
pub fn shape_products(response: &Value) -> ShapedResponse {
    if let Some(failure) = failure(response, PRODUCTS_FAILURE_MESSAGE) {
        return ShapedResponse::Failure(failure);
    }

    let products: Vec<ProductRecord> = records(response, "products").map(shape_product).collect();
    let brands = records(response, "brands").map(shape_brand).collect();
    let collections = records(response, "collections")
        .map(shape_collection)
        .collect();

    let meta = response.get("meta").unwrap_or(&Value::Null);
    let total_products = first_truthy(meta, &["totalProducts"])
        .and_then(as_count)
        .unwrap_or(products.len() as u64);

    ShapedResponse::Products(ProductsPayload {
        summary: text(response, &["summary"]),
        products,
        brands,
        collections,
        intent: first_truthy(response, &["intent"]).cloned(),
        total_products,
        latency_ms: first_truthy(meta, &["latencyMs"]).cloned(),
        disclaimer: DISCLAIMER,
    })
}

/// Shapes a discover response for a brand-only search.
#[must_use]
pub fn shape_brands(response: &Value) -> ShapedResponse {
    if let Some(failure) = failure(response, BRANDS_FAILURE_MESSAGE) {
        return ShapedResponse::Failure(failure);
    }

    let brands: Vec<BrandRecord> = records(response, "brands").map(shape_brand).collect();
    let meta = response.get("meta").unwrap_or(&Value::Null);

    ShapedResponse::Brands(BrandsPayload {
        summary: text(response, &["summary"]),
        total_brands: brands.len(),
        brands,
        latency_ms: first_truthy(meta, &["latencyMs"]).cloned(),
        disclaimer: DISCLAIMER,
    })
}

fn failure(response: &Value, fallback_message: &str) -> Option<Failure> {
    let succeeded = response.get("success").is_some_and(is_truthy);
    if succeeded {
        return None;
    }
    Some(Failure {
        error: passthrough(response, &["error"]).unwrap_or_else(|| json!(DEFAULT_ERROR)),
        message: passthrough(response, &["message"]).unwrap_or_else(|| json!(fallback_message)),
    })
}

fn shape_product(product: &Value) -> ProductRecord {
    ProductRecord {
        name: text(product, &["name", "title"]),
        brand: text(product, &["brand", "brand_extracted"]),
        category: text(product, &["category"]),
        country: text(product, &["country"]),
        price: first_truthy(product, &["price", "currentPrice"]).cloned(),
        values: product_values(product),
        description: text(product, &["description"]),
        purchase_url: best_purchase_url(product),
        store_links: store_links(product),
        image_url: passthrough(product, &["imageUrl", "image"]),
        verified: is_pro_verified(product),
    }
}

fn shape_brand(brand: &Value) -> BrandRecord {
    BrandRecord {
        name: text(brand, &["brandName", "name"]),
        country: text(brand, &["country"]),
        values: first_truthy(brand, &["values", "classificationTags"])
            .cloned()
            .unwrap_or_else(|| json!([])),
        website: passthrough(brand, &["website"]),
        description: passthrough(brand, &["description"]),
        product_count: first_truthy(brand, &["productCount"])
            .and_then(as_count)
            .unwrap_or(0),
        verified: is_pro_verified(brand),
    }
}

fn shape_collection(collection: &Value) -> CollectionRecord {
    let embedded = collection
        .get("products")
        .and_then(Value::as_array)
        .map(|p| p.len() as u64);

    CollectionRecord {
        title: text(collection, &["title", "name"]),
        description: text(collection, &["description"]),
        product_count: first_truthy(collection, &["productCount"])
            .and_then(as_count)
            .or(embedded)
            .unwrap_or(0),
    }
}

/// Explicit `values` list if present, otherwise tokens derived from the
/// backend's flag columns in [`VALUE_FLAGS`] order.
fn product_values(product: &Value) -> Vec<Value> {
    if let Some(values) = product.get("values").and_then(Value::as_array) {
        return values.clone();
    }

    VALUE_FLAGS
        .iter()
        .filter(|(flag, _)| product.get(*flag).is_some_and(is_flag_set))
        .map(|(_, token)| Value::String((*token).to_string()))
        .collect()
}

/// Flags arrive as `true`, `1` or `"1"` depending on the import path.
fn is_flag_set(flag: &Value) -> bool {
    match flag {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64() == Some(1.0),
        Value::String(s) => s == "1",
        _ => false,
    }
}

/// Picks one purchase URL.
///
/// Store links come first because they carry affiliate tags, then the
/// brand's own store, then a raw Amazon link, then legacy top-level fields.
fn best_purchase_url(product: &Value) -> Option<String> {
    if let Some(links) = product.get("purchaseLinks").filter(|v| is_truthy(v)) {
        if let Some(first) = links
            .get("stores")
            .and_then(Value::as_array)
            .and_then(|stores| stores.first())
        {
            return first.get("url").and_then(Value::as_str).map(str::to_owned);
        }
        if let Some(url) = opt_text(links, &["dtc", "amazon"]) {
            return Some(url);
        }
    }
    opt_text(product, &["affiliateUrl", "sourceUrl", "url"])
}

/// Every store with a URL; if there are none, the brand's own store.
fn store_links(product: &Value) -> Vec<StoreLink> {
    let Some(links) = product.get("purchaseLinks").filter(|v| is_truthy(v)) else {
        return Vec::new();
    };

    let mut out: Vec<StoreLink> = links
        .get("stores")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|store| {
            let url = opt_text(store, &["url"])?;
            Some(StoreLink {
                name: opt_text(store, &["name"]).unwrap_or_else(|| "Store".to_string()),
                url,
            })
        })
        .collect();

    if out.is_empty() {
        if let Some(dtc) = opt_text(links, &["dtc"]) {
            out.push(StoreLink {
                name: opt_text(product, &["brand"]).unwrap_or_else(|| "Brand".to_string()),
                url: dtc,
            });
        }
    }
    out
}

fn is_pro_verified(record: &Value) -> bool {
    record.get("proVerified") == Some(&Value::Bool(true))
}

fn records<'a>(response: &'a Value, key: &str) -> impl Iterator<Item = &'a Value> {
    response
        .get(key)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn first_truthy<'a>(record: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| record.get(*key))
        .find(|v| is_truthy(v))
}

fn opt_text(record: &Value, keys: &[&str]) -> Option<String> {
    first_truthy(record, keys).map(|v| match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}

/// First truthy value under `keys`, as the backend sent it.
fn passthrough(record: &Value, keys: &[&str]) -> Option<Value> {
    first_truthy(record, keys).cloned()
}

/// Like [`passthrough`], defaulting to `""`.
fn text(record: &Value, keys: &[&str]) -> Value {
    passthrough(record, keys).unwrap_or_else(|| Value::String(String::new()))
}

/// Counts arrive as numbers or, from some import paths, numeric strings.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn as_count(value: &Value) -> Option<u64> {
    if let Some(n) = value.as_u64() {
        return Some(n);
    }
    let number = match value {
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        other => other.as_f64()?,
    };
    (number.is_finite() && number >= 0.0).then(|| number as u64)
}

#[cfg(test)]
#[path = "shape_test.rs"]
mod tests;
