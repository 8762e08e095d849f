//! Structured search intents and the edits that refine them.
//!
//! A [`SearchIntent`] is sent to the backend verbatim as `structuredIntent`,
//! which makes the backend skip natural-language parsing. The calling agent
//! holds the returned intent and sends it back with a list of
//! [`Modification`]s to refine a search.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::CoreError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntentType {
    #[default]
    Product,
    Brand,
    Mixed,
}

/// Market scope for a discovery request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Market {
    Canada,
    Global,
    #[default]
    All,
}

impl std::fmt::Display for Market {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Market::Canada => write!(f, "canada"),
            Market::Global => write!(f, "global"),
            Market::All => write!(f, "all"),
        }
    }
}

/// A fully specified discovery query.
///
/// `excludes`, `subcategory`, `source_brand`, `source_product` and `industry`
/// exist for backend compatibility and are never populated here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchIntent {
    pub intent_type: IntentType,
    pub country: Option<String>,
    pub category: Option<String>,
    pub values: Vec<String>,
    pub keywords: Vec<String>,
    pub brand: Option<String>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub classification: Option<String>,
    pub excludes: Vec<String>,
    pub subcategory: Option<String>,
    pub source_brand: Option<String>,
    pub source_product: Option<String>,
    pub industry: Option<String>,
}

impl SearchIntent {
    /// Checks that prices are non-negative and ordered.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidPriceRange`] when either bound is negative
    /// or `price_min` exceeds `price_max`.
    pub fn validate(&self) -> Result<(), CoreError> {
        for (name, price) in [("priceMin", self.price_min), ("priceMax", self.price_max)] {
            if let Some(p) = price {
                if p.is_nan() || p < 0.0 {
                    return Err(CoreError::InvalidPriceRange(format!(
                        "{name} must be a non-negative number, got {p}"
                    )));
                }
            }
        }
        if let (Some(min), Some(max)) = (self.price_min, self.price_max) {
            if min > max {
                return Err(CoreError::InvalidPriceRange(format!(
                    "priceMin ({min}) is greater than priceMax ({max})"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModificationAction {
    Add,
    Remove,
    Modify,
}

impl std::fmt::Display for ModificationAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModificationAction::Add => write!(f, "add"),
            ModificationAction::Remove => write!(f, "remove"),
            ModificationAction::Modify => write!(f, "modify"),
        }
    }
}

/// Intent fields a refinement may touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IntentField {
    Values,
    Keywords,
    Excludes,
    Country,
    Category,
    Classification,
    PriceMax,
    PriceMin,
    Market,
}

impl IntentField {
    /// `true` for sequence-valued fields, which take `add`/`remove`.
    #[must_use]
    pub fn is_collection(self) -> bool {
        matches!(
            self,
            IntentField::Values | IntentField::Keywords | IntentField::Excludes
        )
    }

    #[must_use]
    pub fn is_price(self) -> bool {
        matches!(self, IntentField::PriceMax | IntentField::PriceMin)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            IntentField::Values => "values",
            IntentField::Keywords => "keywords",
            IntentField::Excludes => "excludes",
            IntentField::Country => "country",
            IntentField::Category => "category",
            IntentField::Classification => "classification",
            IntentField::PriceMax => "priceMax",
            IntentField::PriceMin => "priceMin",
            IntentField::Market => "market",
        }
    }
}

impl std::fmt::Display for IntentField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One edit to a previously issued intent.
///
/// Held as the raw JSON object so the backend receives every key the agent
/// sent. Only price values are rewritten, by [`Modification::coerce_numeric`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Modification(pub Map<String, Value>);

impl Modification {
    #[must_use]
    pub fn new(action: ModificationAction, field: IntentField, value: Value) -> Self {
        let mut map = Map::new();
        map.insert("action".into(), Value::String(action.to_string()));
        map.insert("field".into(), Value::String(field.as_str().to_string()));
        map.insert("value".into(), value);
        Self(map)
    }

    /// `None` when `action` is absent or not one of add/remove/modify.
    #[must_use]
    pub fn action(&self) -> Option<ModificationAction> {
        self.0
            .get("action")
            .and_then(|v| ModificationAction::deserialize(v).ok())
    }

    #[must_use]
    pub fn field(&self) -> Option<IntentField> {
        self.0
            .get("field")
            .and_then(|v| IntentField::deserialize(v).ok())
    }

    #[must_use]
    pub fn value(&self) -> Option<&Value> {
        self.0.get("value")
    }

    /// Checks that a recognised action suits a recognised field's shape.
    ///
    /// Unknown or missing actions and fields pass; the backend decides.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::IncompatibleModification`] for `add`/`remove` on
    /// a scalar field or `modify` on a sequence field.
    pub fn check_shape(&self) -> Result<(), CoreError> {
        let (Some(action), Some(field)) = (self.action(), self.field()) else {
            return Ok(());
        };
        let compatible = match action {
            ModificationAction::Add | ModificationAction::Remove => field.is_collection(),
            ModificationAction::Modify => !field.is_collection(),
        };
        if compatible {
            Ok(())
        } else {
            Err(CoreError::IncompatibleModification { action, field })
        }
    }

    /// Converts a string price value into a JSON number.
    ///
    /// Parses the leading numeric prefix, so `"30 dollars"` becomes `30`.
    /// Strings with no numeric prefix become `null`. Non-price fields and
    /// non-string values are returned unchanged.
    #[must_use]
    pub fn coerce_numeric(mut self) -> Self {
        if !self.field().is_some_and(IntentField::is_price) {
            return self;
        }
        let parsed = match self.0.get("value") {
            Some(Value::String(raw)) => leading_number(raw),
            _ => return self,
        };
        let coerced = parsed.and_then(price_number).map_or(Value::Null, Value::Number);
        self.0.insert("value".into(), coerced);
        self
    }
}

/// Parses the longest numeric prefix of `raw` after leading whitespace:
/// an optional sign, digits with an optional fraction, and an optional
/// exponent.
fn leading_number(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;
    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        mantissa_digits += frac_end - end - 1;
        end = frac_end;
    }
    if mantissa_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}

/// Whole prices are sent as integers so `"30"` goes out as `30`, not `30.0`.
#[allow(clippy::cast_possible_truncation)]
fn price_number(price: f64) -> Option<serde_json::Number> {
    if price.fract() == 0.0 && price.abs() < 9.0e15 {
        Some(serde_json::Number::from(price as i64))
    } else {
        serde_json::Number::from_f64(price)
    }
}
