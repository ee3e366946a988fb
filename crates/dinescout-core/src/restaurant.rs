//! Restaurant document model.
//!
//! Restaurant documents are schema-less: any field may be missing, and the
//! coordinate and rating fields arrive either as JSON numbers or as numeric
//! strings. A [`RestaurantRecord`] keeps the document exactly as stored and
//! exposes typed views over the fields search relies on. A field whose value
//! does not fit its view reads as absent but is still serialized unchanged.

use std::borrow::Cow;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};
use uuid::Uuid;

/// A number that may be stored as a JSON number or as a string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    Number(Number),
    Text(String),
}

impl Numeric {
    /// Returns the value as a finite `f64`.
    ///
    /// Strings must be plain decimals (optional sign, digits, optional
    /// fraction, surrounding whitespace allowed). Exponents, `inf` and `NaN`
    /// are rejected so the in-memory and SQL stores agree on what counts as
    /// a coordinate.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Numeric::Number(n) => n.as_f64().filter(|v| v.is_finite()),
            Numeric::Text(s) => parse_plain_decimal(s),
        }
    }
}

impl From<f64> for Numeric {
    /// Non-finite values have no JSON number form and are kept as text.
    fn from(value: f64) -> Self {
        Number::from_f64(value).map_or_else(|| Numeric::Text(value.to_string()), Numeric::Number)
    }
}

impl From<&str> for Numeric {
    fn from(value: &str) -> Self {
        Numeric::Text(value.to_string())
    }
}

fn parse_plain_decimal(raw: &str) -> Option<f64> {
    let s = raw.trim();
    let unsigned = s.strip_prefix(['-', '+']).unwrap_or(s);
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (unsigned, None),
    };

    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    let has_digits = !int_part.is_empty() || frac_part.is_some_and(|f| !f.is_empty());
    if !has_digits || !all_digits(int_part) || !frac_part.is_none_or(all_digits) {
        return None;
    }

    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Cuisine listing: either free text (`"North Indian, Chinese"`) or a list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Cuisines {
    Text(String),
    List(Vec<String>),
}

impl Cuisines {
    /// Renders the cuisines as a single searchable string.
    #[must_use]
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Cuisines::Text(text) => Cow::Borrowed(text.as_str()),
            Cuisines::List(items) => Cow::Owned(items.join(", ")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Location {
    #[serde(default, deserialize_with = "lenient")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub latitude: Option<Numeric>,
    #[serde(default, deserialize_with = "lenient")]
    pub longitude: Option<Numeric>,
}

impl Location {
    /// Both coordinates, when present and numeric.
    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        let latitude = self.latitude.as_ref()?.as_f64()?;
        let longitude = self.longitude.as_ref()?.as_f64()?;
        Some((latitude, longitude))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UserRating {
    #[serde(default, deserialize_with = "lenient")]
    pub aggregate_rating: Option<Numeric>,
    #[serde(default, deserialize_with = "lenient")]
    pub votes: Option<Numeric>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
struct Attributes {
    #[serde(default, deserialize_with = "lenient")]
    name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    cuisines: Option<Cuisines>,
    #[serde(default, deserialize_with = "lenient")]
    location: Option<Location>,
    #[serde(default, deserialize_with = "lenient")]
    featured_image: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    user_rating: Option<UserRating>,
}

/// A stored restaurant document.
///
/// Serializes as the stored document with the store id under `id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RestaurantRecord {
    pub id: Uuid,
    #[serde(skip)]
    attributes: Attributes,
    #[serde(flatten)]
    document: Map<String, Value>,
}

impl RestaurantRecord {
    /// An empty record carrying only its identifier.
    #[must_use]
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            attributes: Attributes::default(),
            document: Map::new(),
        }
    }

    /// Builds a record from a stored document and its store-assigned id.
    ///
    /// A document `id` field (for example a numeric id from an upstream
    /// dataset) is moved to `source_id` so it cannot shadow the store id.
    /// Documents that are not JSON objects yield an id-only record.
    #[must_use]
    pub fn from_document(id: Uuid, document: Value) -> Self {
        let Value::Object(mut document) = document else {
            return Self::new(id);
        };

        if let Some(source_id) = document.remove("id") {
            document.entry("source_id").or_insert(source_id);
        }

        let attributes =
            serde_json::from_value(Value::Object(document.clone())).unwrap_or_default();
        Self {
            id,
            attributes,
            document,
        }
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.attributes.name.as_deref()
    }

    #[must_use]
    pub fn cuisines(&self) -> Option<&Cuisines> {
        self.attributes.cuisines.as_ref()
    }

    #[must_use]
    pub fn location(&self) -> Option<&Location> {
        self.attributes.location.as_ref()
    }

    #[must_use]
    pub fn featured_image(&self) -> Option<&str> {
        self.attributes.featured_image.as_deref()
    }

    #[must_use]
    pub fn user_rating(&self) -> Option<&UserRating> {
        self.attributes.user_rating.as_ref()
    }

    /// A raw document field, whatever its shape.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.document.get(key)
    }

    /// The stored document, without the store id.
    #[must_use]
    pub fn document(&self) -> &Map<String, Value> {
        &self.document
    }

    /// Stored coordinates as `(latitude, longitude)`, when both are numeric.
    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.location()?.coordinates()
    }

    #[must_use]
    pub fn cuisines_text(&self) -> Option<Cow<'_, str>> {
        self.cuisines().map(Cuisines::as_text)
    }
}

/// Deserialize an optional field, treating a value of the wrong shape as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}
