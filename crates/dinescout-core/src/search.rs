//! Search intents and the store filters they translate into.
//!
//! A [`SearchIntent`] is built per request from raw parameters and validated
//! up front; [`SearchIntent::into_filter`] turns it into a [`RestaurantFilter`]
//! that every store implementation evaluates the same way.

use regex::{Regex, RegexBuilder};
use thiserror::Error;
use uuid::Uuid;

use crate::restaurant::RestaurantRecord;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("invalid restaurant id '{0}'")]
    MalformedId(String),

    #[error("cuisine parameter is required")]
    MissingTerm,

    #[error("no search tags were provided")]
    NoTags,

    #[error("{0} parameter is required")]
    MissingParameter(&'static str),

    #[error("{param} must be a finite number, got '{value}'")]
    InvalidNumber { param: &'static str, value: String },

    #[error("radius must not be negative")]
    NegativeRadius,
}

/// Case-insensitive text matcher.
///
/// Each store renders it with its own pattern engine; [`TextMatcher::to_regex`]
/// is the in-process rendering. Terms always match literally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextMatcher {
    /// The term must appear between `\b` word boundaries.
    WholeWord(String),
    Substring(String),
}

impl TextMatcher {
    #[must_use]
    pub fn term(&self) -> &str {
        match self {
            TextMatcher::WholeWord(term) | TextMatcher::Substring(term) => term,
        }
    }

    /// # Errors
    ///
    /// Returns an error if the escaped term exceeds the regex size limit.
    pub fn to_regex(&self) -> Result<Regex, regex::Error> {
        let pattern = match self {
            TextMatcher::WholeWord(term) => format!(r"\b{}\b", regex::escape(term)),
            TextMatcher::Substring(term) => regex::escape(term),
        };
        RegexBuilder::new(&pattern).case_insensitive(true).build()
    }

    /// Compiles the pattern on every call; see [`RestaurantFilter::predicate`]
    /// for repeated use.
    #[must_use]
    pub fn matches(&self, haystack: &str) -> bool {
        self.to_regex().is_ok_and(|re| re.is_match(haystack))
    }
}

/// Closed latitude/longitude box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_longitude: f64,
    pub max_longitude: f64,
}

impl BoundingBox {
    /// Square box of half-width `radius` (in coordinate degrees) around a point.
    ///
    /// This approximates a radius search; it is not a geodesic circle.
    #[must_use]
    pub fn around(latitude: f64, longitude: f64, radius: f64) -> Self {
        Self {
            min_latitude: latitude - radius,
            max_latitude: latitude + radius,
            min_longitude: longitude - radius,
            max_longitude: longitude + radius,
        }
    }

    /// Boundary points are inside.
    #[must_use]
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        (self.min_latitude..=self.max_latitude).contains(&latitude)
            && (self.min_longitude..=self.max_longitude).contains(&longitude)
    }
}

/// Predicate evaluated by a restaurant store.
#[derive(Debug, Clone, PartialEq)]
pub enum RestaurantFilter {
    Id(Uuid),
    /// Matches when any matcher hits the `cuisines` field or the `name` field.
    AnyText(Vec<TextMatcher>),
    /// Matches records whose numeric coordinates fall inside the box.
    Within(BoundingBox),
}

impl RestaurantFilter {
    /// Compiles the filter once for evaluation against many records.
    #[must_use]
    pub fn predicate(&self) -> Box<dyn Fn(&RestaurantRecord) -> bool + Send + Sync + '_> {
        match self {
            RestaurantFilter::Id(id) => Box::new(move |record: &RestaurantRecord| record.id == *id),
            RestaurantFilter::AnyText(matchers) => {
                let patterns: Vec<Regex> = matchers
                    .iter()
                    .filter_map(|matcher| matcher.to_regex().ok())
                    .collect();
                Box::new(move |record: &RestaurantRecord| {
                    let cuisines = record.cuisines_text();
                    let matched = [cuisines.as_deref(), record.name()]
                        .into_iter()
                        .flatten()
                        .any(|field| patterns.iter().any(|re| re.is_match(field)));
                    matched
                })
            }
            RestaurantFilter::Within(bounds) => Box::new(move |record: &RestaurantRecord| {
                record
                    .coordinates()
                    .is_some_and(|(lat, lon)| bounds.contains(lat, lon))
            }),
        }
    }

    #[must_use]
    pub fn matches(&self, record: &RestaurantRecord) -> bool {
        self.predicate()(record)
    }
}

/// A validated search request.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchIntent {
    ById(Uuid),
    ByCuisineText(String),
    ByTags(Vec<String>),
    ByLocation {
        latitude: f64,
        longitude: f64,
        radius: f64,
    },
}

impl SearchIntent {
    /// # Errors
    ///
    /// Returns [`QueryError::MalformedId`] when `raw` is not a UUID.
    pub fn by_id(raw: &str) -> Result<Self, QueryError> {
        Uuid::parse_str(raw.trim())
            .map(SearchIntent::ById)
            .map_err(|_| QueryError::MalformedId(raw.to_string()))
    }

    /// # Errors
    ///
    /// Returns [`QueryError::MissingTerm`] when the term is absent or blank.
    pub fn by_cuisine_text(term: Option<&str>) -> Result<Self, QueryError> {
        match term.map(str::trim) {
            Some(term) if !term.is_empty() => Ok(SearchIntent::ByCuisineText(term.to_string())),
            _ => Err(QueryError::MissingTerm),
        }
    }

    /// # Errors
    ///
    /// Returns [`QueryError::NoTags`] when no non-blank tag remains.
    pub fn by_tags<I, S>(tags: I) -> Result<Self, QueryError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tags: Vec<String> = tags
            .into_iter()
            .map(Into::into)
            .filter(|tag| !tag.trim().is_empty())
            .collect();
        if tags.is_empty() {
            return Err(QueryError::NoTags);
        }
        Ok(SearchIntent::ByTags(tags))
    }

    /// # Errors
    ///
    /// Returns [`QueryError::InvalidNumber`] for non-finite inputs and
    /// [`QueryError::NegativeRadius`] for a radius below zero.
    pub fn by_location(latitude: f64, longitude: f64, radius: f64) -> Result<Self, QueryError> {
        for (param, value) in [
            ("latitude", latitude),
            ("longitude", longitude),
            ("radius", radius),
        ] {
            if !value.is_finite() {
                return Err(QueryError::InvalidNumber {
                    param,
                    value: value.to_string(),
                });
            }
        }
        if radius < 0.0 {
            return Err(QueryError::NegativeRadius);
        }
        Ok(SearchIntent::ByLocation {
            latitude,
            longitude,
            radius,
        })
    }

    /// Builds a location intent from raw query-string values.
    ///
    /// `radius` falls back to `default_radius` when absent or blank.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::MissingParameter`] when a coordinate is absent
    /// and [`QueryError::InvalidNumber`] when any value does not parse.
    pub fn by_location_params(
        latitude: Option<&str>,
        longitude: Option<&str>,
        radius: Option<&str>,
        default_radius: f64,
    ) -> Result<Self, QueryError> {
        let latitude = parse_required("latitude", latitude)?;
        let longitude = parse_required("longitude", longitude)?;
        let radius = match radius.map(str::trim).filter(|r| !r.is_empty()) {
            Some(raw) => parse_number("radius", raw)?,
            None => default_radius,
        };
        Self::by_location(latitude, longitude, radius)
    }

    #[must_use]
    pub fn into_filter(self) -> RestaurantFilter {
        match self {
            SearchIntent::ById(id) => RestaurantFilter::Id(id),
            SearchIntent::ByCuisineText(term) => {
                RestaurantFilter::AnyText(vec![TextMatcher::WholeWord(term)])
            }
            SearchIntent::ByTags(tags) => {
                RestaurantFilter::AnyText(tags.into_iter().map(TextMatcher::Substring).collect())
            }
            SearchIntent::ByLocation {
                latitude,
                longitude,
                radius,
            } => RestaurantFilter::Within(BoundingBox::around(latitude, longitude, radius)),
        }
    }
}

fn parse_required(param: &'static str, raw: Option<&str>) -> Result<f64, QueryError> {
    match raw.map(str::trim).filter(|r| !r.is_empty()) {
        Some(raw) => parse_number(param, raw),
        None => Err(QueryError::MissingParameter(param)),
    }
}

fn parse_number(param: &'static str, raw: &str) -> Result<f64, QueryError> {
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| QueryError::InvalidNumber {
            param,
            value: raw.to_string(),
        })
}

#[cfg(test)]
#[path = "search_test.rs"]
mod tests;
