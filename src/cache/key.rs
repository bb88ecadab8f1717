//! Cache Key Module
//!
//! Request parameters and the deterministic key derived from them.
//! Parameters live in a sorted map, so the key never depends on the order in
//! which a call site inserted them.

use std::collections::BTreeMap;
use std::fmt;

use url::form_urlencoded;

// == Param Value ==
/// A primitive query parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Text(String),
    Integer(i64),
    Flag(bool),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Text(s) => f.write_str(s),
            ParamValue::Integer(n) => write!(f, "{}", n),
            ParamValue::Flag(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Integer(value)
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::Integer(i64::from(value))
    }
}

impl From<u64> for ParamValue {
    fn from(value: u64) -> Self {
        ParamValue::Integer(value as i64)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Flag(value)
    }
}

// == Request Params ==
/// Flat map of query parameters, iterated in name order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParams {
    values: BTreeMap<String, ParamValue>,
}

impl RequestParams {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Inserts or replaces a parameter.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        self.values.insert(name.into(), value.into());
    }

    /// Inserts a parameter only if no value is present under that name.
    pub fn insert_default(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        self.values.entry(name.into()).or_insert_with(|| value.into());
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Iterates parameters sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K, V> FromIterator<(K, V)> for RequestParams
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = RequestParams::new();
        for (name, value) in iter {
            params.insert(name, value);
        }
        params
    }
}

// == Key Derivation ==
/// Derives the cache key for an endpoint and its parameters.
///
/// The key is the endpoint followed by `?name=value` pairs joined with `&`
/// in name order, or the bare endpoint when there are no parameters. Names
/// and values are form-encoded, so a value holding `&` or `=` cannot collide
/// with a different parameter set.
///
/// # Example
/// ```
/// use movie_catalog_cache::cache::{cache_key, RequestParams};
///
/// let a = RequestParams::new().with("page", 1u32).with("language", "es");
/// let b = RequestParams::new().with("language", "es").with("page", 1u32);
/// assert_eq!(cache_key("/movie/popular", &a), cache_key("/movie/popular", &b));
/// assert_eq!(cache_key("/movie/popular", &a), "/movie/popular?language=es&page=1");
/// ```
pub fn cache_key(endpoint: &str, params: &RequestParams) -> String {
    if params.is_empty() {
        return endpoint.to_string();
    }

    let mut query = form_urlencoded::Serializer::new(String::new());
    for (name, value) in params.iter() {
        query.append_pair(name, &value.to_string());
    }

    format!("{}?{}", endpoint, query.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_without_params() {
        assert_eq!(cache_key("/genre/movie/list", &RequestParams::new()), "/genre/movie/list");
    }

    #[test]
    fn test_key_sorted_by_name() {
        let params = RequestParams::new()
            .with("with_genres", 28u64)
            .with("page", 2u32)
            .with("include_adult", false);

        assert_eq!(
            cache_key("/discover/movie", &params),
            "/discover/movie?include_adult=false&page=2&with_genres=28"
        );
    }

    #[test]
    fn test_key_order_independent() {
        let a: RequestParams = vec![("page", "1"), ("language", "es")].into_iter().collect();
        let b: RequestParams = vec![("language", "es"), ("page", "1")].into_iter().collect();
        assert_eq!(cache_key("/movie/popular", &a), cache_key("/movie/popular", &b));
    }

    #[test]
    fn test_key_escapes_reserved_characters() {
        let injected = RequestParams::new().with("query", "a&year=1999");
        let split = RequestParams::new().with("query", "a").with("year", 1999u32);

        assert_eq!(
            cache_key("/search/movie", &injected),
            "/search/movie?query=a%26year%3D1999"
        );
        assert_ne!(
            cache_key("/search/movie", &injected),
            cache_key("/search/movie", &split)
        );
    }

    #[test]
    fn test_key_encodes_spaces_and_plus() {
        let spaced = RequestParams::new().with("query", "a b");
        let plus = RequestParams::new().with("query", "a+b");

        assert_eq!(cache_key("/search/multi", &spaced), "/search/multi?query=a+b");
        assert_eq!(cache_key("/search/multi", &plus), "/search/multi?query=a%2Bb");
    }

    #[test]
    fn test_key_differs_by_endpoint() {
        let params = RequestParams::new().with("page", 1u32);
        assert_ne!(
            cache_key("/movie/popular", &params),
            cache_key("/movie/top_rated", &params)
        );
    }

    #[test]
    fn test_insert_default_keeps_existing() {
        let mut params = RequestParams::new().with("language", "en-US");
        params.insert_default("language", "es-ES");
        assert_eq!(params.get("language"), Some(&ParamValue::Text("en-US".into())));

        let mut empty = RequestParams::new();
        empty.insert_default("language", "es-ES");
        assert_eq!(empty.get("language"), Some(&ParamValue::Text("es-ES".into())));
    }
}
