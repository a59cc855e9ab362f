//! Query string construction for API requests.
//!
//! Entries without a value are dropped, the remaining values are stringified
//! and form-URL-encoded. An empty parameter set never produces a `?`.

use std::fmt::Display;

use serde::Serialize;
use serde_json::Value;
use url::form_urlencoded;

use super::error::ApiError;

/// Ordered set of query parameters.
///
/// # Example
///
/// ```rust
/// use wallet_client::http::QueryParams;
///
/// let query = QueryParams::new()
///     .param("page", Some(2))
///     .param("search", Some("coffee & cake"))
///     .param::<u32>("wallet_id", None);
///
/// assert_eq!(query.append_to("/transactions"), "/transactions?page=2&search=coffee+%26+cake");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter, skipping it when `value` is `None`.
    pub fn param<V: Display>(mut self, key: impl Into<String>, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.pairs.push((key.into(), value.to_string()));
        }
        self
    }

    /// Builds parameters from any value that serializes to a JSON object.
    ///
    /// `null` fields are dropped, strings are used verbatim, numbers and
    /// booleans use their JSON text and nested values are compact JSON.
    /// A value serializing to `null` yields an empty set.
    pub fn from_serializable<S: Serialize + ?Sized>(params: &S) -> Result<Self, ApiError> {
        let value = serde_json::to_value(params)
            .map_err(|e| ApiError::unknown(format!("Could not encode query parameters: {e}"), Some(e.into())))?;

        let map = match value {
            Value::Null => return Ok(Self::default()),
            Value::Object(map) => map,
            other => {
                return Err(ApiError::unknown(
                    format!("Query parameters must be a mapping, got {other}"),
                    None,
                ));
            },
        };

        let pairs = map
            .into_iter()
            .filter_map(|(key, value)| stringify(value).map(|value| (key, value)))
            .collect();

        Ok(Self { pairs })
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns the encoded query string without the leading `?`.
    pub fn encode(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }

    /// Appends the encoded query to `path`, leaving it untouched when empty.
    pub fn append_to(&self, path: &str) -> String {
        let query = self.encode();
        if query.is_empty() {
            path.to_string()
        } else {
            format!("{path}?{query}")
        }
    }
}

fn stringify(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    use super::*;

    #[derive(Serialize)]
    struct Filter {
        page: Option<u32>,
        wallet_id: Option<u64>,
        search: Option<String>,
        archived: bool,
    }

    #[test]
    fn test_none_values_are_dropped() {
        let query = QueryParams::new()
            .param("page", Some(1))
            .param::<&str>("status", None)
            .param("per_page", Some(15));

        assert_eq!(query.len(), 2);
        assert_eq!(query.append_to("/transactions"), "/transactions?page=1&per_page=15");
    }

    #[test]
    fn test_empty_params_produce_no_question_mark() {
        assert_eq!(QueryParams::new().append_to("/balances"), "/balances");

        let only_nulls = QueryParams::from_serializable(&Filter {
            page: None,
            wallet_id: None,
            search: None,
            archived: false,
        })
        .unwrap();
        // `archived` is a present value, so it survives
        assert_eq!(only_nulls.append_to("/x"), "/x?archived=false");
    }

    #[test]
    fn test_from_serializable_drops_nulls_and_encodes() {
        let query = QueryParams::from_serializable(&Filter {
            page: Some(3),
            wallet_id: None,
            search: Some("rent/april 50%".to_string()),
            archived: true,
        })
        .unwrap();

        let encoded = query.encode();
        assert!(encoded.contains("page=3"));
        assert!(encoded.contains("archived=true"));
        assert!(encoded.contains("search=rent%2Fapril+50%25"));
        assert!(!encoded.contains("wallet_id"));
    }

    #[test]
    fn test_from_serializable_unit_is_empty() {
        let query = QueryParams::from_serializable(&()).unwrap();
        assert!(query.is_empty());
    }

    #[test]
    fn test_from_serializable_rejects_non_mapping() {
        let err = QueryParams::from_serializable(&[1, 2, 3]).unwrap_err();
        assert_eq!(err.status(), 0);
    }
}
