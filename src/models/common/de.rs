//! Deserializers for query-string values.
//!
//! Query structs flatten `PaginationQuery`, and under `#[serde(flatten)]` every value
//! arrives as a string, so numeric fields need to accept both forms.

use serde::{Deserialize, Deserializer, de::Error};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Deserialize)]
#[serde(untagged)]
enum StrOrNum {
    Int(i64),
    Float(f64),
    Str(String),
}

fn parse<T, E>(raw: StrOrNum) -> Result<Option<T>, E>
where
    T: FromStr,
    T::Err: Display,
    E: Error,
{
    let text = match raw {
        StrOrNum::Int(n) => n.to_string(),
        StrOrNum::Float(n) => n.to_string(),
        StrOrNum::Str(s) => s.trim().to_string(),
    };
    if text.is_empty() {
        return Ok(None);
    }
    text.parse::<T>()
        .map(Some)
        .map_err(|e| E::custom(format!("invalid value '{text}': {e}")))
}

/// `Option<T>` from a number or a numeric string; an empty string is `None`.
pub fn option_from_str<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    match Option::<StrOrNum>::deserialize(deserializer)? {
        Some(raw) => parse(raw),
        None => Ok(None),
    }
}

/// `T` from a number or a numeric string.
pub fn from_str<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    parse(StrOrNum::deserialize(deserializer)?)?
        .ok_or_else(|| D::Error::custom("value must not be empty"))
}

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`),
/// used by update requests that can clear a nullable column.
pub fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::common::PaginationQuery;
    use actix_web::web::Query;

    #[derive(Debug, Deserialize)]
    struct Params {
        #[serde(flatten)]
        pagination: PaginationQuery,
        #[serde(default, deserialize_with = "option_from_str")]
        class_id: Option<i64>,
    }

    #[derive(Debug, Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "double_option")]
        class_id: Option<Option<i64>>,
    }

    #[test]
    fn test_flattened_query_numbers() {
        let params = Query::<Params>::from_query("page=2&size=5&class_id=9")
            .unwrap()
            .into_inner();
        assert_eq!(params.pagination.page, 2);
        assert_eq!(params.pagination.size, 5);
        assert_eq!(params.class_id, Some(9));

        let params = Query::<Params>::from_query("class_id=").unwrap().into_inner();
        assert_eq!(params.class_id, None);
        assert_eq!(params.pagination.page, 1);

        assert!(Query::<Params>::from_query("class_id=abc").is_err());
    }

    #[test]
    fn test_double_option() {
        let absent: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.class_id, None);
        let cleared: Patch = serde_json::from_str(r#"{"class_id":null}"#).unwrap();
        assert_eq!(cleared.class_id, Some(None));
        let set: Patch = serde_json::from_str(r#"{"class_id":4}"#).unwrap();
        assert_eq!(set.class_id, Some(Some(4)));
    }
}
