//! Lenient field decoders for user-authored rule data.
//!
//! Stored component data comes from an editing UI and routinely contains
//! empty strings where a value has not been chosen yet, or numbers typed as
//! strings. These decoders map such values to `None` (or the field default)
//! instead of failing the whole snapshot.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserialize, Deserializer, Visitor};

use crate::error::ResolveError;

/// `""`/`null` → `None`, otherwise parse the string with `FromStr`.
///
/// Unparsable values are logged and treated as unset.
pub fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let raw = Option::<Scalar>::deserialize(deserializer)?;
    Ok(raw.and_then(|raw| parse_scalar(raw, core::any::type_name::<T>())))
}

/// Parses a string-valued enum, falling back to its default when the value
/// is empty or unknown.
pub fn parse_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Default,
{
    empty_as_none(deserializer).map(Option::unwrap_or_default)
}

/// Accepts a number, a numeric string, `""` or `null`.
pub fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(LenientNumber)
}

/// Like [`lenient_number`] but floors to an integer.
pub fn lenient_int<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_number(deserializer)?.map(|n| n.floor() as i32))
}

pub fn number_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_number(deserializer)?.unwrap_or(0.0))
}

pub fn int_or_zero<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_int(deserializer)?.unwrap_or(0))
}

/// Filter collections are stored either as plain keys or as `{key, label}`
/// objects. Both decode to the key.
pub fn collection_keys<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(serde::Deserialize)]
    #[serde(untagged)]
    enum Entry {
        Key(String),
        Object { key: String },
    }

    let entries = Option::<Vec<Entry>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(entries
        .into_iter()
        .map(|entry| match entry {
            Entry::Key(key) | Entry::Object { key } => key,
        })
        .filter(|key| !key.is_empty())
        .collect())
}

/// Strings and numbers both appear where a key is expected (`"die": "6"`).
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum Scalar {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

fn parse_scalar<T: FromStr>(raw: Scalar, ty: &'static str) -> Option<T> {
    let text = match raw {
        Scalar::Str(s) => s,
        Scalar::Int(n) => n.to_string(),
        Scalar::Float(n) => n.to_string(),
        Scalar::Bool(b) => b.to_string(),
    };
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            let err = ResolveError::MalformedComponent {
                component: trimmed.to_owned(),
                field: ty,
            };
            tracing::debug!(%err, "unparsable value, using default");
            None
        }
    }
}

struct LenientNumber;

impl<'de> Visitor<'de> for LenientNumber {
    type Value = Option<f64>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a number, a numeric string, an empty string or null")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Some(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Some(v as f64))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(Some(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        let v = v.trim();
        if v.is_empty() {
            return Ok(None);
        }
        match v.parse() {
            Ok(n) => Ok(Some(n)),
            Err(_) => {
                tracing::debug!(value = v, "non-numeric value in numeric field, treating as unset");
                Ok(None)
            }
        }
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(Some(if v { 1.0 } else { 0.0 }))
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
        d.deserialize_any(self)
    }
}

/// Damage tag on a bonus: `"wpn"` (or empty) means "same as the weapon".
pub fn weapon_or_damage<'de, D>(
    deserializer: D,
) -> Result<Option<crate::model::DamageType>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") | Some("wpn") => Ok(None),
        Some(code) => Ok(parse_scalar(Scalar::Str(code.to_owned()), "DamageType")),
    }
}
