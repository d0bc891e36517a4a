//! Lenient field decoders for the loosely typed source documents.

use std::fmt;

use serde::de::{Error, Visitor};
use serde::{Deserialize, Deserializer};

use crate::{EntityId, ModelError};

/// Text field that may arrive as a string, number or boolean.
pub(crate) fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(opt_text(deserializer)?.unwrap_or_default())
}

/// Optional text; `null` and the empty string decode to `None`.
pub(crate) fn opt_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    deserializer.deserialize_any(TextVisitor)
}

/// Optional number; numeric strings are parsed, blank strings are `None`.
pub(crate) fn opt_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    deserializer.deserialize_any(NumberVisitor)
}

/// Flag that may arrive as a boolean, 0/1 or a yes/no string. `null` is false.
pub(crate) fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    deserializer.deserialize_any(FlagVisitor)
}

/// Optional id; `null` and blank strings decode to `None`.
pub(crate) fn opt_id<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<EntityId>, D::Error> {
    deserializer.deserialize_any(OptIdVisitor)
}

/// List of id references with `null` and blank entries skipped.
pub(crate) fn id_list<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<EntityId>, D::Error> {
    let ids = Vec::<OptId>::deserialize(deserializer)?;
    Ok(ids.into_iter().filter_map(|id| id.0).collect())
}

struct OptId(Option<EntityId>);

impl<'de> Deserialize<'de> for OptId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        opt_id(deserializer).map(OptId)
    }
}

struct OptIdVisitor;

impl Visitor<'_> for OptIdVisitor {
    type Value = Option<EntityId>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string or numeric id, or null")
    }

    fn visit_str<E: Error>(self, v: &str) -> Result<Self::Value, E> {
        if v.trim().is_empty() {
            return Ok(None);
        }
        EntityId::new(v).map(Some).map_err(E::custom)
    }

    fn visit_u64<E: Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Some(EntityId::from(v)))
    }

    fn visit_i64<E: Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Some(EntityId::from(v)))
    }

    fn visit_f64<E: Error>(self, v: f64) -> Result<Self::Value, E> {
        EntityId::from_f64(v).map(Some).map_err(E::custom)
    }

    fn visit_unit<E: Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_none<E: Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }
}

struct TextVisitor;

impl Visitor<'_> for TextVisitor {
    type Value = Option<String>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string, number, boolean or null")
    }

    fn visit_str<E: Error>(self, v: &str) -> Result<Self::Value, E> {
        if v.is_empty() {
            Ok(None)
        } else {
            Ok(Some(v.to_string()))
        }
    }

    fn visit_u64<E: Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_i64<E: Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_f64<E: Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_bool<E: Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_unit<E: Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_none<E: Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }
}

struct NumberVisitor;

impl Visitor<'_> for NumberVisitor {
    type Value = Option<f64>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number, numeric string or null")
    }

    #[allow(clippy::cast_precision_loss)]
    fn visit_u64<E: Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Some(v as f64))
    }

    #[allow(clippy::cast_precision_loss)]
    fn visit_i64<E: Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Some(v as f64))
    }

    fn visit_f64<E: Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(Some(v))
    }

    fn visit_str<E: Error>(self, v: &str) -> Result<Self::Value, E> {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        trimmed.parse::<f64>().map(Some).map_err(|_| {
            E::custom(ModelError::InvalidNumber {
                value: v.to_string(),
            })
        })
    }

    fn visit_unit<E: Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_none<E: Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }
}

struct FlagVisitor;

impl Visitor<'_> for FlagVisitor {
    type Value = bool;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a boolean, 0/1, yes/no or null")
    }

    fn visit_bool<E: Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(v)
    }

    fn visit_u64<E: Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(v != 0)
    }

    fn visit_i64<E: Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(v != 0)
    }

    fn visit_str<E: Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(matches!(
            v.trim().to_ascii_lowercase().as_str(),
            "1" | "y" | "yes" | "true"
        ))
    }

    fn visit_unit<E: Error>(self) -> Result<Self::Value, E> {
        Ok(false)
    }

    fn visit_none<E: Error>(self) -> Result<Self::Value, E> {
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "opt_text")]
        text: Option<String>,
        #[serde(default, deserialize_with = "opt_f64")]
        number: Option<f64>,
        #[serde(default, deserialize_with = "flag")]
        flag: bool,
    }

    fn probe(json: &str) -> Probe {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn missing_and_null_fields_use_defaults() {
        let p = probe(r#"{"text": null, "number": null, "flag": null}"#);
        assert_eq!(p.text, None);
        assert_eq!(p.number, None);
        assert!(!p.flag);

        let p = probe("{}");
        assert_eq!(p.text, None);
        assert!(!p.flag);
    }

    #[test]
    fn mixed_types_are_normalized() {
        let p = probe(r#"{"text": 1234, "number": " 7.5 ", "flag": "Yes"}"#);
        assert_eq!(p.text.as_deref(), Some("1234"));
        assert_eq!(p.number, Some(7.5));
        assert!(p.flag);

        let p = probe(r#"{"text": "", "number": "", "flag": 0}"#);
        assert_eq!(p.text, None);
        assert_eq!(p.number, None);
        assert!(!p.flag);
    }

    #[test]
    fn blank_and_null_ids_are_skipped() {
        #[derive(Deserialize)]
        struct Refs {
            #[serde(default, deserialize_with = "opt_id")]
            id: Option<EntityId>,
            #[serde(deserialize_with = "id_list")]
            ids: Vec<EntityId>,
        }

        let refs: Refs =
            serde_json::from_str(r#"{"id": " ", "ids": [5, null, "", " 7 ", 8.0]}"#).unwrap();
        assert_eq!(refs.id, None);
        let ids: Vec<&str> = refs.ids.iter().map(EntityId::as_str).collect();
        assert_eq!(ids, ["5", "7", "8"]);

        let refs: Refs = serde_json::from_str(r#"{"ids": []}"#).unwrap();
        assert_eq!(refs.id, None);
        assert!(refs.ids.is_empty());
    }

    #[test]
    fn non_numeric_strings_are_rejected() {
        let result: Result<Probe, _> = serde_json::from_str(r#"{"number": "about 7"}"#);
        assert!(result.is_err());
    }
}
