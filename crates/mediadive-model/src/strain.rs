use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::EntityId;
use crate::de;

/// A microbial strain known to grow on a medium.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Strain {
    pub id: EntityId,
    #[serde(default, deserialize_with = "de::text")]
    pub species: String,
    #[serde(alias = "CCNO", default, deserialize_with = "de::opt_text")]
    pub ccno: Option<String>,
    #[serde(alias = "growth_conditions", default, deserialize_with = "de::opt_text")]
    pub growth: Option<String>,
    #[serde(alias = "bacdive", default, deserialize_with = "de::opt_id")]
    pub bacdive_id: Option<EntityId>,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub domain: Option<String>,
}

/// Strain or species name to the media it grows on, in source order.
///
/// `null` and blank entries in a media list are dropped while decoding.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MicrobeToMedia(IndexMap<String, Vec<EntityId>>);

impl<'de> Deserialize<'de> for MicrobeToMedia {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(transparent)]
        struct MediaIds(#[serde(deserialize_with = "de::id_list")] Vec<EntityId>);

        let entries = IndexMap::<String, MediaIds>::deserialize(deserializer)?;
        Ok(Self(
            entries
                .into_iter()
                .map(|(name, ids)| (name, ids.0))
                .collect(),
        ))
    }
}

impl MicrobeToMedia {
    pub fn new(entries: IndexMap<String, Vec<EntityId>>) -> Self {
        Self(entries)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Medium ids recorded for `name`, exactly as listed in the source.
    pub fn media_ids(&self, name: &str) -> &[EntityId] {
        self.0.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_source_order_and_raw_ids() {
        let map: MicrobeToMedia = serde_json::from_str(
            r#"{"Zymomonas mobilis": [5, "5", 7], "Bacillus subtilis": [1]}"#,
        )
        .unwrap();
        let names: Vec<&str> = map.names().collect();
        assert_eq!(names, vec!["Zymomonas mobilis", "Bacillus subtilis"]);
        let ids: Vec<&str> = map
            .media_ids("Zymomonas mobilis")
            .iter()
            .map(EntityId::as_str)
            .collect();
        assert_eq!(ids, vec!["5", "5", "7"]);
        assert!(map.media_ids("unknown").is_empty());
    }

    #[test]
    fn strain_accepts_numeric_bacdive_id() {
        let strain: Strain = serde_json::from_str(
            r#"{"id": 10, "species": "Escherichia coli", "CCNO": "DSM 30083", "bacdive_id": 4907, "domain": "B"}"#,
        )
        .unwrap();
        assert_eq!(strain.bacdive_id, Some(EntityId::from(4907u32)));
        assert_eq!(strain.ccno.as_deref(), Some("DSM 30083"));
        assert_eq!(strain.growth, None);
    }

    #[test]
    fn blank_references_do_not_fail_decoding() {
        let strain: Strain =
            serde_json::from_str(r#"{"id": 1, "species": "s", "bacdive_id": ""}"#).unwrap();
        assert_eq!(strain.bacdive_id, None);
        let strain: Strain =
            serde_json::from_str(r#"{"id": 1, "species": "s", "bacdive_id": null}"#).unwrap();
        assert_eq!(strain.bacdive_id, None);

        let map: MicrobeToMedia = serde_json::from_str(r#"{"X": [5, null, ""]}"#).unwrap();
        let ids: Vec<&str> = map.media_ids("X").iter().map(EntityId::as_str).collect();
        assert_eq!(ids, ["5"]);
    }
}
