//! Static produce catalog.
//!
//! Records are `{ "type": ..., "name": ... }` objects. The declared
//! categories are fixed: `Fruit` and `Vegetable`. A record with any other
//! type keeps it, and the sorter routes it to its fallback category.

use serde::Deserialize;
use sorter_core::{CategoryId, Record, Roster};

use crate::error::Result;

/// Fruit category name.
pub const FRUIT: &str = "Fruit";

/// Vegetable category name.
pub const VEGETABLE: &str = "Vegetable";

/// Bundled catalog data.
const BUNDLED: &str = include_str!("../data/produce.json");

/// A raw produce record.
#[derive(Debug, Clone, Deserialize)]
pub struct ProduceRecord {
    /// Produce type, normally `Fruit` or `Vegetable`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Display name.
    pub name: String,
}

/// Roster built from the bundled catalog.
///
/// # Errors
///
/// Returns an error if the bundled data is not valid JSON.
pub fn roster() -> Result<Roster> {
    roster_from_json(BUNDLED)
}

/// Roster built from caller-provided catalog JSON.
///
/// # Errors
///
/// Returns an error if `json` is not an array of produce records.
pub fn roster_from_json(json: &str) -> Result<Roster> {
    let records: Vec<ProduceRecord> = serde_json::from_str(json)?;
    Ok(roster_from_records(records))
}

/// Maps raw records to a roster, keeping their order.
///
/// Keys are `"{name}-{index}"`, so duplicate names stay distinct.
#[must_use]
pub fn roster_from_records(records: Vec<ProduceRecord>) -> Roster {
    let records = records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            Record::new(
                format!("{}-{index}", record.name),
                record.kind.as_str(),
                record.name,
            )
            .with_detail(record.kind)
        })
        .collect();

    Roster::new(
        vec![CategoryId::new(FRUIT), CategoryId::new(VEGETABLE)],
        records,
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_roster() {
        let roster = roster().unwrap();
        assert!(!roster.records.is_empty());
        assert!(roster
            .records
            .iter()
            .all(|record| roster.declares(&record.category)));
    }

    #[test]
    fn test_keys_are_name_and_index() {
        let roster = roster_from_json(
            r#"[{"type": "Fruit", "name": "Apple"}, {"type": "Fruit", "name": "Apple"}]"#,
        )
        .unwrap();
        let keys: Vec<_> = roster.records.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["Apple-0", "Apple-1"]);
        assert_eq!(roster.records[0].detail.as_deref(), Some("Fruit"));
    }

    #[test]
    fn test_unknown_type_is_kept() {
        let roster = roster_from_json(r#"[{"type": "Nut", "name": "Almond"}]"#).unwrap();
        assert_eq!(roster.records[0].category.as_str(), "Nut");
        assert!(!roster.declares(&roster.records[0].category));
    }

    #[test]
    fn test_malformed_json() {
        assert!(roster_from_json(r#"{"type": "Fruit"}"#).is_err());
    }
}
