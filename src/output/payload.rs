// payload.rs - Distance pair map exchange format

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::DistanceMatrix;

/// Pairwise distances keyed "titleA|titleB"
///
/// This is the interchange shape for distance lookups: a flat JSON
/// object whose keys join two titles with a pipe in matrix index order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DistancePayload {
    entries: BTreeMap<String, f64>,
}

impl DistancePayload {
    pub fn from_matrix(matrix: &DistanceMatrix) -> Self {
        Self {
            entries: matrix.pair_entries().into_iter().collect(),
        }
    }

    pub fn from_file(path: &str) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read distance file '{}': {}", path, e))?;
        serde_json::from_str(&content)
            .map_err(|e| format!("Invalid distance file '{}': {}", path, e))
    }

    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(&self.entries)
            .map_err(|e| format!("Failed to serialize distances: {}", e))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distance for a pair, trying both key orders
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        self.entries
            .get(&format!("{}|{}", a, b))
            .or_else(|| self.entries.get(&format!("{}|{}", b, a)))
            .copied()
    }

    /// Like get, but absent pairs read as 0.0
    pub fn lookup(&self, a: &str, b: &str) -> f64 {
        self.get(a, b).unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_matrix_keys() {
        let mut m = DistanceMatrix::new(vec!["S1".to_string(), "S2".to_string()]);
        m.set(0, 1, 0.25);
        let payload = DistancePayload::from_matrix(&m);

        assert_eq!(payload.len(), 1);
        assert_eq!(payload.get("S1", "S2"), Some(0.25));
    }

    #[test]
    fn test_lookup_checks_both_orders() {
        let payload: DistancePayload = serde_json::from_str(r#"{"A|B": 0.3}"#).unwrap();

        assert_eq!(payload.lookup("A", "B"), 0.3);
        assert_eq!(payload.lookup("B", "A"), 0.3);
    }

    #[test]
    fn test_lookup_defaults_to_zero() {
        let payload: DistancePayload = serde_json::from_str(r#"{"A|B": 0.3}"#).unwrap();

        assert_eq!(payload.get("A", "C"), None);
        assert_eq!(payload.lookup("A", "C"), 0.0);
    }

    #[test]
    fn test_json_round_trip() {
        let mut m = DistanceMatrix::new(vec![
            "a".to_string(),
            "b".to_string(),
            "c".to_string(),
        ]);
        m.set(0, 1, 0.1);
        m.set(0, 2, 0.2);
        m.set(1, 2, 0.3);

        let json = DistancePayload::from_matrix(&m).to_json().unwrap();
        let back: DistancePayload = serde_json::from_str(&json).unwrap();
        assert_eq!(back.lookup("b", "c"), 0.3);
        assert_eq!(back.len(), 3);
    }
}
