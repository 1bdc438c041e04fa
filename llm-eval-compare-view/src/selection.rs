use llm_eval_compare_core::{EvaluationRunId, EvaluationRunInfo};
use serde::{Serialize, Serializer};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// The ordered runs chosen for side-by-side comparison.
///
/// Clones share one allocation. Two selections belong to the same session
/// only if they share it; equal contents parsed twice are two sessions.
#[derive(Debug, Clone)]
pub struct RunSelection(Arc<[EvaluationRunId]>);

impl Default for RunSelection {
    fn default() -> Self {
        Self(Arc::from(Vec::new()))
    }
}

impl RunSelection {
    /// Parse a comma-separated list of run ids, as found in a query string.
    pub fn parse(value: &str) -> Self {
        Self::from_ids(
            value
                .split(',')
                .map(str::trim)
                .filter(|segment| !segment.is_empty())
                .map(EvaluationRunId::from),
        )
    }

    /// Keeps the first position of a repeated id.
    pub fn from_ids<I>(ids: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<EvaluationRunId>,
    {
        let mut seen = HashSet::new();
        let ids: Vec<EvaluationRunId> = ids
            .into_iter()
            .map(Into::into)
            .filter(|id| seen.insert(id.clone()))
            .collect();
        Self(ids.into())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EvaluationRunId> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn same_session(&self, other: &RunSelection) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// The comma-separated form accepted by [`RunSelection::parse`].
    pub fn to_query_value(&self) -> String {
        self.0
            .iter()
            .map(EvaluationRunId::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl PartialEq for RunSelection {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for RunSelection {}

impl Serialize for RunSelection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter())
    }
}

impl<'a> IntoIterator for &'a RunSelection {
    type Item = &'a EvaluationRunId;
    type IntoIter = std::slice::Iter<'a, EvaluationRunId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// run id -> variant name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunVariantMap(HashMap<EvaluationRunId, String>);

impl RunVariantMap {
    pub fn from_runs(runs: &[EvaluationRunInfo]) -> Self {
        Self(
            runs.iter()
                .map(|run| (run.evaluation_run_id.clone(), run.variant_name.clone()))
                .collect(),
        )
    }

    pub fn variant_name(&self, run_id: &str) -> Option<&str> {
        self.0.get(run_id).map(String::as_str)
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
    use test_case::test_case;

    fn ids(selection: &RunSelection) -> Vec<&str> {
        selection.iter().map(EvaluationRunId::as_str).collect()
    }

    #[test_case("", &[]; "empty string")]
    #[test_case(",,", &[]; "only separators")]
    #[test_case("r1", &["r1"]; "single")]
    #[test_case("r2, r1", &["r2", "r1"]; "keeps order and trims")]
    #[test_case("r1,,r2,r1", &["r1", "r2"]; "skips empties and duplicates")]
    fn test_parse(raw: &str, expected: &[&str]) {
        assert_eq!(ids(&RunSelection::parse(raw)), expected);
    }

    #[test]
    fn test_session_identity() {
        let a = RunSelection::parse("r1,r2");
        let b = a.clone();
        let c = RunSelection::parse("r1,r2");

        assert!(a.same_session(&b));
        assert!(!a.same_session(&c));
        assert_eq!(a, c);
    }

    #[test]
    fn test_query_value_round_trip() {
        let selection = RunSelection::from_ids(["r2", "r1"]);
        assert_eq!(selection.to_query_value(), "r2,r1");
        assert_eq!(RunSelection::parse(&selection.to_query_value()), selection);
    }

    #[test]
    fn test_variant_map() {
        let map = RunVariantMap::from_runs(&[
            EvaluationRunInfo::new("r1", "gpt-4o"),
            EvaluationRunInfo::new("r2", "claude"),
        ]);
        assert_eq!(map.variant_name("r2"), Some("claude"));
        assert_eq!(map.variant_name("r3"), None);
        assert_eq!(map.len(), 2);
    }
}
