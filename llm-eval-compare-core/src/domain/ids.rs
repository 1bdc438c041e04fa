use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Newtype pattern for DatapointId
///
/// Ordering is plain byte-wise string ordering, so `"a10" < "a2"`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct DatapointId(pub String);

impl DatapointId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for DatapointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for DatapointId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for DatapointId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<DatapointId> for String {
    fn from(id: DatapointId) -> Self {
        id.0
    }
}

impl Borrow<str> for DatapointId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Newtype pattern for EvaluationRunId
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct EvaluationRunId(pub String);

impl EvaluationRunId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for EvaluationRunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for EvaluationRunId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for EvaluationRunId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<EvaluationRunId> for String {
    fn from(id: EvaluationRunId) -> Self {
        id.0
    }
}

impl Borrow<str> for EvaluationRunId {
    fn borrow(&self) -> &str {
        &self.0
    }
}
