use serde::{Deserialize, Serialize};
use std::fmt;

/// A selected estuary, e.g. `"ganga"`.
///
/// Always non-empty. The raw dropdown value is used as-is (apart from
/// trimming) since option values are controlled by the page.
#[derive(Debug, PartialEq, Eq, Clone, Hash, Serialize)]
pub struct RegionId(String);

impl RegionId {
    /// Parse a raw selection value. Returns `None` for an empty or
    /// whitespace-only value, which callers treat as "nothing selected".
    pub fn parse(raw: &str) -> Option<RegionId> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(RegionId(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One dropdown entry: the value sent to the endpoint and the label shown.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct RegionOption {
    pub value: String,
    pub label: String,
}

impl RegionOption {
    pub fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
        }
    }
}
