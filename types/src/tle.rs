use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Unstructured three-line element record: a name line followed by the two
/// element lines, kept verbatim.
/// https://en.wikipedia.org/wiki/Two-line_element_set
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Display, Serialize, Deserialize)]
#[display(fmt = "{}\n{}\n{}", "name", "line1", "line2")]
pub struct ElementSet {
    pub name: String,
    pub line1: String,
    pub line2: String,
}

impl ElementSet {
    pub fn new<N, L1, L2>(name: N, line1: L1, line2: L2) -> Self
    where
        N: Into<String>,
        L1: Into<String>,
        L2: Into<String>,
    {
        Self {
            name: name.into(),
            line1: line1.into(),
            line2: line2.into(),
        }
    }

    /// Satellite catalog number, columns 3-7 of line 1
    pub fn catalog_number(&self) -> Option<&str> {
        self.line1.get(2..7).map(str::trim)
    }
}
