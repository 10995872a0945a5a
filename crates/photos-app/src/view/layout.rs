//! List layout selection

use photos::config::layout::{SPAN_COUNT_GRID, SPAN_COUNT_LIST};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the photo list is laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutType {
    #[default]
    List,
    Grid,
}

impl LayoutType {
    /// Columns per row
    pub fn span_count(self) -> u32 {
        match self {
            LayoutType::List => SPAN_COUNT_LIST,
            LayoutType::Grid => SPAN_COUNT_GRID,
        }
    }

    /// The other layout
    pub fn toggled(self) -> Self {
        match self {
            LayoutType::List => LayoutType::Grid,
            LayoutType::Grid => LayoutType::List,
        }
    }
}

impl fmt::Display for LayoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutType::List => write!(f, "list"),
            LayoutType::Grid => write!(f, "grid"),
        }
    }
}
