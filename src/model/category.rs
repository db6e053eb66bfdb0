use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// The icon used when none is given.
pub const DEFAULT_ICON: &str = "tag";

/// A named grouping tag attached to transactions.
///
/// Identity is the title alone: two categories with the same title and different icons are equal.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct Category {
    title: String,
    icon: String,
}

impl Category {
    pub fn new(title: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            icon: icon.into(),
        }
    }

    /// Creates a category that uses `DEFAULT_ICON`.
    pub fn titled(title: impl Into<String>) -> Self {
        Self::new(title, DEFAULT_ICON)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn icon(&self) -> &str {
        &self.icon
    }
}

impl PartialEq for Category {
    fn eq(&self, other: &Self) -> bool {
        self.title == other.title
    }
}

impl Hash for Category {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.title.hash(state);
    }
}
