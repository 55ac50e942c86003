use serde::{Deserialize, Serialize};

/// An ordinal layer of the plan. Spaces refer to floors by `index`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Floor {
    #[serde(alias = "id")]
    pub index: usize,
    #[serde(alias = "name")]
    pub label: String,
}

impl Floor {
    pub fn new(index: usize, label: impl Into<String>) -> Self {
        Self {
            index,
            label: label.into(),
        }
    }

    /// Default label for a floor index ("Ground Floor", "Floor 1", ...).
    pub fn default_label(index: usize) -> String {
        if index == 0 {
            "Ground Floor".to_string()
        } else {
            format!("Floor {}", index)
        }
    }
}
