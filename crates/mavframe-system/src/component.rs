use serde::{Deserialize, Serialize};

/// A named component of a system, addressed by a non-zero id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    pub id: u8,
    pub name: String,
}

impl Component {
    pub fn new(id: u8, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// A component named after its id.
    pub fn default_for(id: u8) -> Self {
        Self::new(id, format!("Default Component {id}"))
    }
}
