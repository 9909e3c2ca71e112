use crate::model::requirement::{self, Requirement};
use serde::{Deserialize, Serialize};

/// A user-defined trick: a named bundle of requirements that can be switched
/// in or out of a calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trick {
    pub id: u32,
    pub name: String,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub requirements: Vec<Requirement>,
}

fn default_active() -> bool {
    true
}

impl Trick {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            active: true,
            requirements: Vec::new(),
        }
    }

    pub fn with_requirements(mut self, requirements: impl IntoIterator<Item = Requirement>) -> Self {
        self.requirements.extend(requirements);
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// Active and carrying at least one requirement.
    pub fn participates(&self) -> bool {
        self.active && !self.requirements.is_empty()
    }

    pub fn cards_per_set(&self) -> u32 {
        requirement::cards_per_set(&self.requirements)
    }
}
