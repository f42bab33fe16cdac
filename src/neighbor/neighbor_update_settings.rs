use serde::{Deserialize, Serialize};

/// Settings for computing and updating a neighbor list
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct UpdateSettings {
    /// Rebuild on steps that are multiples of this
    pub every: usize,
}

impl UpdateSettings {
    pub fn new(every: usize) -> Self {
        assert!(every > 0, "Update cadence should be positive");
        Self { every }
    }
    pub fn should_update_neighbors(&self, step: usize) -> bool {
        step % self.every == 0
    }
}
impl Default for UpdateSettings {
    fn default() -> Self {
        Self { every: 1 }
    }
}
