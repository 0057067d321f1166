use serde::{Deserialize, Serialize};

/// A controllable physical resource, as stored in the asset directory.
///
/// Assets are created and updated out-of-band; validation only reads them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Asset {
    /// Unique identifier, used as the directory lookup key.
    pub name: String,
    /// Upper bound on instructable power.
    pub max_power: u32,
    /// Descriptive tag (e.g. "battery", "chp"). Informational only.
    #[serde(default)]
    pub technology: String,
}

impl Asset {
    pub fn new(name: impl Into<String>, max_power: u32, technology: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            max_power,
            technology: technology.into(),
        }
    }
}

impl std::fmt::Display for Asset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (max {}", self.name, self.max_power)?;
        if !self.technology.is_empty() {
            write!(f, ", {}", self.technology)?;
        }
        write!(f, ")")
    }
}
