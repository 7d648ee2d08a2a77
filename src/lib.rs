//! Generate passwords, either fully random or seeded from a memorable hint, and score how strong
//! they are.

use serde::{Deserialize, Serialize};

mod history;
pub mod password_generation;
pub mod strength;

pub use history::{History, HistoryEntry, HistoryError, HISTORY_LIMIT};
pub use password_generation::{
    generate_password_from_hint, generate_random_password, CharacterClass, GenerationError,
    GenerationOptions, GenerationRequest, Mode,
};
pub use strength::{StrengthLabel, StrengthResult};

/// A generated password. `Debug` output never shows the contents.
#[derive(Clone, Eq, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Secret(String);

opaque_debug::implement!(Secret);

impl Secret {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Secret {
    fn from(s: String) -> Secret {
        Secret(s)
    }
}
