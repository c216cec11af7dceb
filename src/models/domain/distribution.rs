use serde::{Deserialize, Serialize};
use validator::Validate;

/// Upper bound for any single count on the form.
pub const MAX_COUNT_PER_FIELD: u32 = 100;

/// Requested number of questions per question type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize, Validate)]
pub struct TypeCounts {
    #[validate(range(max = 100))]
    #[serde(default)]
    pub multiple_choice: u32,
    #[validate(range(max = 100))]
    #[serde(default)]
    pub essay: u32,
    #[validate(range(max = 100))]
    #[serde(default)]
    pub short_answer: u32,
}

impl TypeCounts {
    pub fn total(&self) -> u32 {
        self.multiple_choice + self.essay + self.short_answer
    }
}

/// Requested number of questions per difficulty band.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize, Validate)]
pub struct DifficultyCounts {
    #[validate(range(max = 100))]
    #[serde(default)]
    pub low: u32,
    #[validate(range(max = 100))]
    #[serde(default)]
    pub medium: u32,
    #[validate(range(max = 100))]
    #[serde(default)]
    pub high: u32,
}

impl DifficultyCounts {
    pub fn total(&self) -> u32 {
        self.low + self.medium + self.high
    }

    /// Defaults offered for a fresh form: up to 3 low, up to 4 medium, rest high.
    pub fn suggested(total: u32) -> Self {
        let low = total.min(3);
        let medium = (total - low).min(4);
        DifficultyCounts {
            low,
            medium,
            high: total - low - medium,
        }
    }

    /// Clamps low, then medium, then high to whatever budget is left.
    pub fn clamped(&self, total: u32) -> Self {
        let low = self.low.min(total);
        let medium = self.medium.min(total - low);
        let high = self.high.min(total - low - medium);
        DifficultyCounts { low, medium, high }
    }
}
