//! Per-class totals, without recomposition or roll-up asymmetry.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSummary {
    pub direct: Decimal,
    pub indirect_energy: Decimal,
    pub other_indirect: Decimal,
}

impl ClassSummary {
    /// Sum over all three classes.
    pub fn total(&self) -> Decimal {
        self.direct + self.indirect_energy + self.other_indirect
    }
}

/// Class summary for one month of a reporting year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyClassSummary {
    pub month: u8,
    pub summary: ClassSummary,
}
