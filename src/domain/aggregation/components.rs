//! Raw emission buckets one organization contributes to the special categories.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Immutable snapshot of the scoped sums feeding the recomposition formulas.
///
/// Every field is read by value; a bucket used by two formulas (for
/// instance facility-tagged Direct, excluded from Category 1 and included in
/// Category 2) is never adjusted in place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentSums {
    pub direct_total: Decimal,
    pub direct_mobile_combustion: Decimal,
    pub direct_facility: Decimal,
    pub direct_wastewater: Decimal,
    pub indirect_energy_total: Decimal,
    pub indirect_energy_facility: Decimal,
    pub other_indirect_category1: Decimal,
    pub other_indirect_category2: Decimal,
    pub other_indirect_category4: Decimal,
    pub other_indirect_category5: Decimal,
}

impl ComponentSums {
    /// All buckets empty.
    pub fn zero() -> Self {
        Self::default()
    }
}
