//! Category recomposition.
//!
//! The four special categories blend Direct and Indirect-Energy buckets with
//! the Other-Indirect category of the same number:
//!
//! - Category 1 = (Direct total - mobile - facility - wastewater)
//!   + (Indirect-Energy total - facility) + Other-Indirect cat. 1
//! - Category 2 = Direct facility + Indirect-Energy facility + Other-Indirect cat. 2
//! - Category 4 = Direct mobile combustion + Other-Indirect cat. 4
//! - Category 5 = Direct wastewater + Other-Indirect cat. 5
//!
//! Every formula keeps its inputs so callers can audit the breakdown.
//! Totals are plain arithmetic; nothing is clamped.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ComponentSums;

/// The four recomposed categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialCategory {
    Category1,
    Category2,
    Category4,
    Category5,
}

impl SpecialCategory {
    pub const ALL: [SpecialCategory; 4] = [
        SpecialCategory::Category1,
        SpecialCategory::Category2,
        SpecialCategory::Category4,
        SpecialCategory::Category5,
    ];

    pub fn number(&self) -> u8 {
        match self {
            SpecialCategory::Category1 => 1,
            SpecialCategory::Category2 => 2,
            SpecialCategory::Category4 => 4,
            SpecialCategory::Category5 => 5,
        }
    }
}

impl fmt::Display for SpecialCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "category {}", self.number())
    }
}

/// Shared access to a category's reported total.
pub trait CategoryDetail {
    fn final_total(&self) -> Decimal;

    /// Replaces the reported total, keeping the component breakdown.
    fn with_final_total(self, total: Decimal) -> Self;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category1Detail {
    pub direct_total: Decimal,
    pub direct_mobile_combustion: Decimal,
    pub direct_facility: Decimal,
    pub direct_wastewater: Decimal,
    pub direct_remainder: Decimal,
    pub indirect_energy_total: Decimal,
    pub indirect_energy_facility: Decimal,
    pub indirect_energy_remainder: Decimal,
    pub other_indirect_category1: Decimal,
    pub final_total: Decimal,
}

impl Category1Detail {
    pub fn from_components(c: &ComponentSums) -> Self {
        let direct_remainder = c.direct_total
            - c.direct_mobile_combustion
            - c.direct_facility
            - c.direct_wastewater;
        let indirect_energy_remainder = c.indirect_energy_total - c.indirect_energy_facility;

        Self {
            direct_total: c.direct_total,
            direct_mobile_combustion: c.direct_mobile_combustion,
            direct_facility: c.direct_facility,
            direct_wastewater: c.direct_wastewater,
            direct_remainder,
            indirect_energy_total: c.indirect_energy_total,
            indirect_energy_facility: c.indirect_energy_facility,
            indirect_energy_remainder,
            other_indirect_category1: c.other_indirect_category1,
            final_total: direct_remainder + indirect_energy_remainder + c.other_indirect_category1,
        }
    }
}

impl CategoryDetail for Category1Detail {
    fn final_total(&self) -> Decimal {
        self.final_total
    }

    fn with_final_total(self, total: Decimal) -> Self {
        Self { final_total: total, ..self }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category2Detail {
    pub direct_facility: Decimal,
    pub indirect_energy_facility: Decimal,
    pub other_indirect_category2: Decimal,
    pub final_total: Decimal,
}

impl Category2Detail {
    pub fn from_components(c: &ComponentSums) -> Self {
        Self {
            direct_facility: c.direct_facility,
            indirect_energy_facility: c.indirect_energy_facility,
            other_indirect_category2: c.other_indirect_category2,
            final_total: c.direct_facility + c.indirect_energy_facility + c.other_indirect_category2,
        }
    }
}

impl CategoryDetail for Category2Detail {
    fn final_total(&self) -> Decimal {
        self.final_total
    }

    fn with_final_total(self, total: Decimal) -> Self {
        Self { final_total: total, ..self }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category4Detail {
    pub direct_mobile_combustion: Decimal,
    pub other_indirect_category4: Decimal,
    pub final_total: Decimal,
}

impl Category4Detail {
    pub fn from_components(c: &ComponentSums) -> Self {
        Self {
            direct_mobile_combustion: c.direct_mobile_combustion,
            other_indirect_category4: c.other_indirect_category4,
            final_total: c.direct_mobile_combustion + c.other_indirect_category4,
        }
    }
}

impl CategoryDetail for Category4Detail {
    fn final_total(&self) -> Decimal {
        self.final_total
    }

    fn with_final_total(self, total: Decimal) -> Self {
        Self { final_total: total, ..self }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category5Detail {
    pub direct_wastewater: Decimal,
    pub other_indirect_category5: Decimal,
    pub final_total: Decimal,
}

impl Category5Detail {
    pub fn from_components(c: &ComponentSums) -> Self {
        Self {
            direct_wastewater: c.direct_wastewater,
            other_indirect_category5: c.other_indirect_category5,
            final_total: c.direct_wastewater + c.other_indirect_category5,
        }
    }
}

impl CategoryDetail for Category5Detail {
    fn final_total(&self) -> Decimal {
        self.final_total
    }

    fn with_final_total(self, total: Decimal) -> Self {
        Self { final_total: total, ..self }
    }
}

/// All four recomposed categories for one organization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    pub category1: Category1Detail,
    pub category2: Category2Detail,
    pub category4: Category4Detail,
    pub category5: Category5Detail,
}

impl CategoryBreakdown {
    /// Reported total for one category.
    pub fn total(&self, category: SpecialCategory) -> Decimal {
        match category {
            SpecialCategory::Category1 => self.category1.final_total(),
            SpecialCategory::Category2 => self.category2.final_total(),
            SpecialCategory::Category4 => self.category4.final_total(),
            SpecialCategory::Category5 => self.category5.final_total(),
        }
    }
}

/// Applies the four formulas to one organization's own buckets.
pub fn recompose(components: &ComponentSums) -> CategoryBreakdown {
    CategoryBreakdown {
        category1: Category1Detail::from_components(components),
        category2: Category2Detail::from_components(components),
        category4: Category4Detail::from_components(components),
        category5: Category5Detail::from_components(components),
    }
}
