//! Caller-facing aggregation result.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::ReportingPeriod;

use super::{
    Category1Detail, Category2Detail, Category4Detail, Category5Detail, ClassSummary,
    OrgContext, RollUpSummary, RolledUpBreakdown, SpecialCategory,
};

/// Everything one aggregation call produces.
///
/// Contains no timestamps or other call-specific values, so identical
/// inputs against unchanged data compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregationResult {
    pub period: ReportingPeriod,
    pub context: OrgContext,
    pub class_summary: ClassSummary,
    pub category1: Category1Detail,
    pub category2: Category2Detail,
    pub category4: Category4Detail,
    pub category5: Category5Detail,
    pub rollup: RollUpSummary,
    pub descendant_count: usize,
    /// Sum of the three class totals.
    pub grand_total: Decimal,
}

impl AggregationResult {
    /// Merges the class summary and the rolled-up categories.
    pub fn assemble(
        context: OrgContext,
        class_summary: ClassSummary,
        rolled: RolledUpBreakdown,
    ) -> Self {
        let RolledUpBreakdown { breakdown, summary } = rolled;
        Self {
            period: context.period(),
            context,
            grand_total: class_summary.total(),
            class_summary,
            category1: breakdown.category1,
            category2: breakdown.category2,
            category4: breakdown.category4,
            category5: breakdown.category5,
            descendant_count: summary.descendant_count,
            rollup: summary,
        }
    }

    /// Reported total for one special category.
    pub fn category_total(&self, category: SpecialCategory) -> Decimal {
        match category {
            SpecialCategory::Category1 => self.category1.final_total,
            SpecialCategory::Category2 => self.category2.final_total,
            SpecialCategory::Category4 => self.category4.final_total,
            SpecialCategory::Category5 => self.category5.final_total,
        }
    }

    /// True when every total in the result is zero.
    pub fn is_all_zero(&self) -> bool {
        self.grand_total.is_zero()
            && self.class_summary == ClassSummary::default()
            && SpecialCategory::ALL
                .iter()
                .all(|&c| self.category_total(c).is_zero())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregation::{recompose, roll_up, ComponentSums};
    use crate::domain::foundation::OrganizationId;

    fn context() -> OrgContext {
        OrgContext::headquarters(
            OrganizationId::new(1).unwrap(),
            ReportingPeriod::month(2024, 2).unwrap(),
        )
    }

    #[test]
    fn assemble_copies_period_and_grand_total() {
        let summary = ClassSummary {
            direct: Decimal::from(10),
            indirect_energy: Decimal::from(20),
            other_indirect: Decimal::from(30),
        };
        let own = recompose(&ComponentSums {
            other_indirect_category5: Decimal::from(4),
            ..ComponentSums::zero()
        });
        let result = AggregationResult::assemble(context(), summary, roll_up(&own, &[], true));

        assert_eq!(result.period, ReportingPeriod::month(2024, 2).unwrap());
        assert_eq!(result.grand_total, Decimal::from(60));
        assert_eq!(result.category_total(SpecialCategory::Category5), Decimal::from(4));
        assert!(!result.is_all_zero());
    }

    #[test]
    fn serializes_in_camel_case() {
        let own = recompose(&ComponentSums::zero());
        let result =
            AggregationResult::assemble(context(), ClassSummary::default(), roll_up(&own, &[], true));
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("classSummary"));
        assert!(json.contains("finalTotal"));
        assert!(json.contains("grandTotal"));
        assert!(result.is_all_zero());
    }

    #[test]
    fn json_round_trip_preserves_equality() {
        let own = recompose(&ComponentSums {
            direct_total: Decimal::new(12345, 2),
            ..ComponentSums::zero()
        });
        let result =
            AggregationResult::assemble(context(), ClassSummary::default(), roll_up(&own, &[], true));
        let json = serde_json::to_string(&result).unwrap();
        let back: AggregationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }
}
