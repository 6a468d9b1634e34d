//! Roll-up of descendant category totals into the requester's view.
//!
//! The headquarters reports its own recomposed total plus every descendant's.
//! A partner reports the descendants' totals only: its own line items are
//! counted when its parent aggregates it, never in its self-view. Both cases
//! go through [`roll_up`] with `include_self` set accordingly.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CategoryBreakdown, CategoryDetail, SpecialCategory};

/// How one category's reported total was assembled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRollUp {
    pub own_total: Decimal,
    pub children_total: Decimal,
    pub includes_own: bool,
    pub final_total: Decimal,
}

/// Roll-up audit trail for all four categories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollUpSummary {
    pub category1: CategoryRollUp,
    pub category2: CategoryRollUp,
    pub category4: CategoryRollUp,
    pub category5: CategoryRollUp,
    pub descendant_count: usize,
}

/// Breakdown whose totals already include descendants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RolledUpBreakdown {
    pub breakdown: CategoryBreakdown,
    pub summary: RollUpSummary,
}

/// Sums each category's reported total across every descendant.
pub fn children_totals(children: &[CategoryBreakdown]) -> [Decimal; 4] {
    SpecialCategory::ALL.map(|category| children.iter().map(|c| c.total(category)).sum())
}

/// Folds descendant breakdowns into the requester's own.
///
/// `children` holds one breakdown per descendant, each computed from that
/// descendant's own records only; the descendant set is already the full
/// transitive closure, so no recursion happens here.
pub fn roll_up(
    own: &CategoryBreakdown,
    children: &[CategoryBreakdown],
    include_self: bool,
) -> RolledUpBreakdown {
    let [c1, c2, c4, c5] = children_totals(children);

    let (category1, r1) = roll_category(own.category1, c1, include_self);
    let (category2, r2) = roll_category(own.category2, c2, include_self);
    let (category4, r4) = roll_category(own.category4, c4, include_self);
    let (category5, r5) = roll_category(own.category5, c5, include_self);

    RolledUpBreakdown {
        breakdown: CategoryBreakdown {
            category1,
            category2,
            category4,
            category5,
        },
        summary: RollUpSummary {
            category1: r1,
            category2: r2,
            category4: r4,
            category5: r5,
            descendant_count: children.len(),
        },
    }
}

fn roll_category<D: CategoryDetail>(
    own: D,
    children_total: Decimal,
    include_self: bool,
) -> (D, CategoryRollUp) {
    let own_total = own.final_total();
    let final_total = if include_self {
        own_total + children_total
    } else {
        children_total
    };

    let rollup = CategoryRollUp {
        own_total,
        children_total,
        includes_own: include_self,
        final_total,
    };
    (own.with_final_total(final_total), rollup)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregation::{recompose, ComponentSums};

    fn d(v: i64) -> Decimal {
        Decimal::from(v)
    }

    fn breakdown_with_category2(total: i64) -> CategoryBreakdown {
        recompose(&ComponentSums {
            other_indirect_category2: d(total),
            ..ComponentSums::zero()
        })
    }

    #[test]
    fn headquarters_includes_own_contribution() {
        let own = breakdown_with_category2(5);
        let children = [breakdown_with_category2(30), breakdown_with_category2(70)];

        let rolled = roll_up(&own, &children, true);

        assert_eq!(rolled.breakdown.category2.final_total, d(105));
        assert_eq!(rolled.summary.category2.children_total, d(100));
        assert!(rolled.summary.category2.includes_own);
    }

    #[test]
    fn partner_self_view_excludes_own_contribution() {
        let own = breakdown_with_category2(5);
        let children = [breakdown_with_category2(30), breakdown_with_category2(70)];

        let rolled = roll_up(&own, &children, false);

        assert_eq!(rolled.breakdown.category2.final_total, d(100));
        assert_eq!(rolled.summary.category2.own_total, d(5));
        assert!(!rolled.summary.category2.includes_own);
    }

    #[test]
    fn leaf_partner_reports_zero() {
        let own = breakdown_with_category2(5);
        let rolled = roll_up(&own, &[], false);
        for category in SpecialCategory::ALL {
            assert_eq!(rolled.breakdown.total(category), Decimal::ZERO);
        }
        assert_eq!(rolled.summary.descendant_count, 0);
    }

    #[test]
    fn own_components_survive_roll_up() {
        let own = breakdown_with_category2(5);
        let rolled = roll_up(&own, &[breakdown_with_category2(1)], false);
        assert_eq!(rolled.breakdown.category2.other_indirect_category2, d(5));
    }

    #[test]
    fn children_totals_cover_every_category() {
        let child = recompose(&ComponentSums {
            direct_total: d(10),
            direct_mobile_combustion: d(2),
            direct_wastewater: d(3),
            ..ComponentSums::zero()
        });
        let totals = children_totals(&[child, child]);
        assert_eq!(totals, [d(10), d(0), d(4), d(6)]);
    }
}
