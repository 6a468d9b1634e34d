//! Aggregation domain: organization context, category recomposition,
//! roll-up and the assembled result.
//!
//! Everything here is pure. Fetching sums and resolving descendants happens
//! in the application layer through ports.

mod categories;
mod components;
mod context;
mod result;
mod rollup;
mod scope;
mod summary;

pub use categories::{
    recompose, Category1Detail, Category2Detail, Category4Detail, Category5Detail,
    CategoryBreakdown, CategoryDetail, SpecialCategory,
};
pub use components::ComponentSums;
pub use context::{OrgContext, OrgRole};
pub use result::AggregationResult;
pub use rollup::{children_totals, roll_up, CategoryRollUp, RollUpSummary, RolledUpBreakdown};
pub use scope::SumScope;
pub use summary::{ClassSummary, MonthlyClassSummary};
