//! Raw aggregate source port.
//!
//! Scoped decimal sums over emission line items. Every query answers zero
//! when no rows match; errors are reserved for the source being unreachable.

use std::collections::BTreeMap;

use async_trait::async_trait;
use futures::stream::{self, StreamExt, TryStreamExt};
use rust_decimal::Decimal;

use crate::domain::aggregation::{ComponentSums, SumScope};
use crate::domain::emission::{EmissionClass, OtherIndirectCategory, ProcessGroup};
use crate::domain::foundation::{OrganizationId, ReportingPeriod};

/// Read-only port for scoped emission sums.
#[async_trait]
pub trait EmissionSumReader: Send + Sync {
    /// Sum of every record of `class` in scope.
    async fn sum_by_class(
        &self,
        scope: &SumScope,
        period: &ReportingPeriod,
        class: EmissionClass,
    ) -> Result<Decimal, EmissionSourceError>;

    /// Sum of records of `class` filed under a process group.
    async fn sum_by_class_and_group_tag(
        &self,
        scope: &SumScope,
        period: &ReportingPeriod,
        class: EmissionClass,
        group: ProcessGroup,
    ) -> Result<Decimal, EmissionSourceError>;

    /// Sum of records of `class` with the given facility flag.
    async fn sum_by_class_and_facility_flag(
        &self,
        scope: &SumScope,
        period: &ReportingPeriod,
        class: EmissionClass,
        facility_tagged: bool,
    ) -> Result<Decimal, EmissionSourceError>;

    /// Sum of Other-Indirect records of one category number.
    async fn sum_by_other_indirect_category(
        &self,
        scope: &SumScope,
        period: &ReportingPeriod,
        category: OtherIndirectCategory,
    ) -> Result<Decimal, EmissionSourceError>;

    /// Collects the buckets the recomposition formulas need for one scope.
    ///
    /// Issues the ten scalar queries concurrently.
    async fn organization_components(
        &self,
        scope: &SumScope,
        period: &ReportingPeriod,
    ) -> Result<ComponentSums, EmissionSourceError> {
        use EmissionClass::{Direct, IndirectEnergy};

        let (
            direct_total,
            direct_mobile_combustion,
            direct_facility,
            direct_wastewater,
            indirect_energy_total,
            indirect_energy_facility,
        ) = futures::try_join!(
            self.sum_by_class(scope, period, Direct),
            self.sum_by_class_and_group_tag(scope, period, Direct, ProcessGroup::MobileCombustion),
            self.sum_by_class_and_facility_flag(scope, period, Direct, true),
            self.sum_by_class_and_group_tag(scope, period, Direct, ProcessGroup::WastewaterTreatment),
            self.sum_by_class(scope, period, IndirectEnergy),
            self.sum_by_class_and_facility_flag(scope, period, IndirectEnergy, true),
        )?;

        let (
            other_indirect_category1,
            other_indirect_category2,
            other_indirect_category4,
            other_indirect_category5,
        ) = futures::try_join!(
            self.sum_by_other_indirect_category(scope, period, OtherIndirectCategory::PURCHASED_GOODS),
            self.sum_by_other_indirect_category(scope, period, OtherIndirectCategory::CAPITAL_GOODS),
            self.sum_by_other_indirect_category(scope, period, OtherIndirectCategory::UPSTREAM_TRANSPORT),
            self.sum_by_other_indirect_category(scope, period, OtherIndirectCategory::WASTE),
        )?;

        Ok(ComponentSums {
            direct_total,
            direct_mobile_combustion,
            direct_facility,
            direct_wastewater,
            indirect_energy_total,
            indirect_energy_facility,
            other_indirect_category1,
            other_indirect_category2,
            other_indirect_category4,
            other_indirect_category5,
        })
    }

    /// Own buckets of each partner, keyed by partner.
    ///
    /// The default fans out one [`organization_components`] call per
    /// partner, at most `max_concurrency` partners at a time (each partner
    /// runs its own sums concurrently). Adapters able to group
    /// by organization in one round-trip should override this. Partners
    /// without records must still appear, with zero buckets.
    ///
    /// [`organization_components`]: EmissionSumReader::organization_components
    async fn grouped_partner_components(
        &self,
        partners: &[OrganizationId],
        period: &ReportingPeriod,
        max_concurrency: usize,
    ) -> Result<BTreeMap<OrganizationId, ComponentSums>, EmissionSourceError> {
        stream::iter(partners.iter().copied())
            .map(|partner| async move {
                let scope = SumScope::PartnerOwn(partner);
                self.organization_components(&scope, period)
                    .await
                    .map(|components| (partner, components))
            })
            .buffer_unordered(max_concurrency.max(1))
            .try_collect()
            .await
    }
}

/// Errors raised by the raw aggregate source.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EmissionSourceError {
    #[error("Emission source unavailable: {0}")]
    Unavailable(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for EmissionSourceError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                EmissionSourceError::Unavailable(err.to_string())
            }
            other => EmissionSourceError::Database(other.to_string()),
        }
    }
}
