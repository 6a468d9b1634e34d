//! PostgreSQL implementation of EmissionSumReader.
//!
//! Every sum is a single `COALESCE(SUM(amount), 0)` over `emission_records`,
//! so an empty selection reads as zero rather than NULL. Component and
//! per-partner sums are overridden with `FILTER` aggregates so a whole
//! request costs two round-trips regardless of tree size.

use std::collections::BTreeMap;

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};

use crate::domain::aggregation::{ComponentSums, SumScope};
use crate::domain::emission::{EmissionClass, OtherIndirectCategory, ProcessGroup};
use crate::domain::foundation::{OrganizationId, ReportingPeriod};
use crate::ports::{EmissionSourceError, EmissionSumReader};

/// Select list producing every [`ComponentSums`] bucket in one pass.
const COMPONENT_COLUMNS: &str = r#"
    COALESCE(SUM(amount) FILTER (WHERE emission_class = 'direct'), 0) AS direct_total,
    COALESCE(SUM(amount) FILTER (WHERE emission_class = 'direct' AND process_group = 'mobile_combustion'), 0) AS direct_mobile_combustion,
    COALESCE(SUM(amount) FILTER (WHERE emission_class = 'direct' AND facility_tagged), 0) AS direct_facility,
    COALESCE(SUM(amount) FILTER (WHERE emission_class = 'direct' AND process_group = 'wastewater_treatment'), 0) AS direct_wastewater,
    COALESCE(SUM(amount) FILTER (WHERE emission_class = 'indirect_energy'), 0) AS indirect_energy_total,
    COALESCE(SUM(amount) FILTER (WHERE emission_class = 'indirect_energy' AND facility_tagged), 0) AS indirect_energy_facility,
    COALESCE(SUM(amount) FILTER (WHERE emission_class = 'other_indirect' AND category = 1), 0) AS other_indirect_category1,
    COALESCE(SUM(amount) FILTER (WHERE emission_class = 'other_indirect' AND category = 2), 0) AS other_indirect_category2,
    COALESCE(SUM(amount) FILTER (WHERE emission_class = 'other_indirect' AND category = 4), 0) AS other_indirect_category4,
    COALESCE(SUM(amount) FILTER (WHERE emission_class = 'other_indirect' AND category = 5), 0) AS other_indirect_category5
"#;

/// PostgreSQL implementation of EmissionSumReader.
#[derive(Clone)]
pub struct PostgresEmissionSumReader {
    pool: PgPool,
}

impl PostgresEmissionSumReader {
    /// Creates a new PostgresEmissionSumReader.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Starts a scalar sum query with scope and period already applied.
    fn scalar_sum(scope: &SumScope, period: &ReportingPeriod) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new(
            "SELECT COALESCE(SUM(amount), 0) AS total FROM emission_records WHERE ",
        );
        push_scope(&mut qb, scope);
        push_period(&mut qb, period);
        qb
    }

    async fn fetch_total(&self, mut qb: QueryBuilder<'_, Postgres>) -> Result<Decimal, EmissionSourceError> {
        let row = qb.build().fetch_one(&self.pool).await?;
        Ok(row.try_get("total")?)
    }
}

/// Appends the record-selection predicate for `scope`.
fn push_scope(qb: &mut QueryBuilder<'_, Postgres>, scope: &SumScope) {
    match scope {
        SumScope::HeadquartersOwn(id) => {
            qb.push("headquarters_id = ")
                .push_bind(id.value())
                .push(" AND partner_id IS NULL");
        }
        SumScope::HeadquartersWide(id) => {
            qb.push("headquarters_id = ").push_bind(id.value());
        }
        SumScope::PartnerOwn(id) => {
            qb.push("partner_id = ").push_bind(id.value());
        }
        SumScope::PartnerSubtree(path) => {
            qb.push("partner_id IS NOT NULL AND (hierarchy_path = ")
                .push_bind(path.to_string())
                .push(" OR hierarchy_path LIKE ")
                .push_bind(path.descendant_like_pattern())
                .push(")");
        }
    }
}

fn push_period(qb: &mut QueryBuilder<'_, Postgres>, period: &ReportingPeriod) {
    qb.push(" AND reporting_year = ").push_bind(period.reporting_year());
    if let Some(month) = period.reporting_month() {
        qb.push(" AND reporting_month = ").push_bind(i16::from(month));
    }
}

/// One row per partner that has records in `period`, keyed by `partner_id`.
fn grouped_components_query(
    partners: &[OrganizationId],
    period: &ReportingPeriod,
) -> QueryBuilder<'static, Postgres> {
    let ids: Vec<i64> = partners.iter().map(|p| p.value()).collect();
    let mut qb = QueryBuilder::new("SELECT partner_id, ");
    qb.push(COMPONENT_COLUMNS)
        .push(" FROM emission_records WHERE partner_id = ANY(")
        .push_bind(ids)
        .push(")");
    push_period(&mut qb, period);
    qb.push(" GROUP BY partner_id");
    qb
}

/// Every requested partner, with zero buckets where no row came back.
/// Rows for partners not requested are dropped.
fn zero_filled(
    partners: &[OrganizationId],
    found: impl IntoIterator<Item = (OrganizationId, ComponentSums)>,
) -> BTreeMap<OrganizationId, ComponentSums> {
    let mut grouped: BTreeMap<OrganizationId, ComponentSums> = partners
        .iter()
        .map(|partner| (*partner, ComponentSums::zero()))
        .collect();
    for (partner, components) in found {
        if let Some(slot) = grouped.get_mut(&partner) {
            *slot = components;
        }
    }
    grouped
}

fn components_from_row(row: &sqlx::postgres::PgRow) -> Result<ComponentSums, sqlx::Error> {
    Ok(ComponentSums {
        direct_total: row.try_get("direct_total")?,
        direct_mobile_combustion: row.try_get("direct_mobile_combustion")?,
        direct_facility: row.try_get("direct_facility")?,
        direct_wastewater: row.try_get("direct_wastewater")?,
        indirect_energy_total: row.try_get("indirect_energy_total")?,
        indirect_energy_facility: row.try_get("indirect_energy_facility")?,
        other_indirect_category1: row.try_get("other_indirect_category1")?,
        other_indirect_category2: row.try_get("other_indirect_category2")?,
        other_indirect_category4: row.try_get("other_indirect_category4")?,
        other_indirect_category5: row.try_get("other_indirect_category5")?,
    })
}

#[async_trait]
impl EmissionSumReader for PostgresEmissionSumReader {
    async fn sum_by_class(
        &self,
        scope: &SumScope,
        period: &ReportingPeriod,
        class: EmissionClass,
    ) -> Result<Decimal, EmissionSourceError> {
        let mut qb = Self::scalar_sum(scope, period);
        qb.push(" AND emission_class = ").push_bind(class.as_str());
        self.fetch_total(qb).await
    }

    async fn sum_by_class_and_group_tag(
        &self,
        scope: &SumScope,
        period: &ReportingPeriod,
        class: EmissionClass,
        group: ProcessGroup,
    ) -> Result<Decimal, EmissionSourceError> {
        let mut qb = Self::scalar_sum(scope, period);
        qb.push(" AND emission_class = ")
            .push_bind(class.as_str())
            .push(" AND process_group = ")
            .push_bind(group.as_str());
        self.fetch_total(qb).await
    }

    async fn sum_by_class_and_facility_flag(
        &self,
        scope: &SumScope,
        period: &ReportingPeriod,
        class: EmissionClass,
        facility_tagged: bool,
    ) -> Result<Decimal, EmissionSourceError> {
        let mut qb = Self::scalar_sum(scope, period);
        qb.push(" AND emission_class = ")
            .push_bind(class.as_str())
            .push(" AND facility_tagged = ")
            .push_bind(facility_tagged);
        self.fetch_total(qb).await
    }

    async fn sum_by_other_indirect_category(
        &self,
        scope: &SumScope,
        period: &ReportingPeriod,
        category: OtherIndirectCategory,
    ) -> Result<Decimal, EmissionSourceError> {
        let mut qb = Self::scalar_sum(scope, period);
        qb.push(" AND emission_class = ")
            .push_bind(EmissionClass::OtherIndirect.as_str())
            .push(" AND category = ")
            .push_bind(i16::from(category.number()));
        self.fetch_total(qb).await
    }

    async fn organization_components(
        &self,
        scope: &SumScope,
        period: &ReportingPeriod,
    ) -> Result<ComponentSums, EmissionSourceError> {
        let mut qb = QueryBuilder::new("SELECT ");
        qb.push(COMPONENT_COLUMNS)
            .push(" FROM emission_records WHERE ");
        push_scope(&mut qb, scope);
        push_period(&mut qb, period);

        let row = qb.build().fetch_one(&self.pool).await?;
        Ok(components_from_row(&row)?)
    }

    async fn grouped_partner_components(
        &self,
        partners: &[OrganizationId],
        period: &ReportingPeriod,
        _max_concurrency: usize,
    ) -> Result<BTreeMap<OrganizationId, ComponentSums>, EmissionSourceError> {
        if partners.is_empty() {
            return Ok(BTreeMap::new());
        }

        let rows = grouped_components_query(partners, period)
            .build()
            .fetch_all(&self.pool)
            .await?;

        let mut found = Vec::with_capacity(rows.len());
        for row in rows {
            let raw: i64 = row.try_get("partner_id")?;
            let partner = OrganizationId::new(raw)
                .map_err(|e| EmissionSourceError::Database(e.to_string()))?;
            found.push((partner, components_from_row(&row)?));
        }

        Ok(zero_filled(partners, found))
    }
}
