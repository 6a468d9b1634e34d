//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use rust_decimal::Decimal;

use emission_rollup::adapters::InMemoryEmissionStore;
use emission_rollup::domain::aggregation::OrgContext;
use emission_rollup::domain::emission::{EmissionClass, EmissionRecord, ProcessGroup, RecordOwner};
use emission_rollup::domain::foundation::{OrganizationId, ReportingPeriod};
use emission_rollup::domain::hierarchy::HierarchyPath;

pub const YEAR: i32 = 2024;

pub fn id(v: i64) -> OrganizationId {
    OrganizationId::new(v).unwrap()
}

pub fn path(raw: &str) -> HierarchyPath {
    HierarchyPath::parse(raw).unwrap()
}

pub fn dec(v: i64) -> Decimal {
    Decimal::from(v)
}

pub fn full_year() -> ReportingPeriod {
    ReportingPeriod::year(YEAR).unwrap()
}

pub fn hq_context(hq: i64) -> OrgContext {
    OrgContext::headquarters(id(hq), full_year())
}

pub fn partner_context(raw_path: &str) -> OrgContext {
    let p = path(raw_path);
    OrgContext::partner(p.leaf(), p, full_year()).unwrap()
}

/// Fluent builder for one line item; the owner is derived from the path.
pub struct Line {
    record: EmissionRecord,
}

impl Line {
    pub fn at(raw_path: &str, class: EmissionClass, amount: i64) -> Self {
        let p = path(raw_path);
        let owner = if p.depth() == 1 {
            RecordOwner::Headquarters(p.root())
        } else {
            RecordOwner::Partner {
                headquarters: p.root(),
                partner: p.leaf(),
            }
        };
        Self {
            record: EmissionRecord {
                owner,
                hierarchy_path: p,
                class,
                category: 1,
                facility_tagged: false,
                process_group: None,
                year: YEAR,
                month: 1,
                amount: dec(amount),
            },
        }
    }

    pub fn direct(raw_path: &str, amount: i64) -> Self {
        Self::at(raw_path, EmissionClass::Direct, amount)
    }

    pub fn indirect_energy(raw_path: &str, amount: i64) -> Self {
        Self::at(raw_path, EmissionClass::IndirectEnergy, amount)
    }

    pub fn other_indirect(raw_path: &str, category: u8, amount: i64) -> Self {
        Self::at(raw_path, EmissionClass::OtherIndirect, amount).category(category)
    }

    pub fn category(mut self, category: u8) -> Self {
        self.record.category = category;
        self
    }

    pub fn facility(mut self) -> Self {
        self.record.facility_tagged = true;
        self
    }

    pub fn group(mut self, group: ProcessGroup) -> Self {
        self.record.process_group = Some(group);
        self
    }

    pub fn month(mut self, month: u8) -> Self {
        self.record.month = month;
        self
    }

    pub fn build(self) -> EmissionRecord {
        self.record
    }
}

/// Store with every partner path registered before use.
pub async fn store_with_partners(paths: &[&str]) -> Arc<InMemoryEmissionStore> {
    let store = Arc::new(InMemoryEmissionStore::new());
    for raw in paths {
        let p = path(raw);
        store.register_partner(p.leaf(), &p).await.unwrap();
    }
    store
}

pub async fn insert_all(store: &InMemoryEmissionStore, lines: Vec<Line>) {
    for line in lines {
        store.insert_record(line.build()).await.unwrap();
    }
}
