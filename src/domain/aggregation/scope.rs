//! Which records a scoped sum covers.

use serde::{Deserialize, Serialize};

use crate::domain::emission::{EmissionRecord, RecordOwner};
use crate::domain::foundation::OrganizationId;
use crate::domain::hierarchy::HierarchyPath;

/// Record selection for a scoped sum query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SumScope {
    /// Records filed directly by the headquarters.
    HeadquartersOwn(OrganizationId),
    /// Everything filed under the headquarters, partners included.
    HeadquartersWide(OrganizationId),
    /// Records filed directly by one partner.
    PartnerOwn(OrganizationId),
    /// Records filed anywhere in a partner's subtree, the partner included.
    PartnerSubtree(HierarchyPath),
}

impl SumScope {
    /// Whether `record` falls inside this scope.
    pub fn matches(&self, record: &EmissionRecord) -> bool {
        match self {
            SumScope::HeadquartersOwn(id) => record.owner == RecordOwner::Headquarters(*id),
            SumScope::HeadquartersWide(id) => record.owner.headquarters() == *id,
            SumScope::PartnerOwn(id) => record.owner.partner() == Some(*id),
            SumScope::PartnerSubtree(path) => {
                record.owner.partner().is_some() && path.is_prefix_of(&record.hierarchy_path)
            }
        }
    }
}
