//! Emission line item as filed by an organization.
//!
//! Records are owned by the persistence layer; the aggregation core only
//! reads them. The in-memory adapter stores them verbatim.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{OrganizationId, ReportingPeriod, ValidationError};
use crate::domain::hierarchy::HierarchyPath;

use super::{EmissionClass, OtherIndirectCategory, ProcessGroup};

/// Who filed a record: the headquarters itself, or one of its partners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordOwner {
    Headquarters(OrganizationId),
    Partner {
        headquarters: OrganizationId,
        partner: OrganizationId,
    },
}

impl RecordOwner {
    /// The headquarters the record belongs to.
    pub fn headquarters(&self) -> OrganizationId {
        match self {
            RecordOwner::Headquarters(id) => *id,
            RecordOwner::Partner { headquarters, .. } => *headquarters,
        }
    }

    /// The partner, for partner-filed records.
    pub fn partner(&self) -> Option<OrganizationId> {
        match self {
            RecordOwner::Headquarters(_) => None,
            RecordOwner::Partner { partner, .. } => Some(*partner),
        }
    }
}

/// One emission line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmissionRecord {
    pub owner: RecordOwner,
    pub hierarchy_path: HierarchyPath,
    pub class: EmissionClass,
    pub category: u8,
    pub facility_tagged: bool,
    pub process_group: Option<ProcessGroup>,
    pub year: i32,
    pub month: u8,
    pub amount: Decimal,
}

impl EmissionRecord {
    /// Checks the invariants the aggregation core relies on.
    pub fn validate(&self) -> Result<(), ValidationError> {
        ReportingPeriod::month(self.year, self.month)?;

        if self.category == 0 {
            return Err(ValidationError::out_of_range("category", 1, u8::MAX as i64, 0));
        }
        if self.class == EmissionClass::OtherIndirect {
            OtherIndirectCategory::new(self.category)?;
        }

        let expected_leaf = self
            .owner
            .partner()
            .unwrap_or_else(|| self.owner.headquarters());
        if self.hierarchy_path.leaf() != expected_leaf
            || self.hierarchy_path.root() != self.owner.headquarters()
        {
            return Err(ValidationError::invalid_format(
                "hierarchy_path",
                format!(
                    "path '{}' does not match the record owner",
                    self.hierarchy_path
                ),
            ));
        }
        Ok(())
    }

    /// Other-Indirect category, when the record belongs to that class.
    pub fn other_indirect_category(&self) -> Option<OtherIndirectCategory> {
        match self.class {
            EmissionClass::OtherIndirect => OtherIndirectCategory::new(self.category).ok(),
            _ => None,
        }
    }
}
