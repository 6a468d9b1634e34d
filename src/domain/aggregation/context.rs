//! Per-request organization context.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{OrganizationId, ReportingPeriod, ValidationError};
use crate::domain::hierarchy::HierarchyPath;

use super::SumScope;

/// Where the requesting organization sits in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrgRole {
    /// Top of the tree; sees every partner.
    Headquarters,
    /// Interior or leaf node, scoped to its own subtree.
    Partner,
}

/// Immutable organization context for one aggregation call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrgContext {
    organization_id: OrganizationId,
    role: OrgRole,
    hierarchy_path: HierarchyPath,
    period: ReportingPeriod,
}

impl OrgContext {
    /// Context for a headquarters-wide aggregation.
    pub fn headquarters(organization_id: OrganizationId, period: ReportingPeriod) -> Self {
        Self {
            organization_id,
            role: OrgRole::Headquarters,
            hierarchy_path: HierarchyPath::headquarters(organization_id),
            period,
        }
    }

    /// Context for a partner reporting on its own subtree.
    ///
    /// The path must end at the partner and sit below a headquarters.
    pub fn partner(
        organization_id: OrganizationId,
        hierarchy_path: HierarchyPath,
        period: ReportingPeriod,
    ) -> Result<Self, ValidationError> {
        if hierarchy_path.depth() < 2 || hierarchy_path.leaf() != organization_id {
            return Err(ValidationError::invalid_format(
                "hierarchy_path",
                format!(
                    "'{}' is not a partner path ending at {}",
                    hierarchy_path, organization_id
                ),
            ));
        }
        Ok(Self {
            organization_id,
            role: OrgRole::Partner,
            hierarchy_path,
            period,
        })
    }

    /// Builds a context from possibly-missing parts.
    ///
    /// A missing organization is always rejected; a missing path is only
    /// accepted for the headquarters.
    pub fn build(
        is_headquarters: bool,
        organization_id: Option<OrganizationId>,
        hierarchy_path: Option<HierarchyPath>,
        period: ReportingPeriod,
    ) -> Result<Self, ValidationError> {
        let organization_id =
            organization_id.ok_or_else(|| ValidationError::empty_field("organization_id"))?;

        if is_headquarters {
            if let Some(path) = hierarchy_path {
                if path != HierarchyPath::headquarters(organization_id) {
                    return Err(ValidationError::invalid_format(
                        "hierarchy_path",
                        format!("headquarters path must be '/{}'", organization_id),
                    ));
                }
            }
            return Ok(Self::headquarters(organization_id, period));
        }

        let path = hierarchy_path.ok_or_else(|| ValidationError::empty_field("hierarchy_path"))?;
        Self::partner(organization_id, path, period)
    }

    pub fn organization_id(&self) -> OrganizationId {
        self.organization_id
    }

    pub fn role(&self) -> OrgRole {
        self.role
    }

    pub fn is_headquarters(&self) -> bool {
        self.role == OrgRole::Headquarters
    }

    pub fn hierarchy_path(&self) -> &HierarchyPath {
        &self.hierarchy_path
    }

    pub fn period(&self) -> ReportingPeriod {
        self.period
    }

    /// Same organization, different period.
    pub fn with_period(&self, period: ReportingPeriod) -> Self {
        Self {
            period,
            ..self.clone()
        }
    }

    /// Scope covering only the organization's own line items.
    pub fn own_scope(&self) -> SumScope {
        match self.role {
            OrgRole::Headquarters => SumScope::HeadquartersOwn(self.organization_id),
            OrgRole::Partner => SumScope::PartnerOwn(self.organization_id),
        }
    }

    /// Scope covering the organization and everything beneath it.
    pub fn subtree_scope(&self) -> SumScope {
        match self.role {
            OrgRole::Headquarters => SumScope::HeadquartersWide(self.organization_id),
            OrgRole::Partner => SumScope::PartnerSubtree(self.hierarchy_path.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(v: i64) -> OrganizationId {
        OrganizationId::new(v).unwrap()
    }

    fn period() -> ReportingPeriod {
        ReportingPeriod::year(2024).unwrap()
    }

    #[test]
    fn headquarters_gets_single_segment_path() {
        let ctx = OrgContext::headquarters(id(1), period());
        assert!(ctx.is_headquarters());
        assert_eq!(ctx.hierarchy_path().to_string(), "/1");
        assert_eq!(ctx.own_scope(), SumScope::HeadquartersOwn(id(1)));
        assert_eq!(ctx.subtree_scope(), SumScope::HeadquartersWide(id(1)));
    }

    #[test]
    fn partner_scopes_follow_path() {
        let path = HierarchyPath::parse("/1/4").unwrap();
        let ctx = OrgContext::partner(id(4), path.clone(), period()).unwrap();
        assert!(!ctx.is_headquarters());
        assert_eq!(ctx.own_scope(), SumScope::PartnerOwn(id(4)));
        assert_eq!(ctx.subtree_scope(), SumScope::PartnerSubtree(path));
    }

    #[test]
    fn build_rejects_missing_organization() {
        let result = OrgContext::build(true, None, None, period());
        assert!(matches!(result, Err(ValidationError::EmptyField { .. })));
    }

    #[test]
    fn build_rejects_partner_without_path() {
        let result = OrgContext::build(false, Some(id(4)), None, period());
        assert_eq!(result.unwrap_err().field(), "hierarchy_path");
    }

    #[test]
    fn partner_path_must_end_at_partner() {
        let path = HierarchyPath::parse("/1/5").unwrap();
        assert!(OrgContext::partner(id(4), path, period()).is_err());
        let hq_path = HierarchyPath::parse("/4").unwrap();
        assert!(OrgContext::partner(id(4), hq_path, period()).is_err());
    }

    #[test]
    fn headquarters_path_must_match() {
        let wrong = HierarchyPath::parse("/2").unwrap();
        assert!(OrgContext::build(true, Some(id(1)), Some(wrong), period()).is_err());
        let right = HierarchyPath::parse("/1").unwrap();
        assert!(OrgContext::build(true, Some(id(1)), Some(right), period()).is_ok());
    }
}
