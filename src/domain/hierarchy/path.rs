//! Hierarchy path value object.
//!
//! A path is the slash-delimited chain of organization identifiers from the
//! headquarters down to the organization itself, e.g. `/1/5/9`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{OrganizationId, ValidationError};

/// Ancestor chain of an organization, headquarters first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HierarchyPath(Vec<OrganizationId>);

impl HierarchyPath {
    /// Parses `/1/5/9`, `1/5/9` or `1/5/9/`.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        let inner = trimmed.strip_prefix('/').unwrap_or(trimmed);
        let inner = inner.strip_suffix('/').unwrap_or(inner);
        if inner.is_empty() {
            return Err(ValidationError::empty_field("hierarchy_path"));
        }

        let segments = inner
            .split('/')
            .map(|segment| {
                if segment.is_empty() {
                    return Err(ValidationError::invalid_format(
                        "hierarchy_path",
                        format!("empty segment in '{}'", trimmed),
                    ));
                }
                OrganizationId::parse_field("hierarchy_path", segment)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self(segments))
    }

    /// Path spanning everything filed under one headquarters.
    pub fn headquarters(id: OrganizationId) -> Self {
        Self(vec![id])
    }

    /// Chain collected by walking the tree; never empty.
    pub(super) fn from_chain(segments: Vec<OrganizationId>) -> Self {
        debug_assert!(!segments.is_empty());
        Self(segments)
    }

    pub fn segments(&self) -> &[OrganizationId] {
        &self.0
    }

    /// The organization the path ends at.
    pub fn leaf(&self) -> OrganizationId {
        self.0[self.0.len() - 1]
    }

    /// The headquarters the path starts from.
    pub fn root(&self) -> OrganizationId {
        self.0[0]
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Segment-wise prefix test; `/1/2` is a prefix of `/1/2/3` and of
    /// itself, never of `/1/23`.
    pub fn is_prefix_of(&self, other: &HierarchyPath) -> bool {
        other.0.len() >= self.0.len() && other.0[..self.0.len()] == self.0[..]
    }

    /// Every proper prefix of this path, nearest ancestor first.
    pub fn ancestors(&self) -> Vec<HierarchyPath> {
        (1..self.0.len())
            .rev()
            .map(|len| Self(self.0[..len].to_vec()))
            .collect()
    }

    /// Prefix pattern usable in a SQL `LIKE` clause for strict descendants.
    pub fn descendant_like_pattern(&self) -> String {
        format!("{}/%", self)
    }
}

impl fmt::Display for HierarchyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.0 {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}

impl FromStr for HierarchyPath {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for HierarchyPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for HierarchyPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(raw: &str) -> HierarchyPath {
        HierarchyPath::parse(raw).unwrap()
    }

    #[test]
    fn parses_with_and_without_slashes() {
        assert_eq!(path("/1/5/9"), path("1/5/9"));
        assert_eq!(path("1/5/9/"), path("/1/5/9"));
        assert_eq!(path("/1/5/9").to_string(), "/1/5/9");
    }

    #[test]
    fn rejects_malformed_paths() {
        assert!(HierarchyPath::parse("").is_err());
        assert!(HierarchyPath::parse("/").is_err());
        assert!(HierarchyPath::parse("/1//9").is_err());
        assert!(HierarchyPath::parse("/1/x/9").is_err());
        assert!(HierarchyPath::parse("/1/0").is_err());
    }

    #[test]
    fn prefix_is_segment_wise() {
        assert!(path("/1/2").is_prefix_of(&path("/1/2/3")));
        assert!(path("/1/2").is_prefix_of(&path("/1/2")));
        assert!(!path("/1/2").is_prefix_of(&path("/1/23")));
        assert!(!path("/1/2/3").is_prefix_of(&path("/1/2")));
    }

    #[test]
    fn ancestors_are_nearest_first() {
        let ancestors = path("/1/2/3").ancestors();
        assert_eq!(ancestors, vec![path("/1/2"), path("/1")]);
        assert!(path("/1").ancestors().is_empty());
    }

    #[test]
    fn leaf_and_root() {
        let p = path("/4/8/15");
        assert_eq!(p.root().value(), 4);
        assert_eq!(p.leaf().value(), 15);
        assert_eq!(p.depth(), 3);
    }

    #[test]
    fn like_pattern_matches_strict_descendants() {
        assert_eq!(path("/1/2").descendant_like_pattern(), "/1/2/%");
    }

    #[test]
    fn serializes_as_canonical_string() {
        let p = path("1/2/");
        assert_eq!(serde_json::to_string(&p).unwrap(), "\"/1/2\"");
        let back: HierarchyPath = serde_json::from_str("\"/1/2\"").unwrap();
        assert_eq!(back, p);
    }
}
