//! Emission classes, process groups and Other-Indirect category numbers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// The three top-level emission classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmissionClass {
    /// Direct emissions from owned or controlled sources.
    Direct,
    /// Indirect emissions from purchased energy.
    IndirectEnergy,
    /// All other value-chain emissions, numbered by category.
    OtherIndirect,
}

impl EmissionClass {
    pub const ALL: [EmissionClass; 3] = [
        EmissionClass::Direct,
        EmissionClass::IndirectEnergy,
        EmissionClass::OtherIndirect,
    ];

    /// Storage code used by adapters.
    pub fn as_str(&self) -> &'static str {
        match self {
            EmissionClass::Direct => "direct",
            EmissionClass::IndirectEnergy => "indirect_energy",
            EmissionClass::OtherIndirect => "other_indirect",
        }
    }
}

impl fmt::Display for EmissionClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmissionClass {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "direct" => Ok(EmissionClass::Direct),
            "indirect_energy" => Ok(EmissionClass::IndirectEnergy),
            "other_indirect" => Ok(EmissionClass::OtherIndirect),
            other => Err(ValidationError::invalid_format(
                "emission_class",
                format!("unknown class '{}'", other),
            )),
        }
    }
}

/// Named process group a Direct-class record is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessGroup {
    FixedCombustion,
    MobileCombustion,
    ProcessEmissions,
    FugitiveEmissions,
    /// The wastewater/process bucket moved into Category 5.
    WastewaterTreatment,
}

impl ProcessGroup {
    /// Storage code used by adapters.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessGroup::FixedCombustion => "fixed_combustion",
            ProcessGroup::MobileCombustion => "mobile_combustion",
            ProcessGroup::ProcessEmissions => "process_emissions",
            ProcessGroup::FugitiveEmissions => "fugitive_emissions",
            ProcessGroup::WastewaterTreatment => "wastewater_treatment",
        }
    }
}

impl fmt::Display for ProcessGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProcessGroup {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fixed_combustion" => Ok(ProcessGroup::FixedCombustion),
            "mobile_combustion" => Ok(ProcessGroup::MobileCombustion),
            "process_emissions" => Ok(ProcessGroup::ProcessEmissions),
            "fugitive_emissions" => Ok(ProcessGroup::FugitiveEmissions),
            "wastewater_treatment" => Ok(ProcessGroup::WastewaterTreatment),
            other => Err(ValidationError::invalid_format(
                "process_group",
                format!("unknown process group '{}'", other),
            )),
        }
    }
}

/// Category number within the Other-Indirect class (1 to 15).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct OtherIndirectCategory(u8);

impl OtherIndirectCategory {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 15;

    pub const PURCHASED_GOODS: Self = Self(1);
    pub const CAPITAL_GOODS: Self = Self(2);
    pub const UPSTREAM_TRANSPORT: Self = Self(4);
    pub const WASTE: Self = Self(5);

    pub fn new(value: u8) -> Result<Self, ValidationError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ValidationError::out_of_range(
                "category",
                Self::MIN as i64,
                Self::MAX as i64,
                value as i64,
            ));
        }
        Ok(Self(value))
    }

    pub fn number(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for OtherIndirectCategory {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<OtherIndirectCategory> for u8 {
    fn from(category: OtherIndirectCategory) -> Self {
        category.0
    }
}

impl fmt::Display for OtherIndirectCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
