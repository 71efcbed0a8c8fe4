//! Driver and constructor references embedded in several tables

use serde::Deserialize;

use super::{SchemaError, leading_int};

/// Driver as it appears inside standings and result entries.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireDriver {
    pub driver_id: String,
    #[serde(default)]
    pub permanent_number: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    pub given_name: String,
    pub family_name: String,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub nationality: Option<String>,
}

impl WireDriver {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.given_name, self.family_name)
    }

    /// Permanent number, if upstream has one and it is numeric.
    pub fn number(&self) -> Result<Option<u32>, SchemaError> {
        self.permanent_number
            .as_deref()
            .map(|raw| leading_int("Driver.permanentNumber", raw))
            .transpose()
    }
}

/// Constructor as it appears inside standings and result entries.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireConstructor {
    pub constructor_id: String,
    pub name: String,
    #[serde(default)]
    pub nationality: Option<String>,
}
