use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{PatientStatus, WardError};

/// `all`, or one exact name (department, ward).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    pub fn only(value: impl Into<String>) -> Self {
        Selection::Only(value.into())
    }

    pub fn matches(&self, value: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(expected) => expected == value,
        }
    }
}

impl From<String> for Selection {
    fn from(value: String) -> Self {
        if value.trim().eq_ignore_ascii_case("all") {
            Selection::All
        } else {
            Selection::Only(value)
        }
    }
}

impl From<&str> for Selection {
    fn from(value: &str) -> Self {
        Selection::from(value.to_string())
    }
}

impl From<Selection> for String {
    fn from(value: Selection) -> Self {
        match value {
            Selection::All => "all".to_string(),
            Selection::Only(name) => name,
        }
    }
}

/// `all`, or one patient status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StatusFilter {
    #[default]
    All,
    Only(PatientStatus),
}

impl StatusFilter {
    pub fn matches(&self, status: Option<PatientStatus>) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(expected) => status == Some(*expected),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = WardError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.trim().eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        value.parse().map(StatusFilter::Only).map_err(|_| {
            let accepted = PatientStatus::ALL
                .iter()
                .map(PatientStatus::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            WardError::InvalidArgument(format!(
                "status filter `{value}` is not one of: all, {accepted}"
            ))
        })
    }
}

impl TryFrom<String> for StatusFilter {
    type Error = WardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<StatusFilter> for String {
    fn from(value: StatusFilter) -> Self {
        value.to_string()
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str("all"),
            StatusFilter::Only(status) => f.write_str(status.as_str()),
        }
    }
}

/// Criteria of the patient list page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PatientFilter {
    pub search_term: String,
    #[serde(rename = "statusFilter")]
    pub status: StatusFilter,
    #[serde(rename = "departmentFilter")]
    pub department: Selection,
}

impl PatientFilter {
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search_term: term.into(),
            ..Self::default()
        }
    }

    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    pub fn with_department(mut self, department: Selection) -> Self {
        self.department = department;
        self
    }
}
