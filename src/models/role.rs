//! Patron roles and section capabilities.
//!
//! Access decisions are a closed function over the role enum rather than
//! string comparisons scattered through routing code.

use serde::{Deserialize, Serialize};

/// Account roles known to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Librarian,
    Student,
    Researcher,
    #[serde(rename = "UNIVERSITY STAFF")]
    UniversityStaff,
    Public,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Librarian => "LIBRARIAN",
            Role::Student => "STUDENT",
            Role::Researcher => "RESEARCHER",
            Role::UniversityStaff => "UNIVERSITY STAFF",
            Role::Public => "PUBLIC",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ADMIN" => Ok(Role::Admin),
            "LIBRARIAN" => Ok(Role::Librarian),
            "STUDENT" => Ok(Role::Student),
            "RESEARCHER" => Ok(Role::Researcher),
            "UNIVERSITY STAFF" => Ok(Role::UniversityStaff),
            "PUBLIC" => Ok(Role::Public),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

/// Application sections gated by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Profile,
    Loans,
    Reservations,
    ManageResources,
    EmployeeManagement,
}

/// Capability check for a role against a section.
pub fn can_access(role: Role, section: Section) -> bool {
    match section {
        Section::Profile | Section::Loans | Section::Reservations => true,
        Section::ManageResources => matches!(role, Role::Librarian | Role::Admin),
        Section::EmployeeManagement => matches!(role, Role::Admin),
    }
}
