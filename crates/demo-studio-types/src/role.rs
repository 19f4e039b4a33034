//! Actor roles

use crate::ParseTagError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role of the actor invoking a gate operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Sales,
    SalesEngineer,
    Developer,
    Admin,
}

impl Role {
    /// Every role, in declaration order
    pub const ALL: [Role; 4] = [Role::Sales, Role::SalesEngineer, Role::Developer, Role::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Sales => "sales",
            Role::SalesEngineer => "sales_engineer",
            Role::Developer => "developer",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sales" => Ok(Role::Sales),
            "sales_engineer" => Ok(Role::SalesEngineer),
            "developer" => Ok(Role::Developer),
            "admin" => Ok(Role::Admin),
            other => Err(ParseTagError::new("role", other)),
        }
    }
}
