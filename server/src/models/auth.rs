use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Society,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Society => "society",
        }
    }

    /// Where the client should land after a successful login.
    pub fn landing_route(&self) -> &'static str {
        match self {
            Role::Student => "/",
            Role::Society => "/manage-events",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Role::Student),
            "society" => Ok(Role::Society),
            other => Err(format!("Unknown role '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub role: Role,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub code: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginOutcome {
    pub role: Role,
    pub token: String,
    pub redirect_to: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub authenticated: bool,
    pub role: Option<Role>,
}
