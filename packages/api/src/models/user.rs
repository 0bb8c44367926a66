//! # User model as reported by the identity service
//!
//! [`User`] mirrors the user object returned by Supabase Auth. Only the fields the
//! front end reads are kept; unknown keys are ignored on deserialisation.
//!
//! The role written at sign-up lives in `user_metadata.role`. It is kept as the raw
//! string because metadata is user-editable: [`UserMetadata::role`] only parses the
//! two known values, and routing treats any other value as an employer account.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Account classification that drives dashboard routing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    JobSeeker,
    Employer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::JobSeeker => "job_seeker",
            Role::Employer => "employer",
        }
    }

    /// Label used on the role picker.
    pub fn label(&self) -> &'static str {
        match self {
            Role::JobSeeker => "Job Seeker",
            Role::Employer => "Employer",
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
            "job_seeker" => Ok(Role::JobSeeker),
            "employer" => Ok(Role::Employer),
            other => Err(format!("Unknown role: {other}")),
        }
    }
}

/// Free-form metadata attached to the account at sign-up.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, rename = "role", skip_serializing_if = "Option::is_none")]
    pub raw_role: Option<String>,
}

impl UserMetadata {
    /// The role, if the metadata holds one of the known values.
    pub fn role(&self) -> Option<Role> {
        self.raw_role.as_deref().and_then(|r| r.parse().ok())
    }
}

/// An authenticated user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

impl User {
    /// Email shown in the account menu; empty when the provider gave none.
    pub fn display_email(&self) -> &str {
        self.email.as_deref().unwrap_or("")
    }
}
