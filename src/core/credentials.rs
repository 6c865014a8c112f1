//! Test account credentials and the session they buy

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account details for one validator run.
///
/// The email embeds a fresh UUID so every run registers its own account
/// instead of colliding with earlier runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    pub name: String,
    pub company_name: String,
}

impl Credentials {
    /// Generate credentials unique to this run
    pub fn generate() -> Self {
        Self {
            email: format!("probe_{}@example.com", Uuid::new_v4()),
            password: "password123".to_string(),
            name: "Probe User".to_string(),
            company_name: "Probe Co".to_string(),
        }
    }
}

/// Bearer credential obtained from login, required by every later call
#[derive(Debug, Clone)]
pub struct Session {
    pub access_token: String,
}

impl Session {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
        }
    }
}
