use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Generic institutional and corporate suffixes, including second-level
/// country variants such as `.com.mx` or `.co.uk`.
static INSTITUTIONAL_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\.(com|org|net|edu|gov|mil|int)$|\.(co|com|org|edu|gov)\.[a-z]{2}$")
        .expect("valid domain suffix regex")
});

/// Providers and institutions accepted by exact match or as a parent domain.
const KNOWN_DOMAINS: &[&str] = &[
    // Mail providers
    "gmail.com",
    "outlook.com",
    "hotmail.com",
    "yahoo.com",
    "icloud.com",
    "live.com",
    "msn.com",
    "aol.com",
    "protonmail.com",
    "zoho.com",
    // Education
    "edu",
    "ac.uk",
    "edu.mx",
    "edu.co",
    "edu.ar",
    "edu.pe",
    "edu.cl",
    "unam.mx",
    "itesm.mx",
    "udg.mx",
    "uabc.mx",
    "uanl.mx",
    // Government
    "gov",
    "gob.mx",
    "gov.co",
    "gov.ar",
    "gov.pe",
    "gov.cl",
];

const DISPOSABLE_DOMAINS: &[&str] = &[
    "10minutemail.com",
    "tempmail.org",
    "guerrillamail.com",
    "mailinator.com",
    "throwaway.email",
    "temp-mail.org",
];

/// Identity as typed into the intake form, before any checks.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RespondentForm {
    pub name: String,
    pub email: String,
}

impl RespondentForm {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Trim both fields and check them, producing an accepted [`Respondent`].
    pub fn validate(self) -> Result<Respondent, CoreError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(CoreError::EmptyName);
        }

        let email = self.email.trim();
        validate_email(email)?;

        Ok(Respondent {
            name: name.to_string(),
            email: email.to_string(),
        })
    }
}

/// An accepted respondent identity. Scoring never looks inside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct Respondent {
    name: String,
    email: String,
}

impl Respondent {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

/// Check an already-trimmed address: shape, then domain reputation.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if !EMAIL_SHAPE.is_match(email) {
        return Err(CoreError::MalformedEmail(email.to_string()));
    }

    let domain = email
        .split_once('@')
        .map(|(_, domain)| domain.to_ascii_lowercase())
        .ok_or_else(|| CoreError::MalformedEmail(email.to_string()))?;

    let known = KNOWN_DOMAINS
        .iter()
        .any(|known| domain == *known || domain.ends_with(&format!(".{known}")));
    if !known && !INSTITUTIONAL_SUFFIX.is_match(&domain) {
        return Err(CoreError::UnrecognisedDomain(domain));
    }

    if DISPOSABLE_DOMAINS.contains(&domain.as_str()) {
        return Err(CoreError::DisposableDomain(domain));
    }

    Ok(())
}
