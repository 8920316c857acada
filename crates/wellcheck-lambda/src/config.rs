use std::str::FromStr;

use wellcheck_instruments::instruments::self_compassion::TableRevision;

pub const TABLE_REVISION_VAR: &str = "WELLCHECK_SELF_COMPASSION_TABLE";
pub const LOG_FORMAT_VAR: &str = "WELLCHECK_LOG_FORMAT";
pub const REQUIRE_RESPONDENT_VAR: &str = "WELLCHECK_REQUIRE_RESPONDENT";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Structured JSON lines for CloudWatch.
    #[default]
    Json,
    Pretty,
}

impl FromStr for LogFormat {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            other => Err(eyre::eyre!(
                "{LOG_FORMAT_VAR}: unknown log format '{other}' (expected 'json' or 'pretty')"
            )),
        }
    }
}

/// Start-up configuration, read once from the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiConfig {
    pub table_revision: TableRevision,
    pub log_format: LogFormat,
    /// Reject evaluations that arrive without a validated respondent.
    pub require_respondent: bool,
}

impl ApiConfig {
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unset keys keep their defaults; set but
    /// unrecognised values are an error.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let mut config = ApiConfig::default();

        if let Some(raw) = lookup(TABLE_REVISION_VAR) {
            config.table_revision = raw
                .parse()
                .map_err(|e: String| eyre::eyre!("{TABLE_REVISION_VAR}: {e}"))?;
        }
        if let Some(raw) = lookup(LOG_FORMAT_VAR) {
            config.log_format = raw.parse()?;
        }
        if let Some(raw) = lookup(REQUIRE_RESPONDENT_VAR) {
            config.require_respondent = parse_flag(REQUIRE_RESPONDENT_VAR, &raw)?;
        }

        Ok(config)
    }
}

fn parse_flag(key: &str, raw: &str) -> eyre::Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(eyre::eyre!("{key}: expected a boolean, got '{other}'")),
    }
}
