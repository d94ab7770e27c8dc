mod cache;
mod config;
mod create;
mod ls;
mod rm;
mod set;
mod show;
mod stats;
mod watch;

pub use cache::{cmd_cache_clear, cmd_cache_path, cmd_cache_status};
pub use config::{cmd_config_get, cmd_config_set, cmd_config_show};
pub use create::cmd_create;
pub use ls::cmd_ls;
pub use rm::cmd_rm;
pub use set::cmd_set;
pub use show::cmd_show;
pub use stats::cmd_stats;
pub use watch::cmd_watch;

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use jiff::civil::Date;

use crate::api::{ApiTransport, RestClient};
use crate::config::Config;
use crate::error::{MedideskError, Result};
use crate::query::FilterCriteria;

/// Build the HTTP transport from configuration, or explain how to
/// configure it
pub(crate) fn require_transport(config: &Config) -> Result<Arc<dyn ApiTransport>> {
    let base_url = config.api_url().ok_or_else(|| {
        MedideskError::Config(
            "API not configured; run `medidesk config set api.base_url <url>` \
             or set MEDIDESK_API_URL"
                .to_string(),
        )
    })?;
    let client = RestClient::new(&base_url, config.api_token(), config.api.timeout)?;
    Ok(Arc::new(client))
}

/// Ask for confirmation before a destructive action.
///
/// Declining is expected control flow, not an error. Without a terminal
/// the prompt cannot be answered, so `--yes` is required there.
pub(crate) fn confirm(prompt: &str, assume_yes: bool) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    if !atty::is(atty::Stream::Stdin) {
        return Err(MedideskError::InvalidInput(
            "confirmation required; re-run with --yes".to_string(),
        ));
    }
    eprint!("{} [y/N] ", prompt);
    io::stderr().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

/// Assemble filter criteria from the CLI's flag soup
pub fn build_criteria(
    search: Option<String>,
    status: Option<String>,
    fields: &[String],
    from: Option<String>,
    to: Option<String>,
    fuzzy: bool,
) -> Result<FilterCriteria> {
    let mut criteria = FilterCriteria {
        search,
        fuzzy,
        ..Default::default()
    };
    if let Some(status) = status {
        criteria.fields.push(("status".to_string(), status));
    }
    for spec in fields {
        let (name, value) = spec.split_once('=').ok_or_else(|| {
            MedideskError::InvalidInput(format!(
                "field filter '{}' must look like name=value",
                spec
            ))
        })?;
        criteria
            .fields
            .push((name.trim().to_string(), value.trim().to_string()));
    }
    criteria.from = from.map(|d| parse_date(&d)).transpose()?;
    criteria.to = to.map(|d| parse_date(&d)).transpose()?;
    Ok(criteria)
}

fn parse_date(s: &str) -> Result<Date> {
    s.parse::<Date>()
        .map_err(|_| MedideskError::InvalidInput(format!("invalid date '{}', expected YYYY-MM-DD", s)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_criteria_parses_field_specs() {
        let criteria = build_criteria(
            Some("smith".to_string()),
            Some("active".to_string()),
            &["role=Doctor".to_string()],
            Some("2026-01-01".to_string()),
            None,
            false,
        )
        .unwrap();
        assert_eq!(criteria.search.as_deref(), Some("smith"));
        assert_eq!(criteria.fields.len(), 2);
        assert!(criteria.from.is_some());
    }

    #[test]
    fn test_build_criteria_rejects_malformed_field() {
        assert!(build_criteria(None, None, &["rogue".to_string()], None, None, false).is_err());
    }

    #[test]
    fn test_build_criteria_rejects_bad_date() {
        assert!(
            build_criteria(None, None, &[], Some("January 1st".to_string()), None, false).is_err()
        );
    }
}
