use crate::app_config::{
    AgiConfig, DEFAULT_SOAP_NAMESPACE, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};
use crate::endpoint::{self, Endpoints, Mode};
use crate::ConfigError;

/// Load client configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_agi_config() -> Result<AgiConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_agi_config_from_env()
}

/// Load client configuration from environment variables already in the process.
///
/// Unlike [`load_agi_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_agi_config_from_env() -> Result<AgiConfig, ConfigError> {
    build_agi_config(|key| std::env::var(key))
}

/// Build client configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_agi_config<F>(lookup: F) -> Result<AgiConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: u64| -> Result<u64, ConfigError> {
        let Ok(raw) = lookup(var) else {
            return Ok(default);
        };
        raw.trim().parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    // An absent key is left for the service to reject with its own error.
    let license_key = lookup("AGI_LICENSE_KEY")
        .map(|v| v.trim().to_string())
        .unwrap_or_default();
    let mode = parse_mode(&or_default("AGI_MODE", "trial"))?;
    let timeout_secs = parse_u64("AGI_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
    if timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "AGI_TIMEOUT_SECS".to_string(),
            reason: "timeout must be at least 1 second".to_string(),
        });
    }
    let user_agent = or_default("AGI_USER_AGENT", DEFAULT_USER_AGENT);
    let log_level = or_default("AGI_LOG_LEVEL", "info");

    let rest_endpoints = Endpoints::new(
        or_default("AGI_REST_LIVE_URL", endpoint::REST_LIVE_URL),
        or_default("AGI_REST_BACKUP_URL", endpoint::REST_BACKUP_URL),
        or_default("AGI_REST_TRIAL_URL", endpoint::REST_TRIAL_URL),
    );
    let soap_endpoints = Endpoints::new(
        or_default("AGI_SOAP_LIVE_URL", endpoint::SOAP_LIVE_URL),
        or_default("AGI_SOAP_BACKUP_URL", endpoint::SOAP_BACKUP_URL),
        or_default("AGI_SOAP_TRIAL_URL", endpoint::SOAP_TRIAL_URL),
    );
    let soap_namespace = or_default("AGI_SOAP_NAMESPACE", DEFAULT_SOAP_NAMESPACE);

    Ok(AgiConfig {
        license_key,
        mode,
        timeout_secs,
        user_agent,
        log_level,
        rest_endpoints,
        soap_endpoints,
        soap_namespace,
    })
}

/// Parse `AGI_MODE` into a [`Mode`].
///
/// Unrecognized values are rejected rather than silently falling back, so a
/// typo never sends trial traffic to production or the other way round.
fn parse_mode(s: &str) -> Result<Mode, ConfigError> {
    s.parse::<Mode>().map_err(|reason| ConfigError::InvalidEnvVar {
        var: "AGI_MODE".to_string(),
        reason,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
