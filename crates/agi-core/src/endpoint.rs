//! Endpoint triples and live/trial selection.
//!
//! Every binding has three base URLs: production, its backup, and the trial
//! instance. Trial mode has no distinct backup, so both roles resolve to the
//! trial URL.

use serde::{Deserialize, Serialize};

pub const REST_LIVE_URL: &str = "https://sws.serviceobjects.com/AGI/api.svc/json";
pub const REST_BACKUP_URL: &str = "https://swsbackup.serviceobjects.com/AGI/api.svc/json";
pub const REST_TRIAL_URL: &str = "https://trial.serviceobjects.com/AGI/api.svc/json";

pub const SOAP_LIVE_URL: &str = "https://sws.serviceobjects.com/AGI/soap.svc/SOAP";
pub const SOAP_BACKUP_URL: &str = "https://swsbackup.serviceobjects.com/AGI/soap.svc/SOAP";
pub const SOAP_TRIAL_URL: &str = "https://trial.serviceobjects.com/AGI/soap.svc/SOAP";

/// Which service instance family a client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Production endpoint with failover to the backup instance.
    Live,
    /// Trial endpoint only.
    Trial,
}

impl Mode {
    #[must_use]
    pub fn is_live(self) -> bool {
        matches!(self, Mode::Live)
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Live => write!(f, "live"),
            Mode::Trial => write!(f, "trial"),
        }
    }
}

impl std::str::FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "live" | "production" => Ok(Mode::Live),
            "trial" => Ok(Mode::Trial),
            other => Err(format!("expected \"live\" or \"trial\", got \"{other}\"")),
        }
    }
}

/// The three base URLs for one binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
    pub live: String,
    pub backup: String,
    pub trial: String,
}

impl Endpoints {
    #[must_use]
    pub fn new(live: impl Into<String>, backup: impl Into<String>, trial: impl Into<String>) -> Self {
        Self {
            live: live.into(),
            backup: backup.into(),
            trial: trial.into(),
        }
    }

    /// Production REST endpoints.
    #[must_use]
    pub fn rest_defaults() -> Self {
        Self::new(REST_LIVE_URL, REST_BACKUP_URL, REST_TRIAL_URL)
    }

    /// Production SOAP endpoints.
    #[must_use]
    pub fn soap_defaults() -> Self {
        Self::new(SOAP_LIVE_URL, SOAP_BACKUP_URL, SOAP_TRIAL_URL)
    }

    #[must_use]
    pub fn primary(&self, mode: Mode) -> &str {
        match mode {
            Mode::Live => &self.live,
            Mode::Trial => &self.trial,
        }
    }

    #[must_use]
    pub fn backup(&self, mode: Mode) -> &str {
        match mode {
            Mode::Live => &self.backup,
            Mode::Trial => &self.trial,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoints() -> Endpoints {
        Endpoints::new("https://live", "https://backup", "https://trial")
    }

    #[test]
    fn live_mode_uses_live_then_backup() {
        let e = endpoints();
        assert_eq!(e.primary(Mode::Live), "https://live");
        assert_eq!(e.backup(Mode::Live), "https://backup");
    }

    #[test]
    fn trial_mode_never_selects_production_backup() {
        let e = endpoints();
        assert_eq!(e.primary(Mode::Trial), "https://trial");
        assert_eq!(e.backup(Mode::Trial), "https://trial");
    }

    #[test]
    fn mode_parses_case_insensitively() {
        assert_eq!("LIVE".parse::<Mode>().unwrap(), Mode::Live);
        assert_eq!(" trial ".parse::<Mode>().unwrap(), Mode::Trial);
        assert!("staging".parse::<Mode>().is_err());
    }

    #[test]
    fn mode_display_round_trips_through_from_str() {
        for mode in [Mode::Live, Mode::Trial] {
            assert_eq!(mode.to_string().parse::<Mode>().unwrap(), mode);
        }
    }
}
