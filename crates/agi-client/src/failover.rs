//! Two-endpoint failover shared by every operation and binding.
//!
//! [`run_with_failover`] calls the primary endpoint once and, depending on the
//! outcome, the backup endpoint once. It never makes a third call.
//!
//! **Primary outcome → action:**
//! - valid result → returned, backup untouched.
//! - fatal result (`TypeCode "3"`), trial mode → returned, backup untouched.
//! - fatal result, live mode → backup called; [`BackupPolicy`] picks the answer.
//! - transport failure (any mode) → backup called; its result is returned, or
//!   [`AgiError::BothEndpointsFailed`] if it fails too.
//! - local error (bad URL, envelope) → returned immediately.
//!
//! In trial mode the backup endpoint is the trial endpoint, so a transport
//! failure is retried against the same instance.

use std::fmt::Display;
use std::future::Future;

use agi_core::{Endpoints, Mode};

use crate::error::AgiError;
use crate::request::Operation;

/// What to return after failing over on a fatal primary result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupPolicy {
    /// Return whatever the backup produced, valid or not.
    Unconditional,
    /// Return the backup only if it is valid; otherwise keep the primary.
    RevertToPrimaryIfInvalid,
}

/// Primary/backup URLs resolved for one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FailoverTarget<'a> {
    pub primary: &'a str,
    pub backup: &'a str,
    pub mode: Mode,
}

impl<'a> FailoverTarget<'a> {
    #[must_use]
    pub fn select(endpoints: &'a Endpoints, mode: Mode) -> Self {
        Self {
            primary: endpoints.primary(mode),
            backup: endpoints.backup(mode),
            mode,
        }
    }
}

/// Why the backup is being called.
enum PrimaryOutcome<T> {
    Invalid(T),
    Failed(AgiError),
}

impl<T: Display> PrimaryOutcome<T> {
    fn describe(&self) -> String {
        match self {
            PrimaryOutcome::Invalid(result) => format!("fatal response ({result})"),
            PrimaryOutcome::Failed(err) => err.to_string(),
        }
    }
}

/// Runs `invoke` against the primary endpoint and, if needed, the backup.
///
/// `invoke` performs exactly one network attempt against the URL it is
/// given. `is_valid` decides whether a successful result is final.
///
/// Dropping the returned future cancels the in-flight attempt; no further
/// endpoint is tried.
///
/// # Errors
///
/// - [`AgiError::BothEndpointsFailed`] when the backup attempt fails after a
///   failed or fatal primary (except under
///   [`BackupPolicy::RevertToPrimaryIfInvalid`] with a fatal primary, which
///   returns the primary result instead).
/// - Any non-transport error from the primary attempt, unchanged.
pub async fn run_with_failover<'a, T, F, Fut, V>(
    operation: Operation,
    target: FailoverTarget<'a>,
    policy: BackupPolicy,
    is_valid: V,
    invoke: F,
) -> Result<T, AgiError>
where
    T: Display,
    F: Fn(&'a str) -> Fut,
    Fut: Future<Output = Result<T, AgiError>>,
    V: Fn(&T) -> bool,
{
    tracing::debug!(%operation, endpoint = target.primary, mode = %target.mode, "calling primary endpoint");

    let outcome = match invoke(target.primary).await {
        Ok(result) if is_valid(&result) => return Ok(result),
        Ok(result) if !target.mode.is_live() => {
            tracing::debug!(%operation, %result, "fatal response in trial mode; not failing over");
            return Ok(result);
        }
        Ok(result) => {
            tracing::warn!(
                %operation,
                endpoint = target.primary,
                backup = target.backup,
                %result,
                "primary returned fatal error, failing over to backup"
            );
            PrimaryOutcome::Invalid(result)
        }
        Err(err) if err.is_transport() => {
            tracing::warn!(
                %operation,
                endpoint = target.primary,
                backup = target.backup,
                error = %err,
                "primary call failed, failing over to backup"
            );
            PrimaryOutcome::Failed(err)
        }
        Err(err) => return Err(err),
    };

    let backup = invoke(target.backup).await;

    match (outcome, backup, policy) {
        (PrimaryOutcome::Invalid(primary), Ok(backup), BackupPolicy::RevertToPrimaryIfInvalid) => {
            if is_valid(&backup) {
                Ok(backup)
            } else {
                tracing::warn!(%operation, %backup, "backup also returned fatal error; keeping primary result");
                Ok(primary)
            }
        }
        (PrimaryOutcome::Invalid(primary), Err(err), BackupPolicy::RevertToPrimaryIfInvalid) => {
            tracing::warn!(%operation, error = %err, "backup call failed; keeping primary result");
            Ok(primary)
        }
        (_, Ok(backup), _) => Ok(backup),
        (outcome, Err(err), _) => {
            let primary = outcome.describe();
            tracing::error!(%operation, %primary, backup = %err, "primary and backup endpoints both failed");
            Err(AgiError::BothEndpointsFailed {
                operation,
                primary,
                backup: err.to_string(),
            })
        }
    }
}

#[cfg(test)]
#[path = "failover_test.rs"]
mod tests;
