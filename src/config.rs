//! Runtime configuration.
//!
//! Every tunable of the simulated product: artificial latencies, the
//! expiring-soon window, navigation badge cap and audit ring size.
//! Values can be overridden from a JSON file passed to the CLI.

use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Artificial latencies (milliseconds) of the simulated network calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatedDelays {
    pub login_ms: u64,
    pub signup_ms: u64,
    pub biometric_ms: u64,
    pub upload_ms: u64,
    pub ai_sort_ms: u64,
    pub esign_ms: u64,
    pub vet_sign_ms: u64,
    /// Per-document latency of the classifier.
    pub document_processing_ms: u64,
}

impl Default for SimulatedDelays {
    fn default() -> Self {
        Self {
            login_ms: 800,
            signup_ms: 800,
            biometric_ms: 1500,
            upload_ms: 1500,
            ai_sort_ms: 2000,
            esign_ms: 2000,
            vet_sign_ms: 2000,
            document_processing_ms: 100,
        }
    }
}

impl SimulatedDelays {
    /// Every delay set to zero (tests, scripted CLI runs).
    pub fn instant() -> Self {
        Self {
            login_ms: 0,
            signup_ms: 0,
            biometric_ms: 0,
            upload_ms: 0,
            ai_sort_ms: 0,
            esign_ms: 0,
            vet_sign_ms: 0,
            document_processing_ms: 0,
        }
    }
}

/// Where a vet record's displayed status comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatusSource {
    /// Recompute from the expiration date against today's date.
    Derived,
    /// Use the status authored in the fixture data.
    Fixture,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PassportConfig {
    // --- Simulation ---
    pub delays: SimulatedDelays,

    // --- Records ---
    /// Days before expiration at which a record becomes expiring-soon.
    pub expiring_soon_window_days: i64,
    /// Advertised lifetime of a yellow checkmark (label only).
    pub yellow_checkmark_valid_days: u32,
    pub record_status_source: RecordStatusSource,

    // --- Navigation ---
    /// Badge counts above this render as "N+".
    pub nav_badge_cap: usize,

    // --- Session ---
    /// Fixture user that login and biometric login resolve to.
    pub default_user_id: String,

    // --- Audit ---
    /// Number of slots in the audit ring.
    pub audit_capacity: usize,
}

impl Default for PassportConfig {
    fn default() -> Self {
        Self {
            delays: SimulatedDelays::default(),
            expiring_soon_window_days: 30,
            yellow_checkmark_valid_days: 7,
            record_status_source: RecordStatusSource::Derived,
            nav_badge_cap: 9,
            default_user_id: "user-1".to_string(),
            audit_capacity: 64,
        }
    }
}

impl PassportConfig {
    /// Read a JSON config file, fill omitted fields from defaults and validate.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        let cfg = Self::from_json(&raw)?;
        info!("Config loaded from {}", path.display());
        Ok(cfg)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(raw).map_err(|e| Error::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Range-check every field. Invalid values are rejected, never clamped.
    pub fn validate(&self) -> Result<()> {
        if !(1..=365).contains(&self.expiring_soon_window_days) {
            return Err(Error::Config(
                "expiring_soon_window_days must be 1-365".into(),
            ));
        }
        if !(1..=90).contains(&self.yellow_checkmark_valid_days) {
            return Err(Error::Config(
                "yellow_checkmark_valid_days must be 1-90".into(),
            ));
        }
        if self.nav_badge_cap == 0 {
            return Err(Error::Config("nav_badge_cap must be at least 1".into()));
        }
        if !(1..=4096).contains(&self.audit_capacity) {
            return Err(Error::Config("audit_capacity must be 1-4096".into()));
        }
        if self.default_user_id.trim().is_empty() {
            return Err(Error::Config("default_user_id must not be empty".into()));
        }
        let d = &self.delays;
        let longest = [
            d.login_ms,
            d.signup_ms,
            d.biometric_ms,
            d.upload_ms,
            d.ai_sort_ms,
            d.esign_ms,
            d.vet_sign_ms,
            d.document_processing_ms,
        ]
        .into_iter()
        .max()
        .unwrap_or(0);
        if longest > 60_000 {
            return Err(Error::Config("simulated delays must be at most 60000 ms".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_sane() {
        let c = PassportConfig::default();
        assert!(c.validate().is_ok());
        assert_eq!(c.expiring_soon_window_days, 30);
        assert_eq!(c.yellow_checkmark_valid_days, 7);
        assert_eq!(c.delays.login_ms, 800);
        assert_eq!(c.delays.esign_ms, 2000);
    }

    #[test]
    fn serde_roundtrip() {
        let c = PassportConfig::default();
        let json = serde_json::to_string(&c).unwrap();
        let c2: PassportConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(c, c2);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let c = PassportConfig::from_json(r#"{"nav_badge_cap": 5, "delays": {"login_ms": 0}}"#)
            .unwrap();
        assert_eq!(c.nav_badge_cap, 5);
        assert_eq!(c.delays.login_ms, 0);
        assert_eq!(c.delays.signup_ms, 800);
        assert_eq!(c.record_status_source, RecordStatusSource::Derived);
    }

    #[test]
    fn rejects_zero_window() {
        let c = PassportConfig {
            expiring_soon_window_days: 0,
            ..Default::default()
        };
        assert!(matches!(c.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn rejects_zero_badge_cap() {
        let c = PassportConfig {
            nav_badge_cap: 0,
            ..Default::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn rejects_huge_delay() {
        let mut c = PassportConfig::default();
        c.delays.vet_sign_ms = 120_000;
        assert!(c.validate().is_err());
    }

    #[test]
    fn status_source_uses_lowercase_names() {
        let c = PassportConfig::from_json(r#"{"record_status_source": "fixture"}"#).unwrap();
        assert_eq!(c.record_status_source, RecordStatusSource::Fixture);
    }
}
