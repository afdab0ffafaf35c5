// crates/bluvest-ledger/src/config.rs
//
// Runtime configuration for the vesting ledger.
// Loaded from a TOML file or populated with sensible defaults.

use serde::Deserialize;
use std::fs;

use bluvest_core::token::Amount;

/// Runtime configuration for the vesting ledger.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// Decimal places of the reward token.
    #[serde(default = "default_decimals")]
    pub decimals: u32,

    /// Reward-token supply, in whole tokens, at which vesting completes.
    #[serde(default = "default_cap_whole")]
    pub cap_whole: u64,
}

fn default_decimals() -> u32 {
    18
}

fn default_cap_whole() -> u64 {
    100_000_000
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            decimals: default_decimals(),
            cap_whole: default_cap_whole(),
        }
    }
}

impl LedgerConfig {
    /// Load configuration from a TOML file at the given path.
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// configured cap does not fit the base-unit range.
    pub fn load(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(path)?;
        let config: LedgerConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations whose base-unit cap cannot be represented
    /// in 128 bits.
    pub fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        let scale = (10 as Amount).checked_pow(self.decimals).ok_or_else(|| {
            format!(
                "decimals {} is too large: 10^decimals must fit in 128 bits",
                self.decimals
            )
        })?;
        (self.cap_whole as Amount).checked_mul(scale).ok_or_else(|| {
            format!(
                "cap of {} whole tokens with {} decimals overflows the base-unit range",
                self.cap_whole, self.decimals
            )
        })?;
        Ok(())
    }

    /// The supply cap in base units: `cap_whole * 10^decimals`.
    ///
    /// Saturates rather than panics on values `validate` would reject.
    pub fn cap_units(&self) -> Amount {
        let scale = (10 as Amount).checked_pow(self.decimals).unwrap_or(Amount::MAX);
        (self.cap_whole as Amount).saturating_mul(scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bluvest_core::token::VESTING_SUPPLY_CAP;

    #[test]
    fn test_defaults_match_canonical_cap() {
        let config = LedgerConfig::default();
        assert_eq!(config.decimals, 18);
        assert_eq!(config.cap_whole, 100_000_000);
        assert_eq!(config.cap_units(), VESTING_SUPPLY_CAP);
    }

    #[test]
    fn test_parse_toml_overrides() {
        let config: LedgerConfig = toml::from_str("decimals = 0\ncap_whole = 100000000\n").unwrap();
        assert_eq!(config.decimals, 0);
        assert_eq!(config.cap_units(), 100_000_000);
    }

    #[test]
    fn test_parse_empty_toml_uses_defaults() {
        let config: LedgerConfig = toml::from_str("").unwrap();
        assert_eq!(config.cap_units(), VESTING_SUPPLY_CAP);
    }

    #[test]
    fn test_validate_rejects_oversized_decimals() {
        let config = LedgerConfig {
            decimals: 39,
            cap_whole: 1,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_overflowing_cap() {
        let config = LedgerConfig {
            decimals: 38,
            cap_whole: u64::MAX,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cap_units_saturates_instead_of_panicking() {
        let config = LedgerConfig {
            decimals: 200,
            cap_whole: u64::MAX,
        };
        assert_eq!(config.cap_units(), Amount::MAX);
    }

    fn temp_config_path(label: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("bluvest_config_{}_{}.toml", label, std::process::id()))
    }

    #[test]
    fn test_load_from_toml_file() {
        let path = temp_config_path("load");
        fs::write(&path, "decimals = 6\ncap_whole = 1000\n").unwrap();
        let config = LedgerConfig::load(path.to_str().unwrap()).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(config.decimals, 6);
        assert_eq!(config.cap_whole, 1_000);
        assert_eq!(config.cap_units(), 1_000_000_000);
    }

    #[test]
    fn test_load_rejects_invalid_cap() {
        let path = temp_config_path("invalid");
        fs::write(&path, "decimals = 40\n").unwrap();
        let result = LedgerConfig::load(path.to_str().unwrap());
        fs::remove_file(&path).unwrap();

        assert!(result.is_err());
    }

    #[test]
    fn test_load_missing_file_is_an_error() {
        let path = temp_config_path("missing");
        assert!(LedgerConfig::load(path.to_str().unwrap()).is_err());
    }
}
