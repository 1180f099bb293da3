//! # Shop Configuration
//!
//! Runtime knobs for the shell and the pricing policy.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line flags (`--member-discount 15`)
//! 2. Environment variables (`FOODSHOP_*`)
//! 3. Defaults (this file)
//!
//! Configuration is read once at startup and never changes afterwards.

use std::num::NonZeroU32;

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use foodshop_core::money::DEFAULT_CURRENCY_UNIT;
use foodshop_core::{MenuItemCode, PairDiscountPolicy, PricingPolicy};

const ENV_CURRENCY_UNIT: &str = "FOODSHOP_CURRENCY_UNIT";
const ENV_MEMBER_DISCOUNT: &str = "FOODSHOP_MEMBER_DISCOUNT_PERCENT";
const ENV_PAIR_DISCOUNT: &str = "FOODSHOP_PAIR_DISCOUNT_PERCENT";
const ENV_PAIR_BUNDLE_SIZE: &str = "FOODSHOP_PAIR_BUNDLE_SIZE";
const ENV_PAIR_CODES: &str = "FOODSHOP_PAIR_ELIGIBLE_CODES";

// =============================================================================
// Command Line
// =============================================================================

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "foodshop")]
#[command(about = "Food shop ordering shell - menu, promotions and discounted quotes")]
pub struct Args {
    /// Log debug output to stderr
    #[arg(short, long)]
    pub verbose: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// Currency label shown after every amount
    #[arg(long)]
    pub currency_unit: Option<String>,

    /// Member discount in percent
    #[arg(long)]
    pub member_discount: Option<u32>,

    /// Pair discount in percent
    #[arg(long)]
    pub pair_discount: Option<u32>,

    /// Items of the same code that make one bundle
    #[arg(long)]
    pub pair_bundle_size: Option<u32>,

    /// Codes eligible for the pair discount, comma separated
    #[arg(long, value_delimiter = ',')]
    pub pair_codes: Option<Vec<String>>,

    /// Print the resolved configuration as JSON and exit
    #[arg(long)]
    pub print_config: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

// =============================================================================
// Config
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopConfig {
    pub currency_unit: String,
    pub member_discount_percent: u32,
    pub pair_discount_percent: u32,
    pub pair_bundle_size: u32,
    /// Stored normalized (trimmed, uppercase).
    pub pair_eligible_codes: Vec<String>,
}

impl Default for ShopConfig {
    /// THB, 10% member, 5% per pair of ORANGE / PINK / GREEN.
    fn default() -> Self {
        let policy = PricingPolicy::default();
        ShopConfig {
            currency_unit: DEFAULT_CURRENCY_UNIT.to_string(),
            member_discount_percent: policy.member_discount_percent,
            pair_discount_percent: policy.pair.discount_percent,
            pair_bundle_size: policy.pair.bundle_size.get(),
            pair_eligible_codes: policy
                .pair
                .eligible_codes
                .iter()
                .map(|c| c.to_string())
                .collect(),
        }
    }
}

impl ShopConfig {
    /// Defaults overridden by `FOODSHOP_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a pluggable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = ShopConfig::default();

        if let Some(unit) = lookup(ENV_CURRENCY_UNIT) {
            config.currency_unit = unit.trim().to_string();
        }
        if let Some(raw) = lookup(ENV_MEMBER_DISCOUNT) {
            config.member_discount_percent = parse_var(ENV_MEMBER_DISCOUNT, &raw)?;
        }
        if let Some(raw) = lookup(ENV_PAIR_DISCOUNT) {
            config.pair_discount_percent = parse_var(ENV_PAIR_DISCOUNT, &raw)?;
        }
        if let Some(raw) = lookup(ENV_PAIR_BUNDLE_SIZE) {
            config.pair_bundle_size = parse_var(ENV_PAIR_BUNDLE_SIZE, &raw)?;
        }
        if let Some(raw) = lookup(ENV_PAIR_CODES) {
            config.pair_eligible_codes = split_codes(raw.split(','));
        }

        config.validate()?;
        Ok(config)
    }

    /// Applies flags given on the command line on top of this config.
    pub fn apply_args(mut self, args: &Args) -> Result<Self, ConfigError> {
        if let Some(unit) = &args.currency_unit {
            self.currency_unit = unit.trim().to_string();
        }
        if let Some(pct) = args.member_discount {
            self.member_discount_percent = pct;
        }
        if let Some(pct) = args.pair_discount {
            self.pair_discount_percent = pct;
        }
        if let Some(size) = args.pair_bundle_size {
            self.pair_bundle_size = size;
        }
        if let Some(codes) = &args.pair_codes {
            self.pair_eligible_codes = split_codes(codes.iter().map(String::as_str));
        }

        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_percent("member_discount_percent", self.member_discount_percent)?;
        check_percent("pair_discount_percent", self.pair_discount_percent)?;
        self.bundle_size()?;
        Ok(())
    }

    /// The single policy record handed to the quoting engine.
    pub fn pricing_policy(&self) -> Result<PricingPolicy, ConfigError> {
        Ok(PricingPolicy {
            pair: PairDiscountPolicy {
                eligible_codes: self
                    .pair_eligible_codes
                    .iter()
                    .map(MenuItemCode::new_unchecked)
                    .collect(),
                discount_percent: self.pair_discount_percent,
                bundle_size: self.bundle_size()?,
            },
            member_discount_percent: self.member_discount_percent,
        })
    }

    fn bundle_size(&self) -> Result<NonZeroU32, ConfigError> {
        NonZeroU32::new(self.pair_bundle_size).ok_or_else(|| ConfigError::OutOfRange {
            field: "pair_bundle_size".to_string(),
            min: 1,
            max: i64::from(u32::MAX),
        })
    }
}

fn parse_var<T: std::str::FromStr>(var: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue(var.to_string()))
}

fn split_codes<'a>(raw: impl Iterator<Item = &'a str>) -> Vec<String> {
    raw.map(|c| c.trim().to_uppercase())
        .filter(|c| !c.is_empty())
        .collect()
}

fn check_percent(field: &str, pct: u32) -> Result<(), ConfigError> {
    if pct > 100 {
        return Err(ConfigError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: 100,
        });
    }
    Ok(())
}

/// Configuration error types.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_match_core_policy() {
        let config = ShopConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ShopConfig::default());
        assert_eq!(config.currency_unit, "THB");
        assert_eq!(config.pricing_policy().unwrap(), PricingPolicy::default());
    }

    #[test]
    fn test_env_overrides() {
        let config = ShopConfig::from_lookup(lookup(&[
            (ENV_CURRENCY_UNIT, "USD"),
            (ENV_MEMBER_DISCOUNT, " 15 "),
            (ENV_PAIR_BUNDLE_SIZE, "3"),
            (ENV_PAIR_CODES, "red, blue,,"),
        ]))
        .unwrap();

        assert_eq!(config.currency_unit, "USD");
        assert_eq!(config.member_discount_percent, 15);
        assert_eq!(config.pair_bundle_size, 3);
        assert_eq!(config.pair_eligible_codes, ["RED", "BLUE"]);

        let policy = config.pricing_policy().unwrap();
        assert_eq!(policy.pair.bundle_len(), 3);
        assert!(policy.pair.is_eligible(&MenuItemCode::new_unchecked("BLUE")));
        assert!(!policy.pair.is_eligible(&MenuItemCode::new_unchecked("GREEN")));
    }

    #[test]
    fn test_env_invalid_value() {
        let err = ShopConfig::from_lookup(lookup(&[(ENV_PAIR_DISCOUNT, "five")])).unwrap_err();
        assert_eq!(err, ConfigError::InvalidValue(ENV_PAIR_DISCOUNT.to_string()));
    }

    #[test]
    fn test_out_of_range_rejected() {
        let err = ShopConfig::from_lookup(lookup(&[(ENV_MEMBER_DISCOUNT, "101")])).unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { .. }));

        let err = ShopConfig::from_lookup(lookup(&[(ENV_PAIR_BUNDLE_SIZE, "0")])).unwrap_err();
        assert_eq!(err.to_string(), format!("pair_bundle_size must be between 1 and {}", u32::MAX));

        let err = ShopConfig::from_lookup(lookup(&[(ENV_PAIR_BUNDLE_SIZE, "-2")])).unwrap_err();
        assert_eq!(err, ConfigError::InvalidValue(ENV_PAIR_BUNDLE_SIZE.to_string()));
    }

    #[test]
    fn test_zero_bundle_never_reaches_policy() {
        let config = ShopConfig {
            pair_bundle_size: 0,
            ..ShopConfig::default()
        };
        assert!(matches!(
            config.pricing_policy(),
            Err(ConfigError::OutOfRange { .. })
        ));

        let args = Args::parse_from(["foodshop", "--pair-bundle-size", "0"]);
        assert!(ShopConfig::default().apply_args(&args).is_err());
    }

    #[test]
    fn test_args_override_env() {
        let env = ShopConfig::from_lookup(lookup(&[(ENV_MEMBER_DISCOUNT, "15")])).unwrap();
        let args = Args::parse_from([
            "foodshop",
            "--member-discount",
            "20",
            "--pair-codes",
            "pink,orange",
        ]);
        let config = env.apply_args(&args).unwrap();

        assert_eq!(config.member_discount_percent, 20);
        assert_eq!(config.pair_eligible_codes, ["PINK", "ORANGE"]);
        assert_eq!(config.pair_discount_percent, 5);
    }

    #[test]
    fn test_args_parse_defaults() {
        let args = Args::parse_from(["foodshop"]);
        assert!(!args.verbose);
        assert_eq!(args.log_format, LogFormat::Text);
        assert!(args.member_discount.is_none());

        let args = Args::parse_from(["foodshop", "-v", "--log-format", "json", "--print-config"]);
        assert!(args.verbose);
        assert!(args.print_config);
        assert_eq!(args.log_format, LogFormat::Json);
    }
}
