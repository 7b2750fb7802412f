use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use dotenv::dotenv;
use tracing::{info, warn};

use crate::error::ConfigurationError;
use crate::evaluation::pricing::{PricingPolicy, PriorityTerms};
use crate::domain::types::OrderPriority;

pub mod constant {
    pub const MILES_PER_KILOMETER: f64 = 0.621371;
    pub const EARTH_RADIUS_KM: f64 = 6371.0;
    pub const DEFAULT_AVERAGE_SPEED_MPH: f64 = 30.0;
    pub const DEFAULT_TIME_MULTIPLIER_STANDARD: f64 = 1.0;
    pub const DEFAULT_TIME_MULTIPLIER_EXPRESS: f64 = 0.5;
    pub const DEFAULT_DISTANCE_PROVIDER: &str = "great-circle";
    pub const DEFAULT_OSRM_BASE_URL: &str = "https://router.project-osrm.org/route/v1/driving";
    pub const DEFAULT_DISTANCE_TIMEOUT_SECS: u64 = 30;
    pub const DEFAULT_DISTANCE_MAX_RETRIES: u32 = 2;
    pub const RETRY_BASE_DELAY_MS: u64 = 250;
    pub const MAX_DISTANCE_TIMEOUT_SECS: u64 = 300;
    pub const MAX_DISTANCE_RETRIES: u32 = 10;
    pub const DEMO_SEED: u64 = 64;
    pub const DEMO_REQUEST_COUNT: usize = 20;
}

#[derive(Debug, Clone, PartialEq)]
pub enum DistanceProviderKind {
    GreatCircle,
    Osrm {
        base_url: String,
        contact_email: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub timeout: Duration,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: constant::DEFAULT_DISTANCE_MAX_RETRIES,
            timeout: Duration::from_secs(constant::DEFAULT_DISTANCE_TIMEOUT_SECS),
            base_delay: Duration::from_millis(constant::RETRY_BASE_DELAY_MS),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub pricing: PricingPolicy,
    pub distance_provider: DistanceProviderKind,
    pub retry: RetryPolicy,
}

impl Settings {
    /// Load `.env`, then read settings from the process environment
    pub fn from_env() -> Result<Self, ConfigurationError> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let standard = PriorityTerms {
            price_multiplier: required(&lookup, "PRICE_MULTIPLIER_STANDARD")?,
            time_multiplier: optional(
                &lookup,
                "TIME_MULTIPLIER_STANDARD",
                constant::DEFAULT_TIME_MULTIPLIER_STANDARD,
            )?,
        };
        let express = PriorityTerms {
            price_multiplier: required(&lookup, "PRICE_MULTIPLIER_EXPRESS")?,
            time_multiplier: optional(
                &lookup,
                "TIME_MULTIPLIER_EXPRESS",
                constant::DEFAULT_TIME_MULTIPLIER_EXPRESS,
            )?,
        };
        let average_speed_mph = optional(
            &lookup,
            "AVERAGE_SPEED_MPH",
            constant::DEFAULT_AVERAGE_SPEED_MPH,
        )?;

        let terms = [
            (OrderPriority::Standard, standard),
            (OrderPriority::Express, express),
        ]
        .into_iter()
        .collect();
        let pricing = PricingPolicy::from_terms(terms, average_speed_mph)?;

        let provider = lookup("DISTANCE_PROVIDER")
            .unwrap_or_else(|| constant::DEFAULT_DISTANCE_PROVIDER.to_string());
        let distance_provider = match provider.trim() {
            "great-circle" => DistanceProviderKind::GreatCircle,
            "osrm" => DistanceProviderKind::Osrm {
                base_url: lookup("OSRM_BASE_URL")
                    .unwrap_or_else(|| constant::DEFAULT_OSRM_BASE_URL.to_string()),
                contact_email: lookup("OSRM_CONTACT_EMAIL"),
            },
            other => {
                return Err(ConfigurationError::Invalid {
                    key: "DISTANCE_PROVIDER".to_string(),
                    value: other.to_string(),
                    reason: "expected 'great-circle' or 'osrm'".to_string(),
                })
            }
        };

        let max_retries = parse_or(
            &lookup,
            "DISTANCE_MAX_RETRIES",
            constant::DEFAULT_DISTANCE_MAX_RETRIES,
        )?;
        let timeout_secs = parse_or(
            &lookup,
            "DISTANCE_TIMEOUT_SECS",
            constant::DEFAULT_DISTANCE_TIMEOUT_SECS,
        )?;
        let retry = RetryPolicy {
            max_retries: within(
                "DISTANCE_MAX_RETRIES",
                max_retries,
                0,
                constant::MAX_DISTANCE_RETRIES,
            )?,
            timeout: Duration::from_secs(within(
                "DISTANCE_TIMEOUT_SECS",
                timeout_secs,
                1,
                constant::MAX_DISTANCE_TIMEOUT_SECS,
            )?),
            base_delay: Duration::from_millis(constant::RETRY_BASE_DELAY_MS),
        };

        info!(
            "Loaded settings: provider={:?}, timeout={}s, retries={}",
            distance_provider,
            retry.timeout.as_secs(),
            retry.max_retries
        );

        Ok(Self {
            pricing,
            distance_provider,
            retry,
        })
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigurationError>
where
    T: FromStr,
    T::Err: Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigurationError::Invalid {
        key: key.to_string(),
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigurationError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Display,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => parse_value(key, &raw),
        None => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}

fn positive(key: &str, value: f64) -> Result<f64, ConfigurationError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigurationError::Invalid {
            key: key.to_string(),
            value: value.to_string(),
            reason: "must be a finite number greater than zero".to_string(),
        })
    }
}

fn within<T>(key: &str, value: T, min: T, max: T) -> Result<T, ConfigurationError>
where
    T: PartialOrd + Display,
{
    if value < min || value > max {
        return Err(ConfigurationError::Invalid {
            key: key.to_string(),
            value: value.to_string(),
            reason: format!("must be between {min} and {max}"),
        });
    }
    Ok(value)
}

fn required<F>(lookup: &F, key: &str) -> Result<f64, ConfigurationError>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key).ok_or_else(|| {
        warn!("Required setting {key} is missing");
        ConfigurationError::Missing(key.to_string())
    })?;
    positive(key, parse_value(key, &raw)?)
}

fn optional<F>(lookup: &F, key: &str, default: f64) -> Result<f64, ConfigurationError>
where
    F: Fn(&str) -> Option<String>,
{
    positive(key, parse_or(lookup, key, default)?)
}
