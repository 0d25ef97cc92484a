use std::env;
use std::time::Duration;

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub accept_delay: Duration,
    pub delivery_delay: Duration,
    pub support_delay: Duration,
    pub print_report: bool,
    pub print_metrics: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            accept_delay: Duration::from_millis(2_000),
            delivery_delay: Duration::from_millis(3_000),
            support_delay: Duration::from_millis(3_000),
            print_report: false,
            print_metrics: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let _ = dotenvy::dotenv();
        let defaults = Self::default();

        Ok(Self {
            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            accept_delay: millis_or_default("ACCEPT_DELAY_MS", defaults.accept_delay)?,
            delivery_delay: millis_or_default("DELIVERY_DELAY_MS", defaults.delivery_delay)?,
            support_delay: millis_or_default("SUPPORT_DELAY_MS", defaults.support_delay)?,
            print_report: parse_or_default("PRINT_REPORT", defaults.print_report)?,
            print_metrics: parse_or_default("PRINT_METRICS", defaults.print_metrics)?,
        })
    }

    /// Same behaviour without any pauses.
    pub fn instant() -> Self {
        Self {
            accept_delay: Duration::ZERO,
            delivery_delay: Duration::ZERO,
            support_delay: Duration::ZERO,
            ..Self::default()
        }
    }
}

fn millis_or_default(key: &str, default: Duration) -> Result<Duration, AppError> {
    parse_or_default(key, default.as_millis() as u64).map(Duration::from_millis)
}

fn parse_or_default<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|err| AppError::Config(format!("invalid {key}: {err}"))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::Config;

    #[test]
    fn defaults_mirror_the_demo_pauses() {
        let config = Config::default();
        assert_eq!(config.accept_delay, Duration::from_secs(2));
        assert_eq!(config.delivery_delay, Duration::from_secs(3));
        assert_eq!(config.support_delay, Duration::from_secs(3));
        assert!(!config.print_report);
    }

    #[test]
    fn instant_config_has_no_pauses() {
        let config = Config::instant();
        assert!(config.accept_delay.is_zero());
        assert!(config.delivery_delay.is_zero());
        assert!(config.support_delay.is_zero());
        assert_eq!(config.log_level, "warn");
    }
}
