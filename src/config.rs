use std::path::PathBuf;

use chrono::NaiveDate;

use crate::engine::{NameConvention, RoomLink};
use crate::model::{DateRange, parse_day};

/// Runtime settings read from `ROOMCAL_*` environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub snapshot: PathBuf,
    pub window: DateRange,
    pub link: RoomLink,
    pub metrics: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    InvalidDate { var: &'static str, value: String },
    InvalidConvention(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Missing(var) => write!(f, "{var} is not set"),
            ConfigError::InvalidDate { var, value } => write!(f, "{var}: invalid date {value:?}"),
            ConfigError::InvalidConvention(v) => {
                write!(f, "ROOMCAL_NAME_CONVENTION: expected `off` or `<booking>:<room>`, got {v:?}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes `std::env::var`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let snapshot = lookup("ROOMCAL_SNAPSHOT").unwrap_or_else(|| "./data/snapshot.json".into());
        let start = day(&lookup, "ROOMCAL_FROM")?;
        let end = day(&lookup, "ROOMCAL_TO")?;

        let link = match lookup("ROOMCAL_NAME_CONVENTION") {
            None => RoomLink::default(),
            Some(v) if v.eq_ignore_ascii_case("off") => RoomLink::explicit(),
            Some(v) => NameConvention::parse(&v)
                .map(RoomLink::with_convention)
                .ok_or(ConfigError::InvalidConvention(v))?,
        };

        let metrics = lookup("ROOMCAL_METRICS")
            .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            snapshot: PathBuf::from(snapshot),
            window: DateRange::new(start, end),
            link,
            metrics,
        })
    }
}

fn day(lookup: &impl Fn(&str) -> Option<String>, var: &'static str) -> Result<NaiveDate, ConfigError> {
    let value = lookup(var).ok_or(ConfigError::Missing(var))?;
    parse_day(&value).ok_or(ConfigError::InvalidDate { var, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn defaults() {
        let c = config(&[("ROOMCAL_FROM", "2024-08-01"), ("ROOMCAL_TO", "2024-08-31")]).unwrap();
        assert_eq!(c.snapshot, PathBuf::from("./data/snapshot.json"));
        assert_eq!(c.window.days(), 31);
        assert_eq!(c.link, RoomLink::default());
        assert!(!c.metrics);
    }

    #[test]
    fn window_required() {
        assert_eq!(config(&[("ROOMCAL_TO", "2024-08-31")]), Err(ConfigError::Missing("ROOMCAL_FROM")));
        assert!(matches!(
            config(&[("ROOMCAL_FROM", "2024-08-01"), ("ROOMCAL_TO", "august")]),
            Err(ConfigError::InvalidDate { var: "ROOMCAL_TO", .. })
        ));
    }

    #[test]
    fn convention_switch() {
        let base = [("ROOMCAL_FROM", "2024-08-01"), ("ROOMCAL_TO", "2024-08-31")];
        let off = config(&[base[0], base[1], ("ROOMCAL_NAME_CONVENTION", "off")]).unwrap();
        assert_eq!(off.link, RoomLink::explicit());

        let custom = config(&[base[0], base[1], ("ROOMCAL_NAME_CONVENTION", "Res:Suite")]).unwrap();
        assert_eq!(custom.link, RoomLink::with_convention(NameConvention::new("Res", "Suite")));

        assert!(matches!(
            config(&[base[0], base[1], ("ROOMCAL_NAME_CONVENTION", "nonsense")]),
            Err(ConfigError::InvalidConvention(_))
        ));
    }

    #[test]
    fn metrics_flag() {
        let c = config(&[("ROOMCAL_FROM", "2024-08-01"), ("ROOMCAL_TO", "2024-08-31"), ("ROOMCAL_METRICS", "1")]).unwrap();
        assert!(c.metrics);
    }
}
