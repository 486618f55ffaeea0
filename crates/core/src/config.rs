use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Environment variable prefix for overrides, e.g. `PETPAL_REPLY_DELAY_MS=0`.
pub const ENV_PREFIX: &str = "PETPAL_";

/// All petpal parameters. Defaults match the reference app; any field can be
/// overridden from the environment at startup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PetCfg {
    // dialogue
    pub reply_delay_ms: u64,
    pub initial_streak: u32,
    pub history_cap: usize,

    // pet care
    pub stat_max: u8,
    pub initial_happiness: u8,
    pub initial_hunger: u8,
    pub initial_energy: u8,
    pub mood_happy_threshold: f32,
    pub mood_neutral_threshold: f32,

    // runtime
    pub channel_buffer: usize,
}

impl Default for PetCfg {
    fn default() -> Self {
        Self {
            reply_delay_ms: 800,
            initial_streak: 7,
            history_cap: 200,
            stat_max: 100,
            initial_happiness: 85,
            initial_hunger: 60,
            initial_energy: 70,
            mood_happy_threshold: 70.0,
            mood_neutral_threshold: 40.0,
            channel_buffer: 32,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },
    #[error("{field} ({value}) exceeds stat_max ({max})")]
    AboveStatMax { field: &'static str, value: u8, max: u8 },
    #[error("mood thresholds out of order: happy {happy} must be >= neutral {neutral}")]
    ThresholdOrder { happy: f32, neutral: f32 },
}

impl PetCfg {
    /// Defaults overlaid with `PETPAL_*` environment variables.
    /// Unparseable values fall back to the default for that field.
    pub fn from_env() -> Result<Self, ConfigError> {
        let map: HashMap<String, String> = std::env::vars()
            .filter_map(|(k, v)| {
                k.strip_prefix(ENV_PREFIX)
                    .map(|field| (field.to_lowercase(), v))
            })
            .collect();
        let cfg = Self::from_map(&map);
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_map(m: &HashMap<String, String>) -> Self {
        let d = Self::default();
        Self {
            reply_delay_ms: get_or(m, "reply_delay_ms", d.reply_delay_ms),
            initial_streak: get_or(m, "initial_streak", d.initial_streak),
            history_cap: get_or(m, "history_cap", d.history_cap),
            stat_max: get_or(m, "stat_max", d.stat_max),
            initial_happiness: get_or(m, "initial_happiness", d.initial_happiness),
            initial_hunger: get_or(m, "initial_hunger", d.initial_hunger),
            initial_energy: get_or(m, "initial_energy", d.initial_energy),
            mood_happy_threshold: get_or(m, "mood_happy_threshold", d.mood_happy_threshold),
            mood_neutral_threshold: get_or(m, "mood_neutral_threshold", d.mood_neutral_threshold),
            channel_buffer: get_or(m, "channel_buffer", d.channel_buffer),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_cap == 0 {
            return Err(ConfigError::Zero { field: "history_cap" });
        }
        if self.channel_buffer == 0 {
            return Err(ConfigError::Zero { field: "channel_buffer" });
        }
        if self.stat_max == 0 {
            return Err(ConfigError::Zero { field: "stat_max" });
        }
        for (field, value) in [
            ("initial_happiness", self.initial_happiness),
            ("initial_hunger", self.initial_hunger),
            ("initial_energy", self.initial_energy),
        ] {
            if value > self.stat_max {
                return Err(ConfigError::AboveStatMax { field, value, max: self.stat_max });
            }
        }
        if self.mood_happy_threshold < self.mood_neutral_threshold {
            return Err(ConfigError::ThresholdOrder {
                happy: self.mood_happy_threshold,
                neutral: self.mood_neutral_threshold,
            });
        }
        Ok(())
    }

    /// (key, value, description) rows, for `/config` listings.
    pub fn to_entries(&self) -> Vec<(&'static str, String, &'static str)> {
        vec![
            ("reply_delay_ms", self.reply_delay_ms.to_string(), "Delay before the pet replies"),
            ("initial_streak", self.initial_streak.to_string(), "Check-in streak at session start"),
            ("history_cap", self.history_cap.to_string(), "Max messages kept in conversation history"),
            ("stat_max", self.stat_max.to_string(), "Upper bound of every pet stat"),
            ("initial_happiness", self.initial_happiness.to_string(), "Starting happiness"),
            ("initial_hunger", self.initial_hunger.to_string(), "Starting fullness"),
            ("initial_energy", self.initial_energy.to_string(), "Starting energy"),
            ("mood_happy_threshold", self.mood_happy_threshold.to_string(), "Stat average for a happy pet"),
            ("mood_neutral_threshold", self.mood_neutral_threshold.to_string(), "Stat average for a neutral pet"),
            ("channel_buffer", self.channel_buffer.to_string(), "Runtime input/output channel size"),
        ]
    }

    pub fn reply_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.reply_delay_ms)
    }
}

fn get_or<T: std::str::FromStr>(map: &HashMap<String, String>, key: &str, default: T) -> T {
    map.get(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(PetCfg::default().validate(), Ok(()));
        assert_eq!(PetCfg::default().reply_delay().as_millis(), 800);
    }

    #[test]
    fn map_overrides_and_falls_back() {
        let mut m = HashMap::new();
        m.insert("reply_delay_ms".to_string(), "0".to_string());
        m.insert("initial_streak".to_string(), "not-a-number".to_string());
        let cfg = PetCfg::from_map(&m);
        assert_eq!(cfg.reply_delay_ms, 0);
        assert_eq!(cfg.initial_streak, 7);
    }

    #[test]
    fn rejects_zero_capacity() {
        let cfg = PetCfg { history_cap: 0, ..PetCfg::default() };
        assert_eq!(cfg.validate(), Err(ConfigError::Zero { field: "history_cap" }));
    }

    #[test]
    fn rejects_stat_above_max() {
        let cfg = PetCfg { stat_max: 50, ..PetCfg::default() };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::AboveStatMax { field: "initial_happiness", .. })
        ));
    }

    #[test]
    fn rejects_inverted_thresholds() {
        let cfg = PetCfg {
            mood_happy_threshold: 30.0,
            ..PetCfg::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::ThresholdOrder { .. })));
    }

    #[test]
    fn entries_cover_every_field() {
        let entries = PetCfg::default().to_entries();
        assert_eq!(entries.len(), 10);
        assert!(entries.iter().any(|(k, v, _)| *k == "reply_delay_ms" && v == "800"));
    }

    #[test]
    fn entries_outlive_the_config() {
        let keys: Vec<&'static str> = {
            let cfg = PetCfg::from_map(&HashMap::new());
            cfg.to_entries().into_iter().map(|(k, _, _)| k).collect()
        };
        assert_eq!(keys.first(), Some(&"reply_delay_ms"));
        assert_eq!(keys.last(), Some(&"channel_buffer"));
    }
}
