use std::path::PathBuf;
use std::str::FromStr;

use crate::constants::DEFAULT_SPAWN_INTERVAL_MS;

pub const ASSETS_ENV: &str = "GHOST_SHOOTER_ASSETS";
pub const PLAYERS_ENV: &str = "GHOST_SHOOTER_PLAYERS";
pub const SPAWN_ENV: &str = "GHOST_SHOOTER_SPAWN_MS";

pub const DEFAULT_ASSETS_DIR: &str = "assets";
pub const MAX_PLAYERS: usize = 2;

/// Runtime settings, read from the environment
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Directory holding `ghostN.png` sprites and `sounds/`
    pub assets_dir: PathBuf,
    /// Number of players, 1 or 2
    pub players: usize,
    /// Milliseconds between ghost spawns
    pub spawn_interval_ms: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from(DEFAULT_ASSETS_DIR),
            players: 1,
            spawn_interval_ms: DEFAULT_SPAWN_INTERVAL_MS,
        }
    }
}

impl GameConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup. Missing or empty keys keep their
    /// defaults; invalid values are logged and ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|s| !s.is_empty());
        let mut config = Self::default();

        if let Some(dir) = lookup(ASSETS_ENV) {
            config.assets_dir = PathBuf::from(dir);
        }
        if let Some(players) = parse::<usize>(PLAYERS_ENV, lookup(PLAYERS_ENV)) {
            if (1..=MAX_PLAYERS).contains(&players) {
                config.players = players;
            } else {
                log::warn!("{PLAYERS_ENV}={players} out of range 1..={MAX_PLAYERS}, using 1");
            }
        }
        if let Some(interval) = parse::<u32>(SPAWN_ENV, lookup(SPAWN_ENV)) {
            if interval > 0 {
                config.spawn_interval_ms = interval;
            } else {
                log::warn!("{SPAWN_ENV} must be positive, using {DEFAULT_SPAWN_INTERVAL_MS}");
            }
        }

        config
    }
}

fn parse<T: FromStr>(key: &str, value: Option<String>) -> Option<T> {
    let value = value?;
    match value.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            log::warn!("ignoring {key}={value:?}: not a valid number");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> GameConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        GameConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        assert_eq!(config_from(&[]), GameConfig::default());
    }

    #[test]
    fn test_reads_all_keys() {
        let config = config_from(&[
            (ASSETS_ENV, "/tmp/ghosts"),
            (PLAYERS_ENV, "2"),
            (SPAWN_ENV, " 750 "),
        ]);
        assert_eq!(config.assets_dir, PathBuf::from("/tmp/ghosts"));
        assert_eq!(config.players, 2);
        assert_eq!(config.spawn_interval_ms, 750);
    }

    #[test]
    fn test_empty_values_are_ignored() {
        let config = config_from(&[(ASSETS_ENV, ""), (PLAYERS_ENV, "")]);
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config_from(&[(PLAYERS_ENV, "3"), (SPAWN_ENV, "soon")]);
        assert_eq!(config.players, 1);
        assert_eq!(config.spawn_interval_ms, DEFAULT_SPAWN_INTERVAL_MS);

        let config = config_from(&[(PLAYERS_ENV, "0"), (SPAWN_ENV, "0")]);
        assert_eq!(config.players, 1);
        assert_eq!(config.spawn_interval_ms, DEFAULT_SPAWN_INTERVAL_MS);
    }
}
