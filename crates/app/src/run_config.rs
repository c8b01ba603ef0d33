//! Run configuration read from the environment.
//!
//! | Variable               | Meaning                              | Default |
//! |------------------------|--------------------------------------|---------|
//! | `SNOWFIELD_TERRAIN`    | path to an elevation patch JSON file | noise   |
//! | `SNOWFIELD_SEED`       | RNG seed for noise and snowfall      | 42      |
//! | `SNOWFIELD_TICKS`      | ticks to run before exiting          | 600     |
//! | `SNOWFIELD_RESOLUTION` | cells per side                       | 128     |

use std::path::PathBuf;

use simulation::config::DEFAULT_RESOLUTION;

pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_TICKS: u64 = 600;

#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub terrain_path: Option<PathBuf>,
    pub seed: u64,
    pub ticks: u64,
    pub resolution: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            terrain_path: None,
            seed: DEFAULT_SEED,
            ticks: DEFAULT_TICKS,
            resolution: DEFAULT_RESOLUTION,
        }
    }
}

impl RunConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys keep their default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let mut config = Self::default();
        if let Some(path) = lookup("SNOWFIELD_TERRAIN") {
            config.terrain_path = Some(PathBuf::from(path));
        }
        if let Some(raw) = lookup("SNOWFIELD_SEED") {
            config.seed = parse("SNOWFIELD_SEED", &raw)?;
        }
        if let Some(raw) = lookup("SNOWFIELD_TICKS") {
            config.ticks = parse("SNOWFIELD_TICKS", &raw)?;
        }
        if let Some(raw) = lookup("SNOWFIELD_RESOLUTION") {
            config.resolution = parse("SNOWFIELD_RESOLUTION", &raw)?;
        }
        Ok(config)
    }

    /// Seed handed to the noise generator, which takes an `i32`.
    pub fn noise_seed(&self) -> i32 {
        self.seed as i32
    }
}

fn parse<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, String> {
    raw.trim()
        .parse()
        .map_err(|_| format!("{key}: cannot parse '{raw}'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = RunConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, RunConfig::default());
        assert_eq!(config.resolution, 128);
    }

    #[test]
    fn test_reads_every_variable() {
        let config = RunConfig::from_lookup(lookup(&[
            ("SNOWFIELD_TERRAIN", "/tmp/patch.json"),
            ("SNOWFIELD_SEED", "7"),
            ("SNOWFIELD_TICKS", " 120 "),
            ("SNOWFIELD_RESOLUTION", "64"),
        ]))
        .unwrap();
        assert_eq!(config.terrain_path, Some(PathBuf::from("/tmp/patch.json")));
        assert_eq!(config.seed, 7);
        assert_eq!(config.ticks, 120);
        assert_eq!(config.resolution, 64);
    }

    #[test]
    fn test_rejects_garbage() {
        let err = RunConfig::from_lookup(lookup(&[("SNOWFIELD_TICKS", "lots")])).unwrap_err();
        assert!(err.contains("SNOWFIELD_TICKS"), "got: {err}");
    }
}
