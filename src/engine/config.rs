//! SLS engine configuration: the tunable option table that drives restart
//! policy, move selection, and odd-cycle escape, grounded on the original
//! solver's `init_restart`/`init_max_iterations`/etc. initialization. Options
//! are collected by the CLI layer (`crate::cli`) as `-key value` pairs and/or
//! loaded from a TOML file, then merged here (CLI wins on conflict).

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Every field is `Option` so "unset" is distinguishable from "explicitly set
/// to the default value" — required for `merge` to let a CLI flag override a
/// config file even when the CLI value happens to equal the built-in default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub rseed: Option<u64>,
    pub maxit: Option<u64>,
    pub maxitdyn: Option<u64>,
    pub restart: Option<i64>,
    pub restartdyn: Option<i64>,
    pub greedyprob: Option<f64>,
    /// Undocumented-as-correct upstream: when set, the heap tracks every
    /// non-fixed argument instead of just the mislabeled ones. Reproduced
    /// faithfully, experimental.
    pub greedyincall: Option<bool>,
    pub initout: Option<bool>,
    pub enforceout: Option<bool>,
    pub escapeoddcycles: Option<bool>,
    pub randsel: Option<f64>,
    pub locminres: Option<f64>,
}

impl Config {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Overlay `cli` options on top of `self` (a config file), CLI winning
    /// wherever it sets a value, file value kept otherwise.
    pub fn merge(self, cli: Config) -> Config {
        Config {
            rseed: cli.rseed.or(self.rseed),
            maxit: cli.maxit.or(self.maxit),
            maxitdyn: cli.maxitdyn.or(self.maxitdyn),
            restart: cli.restart.or(self.restart),
            restartdyn: cli.restartdyn.or(self.restartdyn),
            greedyprob: cli.greedyprob.or(self.greedyprob),
            greedyincall: cli.greedyincall.or(self.greedyincall),
            initout: cli.initout.or(self.initout),
            enforceout: cli.enforceout.or(self.enforceout),
            escapeoddcycles: cli.escapeoddcycles.or(self.escapeoddcycles),
            randsel: cli.randsel.or(self.randsel),
            locminres: cli.locminres.or(self.locminres),
        }
    }

    pub fn greedyprob(&self) -> f64 {
        self.greedyprob.unwrap_or(0.0)
    }

    pub fn greedyincall(&self) -> bool {
        self.greedyincall.unwrap_or(false)
    }

    pub fn initout(&self) -> bool {
        self.initout.unwrap_or(false)
    }

    pub fn enforceout(&self) -> bool {
        self.enforceout.unwrap_or(false)
    }

    pub fn escapeoddcycles(&self) -> bool {
        self.escapeoddcycles.unwrap_or(false)
    }

    pub fn randsel(&self) -> f64 {
        self.randsel.unwrap_or(0.0)
    }

    pub fn locminres(&self) -> f64 {
        self.locminres.unwrap_or(0.0)
    }

    /// `1000 * n` default, or the larger of `maxit`/`maxitdyn * n` when
    /// either is set. The original help text claims the smaller of the two
    /// is taken; the code actually takes the larger. This preserves the
    /// code's behavior, not the help text.
    pub fn resolved_maxit(&self, n: u64) -> u64 {
        match (self.maxit, self.maxitdyn) {
            (None, None) => 1000 * n,
            (Some(a), None) => a,
            (None, Some(b)) => b * n,
            (Some(a), Some(b)) => a.max(b * n),
        }
    }

    /// `-1` (disabled) unless `restart`/`restartdyn` is set; the larger of
    /// the two when both are given (same discrepancy from the help text as
    /// `resolved_maxit`).
    pub fn resolved_restart(&self, n: u64) -> i64 {
        match (self.restart, self.restartdyn) {
            (None, None) => -1,
            (Some(a), None) => a,
            (None, Some(b)) => b * n as i64,
            (Some(a), Some(b)) => a.max(b * n as i64),
        }
    }

    /// Seconds-since-epoch seed if `rseed` was never set, matching the
    /// original's `srand(time(NULL))` fallback.
    pub fn resolved_seed(&self) -> u64 {
        self.rseed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0)
        })
    }

    pub fn parse_numeric_option(key: &str, value: &str) -> Result<f64> {
        value.parse::<f64>().map_err(|_| Error::InvalidOption {
            key: key.to_string(),
            value: value.to_string(),
        })
    }

    /// Builds a `Config` from the `-key value` pairs collected by the CLI
    /// layer (`crate::cli`). Unrecognized keys are accepted silently,
    /// matching the original solver's "unknown options are ignored"
    /// behavior; recognized keys with a value of the wrong type are
    /// `Error::InvalidOption`.
    pub fn from_option_pairs(pairs: &[(String, String)]) -> Result<Config> {
        let mut cfg = Config::default();
        for (key, value) in pairs {
            match key.as_str() {
                "rseed" => cfg.rseed = Some(parse_u64(key, value)?),
                "maxit" => cfg.maxit = Some(parse_u64(key, value)?),
                "maxitdyn" => cfg.maxitdyn = Some(parse_u64(key, value)?),
                "restart" => cfg.restart = Some(parse_i64(key, value)?),
                "restartdyn" => cfg.restartdyn = Some(parse_i64(key, value)?),
                "greedyprob" => cfg.greedyprob = Some(Self::parse_numeric_option(key, value)?),
                "greedyincall" => cfg.greedyincall = Some(parse_bool(key, value)?),
                "initout" => cfg.initout = Some(parse_bool(key, value)?),
                "enforceout" => cfg.enforceout = Some(parse_bool(key, value)?),
                "escapeoddcycles" => cfg.escapeoddcycles = Some(parse_bool(key, value)?),
                "randsel" => cfg.randsel = Some(Self::parse_numeric_option(key, value)?),
                "locminres" => cfg.locminres = Some(Self::parse_numeric_option(key, value)?),
                _ => {}
            }
        }
        Ok(cfg)
    }
}

fn parse_u64(key: &str, value: &str) -> Result<u64> {
    value.parse::<u64>().map_err(|_| Error::InvalidOption {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_i64(key: &str, value: &str) -> Result<i64> {
    value.parse::<i64>().map_err(|_| Error::InvalidOption {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value {
        "1" | "true" => Ok(true),
        "0" | "false" => Ok(false),
        _ => Err(Error::InvalidOption {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}
