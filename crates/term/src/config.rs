//! Game configuration resolved from the environment.
//!
//! | Variable               | Field      | Default      |
//! |------------------------|------------|--------------|
//! | `MINESWEEPER_WIDTH`    | `width`    | 10           |
//! | `MINESWEEPER_HEIGHT`   | `height`   | 10           |
//! | `MINESWEEPER_MINES`    | `mines`    | 10           |
//! | `MINESWEEPER_FRAME_MS` | `frame_ms` | 100          |
//! | `MINESWEEPER_SEED`     | `seed`     | wall clock   |
//!
//! Values that fail to parse fall back to the default with a warning.

use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{debug, warn};

use crate::core::board::status_width;
use crate::error::{Error, Result};
use crate::types::{DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, DEFAULT_FRAME_MS, DEFAULT_MINES};

pub const ENV_WIDTH: &str = "MINESWEEPER_WIDTH";
pub const ENV_HEIGHT: &str = "MINESWEEPER_HEIGHT";
pub const ENV_MINES: &str = "MINESWEEPER_MINES";
pub const ENV_FRAME_MS: &str = "MINESWEEPER_FRAME_MS";
pub const ENV_SEED: &str = "MINESWEEPER_SEED";

/// Seed used by [`GameConfig::default`].
pub const DEFAULT_SEED: u32 = 12345;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub width: u16,
    pub height: u16,
    pub mines: u32,
    pub frame_ms: u64,
    pub seed: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_BOARD_WIDTH,
            height: DEFAULT_BOARD_HEIGHT,
            mines: DEFAULT_MINES,
            frame_ms: DEFAULT_FRAME_MS,
            seed: DEFAULT_SEED,
        }
    }
}

impl GameConfig {
    /// Read the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve every field through `lookup`, which maps a variable name to its
    /// value if set.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let config = Self {
            width: parse_or(&lookup, ENV_WIDTH, defaults.width),
            height: parse_or(&lookup, ENV_HEIGHT, defaults.height),
            mines: parse_or(&lookup, ENV_MINES, defaults.mines),
            frame_ms: parse_or(&lookup, ENV_FRAME_MS, defaults.frame_ms),
            seed: parse_or(&lookup, ENV_SEED, clock_seed()),
        };
        debug!(?config, "config resolved");
        config
    }

    /// Check that the board can be built and the mines fit on it.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidConfig(format!(
                "board must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }
        if self.mines == 0 {
            return Err(Error::InvalidConfig("mine count must be positive".into()));
        }
        let capacity = self.width as u32 * self.height as u32;
        if self.mines > capacity {
            return Err(Error::InvalidConfig(format!(
                "{} mines do not fit on a {}x{} board",
                self.mines, self.width, self.height
            )));
        }
        if self.frame_ms == 0 {
            return Err(Error::InvalidConfig("frame interval must be positive".into()));
        }
        Ok(())
    }

    /// Screen wide enough for the board and its status line, and one row
    /// taller than the board.
    pub fn screen_size(&self) -> (u16, u16) {
        let width = status_width(self.width, self.height, self.mines);
        (
            u16::try_from(width).unwrap_or(u16::MAX),
            self.height.saturating_add(1),
        )
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: FromStr + Copy,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, "ignoring unparseable setting");
            default
        }),
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u32)
        .unwrap_or(DEFAULT_SEED)
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
    fn overrides_and_fallbacks() {
        let config = GameConfig::from_lookup(lookup(&[
            (ENV_WIDTH, "16"),
            (ENV_HEIGHT, " 8 "),
            (ENV_MINES, "many"),
            (ENV_SEED, "7"),
        ]));
        assert_eq!(config.width, 16);
        assert_eq!(config.height, 8);
        assert_eq!(config.mines, DEFAULT_MINES);
        assert_eq!(config.frame_ms, DEFAULT_FRAME_MS);
        assert_eq!(config.seed, 7);
    }

    #[test]
    fn validate_rejects_overfull_board() {
        let config = GameConfig {
            width: 2,
            height: 2,
            mines: 5,
            ..GameConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn screen_fits_status_line() {
        let config = GameConfig {
            width: 3,
            height: 3,
            mines: 1,
            ..GameConfig::default()
        };
        // "Game Over!" is the widest line.
        assert_eq!(config.screen_size(), (10, 4));
        let wide = GameConfig {
            width: 40,
            height: 5,
            ..GameConfig::default()
        };
        assert_eq!(wide.screen_size(), (40, 6));
    }

    #[test]
    fn validate_rejects_zero_fields() {
        for config in [
            GameConfig { width: 0, ..GameConfig::default() },
            GameConfig { mines: 0, ..GameConfig::default() },
            GameConfig { frame_ms: 0, ..GameConfig::default() },
        ] {
            assert!(config.validate().is_err(), "{config:?}");
        }
    }
}
