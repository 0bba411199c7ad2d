//! Game configuration from `MATCH_*` environment variables.
//!
//! Missing or unparsable values fall back to the defaults.

use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tui_match_engine::EngineConfig;
use tui_match_orchestrator::AnimationTimings;

pub const DEFAULT_ENGINE_TIMEOUT_MS: u64 = 2000;
pub const DEFAULT_LOG_FILTER: &str = "info";
/// Largest board side accepted from the environment; wider boards cannot be
/// laid out in terminal cells.
pub const MAX_BOARD_SIDE: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub engine: EngineConfig,
    pub seed: u32,
    /// Remote engine address; `None` runs the engine in-process.
    pub engine_addr: Option<String>,
    pub engine_timeout: Duration,
    pub timings: AnimationTimings,
    pub log_path: Option<PathBuf>,
    pub log_filter: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let text = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };
        let number = |key: &str| text(key).and_then(|s| s.parse::<u64>().ok());
        let millis = |key: &str, default: Duration| {
            number(key).map(Duration::from_millis).unwrap_or(default)
        };

        let defaults = EngineConfig::default();
        let engine = EngineConfig {
            width: board_side(number("MATCH_BOARD_WIDTH"), defaults.width),
            height: board_side(number("MATCH_BOARD_HEIGHT"), defaults.height),
            tile_kinds: number("MATCH_TILE_KINDS")
                .and_then(|n| u8::try_from(n).ok())
                .filter(|&n| n > 0)
                .unwrap_or(defaults.tile_kinds),
        };

        let timings = AnimationTimings::default();
        Self {
            engine,
            seed: number("MATCH_SEED")
                .map(|n| n as u32)
                .unwrap_or_else(time_seed),
            engine_addr: text("MATCH_ENGINE_ADDR"),
            engine_timeout: millis(
                "MATCH_ENGINE_TIMEOUT_MS",
                Duration::from_millis(DEFAULT_ENGINE_TIMEOUT_MS),
            ),
            timings: AnimationTimings {
                swap: millis("MATCH_SWAP_MS", timings.swap),
                remove: millis("MATCH_REMOVE_MS", timings.remove),
                fall: millis("MATCH_FALL_MS", timings.fall),
                appear: millis("MATCH_APPEAR_MS", timings.appear),
            },
            log_path: text("MATCH_LOG_PATH").map(PathBuf::from),
            log_filter: text("MATCH_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        }
    }
}

fn board_side(value: Option<u64>, default: usize) -> usize {
    match value {
        Some(0) | None => default,
        Some(n) => usize::try_from(n).map_or(MAX_BOARD_SIDE, |n| n.min(MAX_BOARD_SIDE)),
    }
}

fn time_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
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
    fn defaults_when_unset() {
        let cfg = AppConfig::from_lookup(lookup(&[("MATCH_SEED", "7")]));
        assert_eq!(cfg.engine, EngineConfig::default());
        assert_eq!(cfg.seed, 7);
        assert_eq!(cfg.engine_addr, None);
        assert_eq!(cfg.engine_timeout, Duration::from_millis(2000));
        assert_eq!(cfg.timings, AnimationTimings::default());
        assert_eq!(cfg.log_path, None);
        assert_eq!(cfg.log_filter, "info");
    }

    #[test]
    fn overrides_and_bad_values() {
        let cfg = AppConfig::from_lookup(lookup(&[
            ("MATCH_BOARD_WIDTH", "6"),
            ("MATCH_BOARD_HEIGHT", "0"),
            ("MATCH_TILE_KINDS", "900"),
            ("MATCH_ENGINE_ADDR", " 127.0.0.1:9000 "),
            ("MATCH_SWAP_MS", "10"),
            ("MATCH_FALL_MS", "fast"),
            ("MATCH_LOG_PATH", "/tmp/match.log"),
            ("MATCH_LOG", "debug"),
        ]));
        assert_eq!(cfg.engine.width, 6);
        assert_eq!(cfg.engine.height, EngineConfig::default().height);
        assert_eq!(cfg.engine.tile_kinds, EngineConfig::default().tile_kinds);
        assert_eq!(cfg.engine_addr.as_deref(), Some("127.0.0.1:9000"));
        assert_eq!(cfg.timings.swap, Duration::from_millis(10));
        assert_eq!(cfg.timings.fall, AnimationTimings::default().fall);
        assert_eq!(cfg.log_path, Some(PathBuf::from("/tmp/match.log")));
        assert_eq!(cfg.log_filter, "debug");
    }

    #[test]
    fn oversized_boards_are_clamped() {
        let cfg = AppConfig::from_lookup(lookup(&[
            ("MATCH_BOARD_WIDTH", "13200"),
            ("MATCH_BOARD_HEIGHT", "65"),
        ]));
        assert_eq!(cfg.engine.width, MAX_BOARD_SIDE);
        assert_eq!(cfg.engine.height, MAX_BOARD_SIDE);
    }
}
