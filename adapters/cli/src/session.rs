//! Headless session files.

use std::{fs, path::Path, time::Duration};

use anyhow::{Context, Result};
use dronewell_core::InputState;
use dronewell_presentation::{input_from_keys, Key};
use dronewell_world::{Config, DEFAULT_SEED};
use serde::Deserialize;

/// Session settings read from TOML; every field is optional.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct SessionConfig {
    pub(crate) seed: u64,
    pub(crate) tick_rate_ms: u64,
    pub(crate) frame_ms: u64,
    pub(crate) frames: u32,
    pub(crate) steps: Vec<Step>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            tick_rate_ms: 500,
            frame_ms: 16,
            frames: 3600,
            steps: Vec::new(),
        }
    }
}

/// Keys held for a run of consecutive frames.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Step {
    pub(crate) frames: u32,
    #[serde(default)]
    pub(crate) keys: Vec<String>,
}

impl SessionConfig {
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read session file at {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("invalid session file {}", path.display()))
    }

    pub(crate) fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse session toml contents")
    }

    pub(crate) fn world_config(&self) -> Config {
        Config::new(Duration::from_millis(self.tick_rate_ms.max(1)), self.seed)
    }

    pub(crate) fn frame_time(&self) -> Duration {
        Duration::from_millis(self.frame_ms)
    }

    /// Resolves the key names of every step.
    pub(crate) fn script(&self) -> Result<Script> {
        let mut steps = Vec::with_capacity(self.steps.len());
        for (index, step) in self.steps.iter().enumerate() {
            let keys = step
                .keys
                .iter()
                .map(|name| name.parse::<Key>())
                .collect::<Result<Vec<_>, _>>()
                .with_context(|| format!("step {} has an unbound key", index + 1))?;
            steps.push((step.frames, input_from_keys(keys)));
        }
        Ok(Script { steps })
    }
}

/// Scripted input, played back frame by frame.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Script {
    steps: Vec<(u32, InputState)>,
}

impl Script {
    /// Input held on `frame`; nothing is held once the script runs out.
    pub(crate) fn input_at(&self, frame: u32) -> InputState {
        let mut start = 0u32;
        for (frames, input) in &self.steps {
            let end = start.saturating_add(*frames);
            if frame < end {
                return *input;
            }
            start = end;
        }
        InputState::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let session = SessionConfig::parse("").expect("empty session is valid");
        assert_eq!(session, SessionConfig::default());
        assert_eq!(session.world_config().tick_rate(), Duration::from_millis(500));
        assert_eq!(session.world_config().rng_seed(), DEFAULT_SEED);
    }

    #[test]
    fn steps_play_back_in_order() {
        let session = SessionConfig::parse(
            r#"
            seed = 9
            frames = 100

            [[steps]]
            frames = 2
            keys = ["d", "Space"]

            [[steps]]
            frames = 1
            "#,
        )
        .expect("valid session");
        assert_eq!(session.seed, 9);

        let script = session.script().expect("keys are bound");
        assert!(script.input_at(0).right && script.input_at(1).primary);
        assert_eq!(script.input_at(2), InputState::default());
        assert_eq!(script.input_at(50), InputState::default());
    }

    #[test]
    fn unknown_keys_are_reported_with_their_step() {
        let session = SessionConfig::parse(
            r#"
            [[steps]]
            frames = 1
            keys = ["escape"]
            "#,
        )
        .expect("valid session");
        let error = session.script().expect_err("escape is not bound");
        let message = format!("{error:#}");
        assert!(message.contains("step 1"), "{message}");
        assert!(message.contains("unknown key `escape`"), "{message}");
    }

    #[test]
    fn misspelled_fields_are_rejected() {
        assert!(SessionConfig::parse("seeds = 3").is_err());
    }
}
