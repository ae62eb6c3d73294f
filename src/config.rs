//! Configuration types for montessori-mult.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Inclusive range a single digit is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigitRange {
    /// Smallest value (inclusive).
    pub min: u32,
    /// Largest value (inclusive).
    pub max: u32,
}

impl DigitRange {
    /// Create a new inclusive range.
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Check whether `value` lies inside the range.
    pub fn contains(&self, value: u32) -> bool {
        (self.min..=self.max).contains(&value)
    }

    fn validate(&self, name: &str, upper: u32) -> Result<()> {
        if self.min > self.max {
            return Err(Error::Config(format!(
                "{name}: min {} is greater than max {}",
                self.min, self.max
            )));
        }
        if self.max > upper {
            return Err(Error::Config(format!(
                "{name}: max {} exceeds {upper}",
                self.max
            )));
        }
        Ok(())
    }
}

/// Digit ranges for golden-bead scenarios (four-digit multiplicand).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoldenBeadRanges {
    pub thousands: DigitRange,
    pub hundreds: DigitRange,
    pub tens: DigitRange,
    pub units: DigitRange,
    pub multiplier: DigitRange,
}

impl Default for GoldenBeadRanges {
    fn default() -> Self {
        Self {
            thousands: DigitRange::new(1, 2),
            hundreds: DigitRange::new(1, 4),
            tens: DigitRange::new(2, 8),
            units: DigitRange::new(2, 9),
            multiplier: DigitRange::new(2, 4),
        }
    }
}

/// Digit ranges for stamp-game scenarios (three-digit multiplicand).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StampGameRanges {
    pub hundreds: DigitRange,
    pub tens: DigitRange,
    pub units: DigitRange,
    pub multiplier: DigitRange,
}

impl Default for StampGameRanges {
    fn default() -> Self {
        Self {
            hundreds: DigitRange::new(2, 5),
            tens: DigitRange::new(2, 8),
            units: DigitRange::new(1, 9),
            multiplier: DigitRange::new(2, 5),
        }
    }
}

/// Scenario generator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Upper bound on rejection-sampling draws per scenario.
    pub max_attempts: u32,
    /// Golden-bead digit ranges.
    pub golden_beads: GoldenBeadRanges,
    /// Stamp-game digit ranges.
    pub stamp_game: StampGameRanges,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_attempts: 10_000,
            golden_beads: GoldenBeadRanges::default(),
            stamp_game: StampGameRanges::default(),
        }
    }
}

impl GeneratorConfig {
    /// Set the attempt cap.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Replace the golden-bead ranges.
    pub fn with_golden_beads(mut self, ranges: GoldenBeadRanges) -> Self {
        self.golden_beads = ranges;
        self
    }

    /// Replace the stamp-game ranges.
    pub fn with_stamp_game(mut self, ranges: StampGameRanges) -> Self {
        self.stamp_game = ranges;
        self
    }

    /// Check that every range is a valid digit range.
    pub fn validate(&self) -> Result<()> {
        if self.max_attempts == 0 {
            return Err(Error::Config("max_attempts must be at least 1".into()));
        }

        let g = &self.golden_beads;
        g.thousands.validate("golden_beads.thousands", 9)?;
        g.hundreds.validate("golden_beads.hundreds", 9)?;
        g.tens.validate("golden_beads.tens", 9)?;
        g.units.validate("golden_beads.units", 9)?;
        g.multiplier.validate("golden_beads.multiplier", 9)?;

        let s = &self.stamp_game;
        s.hundreds.validate("stamp_game.hundreds", 9)?;
        s.tens.validate("stamp_game.tens", 9)?;
        s.units.validate("stamp_game.units", 9)?;
        s.multiplier.validate("stamp_game.multiplier", 9)?;

        if g.multiplier.min == 0 || s.multiplier.min == 0 {
            return Err(Error::Config("multiplier must be at least 1".into()));
        }
        Ok(())
    }
}

/// Presentation playback configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresentationConfig {
    /// Delay between autoplay steps, in milliseconds.
    pub autoplay_interval_ms: u64,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            autoplay_interval_ms: 4200,
        }
    }
}

impl PresentationConfig {
    /// Autoplay delay as a [`Duration`].
    pub fn autoplay_interval(&self) -> Duration {
        Duration::from_millis(self.autoplay_interval_ms)
    }

    /// Set the autoplay delay.
    pub fn with_autoplay_interval_ms(mut self, ms: u64) -> Self {
        self.autoplay_interval_ms = ms;
        self
    }
}

/// Top-level lesson configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LessonConfig {
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub presentation: PresentationConfig,
}

impl LessonConfig {
    /// Load and validate a configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<()> {
        self.generator.validate()?;
        if self.presentation.autoplay_interval_ms == 0 {
            return Err(Error::Config(
                "autoplay_interval_ms must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
