//! Seeded scenario generation by rejection sampling.
//!
//! Each draw picks a digit set and a multiplier from the configured ranges,
//! solves it place by place, and keeps it only when:
//!
//! 1. the top place produces no carry (the product fits the material), and
//! 2. at least one place carries (the lesson actually shows an exchange).
//!
//! The stream is seeded once per call, so a seed always yields the same
//! scenario for the same configuration.

use rand::Rng;
use tracing::{debug, error, trace};

use super::rng::Mulberry32;
use super::{
    GoldenBeadDigits, GoldenBeadScenario, ManipulativeKind, Scenario, StampGameDigits,
    StampGameScenario,
};
use crate::config::{DigitRange, GeneratorConfig};
use crate::error::{Error, Result};

/// Deterministic generator of solved scenarios.
#[derive(Debug, Clone, Default)]
pub struct ScenarioGenerator {
    config: GeneratorConfig,
}

impl ScenarioGenerator {
    /// Create a generator with the given ranges and attempt cap.
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Draw a fresh seed from ambient randomness.
    pub fn random_seed() -> u32 {
        rand::random()
    }

    /// Generate a scenario of `kind`.
    ///
    /// Without a seed one is drawn from ambient randomness; the seed used is
    /// stored on the returned scenario.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GenerationExhausted`] if no acceptable draw is found
    /// within `max_attempts`, and [`Error::Config`] for invalid ranges.
    pub fn generate(&self, kind: ManipulativeKind, seed: Option<u32>) -> Result<Scenario> {
        self.config.validate()?;
        let seed = seed.unwrap_or_else(Self::random_seed);
        let mut rng = Mulberry32::new(seed);

        for attempt in 1..=self.config.max_attempts {
            let candidate = match kind {
                ManipulativeKind::GoldenBeads => self.draw_golden_beads(&mut rng, seed),
                ManipulativeKind::StampGame => self.draw_stamp_game(&mut rng, seed),
            };

            if !candidate.fits_width() {
                trace!(%kind, seed, attempt, "rejected: product overflows top place");
                continue;
            }
            if !candidate.exercises_exchange() {
                trace!(%kind, seed, attempt, "rejected: no exchange");
                continue;
            }

            debug!(
                %kind,
                seed,
                attempt,
                multiplicand = candidate.multiplicand(),
                multiplier = candidate.multiplier(),
                "scenario generated"
            );
            return Ok(candidate);
        }

        error!(%kind, seed, attempts = self.config.max_attempts, "scenario generation exhausted");
        Err(Error::GenerationExhausted {
            kind: kind.as_str(),
            attempts: self.config.max_attempts,
        })
    }

    fn draw_golden_beads(&self, rng: &mut Mulberry32, seed: u32) -> Scenario {
        let ranges = &self.config.golden_beads;
        let digits = GoldenBeadDigits {
            thousands: draw(rng, ranges.thousands),
            hundreds: draw(rng, ranges.hundreds),
            tens: draw(rng, ranges.tens),
            units: draw(rng, ranges.units),
        };
        let multiplier = draw(rng, ranges.multiplier);
        Scenario::GoldenBeads(GoldenBeadScenario::solve(seed, digits, multiplier))
    }

    fn draw_stamp_game(&self, rng: &mut Mulberry32, seed: u32) -> Scenario {
        let ranges = &self.config.stamp_game;
        let digits = StampGameDigits {
            hundreds: draw(rng, ranges.hundreds),
            tens: draw(rng, ranges.tens),
            units: draw(rng, ranges.units),
        };
        let multiplier = draw(rng, ranges.multiplier);
        Scenario::StampGame(StampGameScenario::solve(seed, digits, multiplier))
    }
}

fn draw(rng: &mut Mulberry32, range: DigitRange) -> u32 {
    rng.gen_range(range.min..=range.max)
}

/// Generate a scenario with the default configuration.
pub fn generate(kind: ManipulativeKind, seed: Option<u32>) -> Result<Scenario> {
    ScenarioGenerator::default().generate(kind, seed)
}
