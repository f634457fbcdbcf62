//! The screen state machine driving the experience.
//!
//! Each phase variant carries only the data that is valid in that phase,
//! so a "reveal with only half the artifacts" cannot be represented. Every
//! transition bumps an epoch; asynchronous completions must present the
//! epoch they were issued under, and results from an older epoch are
//! dropped without touching state.

use rand::Rng;
use thiserror::Error;

use crate::content::{BirthdayContent, GeneratedImage};
use crate::hunt::Hunt;
use crate::oracle::{conjure, Oracle, OracleError};

/// The fixed user-facing message shown when generation fails.
///
/// The underlying error never crosses into the presentation layer; it is
/// logged on the tracing side channel instead.
pub const GENERATION_FAILED_MESSAGE: &str =
    "Interferência alienígena detectada. O sinal falhou.";

/// The current top-level mode of the experience.
#[derive(Debug, Clone)]
pub enum Phase {
    Intro,
    Hunting(Hunt),
    Generating,
    Reveal {
        content: BirthdayContent,
        artwork: GeneratedImage,
    },
    Error {
        message: String,
    },
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Intro => "intro",
            Phase::Hunting(_) => "hunting",
            Phase::Generating => "generating",
            Phase::Reveal { .. } => "reveal",
            Phase::Error { .. } => "error",
        }
    }
}

/// Errors from invalid phase transitions.
#[derive(Debug, Error)]
pub enum PhaseError {
    #[error("cannot {action} during the {phase} phase")]
    InvalidTransition {
        action: &'static str,
        phase: &'static str,
    },

    #[error("the hunt is not finished yet ({caught}/{total} spirits caught)")]
    HuntUnfinished { caught: u8, total: u8 },
}

/// Outcome of a catch attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Catch {
    /// A spirit was caught; some remain.
    Caught { remaining: u8 },
    /// That was the last spirit. Fires exactly once per hunt.
    HuntComplete,
    /// The id was already gone or never existed.
    AlreadyGone,
    /// Not currently hunting; stale input is ignored.
    OutOfPhase,
}

/// The experience state machine.
pub struct Experience {
    phase: Phase,
    epoch: u64,
}

impl Experience {
    pub fn new() -> Self {
        Self {
            phase: Phase::Intro,
            epoch: 0,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// The current transition epoch.
    ///
    /// Timers and async completions scheduled against an older epoch must
    /// not be applied.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// The live hunt, if currently hunting.
    pub fn hunt(&self) -> Option<&Hunt> {
        match &self.phase {
            Phase::Hunting(hunt) => Some(hunt),
            _ => None,
        }
    }

    /// Start the hunt with a fresh batch of spirits. Valid from Intro.
    pub fn begin(&mut self, rng: &mut impl Rng) -> Result<(), PhaseError> {
        match self.phase {
            Phase::Intro => {
                self.transition(Phase::Hunting(Hunt::spawn(rng)));
                Ok(())
            }
            _ => Err(self.invalid("begin the hunt")),
        }
    }

    /// Catch a spirit. Valid only while hunting; anything else is ignored.
    ///
    /// The state machine owns the win condition: completion is reported
    /// here, but moving on to generation is a separate, explicit call so
    /// the front-end can let a final cue play first.
    pub fn catch_spirit(&mut self, id: u8) -> Catch {
        let Phase::Hunting(hunt) = &mut self.phase else {
            return Catch::OutOfPhase;
        };

        if !hunt.catch(id) {
            return Catch::AlreadyGone;
        }

        if hunt.is_complete() {
            Catch::HuntComplete
        } else {
            Catch::Caught {
                remaining: hunt.total() - hunt.caught(),
            }
        }
    }

    /// Move into the generating phase.
    ///
    /// Valid from a completed hunt, or from the error phase (manual
    /// retry, no backoff, no attempt limit). Returns the new epoch, which
    /// must accompany the eventual [`resolve_generation`] call.
    ///
    /// [`resolve_generation`]: Experience::resolve_generation
    pub fn start_generation(&mut self) -> Result<u64, PhaseError> {
        match &self.phase {
            Phase::Hunting(hunt) => {
                if !hunt.is_complete() {
                    return Err(PhaseError::HuntUnfinished {
                        caught: hunt.caught(),
                        total: hunt.total(),
                    });
                }
                self.transition(Phase::Generating);
                Ok(self.epoch)
            }
            Phase::Error { .. } => {
                self.transition(Phase::Generating);
                Ok(self.epoch)
            }
            _ => Err(self.invalid("start generation")),
        }
    }

    /// Apply the outcome of a generation attempt.
    ///
    /// Returns `false` (and changes nothing) when the epoch is stale or
    /// the phase has already moved on. On failure the error detail is
    /// logged and replaced with [`GENERATION_FAILED_MESSAGE`].
    pub fn resolve_generation(
        &mut self,
        epoch: u64,
        outcome: Result<(BirthdayContent, GeneratedImage), OracleError>,
    ) -> bool {
        if epoch != self.epoch || !matches!(self.phase, Phase::Generating) {
            tracing::debug!(
                stale_epoch = epoch,
                current_epoch = self.epoch,
                phase = self.phase.name(),
                "discarding stale generation result"
            );
            return false;
        }

        match outcome {
            Ok((content, artwork)) => {
                self.transition(Phase::Reveal { content, artwork });
            }
            Err(error) => {
                tracing::error!(%error, "generation failed");
                self.transition(Phase::Error {
                    message: GENERATION_FAILED_MESSAGE.to_string(),
                });
            }
        }
        true
    }

    /// Run a full generation attempt against the given oracle.
    ///
    /// Convenience for drivers without their own scheduling (headless
    /// mode, tests): transitions into Generating, joins both calls, and
    /// applies the outcome.
    pub async fn generate(&mut self, oracle: &dyn Oracle) -> Result<(), PhaseError> {
        let epoch = self.start_generation()?;
        let outcome = conjure(oracle).await;
        self.resolve_generation(epoch, outcome);
        Ok(())
    }

    /// Full reset back to the intro. Valid from Reveal.
    pub fn reset(&mut self) -> Result<(), PhaseError> {
        match self.phase {
            Phase::Reveal { .. } => {
                self.transition(Phase::Intro);
                Ok(())
            }
            _ => Err(self.invalid("reset")),
        }
    }

    fn transition(&mut self, next: Phase) {
        tracing::debug!(from = self.phase.name(), to = next.name(), "phase transition");
        self.phase = next;
        self.epoch += 1;
    }

    fn invalid(&self, action: &'static str) -> PhaseError {
        PhaseError::InvalidTransition {
            action,
            phase: self.phase.name(),
        }
    }
}

impl Default for Experience {
    fn default() -> Self {
        Self::new()
    }
}
