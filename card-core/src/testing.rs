//! Testing utilities for the experience.
//!
//! This module provides tools for integration testing:
//! - `MockOracle` for deterministic testing without API calls
//! - `TestHarness` for scripted end-to-end scenarios
//! - Assertion helpers for verifying phase state

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::content::{BirthdayContent, GeneratedImage};
use crate::experience::{Catch, Experience, Phase, PhaseError};
use crate::hunt::SPIRIT_COUNT;
use crate::oracle::{Oracle, OracleError};

/// A sample message in the shape the real oracle produces.
pub fn sample_content() -> BirthdayContent {
    BirthdayContent {
        title: "A Invocadora da Luz Eterna".to_string(),
        message: "Nem os Aliens Serpo seguram essa energia. Feliz aniversário!".to_string(),
        poem: "mármore rachado / a aura teal desperta / espíritos dançam".to_string(),
    }
}

/// A sample artwork with a valid base64 payload.
pub fn sample_artwork() -> GeneratedImage {
    GeneratedImage {
        media_type: "image/png".to_string(),
        data: "iVBORw0KGgo=".to_string(),
    }
}

/// An oracle that returns scripted outcomes.
///
/// Each call pops the next queued outcome; an empty queue yields the
/// sample artifact, so happy-path tests need no scripting at all.
#[derive(Default)]
pub struct MockOracle {
    messages: Mutex<VecDeque<Result<BirthdayContent, OracleError>>>,
    artworks: Mutex<VecDeque<Result<GeneratedImage, OracleError>>>,
}

impl MockOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an outcome for the next message call.
    pub fn queue_message(&self, outcome: Result<BirthdayContent, OracleError>) {
        self.messages.lock().unwrap().push_back(outcome);
    }

    /// Queue an outcome for the next artwork call.
    pub fn queue_artwork(&self, outcome: Result<GeneratedImage, OracleError>) {
        self.artworks.lock().unwrap().push_back(outcome);
    }

    /// Queue a failure for the next message call.
    pub fn fail_next_message(&self) {
        self.queue_message(Err(OracleError::EmptyContent));
    }

    /// Queue a failure for the next artwork call.
    pub fn fail_next_artwork(&self) {
        self.queue_artwork(Err(OracleError::MissingImage));
    }
}

#[async_trait]
impl Oracle for MockOracle {
    async fn birthday_message(&self) -> Result<BirthdayContent, OracleError> {
        self.messages
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(sample_content()))
    }

    async fn artwork(&self) -> Result<GeneratedImage, OracleError> {
        self.artworks
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(sample_artwork()))
    }
}

/// Test harness for running scripted experience scenarios.
pub struct TestHarness {
    /// The scripted oracle.
    pub oracle: MockOracle,
    /// The experience under test.
    pub experience: Experience,
    rng: StdRng,
}

impl TestHarness {
    /// Create a harness with a deterministic spirit layout.
    pub fn new() -> Self {
        Self {
            oracle: MockOracle::new(),
            experience: Experience::new(),
            rng: StdRng::seed_from_u64(0xCAFE),
        }
    }

    /// Begin the hunt.
    pub fn begin(&mut self) {
        self.experience
            .begin(&mut self.rng)
            .expect("begin should be valid from intro");
    }

    /// Catch every remaining spirit, in id order.
    pub fn catch_all(&mut self) -> Catch {
        let mut last = Catch::OutOfPhase;
        for id in 0..SPIRIT_COUNT {
            last = self.experience.catch_spirit(id);
        }
        last
    }

    /// Run one full generation attempt through the scripted oracle.
    pub async fn generate(&mut self) -> Result<(), PhaseError> {
        self.experience.generate(&self.oracle).await
    }

    /// Name of the current phase.
    pub fn phase_name(&self) -> &'static str {
        self.experience.phase().name()
    }

    /// The revealed artifacts, if in the reveal phase.
    pub fn revealed(&self) -> Option<(&BirthdayContent, &GeneratedImage)> {
        match self.experience.phase() {
            Phase::Reveal { content, artwork } => Some((content, artwork)),
            _ => None,
        }
    }

    /// The user-facing error message, if in the error phase.
    pub fn error_message(&self) -> Option<&str> {
        match self.experience.phase() {
            Phase::Error { message } => Some(message),
            _ => None,
        }
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Assertion Helpers
// ============================================================================

/// Assert the harness is in the named phase.
#[track_caller]
pub fn assert_phase(harness: &TestHarness, expected: &str) {
    assert_eq!(
        harness.phase_name(),
        expected,
        "expected phase '{expected}', got '{}'",
        harness.phase_name()
    );
}

/// Assert the reveal shows both artifacts.
#[track_caller]
pub fn assert_revealed(harness: &TestHarness) {
    assert!(
        harness.revealed().is_some(),
        "expected reveal phase with both artifacts, got '{}'",
        harness.phase_name()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::experience::GENERATION_FAILED_MESSAGE;

    #[tokio::test]
    async fn test_mock_oracle_defaults_to_samples() {
        let oracle = MockOracle::new();
        let content = oracle.birthday_message().await.unwrap();
        assert_eq!(content, sample_content());

        let artwork = oracle.artwork().await.unwrap();
        assert_eq!(artwork, sample_artwork());
    }

    #[tokio::test]
    async fn test_mock_oracle_scripted_outcomes_in_order() {
        let oracle = MockOracle::new();
        oracle.queue_message(Ok(BirthdayContent {
            title: "Primeira".to_string(),
            message: "m".to_string(),
            poem: "p".to_string(),
        }));
        oracle.fail_next_message();

        assert_eq!(oracle.birthday_message().await.unwrap().title, "Primeira");
        assert!(oracle.birthday_message().await.is_err());
        // Exhausted queue falls back to the sample.
        assert!(oracle.birthday_message().await.is_ok());
    }

    #[tokio::test]
    async fn test_harness_happy_path() {
        let mut harness = TestHarness::new();
        harness.begin();
        assert_phase(&harness, "hunting");

        assert_eq!(harness.catch_all(), Catch::HuntComplete);
        harness.generate().await.unwrap();
        assert_revealed(&harness);
    }

    #[tokio::test]
    async fn test_harness_error_path() {
        let mut harness = TestHarness::new();
        harness.begin();
        harness.catch_all();
        harness.oracle.fail_next_artwork();

        harness.generate().await.unwrap();
        assert_phase(&harness, "error");
        assert_eq!(harness.error_message(), Some(GENERATION_FAILED_MESSAGE));
    }
}
