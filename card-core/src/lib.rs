//! Interactive birthday-card experience engine.
//!
//! This crate provides:
//! - The screen state machine (intro, hunting, generating, reveal, error)
//! - The spirit-hunt mini-game
//! - Oracle orchestration over the Gemini API, with a mockable seam
//!
//! # Quick Start
//!
//! ```ignore
//! use card_core::{Experience, GeminiOracle};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let oracle = GeminiOracle::from_env()?;
//!     let mut experience = Experience::new();
//!
//!     experience.begin(&mut rand::thread_rng())?;
//!     for id in 0..card_core::SPIRIT_COUNT {
//!         experience.catch_spirit(id);
//!     }
//!
//!     experience.generate(&oracle).await?;
//!     println!("{:?}", experience.phase());
//!     Ok(())
//! }
//! ```

pub mod content;
pub mod experience;
pub mod hunt;
pub mod oracle;
pub mod testing;

// Primary public API
pub use content::{BirthdayContent, GeneratedImage};
pub use experience::{Catch, Experience, Phase, PhaseError, GENERATION_FAILED_MESSAGE};
pub use hunt::{Hunt, Spirit, SPIRIT_COUNT};
pub use oracle::{conjure, GeminiOracle, Oracle, OracleError};
pub use testing::{MockOracle, TestHarness};
