//! Headless mode for the card experience.
//!
//! Plays the whole experience without a TUI: spawns the hunt, catches
//! every spirit, runs generation, and prints the reveal. Designed for
//! automated smoke testing.

use std::sync::Arc;

use card_core::{Experience, Oracle, Phase, SPIRIT_COUNT};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Run the experience end to end on stdout.
pub async fn run_headless(oracle: Arc<dyn Oracle>) -> Result<(), Box<dyn std::error::Error>> {
    println!("=== O Oráculo de Eduarda (headless) ===");
    println!();

    let mut experience = Experience::new();
    let mut rng = StdRng::from_entropy();
    experience.begin(&mut rng)?;

    if let Some(hunt) = experience.hunt() {
        for spirit in hunt.spirits() {
            println!(
                "[SPIRIT] fragmento {} em ({:.1}%, {:.1}%)",
                spirit.id + 1,
                spirit.x,
                spirit.y
            );
        }
    }

    for id in 0..SPIRIT_COUNT {
        experience.catch_spirit(id);
        println!("[CAUGHT] fragmento {} selado", id + 1);
    }

    println!();
    println!("[GENERATING] invocando o oráculo...");
    experience.generate(oracle.as_ref()).await?;

    match experience.phase() {
        Phase::Reveal { content, artwork } => {
            println!();
            println!("=== {} ===", content.title);
            println!();
            println!("{}", content.message);
            println!();
            println!("Profecia: {}", content.poem);

            let path = format!("oraculo-eduarda.{}", artwork.extension());
            std::fs::write(&path, artwork.bytes()?)?;
            println!();
            println!("[ART] salva em {path}");
            Ok(())
        }
        Phase::Error { message } => {
            println!("[ERROR] {message}");
            Err(message.clone().into())
        }
        other => unreachable!("generation left the experience in {}", other.name()),
    }
}
