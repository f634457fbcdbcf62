//! O Oráculo de Eduarda - interactive birthday card TUI.
//!
//! An intro screen, a spirit-hunt mini-game, and an AI-generated reveal,
//! rendered in the terminal.
//!
//! # Headless Mode
//!
//! Run with `--headless` to play the experience without a TUI:
//!
//! ```bash
//! cargo run -p card -- --headless
//! ```

mod app;
mod events;
mod headless;
mod ui;
mod worker;

use std::io::{self, stdout};
use std::sync::Arc;
use std::time::Duration;

use card_core::{GeminiOracle, Oracle};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use app::App;
use events::{handle_event, EventResult};
use ui::render::render;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string()))
        .with_writer(io::stderr)
        .init();

    // Check for API key
    if std::env::var("GEMINI_API_KEY").is_err() {
        eprintln!("Error: GEMINI_API_KEY environment variable not set.");
        eprintln!("Please set it in .env file or with: export GEMINI_API_KEY=your_key_here");
        std::process::exit(1);
    }

    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    // The single oracle instance for the whole process.
    let oracle: Arc<dyn Oracle> = Arc::new(GeminiOracle::from_env()?);

    if args.iter().any(|a| a == "--headless") {
        return headless::run_headless(oracle).await;
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (request_tx, response_rx) = worker::spawn(oracle);
    let result = run_app(&mut terminal, App::new(request_tx, response_rx)).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
) -> io::Result<()> {
    loop {
        // Drive the completion-delay timer and drain worker responses.
        app.pump();

        terminal.draw(|f| render(f, &app))?;

        // Poll for events with timeout for animations
        if event::poll(Duration::from_millis(100))? {
            let ev = event::read()?;
            if handle_event(&mut app, ev) == EventResult::Quit {
                return Ok(());
            }
        } else {
            app.tick();
        }
    }
}

fn print_help() {
    println!("O Oráculo de Eduarda - interactive birthday card");
    println!();
    println!("USAGE:");
    println!("  card [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("  -h, --help       Show this help message");
    println!("  --headless       Play the experience without a TUI");
    println!();
    println!("ENVIRONMENT:");
    println!("  GEMINI_API_KEY   Required. Read once at startup.");
    println!("  RUST_LOG         Optional tracing filter (default: warn)");
}
