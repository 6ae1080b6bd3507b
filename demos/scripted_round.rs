//! Scripted Round
//!
//! Plays a short session against an in-memory word list and prints each
//! state the store publishes.
//!
//! Run with: RUST_LOG=fourletters=debug cargo run --example scripted_round

use fourletters::config::GameConfig;
use fourletters::effects::{StaticWordSource, SystemClock};
use fourletters::orchestrator::ActionCreator;
use fourletters::store::Store;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Scripted Round ===\n");

    let words = StaticWordSource::from_pairs(&[
        ("stop", &["stop", "pots", "tops", "spot", "post", "opts"]),
        ("lamp", &["lamp", "palm"]),
    ])?;
    let store = Store::default();
    let _subscription = store.subscribe(|state| {
        let answer = state
            .game_state
            .as_ref()
            .map(|round| format!("answer={:?} score={}", round.answer_text(), round.score))
            .unwrap_or_default();
        println!(
            "  [{}] page={} {}",
            state.phase().name(),
            state.current_page(),
            answer
        );
    });

    let creator = ActionCreator::new(
        store,
        Arc::new(words),
        Arc::new(SystemClock),
        GameConfig::default(),
    );

    println!("Starting a game:");
    creator.initiate_game();
    creator.pump().await;

    println!("\nA miss (s-s-t-t):");
    creator.left_letter_pressed()?;
    creator.left_letter_pressed()?;
    creator.top_letter_pressed()?;
    creator.top_letter_pressed()?;

    println!("\nA win (p-o-s-t):");
    creator.bottom_letter_pressed()?;
    creator.right_letter_pressed()?;
    creator.left_letter_pressed()?;
    creator.top_letter_pressed()?;
    creator.pump().await;

    println!("\nTime runs out:");
    creator.game_over();
    creator.back();

    println!("\n=== Example Complete ===");
    Ok(())
}
