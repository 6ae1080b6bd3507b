//! End-to-end rounds driven through the public API, observed the way a
//! presentation layer would: by subscribing to the store.

use fourletters::config::GameConfig;
use fourletters::core::{GamePhase, Page};
use fourletters::effects::{Clock, ManualClock, StaticWordSource};
use fourletters::orchestrator::{ActionCreator, CompletionOutcome, OperationKind};
use fourletters::store::Store;
use std::sync::{Arc, Mutex};

fn creator(clock: Arc<ManualClock>) -> ActionCreator {
    let words = StaticWordSource::from_pairs(&[
        ("stop", &["stop", "pots", "tops", "spot", "post", "opts"]),
        ("lamp", &["lamp", "palm"]),
    ])
    .unwrap();
    ActionCreator::new(
        Store::default(),
        Arc::new(words),
        clock,
        GameConfig::default(),
    )
}

#[tokio::test]
async fn subscriber_sees_every_phase_of_a_session() {
    let clock = Arc::new(ManualClock::new(0));
    let creator = creator(Arc::clone(&clock));

    let phases = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&phases);
    let _subscription = creator.store().subscribe(move |state| {
        let mut phases = sink.lock().unwrap();
        if phases.last() != Some(&state.phase()) {
            phases.push(state.phase());
        }
    });

    creator.initiate_game();
    creator.pump().await;

    // First word is "stop": spell "tops".
    creator.top_letter_pressed().unwrap();
    creator.right_letter_pressed().unwrap();
    creator.bottom_letter_pressed().unwrap();
    creator.left_letter_pressed().unwrap();
    assert_eq!(
        creator.pump().await,
        Some(CompletionOutcome::Applied(OperationKind::CheckWin))
    );

    // Second word is "lamp": spell "palm".
    clock.advance(19_000);
    creator.bottom_letter_pressed().unwrap();
    creator.top_letter_pressed().unwrap();
    creator.left_letter_pressed().unwrap();
    creator.right_letter_pressed().unwrap();
    creator.pump().await;

    let state = creator.store().state();
    let round = state.game_state.as_ref().unwrap();
    assert_eq!(round.score, 2);
    // 1s left plus a 5s bonus
    assert_eq!(round.finish_time - clock.millis(), 6_000);

    creator.game_over();
    creator.back();

    assert_eq!(
        *phases.lock().unwrap(),
        vec![
            GamePhase::Loading,
            GamePhase::Playing,
            GamePhase::Lost,
            GamePhase::Idle
        ]
    );
    assert_eq!(creator.store().state().current_page(), Page::Menu);
}

#[tokio::test]
async fn snapshots_handed_out_never_change() {
    let creator = creator(Arc::new(ManualClock::new(0)));
    let before = creator.store().state();

    creator.initiate_game();
    creator.pump().await;

    assert_eq!(before.current_page(), Page::Menu);
    assert!(before.game_state.is_none());
    assert_eq!(creator.store().state().current_page(), Page::Game);
}
