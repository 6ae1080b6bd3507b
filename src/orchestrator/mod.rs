//! Turning gestures and async completions into dispatched actions.
//!
//! [`ActionCreator`] is the only component that talks to the word source and
//! the clock. Word fetches run as Tokio tasks; their results are queued and
//! only applied to the store by [`ActionCreator::pump`] or
//! [`ActionCreator::drain_ready`], which the caller runs on the same control
//! context as the gesture methods. Dispatches from one operation therefore
//! never interleave with another's.
//!
//! At most one start-game fetch and one check-win fetch are live at a time.
//! Starting another of the same kind, or calling [`ActionCreator::back`],
//! aborts the earlier task and discards any result it already queued.

mod bonus;
mod slot;

pub use bonus::time_bonus;
pub use slot::{OperationId, OperationKind};

use crate::config::GameConfig;
use crate::core::{Action, Page, Position, Word};
use crate::effects::{Clock, WordSource};
use crate::error::{ActionError, WordFetchError};
use crate::store::Store;
use slot::Slots;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// What happened to a completed fetch.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CompletionOutcome {
    /// The result was turned into actions.
    Applied(OperationKind),
    /// The operation had been cancelled or superseded; nothing was dispatched.
    Discarded(OperationKind),
}

struct Completion {
    kind: OperationKind,
    id: OperationId,
    result: Result<Word, WordFetchError>,
}

/// Orchestrates rounds on top of a [`Store`].
///
/// Gesture methods must be called from within a Tokio runtime, since word
/// fetches are spawned onto it.
pub struct ActionCreator {
    store: Store,
    words: Arc<dyn WordSource>,
    clock: Arc<dyn Clock>,
    config: GameConfig,
    slots: Mutex<Slots>,
    completion_tx: mpsc::UnboundedSender<Completion>,
    completion_rx: tokio::sync::Mutex<mpsc::UnboundedReceiver<Completion>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ActionCreator {
    pub fn new(
        store: Store,
        words: Arc<dyn WordSource>,
        clock: Arc<dyn Clock>,
        config: GameConfig,
    ) -> Self {
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        Self {
            store,
            words,
            clock,
            config,
            slots: Mutex::new(Slots::default()),
            completion_tx,
            completion_rx: tokio::sync::Mutex::new(completion_rx),
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Whether an operation of `kind` is in flight.
    pub fn is_busy(&self, kind: OperationKind) -> bool {
        lock(&self.slots).get(kind).is_busy()
    }

    /// Show the loading page and fetch the first word of a round.
    pub fn initiate_game(&self) {
        self.store.dispatch(Action::navigate(Page::Loading));
        self.start_fetch(OperationKind::StartGame);
    }

    /// Leave the lose page and start a new round.
    pub fn play_again(&self) {
        self.store.dispatch(Action::Back);
        self.initiate_game();
    }

    /// The round clock ran out.
    pub fn game_over(&self) {
        info!("round lost");
        self.store.dispatch(Action::replace(Page::Lose));
    }

    /// Cancel any in-flight fetch and go back one page.
    pub fn back(&self) {
        let cancelled = lock(&self.slots).cancel_all();
        for (kind, id) in cancelled {
            debug!(%id, kind = kind.name(), "cancelled in-flight operation");
        }
        self.store.dispatch(Action::Back);
    }

    pub fn dismiss_word_load_error(&self) {
        self.store.dispatch(Action::DismissLoadWordError);
    }

    pub fn left_letter_pressed(&self) -> Result<(), ActionError> {
        self.letter_pressed(Position::Left)
    }

    pub fn top_letter_pressed(&self) -> Result<(), ActionError> {
        self.letter_pressed(Position::Top)
    }

    pub fn right_letter_pressed(&self) -> Result<(), ActionError> {
        self.letter_pressed(Position::Right)
    }

    pub fn bottom_letter_pressed(&self) -> Result<(), ActionError> {
        self.letter_pressed(Position::Bottom)
    }

    /// Wait for the next fetch to finish and apply its result.
    ///
    /// The creator holds its own sender, so this never yields `None` while
    /// the creator is alive. With nothing in flight it waits for the next
    /// fetch to be started and finish; check [`is_busy`](Self::is_busy)
    /// first, or use [`drain_ready`](Self::drain_ready), when that is not
    /// wanted.
    pub async fn pump(&self) -> Option<CompletionOutcome> {
        let completion = self.completion_rx.lock().await.recv().await?;
        Some(self.apply_completion(completion))
    }

    /// Apply every result already queued, without waiting.
    ///
    /// Returns nothing while a [`pump`](Self::pump) call is waiting.
    pub fn drain_ready(&self) -> Vec<CompletionOutcome> {
        let mut outcomes = Vec::new();
        let Ok(mut rx) = self.completion_rx.try_lock() else {
            return outcomes;
        };
        while let Ok(completion) = rx.try_recv() {
            outcomes.push(self.apply_completion(completion));
        }
        outcomes
    }

    fn letter_pressed(&self, position: Position) -> Result<(), ActionError> {
        if self.store.state().game_state.is_none() {
            return Err(ActionError::NoActiveRound);
        }
        self.store.dispatch(Action::pressed(position));
        self.check_win()
    }

    fn check_win(&self) -> Result<(), ActionError> {
        let state = self.store.state();
        let round = state
            .game_state
            .as_ref()
            .ok_or(ActionError::NoActiveRound)?;

        let Some(candidate) = round.candidate() else {
            return Ok(());
        };

        if round.possible_answers.contains(&candidate) {
            info!(%candidate, "winning answer, fetching next word");
            self.start_fetch(OperationKind::CheckWin);
        } else {
            debug!(%candidate, "not an answer, resetting");
            self.store.dispatch(Action::ResetGame);
        }
        Ok(())
    }

    fn start_fetch(&self, kind: OperationKind) {
        let id = OperationId::new();
        let words = Arc::clone(&self.words);
        let completions = self.completion_tx.clone();

        // Registration must happen before any pump can see the result, so
        // the slot lock is held from spawn until `begin`.
        let mut slots = lock(&self.slots);
        let task = tokio::spawn(async move {
            let result = words.random_word().await;
            // The receiver lives as long as the creator; a send error only
            // means it has been dropped.
            let _ = completions.send(Completion { kind, id, result });
        });
        let superseded = slots.get_mut(kind).begin(id, task.abort_handle());
        drop(slots);
        if let Some(previous) = superseded {
            debug!(%previous, kind = kind.name(), "superseded in-flight operation");
        }
        debug!(%id, kind = kind.name(), "fetching word");
    }

    fn apply_completion(&self, completion: Completion) -> CompletionOutcome {
        let Completion { kind, id, result } = completion;

        if !lock(&self.slots).get_mut(kind).complete(id) {
            debug!(%id, kind = kind.name(), "discarding result of cancelled operation");
            return CompletionOutcome::Discarded(kind);
        }

        match (kind, result) {
            (OperationKind::StartGame, Ok(word)) => {
                let finish_time = self.clock.millis() + self.config.game_duration_ms;
                info!(word = word.text(), finish_time, "round started");
                self.store.dispatch(Action::InitGame { word, finish_time });
                self.store.dispatch(Action::replace(Page::Game));
            }
            (OperationKind::CheckWin, Ok(word)) => {
                let state = self.store.state();
                let Some(round) = state.game_state.as_ref() else {
                    warn!(%id, "round ended before the next word arrived");
                    return CompletionOutcome::Discarded(kind);
                };
                let bonus_time = time_bonus(round.finish_time, self.clock.millis(), &self.config);
                info!(
                    word = word.text(),
                    score = round.score.saturating_add(self.config.points_per_win),
                    bonus_time,
                    "round won"
                );
                self.store.dispatch(Action::NextGame {
                    word,
                    points: self.config.points_per_win,
                    bonus_time,
                });
            }
            (_, Err(err)) => {
                warn!(error = %err, kind = kind.name(), "word fetch failed");
                self.store.dispatch(Action::Back);
                self.store.dispatch(Action::LoadWordError);
            }
        }
        CompletionOutcome::Applied(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreConfig;
    use crate::core::{AppState, GamePhase, GameRound, PaginationState};
    use crate::effects::ManualClock;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::time::Duration;
    use tokio::sync::Semaphore;

    const START: i64 = 1_000;

    /// Returns scripted results in order. With a gate, each call first waits
    /// for a permit.
    struct ScriptedSource {
        results: Mutex<VecDeque<Result<Word, WordFetchError>>>,
        gate: Option<Semaphore>,
    }

    impl ScriptedSource {
        fn new(results: Vec<Result<Word, WordFetchError>>) -> Self {
            Self {
                results: Mutex::new(results.into()),
                gate: None,
            }
        }

        fn gated(results: Vec<Result<Word, WordFetchError>>) -> Self {
            Self {
                gate: Some(Semaphore::new(0)),
                ..Self::new(results)
            }
        }

        fn release(&self, n: usize) {
            if let Some(gate) = &self.gate {
                gate.add_permits(n);
            }
        }
    }

    #[async_trait]
    impl WordSource for ScriptedSource {
        async fn random_word(&self) -> Result<Word, WordFetchError> {
            if let Some(gate) = &self.gate {
                gate.acquire()
                    .await
                    .map_err(|e| WordFetchError::Unavailable(e.to_string()))?
                    .forget();
            }
            self.results
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(WordFetchError::Unavailable("script exhausted".into())))
        }
    }

    fn stop() -> Word {
        Word::new("stop", ["stop", "pots", "tops", "spot", "post", "opts"]).unwrap()
    }

    fn lamp() -> Word {
        Word::new("lamp", ["lamp", "palm"]).unwrap()
    }

    fn unavailable() -> Result<Word, WordFetchError> {
        Err(WordFetchError::Unavailable("offline".to_string()))
    }

    fn creator_with(source: Arc<ScriptedSource>) -> (ActionCreator, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(START));
        let creator = ActionCreator::new(
            Store::default(),
            source,
            Arc::clone(&clock) as Arc<dyn Clock>,
            GameConfig::default(),
        );
        (creator, clock)
    }

    fn state(creator: &ActionCreator) -> Arc<AppState> {
        creator.store().state()
    }

    async fn playing(words: Vec<Result<Word, WordFetchError>>) -> (ActionCreator, Arc<ManualClock>) {
        let (creator, clock) = creator_with(Arc::new(ScriptedSource::new(words)));
        creator.initiate_game();
        assert_eq!(
            creator.pump().await,
            Some(CompletionOutcome::Applied(OperationKind::StartGame))
        );
        (creator, clock)
    }

    /// Wait long enough for spawned fetches to run and queue their results.
    async fn settle() {
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    fn spell_post(creator: &ActionCreator) {
        // stop: left s, top t, right o, bottom p
        creator.bottom_letter_pressed().unwrap();
        creator.right_letter_pressed().unwrap();
        creator.left_letter_pressed().unwrap();
        creator.top_letter_pressed().unwrap();
    }

    #[tokio::test]
    async fn initiate_game_dispatches_start_sequence() {
        let (creator, _clock) = playing(vec![Ok(stop())]).await;

        assert_eq!(
            creator.store().log().actions(),
            vec![
                &Action::navigate(Page::Loading),
                &Action::InitGame {
                    word: stop(),
                    finish_time: START + 20_000,
                },
                &Action::replace(Page::Game),
            ]
        );
        let state = state(&creator);
        assert_eq!(state.current_page(), Page::Game);
        assert_eq!(state.pagination_state.history, vec![Page::Menu]);
        assert_eq!(state.phase(), GamePhase::Playing);
        assert!(!creator.is_busy(OperationKind::StartGame));
    }

    #[tokio::test]
    async fn failed_start_returns_to_menu_with_error() {
        let (creator, _clock) = creator_with(Arc::new(ScriptedSource::new(vec![unavailable()])));
        creator.initiate_game();
        creator.pump().await;

        assert_eq!(
            creator.store().log().actions(),
            vec![
                &Action::navigate(Page::Loading),
                &Action::Back,
                &Action::LoadWordError,
            ]
        );
        let state = state(&creator);
        assert_eq!(state.current_page(), Page::Menu);
        assert!(state.load_error);

        creator.dismiss_word_load_error();
        assert!(!creator.store().state().load_error);
    }

    #[tokio::test]
    async fn invalid_word_counts_as_fetch_failure() {
        let invalid = Word::new("toolong", ["x"]).unwrap_err();
        let (creator, _clock) =
            creator_with(Arc::new(ScriptedSource::new(vec![Err(invalid.into())])));
        creator.initiate_game();
        creator.pump().await;

        assert!(state(&creator).load_error);
        assert!(state(&creator).game_state.is_none());
    }

    #[tokio::test]
    async fn letter_press_without_round_fails_fast() {
        let (creator, _clock) = creator_with(Arc::new(ScriptedSource::new(Vec::new())));

        assert_eq!(
            creator.left_letter_pressed(),
            Err(ActionError::NoActiveRound)
        );
        assert!(creator.store().log().is_empty());
    }

    #[tokio::test]
    async fn incomplete_answer_waits_for_more_letters() {
        let (creator, _clock) = playing(vec![Ok(stop())]).await;

        creator.left_letter_pressed().unwrap();
        creator.top_letter_pressed().unwrap();

        let state = state(&creator);
        assert_eq!(state.game_state.as_ref().unwrap().answer_text(), "st");
        assert!(!creator.is_busy(OperationKind::CheckWin));
    }

    #[tokio::test]
    async fn wrong_answer_resets_synchronously() {
        let (creator, _clock) = playing(vec![Ok(stop())]).await;

        // "sstt" is not an arrangement of "stop"
        creator.left_letter_pressed().unwrap();
        creator.left_letter_pressed().unwrap();
        creator.top_letter_pressed().unwrap();
        creator.top_letter_pressed().unwrap();

        assert_eq!(
            creator.store().log().last().map(|r| r.action.clone()),
            Some(Action::ResetGame)
        );
        let round = state(&creator).game_state.clone().unwrap();
        assert!(round.answer.is_empty());
        assert_eq!(round.score, 0);
        assert!(!creator.is_busy(OperationKind::CheckWin));
    }

    #[tokio::test]
    async fn winning_answer_awards_point_and_full_bonus() {
        let (creator, clock) = playing(vec![Ok(stop()), Ok(lamp())]).await;
        // 3s left on the clock
        clock.set(START + 17_000);

        spell_post(&creator);
        assert!(creator.is_busy(OperationKind::CheckWin));
        assert_eq!(
            creator.pump().await,
            Some(CompletionOutcome::Applied(OperationKind::CheckWin))
        );

        assert_eq!(
            creator.store().log().last().map(|r| r.action.clone()),
            Some(Action::NextGame {
                word: lamp(),
                points: 1,
                bonus_time: 5_000,
            })
        );
        let round = state(&creator).game_state.clone().unwrap();
        assert_eq!(round.score, 1);
        assert!(round.answer.is_empty());
        assert_eq!(round.finish_time, START + 25_000);
        assert!(round.possible_answers.contains("palm"));
    }

    #[tokio::test]
    async fn bonus_never_exceeds_full_round() {
        let (creator, clock) = playing(vec![Ok(stop()), Ok(lamp())]).await;
        // 18s left on the clock
        clock.set(START + 2_000);

        spell_post(&creator);
        creator.pump().await;

        let round = state(&creator).game_state.clone().unwrap();
        assert_eq!(round.finish_time, START + 22_000);
        assert_eq!(round.finish_time - clock.millis(), 20_000);
    }

    #[tokio::test]
    async fn failed_next_word_returns_to_menu_with_error() {
        let (creator, _clock) = playing(vec![Ok(stop()), unavailable()]).await;

        spell_post(&creator);
        creator.pump().await;

        let state = state(&creator);
        assert_eq!(state.current_page(), Page::Menu);
        assert!(state.game_state.is_none());
        assert!(state.load_error);
    }

    #[tokio::test]
    async fn back_cancels_pending_start() {
        let source = Arc::new(ScriptedSource::gated(vec![Ok(stop())]));
        let (creator, _clock) = creator_with(Arc::clone(&source));

        creator.initiate_game();
        assert!(creator.is_busy(OperationKind::StartGame));
        creator.back();
        assert!(!creator.is_busy(OperationKind::StartGame));

        source.release(1);
        settle().await;

        assert!(creator.drain_ready().is_empty());
        assert_eq!(
            creator.store().log().actions(),
            vec![&Action::navigate(Page::Loading), &Action::Back]
        );
        assert_eq!(state(&creator).current_page(), Page::Menu);
    }

    #[tokio::test]
    async fn back_discards_result_already_queued() {
        let (creator, _clock) = creator_with(Arc::new(ScriptedSource::new(vec![Ok(stop())])));

        creator.initiate_game();
        settle().await;
        creator.back();

        assert_eq!(
            creator.drain_ready(),
            vec![CompletionOutcome::Discarded(OperationKind::StartGame)]
        );
        assert_eq!(
            creator.store().log().actions(),
            vec![&Action::navigate(Page::Loading), &Action::Back]
        );
        assert!(state(&creator).game_state.is_none());
    }

    #[tokio::test]
    async fn back_cancels_pending_win_check() {
        let source = Arc::new(ScriptedSource::new(vec![Ok(stop()), Ok(lamp())]));
        let (creator, _clock) = creator_with(Arc::clone(&source));
        creator.initiate_game();
        creator.pump().await;

        spell_post(&creator);
        settle().await;
        creator.back();

        assert_eq!(
            creator.drain_ready(),
            vec![CompletionOutcome::Discarded(OperationKind::CheckWin)]
        );
        let log = creator.store().log();
        assert!(!log
            .actions()
            .iter()
            .any(|a| matches!(a, Action::NextGame { .. })));
        assert_eq!(state(&creator).phase(), GamePhase::Idle);
    }

    #[tokio::test]
    async fn new_start_supersedes_pending_one() {
        let source = Arc::new(ScriptedSource::gated(vec![Ok(stop())]));
        let (creator, _clock) = creator_with(Arc::clone(&source));

        creator.initiate_game();
        creator.initiate_game();
        source.release(2);

        assert_eq!(
            creator.pump().await,
            Some(CompletionOutcome::Applied(OperationKind::StartGame))
        );
        settle().await;
        assert!(creator.drain_ready().is_empty());

        let inits = creator
            .store()
            .log()
            .actions()
            .into_iter()
            .filter(|a| matches!(a, Action::InitGame { .. }))
            .count();
        assert_eq!(inits, 1);
    }

    #[tokio::test]
    async fn game_over_then_play_again_starts_fresh_round() {
        let (creator, _clock) = playing(vec![Ok(stop()), Ok(lamp()), Ok(stop())]).await;
        spell_post(&creator);
        creator.pump().await;

        creator.game_over();
        let lost = state(&creator);
        assert_eq!(lost.current_page(), Page::Lose);
        assert_eq!(lost.pagination_state.history, vec![Page::Menu]);
        assert_eq!(lost.phase(), GamePhase::Lost);

        creator.play_again();
        let loading = state(&creator);
        assert_eq!(loading.current_page(), Page::Loading);
        assert_eq!(loading.pagination_state.history, vec![Page::Menu]);
        assert!(loading.game_state.is_none());

        creator.pump().await;
        let round = state(&creator).game_state.clone().unwrap();
        assert_eq!(round.score, 0);
        assert_eq!(state(&creator).current_page(), Page::Game);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_pump_never_loses_start_result() {
        for _ in 0..200 {
            let source = Arc::new(ScriptedSource::new(vec![Ok(stop())]));
            let (creator, _clock) = creator_with(source);
            let creator = Arc::new(creator);

            let pumper = Arc::clone(&creator);
            let pumping = tokio::spawn(async move { pumper.pump().await });
            creator.initiate_game();

            assert_eq!(
                pumping.await.unwrap(),
                Some(CompletionOutcome::Applied(OperationKind::StartGame))
            );
            assert_eq!(state(&creator).current_page(), Page::Game);
            assert!(!creator.is_busy(OperationKind::StartGame));
        }
    }

    #[tokio::test]
    async fn win_after_round_left_is_discarded() {
        let source = Arc::new(ScriptedSource::gated(vec![Ok(stop()), Ok(lamp())]));
        let (creator, _clock) = creator_with(Arc::clone(&source));
        creator.initiate_game();
        source.release(1);
        creator.pump().await;

        spell_post(&creator);
        assert!(creator.is_busy(OperationKind::CheckWin));
        creator.game_over();
        creator.store().dispatch(Action::Back);
        source.release(1);

        assert_eq!(
            creator.pump().await,
            Some(CompletionOutcome::Discarded(OperationKind::CheckWin))
        );
        assert!(!creator
            .store()
            .log()
            .actions()
            .iter()
            .any(|a| matches!(a, Action::NextGame { .. })));
        assert!(state(&creator).game_state.is_none());
        assert_eq!(state(&creator).current_page(), Page::Menu);
    }

    #[tokio::test]
    async fn win_at_maximum_score_saturates() {
        let _subscriber =
            tracing::subscriber::set_default(tracing_subscriber::fmt().with_test_writer().finish());

        let initial = AppState {
            pagination_state: PaginationState::new(Page::Game, vec![Page::Menu]),
            game_state: Some(GameRound::new(&stop(), START + 20_000, u32::MAX)),
            load_error: false,
        };
        let creator = ActionCreator::new(
            Store::with_state(initial, StoreConfig::default()),
            Arc::new(ScriptedSource::new(vec![Ok(lamp())])),
            Arc::new(ManualClock::new(START)),
            GameConfig::default(),
        );

        spell_post(&creator);

        assert_eq!(
            creator.pump().await,
            Some(CompletionOutcome::Applied(OperationKind::CheckWin))
        );
        assert_eq!(state(&creator).game_state.as_ref().unwrap().score, u32::MAX);
    }
}
