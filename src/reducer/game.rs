//! Round-in-progress slice.

use super::Reducer;
use crate::core::{Action, GameRound};

/// Tracks the round being played.
///
/// Letter presses with no round, or with a full answer, change nothing.
/// Guarding against them is the orchestrator's job.
#[derive(Clone, Copy, Debug, Default)]
pub struct GameReducer;

impl Reducer for GameReducer {
    type Slice = Option<GameRound>;

    fn reduce(&self, action: &Action, state: &Option<GameRound>) -> Option<GameRound> {
        let round = match (action, state) {
            (Action::InitGame { word, finish_time }, _) => {
                let score = state.as_ref().map_or(0, |round| round.score);
                return Some(GameRound::new(word, *finish_time, score));
            }
            (Action::Back, _) => return None,
            (_, None) => return None,
            (_, Some(round)) => round,
        };

        match action {
            Action::ResetGame => Some(GameRound {
                answer: Vec::new(),
                ..round.clone()
            }),
            Action::NextGame {
                word,
                points,
                bonus_time,
            } => Some(GameRound {
                answer: Vec::new(),
                possible_answers: word.possible_answers().clone(),
                layout: word.layout(),
                finish_time: round.finish_time + bonus_time,
                score: round.score.saturating_add(*points),
            }),
            _ => match action.pressed_position() {
                Some(position) if !round.is_answer_complete() => {
                    let mut answer = round.answer.clone();
                    answer.push(round.layout.letter_at(position));
                    Some(GameRound {
                        answer,
                        ..round.clone()
                    })
                }
                _ => Some(round.clone()),
            },
        }
    }
}
