//! Time bonus arithmetic.

use crate::config::GameConfig;

/// Milliseconds to add to a round's deadline after a win.
///
/// A win is worth `time_bonus_ms`, but the time left afterwards never
/// exceeds `game_duration_ms`, so quick repeated wins cannot bank time. The
/// result is negative when the clock already shows more than a full round.
///
/// # Example
///
/// ```rust
/// use fourletters::config::GameConfig;
/// use fourletters::orchestrator::time_bonus;
///
/// let config = GameConfig::default();
/// let now = 100_000;
///
/// // 3s left: the full 5s bonus fits under the 20s cap.
/// assert_eq!(time_bonus(now + 3_000, now, &config), 5_000);
/// // 18s left: only 2s fit.
/// assert_eq!(time_bonus(now + 18_000, now, &config), 2_000);
/// ```
pub fn time_bonus(old_finish_time: i64, now: i64, config: &GameConfig) -> i64 {
    let time_remaining = old_finish_time - now;
    let new_finish_time =
        now + (time_remaining + config.time_bonus_ms).min(config.game_duration_ms);
    new_finish_time - old_finish_time
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_000_000;

    #[test]
    fn full_bonus_when_under_cap() {
        let config = GameConfig::default();
        assert_eq!(time_bonus(NOW + 3_000, NOW, &config), 5_000);
    }

    #[test]
    fn partial_bonus_when_cap_reached() {
        let config = GameConfig::default();
        assert_eq!(time_bonus(NOW + 18_000, NOW, &config), 2_000);
    }

    #[test]
    fn exactly_at_cap_gets_full_bonus() {
        let config = GameConfig::default();
        assert_eq!(time_bonus(NOW + 15_000, NOW, &config), 5_000);
    }

    #[test]
    fn no_bonus_with_full_clock() {
        let config = GameConfig::default();
        assert_eq!(time_bonus(NOW + 20_000, NOW, &config), 0);
    }

    #[test]
    fn bonus_applies_after_deadline_passed() {
        let config = GameConfig::default();
        assert_eq!(time_bonus(NOW - 1_000, NOW, &config), 5_000);
    }

    #[test]
    fn custom_config_is_respected() {
        let config = GameConfig {
            game_duration_ms: 10_000,
            time_bonus_ms: 4_000,
            points_per_win: 1,
        };
        assert_eq!(time_bonus(NOW + 8_000, NOW, &config), 2_000);
    }
}
