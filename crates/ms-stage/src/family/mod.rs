//! Concrete instrument families.
//!
//! Each family decides its own visibility rule and stacking direction;
//! the shared wiring lives in [`InstrumentCore`](crate::InstrumentCore).

mod drum_kit;
mod guitar;
mod keyboard;
mod saxophone;

pub use drum_kit::DrumKit;
pub use guitar::Guitar;
pub use keyboard::Keyboard;
pub use saxophone::Saxophone;

use ms_ir::NotePeriod;

/// Seconds before a note period starts that a sustained instrument
/// already shows up on stage.
pub const LOOKAHEAD_WINDOW: f64 = 1.0;

/// Seconds after a note period ends that a sustained instrument lingers
/// before leaving.
pub const LINGER_WINDOW: f64 = 2.0;

/// The visibility rule shared by sustained (melodic) families: shown
/// while anything is sounding, about to sound, or just finished.
pub fn sustained_visible(periods: &[NotePeriod], time: f64) -> bool {
    periods.iter().any(|p| {
        p.playing(time)
            || p.starts_within(time, LOOKAHEAD_WINDOW)
            || p.ended_within(time, LINGER_WINDOW)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn period(start: f64, end: f64) -> NotePeriod {
        NotePeriod {
            note: 60,
            velocity: 64,
            start,
            end,
        }
    }

    #[test]
    fn sustained_rule_covers_the_whole_window() {
        let periods = [period(5.0, 6.0)];
        assert!(!sustained_visible(&periods, 3.0));
        assert!(sustained_visible(&periods, 4.5)); // lookahead
        assert!(sustained_visible(&periods, 5.5)); // sounding
        assert!(sustained_visible(&periods, 7.5)); // linger
        assert!(!sustained_visible(&periods, 8.5));
    }

    #[test]
    fn gap_shorter_than_the_windows_keeps_it_on_stage() {
        let periods = [period(0.0, 1.0), period(3.5, 4.0)];
        // 2s linger + 1s lookahead bridge a 2.5s gap.
        assert!(sustained_visible(&periods, 2.0));
        assert!(sustained_visible(&periods, 2.9));
    }
}
