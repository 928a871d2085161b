use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use super::state::AnimationState;

// Slot layout: the last command in the low bits, plus a sticky bit recording that
// a start arrived since the last drain.
const LAST_START: u8 = 0b001;
const LAST_STOP: u8 = 0b010;
const LAST_MASK: u8 = LAST_START | LAST_STOP;
const START_SEEN: u8 = 0b100;

/// Start/stop request.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Stop,
}

impl Command {
    fn encode(self) -> u8 {
        match self {
            Command::Start => LAST_START | START_SEEN,
            Command::Stop => LAST_STOP,
        }
    }

    fn decode(raw: u8) -> Option<Self> {
        match raw & LAST_MASK {
            LAST_START => Some(Command::Start),
            LAST_STOP => Some(Command::Stop),
            _ => None,
        }
    }
}

/// Cloneable handle for requesting start/stop from any thread.
///
/// Requests land in a single atomic slot; the draw loop drains it once per frame
/// with [`AnimationControl::apply`]. The most recent command decides whether the
/// sprite ends up running, but a start is never dropped: if one arrived since the
/// last drain, its reset is applied first.
#[derive(Debug, Clone, Default)]
pub struct AnimationControl {
    slot: Arc<AtomicU8>,
}

impl AnimationControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&self) {
        self.send(Command::Start);
    }

    pub fn stop(&self) {
        self.send(Command::Stop);
    }

    pub fn send(&self, cmd: Command) {
        let bits = cmd.encode();
        // The closure always yields a value, so the update cannot fail.
        let _ = self
            .slot
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |raw| {
                Some((raw & !LAST_MASK) | bits)
            });
    }

    /// Takes the most recent pending command, leaving the slot empty.
    pub fn take(&self) -> Option<Command> {
        Command::decode(self.drain())
    }

    /// Drains the slot into `state`. Returns the most recent command.
    pub fn apply(&self, state: &mut AnimationState) -> Option<Command> {
        let raw = self.drain();
        let last = Command::decode(raw)?;
        if raw & START_SEEN != 0 {
            state.start();
        }
        if last == Command::Stop {
            state.stop();
        }
        Some(last)
    }

    fn drain(&self) -> u8 {
        self.slot.swap(0, Ordering::AcqRel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anim::Phase;

    #[test]
    fn empty_slot_applies_nothing() {
        let control = AnimationControl::new();
        let mut state = AnimationState::new();
        assert_eq!(control.apply(&mut state), None);
        assert!(state.stopped);
    }

    #[test]
    fn take_drains_once() {
        let control = AnimationControl::new();
        control.start();
        assert_eq!(control.take(), Some(Command::Start));
        assert_eq!(control.take(), None);
    }

    #[test]
    fn last_command_wins() {
        let control = AnimationControl::new();
        control.start();
        control.stop();
        let mut state = AnimationState::new();
        assert_eq!(control.apply(&mut state), Some(Command::Stop));
        assert!(state.stopped);
    }

    #[test]
    fn start_then_stop_still_resets_finished_path() {
        let control = AnimationControl::new();
        let mut state = AnimationState::new();
        state.start();
        while state.phase != Phase::Done {
            state.tick();
        }

        control.start();
        control.stop();
        assert_eq!(control.apply(&mut state), Some(Command::Stop));
        assert_eq!(
            state,
            AnimationState {
                offset_x: -1.0,
                offset_y: 2.5,
                phase: Phase::Right,
                stopped: true,
            }
        );
    }

    #[test]
    fn stop_then_start_leaves_sprite_running() {
        let control = AnimationControl::new();
        control.stop();
        control.start();
        let mut state = AnimationState::new();
        assert_eq!(control.apply(&mut state), Some(Command::Start));
        assert!(!state.stopped);
    }

    #[test]
    fn stop_alone_does_not_reset() {
        let control = AnimationControl::new();
        let mut state = AnimationState::new();
        state.start();
        while state.phase != Phase::Done {
            state.tick();
        }
        let done = state;

        control.stop();
        control.apply(&mut state);
        assert_eq!(state.phase, Phase::Done);
        assert_eq!((state.offset_x, state.offset_y), (done.offset_x, done.offset_y));
    }

    #[test]
    fn clones_share_the_slot() {
        let control = AnimationControl::new();
        let ui_side = control.clone();
        ui_side.start();

        let mut state = AnimationState::new();
        control.apply(&mut state);
        assert!(!state.stopped);
        assert_eq!(state.phase, Phase::Right);
    }

    #[test]
    fn requests_from_another_thread_are_observed() {
        let control = AnimationControl::new();
        let ui_side = control.clone();

        std::thread::spawn(move || ui_side.start())
            .join()
            .expect("ui thread panicked");

        let mut state = AnimationState::new();
        assert_eq!(control.apply(&mut state), Some(Command::Start));
        state.tick();
        assert!(state.offset_x > -1.0);
    }
}
