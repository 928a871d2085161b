/// Sprite offset at rest and after a reset, as `(x, y)`.
pub const INITIAL_OFFSET: (f32, f32) = (-1.0, 2.5);

/// Horizontal offset change per tick.
pub const STEP_X: f32 = 0.01;

/// Vertical offset change per tick during the diagonal leg.
pub const STEP_Y: f32 = 0.015;

/// Horizontal turnaround bound.
const BOUND_X: f32 = 1.0;

/// Leg of the scripted path.
///
/// Only moves forward (`Right → Diagonal → RightAgain → Done`) or back to `Right`
/// on a reset.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Moving right along the top.
    #[default]
    Right,
    /// Moving left and down.
    Diagonal,
    /// Moving right along the bottom.
    RightAgain,
    /// Finished; holds position until restarted.
    Done,
}

impl Phase {
    /// Numeric phase index (`0..=3`).
    pub const fn index(self) -> u8 {
        match self {
            Phase::Right => 0,
            Phase::Diagonal => 1,
            Phase::RightAgain => 2,
            Phase::Done => 3,
        }
    }
}

/// Mutable animation tuple advanced once per drawn frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AnimationState {
    pub offset_x: f32,
    pub offset_y: f32,
    pub phase: Phase,
    pub stopped: bool,
}

impl Default for AnimationState {
    fn default() -> Self {
        Self {
            offset_x: INITIAL_OFFSET.0,
            offset_y: INITIAL_OFFSET.1,
            phase: Phase::Right,
            stopped: true,
        }
    }
}

impl AnimationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resumes motion. A finished path is rewound to its starting point first.
    pub fn start(&mut self) {
        if self.phase == Phase::Done {
            self.offset_x = INITIAL_OFFSET.0;
            self.offset_y = INITIAL_OFFSET.1;
            self.phase = Phase::Right;
        }
        self.stopped = false;
    }

    /// Freezes motion; offsets and phase are kept.
    pub fn stop(&mut self) {
        self.stopped = true;
    }

    pub fn is_running(&self) -> bool {
        !self.stopped && self.phase != Phase::Done
    }

    /// Advances one frame. Returns the new phase when a transition happened.
    pub fn tick(&mut self) -> Option<Phase> {
        if self.stopped {
            return None;
        }

        let before = self.phase;
        match self.phase {
            Phase::Right => {
                self.offset_x += STEP_X;
                if self.offset_x >= BOUND_X {
                    self.phase = Phase::Diagonal;
                }
            }
            Phase::Diagonal => {
                self.offset_x -= STEP_X;
                self.offset_y -= STEP_Y;
                if self.offset_x <= -BOUND_X {
                    self.phase = Phase::RightAgain;
                }
            }
            Phase::RightAgain => {
                self.offset_x += STEP_X;
                if self.offset_x >= BOUND_X {
                    self.phase = Phase::Done;
                }
            }
            Phase::Done => {}
        }

        (self.phase != before).then_some(self.phase)
    }

    /// Sprite translation for the current frame.
    pub fn translation(&self) -> glam::Vec3 {
        glam::Vec3::new(self.offset_x, self.offset_y, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running() -> AnimationState {
        let mut s = AnimationState::new();
        s.start();
        s
    }

    /// Ticks until `phase` is reached; returns the number of ticks taken.
    fn run_until(s: &mut AnimationState, phase: Phase) -> usize {
        let mut n = 0;
        while s.phase != phase {
            s.tick();
            n += 1;
            assert!(n < 10_000, "phase {phase:?} never reached");
        }
        n
    }

    #[test]
    fn initial_state() {
        let s = AnimationState::new();
        assert_eq!(s.offset_x, -1.0);
        assert_eq!(s.offset_y, 2.5);
        assert_eq!(s.phase, Phase::Right);
        assert!(s.stopped);
        assert!(!s.is_running());
    }

    #[test]
    fn idle_ticks_do_nothing() {
        let mut s = AnimationState::new();
        for _ in 0..50 {
            assert_eq!(s.tick(), None);
        }
        assert_eq!(s, AnimationState::new());
    }

    #[test]
    fn first_leg_reaches_right_edge_in_about_200_ticks() {
        let mut s = running();
        let mut transition_tick = None;
        for i in 1..=210 {
            let was = s.offset_x;
            if s.tick() == Some(Phase::Diagonal) {
                transition_tick = Some(i);
                assert!(s.offset_x >= 1.0);
                assert!(was < 1.0, "transition must fire on the first tick past the bound");
                break;
            }
        }
        let n = transition_tick.expect("phase 1 reached");
        // f32 accumulation of 0.01 may land one tick either side of 200.
        assert!((199..=201).contains(&n), "took {n} ticks");
        assert!((s.offset_x - 1.0).abs() < 0.02);
        assert_eq!(s.offset_y, 2.5);
    }

    #[test]
    fn diagonal_leg_moves_down() {
        let mut s = running();
        run_until(&mut s, Phase::Diagonal);
        let (x, y) = (s.offset_x, s.offset_y);
        s.tick();
        assert!(s.offset_x < x);
        assert!((y - s.offset_y - STEP_Y).abs() < 1e-6);
    }

    #[test]
    fn full_cycle_ends_in_done_and_holds() {
        let mut s = running();
        run_until(&mut s, Phase::Done);
        assert!(s.offset_x >= 1.0);
        assert!(s.offset_y < 0.0);

        let held = s;
        for _ in 0..100 {
            assert_eq!(s.tick(), None);
        }
        assert_eq!(s, held);
        assert!(!s.is_running());
    }

    #[test]
    fn start_after_done_resets_exactly() {
        let mut s = running();
        run_until(&mut s, Phase::Done);
        s.start();
        assert_eq!(
            s,
            AnimationState {
                offset_x: -1.0,
                offset_y: 2.5,
                phase: Phase::Right,
                stopped: false,
            }
        );
    }

    #[test]
    fn start_while_running_changes_nothing() {
        for phase in [Phase::Right, Phase::Diagonal, Phase::RightAgain] {
            let mut s = running();
            run_until(&mut s, phase);
            s.tick();
            let before = s;
            s.start();
            assert_eq!(s, before, "phase {phase:?}");
        }
    }

    #[test]
    fn stop_freezes_and_start_resumes() {
        let mut s = running();
        for _ in 0..37 {
            s.tick();
        }
        s.stop();
        let frozen = s;
        for _ in 0..500 {
            s.tick();
        }
        assert_eq!(s, frozen);

        s.start();
        assert_eq!(s.offset_x, frozen.offset_x);
        assert_eq!(s.phase, frozen.phase);
        s.tick();
        assert!((s.offset_x - (frozen.offset_x + STEP_X)).abs() < 1e-6);
    }

    #[test]
    fn stop_then_start_in_done_still_resets() {
        let mut s = running();
        run_until(&mut s, Phase::Done);
        s.stop();
        s.start();
        assert_eq!(s.phase, Phase::Right);
        assert_eq!((s.offset_x, s.offset_y), INITIAL_OFFSET);
    }

    #[test]
    fn phase_indices() {
        assert_eq!(Phase::Right.index(), 0);
        assert_eq!(Phase::Diagonal.index(), 1);
        assert_eq!(Phase::RightAgain.index(), 2);
        assert_eq!(Phase::Done.index(), 3);
    }
}
