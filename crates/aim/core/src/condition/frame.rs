use crate::condition::{AimCondition, ConditionContext, ConditionStatus};
use crate::error::AimError;

/// Frame-counted reaction/process window.
///
/// # Semantics
///
/// With `n` the number of previous checks (the first check sees `n = 0`):
/// - `n < reaction` → `Suspend`
/// - `reaction <= n < total` → `Execute`
/// - `n >= total` → `Force` if `force` is set, otherwise `Failure`
///
/// The counter only ever grows; each check advances it by one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameWindow {
    reaction: u32,
    total: u32,
    force: bool,
    frames: u32,
}

impl FrameWindow {
    pub const DEFAULT_REACTION: u32 = 6;
    pub const DEFAULT_TOTAL: u32 = 9;

    /// Creates a window that suspends for `reaction` frames and times out at `total`.
    ///
    /// # Errors
    ///
    /// Returns [`AimError::InvalidFrameWindow`] if `reaction > total`.
    pub fn new(reaction: u32, total: u32, force: bool) -> Result<Self, AimError> {
        if reaction > total {
            return Err(AimError::InvalidFrameWindow { reaction, total });
        }
        Ok(Self {
            reaction,
            total,
            force,
            frames: 0,
        })
    }

    pub fn reaction(&self) -> u32 {
        self.reaction
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn force(&self) -> bool {
        self.force
    }

    /// Number of checks performed so far.
    pub fn frames_elapsed(&self) -> u32 {
        self.frames
    }

    fn advance(&mut self) -> ConditionStatus {
        let frame = self.frames;
        self.frames = self.frames.saturating_add(1);

        if frame < self.reaction {
            ConditionStatus::Suspend
        } else if frame >= self.total {
            if self.force {
                ConditionStatus::Force
            } else {
                ConditionStatus::Failure
            }
        } else {
            ConditionStatus::Execute
        }
    }
}

impl Default for FrameWindow {
    fn default() -> Self {
        Self {
            reaction: Self::DEFAULT_REACTION,
            total: Self::DEFAULT_TOTAL,
            force: false,
            frames: 0,
        }
    }
}

impl AimCondition for FrameWindow {
    fn check(&mut self, _ctx: &ConditionContext<'_>) -> ConditionStatus {
        self.advance()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(window: &mut FrameWindow, frames: usize) -> Vec<ConditionStatus> {
        (0..frames).map(|_| window.advance()).collect()
    }

    #[test]
    fn suspends_executes_then_fails() {
        let mut window = FrameWindow::new(4, 8, false).unwrap();
        let statuses = run(&mut window, 12);

        assert!(statuses[0..4].iter().all(|s| *s == ConditionStatus::Suspend));
        assert!(statuses[4..8].iter().all(|s| *s == ConditionStatus::Execute));
        assert!(statuses[8..].iter().all(|s| *s == ConditionStatus::Failure));
        assert_eq!(window.frames_elapsed(), 12);
    }

    #[test]
    fn forces_on_timeout_when_flag_set() {
        let mut window = FrameWindow::new(4, 8, true).unwrap();
        let statuses = run(&mut window, 9);

        assert_eq!(statuses[7], ConditionStatus::Execute);
        assert_eq!(statuses[8], ConditionStatus::Force);
    }

    #[test]
    fn zero_reaction_executes_immediately() {
        let mut window = FrameWindow::new(0, 2, false).unwrap();
        assert_eq!(
            run(&mut window, 3),
            vec![
                ConditionStatus::Execute,
                ConditionStatus::Execute,
                ConditionStatus::Failure
            ]
        );
    }

    #[test]
    fn rejects_reaction_past_total() {
        assert_eq!(
            FrameWindow::new(5, 3, true),
            Err(AimError::InvalidFrameWindow {
                reaction: 5,
                total: 3
            })
        );
    }

    #[test]
    fn default_window_matches_constants() {
        let window = FrameWindow::default();
        assert_eq!(window.reaction(), 6);
        assert_eq!(window.total(), 9);
        assert!(!window.force());
    }
}
