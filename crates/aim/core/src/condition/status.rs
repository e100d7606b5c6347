//! Status returned by activation conditions.

/// Per-tick verdict of a task's activation condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ConditionStatus {
    /// The task ticks but leaves the view untouched.
    Suspend,

    /// The task applies an incremental rotation step.
    Execute,

    /// The task snaps straight to the target and finishes successfully.
    Force,

    /// The task finishes successfully without rotating.
    Success,

    /// The task finishes unsuccessfully without rotating.
    Failure,
}

