//! Time loop and run outcome
//!
//! A run moves through
//!
//! ```text
//! Ready ──advance──▶ Running ──last step──▶ Completed
//!                       │
//!                       └──non-finite value──▶ Diverged
//! ```
//!
//! [`TimeLoop`] exposes that machine one step at a time, so a caller can
//! pause and inspect between steps; [`TimeLoop::finish`] drives it to a
//! terminal state and returns the [`RunOutcome`].
//!
//! # Snapshots
//!
//! The first snapshot is always the initial field at `t = 0`. After step `n`
//! a snapshot is recorded when `n % interval == 0` or `n` is the last step.
//! A diverging step appends exactly one final snapshot holding the invalid
//! field, and the outcome's status carries the last valid one.

use std::collections::HashMap;

use crate::diagnostics::field_is_valid;
use crate::error::{Result, TransportError};
use crate::physics::{ScalarField, StepUpdate};

// =================================================================================================
// Snapshots and outcome
// =================================================================================================

/// A recorded `(field, time)` pair
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub field: ScalarField,
    pub time: f64,
    /// Step index the field belongs to, `0` for the initial condition
    pub step: usize,
}

impl Snapshot {
    pub fn new(field: ScalarField, time: f64, step: usize) -> Self {
        Self { field, time, step }
    }
}

/// Ordered snapshots of one run
pub type SnapshotSequence = Vec<Snapshot>;

/// Where a run is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunState {
    Ready,
    Running,
    Completed,
    Diverged,
}

impl RunState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunState::Completed | RunState::Diverged)
    }
}

/// How a run ended
#[derive(Debug, Clone, PartialEq)]
pub enum RunStatus {
    Completed,
    /// A step produced a non-finite value
    Diverged { last_valid: Snapshot },
}

/// Everything a finished run hands back
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    pub snapshots: SnapshotSequence,
    pub status: RunStatus,
    /// Index of the last step taken
    pub final_step: usize,
    /// Resolved step size
    pub time_step: f64,
    pub metadata: HashMap<String, String>,
}

impl RunOutcome {
    pub fn is_completed(&self) -> bool {
        self.status == RunStatus::Completed
    }

    pub fn is_diverged(&self) -> bool {
        matches!(self.status, RunStatus::Diverged { .. })
    }

    /// Last recorded snapshot
    pub fn last_snapshot(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    /// Last recorded field; the invalid field of a diverged run
    pub fn final_field(&self) -> Option<&ScalarField> {
        self.snapshots.last().map(|snapshot| &snapshot.field)
    }

    /// Time of the last step taken
    pub fn final_time(&self) -> f64 {
        self.final_step as f64 * self.time_step
    }

    pub fn metadata(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }
}

// =================================================================================================
// Time loop
// =================================================================================================

/// Stepwise explicit time loop over any [`StepUpdate`]
///
/// # Example
///
/// ```rust
/// use advect_rs::physics::ScalarField;
/// use advect_rs::solver::{RunState, TimeLoop};
///
/// let halve = |field: &ScalarField, _dt: f64| {
///     ScalarField::from_vec(field.iter().map(|v| 0.5 * v).collect())
/// };
/// let mut time_loop = TimeLoop::new(&halve, ScalarField::from_vec(vec![8.0]), 0.1, 3, 1).unwrap();
///
/// assert_eq!(time_loop.state(), RunState::Ready);
/// assert_eq!(time_loop.advance(), RunState::Running);
/// assert_eq!(time_loop.current().as_slice(), &[4.0]);
///
/// let outcome = time_loop.finish();
/// assert!(outcome.is_completed());
/// assert_eq!(outcome.snapshots.len(), 4);
/// assert_eq!(outcome.final_field().unwrap().as_slice(), &[1.0]);
/// ```
pub struct TimeLoop<'a> {
    stepper: &'a dyn StepUpdate,
    current: ScalarField,
    dt: f64,
    total_steps: usize,
    snapshot_interval: usize,
    step: usize,
    state: RunState,
    snapshots: SnapshotSequence,
    last_valid: Option<Snapshot>,
    metadata: HashMap<String, String>,
}

impl<'a> TimeLoop<'a> {
    /// Prepare a run and record the initial snapshot
    pub fn new(
        stepper: &'a dyn StepUpdate,
        initial: ScalarField,
        dt: f64,
        total_steps: usize,
        snapshot_interval: usize,
    ) -> Result<Self> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(TransportError::InvalidTimeStep(dt));
        }
        if total_steps == 0 {
            return Err(TransportError::ZeroSteps);
        }
        if snapshot_interval == 0 {
            return Err(TransportError::ZeroSnapshotInterval);
        }

        let mut snapshots = Vec::with_capacity(total_steps / snapshot_interval + 2);
        snapshots.push(Snapshot::new(initial.clone(), 0.0, 0));

        Ok(Self {
            stepper,
            current: initial,
            dt,
            total_steps,
            snapshot_interval,
            step: 0,
            state: RunState::Ready,
            snapshots,
            last_valid: None,
            metadata: HashMap::new(),
        })
    }

    /// Attach a metadata entry to the outcome
    pub fn with_metadata(mut self, key: &str, value: &str) -> Self {
        self.metadata.insert(key.to_string(), value.to_string());
        self
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Steps taken so far
    pub fn step(&self) -> usize {
        self.step
    }

    /// Simulated time of the current field
    pub fn time(&self) -> f64 {
        self.step as f64 * self.dt
    }

    /// Latest field, invalid once the run has diverged
    pub fn current(&self) -> &ScalarField {
        &self.current
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    /// Take one step; a no-op once the run is terminal
    pub fn advance(&mut self) -> RunState {
        if self.state.is_terminal() {
            return self.state;
        }
        if self.state == RunState::Ready {
            log::debug!(
                "{}: starting run, dt = {:e}, {} steps",
                self.stepper.name(),
                self.dt,
                self.total_steps
            );
            self.state = RunState::Running;
        }

        let next = self.stepper.advance(&self.current, self.dt);
        self.step += 1;
        let time = self.time();

        if !field_is_valid(&next) {
            log::warn!(
                "{}: non-finite value at step {} (t = {:e}), run diverged",
                self.stepper.name(),
                self.step,
                time
            );
            let previous = std::mem::replace(&mut self.current, next);
            self.last_valid = Some(Snapshot::new(previous, (self.step - 1) as f64 * self.dt, self.step - 1));
            self.snapshots.push(Snapshot::new(self.current.clone(), time, self.step));
            self.state = RunState::Diverged;
            return self.state;
        }

        self.current = next;

        let last = self.step == self.total_steps;
        if self.step % self.snapshot_interval == 0 || last {
            log::trace!("snapshot at step {} (t = {:e})", self.step, time);
            self.snapshots.push(Snapshot::new(self.current.clone(), time, self.step));
        }

        if last {
            log::debug!("{}: completed {} steps", self.stepper.name(), self.step);
            self.state = RunState::Completed;
        }
        self.state
    }

    /// Run to a terminal state and collect the outcome
    pub fn finish(mut self) -> RunOutcome {
        while !self.state.is_terminal() {
            self.advance();
        }

        let status = match self.last_valid {
            Some(last_valid) => RunStatus::Diverged { last_valid },
            None => RunStatus::Completed,
        };

        RunOutcome {
            snapshots: self.snapshots,
            status,
            final_step: self.step,
            time_step: self.dt,
            metadata: self.metadata,
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn shift(field: &ScalarField, _dt: f64) -> ScalarField {
        ScalarField::from_vec(field.iter().map(|v| v + 1.0).collect())
    }

    /// Produces NaN once the value passes a threshold
    fn blow_up(field: &ScalarField, _dt: f64) -> ScalarField {
        ScalarField::from_vec(
            field
                .iter()
                .map(|&v| if v >= 2.0 { f64::NAN } else { v + 1.0 })
                .collect(),
        )
    }

    #[test]
    fn test_snapshot_schedule() {
        let stepper = shift;
        let outcome = TimeLoop::new(&stepper, ScalarField::from_vec(vec![0.0]), 0.5, 7, 3)
            .unwrap()
            .finish();

        let steps: Vec<usize> = outcome.snapshots.iter().map(|s| s.step).collect();
        assert_eq!(steps, vec![0, 3, 6, 7]);

        let times: Vec<f64> = outcome.snapshots.iter().map(|s| s.time).collect();
        assert_eq!(times, vec![0.0, 1.5, 3.0, 3.5]);

        assert!(outcome.is_completed());
        assert_eq!(outcome.final_step, 7);
        assert_eq!(outcome.final_field().unwrap().as_slice(), &[7.0]);
    }

    #[test]
    fn test_divergence_is_terminal() {
        let stepper = blow_up;
        let mut time_loop = TimeLoop::new(&stepper, ScalarField::from_vec(vec![0.0]), 1.0, 10, 5).unwrap();

        assert_eq!(time_loop.advance(), RunState::Running);
        assert_eq!(time_loop.advance(), RunState::Running);
        assert_eq!(time_loop.advance(), RunState::Diverged);
        // Further calls do nothing
        assert_eq!(time_loop.advance(), RunState::Diverged);
        assert_eq!(time_loop.step(), 3);

        let outcome = time_loop.finish();
        assert!(outcome.is_diverged());
        assert_eq!(outcome.final_step, 3);

        // Initial snapshot plus the invalid field
        assert_eq!(outcome.snapshots.len(), 2);
        assert!(outcome.final_field().unwrap().as_slice()[0].is_nan());

        match outcome.status {
            RunStatus::Diverged { last_valid } => {
                assert_eq!(last_valid.step, 2);
                assert_eq!(last_valid.time, 2.0);
                assert_eq!(last_valid.field.as_slice(), &[2.0]);
            }
            RunStatus::Completed => panic!("expected divergence"),
        }
    }

    #[test]
    fn test_rejects_invalid_parameters() {
        let stepper = shift;
        let initial = ScalarField::from_vec(vec![0.0]);

        assert!(matches!(
            TimeLoop::new(&stepper, initial.clone(), 0.0, 1, 1),
            Err(TransportError::InvalidTimeStep(_))
        ));
        assert!(matches!(
            TimeLoop::new(&stepper, initial.clone(), 0.1, 0, 1),
            Err(TransportError::ZeroSteps)
        ));
        assert!(matches!(
            TimeLoop::new(&stepper, initial, 0.1, 1, 0),
            Err(TransportError::ZeroSnapshotInterval)
        ));
    }

    #[test]
    fn test_metadata_travels_to_outcome() {
        let stepper = shift;
        let outcome = TimeLoop::new(&stepper, ScalarField::from_vec(vec![0.0]), 0.1, 1, 1)
            .unwrap()
            .with_metadata("scheme", "upwind")
            .finish();

        assert_eq!(outcome.metadata("scheme"), Some("upwind"));
        assert_eq!(outcome.metadata("missing"), None);
    }

    #[test]
    fn test_input_field_is_not_aliased() {
        let stepper = shift;
        let mut time_loop = TimeLoop::new(&stepper, ScalarField::from_vec(vec![1.0]), 0.1, 2, 1).unwrap();
        time_loop.advance();

        assert_eq!(time_loop.snapshots()[0].field.as_slice(), &[1.0]);
        assert_eq!(time_loop.current().as_slice(), &[2.0]);
    }
}
