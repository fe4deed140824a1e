//! Single-slot handoff of the latest classified action.
//!
//! The pose loop owns the only [`ActionWriter`]; the simulation holds an
//! [`ActionReader`] and loads whatever value was stored last. Neither side
//! blocks, and a stale read simply lags the player by one sampling interval.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use super::PoseAction;

/// Creates a connected writer/reader pair holding `initial`.
///
/// # Examples
///
/// ```
/// use neon_runner::pose::{action_slot, PoseAction};
/// let (mut writer, reader) = action_slot(PoseAction::Idle);
/// writer.publish(PoseAction::Jump);
/// assert_eq!(reader.latest(), PoseAction::Jump);
/// ```
#[must_use]
pub fn action_slot(initial: PoseAction) -> (ActionWriter, ActionReader) {
    let cell = Arc::new(AtomicU8::new(initial.to_bits()));
    (
        ActionWriter {
            cell: Arc::clone(&cell),
        },
        ActionReader { cell },
    )
}

/// Write end of the action slot. Not cloneable: there is one writer.
#[derive(Debug)]
pub struct ActionWriter {
    cell: Arc<AtomicU8>,
}

impl ActionWriter {
    /// Replaces the stored action.
    pub fn publish(&mut self, action: PoseAction) {
        self.cell.store(action.to_bits(), Ordering::Release);
    }
}

/// Read end of the action slot.
#[derive(Debug, Clone)]
pub struct ActionReader {
    cell: Arc<AtomicU8>,
}

impl ActionReader {
    /// Loads the most recently published action.
    #[must_use]
    pub fn latest(&self) -> PoseAction {
        PoseAction::from_bits(self.cell.load(Ordering::Acquire))
    }
}
