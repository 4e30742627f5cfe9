//! Campaign messages exchanged with the rest of the app.
use bevy::prelude::{Event, Message};

use super::components::{Phase, PhaseStamp};

/// Fired after a phase has been fully applied to the world.
#[derive(Event, Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseChangedEvent {
    pub day: u32,
    pub phase: Phase,
}

impl From<PhaseStamp> for PhaseChangedEvent {
    fn from(stamp: PhaseStamp) -> Self {
        Self {
            day: stamp.day,
            phase: stamp.phase,
        }
    }
}

/// Asks the campaign to change phase. Requests written in the same frame are
/// handled in the order they were written.
#[derive(Event, Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseRequest {
    /// Move to the next phase (sleeping, debug controls).
    Advance,
    /// Clear the campaign bookkeeping and start over at `(day, phase)`.
    Reset { day: u32, phase: Phase },
}

impl PhaseRequest {
    /// Restart from the first morning.
    pub fn restart() -> Self {
        Self::Reset {
            day: 1,
            phase: Phase::Morning,
        }
    }
}
