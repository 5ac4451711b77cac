use crate::types::{Channel, Direction};

pub const MIN_POS: i32 = 100;
pub const MAX_POS: i32 = 900;
pub const CENTER_POS: i32 = 500;

/// Position change per triggering event.
pub const STEP: i32 = 50;

/// Milliseconds the actuator is given to complete one command.
pub const MOVE_DURATION_MS: u32 = 100;

/// Boundary to the physical manipulator. Implementations own the
/// authoritative channel positions; a fault here is fatal to the run.
pub trait ArmDriver {
    fn position(&mut self, channel: Channel) -> anyhow::Result<i32>;

    fn set_position(
        &mut self,
        channel: Channel,
        position: i32,
        duration_ms: u32,
        wait: bool,
    ) -> anyhow::Result<()>;
}

/// One step from `current` in `direction`, clamped to the travel limits.
pub fn next_position(current: i32, direction: Direction) -> i32 {
    match direction {
        Direction::Positive => (current + STEP).min(MAX_POS),
        Direction::Negative => (current - STEP).max(MIN_POS),
    }
}

/// Centers every channel. Issued without waiting, matching power-on behavior.
pub fn reset(arm: &mut dyn ArmDriver) -> anyhow::Result<()> {
    for channel in Channel::ALL {
        arm.set_position(channel, CENTER_POS, MOVE_DURATION_MS, false)?;
    }
    Ok(())
}
