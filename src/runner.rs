use std::time::Instant;

use anyhow::{Context, Result};
use crossbeam_channel::Receiver;

use crate::arm::{self, ArmDriver, MOVE_DURATION_MS};
use crate::controller::Controller;
use crate::types::FrameObservation;

/// Boundary to the hand-pose estimator. `Err` means the frame source is
/// exhausted or broken, which ends the run.
pub trait HandPoseProvider {
    fn next_frame(&mut self) -> Result<FrameObservation>;
}

/// Single-threaded frame loop: each frame is fully processed, and every
/// resulting command completed, before the next frame is read. The stop
/// signal is checked once per iteration; an in-flight command finishes.
pub fn run(
    provider: &mut dyn HandPoseProvider,
    arm: &mut dyn ArmDriver,
    controller: &mut Controller,
    stop_rx: &Receiver<()>,
) -> Result<()> {
    arm::reset(arm).context("failed to center arm")?;

    loop {
        if stop_rx.try_recv().is_ok() {
            log::info!("stop requested, shutting down");
            return Ok(());
        }

        let observation = provider.next_frame().context("video feed failed")?;
        for request in controller.process(&observation, Instant::now()) {
            let current = arm
                .position(request.channel)
                .with_context(|| format!("failed to read {} position", request.channel))?;
            let target = arm::next_position(current, request.direction);
            log::debug!("{} -> {target}", request.channel);
            arm.set_position(request.channel, target, MOVE_DURATION_MS, true)
                .with_context(|| format!("failed to move {}", request.channel))?;
        }
    }
}
