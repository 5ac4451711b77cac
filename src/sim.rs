//! In-memory stand-ins for the pose estimator and the arm hardware, used by
//! the demo binary and by tests.

use std::collections::VecDeque;
use std::thread;
use std::time::Duration;

use anyhow::{Result, bail};

use crate::arm::{ArmDriver, CENTER_POS};
use crate::runner::HandPoseProvider;
use crate::types::{Channel, Finger, FrameObservation, HandLandmarks, LANDMARK_COUNT};

/// Builds a single-hand observation with the given tip-to-palm distances.
/// Non-tip landmarks sit on the palm point.
pub fn hand_observation(distances: [f32; 5], palm: (f32, f32)) -> FrameObservation {
    let mut points = [palm; LANDMARK_COUNT];
    for (finger, dist) in Finger::ALL.iter().zip(distances) {
        points[finger.tip()] = (palm.0 + dist, palm.1);
    }
    FrameObservation::SingleHand(HandLandmarks { points })
}

/// Replays a fixed sequence of observations, optionally paced like a camera.
/// Running out of frames is the simulated feed dying.
pub struct ScriptedHand {
    frames: VecDeque<FrameObservation>,
    frame_interval: Duration,
}

impl ScriptedHand {
    pub fn new(frames: impl IntoIterator<Item = FrameObservation>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
            frame_interval: Duration::ZERO,
        }
    }

    pub fn paced(mut self, frame_interval: Duration) -> Self {
        self.frame_interval = frame_interval;
        self
    }

    /// A complete scripted session at ~30 fps: five seconds each of stretch,
    /// clench, and relax, then a few seconds of gesturing.
    pub fn demo_session() -> Self {
        let per_phase = 160;
        let mut frames = Vec::new();

        for i in 0..per_phase {
            let jitter = (i % 5) as f32;
            frames.push(hand_observation([100.0 + jitter; 5], (320.0, 240.0)));
        }
        for i in 0..per_phase {
            let jitter = (i % 3) as f32;
            frames.push(hand_observation([20.0 + jitter; 5], (320.0, 240.0)));
        }
        for i in 0..per_phase {
            let jitter = (i % 7) as f32;
            frames.push(hand_observation([55.0 + jitter; 5], (320.0, 240.0)));
        }

        // Running: thumb extended while the palm sweeps right, then a clench.
        for i in 0..60 {
            let palm_x = 320.0 + i as f32 * 4.0;
            frames.push(hand_observation(
                [100.0, 55.0, 55.0, 55.0, 55.0],
                (palm_x, 240.0),
            ));
        }
        for _ in 0..60 {
            frames.push(hand_observation([22.0; 5], (560.0, 240.0)));
        }

        Self::new(frames).paced(Duration::from_millis(33))
    }
}

impl HandPoseProvider for ScriptedHand {
    fn next_frame(&mut self) -> Result<FrameObservation> {
        match self.frames.pop_front() {
            Some(frame) => {
                if !self.frame_interval.is_zero() {
                    thread::sleep(self.frame_interval);
                }
                Ok(frame)
            }
            None => bail!("video feed exhausted"),
        }
    }
}

/// Arm driver that keeps channel positions in memory and records every
/// command it is given.
pub struct MemoryArm {
    positions: [i32; 6],
    pub commands: Vec<(Channel, i32)>,
    pub disconnected: bool,
}

impl MemoryArm {
    pub fn new() -> Self {
        Self {
            positions: [CENTER_POS; 6],
            commands: Vec::new(),
            disconnected: false,
        }
    }

    pub fn position_of(&self, channel: Channel) -> i32 {
        self.positions[Self::slot(channel)]
    }

    fn slot(channel: Channel) -> usize {
        channel.id() as usize - 1
    }
}

impl ArmDriver for MemoryArm {
    fn position(&mut self, channel: Channel) -> Result<i32> {
        if self.disconnected {
            bail!("arm disconnected");
        }
        Ok(self.positions[Self::slot(channel)])
    }

    fn set_position(
        &mut self,
        channel: Channel,
        position: i32,
        _duration_ms: u32,
        _wait: bool,
    ) -> Result<()> {
        if self.disconnected {
            bail!("arm disconnected");
        }
        self.positions[Self::slot(channel)] = position;
        self.commands.push((channel, position));
        Ok(())
    }
}
