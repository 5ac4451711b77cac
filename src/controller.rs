use std::mem;
use std::time::{Duration, Instant};

use crate::calibration::{self, CALIBRATION_SECS, FingerCalibration};
use crate::landmarks;
use crate::mapper::{self, PalmTracker};
use crate::timer::Countdown;
use crate::types::{CommandRequest, Finger, FingerMap, FrameObservation, HandSnapshot};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Stretch,
    Clench,
    Relax,
    Running,
}

/// Each state carries exactly the references learned so far, so a partially
/// calibrated controller cannot be asked to map gestures.
enum State {
    Stretch,
    Clench {
        max: FingerMap<f32>,
    },
    Relax {
        max: FingerMap<f32>,
        min: FingerMap<f32>,
    },
    Running {
        calibration: FingerMap<FingerCalibration>,
        palm: PalmTracker,
    },
}

/// The calibration and gesture-mapping state machine. One instance, stepped
/// once per processed frame; owns no hardware.
pub struct Controller {
    state: State,
    samples: FingerMap<Vec<f32>>,
    countdown: Countdown,
}

impl Controller {
    pub fn new(now: Instant) -> Self {
        let mut countdown = Countdown::new(Duration::from_secs(CALIBRATION_SECS));
        countdown.start(now);
        Self {
            state: State::Stretch,
            samples: FingerMap::default(),
            countdown,
        }
    }

    #[allow(dead_code)]
    pub fn phase(&self) -> Phase {
        match self.state {
            State::Stretch => Phase::Stretch,
            State::Clench { .. } => Phase::Clench,
            State::Relax { .. } => Phase::Relax,
            State::Running { .. } => Phase::Running,
        }
    }

    #[allow(dead_code)]
    pub fn calibration(&self) -> Option<&FingerMap<FingerCalibration>> {
        match &self.state {
            State::Running { calibration, .. } => Some(calibration),
            _ => None,
        }
    }

    /// Advances the machine by one frame and returns this iteration's step
    /// requests (always empty while calibrating).
    pub fn process(
        &mut self,
        observation: &FrameObservation,
        now: Instant,
    ) -> Vec<CommandRequest> {
        let hand = match observation {
            FrameObservation::SingleHand(hand) => hand,
            FrameObservation::NoHand | FrameObservation::MultipleHands => {
                log::info!("waiting for a single hand");
                // Restarts only the countdown; in-progress samples are kept.
                self.countdown.start(now);
                return Vec::new();
            }
        };

        let snapshot = landmarks::snapshot(hand);
        let state = mem::replace(&mut self.state, State::Stretch);
        let (state, commands) = self.step(state, &snapshot, now);
        self.state = state;
        commands
    }

    fn step(
        &mut self,
        state: State,
        snapshot: &HandSnapshot,
        now: Instant,
    ) -> (State, Vec<CommandRequest>) {
        let next = match state {
            State::Stretch => {
                self.sample(snapshot);
                if self.countdown.has_elapsed(now) {
                    let max = self.take_stats(calibration::max_sample);
                    self.countdown.start(now);
                    State::Clench { max }
                } else {
                    log::info!(
                        "stretch hand for {:.2} more seconds",
                        self.countdown.time_left(now)
                    );
                    State::Stretch
                }
            }
            State::Clench { max } => {
                self.sample(snapshot);
                if self.countdown.has_elapsed(now) {
                    let min = self.take_stats(calibration::min_sample);
                    self.countdown.start(now);
                    State::Relax { max, min }
                } else {
                    log::info!(
                        "clench hand for {:.2} more seconds",
                        self.countdown.time_left(now)
                    );
                    State::Clench { max }
                }
            }
            State::Relax { max, min } => {
                self.sample(snapshot);
                if self.countdown.has_elapsed(now) {
                    let mid = self.take_stats(calibration::median_sample);
                    for finger in Finger::ALL {
                        log::info!(
                            "{finger}: min={} mid={} max={}",
                            min[finger],
                            mid[finger],
                            max[finger]
                        );
                    }
                    self.countdown.start(now);
                    match calibration::build_calibration(&min, &mid, &max) {
                        Ok(calibration) => {
                            log::info!("calibration complete, mapping gestures");
                            State::Running {
                                calibration,
                                palm: PalmTracker::default(),
                            }
                        }
                        Err(err) => {
                            log::warn!("{err}, recalibrating");
                            State::Stretch
                        }
                    }
                } else {
                    log::info!(
                        "relax hand for {:.2} more seconds",
                        self.countdown.time_left(now)
                    );
                    State::Relax { max, min }
                }
            }
            State::Running { calibration, mut palm } => {
                let mut commands = mapper::finger_commands(snapshot, &calibration);
                if let Some(base) = palm.track(snapshot.palm) {
                    commands.push(base);
                }
                let state = State::Running { calibration, palm };
                return (state, commands);
            }
        };

        (next, Vec::new())
    }

    fn sample(&mut self, snapshot: &HandSnapshot) {
        for (finger, buffer) in self.samples.iter_mut() {
            buffer.push(snapshot.distances[finger]);
        }
    }

    /// Reduces each finger's buffer to one statistic and clears the buffers.
    fn take_stats(&mut self, stat: impl Fn(&[f32]) -> f32) -> FingerMap<f32> {
        let out = FingerMap::from_fn(|finger| stat(&self.samples[finger]));
        for (_, buffer) in self.samples.iter_mut() {
            buffer.clear();
        }
        out
    }
}
