use crate::calibration::FingerCalibration;
use crate::types::{Channel, CommandRequest, Direction, FingerMap, HandSnapshot};

/// Minimum horizontal palm travel (pixels) before the base channel steps.
pub const PALM_SHIFT_THRESHOLD: f32 = 10.0;

/// One step per finger whose live distance sits inside the dead-zone-adjusted
/// top or bottom of its learned range. Emitted in finger priority order.
pub fn finger_commands(
    snapshot: &HandSnapshot,
    calibration: &FingerMap<FingerCalibration>,
) -> Vec<CommandRequest> {
    let mut commands = Vec::new();
    for (finger, cal) in calibration.iter() {
        let dist = snapshot.distances[finger];
        if dist > cal.max_dist - cal.buffer {
            commands.push(CommandRequest {
                channel: finger.channel(),
                direction: Direction::Positive,
            });
        } else if dist < cal.min_dist + cal.buffer {
            commands.push(CommandRequest {
                channel: finger.channel(),
                direction: Direction::Negative,
            });
        }
    }
    commands
}

/// Tracks the palm's reference position for base-channel displacement. The
/// reference only advances when a step actually fires, so sub-threshold drift
/// accumulates against the last fired position rather than the last frame.
#[derive(Clone, Debug, Default)]
pub struct PalmTracker {
    last: Option<(f32, f32)>,
}

impl PalmTracker {
    pub fn track(&mut self, palm: (f32, f32)) -> Option<CommandRequest> {
        let Some((last_x, _)) = self.last else {
            self.last = Some(palm);
            return None;
        };

        let shift = palm.0 - last_x;
        if shift.abs() <= PALM_SHIFT_THRESHOLD {
            return None;
        }

        self.last = Some(palm);
        Some(CommandRequest {
            channel: Channel::Base,
            direction: if shift > 0.0 {
                Direction::Positive
            } else {
                Direction::Negative
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Finger;

    fn calibration() -> FingerMap<FingerCalibration> {
        // max=100, min=20, buffer=16: cutoffs at 84 and 36.
        FingerMap::from_fn(|_| FingerCalibration {
            min_dist: 20.0,
            mid_dist: 60.0,
            max_dist: 100.0,
            buffer: 16.0,
        })
    }

    fn snapshot(distances: [f32; 5]) -> HandSnapshot {
        let mut i = 0;
        HandSnapshot {
            distances: FingerMap::from_fn(|_| {
                let d = distances[i];
                i += 1;
                d
            }),
            palm: (0.0, 0.0),
        }
    }

    #[test]
    fn extended_finger_steps_positive() {
        let commands = finger_commands(&snapshot([90.0, 60.0, 60.0, 60.0, 60.0]), &calibration());
        assert_eq!(
            commands,
            vec![CommandRequest {
                channel: Channel::Pincer,
                direction: Direction::Positive,
            }]
        );
    }

    #[test]
    fn contracted_finger_steps_negative() {
        let commands = finger_commands(&snapshot([60.0, 30.0, 60.0, 60.0, 60.0]), &calibration());
        assert_eq!(
            commands,
            vec![CommandRequest {
                channel: Channel::Shoulder,
                direction: Direction::Negative,
            }]
        );
    }

    #[test]
    fn mid_range_is_silent() {
        assert!(finger_commands(&snapshot([60.0; 5]), &calibration()).is_empty());
    }

    #[test]
    fn commands_come_out_in_finger_priority_order() {
        let commands = finger_commands(&snapshot([90.0, 30.0, 90.0, 60.0, 30.0]), &calibration());
        let channels: Vec<Channel> = commands.iter().map(|c| c.channel).collect();
        assert_eq!(
            channels,
            vec![
                Channel::Pincer,
                Channel::Shoulder,
                Channel::Elbow,
                Channel::PincerTurn,
            ]
        );
        assert_eq!(commands[1].direction, Direction::Negative);
    }

    #[test]
    fn exact_cutoff_is_inside_the_dead_zone() {
        // Comparisons are strict: 84 and 36 themselves emit nothing.
        assert!(finger_commands(&snapshot([84.0, 36.0, 60.0, 60.0, 60.0]), &calibration()).is_empty());
    }

    #[test]
    fn first_frame_only_seeds_the_palm_reference() {
        let mut tracker = PalmTracker::default();
        assert!(tracker.track((200.0, 100.0)).is_none());
    }

    #[test]
    fn palm_shift_beyond_threshold_steps_base() {
        let mut tracker = PalmTracker::default();
        tracker.track((200.0, 100.0));

        let cmd = tracker.track((215.0, 100.0)).unwrap();
        assert_eq!(cmd.channel, Channel::Base);
        assert_eq!(cmd.direction, Direction::Positive);

        let cmd = tracker.track((190.0, 100.0)).unwrap();
        assert_eq!(cmd.direction, Direction::Negative);
    }

    #[test]
    fn sub_threshold_shift_leaves_reference_in_place() {
        let mut tracker = PalmTracker::default();
        tracker.track((200.0, 100.0));

        assert!(tracker.track((205.0, 100.0)).is_none());
        assert!(tracker.track((209.0, 100.0)).is_none());
        // Still measured against 200, so 211 fires.
        assert!(tracker.track((211.0, 100.0)).is_some());
    }

    #[test]
    fn shift_of_exactly_threshold_does_not_fire() {
        let mut tracker = PalmTracker::default();
        tracker.track((200.0, 100.0));
        assert!(tracker.track((210.0, 100.0)).is_none());
    }
}
