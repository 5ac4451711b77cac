use std::fmt;
use std::ops::{Index, IndexMut};

pub const LANDMARK_COUNT: usize = 21;

/// One tracked digit, in actuator priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    pub const ALL: [Finger; 5] = [
        Finger::Thumb,
        Finger::Index,
        Finger::Middle,
        Finger::Ring,
        Finger::Pinky,
    ];

    /// Tip landmark index in the 21-point hand model.
    pub fn tip(self) -> usize {
        match self {
            Finger::Thumb => 4,
            Finger::Index => 8,
            Finger::Middle => 12,
            Finger::Ring => 16,
            Finger::Pinky => 20,
        }
    }

    /// The actuator channel this finger drives.
    pub fn channel(self) -> Channel {
        match self {
            Finger::Thumb => Channel::Pincer,
            Finger::Index => Channel::Shoulder,
            Finger::Middle => Channel::Elbow,
            Finger::Ring => Channel::Wrist,
            Finger::Pinky => Channel::PincerTurn,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Finger::Thumb => "thumb",
            Finger::Index => "index",
            Finger::Middle => "middle",
            Finger::Ring => "ring",
            Finger::Pinky => "pinky",
        }
    }
}

impl fmt::Display for Finger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One controllable joint of the manipulator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    Pincer,
    PincerTurn,
    Wrist,
    Elbow,
    Shoulder,
    Base,
}

impl Channel {
    pub const ALL: [Channel; 6] = [
        Channel::Pincer,
        Channel::PincerTurn,
        Channel::Wrist,
        Channel::Elbow,
        Channel::Shoulder,
        Channel::Base,
    ];

    /// Hardware servo number.
    pub fn id(self) -> u8 {
        match self {
            Channel::Pincer => 1,
            Channel::PincerTurn => 2,
            Channel::Wrist => 3,
            Channel::Elbow => 4,
            Channel::Shoulder => 5,
            Channel::Base => 6,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Channel::Pincer => "pincer",
            Channel::PincerTurn => "pincer-turn",
            Channel::Wrist => "wrist",
            Channel::Elbow => "elbow",
            Channel::Shoulder => "shoulder",
            Channel::Base => "base",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Positive,
    Negative,
}

/// Fixed-size map keyed by `Finger`, replacing five parallel variables.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FingerMap<T>([T; 5]);

impl<T> FingerMap<T> {
    pub fn from_fn(mut f: impl FnMut(Finger) -> T) -> Self {
        Self(Finger::ALL.map(&mut f))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Finger, &T)> {
        Finger::ALL.iter().copied().zip(self.0.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Finger, &mut T)> {
        Finger::ALL.iter().copied().zip(self.0.iter_mut())
    }
}

impl<T> Index<Finger> for FingerMap<T> {
    type Output = T;

    fn index(&self, finger: Finger) -> &T {
        &self.0[finger as usize]
    }
}

impl<T> IndexMut<Finger> for FingerMap<T> {
    fn index_mut(&mut self, finger: Finger) -> &mut T {
        &mut self.0[finger as usize]
    }
}

/// Pixel positions of the 21 hand landmarks for exactly one detected hand.
#[derive(Clone, Debug)]
pub struct HandLandmarks {
    pub points: [(f32, f32); LANDMARK_COUNT],
}

/// What the pose estimator saw in one video frame.
#[derive(Clone, Debug)]
pub enum FrameObservation {
    NoHand,
    MultipleHands,
    SingleHand(HandLandmarks),
}

/// Per-frame measurements the state machine consumes. Not kept past one
/// iteration.
#[derive(Clone, Debug)]
pub struct HandSnapshot {
    pub distances: FingerMap<f32>,
    pub palm: (f32, f32),
}

/// A single requested step on one channel, not yet resolved to an absolute
/// position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommandRequest {
    pub channel: Channel,
    pub direction: Direction,
}
