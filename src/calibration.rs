use thiserror::Error;

use crate::types::{Finger, FingerMap};

/// Length of each calibration phase, in seconds.
pub const CALIBRATION_SECS: u64 = 5;

/// Share of the learned travel reserved as a dead zone at each end.
pub const BUFFER_PERCENTAGE: f32 = 20.0;

/// Validated per-finger range of motion.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FingerCalibration {
    pub min_dist: f32,
    pub mid_dist: f32,
    pub max_dist: f32,
    pub buffer: f32,
}

/// The learned references for one finger were not strictly ordered. Expected
/// with noisy measurement; the caller rolls back and recalibrates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("invalid {finger} measurements")]
pub struct InvalidCalibration {
    pub finger: Finger,
}

/// Checks `min < mid < max` (strictly) and derives the dead-zone buffer.
pub fn validate(
    finger: Finger,
    min_dist: f32,
    mid_dist: f32,
    max_dist: f32,
) -> Result<FingerCalibration, InvalidCalibration> {
    if min_dist < mid_dist && mid_dist < max_dist {
        Ok(FingerCalibration {
            min_dist,
            mid_dist,
            max_dist,
            buffer: (max_dist - min_dist) * BUFFER_PERCENTAGE / 100.0,
        })
    } else {
        Err(InvalidCalibration { finger })
    }
}

/// Validates all five fingers in priority order, stopping at the first
/// failure.
pub fn build_calibration(
    min: &FingerMap<f32>,
    mid: &FingerMap<f32>,
    max: &FingerMap<f32>,
) -> Result<FingerMap<FingerCalibration>, InvalidCalibration> {
    let mut out = FingerMap::default();
    for finger in Finger::ALL {
        out[finger] = validate(finger, min[finger], mid[finger], max[finger])?;
    }
    Ok(out)
}

pub fn max_sample(samples: &[f32]) -> f32 {
    samples.iter().copied().fold(f32::MIN, f32::max)
}

pub fn min_sample(samples: &[f32]) -> f32 {
    samples.iter().copied().fold(f32::MAX, f32::min)
}

/// Median of the samples: middle element for odd counts, mean of the two
/// middle elements for even counts.
pub fn median_sample(samples: &[f32]) -> f32 {
    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_is_twenty_percent_of_travel() {
        let cal = validate(Finger::Thumb, 20.0, 60.0, 100.0).unwrap();
        assert_eq!(cal.buffer, 16.0);
    }

    #[test]
    fn equal_min_and_mid_fail() {
        let err = validate(Finger::Index, 10.0, 10.0, 20.0).unwrap_err();
        assert_eq!(err.finger, Finger::Index);
    }

    #[test]
    fn inverted_order_fails() {
        assert!(validate(Finger::Ring, 50.0, 40.0, 100.0).is_err());
        assert!(validate(Finger::Ring, 10.0, 30.0, 20.0).is_err());
    }

    #[test]
    fn failure_names_the_first_bad_finger() {
        let min = FingerMap::from_fn(|_| 10.0);
        let max = FingerMap::from_fn(|_| 100.0);
        let mut mid = FingerMap::from_fn(|_| 50.0);
        mid[Finger::Middle] = 10.0; // bad
        mid[Finger::Pinky] = 200.0; // also bad, but never reached

        let err = build_calibration(&min, &mid, &max).unwrap_err();
        assert_eq!(err.finger, Finger::Middle);
        assert_eq!(err.to_string(), "invalid middle measurements");
    }

    #[test]
    fn build_calibration_fills_every_finger() {
        let min = FingerMap::from_fn(|f| 10.0 + f.tip() as f32);
        let mid = FingerMap::from_fn(|f| 50.0 + f.tip() as f32);
        let max = FingerMap::from_fn(|f| 90.0 + f.tip() as f32);

        let cal = build_calibration(&min, &mid, &max).unwrap();
        for (_, entry) in cal.iter() {
            assert_eq!(entry.max_dist - entry.min_dist, 80.0);
            assert_eq!(entry.buffer, 16.0);
        }
    }

    #[test]
    fn median_odd_and_even() {
        assert_eq!(median_sample(&[3.0, 1.0, 2.0]), 2.0);
        assert_eq!(median_sample(&[4.0, 1.0, 3.0, 2.0]), 2.5);
        assert_eq!(median_sample(&[7.0]), 7.0);
    }

    #[test]
    fn extremes_match_sample_sequence() {
        let samples = [5.0, 2.5, 9.0, 9.0, 4.0];
        assert_eq!(max_sample(&samples), 9.0);
        assert_eq!(min_sample(&samples), 2.5);
    }
}
