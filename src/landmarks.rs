use crate::types::{FingerMap, HandLandmarks, HandSnapshot};

/// Palm landmark index in the 21-point hand model.
pub const PALM: usize = 0;

/// Reduce one hand's landmarks to the five tip-to-palm distances plus the
/// palm position, all in image-pixel space.
pub fn snapshot(hand: &HandLandmarks) -> HandSnapshot {
    let (palm_x, palm_y) = hand.points[PALM];
    let distances = FingerMap::from_fn(|finger| {
        let (tip_x, tip_y) = hand.points[finger.tip()];
        (palm_x - tip_x).hypot(palm_y - tip_y)
    });

    HandSnapshot {
        distances,
        palm: (palm_x, palm_y),
    }
}
