//! Stylus pick shape parameters

use crate::scene::environment::HandSide;

/// Shape parameters of a stylus pick: which hand controller tip it rides.
///
/// Stylus picks take their world pose directly from the hand controller
/// each frame, so there is no local offset to transform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StylusShape {
    pub side: HandSide,
}
