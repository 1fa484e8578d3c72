use crate::constants::{AIR_OFFSET, AIR_SCALE};

/// Converts a raw flow sample into a physical flow value.
///
/// Returns `(raw - offset) / scale`. Values below the offset come out
/// negative and are kept as is.
pub fn to_physical(raw: u16, offset: f32, scale: f32) -> f32 {
    (f32::from(raw) - offset) / scale
}

/// Offset and scale turning raw counts into a flow rate for one medium.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Calibration {
    /// Raw count reported at zero flow.
    pub offset: f32,
    /// Raw counts per unit of flow.
    pub scale: f32,
}

impl Calibration {
    /// Datasheet calibration for air, giving the flow in slm.
    pub const AIR: Calibration = Calibration {
        offset: AIR_OFFSET,
        scale: AIR_SCALE,
    };

    /// Creates a calibration from a datasheet offset and scale pair.
    pub const fn new(offset: f32, scale: f32) -> Self {
        Self { offset, scale }
    }

    /// Applies this calibration to a raw sample.
    pub fn apply(&self, raw: u16) -> f32 {
        to_physical(raw, self.offset, self.scale)
    }
}

impl Default for Calibration {
    fn default() -> Self {
        Calibration::AIR
    }
}
