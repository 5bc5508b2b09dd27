use crate::ring::wrap_degrees;
use glam::Vec2;

/// Magnitudes below this count as a neutral stick.
const NEUTRAL_EPSILON: f32 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputUpdate {
    /// Neutral input while already neutral.
    Unchanged,
    /// Input returned to neutral.
    Cleared,
    /// Folded angle in degrees, in `[-180, 180)`.
    Angle(f32),
}

/// Turns a 2D drive vector into an angle on the ring's mirrored range.
#[derive(Debug, Clone)]
pub struct InputMapper {
    phase_offset: f32,
    direction: Vec2,
    angle: f32,
}

impl InputMapper {
    pub fn new(phase_offset: f32) -> Self {
        Self {
            phase_offset,
            direction: Vec2::ZERO,
            angle: 0.0,
        }
    }

    pub fn update(&mut self, direction: Vec2) -> InputUpdate {
        if is_neutral(direction) {
            if is_neutral(self.direction) {
                return InputUpdate::Unchanged;
            }
            self.direction = Vec2::ZERO;
            self.angle = 0.0;
            return InputUpdate::Cleared;
        }

        self.direction = direction;
        self.angle = fold_angle(direction, self.phase_offset);
        InputUpdate::Angle(self.angle)
    }

    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn phase_offset(&self) -> f32 {
        self.phase_offset
    }
}

fn is_neutral(direction: Vec2) -> bool {
    direction.length() < NEUTRAL_EPSILON
}

/// Offsets the direction's angle by `phase_offset`, reprojects it through `(cos, -sin)` and
/// reads the angle back. Slot boundaries depend on this exact sequence of operations.
pub fn fold_angle(direction: Vec2, phase_offset: f32) -> f32 {
    let offset = direction.y.atan2(direction.x).to_degrees() + phase_offset;
    let corrected = offset.to_radians();
    let reprojected = Vec2::new(corrected.cos(), -corrected.sin());
    wrap_degrees(reprojected.y.atan2(reprojected.x).to_degrees())
}
