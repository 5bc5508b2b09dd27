use super::{DEAD_ZONE_RADIUS, MAX_FRAME_DELTA, REFERENCE_HEIGHT};
use glam::{DVec2, EulerRot, Quat, Vec2};
use rondel_menu::ROTATION_SPACING;
use std::cell::Cell;

/// Where the ring is drawn on screen and how big.
#[derive(Debug, Clone, Copy)]
pub struct MenuLayout {
    pub center: DVec2,
    pub scale_factor: f64,
    /// Screen angle, in radians, of a slot at rest in the hidden rotation.
    pub phase: f64,
}

impl MenuLayout {
    /// Places the first slot's wedge where the folded input angle lands on it.
    pub fn new(phase_offset: f32) -> Self {
        Self {
            center: DVec2::ZERO,
            scale_factor: 1.0,
            phase: (phase_offset as f64 + ROTATION_SPACING as f64 / 2.0).to_radians(),
        }
    }

    pub fn refresh(&mut self, center: DVec2, monitor_height: f64) {
        self.center = center;
        self.scale_factor = monitor_height / REFERENCE_HEIGHT;
    }

    /// Pointer offset from the center as an input direction with y pointing up. Inside the
    /// dead zone the direction is neutral.
    pub fn input_direction(&self, cursor: DVec2) -> Vec2 {
        let offset = cursor - self.center;
        let distance = offset.length();
        if distance <= DEAD_ZONE_RADIUS * self.scale_factor {
            return Vec2::ZERO;
        }

        let unit = offset / distance;
        Vec2::new(unit.x as f32, -unit.y as f32)
    }

    /// Screen angle, clockwise from +x, of a slot with the given rotation.
    pub fn slot_angle(&self, rotation: Quat) -> f64 {
        let (yaw, _, _) = rotation.to_euler(EulerRot::YXZ);
        self.phase + yaw as f64
    }

    pub fn scaled(&self, length: f64) -> f64 {
        length * self.scale_factor
    }
}

/// Turns frame clock timestamps into unscaled deltas in seconds.
#[derive(Debug, Default)]
pub struct FrameTimer {
    last: Cell<Option<i64>>,
}

impl FrameTimer {
    /// `frame_time` is in microseconds. The first frame after a reset yields zero, long stalls
    /// are capped so a resumed animation does not jump to its end.
    pub fn delta(&self, frame_time: i64) -> f32 {
        let delta = self
            .last
            .replace(Some(frame_time))
            .map_or(0.0, |last| (frame_time - last).max(0) as f32 / 1_000_000.0);
        delta.min(MAX_FRAME_DELTA)
    }

    pub fn reset(&self) {
        self.last.set(None);
    }
}
