use crate::slot::{BorderMaterial, Slot, SlotTemplate};
use glam::{Quat, Vec3};
use std::rc::Rc;

pub const SLOT_COUNT: usize = 16;
pub const ROTATION_SPACING: f32 = 22.5;
const HALF_TURN: f32 = 180.0;
const FULL_TURN: f32 = 360.0;
/// Slots past this index take the mirrored (negative) half of the circle.
const LAST_POSITIVE_SLOT: usize = 7;

/// Bounces `t` back and forth between `0` and `length`.
pub fn ping_pong(t: f32, length: f32) -> f32 {
    let t = t.rem_euclid(length * 2.0);
    length - (t - length).abs()
}

/// Wraps an angle in degrees into `[-180, 180)`.
pub fn wrap_degrees(angle: f32) -> f32 {
    if (-HALF_TURN..HALF_TURN).contains(&angle) {
        return angle;
    }
    (angle + HALF_TURN).rem_euclid(FULL_TURN) - HALF_TURN
}

/// Half-open angular sector `[min, max)` in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AngleRange {
    pub min: f32,
    pub max: f32,
}

impl AngleRange {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn for_index(index: usize) -> Self {
        let direction = if index > LAST_POSITIVE_SLOT { -1.0 } else { 1.0 };
        let start = ROTATION_SPACING * index as f32;
        Self {
            min: direction * ping_pong(start, HALF_TURN),
            max: direction * ping_pong(start + ROTATION_SPACING, HALF_TURN),
        }
    }

    pub fn contains(&self, angle: f32) -> bool {
        angle >= self.min && angle < self.max
    }

    pub fn width(&self) -> f32 {
        self.max - self.min
    }
}

/// The fixed ring of slots owned by one menu.
#[derive(Debug, Clone)]
pub struct SlotRing {
    slots: Vec<Slot>,
    border_material: Rc<BorderMaterial>,
}

impl SlotRing {
    /// Instantiates [`SLOT_COUNT`] hidden slots, positions them around the vertical axis and
    /// makes the first slot's border material the one all slots of this ring share.
    pub fn setup(template: &SlotTemplate) -> Self {
        let mut slots: Vec<Slot> = (0..SLOT_COUNT).map(|i| template.instantiate(i)).collect();
        let border_material = Rc::clone(&slots[0].border_material);

        for (i, slot) in slots.iter_mut().enumerate() {
            slot.border_material = Rc::clone(&border_material);
            slot.visible_local_rotation =
                Quat::from_axis_angle(Vec3::Y, (ROTATION_SPACING * i as f32).to_radians());
            slot.range = AngleRange::for_index(i);
            slot.hide();
        }

        Self {
            slots,
            border_material,
        }
    }

    /// Index of the slot whose range holds `angle`, after wrapping it into `[-180, 180)`.
    pub fn slot_for_angle(&self, angle: f32) -> Option<usize> {
        let angle = wrap_degrees(angle);
        self.slots.iter().position(|slot| slot.range.contains(angle))
    }

    pub fn border_material(&self) -> &Rc<BorderMaterial> {
        &self.border_material
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn get(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Slot> {
        self.slots.get_mut(index)
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Slot> {
        self.slots.iter_mut()
    }

    pub fn hide_all(&mut self) {
        self.slots.iter_mut().for_each(Slot::hide);
    }
}
