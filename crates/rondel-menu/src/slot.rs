use crate::icon::IconName;
use crate::ring::AngleRange;
use glam::Quat;
use palette::Srgba;
use std::rc::Rc;

/// Collapsed rotation every slot sweeps from and back to.
pub const HIDDEN_LOCAL_ROTATION: Quat = Quat::IDENTITY;

/// The two colors a bound slot's border is shaded between.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientPair {
    pub start: Srgba<f64>,
    pub end: Srgba<f64>,
}

impl GradientPair {
    pub fn new(start: Srgba<f64>, end: Srgba<f64>) -> Self {
        Self { start, end }
    }
}

impl Default for GradientPair {
    fn default() -> Self {
        Self {
            start: Srgba::new(0.13, 0.59, 0.95, 1.0),
            end: Srgba::new(0.61, 0.15, 0.69, 1.0),
        }
    }
}

/// Parameters the host uses to stroke slot borders.
#[derive(Debug, Clone, PartialEq)]
pub struct BorderMaterial {
    pub width: f64,
    pub alpha: f64,
}

impl Default for BorderMaterial {
    fn default() -> Self {
        Self {
            width: 2.0,
            alpha: 0.9,
        }
    }
}

/// Blueprint the ring instantiates its slots from.
#[derive(Debug, Clone, Default)]
pub struct SlotTemplate {
    pub border_material: BorderMaterial,
}

impl SlotTemplate {
    pub fn new(border_material: BorderMaterial) -> Self {
        Self { border_material }
    }

    /// Creates a hidden, unpositioned slot with its own copy of the border material.
    pub fn instantiate(&self, order_index: usize) -> Slot {
        Slot {
            order_index,
            range: AngleRange::default(),
            highlighted: false,
            pressed: false,
            shown: false,
            icon: None,
            gradient: GradientPair::default(),
            visible_local_rotation: Quat::IDENTITY,
            rotation: HIDDEN_LOCAL_ROTATION,
            border_material: Rc::new(self.border_material.clone()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Slot {
    pub order_index: usize,
    pub range: AngleRange,
    pub highlighted: bool,
    pub pressed: bool,
    pub shown: bool,
    pub icon: Option<IconName>,
    pub gradient: GradientPair,
    /// Resting rotation about the vertical axis once fully revealed.
    pub visible_local_rotation: Quat,
    /// Current rotation, somewhere between hidden and visible.
    pub rotation: Quat,
    pub border_material: Rc<BorderMaterial>,
}

impl Slot {
    pub fn show(&mut self) {
        self.shown = true;
    }

    pub fn hide(&mut self) {
        self.shown = false;
    }

    /// Returns `true` when the icon actually changed.
    pub fn set_icon(&mut self, icon: IconName) -> bool {
        if self.icon.as_ref() == Some(&icon) {
            return false;
        }
        self.icon = Some(icon);
        true
    }

    /// Places the slot `t` of the way from its hidden to its visible rotation.
    pub fn sweep(&mut self, t: f32) {
        self.rotation = HIDDEN_LOCAL_ROTATION.lerp(self.visible_local_rotation, t.clamp(0.0, 1.0));
    }
}
