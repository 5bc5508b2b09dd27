//! A sixteen slot radial menu, driven by a 2D direction and a per-frame tick.
//!
//! The menu owns no window or renderer. A host feeds it actions, an input direction and the
//! unscaled frame delta, then draws [`RadialMenu::slots`] and [`RadialMenu::mask`].

mod macros;

pub mod action;
pub mod animation;
pub mod controller;
pub mod error;
pub mod icon;
pub mod input;
pub mod ring;
pub mod settings;
pub mod slot;

pub use action::{Action, ActionBinder, DEFAULT_SECTION, MenuAction, MenuSection, SharedAction};
pub use animation::{AnimationState, SlotsMask};
pub use controller::{AnchorId, RadialMenu, Transform};
pub use error::MenuError;
pub use icon::IconName;
pub use ring::{AngleRange, ROTATION_SPACING, SLOT_COUNT, SlotRing};
pub use settings::MenuSettings;
pub use slot::{BorderMaterial, GradientPair, HIDDEN_LOCAL_ROTATION, Slot, SlotTemplate};
