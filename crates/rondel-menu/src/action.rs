use crate::error::MenuError;
use crate::icon::IconName;
use crate::ring::{SLOT_COUNT, SlotRing};
use crate::slot::GradientPair;
use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Section whose actions are shown on the ring.
pub const DEFAULT_SECTION: &str = "default";

/// Something a slot can invoke. Its icon may change at any time, the menu picks that up on the
/// next tick.
pub trait Action {
    fn icon(&self) -> Option<IconName>;
    fn execute(&mut self);
}

pub type SharedAction = Rc<RefCell<dyn Action>>;

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct MenuSection(String);

crate::impl_string_newtype!(MenuSection);

impl MenuSection {
    pub fn default_section() -> Self {
        Self::new(DEFAULT_SECTION)
    }

    pub fn is_default(&self) -> bool {
        self.0 == DEFAULT_SECTION
    }
}

/// An action as offered to the menu by its owner.
#[derive(Clone)]
pub struct MenuAction {
    pub action: SharedAction,
    pub priority: i32,
    pub section: Option<MenuSection>,
}

impl MenuAction {
    pub fn new(action: SharedAction, priority: i32, section: Option<MenuSection>) -> Self {
        Self {
            action,
            priority,
            section,
        }
    }

    fn icon_or(&self, missing: &IconName) -> IconName {
        self.action.borrow().icon().unwrap_or_else(|| missing.clone())
    }
}

impl fmt::Debug for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuAction")
            .field("icon", &self.action.borrow().icon())
            .field("priority", &self.priority)
            .field("section", &self.section)
            .finish()
    }
}

/// Holds the filtered, priority-ordered actions and binds them onto ring slots.
#[derive(Debug, Default)]
pub struct ActionBinder {
    actions: Vec<MenuAction>,
}

impl ActionBinder {
    /// Keeps default-section actions only, highest priority first. Equal priorities keep their
    /// input order. `None` clears the list.
    pub fn set(&mut self, actions: Option<Vec<MenuAction>>) {
        let mut actions: Vec<_> = actions
            .unwrap_or_default()
            .into_iter()
            .filter(|a| a.section.as_ref().is_some_and(MenuSection::is_default))
            .collect();
        actions.sort_by(|a, b| b.priority.cmp(&a.priority));

        if actions.len() > SLOT_COUNT {
            log::warn!(
                "{} actions offered to the radial menu, only the first {} are shown",
                actions.len(),
                SLOT_COUNT
            );
        }
        log::debug!("Bound {} radial menu actions", actions.len());

        self.actions = actions;
    }

    pub fn actions(&self) -> &[MenuAction] {
        &self.actions
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Number of slots that carry an action.
    pub fn bound_count(&self) -> usize {
        self.actions.len().min(SLOT_COUNT)
    }

    /// Assigns gradient and icon to every bound slot.
    pub fn bind(&self, ring: &mut SlotRing, gradient: GradientPair, missing: &IconName) {
        for (action, slot) in self.actions.iter().zip(ring.iter_mut()) {
            slot.gradient = gradient;
            slot.set_icon(action.icon_or(missing));
        }
    }

    /// Reassigns icons that changed since the last bind. Returns how many slots were touched.
    pub fn refresh_icons(&self, ring: &mut SlotRing, missing: &IconName) -> usize {
        let mut changed = 0;
        for (action, slot) in self.actions.iter().zip(ring.iter_mut()) {
            if slot.set_icon(action.icon_or(missing)) {
                log::trace!("Slot {} icon changed to {:?}", slot.order_index, slot.icon);
                changed += 1;
            }
        }
        changed
    }

    /// Runs the action bound to `index` and refreshes that slot's icon.
    pub fn invoke(
        &self,
        index: usize,
        ring: &mut SlotRing,
        missing: &IconName,
    ) -> Result<(), MenuError> {
        let action = self
            .actions
            .get(index)
            .filter(|_| index < SLOT_COUNT)
            .ok_or(MenuError::UnboundSlot(index))?;
        let slot = ring.get_mut(index).ok_or(MenuError::UnboundSlot(index))?;

        action.action.borrow_mut().execute();
        slot.set_icon(action.icon_or(missing));
        Ok(())
    }
}
