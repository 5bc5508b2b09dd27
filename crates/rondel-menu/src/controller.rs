use crate::action::{ActionBinder, MenuAction};
use crate::animation::{
    Animation, AnimationContext, AnimationState, Animator, Conceal, Reveal, SlotsMask,
};
use crate::error::MenuError;
use crate::input::{InputMapper, InputUpdate};
use crate::ring::SlotRing;
use crate::settings::MenuSettings;
use crate::slot::{GradientPair, Slot, SlotTemplate};
use derive_more::{Display, From, Into};
use glam::{Quat, Vec2, Vec3};

/// Opaque handle of a host transform the menu can be attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, From, Into)]
pub struct AnchorId(u64);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub parent: Option<AnchorId>,
    pub local_position: Vec3,
    pub local_rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            parent: None,
            local_position: Vec3::ZERO,
            local_rotation: Quat::IDENTITY,
        }
    }
}

/// A ring of selectable slots driven by a 2D direction and a per-frame `tick`.
pub struct RadialMenu {
    settings: MenuSettings,
    slot_template: Option<SlotTemplate>,
    ring: Option<SlotRing>,
    binder: ActionBinder,
    input: InputMapper,
    animator: Animator,
    mask: SlotsMask,
    gradient: GradientPair,
    visible: bool,
    active: bool,
    pressed_down: bool,
    highlighted: Option<usize>,
    transform: Transform,
    on_empty_press: Option<Box<dyn FnMut()>>,
}

impl RadialMenu {
    pub fn new(settings: MenuSettings) -> Self {
        Self {
            input: InputMapper::new(settings.phase_offset),
            settings,
            slot_template: None,
            ring: None,
            binder: ActionBinder::default(),
            animator: Animator::default(),
            mask: SlotsMask::default(),
            gradient: GradientPair::default(),
            visible: false,
            active: false,
            pressed_down: false,
            highlighted: None,
            transform: Transform::default(),
            on_empty_press: None,
        }
    }

    pub fn with_slot_template(mut self, template: SlotTemplate) -> Self {
        self.slot_template = Some(template);
        self
    }

    /// Builds the slot ring from the slot template and leaves every slot hidden.
    pub fn setup(&mut self) -> Result<(), MenuError> {
        let template = self
            .slot_template
            .as_ref()
            .ok_or(MenuError::MissingSlotTemplate)?;

        self.ring = Some(SlotRing::setup(template));
        self.highlighted = None;
        self.animator.cancel();
        self.begin_conceal();
        Ok(())
    }

    pub fn start(&mut self) {
        self.mask.active = false;
    }

    pub fn stop(&mut self) {
        self.animator.cancel();
    }

    /// Advances the menu by `dt` seconds of unscaled time.
    pub fn tick(&mut self, dt: f32) {
        let Some(ring) = self.ring.as_mut() else {
            return;
        };

        self.binder.refresh_icons(ring, &self.settings.missing_icon);

        let ctx = AnimationContext {
            ring,
            mask: &mut self.mask,
            bound: self.binder.bound_count(),
        };
        if self.animator.tick(dt, ctx) == Some(AnimationState::Concealing) {
            self.active = false;
            log::debug!("Radial menu deactivated");
        }
    }

    pub fn actions(&self) -> &[MenuAction] {
        self.binder.actions()
    }

    /// Replaces the offered actions. An empty or missing list closes a visible menu; a
    /// non-empty one restarts the reveal.
    pub fn set_actions(&mut self, actions: Option<Vec<MenuAction>>) {
        self.binder.set(actions);
        self.drop_unbound_highlight();

        if self.binder.is_empty() {
            if self.visible && self.ring.is_some() {
                self.set_visible(false);
            }
        } else if self.visible {
            self.animator.cancel();
            self.begin_reveal();
        }
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        if self.visible == visible {
            return;
        }

        self.visible = visible;
        self.animator.cancel();
        self.active = true;

        if visible && !self.binder.is_empty() {
            self.begin_reveal();
        } else if !visible && self.ring.is_some() {
            self.begin_conceal();
        } else if !visible {
            self.active = false;
        }
    }

    /// Whether the host should keep the menu alive. Becomes `false` once a conceal finishes.
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_input_direction(&mut self, direction: Vec2) {
        let update = self.input.update(direction);
        let Some(ring) = self.ring.as_mut() else {
            return;
        };

        let target = match update {
            InputUpdate::Unchanged => return,
            InputUpdate::Cleared => None,
            InputUpdate::Angle(angle) => ring
                .slot_for_angle(angle)
                .filter(|&i| i < self.binder.bound_count()),
        };

        for (i, slot) in ring.iter_mut().enumerate() {
            slot.highlighted = target == Some(i);
        }
        self.highlighted = target;
    }

    pub fn input_direction(&self) -> Vec2 {
        self.input.direction()
    }

    /// Folded input angle in degrees, `0.0` while the input is neutral.
    pub fn input_angle(&self) -> f32 {
        self.input.angle()
    }

    pub fn pressed_down(&self) -> bool {
        self.pressed_down
    }

    /// Presses the highlighted slot. Pressing with nothing highlighted dismisses the menu.
    pub fn set_pressed_down(&mut self, pressed: bool) {
        if self.pressed_down == pressed {
            return;
        }
        self.pressed_down = pressed;

        if let Some(ring) = self.ring.as_mut() {
            for (i, slot) in ring.iter_mut().enumerate() {
                slot.pressed = pressed && self.highlighted == Some(i);
            }
        }

        if pressed && self.highlighted.is_none() {
            if let Some(callback) = self.on_empty_press.as_mut() {
                callback();
            }
            self.set_visible(false);
        }
    }

    /// Invokes the highlighted slot. Returns `false` when nothing is highlighted.
    pub fn trigger_selection(&mut self) -> bool {
        let Some(index) = self.highlighted else {
            return false;
        };

        match self.activate_slot(index) {
            Ok(()) => true,
            Err(e) => {
                log::error!("Failed to activate radial menu slot {}: {}", index, e);
                false
            }
        }
    }

    /// Runs the action bound to `index`, as if its slot had been clicked.
    pub fn activate_slot(&mut self, index: usize) -> Result<(), MenuError> {
        let ring = self.ring.as_mut().ok_or(MenuError::NotSetUp)?;
        self.binder.invoke(index, ring, &self.settings.missing_icon)
    }

    /// Called when a press lands outside every slot, before the menu closes.
    pub fn on_empty_press(&mut self, callback: impl FnMut() + 'static) {
        self.on_empty_press = Some(Box::new(callback));
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Attaches the menu to another anchor and resets its local placement.
    pub fn set_alternate_origin(&mut self, origin: Option<AnchorId>) {
        if self.transform.parent == origin {
            return;
        }

        self.transform = Transform {
            parent: origin,
            ..Transform::default()
        };
    }

    pub fn alternate_origin(&self) -> Option<AnchorId> {
        self.transform.parent
    }

    /// Colors handed to slots the next time actions are bound.
    pub fn set_gradient(&mut self, gradient: GradientPair) {
        self.gradient = gradient;
    }

    pub fn slots(&self) -> &[Slot] {
        self.ring.as_ref().map(SlotRing::slots).unwrap_or_default()
    }

    pub fn slot(&self, index: usize) -> Option<&Slot> {
        self.ring.as_ref().and_then(|ring| ring.get(index))
    }

    pub fn ring(&self) -> Option<&SlotRing> {
        self.ring.as_ref()
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn mask(&self) -> &SlotsMask {
        &self.mask
    }

    pub fn animation_state(&self) -> AnimationState {
        self.animator.state()
    }

    pub fn settings(&self) -> &MenuSettings {
        &self.settings
    }

    fn begin_reveal(&mut self) {
        let Some(ring) = self.ring.as_mut() else {
            log::debug!("Radial menu shown before setup, nothing to reveal");
            return;
        };

        self.binder.bind(ring, self.gradient, &self.settings.missing_icon);
        let task = Reveal::begin(&mut self.mask, &self.settings);
        self.animator.start(Animation::Reveal(task));
    }

    fn begin_conceal(&mut self) {
        let Some(ring) = self.ring.as_mut() else {
            return;
        };

        let ctx = AnimationContext {
            ring,
            mask: &mut self.mask,
            bound: self.binder.bound_count(),
        };
        match Conceal::begin(ctx, &self.settings) {
            Some(task) => self.animator.start(Animation::Conceal(task)),
            None => self.active = false,
        }
    }

    fn drop_unbound_highlight(&mut self) {
        let bound = self.binder.bound_count();
        if self.highlighted.is_some_and(|i| i >= bound) {
            self.highlighted = None;
        }
        if let Some(ring) = self.ring.as_mut() {
            for slot in ring.iter_mut().skip(bound) {
                slot.highlighted = false;
                slot.pressed = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{Action, MenuSection};
    use crate::icon::IconName;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Noop;

    impl Action for Noop {
        fn icon(&self) -> Option<IconName> {
            None
        }

        fn execute(&mut self) {}
    }

    fn menu_with(count: usize) -> RadialMenu {
        let mut menu =
            RadialMenu::new(MenuSettings::default()).with_slot_template(SlotTemplate::default());
        menu.setup().unwrap();
        menu.set_actions(Some(
            (0..count)
                .map(|_| {
                    MenuAction::new(
                        Rc::new(RefCell::new(Noop)),
                        0,
                        Some(MenuSection::default_section()),
                    )
                })
                .collect(),
        ));
        menu
    }

    #[test]
    fn test_setup_without_template_fails() {
        let mut menu = RadialMenu::new(MenuSettings::default());

        assert_eq!(menu.setup(), Err(MenuError::MissingSlotTemplate));
        assert!(menu.slots().is_empty());
        assert_eq!(menu.activate_slot(0), Err(MenuError::NotSetUp));
    }

    #[test]
    fn test_setup_leaves_menu_hidden_and_inactive() {
        let menu = menu_with(0);

        assert_eq!(menu.slots().len(), 16);
        assert!(menu.slots().iter().all(|s| !s.shown && !s.highlighted));
        assert!(!menu.is_active());
        assert_eq!(menu.animation_state(), AnimationState::Idle);
    }

    #[test]
    fn test_cardinal_input_highlights_expected_slots() {
        let mut menu = menu_with(16);

        let cases = [
            (Vec2::X, 12),
            (Vec2::Y, 8),
            (Vec2::NEG_X, 4),
            (Vec2::NEG_Y, 0),
        ];
        for (direction, expected) in cases {
            menu.set_input_direction(direction);
            assert_eq!(menu.highlighted(), Some(expected), "{direction}");
            let lit: Vec<_> = menu
                .slots()
                .iter()
                .filter(|s| s.highlighted)
                .map(|s| s.order_index)
                .collect();
            assert_eq!(lit, vec![expected]);
        }
    }

    #[test]
    fn test_unbound_slots_are_never_highlighted() {
        let mut menu = menu_with(3);

        menu.set_input_direction(Vec2::X);
        assert_eq!(menu.highlighted(), None);
        assert!(menu.slots().iter().all(|s| !s.highlighted));

        menu.set_input_direction(Vec2::NEG_Y);
        assert_eq!(menu.highlighted(), Some(0));
    }

    #[test]
    fn test_alternate_origin_resets_local_transform() {
        let mut menu = menu_with(1);
        menu.transform.local_position = Vec3::ONE;

        menu.set_alternate_origin(Some(AnchorId::from(7)));

        assert_eq!(menu.alternate_origin(), Some(AnchorId::from(7)));
        assert_eq!(menu.transform().local_position, Vec3::ZERO);
        assert_eq!(menu.transform().local_rotation, Quat::IDENTITY);

        menu.transform.local_position = Vec3::X;
        menu.set_alternate_origin(Some(AnchorId::from(7)));
        assert_eq!(menu.transform().local_position, Vec3::X);
    }

    #[test]
    fn test_stop_freezes_a_running_reveal() {
        let mut menu = menu_with(4);
        menu.set_visible(true);
        for _ in 0..3 {
            menu.tick(1.0 / 60.0);
        }
        assert_eq!(menu.animation_state(), AnimationState::Revealing);

        menu.stop();

        assert_eq!(menu.animation_state(), AnimationState::Idle);
        let rotations: Vec<_> = menu.slots().iter().map(|s| s.rotation).collect();
        let mask = *menu.mask();
        for _ in 0..10 {
            menu.tick(1.0 / 60.0);
        }
        let frozen: Vec<_> = menu.slots().iter().map(|s| s.rotation).collect();
        assert_eq!(frozen, rotations);
        assert_eq!(*menu.mask(), mask);
        assert!(menu.mask().active);
        assert!(menu.is_active());
    }

    #[test]
    fn test_visible_before_setup_keeps_widget_dormant() {
        let mut menu = RadialMenu::new(MenuSettings::default());

        menu.set_visible(true);
        assert!(menu.is_active());
        assert_eq!(menu.animation_state(), AnimationState::Idle);

        menu.set_visible(false);
        assert!(!menu.is_active());
    }
}
