use glam::Vec2;
use rondel_menu::{
    Action, AnimationState, DEFAULT_SECTION, IconName, MenuAction, MenuSection, MenuSettings,
    RadialMenu, SLOT_COUNT, SlotTemplate,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

const DT: f32 = 1.0 / 60.0;
const MAX_TICKS: usize = 2000;

struct Counter {
    icon: Option<IconName>,
    runs: Rc<Cell<usize>>,
}

impl Action for Counter {
    fn icon(&self) -> Option<IconName> {
        self.icon.clone()
    }

    fn execute(&mut self) {
        self.runs.set(self.runs.get() + 1);
    }
}

fn counter(icon: &str) -> Rc<RefCell<Counter>> {
    Rc::new(RefCell::new(Counter {
        icon: Some(IconName::new(icon)),
        runs: Rc::new(Cell::new(0)),
    }))
}

fn entries(count: usize) -> Vec<MenuAction> {
    (0..count)
        .map(|i| {
            MenuAction::new(
                counter(&format!("action-{i}")),
                0,
                Some(MenuSection::default_section()),
            )
        })
        .collect()
}

fn menu() -> RadialMenu {
    let mut menu =
        RadialMenu::new(MenuSettings::default()).with_slot_template(SlotTemplate::default());
    menu.setup().unwrap();
    menu.start();
    menu
}

/// Ticks until no animation is running. Returns the number of ticks taken.
fn settle(menu: &mut RadialMenu) -> usize {
    for n in 1..=MAX_TICKS {
        menu.tick(DT);
        if menu.animation_state() == AnimationState::Idle {
            return n;
        }
    }
    panic!("animation did not settle within {MAX_TICKS} ticks");
}

#[test]
fn test_reveal_and_conceal_end_to_end() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut menu = menu();
    menu.set_actions(Some(entries(3)));

    menu.set_visible(true);
    assert!(menu.is_active());
    assert!(menu.mask().active);
    assert_eq!(menu.animation_state(), AnimationState::Revealing);

    settle(&mut menu);

    for (i, slot) in menu.slots().iter().enumerate() {
        if i < 3 {
            assert!(slot.shown, "slot {i} should be shown");
            assert_eq!(slot.icon, Some(IconName::new(format!("action-{i}"))));
            assert!(slot.rotation.abs_diff_eq(slot.visible_local_rotation, 1e-5));
        } else {
            assert!(!slot.shown, "slot {i} should be hidden");
            assert_eq!(slot.icon, None);
        }
    }
    assert!(menu.mask().fill_amount.abs() < 1e-6);
    assert!(menu.is_active());

    menu.set_visible(false);
    assert_eq!(menu.animation_state(), AnimationState::Concealing);
    assert!(menu.slots().iter().all(|s| !s.shown));

    settle(&mut menu);

    assert!(!menu.visible());
    assert!(!menu.is_active());
    assert!(!menu.mask().active);
}

#[test]
fn test_empty_actions_while_visible_conceal() {
    let mut menu = menu();
    menu.set_actions(Some(entries(2)));
    menu.set_visible(true);
    settle(&mut menu);

    menu.set_actions(Some(Vec::new()));

    assert!(!menu.visible());
    assert_eq!(menu.animation_state(), AnimationState::Concealing);
    settle(&mut menu);
    assert!(!menu.is_active());
}

#[test]
fn test_missing_actions_while_visible_conceal() {
    let mut menu = menu();
    menu.set_actions(Some(entries(2)));
    menu.set_visible(true);
    for _ in 0..5 {
        menu.tick(DT);
    }

    menu.set_actions(None);

    assert!(menu.actions().is_empty());
    assert_eq!(menu.animation_state(), AnimationState::Concealing);
    settle(&mut menu);
    assert!(!menu.visible());
    assert!(!menu.is_active());
}

#[test]
fn test_rebinding_while_visible_restarts_reveal() {
    let mut menu = menu();
    menu.set_actions(Some(entries(6)));
    menu.set_visible(true);
    settle(&mut menu);

    // Slot 4 sits straight left with the default phase offset.
    menu.set_input_direction(Vec2::NEG_X);
    assert_eq!(menu.highlighted(), Some(4));

    menu.set_actions(Some(entries(2)));

    assert_eq!(menu.animation_state(), AnimationState::Revealing);
    assert_eq!(menu.mask().fill_amount, 1.0);
    assert_eq!(menu.highlighted(), None);
    for _ in 0..3 {
        menu.tick(DT);
        for slot in menu.slots().iter().skip(2) {
            assert!(!slot.highlighted, "unbound slot {} highlighted", slot.order_index);
        }
    }

    settle(&mut menu);
    let shown: Vec<_> = menu
        .slots()
        .iter()
        .filter(|s| s.shown)
        .map(|s| s.order_index)
        .collect();
    assert_eq!(shown, vec![0, 1]);
}

#[test]
fn test_neutral_input_twice_is_stable() {
    let mut menu = menu();
    menu.set_actions(Some(entries(SLOT_COUNT)));

    menu.set_input_direction(Vec2::new(0.3, -0.8));
    assert!(menu.highlighted().is_some());

    menu.set_input_direction(Vec2::ZERO);
    assert_eq!(menu.highlighted(), None);
    assert_eq!(menu.input_angle(), 0.0);
    assert!(menu.slots().iter().all(|s| !s.highlighted));

    menu.set_input_direction(Vec2::ZERO);
    assert_eq!(menu.highlighted(), None);
    assert_eq!(menu.input_angle(), 0.0);
    assert!(menu.slots().iter().all(|s| !s.highlighted));
}

#[test]
fn test_every_direction_highlights_one_slot_when_full() {
    let mut menu = menu();
    menu.set_actions(Some(entries(SLOT_COUNT)));

    for step in 0..360 {
        let radians = (step as f32 + 0.5).to_radians();
        menu.set_input_direction(Vec2::new(radians.cos(), radians.sin()));

        let lit = menu.slots().iter().filter(|s| s.highlighted).count();
        assert_eq!(lit, 1, "direction at {step}.5 degrees");
    }
}

#[test]
fn test_overflowing_actions_are_ignored() {
    let mut menu = menu();
    menu.set_actions(Some(entries(SLOT_COUNT + 4)));
    menu.set_visible(true);
    settle(&mut menu);

    assert_eq!(menu.actions().len(), SLOT_COUNT + 4);
    assert!(menu.slots().iter().all(|s| s.shown));
    assert_eq!(
        menu.slots()[SLOT_COUNT - 1].icon,
        Some(IconName::new(format!("action-{}", SLOT_COUNT - 1)))
    );
}

#[test]
fn test_priority_decides_slot_order() {
    let mut menu = menu();
    let low = counter("low");
    let high = counter("high");
    let hidden = counter("hidden");
    menu.set_actions(Some(vec![
        MenuAction::new(low, -1, Some(MenuSection::new(DEFAULT_SECTION))),
        MenuAction::new(hidden, 99, Some(MenuSection::new("context"))),
        MenuAction::new(high, 3, Some(MenuSection::new(DEFAULT_SECTION))),
    ]));
    menu.set_visible(true);
    settle(&mut menu);

    assert_eq!(menu.slots()[0].icon, Some(IconName::new("high")));
    assert_eq!(menu.slots()[1].icon, Some(IconName::new("low")));
    assert!(!menu.slots()[2].shown);
}

#[test]
fn test_icon_changes_are_picked_up_on_tick() {
    let mut menu = menu();
    let loading = Rc::new(RefCell::new(Counter {
        icon: None,
        runs: Rc::new(Cell::new(0)),
    }));
    menu.set_actions(Some(vec![MenuAction::new(
        loading.clone(),
        0,
        Some(MenuSection::default_section()),
    )]));
    menu.set_visible(true);
    menu.tick(DT);

    assert_eq!(menu.slots()[0].icon, Some(MenuSettings::default().missing_icon));

    loading.borrow_mut().icon = Some(IconName::new("loaded"));
    menu.tick(DT);

    assert_eq!(menu.slots()[0].icon, Some(IconName::new("loaded")));
}

#[test]
fn test_trigger_selection_runs_highlighted_action() {
    let mut menu = menu();
    let runs: Vec<_> = (0..SLOT_COUNT).map(|_| Rc::new(Cell::new(0usize))).collect();
    let actions: Vec<_> = runs
        .iter()
        .enumerate()
        .map(|(i, runs)| {
            MenuAction::new(
                Rc::new(RefCell::new(Counter {
                    icon: Some(IconName::new(format!("action-{i}"))),
                    runs: Rc::clone(runs),
                })),
                0,
                Some(MenuSection::default_section()),
            )
        })
        .collect();
    menu.set_actions(Some(actions));
    menu.set_visible(true);
    settle(&mut menu);

    assert!(!menu.trigger_selection());

    menu.set_input_direction(Vec2::NEG_Y);
    assert!(menu.trigger_selection());

    assert_eq!(runs[0].get(), 1);
    assert!(runs.iter().skip(1).all(|r| r.get() == 0));
}

#[test]
fn test_press_marks_highlighted_slot() {
    let mut menu = menu();
    menu.set_actions(Some(entries(SLOT_COUNT)));
    menu.set_visible(true);
    settle(&mut menu);
    menu.set_input_direction(Vec2::NEG_X);

    menu.set_pressed_down(true);

    let pressed: Vec<_> = menu
        .slots()
        .iter()
        .filter(|s| s.pressed)
        .map(|s| s.order_index)
        .collect();
    assert_eq!(pressed, vec![4]);
    assert!(menu.visible());

    menu.set_pressed_down(false);
    assert!(menu.slots().iter().all(|s| !s.pressed));
}

#[test]
fn test_press_in_empty_space_dismisses() {
    let mut menu = menu();
    let dismissed = Rc::new(Cell::new(0));
    {
        let dismissed = Rc::clone(&dismissed);
        menu.on_empty_press(move || dismissed.set(dismissed.get() + 1));
    }
    menu.set_actions(Some(entries(3)));
    menu.set_visible(true);
    settle(&mut menu);

    menu.set_pressed_down(true);

    assert_eq!(dismissed.get(), 1);
    assert!(!menu.visible());
    assert_eq!(menu.animation_state(), AnimationState::Concealing);

    menu.set_pressed_down(true);
    assert_eq!(dismissed.get(), 1);

    settle(&mut menu);
    assert!(!menu.is_active());
}

#[test]
fn test_hiding_mid_reveal_cancels_it() {
    let mut menu = menu();
    menu.set_actions(Some(entries(5)));
    menu.set_visible(true);
    for _ in 0..4 {
        menu.tick(DT);
    }

    menu.set_visible(false);
    assert_eq!(menu.animation_state(), AnimationState::Concealing);
    assert_eq!(menu.mask().fill_amount, 1.0);

    let ticks = settle(&mut menu);
    assert!(ticks <= 13, "{ticks}");
    assert!(!menu.is_active());
}

#[test]
fn test_directions_near_a_boundary_keep_their_side() {
    let mut menu = menu();
    menu.set_actions(Some(entries(SLOT_COUNT)));
    let phase_offset = menu.settings().phase_offset;

    // Straight right minus the phase offset folds onto the seam between slots 15 and 0.
    let seam = -phase_offset;
    let (mut below, mut above) = (0, 0);
    for step in -1000..=1000 {
        let radians = (seam + step as f32 * 1e-6).to_radians();
        let direction = Vec2::new(radians.cos(), radians.sin());

        let offset = (direction.y.atan2(direction.x).to_degrees() + phase_offset).to_radians();
        let unwrapped = (-offset.sin()).atan2(offset.cos()).to_degrees();
        let expected = if unwrapped < 0.0 {
            below += 1;
            15
        } else {
            above += 1;
            0
        };

        menu.set_input_direction(direction);
        assert_eq!(
            menu.highlighted(),
            Some(expected),
            "direction {direction} folds to {unwrapped}"
        );
    }
    assert!(below > 0 && above > 0, "below {below}, above {above}");
}
