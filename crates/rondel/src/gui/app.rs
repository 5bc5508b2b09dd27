use crate::actions;
use crate::config;
use crate::events::AppEvent;
use crate::gui::menu::{self, FrameTimer, MenuLayout, PixbufCache, REFERENCE_HEIGHT};
use crate::gui::theme::{self, ThemeColors};
use crate::gui::window;
use glam::DVec2;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use rondel_menu::{IconName, RadialMenu};
use std::cell::RefCell;
use std::rc::Rc;

pub struct AppModel {
    pub menu: Rc<RefCell<RadialMenu>>,
    pub layout: Rc<RefCell<MenuLayout>>,
    pub frames: Rc<FrameTimer>,
    pub pixbufs: Rc<RefCell<PixbufCache>>,
    pub visible: bool,
    pub icon_requests: async_channel::Sender<Vec<IconName>>,
    pub root: gtk::ApplicationWindow,
    pub drawing_area: gtk::DrawingArea,
}

pub struct AppInit {
    pub menu: RadialMenu,
    pub icon_requests: async_channel::Sender<Vec<IconName>>,
    pub events: async_channel::Receiver<AppEvent>,
}

#[derive(Debug)]
pub enum AppMsg {
    Show,
    Hide,
    Toggle,
    Press,
    Release,
    CursorMove(DVec2),
    Concealed,
    ConfigReload,
    IconResolved(IconName),
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Show => AppMsg::Show,
            AppEvent::Hide => AppMsg::Hide,
            AppEvent::Toggle => AppMsg::Toggle,
            AppEvent::ConfigReload => AppMsg::ConfigReload,
            AppEvent::IconResolved(name) => AppMsg::IconResolved(name),
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = AppInit;
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Rondel"),
            #[watch]
            set_visible: model.visible,
            add_css_class: "rondel-window",
            set_decorated: false,

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Hide);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                add_css_class: "rondel-drawing-area",

                add_controller = gtk::EventControllerMotion {
                    connect_motion[sender] => move |_, x, y| {
                        sender.input(AppMsg::CursorMove(DVec2::new(x, y)));
                    }
                },

                add_controller = gtk::GestureClick {
                    set_button: 0, // Listen to all buttons
                    connect_pressed[sender] => move |_, _, _, _| {
                        sender.input(AppMsg::Press);
                    },
                    connect_released[sender] => move |_, _, _, _| {
                        sender.input(AppMsg::Release);
                    }
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let AppInit {
            mut menu,
            icon_requests,
            events,
        } = init;

        theme::load_css();
        window::init_layer_shell(&root);

        menu.on_empty_press(|| log::debug!("Press outside the ring, dismissing"));
        let layout = MenuLayout::new(menu.settings().phase_offset);

        let model = AppModel {
            menu: Rc::new(RefCell::new(menu)),
            layout: Rc::new(RefCell::new(layout)),
            frames: Rc::new(FrameTimer::default()),
            pixbufs: Rc::new(RefCell::new(PixbufCache::default())),
            visible: false,
            icon_requests,
            root: root.clone(),
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let (menu_draw, layout_draw, pixbufs_draw) = (
            model.menu.clone(),
            model.layout.clone(),
            model.pixbufs.clone(),
        );
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, _, _| {
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                if let Err(e) = menu::draw(
                    cr,
                    &menu_draw.borrow(),
                    &layout_draw.borrow(),
                    &colors,
                    &mut pixbufs_draw.borrow_mut(),
                ) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let (menu_tick, frames_tick, sender_tick) =
            (model.menu.clone(), model.frames.clone(), sender.clone());
        widgets
            .drawing_area
            .add_tick_callback(move |drawing_area, clock| {
                let dt = frames_tick.delta(clock.frame_time());
                let mut menu = menu_tick.borrow_mut();
                let was_active = menu.is_active();

                menu.tick(dt);

                if was_active && !menu.is_active() {
                    sender_tick.input(AppMsg::Concealed);
                }
                drawing_area.queue_draw();
                glib::ControlFlow::Continue
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = events.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        root.set_visible(false);

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Show => self.show(),
            AppMsg::Hide => self.hide(),
            AppMsg::Toggle => {
                if self.menu.borrow().visible() {
                    self.hide();
                } else {
                    self.show();
                }
            }
            AppMsg::Press => {
                if self.visible {
                    self.menu.borrow_mut().set_pressed_down(true);
                    self.settle_window();
                }
            }
            AppMsg::Release => {
                if !self.visible {
                    return;
                }
                let mut menu = self.menu.borrow_mut();
                let selected = menu.trigger_selection();
                menu.set_pressed_down(false);
                if selected {
                    menu.set_visible(false);
                }
                drop(menu);
                self.settle_window();
            }
            AppMsg::CursorMove(point) => {
                if !self.visible {
                    return;
                }
                let direction = self.layout.borrow().input_direction(point);
                self.menu.borrow_mut().set_input_direction(direction);
                self.drawing_area.queue_draw();
            }
            AppMsg::Concealed => {
                if !self.menu.borrow().visible() {
                    self.visible = false;
                }
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    let (new_actions, icon_names) = actions::build_actions(&new_config);
                    self.request_icons(icon_names);
                    self.pixbufs.borrow_mut().clear();

                    let mut menu = self.menu.borrow_mut();
                    menu.set_gradient(new_config.theme.gradient_pair());
                    menu.set_actions(Some(new_actions));
                    drop(menu);

                    self.settle_window();
                    self.drawing_area.queue_draw();
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
            AppMsg::IconResolved(name) => {
                log::trace!("Icon '{}' ready", name);
                self.drawing_area.queue_draw();
            }
        }
    }

    fn shutdown(&mut self, _widgets: &mut Self::Widgets, _output: relm4::Sender<Self::Output>) {
        self.menu.borrow_mut().stop();
        log::debug!("Radial menu stopped");
    }
}

impl AppModel {
    fn show(&mut self) {
        let monitor_height = window::monitor_height(&self.root).unwrap_or(REFERENCE_HEIGHT);
        let center = window::get_cursor_position(&self.root)
            .unwrap_or_else(|| window::window_center(&self.root));

        self.layout.borrow_mut().refresh(center, monitor_height);
        self.frames.reset();
        self.visible = true;

        let mut menu = self.menu.borrow_mut();
        menu.set_input_direction(glam::Vec2::ZERO);
        menu.set_visible(true);
        drop(menu);

        self.drawing_area.queue_draw();
    }

    fn hide(&mut self) {
        self.menu.borrow_mut().set_visible(false);
        self.settle_window();
    }

    /// Hides the window right away when the menu closed without an animation to wait for.
    fn settle_window(&mut self) {
        let menu = self.menu.borrow();
        if !menu.visible() && !menu.is_active() {
            self.visible = false;
        }
    }

    pub fn request_icons(&self, names: Vec<IconName>) {
        if let Err(e) = self.icon_requests.try_send(names) {
            log::error!("Failed to request icons: {}", e);
        }
    }
}
