use rondel::actions;
use rondel::config;
use rondel::gui::app::{AppInit, AppModel};
use rondel::sys::runtime;
use relm4::prelude::*;
use rondel_menu::{RadialMenu, SlotTemplate};

fn main() {
    env_logger::init();

    let config = config::load_or_setup();
    let (menu_actions, icon_names) = actions::build_actions(&config);

    let mut menu =
        RadialMenu::new(config.menu.clone()).with_slot_template(SlotTemplate::default());
    if let Err(e) = menu.setup() {
        log::error!("Failed to set up the menu: {}", e);
        std::process::exit(1);
    }
    menu.start();
    menu.set_gradient(config.theme.gradient_pair());
    menu.set_actions(Some(menu_actions));

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    let icon_requests = runtime::start_background_services(tx);
    if let Err(e) = icon_requests.try_send(icon_names) {
        log::error!("Failed to request icons: {}", e);
    }

    let app = RelmApp::new("org.troia.rondel");

    app.run::<AppModel>(AppInit {
        menu,
        icon_requests,
        events: rx,
    });
}
