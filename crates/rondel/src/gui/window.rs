use glam::DVec2;
use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use gtk4_layer_shell::{Edge, Layer, LayerShell};

pub fn get_cursor_position(window: &gtk::ApplicationWindow) -> Option<DVec2> {
    gdk::Display::default()
        .and_then(|d| d.default_seat())
        .and_then(|s| s.pointer())
        .zip(window.surface())
        .and_then(|(p, s)| s.device_position(&p))
        .map(|(x, y, _)| DVec2::new(x, y))
}

pub fn init_layer_shell(window: &gtk::ApplicationWindow) {
    window.init_layer_shell();
    window.set_layer(Layer::Overlay);
    window.set_namespace(Some("rondel"));
    window.set_exclusive_zone(-1);
    for edge in [Edge::Left, Edge::Right, Edge::Top, Edge::Bottom] {
        window.set_anchor(edge, true);
    }
    window.set_keyboard_mode(gtk4_layer_shell::KeyboardMode::OnDemand);
}

/// Monitor the window is on, falling back to the first one the display knows.
pub fn current_monitor(window: &gtk::ApplicationWindow) -> Option<gdk::Monitor> {
    let display = gdk::Display::default()?;
    window
        .surface()
        .and_then(|surface| display.monitor_at_surface(&surface))
        .or_else(|| {
            display
                .monitors()
                .item(0)
                .and_then(|item| item.downcast::<gdk::Monitor>().ok())
        })
}

pub fn monitor_height(window: &gtk::ApplicationWindow) -> Option<f64> {
    current_monitor(window).map(|m| m.geometry().height() as f64)
}

/// Center of the window, used when the pointer position is unknown.
pub fn window_center(window: &gtk::ApplicationWindow) -> DVec2 {
    DVec2::new(window.width() as f64 / 2.0, window.height() as f64 / 2.0)
}
