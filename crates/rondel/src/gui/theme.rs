use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

const CSS: &str = "
.rondel-window, .rondel-drawing-area {
    background: none;
    background-color: transparent;
}
";

/// A named GTK theme color drawn at a fixed opacity, with a fallback for themes without it.
struct NamedColor {
    name: &'static str,
    alpha: f64,
    fallback: (f64, f64, f64),
}

impl NamedColor {
    fn resolve(&self, context: &gtk::StyleContext) -> Srgba<f64> {
        let (r, g, b) = context
            .lookup_color(self.name)
            .map(|c| (c.red().into(), c.green().into(), c.blue().into()))
            .unwrap_or(self.fallback);
        Srgba::new(r, g, b, self.alpha)
    }
}

const SLOT: NamedColor = NamedColor {
    name: "theme_bg_color",
    alpha: 0.6,
    fallback: (0.15, 0.15, 0.15),
};
const HIGHLIGHTED: NamedColor = NamedColor {
    name: "theme_selected_bg_color",
    alpha: 0.9,
    fallback: (0.4, 0.4, 0.8),
};
const PRESSED: NamedColor = NamedColor {
    name: "accent_bg_color",
    alpha: 1.0,
    fallback: (0.25, 0.55, 0.95),
};
const MASK: NamedColor = NamedColor {
    name: "theme_base_color",
    alpha: 0.85,
    fallback: (0.08, 0.08, 0.08),
};
const CENTER_CIRCLE: NamedColor = NamedColor {
    name: "theme_fg_color",
    alpha: 0.1,
    fallback: (0.2, 0.2, 0.2),
};

/// Colors of the ring, resolved from the active GTK theme on every draw.
pub struct ThemeColors {
    pub slot: Srgba<f64>,
    pub highlighted: Srgba<f64>,
    pub pressed: Srgba<f64>,
    pub mask: Srgba<f64>,
    pub center_circle: Srgba<f64>,
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        Self {
            slot: SLOT.resolve(context),
            highlighted: HIGHLIGHTED.resolve(context),
            pressed: PRESSED.resolve(context),
            mask: MASK.resolve(context),
            center_circle: CENTER_CIRCLE.resolve(context),
        }
    }
}

/// Makes the overlay window transparent so only the ring is drawn.
pub fn load_css() {
    let Some(display) = gdk::Display::default() else {
        log::warn!("No display available, skipping window styling");
        return;
    };

    let provider = gtk::CssProvider::new();
    provider.load_from_data(CSS);
    gtk::style_context_add_provider_for_display(
        &display,
        &provider,
        gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
    );
}
