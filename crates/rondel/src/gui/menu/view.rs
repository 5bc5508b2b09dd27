use super::layout::MenuLayout;
use super::{
    CENTER_CIRCLE_RADIUS, FULL_TURN, ICON_EXTENT, ICON_RADIUS, ICON_SIZE, INNER_RADIUS,
    OUTER_RADIUS, WEDGE_GAP,
};
use crate::gui::theme::ThemeColors;
use crate::sys::icons;
use cairo::{Context, LinearGradient};
use gdk_pixbuf::Pixbuf;
use gdk4::prelude::*;
use palette::Srgba;
use rondel_menu::{IconName, ROTATION_SPACING, RadialMenu, Slot, SlotsMask};
use std::collections::HashMap;

/// Pixbufs loaded on the GTK thread, keyed by icon name. Failed loads are remembered too.
#[derive(Default)]
pub struct PixbufCache {
    pixbufs: HashMap<IconName, Option<Pixbuf>>,
}

impl PixbufCache {
    pub fn get(&mut self, name: &IconName) -> Option<&Pixbuf> {
        if !self.pixbufs.contains_key(name) {
            // Not resolved yet, ask again on a later frame.
            let path = icons::path_of(name)?;
            let pixbuf = Pixbuf::from_file_at_scale(&path, ICON_SIZE, ICON_SIZE, true)
                .inspect_err(|e| log::warn!("Failed to load icon {}: {}", path.display(), e))
                .ok();
            self.pixbufs.insert(name.clone(), pixbuf);
        }
        self.pixbufs.get(name).and_then(Option::as_ref)
    }

    pub fn clear(&mut self) {
        self.pixbufs.clear();
    }
}

struct SlotRenderer<'a> {
    slot: &'a Slot,
    layout: &'a MenuLayout,
}

impl<'a> SlotRenderer<'a> {
    fn new(slot: &'a Slot, layout: &'a MenuLayout) -> Self {
        Self { slot, layout }
    }

    fn draw(
        &self,
        cr: &Context,
        colors: &ThemeColors,
        pixbufs: &mut PixbufCache,
    ) -> Result<(), cairo::Error> {
        let angle = self.layout.slot_angle(self.slot.rotation);
        self.draw_wedge(cr, colors, angle)?;
        self.draw_border(cr, angle)?;
        self.draw_content(cr, pixbufs, angle)
    }

    fn wedge_path(&self, cr: &Context, angle: f64) {
        let half = ROTATION_SPACING.to_radians() as f64 / 2.0 - WEDGE_GAP;
        let (cx, cy) = (self.layout.center.x, self.layout.center.y);
        cr.new_path();
        cr.arc(
            cx,
            cy,
            self.layout.scaled(OUTER_RADIUS),
            angle - half,
            angle + half,
        );
        cr.arc_negative(
            cx,
            cy,
            self.layout.scaled(INNER_RADIUS),
            angle + half,
            angle - half,
        );
        cr.close_path();
    }

    fn draw_wedge(
        &self,
        cr: &Context,
        colors: &ThemeColors,
        angle: f64,
    ) -> Result<(), cairo::Error> {
        let (r, g, b, a) = SlotState::resolve(self.slot).color(colors).into_components();
        cr.set_source_rgba(r, g, b, a);
        self.wedge_path(cr, angle);
        cr.fill()
    }

    fn draw_border(&self, cr: &Context, angle: f64) -> Result<(), cairo::Error> {
        let material = &self.slot.border_material;
        let (cx, cy) = (self.layout.center.x, self.layout.center.y);
        let (inner, outer) = (
            self.layout.scaled(INNER_RADIUS),
            self.layout.scaled(OUTER_RADIUS),
        );
        let gradient = LinearGradient::new(
            cx + inner * angle.cos(),
            cy + inner * angle.sin(),
            cx + outer * angle.cos(),
            cy + outer * angle.sin(),
        );
        for (offset, color) in [(0.0, self.slot.gradient.start), (1.0, self.slot.gradient.end)] {
            let (r, g, b, a) = color.into_components();
            gradient.add_color_stop_rgba(offset, r, g, b, a * material.alpha);
        }

        cr.set_source(&gradient)?;
        cr.set_line_width(self.layout.scaled(material.width));
        self.wedge_path(cr, angle);
        cr.stroke()
    }

    fn draw_content(
        &self,
        cr: &Context,
        pixbufs: &mut PixbufCache,
        angle: f64,
    ) -> Result<(), cairo::Error> {
        let Some(icon) = &self.slot.icon else {
            return Ok(());
        };
        let center = (
            self.layout.center.x + self.layout.scaled(ICON_RADIUS) * angle.cos(),
            self.layout.center.y + self.layout.scaled(ICON_RADIUS) * angle.sin(),
        );

        match pixbufs.get(icon) {
            Some(pixbuf) => self.draw_icon(cr, pixbuf, center),
            None => self.draw_text(cr, icon, center),
        }
    }

    fn draw_icon(
        &self,
        cr: &Context,
        pixbuf: &Pixbuf,
        center: (f64, f64),
    ) -> Result<(), cairo::Error> {
        let extent = self.layout.scaled(ICON_EXTENT);
        let icon_scale = extent / pixbuf.width().max(pixbuf.height()) as f64;
        let (iw, ih) = (
            pixbuf.width() as f64 * icon_scale,
            pixbuf.height() as f64 * icon_scale,
        );

        cr.save()?;
        cr.translate(center.0 - iw / 2.0, center.1 - ih / 2.0);
        cr.scale(icon_scale, icon_scale);
        cr.set_source_pixbuf(pixbuf, 0.0, 0.0);
        cr.paint()?;
        cr.restore()
    }

    fn draw_text(&self, cr: &Context, text: &str, center: (f64, f64)) -> Result<(), cairo::Error> {
        cr.set_source_rgb(1.0, 1.0, 1.0);
        cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
        cr.set_font_size(self.layout.scaled(11.0));
        if let Ok(ext) = cr.text_extents(text) {
            cr.move_to(center.0 - ext.width() / 2.0, center.1 + ext.height() / 2.0);
            cr.show_text(text)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlotState {
    Pressed,
    Highlighted,
    Idle,
}

impl SlotState {
    fn resolve(slot: &Slot) -> Self {
        if slot.pressed {
            Self::Pressed
        } else if slot.highlighted {
            Self::Highlighted
        } else {
            Self::Idle
        }
    }

    fn color(&self, colors: &ThemeColors) -> Srgba<f64> {
        match self {
            Self::Pressed => colors.pressed,
            Self::Highlighted => colors.highlighted,
            Self::Idle => colors.slot,
        }
    }
}

pub fn draw(
    cr: &Context,
    menu: &RadialMenu,
    layout: &MenuLayout,
    colors: &ThemeColors,
    pixbufs: &mut PixbufCache,
) -> Result<(), cairo::Error> {
    if !menu.is_active() {
        return Ok(());
    }

    draw_center_circle(cr, layout, colors)?;

    for slot in menu.slots().iter().filter(|s| s.shown) {
        SlotRenderer::new(slot, layout).draw(cr, colors, pixbufs)?;
    }

    draw_mask(cr, menu.mask(), layout, colors)
}

fn draw_center_circle(
    cr: &Context,
    layout: &MenuLayout,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let (r, g, b, a) = colors.center_circle.into_components();
    cr.set_source_rgba(r, g, b, a);
    cr.new_path();
    cr.arc(
        layout.center.x,
        layout.center.y,
        layout.scaled(CENTER_CIRCLE_RADIUS),
        0.0,
        FULL_TURN,
    );
    cr.fill()
}

/// Covers `fill_amount` of the ring, sweeping clockwise from the first slot.
fn draw_mask(
    cr: &Context,
    mask: &SlotsMask,
    layout: &MenuLayout,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    if !mask.active || mask.fill_amount <= 0.0 {
        return Ok(());
    }

    let start = layout.phase - ROTATION_SPACING.to_radians() as f64 / 2.0;
    let (r, g, b, a) = colors.mask.into_components();
    cr.set_source_rgba(r, g, b, a);
    cr.new_path();
    cr.arc(
        layout.center.x,
        layout.center.y,
        layout.scaled(OUTER_RADIUS),
        start,
        start + FULL_TURN * mask.fill_amount as f64,
    );
    cr.arc_negative(
        layout.center.x,
        layout.center.y,
        layout.scaled(INNER_RADIUS),
        start + FULL_TURN * mask.fill_amount as f64,
        start,
    );
    cr.close_path();
    cr.fill()
}
