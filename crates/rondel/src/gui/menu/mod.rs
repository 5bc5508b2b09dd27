use std::f64::consts::PI;

pub mod layout;
pub mod view;

pub use layout::{FrameTimer, MenuLayout};
pub use view::{PixbufCache, draw};

pub const REFERENCE_HEIGHT: f64 = 1440.0;
pub const ICON_SIZE: i32 = 256;
pub const DEAD_ZONE_RADIUS: f64 = 40.0; // pointer distance treated as neutral
pub const INNER_RADIUS: f64 = 70.0; // inner edge of the slot wedges
pub const OUTER_RADIUS: f64 = 170.0; // outer edge of the slot wedges
pub const ICON_RADIUS: f64 = 120.0; // orbit of the slot icons
pub const ICON_EXTENT: f64 = 40.0; // drawn icon width and height
pub const CENTER_CIRCLE_RADIUS: f64 = 32.0;
pub const WEDGE_GAP: f64 = 0.02; // radians left empty between neighbouring wedges
pub const MAX_FRAME_DELTA: f32 = 0.1;
pub const FULL_TURN: f64 = 2.0 * PI;
