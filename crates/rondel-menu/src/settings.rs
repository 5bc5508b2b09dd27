use crate::icon::IconName;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PHASE_OFFSET: f32 = 75.0;
pub const DEFAULT_MISSING_ICON: &str = "image-missing";

/// Tunables of a [`RadialMenu`](crate::RadialMenu).
///
/// Speeds are progress units per second of unscaled time.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MenuSettings {
    /// Degrees added to the input angle before it is folded onto the ring.
    pub phase_offset: f32,
    pub reveal_speed: f32,
    pub unmask_speed: f32,
    pub conceal_speed: f32,
    /// Shown in place of an action that has no icon.
    pub missing_icon: IconName,
}

impl Default for MenuSettings {
    fn default() -> Self {
        Self {
            phase_offset: DEFAULT_PHASE_OFFSET,
            reveal_speed: 5.0,
            unmask_speed: 0.5,
            conceal_speed: 5.0,
            missing_icon: IconName::new(DEFAULT_MISSING_ICON),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_settings_keep_defaults() {
        let settings: MenuSettings =
            serde_json::from_str(r#"{ "phase_offset": 90.0, "missing_icon": "dialog-question" }"#)
                .unwrap();

        assert_eq!(settings.phase_offset, 90.0);
        assert_eq!(settings.missing_icon, IconName::new("dialog-question"));
        assert_eq!(settings.reveal_speed, 5.0);
        assert_eq!(settings.unmask_speed, 0.5);
        assert_eq!(settings.conceal_speed, 5.0);
    }
}
