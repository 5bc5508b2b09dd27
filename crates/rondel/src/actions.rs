use crate::config::{self, ActionConfig, Config, SETUP_EXEC};
use crate::sys::icons;
use derive_more::{AsRef, Deref, Display, From, Into};
use rondel_menu::{Action, IconName, MenuAction};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashSet;
use std::process::{Command, Stdio};
use std::rc::Rc;

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct ExecCommand(String);

rondel_menu::impl_string_newtype!(ExecCommand);

/// Runs a shell command. Its icon only shows once the icon theme lookup has finished.
#[derive(Debug, Clone)]
pub struct ShellAction {
    pub name: String,
    pub icon: Option<IconName>,
    pub exec: ExecCommand,
}

impl ShellAction {
    pub fn from_config(cfg: &ActionConfig) -> Self {
        Self {
            name: cfg.name.clone(),
            icon: cfg.icon.clone(),
            exec: cfg.exec.clone(),
        }
    }
}

impl Action for ShellAction {
    fn icon(&self) -> Option<IconName> {
        self.icon
            .as_ref()
            .filter(|name| icons::is_resolved(name))
            .cloned()
    }

    fn execute(&mut self) {
        if self.exec.as_str() == SETUP_EXEC {
            open_default_config();
            return;
        }

        log::info!("Running '{}': {}", self.name, self.exec);
        if let Err(e) = Command::new("sh")
            .arg("-c")
            .arg(self.exec.as_str())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
        {
            log::error!("Failed to run '{}': {}", self.name, e);
        }
    }
}

fn open_default_config() {
    match config::write_default_config() {
        Ok(path) => {
            if let Err(e) = Command::new("xdg-open").arg(&path).spawn() {
                log::error!("Failed to open {}: {}", path.display(), e);
            }
        }
        Err(e) => log::error!("Failed to write default config: {}", e),
    }
}

/// Turns the configured actions into menu actions, along with every icon name they need.
pub fn build_actions(config: &Config) -> (Vec<MenuAction>, Vec<IconName>) {
    let mut icon_names: Vec<IconName> = config
        .actions
        .iter()
        .filter_map(|cfg| cfg.icon.clone())
        .collect();
    icon_names.push(config.menu.missing_icon.clone());
    let mut seen = HashSet::new();
    icon_names.retain(|name| seen.insert(name.clone()));

    let actions = config
        .actions
        .iter()
        .map(|cfg| {
            MenuAction::new(
                Rc::new(RefCell::new(ShellAction::from_config(cfg))),
                cfg.priority,
                cfg.section.clone(),
            )
        })
        .collect();

    (actions, icon_names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn action(icon: &str) -> ShellAction {
        ShellAction {
            name: "Test".to_string(),
            icon: Some(IconName::new(icon)),
            exec: ExecCommand::new("true"),
        }
    }

    #[test]
    fn test_icon_appears_once_resolved() {
        let action = action("rondel-test-pending-icon");
        assert_eq!(action.icon(), None);

        icons::store(
            IconName::new("rondel-test-pending-icon"),
            PathBuf::from("/usr/share/icons/test.png"),
        );

        assert_eq!(action.icon(), Some(IconName::new("rondel-test-pending-icon")));
    }

    #[test]
    fn test_build_actions_collects_icons() {
        let config: Config = serde_json::from_str(
            r#"{ "actions": [
                { "name": "A", "exec": "a", "icon": "alpha", "priority": 1 },
                { "name": "B", "exec": "b" }
            ] }"#,
        )
        .unwrap();

        let (actions, icons) = build_actions(&config);

        assert_eq!(actions.len(), 2);
        assert_eq!(actions[0].priority, 1);
        assert_eq!(
            icons,
            vec![IconName::new("alpha"), config.menu.missing_icon.clone()]
        );
    }
}
