use crate::actions::ExecCommand;
use crate::events::AppEvent;
use async_channel::{Receiver, Sender};
use directories::ProjectDirs;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use palette::Srgba;
use rondel_menu::{GradientPair, IconName, MenuSection, MenuSettings};
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Exec sentinel of the built-in action that writes and opens the default config.
pub const SETUP_EXEC: &str = "RONDEL_SETUP";

#[derive(Debug, Clone, Copy, PartialEq, SerializeDisplay, DeserializeFromStr)]
pub struct HexColor(pub Srgba<f64>);

impl FromStr for HexColor {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidColor(s.to_string());
        let hex = s.trim().strip_prefix('#').unwrap_or(s.trim());
        if !matches!(hex.len(), 6 | 8) || !hex.is_ascii() {
            return Err(invalid());
        }

        let channel = |i: usize| {
            hex.get(i..i + 2)
                .and_then(|c| u8::from_str_radix(c, 16).ok())
                .map(|c| c as f64 / 255.0)
                .ok_or_else(invalid)
        };
        let alpha = if hex.len() == 8 { channel(6)? } else { 1.0 };

        Ok(Self(Srgba::new(channel(0)?, channel(2)?, channel(4)?, alpha)))
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, g, b, a) = self.0.into_components();
        let byte = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        write!(
            f,
            "#{:02x}{:02x}{:02x}{:02x}",
            byte(r),
            byte(g),
            byte(b),
            byte(a)
        )
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub gradient: [HexColor; 2],
}

impl Default for ThemeConfig {
    fn default() -> Self {
        let GradientPair { start, end } = GradientPair::default();
        Self {
            gradient: [HexColor(start), HexColor(end)],
        }
    }
}

impl ThemeConfig {
    pub fn gradient_pair(&self) -> GradientPair {
        let [start, end] = self.gradient;
        GradientPair::new(start.0, end.0)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ActionConfig {
    pub name: String,
    pub icon: Option<IconName>,
    pub exec: ExecCommand,
    #[serde(default)]
    pub priority: i32,
    #[serde(default = "default_section")]
    pub section: Option<MenuSection>,
}

fn default_section() -> Option<MenuSection> {
    Some(MenuSection::default_section())
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub menu: MenuSettings,
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub actions: Vec<ActionConfig>,
}

impl Config {
    fn setup() -> Self {
        Self {
            actions: vec![ActionConfig {
                name: "Setup".to_string(),
                icon: Some(IconName::new("preferences-system")),
                exec: ExecCommand::new(SETUP_EXEC),
                priority: 0,
                section: default_section(),
            }],
            ..Self::default()
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Invalid color '{0}', expected #rrggbb or #rrggbbaa")]
    InvalidColor(String),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub fn get_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "troia", "rondel").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(config::Environment::with_prefix("RONDEL").separator("__"))
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_or_setup() -> Config {
    if let Ok(path) = get_config_path()
        && !path.exists()
    {
        return Config::setup();
    }

    load_config().unwrap_or_else(|e| {
        log::error!("Failed to load config, falling back to setup: {}", e);
        Config::setup()
    })
}

pub fn write_default_config() -> Result<std::path::PathBuf, ConfigError> {
    let path = get_config_path()?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

/// Bursts of file events closer together than this fold into one reload.
const RELOAD_DEBOUNCE: Duration = Duration::from_millis(150);

type WatchEvents = Receiver<notify::Result<Event>>;

/// Whether `event` changed the config file itself rather than a sibling in its directory.
fn touches_config(event: &Event, config_path: &Path) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    ) && event.paths.iter().any(|p| p == config_path)
}

/// Watches the directory holding the config, since editors often replace the file on save.
fn watch_config_dir(config_path: &Path) -> Result<(RecommendedWatcher, WatchEvents), ConfigError> {
    let config_dir = config_path.parent().ok_or(ConfigError::ConfigDirNotFound)?;
    fs_err::create_dir_all(config_dir)?;

    let (events_tx, events_rx) = async_channel::unbounded();
    let mut watcher = RecommendedWatcher::new(
        move |res| {
            let _ = events_tx.send_blocking(res);
        },
        notify::Config::default(),
    )?;
    watcher.watch(config_dir, RecursiveMode::NonRecursive)?;

    Ok((watcher, events_rx))
}

/// Sends [`AppEvent::ConfigReload`] once per burst of changes to the config file.
pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let watched = get_config_path()
        .and_then(|path| watch_config_dir(&path).map(|watch| (path, watch)));
    let (config_path, (_watcher, events)) = match watched {
        Ok(watched) => watched,
        Err(e) => {
            log::error!("Config watcher disabled: {}", e);
            return;
        }
    };

    while let Ok(res) = events.recv().await {
        match res {
            Ok(event) if touches_config(&event, &config_path) => {
                while let Ok(Ok(_)) = tokio::time::timeout(RELOAD_DEBOUNCE, events.recv()).await {}

                log::debug!("{} changed, reloading", config_path.display());
                if tx.send(AppEvent::ConfigReload).await.is_err() {
                    break;
                }
            }
            Ok(_) => {}
            Err(e) => log::warn!("Config watch error: {}", e),
        }
    }
}
