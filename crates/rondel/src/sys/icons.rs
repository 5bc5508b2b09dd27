use crate::events::AppEvent;
use async_channel::{Receiver, Sender};
use freedesktop_icons::lookup;
use parking_lot::RwLock;
use rondel_menu::IconName;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

const LOOKUP_SIZE: u16 = 256;

static RESOLVED: OnceLock<RwLock<HashMap<IconName, PathBuf>>> = OnceLock::new();

fn resolved() -> &'static RwLock<HashMap<IconName, PathBuf>> {
    RESOLVED.get_or_init(|| RwLock::new(HashMap::new()))
}

pub fn store(name: IconName, path: PathBuf) {
    resolved().write().insert(name, path);
}

pub fn is_resolved(name: &IconName) -> bool {
    resolved().read().contains_key(name)
}

pub fn path_of(name: &IconName) -> Option<PathBuf> {
    resolved().read().get(name).cloned()
}

/// Finds the file for an icon name, either as an absolute path or through the icon theme.
pub fn find_icon_path(name: &IconName) -> Option<PathBuf> {
    if name.is_empty() {
        return None;
    }

    let path = Path::new(name.as_str());
    if path.is_absolute() && path.exists() {
        return Some(path.to_path_buf());
    }

    lookup(name.as_str())
        .with_size(LOOKUP_SIZE)
        .with_scale(1)
        .find()
}

/// Resolves batches of icon names off the GTK thread and reports each one that was found.
pub async fn run_resolver(requests: Receiver<Vec<IconName>>, tx: Sender<AppEvent>) {
    while let Ok(names) = requests.recv().await {
        for name in names {
            if is_resolved(&name) {
                continue;
            }

            let query = name.clone();
            let found = tokio::task::spawn_blocking(move || find_icon_path(&query)).await;

            match found {
                Ok(Some(path)) => {
                    log::debug!("Resolved icon '{}' to {}", name, path.display());
                    store(name.clone(), path);
                    if tx.send(AppEvent::IconResolved(name)).await.is_err() {
                        return;
                    }
                }
                Ok(None) => log::warn!("Icon '{}' not found in the icon theme", name),
                Err(e) => log::error!("Icon lookup for '{}' failed: {}", name, e),
            }
        }
    }
}
