use crate::events::AppEvent;
use async_channel::Sender;
use rondel_menu::IconName;
use std::thread;
use tokio::runtime::Runtime;

/// Starts the control socket, the config watcher and the icon resolver on a Tokio runtime of
/// their own. Returns the channel icon lookups are requested through.
pub fn start_background_services(tx: Sender<AppEvent>) -> Sender<Vec<IconName>> {
    let (icon_tx, icon_rx) = async_channel::unbounded();

    thread::spawn(move || {
        let rt = match Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                log::error!("Failed to create Tokio runtime: {}", e);
                return;
            }
        };

        rt.block_on(async {
            {
                let tx = tx.clone();
                tokio::spawn(async move {
                    crate::sys::server::run_server(tx).await;
                });
            }

            {
                let tx = tx.clone();
                tokio::spawn(async move {
                    crate::config::run_async_watcher(tx).await;
                });
            }

            {
                let tx = tx.clone();
                tokio::spawn(async move {
                    crate::sys::icons::run_resolver(icon_rx, tx).await;
                });
            }

            std::future::pending::<()>().await;
        });
    });

    icon_tx
}
