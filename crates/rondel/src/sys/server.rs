use crate::events::AppEvent;
use async_channel::Sender;
use strum::{Display, EnumString};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::UnixListener;

pub const SOCKET_PATH: &str = "/tmp/rondel.sock";

/// One line of the control protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ControlCommand {
    Show,
    Hide,
    Toggle,
}

impl From<ControlCommand> for AppEvent {
    fn from(command: ControlCommand) -> Self {
        match command {
            ControlCommand::Show => AppEvent::Show,
            ControlCommand::Hide => AppEvent::Hide,
            ControlCommand::Toggle => AppEvent::Toggle,
        }
    }
}

pub async fn run_server(tx: Sender<AppEvent>) {
    // Cleanup old socket if it exists
    if fs_err::metadata(SOCKET_PATH).is_ok() {
        let _ = fs_err::remove_file(SOCKET_PATH);
    }

    let listener = match UnixListener::bind(SOCKET_PATH) {
        Ok(l) => l,
        Err(e) => {
            log::error!("Failed to bind unix socket: {}", e);
            return;
        }
    };

    loop {
        match listener.accept().await {
            Ok((mut stream, _)) => {
                let tx = tx.clone();
                tokio::spawn(async move {
                    let reader = BufReader::new(&mut stream);
                    let mut lines = reader.lines();

                    while let Ok(Some(line)) = lines.next_line().await {
                        match line.trim().parse::<ControlCommand>() {
                            Ok(command) => {
                                let _ = tx.send(AppEvent::from(command)).await;
                            }
                            Err(_) => log::warn!("Unknown control command: {:?}", line),
                        }
                    }
                });
            }
            Err(e) => {
                log::error!("Failed to accept connection: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_command_parsing() {
        let cases = vec![
            ("show", ControlCommand::Show),
            ("SHOW", ControlCommand::Show),
            ("hide", ControlCommand::Hide),
            ("Toggle", ControlCommand::Toggle),
        ];

        for (line, expected) in cases {
            assert_eq!(line.parse::<ControlCommand>().unwrap(), expected);
        }
        assert!("open".parse::<ControlCommand>().is_err());
    }

    #[test]
    fn test_control_command_wire_format() {
        assert_eq!(ControlCommand::Show.to_string(), "show");
        assert_eq!(ControlCommand::Toggle.to_string(), "toggle");
    }
}
