use clap::{Parser, Subcommand};
use rondel::sys::server::{ControlCommand, SOCKET_PATH};
use std::io::Write;
use std::os::unix::net::UnixStream;

#[derive(Parser, Debug)]
#[command(name = "rondelctl", version, about = "Control a running rondel menu", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Commands {
    /// Reveal the menu around the pointer
    Show,
    /// Conceal the menu
    Hide,
    /// Show the menu if hidden, hide it otherwise
    Toggle,
}

impl From<Commands> for ControlCommand {
    fn from(command: Commands) -> Self {
        match command {
            Commands::Show => ControlCommand::Show,
            Commands::Hide => ControlCommand::Hide,
            Commands::Toggle => ControlCommand::Toggle,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    send_command(ControlCommand::from(cli.command))
}

fn send_command(command: ControlCommand) -> anyhow::Result<()> {
    let mut stream = UnixStream::connect(SOCKET_PATH).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to rondel at {}: {}. Is rondel running?",
            SOCKET_PATH,
            e
        )
    })?;

    writeln!(stream, "{}", command)?;
    log::debug!("Sent '{}' to {}", command, SOCKET_PATH);
    Ok(())
}
