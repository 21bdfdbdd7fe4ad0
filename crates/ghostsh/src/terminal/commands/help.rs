//! help command - fixed reference text

use async_trait::async_trait;

use super::{Command, Context};
use crate::error::Result;
use crate::terminal::CommandResult;

/// One-line-per-command reference for everything the dispatcher knows.
const HELP_TEXT: &str = "\
Available Commands:
──────────────────────────────────
  FILE SYSTEM:
    ls              List files
    echo [text]     Print text
    echo [t] > [f]  Write text to file
  NETWORK:
    scan [target]   Port scan
    ping [host]     Ping host
    traceroute [h]  Trace route
    nmap [target]   Network map
    ssh [user@host] Remote connect
    ifconfig        Network config
  SYSTEM:
    whoami          Identity
    neofetch        System info
    ps              Processes
    uptime          System uptime
    status          Status report
    users           Online users
    df              Disk usage
    hostname        Host name
    uname           OS info
    date            Server time
    history         Command log
    decrypt [file]  Decrypt file
    sudo [cmd]      Root access
    clear           Clear screen
    help            This text
";

/// The help command.
pub struct Help;

#[async_trait]
impl Command for Help {
    async fn execute(&self, _ctx: Context<'_>) -> Result<CommandResult> {
        Ok(CommandResult::text(HELP_TEXT))
    }
}

#[cfg(test)]
mod tests {
    use super::super::run_command;
    use super::*;

    #[tokio::test]
    async fn test_help_names_every_registered_command() {
        let CommandResult::Text(text) = run_command(&Help, &[]).await else {
            panic!("help is a text result");
        };
        for name in [
            "ls",
            "echo",
            "scan",
            "ping",
            "traceroute",
            "nmap",
            "ssh",
            "ifconfig",
            "whoami",
            "neofetch",
            "ps",
            "uptime",
            "status",
            "users",
            "df",
            "hostname",
            "uname",
            "date",
            "history",
            "decrypt",
            "sudo",
            "clear",
            "help",
        ] {
            assert!(text.contains(name), "{name} missing from help");
        }
    }
}
