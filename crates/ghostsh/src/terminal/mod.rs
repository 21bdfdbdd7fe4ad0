//! Command tokenizer and dispatcher
//!
//! Splits a raw command line into an operation name and arguments, routes
//! to one of a fixed table of handlers, and returns a tagged result. A few
//! handlers (`echo >`, confined file writes) call into the same
//! [`SandboxFs`] as the explicit file API; the rest are stateless text
//! generators.

pub mod commands;

use std::collections::HashMap;
use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::ser::{Serialize, SerializeStruct, Serializer};

use self::commands::{Command, Context};
use crate::fs::{Entry, SandboxFs};

/// Suggestions offered when an operation name is not recognized.
const SUGGESTIONS: &[&str] = &["help", "scan", "neofetch", "whoami", "status"];

/// Tagged result of one command, `{"type": ..., "content": ...}` on the
/// wire. Returned once per command, never stored.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandResult {
    /// Plain text for the terminal to print.
    Text(String),
    /// An error message, rendered but not fatal to the session.
    Error(String),
    /// Entry summaries (terminal `ls` placeholder; always empty today).
    List(Vec<Entry>),
    /// Tells the receiving surface to erase its displayed history.
    Clear,
}

impl CommandResult {
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self::Error(content.into())
    }
}

impl Serialize for CommandResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("CommandResult", 2)?;
        match self {
            Self::Text(content) => {
                state.serialize_field("type", "text")?;
                state.serialize_field("content", content)?;
            }
            Self::Error(content) => {
                state.serialize_field("type", "error")?;
                state.serialize_field("content", content)?;
            }
            Self::List(entries) => {
                state.serialize_field("type", "list")?;
                state.serialize_field("content", entries)?;
            }
            Self::Clear => {
                state.serialize_field("type", "clear")?;
                state.serialize_field("content", "")?;
            }
        }
        state.end()
    }
}

/// The command interpreter: a fixed name→handler table over the store.
pub struct Terminal {
    fs: Arc<SandboxFs>,
    commands: HashMap<&'static str, Box<dyn Command>>,
    rng: StdRng,
}

impl Terminal {
    /// Create a terminal with OS-seeded randomness.
    pub fn new(fs: Arc<SandboxFs>) -> Self {
        Self::with_rng(fs, StdRng::from_rng(&mut rand::rng()))
    }

    /// Create a terminal with an explicit RNG, for reproducible output.
    pub fn with_rng(fs: Arc<SandboxFs>, rng: StdRng) -> Self {
        let mut commands: HashMap<&'static str, Box<dyn Command>> = HashMap::new();

        commands.insert("echo", Box::new(commands::Echo));
        commands.insert("ls", Box::new(commands::Ls));
        commands.insert("clear", Box::new(commands::Clear));
        commands.insert("help", Box::new(commands::Help));
        commands.insert("sudo", Box::new(commands::Sudo));
        commands.insert("ssh", Box::new(commands::Ssh));
        commands.insert("decrypt", Box::new(commands::Decrypt));
        commands.insert("whoami", Box::new(commands::Whoami));
        commands.insert("neofetch", Box::new(commands::Neofetch));
        commands.insert("scan", Box::new(commands::Scan));
        commands.insert("ping", Box::new(commands::Ping));
        commands.insert("traceroute", Box::new(commands::Traceroute));
        commands.insert("tracert", Box::new(commands::Traceroute));
        commands.insert("nmap", Box::new(commands::Nmap));
        commands.insert("ifconfig", Box::new(commands::Ifconfig));
        commands.insert("ip", Box::new(commands::Ifconfig));
        commands.insert("ps", Box::new(commands::Ps));
        commands.insert("uptime", Box::new(commands::Uptime));
        commands.insert("status", Box::new(commands::Status));
        commands.insert("users", Box::new(commands::Users));
        commands.insert("history", Box::new(commands::History));
        commands.insert("date", Box::new(commands::Date));
        commands.insert("hostname", Box::new(commands::Hostname));
        commands.insert("uname", Box::new(commands::Uname));
        commands.insert("df", Box::new(commands::Df));

        Self { fs, commands, rng }
    }

    /// Tokenize and dispatch one command line.
    ///
    /// Never fails: handler errors come back as tagged error results, and
    /// an unrecognized operation name produces an error naming the token
    /// with a short list of known commands.
    pub async fn execute(&mut self, line: &str) -> CommandResult {
        let tokens: Vec<String> = line.split_whitespace().map(str::to_string).collect();
        let operation = tokens.first().map(|t| t.to_lowercase()).unwrap_or_default();
        let args = tokens.get(1..).unwrap_or(&[]);

        let Some(command) = self.commands.get(operation.as_str()) else {
            return CommandResult::error(format!(
                "'{operation}': command not found\n  Try: {}",
                SUGGESTIONS.join(", ")
            ));
        };

        tracing::debug!(command = %operation, args = args.len(), "dispatch");
        let ctx = Context {
            args,
            fs: &self.fs,
            rng: &mut self.rng,
        };
        command
            .execute(ctx)
            .await
            .unwrap_or_else(|e| CommandResult::error(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::fs::EntryKind;
    use crate::sandbox::Sandbox;

    async fn terminal() -> (tempfile::TempDir, Terminal) {
        let dir = tempfile::tempdir().expect("tempdir");
        let sandbox = Sandbox::new(dir.path()).await.expect("sandbox");
        let fs = Arc::new(SandboxFs::new(sandbox));
        let terminal = Terminal::with_rng(fs, StdRng::seed_from_u64(7));
        (dir, terminal)
    }

    #[tokio::test]
    async fn test_unknown_command_names_token_and_suggests() {
        let (_dir, mut terminal) = terminal().await;
        let CommandResult::Error(message) = terminal.execute("frobnicate --now").await else {
            panic!("expected error");
        };
        assert!(message.starts_with("'frobnicate': command not found"));
        assert!(message.contains("Try: help, scan, neofetch, whoami, status"));
    }

    #[tokio::test]
    async fn test_empty_line_is_unknown() {
        let (_dir, mut terminal) = terminal().await;
        let CommandResult::Error(message) = terminal.execute("   ").await else {
            panic!("expected error");
        };
        assert!(message.starts_with("'': command not found"));
    }

    #[tokio::test]
    async fn test_operation_name_is_case_insensitive() {
        let (_dir, mut terminal) = terminal().await;
        let result = terminal.execute("ECHO hello").await;
        assert_eq!(result, CommandResult::text("hello"));
    }

    #[tokio::test]
    async fn test_aliases_share_handlers() {
        let (_dir, mut terminal) = terminal().await;
        for line in ["traceroute", "tracert", "ifconfig", "ip"] {
            assert!(
                matches!(terminal.execute(line).await, CommandResult::Text(_)),
                "{line}"
            );
        }
    }

    #[test]
    fn test_result_serialization() {
        let text = serde_json::to_value(CommandResult::text("hi")).expect("json");
        assert_eq!(text, serde_json::json!({"type": "text", "content": "hi"}));

        let clear = serde_json::to_value(CommandResult::Clear).expect("json");
        assert_eq!(clear, serde_json::json!({"type": "clear", "content": ""}));

        let list = serde_json::to_value(CommandResult::List(vec![Entry {
            name: "bin".to_string(),
            kind: EntryKind::Folder,
            size: 0,
        }]))
        .expect("json");
        assert_eq!(
            list,
            serde_json::json!({
                "type": "list",
                "content": [{"name": "bin", "type": "folder", "size": 0}],
            })
        );
    }
}
