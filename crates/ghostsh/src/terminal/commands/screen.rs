//! Display-surface commands (ls, clear)

use async_trait::async_trait;

use super::{Command, Context};
use crate::error::Result;
use crate::terminal::CommandResult;

/// The ls command.
///
/// Returns an empty list: directory listing is served to the UI through
/// the file API's list operation, not through the terminal. Kept as a
/// placeholder so the command is recognized.
pub struct Ls;

#[async_trait]
impl Command for Ls {
    async fn execute(&self, _ctx: Context<'_>) -> Result<CommandResult> {
        Ok(CommandResult::List(Vec::new()))
    }
}

/// The clear command.
///
/// Emits the dedicated `clear` result kind; erasing displayed history is
/// the receiving surface's job.
pub struct Clear;

#[async_trait]
impl Command for Clear {
    async fn execute(&self, _ctx: Context<'_>) -> Result<CommandResult> {
        Ok(CommandResult::Clear)
    }
}
