//! echo command, with `>` redirection into the virtual filesystem

use async_trait::async_trait;

use super::{Command, Context};
use crate::error::{Error, Result};
use crate::terminal::CommandResult;

/// The echo command.
///
/// `echo text` returns the text; `echo text > file` writes it through the
/// store's `write` (so ancestors are not auto-created) and confirms. One
/// layer of surrounding quotes is stripped from the reconstructed text.
pub struct Echo;

#[async_trait]
impl Command for Echo {
    async fn execute(&self, ctx: Context<'_>) -> Result<CommandResult> {
        if let Some(idx) = ctx.args.iter().position(|a| a == ">") {
            let text = strip_quotes(&ctx.args[..idx].join(" "));
            let Some(filename) = ctx.args.get(idx + 1) else {
                return Err(Error::Usage("echo 'text' > filename".to_string()));
            };
            ctx.fs.write(filename, &text).await?;
            Ok(CommandResult::text(format!("Wrote to {filename}")))
        } else {
            Ok(CommandResult::text(strip_quotes(&ctx.args.join(" "))))
        }
    }
}

/// Strip a single layer of matching surrounding quotes, `"` or `'`.
fn strip_quotes(text: &str) -> String {
    let bytes = text.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'"' || first == b'\'') {
            return text[1..text.len() - 1].to_string();
        }
    }
    text.to_string()
}
