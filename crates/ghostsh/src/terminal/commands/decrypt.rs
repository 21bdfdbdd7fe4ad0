//! decrypt command - staged narrative with a random outcome

use async_trait::async_trait;
use rand::RngExt;

use super::{Command, Context};
use crate::error::{Error, Result};
use crate::terminal::CommandResult;

/// The decrypt command.
///
/// Pure flavor text: a staged progress narrative ending in simulated
/// success (p = 0.6) or partial failure. Nothing is decrypted and no file
/// is touched.
pub struct Decrypt;

#[async_trait]
impl Command for Decrypt {
    async fn execute(&self, ctx: Context<'_>) -> Result<CommandResult> {
        let Some(target) = ctx.args.first() else {
            return Err(Error::Usage(
                "decrypt [filename]\n  Attempts to decrypt an encrypted file.".to_string(),
            ));
        };

        let mut stages = vec![
            format!("Analyzing {target}..."),
            "Identifying encryption: AES-256-CBC".to_string(),
            "Attempting key rotation...".to_string(),
            "Brute-forcing key space: ████████████░░░░ 76%".to_string(),
            "Key fragment found: X7-PH4NT0M".to_string(),
            "Applying decryption matrix...".to_string(),
        ];

        if ctx.rng.random_bool(0.6) {
            stages.push(format!("✓ SUCCESS: {target} decrypted."));
            stages.push(format!("  Decrypted content saved to {target}.dec"));
        } else {
            stages.push("✗ PARTIAL FAILURE: Only 63% recovered.".to_string());
            stages.push("  Try running with --force flag.".to_string());
        }

        Ok(CommandResult::text(stages.join("\n")))
    }
}
