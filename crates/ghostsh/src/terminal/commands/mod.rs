//! Terminal command handlers
//!
//! One handler type per operation name, all conforming to the single
//! [`Command`] contract. Handlers that touch the filesystem go through the
//! same [`SandboxFs`] as the explicit file API; the rest are stateless
//! generators of templated or randomized text.

mod decrypt;
mod echo;
mod help;
mod network;
mod screen;
mod system;

pub use decrypt::Decrypt;
pub use echo::Echo;
pub use help::Help;
pub use network::{Ifconfig, Nmap, Ping, Scan, Ssh, Traceroute};
pub use screen::{Clear, Ls};
pub use system::{
    Date, Df, History, Hostname, Neofetch, Ps, Status, Sudo, Uname, Uptime, Users, Whoami,
};

use async_trait::async_trait;
use rand::rngs::StdRng;

use super::CommandResult;
use crate::error::Result;
use crate::fs::SandboxFs;

/// Execution context handed to each handler.
pub struct Context<'a> {
    /// Arguments after the operation name.
    pub args: &'a [String],

    /// The confined store, shared with the file API.
    pub fs: &'a SandboxFs,

    /// Injected randomness for the diagnostic generators. Seeded from the
    /// OS by default; tests substitute a fixed seed.
    pub rng: &'a mut StdRng,
}

/// Trait implemented by every terminal command.
///
/// Handlers return `Err` only for conditions the dispatcher should render
/// as a tagged error result (confinement, storage, usage); they never
/// abort the request.
#[async_trait]
pub trait Command: Send + Sync {
    async fn execute(&self, ctx: Context<'_>) -> Result<CommandResult>;
}

#[cfg(test)]
pub(crate) async fn run_command<C: Command>(command: &C, args: &[&str]) -> CommandResult {
    use rand::SeedableRng;

    let dir = tempfile::tempdir().expect("tempdir");
    let sandbox = crate::sandbox::Sandbox::new(dir.path())
        .await
        .expect("sandbox");
    let fs = SandboxFs::new(sandbox);
    let mut rng = StdRng::seed_from_u64(7);
    let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();

    let ctx = Context {
        args: &args,
        fs: &fs,
        rng: &mut rng,
    };
    match command.execute(ctx).await {
        Ok(result) => result,
        Err(e) => CommandResult::Error(e.to_string()),
    }
}
