//! Ghostsh - Simulated OS backend for browser terminal UIs
//!
//! Presents a confined, hierarchical virtual filesystem plus a
//! line-oriented command interpreter that mimics shell and
//! network-diagnostic tools. Nothing outside the sandbox root is ever
//! observed or mutated.
//!
//! # Example
//!
//! ```rust,no_run
//! use ghostsh::Shell;
//!
//! #[tokio::main]
//! async fn main() -> ghostsh::Result<()> {
//!     let mut shell = Shell::open("files").await?;
//!     let result = shell.exec("echo \"hello\" > greeting.txt").await;
//!     println!("{result:?}");
//!     assert_eq!(shell.fs().read("greeting.txt").await?, "hello");
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod fs;
pub mod sandbox;
pub mod terminal;

pub use error::{Error, Result};
pub use fs::{Entry, EntryKind, FileRequest, SandboxFs};
pub use sandbox::Sandbox;
pub use terminal::{CommandResult, Terminal};

use std::path::PathBuf;
use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;

/// In-universe operating system name.
pub const OS_NAME: &str = "GHOST_OS";

/// In-universe release string, served as the system banner.
pub const OS_VERSION: &str = "v2.1.0-GHOST";

/// Main entry point: one sandboxed filesystem plus its terminal.
///
/// Distinct `Shell` instances may be opened over the same root
/// concurrently; the persisted tree is the only shared state.
pub struct Shell {
    fs: Arc<SandboxFs>,
    terminal: Terminal,
}

impl Shell {
    /// Open (and on first use, seed) a sandbox rooted at `root`.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self> {
        Self::builder().root(root).build().await
    }

    /// Create a builder for customized configuration.
    pub fn builder() -> ShellBuilder {
        ShellBuilder::default()
    }

    /// Execute one terminal command line.
    pub async fn exec(&mut self, line: &str) -> CommandResult {
        self.terminal.execute(line).await
    }

    /// The confined store, for the explicit file API.
    pub fn fs(&self) -> Arc<SandboxFs> {
        Arc::clone(&self.fs)
    }
}

/// Builder for customized [`Shell`] configuration.
pub struct ShellBuilder {
    root: PathBuf,
    rng_seed: Option<u64>,
    seed_manifest: bool,
}

impl Default for ShellBuilder {
    fn default() -> Self {
        Self {
            root: PathBuf::from("files"),
            rng_seed: None,
            seed_manifest: true,
        }
    }
}

impl ShellBuilder {
    /// Set the sandbox root directory.
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Fix the RNG seed so diagnostic output is reproducible.
    pub fn rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    /// Skip the seed manifest; the root is created empty instead.
    pub fn empty(mut self) -> Self {
        self.seed_manifest = false;
        self
    }

    /// Build the Shell, seeding the root on first use.
    pub async fn build(self) -> Result<Shell> {
        if self.seed_manifest {
            fs::seed::seed_if_absent(&self.root).await?;
        } else {
            tokio::fs::create_dir_all(&self.root).await?;
        }

        let sandbox = Sandbox::new(self.root).await?;
        let fs = Arc::new(SandboxFs::new(sandbox));
        let terminal = match self.rng_seed {
            Some(seed) => Terminal::with_rng(Arc::clone(&fs), StdRng::seed_from_u64(seed)),
            None => Terminal::new(Arc::clone(&fs)),
        };
        Ok(Shell { fs, terminal })
    }
}
