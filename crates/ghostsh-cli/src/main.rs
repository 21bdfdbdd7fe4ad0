//! Ghostsh CLI - drive the simulated OS from the command line
//!
//! Usage:
//!   ghostsh exec "scan 192.168.1.0/24"     # run a terminal command
//!   ghostsh fs list documents              # file API operations
//!   ghostsh --root /tmp/sandbox fs read welcome.txt
//!
//! One JSON object per invocation on stdout, matching the payloads the
//! browser UI consumes: tagged command results, `{"files": [...]}`,
//! `{"content": ...}`, `{"status": "success"}`, or `{"error": ...}`.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use ghostsh::{EntryKind, Shell};
use serde_json::json;
use tracing_subscriber::EnvFilter;

/// Ghostsh - simulated OS sandbox
#[derive(Parser, Debug)]
#[command(name = "ghostsh")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Sandbox root directory, seeded on first use
    #[arg(long, default_value = "files")]
    root: PathBuf,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Execute one terminal command line
    Exec {
        /// The raw command line, e.g. "echo 'hi' > notes.txt"
        line: String,
    },
    /// Operate on the virtual filesystem
    #[command(subcommand)]
    Fs(FsCmd),
    /// Print the system banner
    Info,
}

#[derive(Subcommand, Debug)]
enum FsCmd {
    /// List a directory (sandbox root by default)
    List {
        #[arg(default_value = "")]
        path: String,
    },
    /// Read a file
    Read { path: String },
    /// Overwrite a file; parent directories must already exist
    Write {
        path: String,
        #[arg(long, default_value = "")]
        content: String,
    },
    /// Create a file or folder, creating missing ancestors
    Create {
        path: String,
        #[arg(long, value_enum, default_value_t = KindArg::File)]
        kind: KindArg,
        #[arg(long)]
        content: Option<String>,
    },
    /// Delete a file or a directory tree
    Delete { path: String },
    /// Move an entry
    Move { path: String, destination: String },
    /// Copy an entry (directories recursively)
    Copy { path: String, destination: String },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum KindArg {
    File,
    Folder,
}

impl From<KindArg> for EntryKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::File => EntryKind::File,
            KindArg::Folder => EntryKind::Folder,
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut shell = Shell::open(&args.root)
        .await
        .with_context(|| format!("failed to open sandbox root {}", args.root.display()))?;

    let result = match args.command {
        Cmd::Exec { line } => {
            // Terminal errors are tagged results, not process failures.
            let value =
                serde_json::to_value(shell.exec(&line).await).context("serialize result")?;
            println!("{value}");
            return Ok(ExitCode::SUCCESS);
        }
        Cmd::Fs(op) => run_fs(&shell, op).await,
        Cmd::Info => Ok(json!({ "status": "System Online", "version": ghostsh::OS_VERSION })),
    };

    match result {
        Ok(value) => {
            println!("{value}");
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            println!("{}", json!({ "error": e.to_string() }));
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn run_fs(shell: &Shell, op: FsCmd) -> ghostsh::Result<serde_json::Value> {
    let fs = shell.fs();
    let value = match op {
        FsCmd::List { path } => json!({ "files": fs.list(&path).await? }),
        FsCmd::Read { path } => json!({ "content": fs.read(&path).await? }),
        FsCmd::Write { path, content } => {
            fs.write(&path, &content).await?;
            json!({ "status": "success" })
        }
        FsCmd::Create {
            path,
            kind,
            content,
        } => {
            fs.create(&path, kind.into(), content.as_deref()).await?;
            json!({ "status": "success" })
        }
        FsCmd::Delete { path } => {
            fs.delete(&path).await?;
            json!({ "status": "success" })
        }
        FsCmd::Move { path, destination } => {
            fs.rename(&path, &destination).await?;
            json!({ "status": "success" })
        }
        FsCmd::Copy { path, destination } => {
            fs.copy(&path, &destination).await?;
            json!({ "status": "success" })
        }
    };
    Ok(value)
}
