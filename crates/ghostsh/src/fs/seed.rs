//! Seed manifest
//!
//! Fixed initial tree applied exactly once, the first time the sandbox
//! root is observed to be absent. The root's existence (not its contents)
//! is the guard, so clients can delete or rewrite any seeded file without
//! it reappearing on restart.

use std::io::ErrorKind;
use std::path::Path;

use tokio::io::AsyncWriteExt;

use crate::error::Result;

struct SeedFile {
    path: &'static str,
    content: &'static str,
}

/// Seeded directories. `.shadow` is the hidden one.
const SEED_DIRS: &[&str] = &["documents", "diary", "trash", "logs", "bin", ".shadow"];

const SEED_FILES: &[SeedFile] = &[
    SeedFile {
        path: "welcome.txt",
        content: "WELCOME TO GHOST_OS v2.1\n\nThis is your personal file space.\nYou can create, edit, and delete files here.",
    },
    SeedFile {
        path: "projects.txt",
        content: "1. PROJECT_NEON_VEIL\n   > Status: DECLASSIFIED\n   > Description: Dead-drop marketplace for the sub-net couriers.\n   > Tech: mesh relays, burner ledgers.\n\n2. OP_DATA_HAVEN\n   > Status: ACTIVE\n   > Description: Encrypted cold storage scattered across forgotten nodes.\n   > Tech: content-addressed shards, onion routing.\n\n3. PROTOCOL_GLITCH\n   > Status: EXPERIMENTAL\n   > Description: This very machine. A living OS on the wire.",
    },
    SeedFile {
        path: "about_me.enc",
        content: "SUBJECT: [REDACTED]\nSTATUS: FUGITIVE / ROGUE AGENT\nLAST KNOWN LOCATION: SECTOR 7-G (NODE_404)\n\nWARNING: FILE CORRUPTED. RECOVERING FRAGMENTS...\n\n...they think they can control the [REDACTED]? I saw the source.\nI saw what they did to the AI in '64.\nMy skills?\n- Signal interception\n- Protocol reverse-engineering\n- Scripting the revolution\n\nIf you are reading this, the firewall is down. They are coming.\n\n[END OF FRAGMENT]",
    },
    SeedFile {
        path: "contact.hex",
        content: "ENCRYPTED CHANNEL OPEN.\nSEND SIGNAL TO:\n> RELAY: [REDACTED]@drop-07.onion\n> BOARD: board.dr-net/[USER]\n> UPLINK: [SIGNAL_LOST]\n\nDO NOT TRACE THIS CONNECTION.",
    },
    SeedFile {
        path: "documents/notes.txt",
        content: "Meeting notes: TBD",
    },
    SeedFile {
        path: "diary/entry_001.log",
        content: "DATE: 2077-01-12\nThey say the network is secure. I don't believe them. I saw the glimmers in the code today. Something is watching us from the sub-net.",
    },
    SeedFile {
        path: "diary/entry_042.log",
        content: "DATE: 2077-02-04\nI hid the key in the image file. If they find me, at least the data is safe. 'blue_rabbit' is the trigger.",
    },
    SeedFile {
        path: "trash/.recovered_frag",
        content: "...SEGMENT CORRUPTED...\n...override protocol 9...\n...target identified: USER_01...",
    },
    SeedFile {
        path: "logs/system_boot.log",
        content: "[INFO] KERNEL LOADED\n[INFO] MOUNTING DRIVES... OK\n[WARN] UNKNOWN DEVICE CONNECTED",
    },
    SeedFile {
        path: "bin/readme.md",
        content: "# SYSTEM BINARIES\n\nDo not delete system files.",
    },
    SeedFile {
        path: ".shadow/cipher.key",
        content: "DECRYPT_KEY: X7-PHANTOM-ECHO-9\nACCESS_TOKEN: \u{2588}\u{2588}\u{2588}\u{2588}\u{2588}\u{2588}\u{2588}\u{2588}\u{2588}\u{2588}\u{2588}\u{2588}\nWARNING: If you found this, they already know.",
    },
    SeedFile {
        path: ".shadow/blacklist.dat",
        content: "NODE_01: COMPROMISED\nNODE_02: ACTIVE\nNODE_03: [REDACTED]\nNODE_04: OFFLINE SINCE 2076-11-30\nNODE_05: ...listening...",
    },
];

/// Apply the seed manifest if the root does not exist yet.
///
/// Safe to race: directories go through `create_dir_all` and files through
/// `create_new`, with "already exists" treated as success, so concurrent
/// first-time startups cannot partially overwrite each other.
pub async fn seed_if_absent(root: &Path) -> Result<()> {
    match tokio::fs::metadata(root).await {
        Ok(_) => return Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }

    tracing::info!(root = %root.display(), "seeding sandbox");
    tokio::fs::create_dir_all(root).await?;
    for dir in SEED_DIRS {
        tokio::fs::create_dir_all(root.join(dir)).await?;
    }

    for file in SEED_FILES {
        let path = root.join(file.path);
        let open = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await;
        match open {
            Ok(mut f) => f.write_all(file.content.as_bytes()).await?,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seed_creates_default_tree() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path().join("files");
        seed_if_absent(&root).await.expect("seed");

        for sub in SEED_DIRS {
            assert!(root.join(sub).is_dir(), "{sub}");
        }
        for file in SEED_FILES {
            assert!(root.join(file.path).is_file(), "{}", file.path);
        }
    }

    #[tokio::test]
    async fn test_seed_never_reapplied_once_root_exists() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path().join("files");
        seed_if_absent(&root).await.expect("seed");

        tokio::fs::remove_file(root.join("welcome.txt"))
            .await
            .expect("remove seeded file");
        seed_if_absent(&root).await.expect("second seed is a no-op");
        assert!(!root.join("welcome.txt").exists());
    }

    #[tokio::test]
    async fn test_seed_tolerates_partially_seeded_root() {
        // A racing peer may have created some nodes already; replaying the
        // manifest over them must succeed without truncating their content.
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path().join("files");
        tokio::fs::create_dir_all(root.join("diary"))
            .await
            .expect("mkdir");
        tokio::fs::write(root.join("welcome.txt"), "already here")
            .await
            .expect("write");

        // Root exists, so the guard short-circuits.
        seed_if_absent(&root).await.expect("seed");
        let content = tokio::fs::read_to_string(root.join("welcome.txt"))
            .await
            .expect("read");
        assert_eq!(content, "already here");
    }
}
