//! System-information commands (whoami, neofetch, status, users, ps,
//! uptime, uname, hostname, df, date, history, sudo)
//!
//! These return the machine's fixed in-universe identity, sometimes with
//! randomized load figures. Nothing here reflects the real host: the
//! narrative identity is hardcoded so the simulation never leaks host
//! details.

use async_trait::async_trait;
use chrono::Local;
use rand::RngExt;

use super::{Command, Context};
use crate::error::{Error, Result};
use crate::terminal::CommandResult;
use crate::OS_NAME;

/// Fixed in-universe hostname.
pub const NODE_HOSTNAME: &str = "GHOST_NODE_7G.DR_NET.ONION";

/// Fixed in-universe operator handle.
pub const NODE_USERNAME: &str = "USER_01";

/// The whoami command - operator identity card.
pub struct Whoami;

#[async_trait]
impl Command for Whoami {
    async fn execute(&self, _ctx: Context<'_>) -> Result<CommandResult> {
        Ok(CommandResult::text(format!(
            "ID: {NODE_USERNAME}\n\
             ROLE: GHOST_ADMIN\n\
             ACCESS_LEVEL: 7\n\
             LOCATION: PROXY_CHAIN_ACTIVE\n\
             CLEARANCE: ██████████\n\
             STATUS: UNDETECTED"
        )))
    }
}

/// The neofetch command - system identity banner.
pub struct Neofetch;

#[async_trait]
impl Command for Neofetch {
    async fn execute(&self, _ctx: Context<'_>) -> Result<CommandResult> {
        Ok(CommandResult::text(format!(
            "  ██████╗ ██╗  ██╗ ██████╗ ███████╗████████╗\n \
             ██╔════╝ ██║  ██║██╔═══██╗██╔════╝╚══██╔══╝\n \
             ██║  ███╗███████║██║   ██║███████╗   ██║\n \
             ██║   ██║██╔══██║██║   ██║╚════██║   ██║\n \
             ╚██████╔╝██║  ██║╚██████╔╝███████║   ██║\n  \
             ╚═════╝ ╚═╝  ╚═╝ ╚═════╝ ╚══════╝   ╚═╝\n\
             ──────────────────────────────────\n  \
             OS:       {OS_NAME} v2.1 [QUANTUM]\n  \
             Kernel:   4.19.0-PHANTOM\n  \
             Shell:    ghost-sh 3.2.1\n  \
             CPU:      Quantum Core i9 @ 8.2 GHz\n  \
             GPU:      NV-CORTEX RTX 9090\n  \
             RAM:      65536 MB DDR6\n  \
             Disk:     2.1 TB / 4 TB (52%)\n  \
             Network:  DR_NET [ENCRYPTED]\n  \
             Uptime:   4209h 37m\n  \
             Packages: 1337 (apt)\n  \
             User:     {NODE_USERNAME}@SECTOR-7G"
        )))
    }
}

/// The status command - boxed status report with randomized load figures.
pub struct Status;

#[async_trait]
impl Command for Status {
    async fn execute(&self, ctx: Context<'_>) -> Result<CommandResult> {
        let cpu = ctx.rng.random_range(5..=45u32);
        let memory = ctx.rng.random_range(20..=70u32);
        let threats = ctx.rng.random_range(0..=3u32);
        Ok(CommandResult::text(format!(
            "╔══════════════════════════════════╗\n\
             ║       SYSTEM STATUS REPORT       ║\n\
             ╠══════════════════════════════════╣\n\
             ║  CPU Load:    {cpu:<3}%               ║\n\
             ║  Memory:      {memory:<3}% used          ║\n\
             ║  Disk:        52% capacity       ║\n\
             ║  Network:     ENCRYPTED          ║\n\
             ║  Firewall:    ACTIVE             ║\n\
             ║  Threats:     {threats} detected        ║\n\
             ║  VPN:         MULTI-HOP          ║\n\
             ╠══════════════════════════════════╣\n\
             ║  All systems operational.        ║\n\
             ╚══════════════════════════════════╝"
        )))
    }
}

/// The users command - who is on the net.
pub struct Users;

#[async_trait]
impl Command for Users {
    async fn execute(&self, ctx: Context<'_>) -> Result<CommandResult> {
        let null_byte_status = if ctx.rng.random_bool(0.5) {
            "ACTIVE"
        } else {
            "AWAY"
        };
        let users = [
            (NODE_USERNAME, "ACTIVE", "GHOST_ADMIN"),
            ("PHANTOM_X", "IDLE", "OPERATOR"),
            ("NULL_BYTE", null_byte_status, "ANALYST"),
            ("D4RK_ECHO", "OFFLINE", "UNKNOWN"),
            ("ROOT", "LOCKED", "SYSTEM"),
        ];

        let mut lines = vec![
            format!("{:<14} {:<10} {:<14}", "USER", "STATUS", "ROLE"),
            "─".repeat(38),
        ];
        for (name, status, role) in users {
            lines.push(format!("{name:<14} {status:<10} {role:<14}"));
        }
        let active = users.iter().filter(|(_, s, _)| *s == "ACTIVE").count();
        lines.push(format!("\n  {active} active users on DR_NET."));
        Ok(CommandResult::text(lines.join("\n")))
    }
}

/// The ps command - simulated process table.
pub struct Ps;

#[async_trait]
impl Command for Ps {
    async fn execute(&self, ctx: Context<'_>) -> Result<CommandResult> {
        let processes: [(u32, &str, f64, f64); 10] = [
            (1, "systemd", 0.1, 2.3),
            (42, "kernel_watchdog", 0.0, 0.8),
            (137, "ghost-shell", 1.2, 4.1),
            (256, "network_monitor", ctx.rng.random_range(0.5..8.0), 3.2),
            (314, "crypto_miner", ctx.rng.random_range(15.0..45.0), 12.4),
            (404, "shadow_daemon", ctx.rng.random_range(0.1..2.0), 1.7),
            (512, "firewall_v3", 0.3, 5.6),
            (
                666,
                "UNKNOWN_PROCESS",
                ctx.rng.random_range(5.0..25.0),
                ctx.rng.random_range(3.0..15.0),
            ),
            (777, "data_exfil_agent", ctx.rng.random_range(1.0..5.0), 2.1),
            (1024, "proxy_chain", 0.8, 3.0),
        ];

        let mut lines = vec![
            format!("{:>6}  {:<22}  {:>6}  {:>6}", "PID", "PROCESS", "CPU%", "MEM%"),
            "─".repeat(48),
        ];
        for (pid, name, cpu, mem) in &processes {
            let warn = if *cpu > 10.0 { " ⚠" } else { "" };
            lines.push(format!("{pid:>6}  {name:<22}  {cpu:>5.1}%  {mem:>5.1}%{warn}"));
        }
        let total_cpu: f64 = processes.iter().map(|(_, _, cpu, _)| cpu).sum();
        lines.push(format!(
            "\n  Total: {} processes | CPU: {total_cpu:.1}%",
            processes.len()
        ));
        Ok(CommandResult::text(lines.join("\n")))
    }
}

/// The uptime command.
pub struct Uptime;

#[async_trait]
impl Command for Uptime {
    async fn execute(&self, ctx: Context<'_>) -> Result<CommandResult> {
        let hours = 4209 + ctx.rng.random_range(0..=100u32);
        Ok(CommandResult::text(format!(
            "  System Uptime: {hours}h {}m {}s\n  \
             Load Average:  {:.2} {:.2} {:.2}\n  \
             Users Online:  {}\n  \
             Last Reboot:   2077-01-01 00:00:00 [FORCED]",
            ctx.rng.random_range(0..=59u32),
            ctx.rng.random_range(0..=59u32),
            ctx.rng.random_range(0.1..2.5f64),
            ctx.rng.random_range(0.1..3.0f64),
            ctx.rng.random_range(0.2..4.0f64),
            ctx.rng.random_range(1..=7u32),
        )))
    }
}

/// The uname command - fixed OS identification line.
pub struct Uname;

#[async_trait]
impl Command for Uname {
    async fn execute(&self, _ctx: Context<'_>) -> Result<CommandResult> {
        Ok(CommandResult::text(format!(
            "{OS_NAME} 4.19.0-PHANTOM x86_64 QUANTUM_CORE GNU/Linux"
        )))
    }
}

/// The hostname command.
pub struct Hostname;

#[async_trait]
impl Command for Hostname {
    async fn execute(&self, _ctx: Context<'_>) -> Result<CommandResult> {
        Ok(CommandResult::text(NODE_HOSTNAME))
    }
}

/// The df command - fixed mount table.
pub struct Df;

#[async_trait]
impl Command for Df {
    async fn execute(&self, _ctx: Context<'_>) -> Result<CommandResult> {
        Ok(CommandResult::text(
            "Filesystem      Size  Used  Avail  Use%  Mounted on\n\
             /dev/ghost0     4.0T  2.1T  1.9T   52%   /\n\
             /dev/shade1     512G  128G  384G   25%   /shadow\n\
             tmpfs           32G   1.2G  30.8G   4%   /tmp\n\
             /dev/vault0     1.0T  890G  110G   89%   /vault  ⚠ HIGH",
        ))
    }
}

/// The date command - real server time in the narrative frame.
pub struct Date;

#[async_trait]
impl Command for Date {
    async fn execute(&self, _ctx: Context<'_>) -> Result<CommandResult> {
        let now = Local::now().format("%Y-%m-%d %H:%M:%S");
        Ok(CommandResult::text(format!(
            "SERVER_TIME: {now}\nTIMEZONE: UTC+0 [QUANTUM_SYNC]"
        )))
    }
}

/// The history command.
///
/// A fixed illustrative list; the interpreter keeps no real command log.
pub struct History;

#[async_trait]
impl Command for History {
    async fn execute(&self, _ctx: Context<'_>) -> Result<CommandResult> {
        const ENTRIES: &[&str] = &[
            "ls -la /shadow",
            "cat diary/entry_042.log",
            "scan 192.168.1.0/24",
            "decrypt about_me.enc",
            "ssh phantom@dark-node",
            "nmap TARGET_BRAVO",
            "echo 'key found' > notes.txt",
            "whoami",
            "ps aux",
            "neofetch",
        ];

        let mut output = String::from("Command History:");
        for (i, entry) in ENTRIES.iter().enumerate() {
            output.push_str(&format!("\n  {:>4}  {entry}", i + 1));
        }
        Ok(CommandResult::text(output))
    }
}

/// The sudo command - privilege-escalation narrative.
pub struct Sudo;

#[async_trait]
impl Command for Sudo {
    async fn execute(&self, ctx: Context<'_>) -> Result<CommandResult> {
        if ctx.args.is_empty() {
            return Err(Error::Usage(
                "sudo [command]\n  Execute with elevated privileges.".to_string(),
            ));
        }
        let subcmd = ctx.args.join(" ");
        Ok(CommandResult::text(format!(
            "[SUDO] Escalating privileges for: {subcmd}\n\
             [SUDO] Access Level: ROOT\n\
             [SUDO] Executing: {subcmd}\n\
             [SUDO] ✓ Command completed with elevated access."
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::super::run_command;
    use super::*;

    #[tokio::test]
    async fn test_whoami_identity() {
        let CommandResult::Text(text) = run_command(&Whoami, &[]).await else {
            panic!("expected text");
        };
        assert!(text.starts_with("ID: USER_01"));
        assert!(text.contains("ROLE: GHOST_ADMIN"));
    }

    #[tokio::test]
    async fn test_neofetch_identity() {
        let CommandResult::Text(text) = run_command(&Neofetch, &[]).await else {
            panic!("expected text");
        };
        assert!(text.contains("OS:       GHOST_OS v2.1 [QUANTUM]"));
        assert!(text.contains("Shell:    ghost-sh 3.2.1"));
    }

    #[tokio::test]
    async fn test_ps_flags_hot_processes() {
        let CommandResult::Text(text) = run_command(&Ps, &[]).await else {
            panic!("expected text");
        };
        // crypto_miner always burns at least 15% CPU
        let miner = text
            .lines()
            .find(|l| l.contains("crypto_miner"))
            .expect("miner row");
        assert!(miner.ends_with('⚠'));
        assert!(text.contains("Total: 10 processes"));
    }

    #[tokio::test]
    async fn test_uptime_shape() {
        let CommandResult::Text(text) = run_command(&Uptime, &[]).await else {
            panic!("expected text");
        };
        assert!(text.contains("System Uptime: 42"));
        assert!(text.contains("Load Average:"));
    }

    #[tokio::test]
    async fn test_hostname_fixed() {
        let result = run_command(&Hostname, &[]).await;
        assert_eq!(result, CommandResult::text(NODE_HOSTNAME));
    }

    #[tokio::test]
    async fn test_date_frames_server_time() {
        let CommandResult::Text(text) = run_command(&Date, &[]).await else {
            panic!("expected text");
        };
        assert!(text.starts_with("SERVER_TIME: "));
        assert!(text.ends_with("TIMEZONE: UTC+0 [QUANTUM_SYNC]"));
    }

    #[tokio::test]
    async fn test_sudo_requires_argument() {
        let CommandResult::Error(message) = run_command(&Sudo, &[]).await else {
            panic!("expected usage error");
        };
        assert!(message.starts_with("Usage: sudo"));
    }

    #[tokio::test]
    async fn test_sudo_embeds_subcommand_verbatim() {
        let CommandResult::Text(text) = run_command(&Sudo, &["rm", "-rf", "/shadow"]).await else {
            panic!("expected text");
        };
        assert!(text.contains("Escalating privileges for: rm -rf /shadow"));
        assert!(text.contains("Executing: rm -rf /shadow"));
    }

    #[tokio::test]
    async fn test_history_is_fixed_list() {
        let CommandResult::Text(text) = run_command(&History, &[]).await else {
            panic!("expected text");
        };
        assert!(text.starts_with("Command History:"));
        assert_eq!(text.lines().count(), 11);
    }
}
