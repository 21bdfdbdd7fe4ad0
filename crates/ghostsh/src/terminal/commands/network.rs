//! Network-diagnostic commands (scan, ping, traceroute, nmap, ifconfig, ssh)
//!
//! All output is simulated: no sockets are opened and no hosts are probed.
//! Values come from the injected RNG and are not meant to be reproducible,
//! only well-typed.

use std::collections::BTreeSet;

use async_trait::async_trait;
use rand::RngExt;

use super::{Command, Context};
use crate::error::{Error, Result};
use crate::terminal::CommandResult;

const HEX_DIGITS: &[u8] = b"0123456789abcdef";

fn target_or<'a>(ctx: &'a Context<'_>, default: &'a str) -> &'a str {
    ctx.args.first().map(String::as_str).unwrap_or(default)
}

/// The scan command - simulated port scan.
pub struct Scan;

#[async_trait]
impl Command for Scan {
    async fn execute(&self, ctx: Context<'_>) -> Result<CommandResult> {
        const SERVICES: &[&str] = &[
            "ssh", "http", "https", "ftp", "smtp", "telnet", "unknown", "dark-relay",
        ];

        let target = target_or(&ctx, "LOCAL_NETWORK").to_string();

        let mut ports = BTreeSet::new();
        while ports.len() < 6 {
            ports.insert(ctx.rng.random_range(20..9999u32));
        }
        let mut port_lines = String::new();
        for port in &ports {
            let state = if ctx.rng.random_bool(0.7) {
                "OPEN"
            } else {
                "FILTERED"
            };
            let service = SERVICES[ctx.rng.random_range(0..SERVICES.len())];
            port_lines.push_str(&format!("  PORT {port:>5}  {state}  {service}\n"));
        }

        let latency = ctx.rng.random_range(1..=50u32);
        let detected = ctx.rng.random_range(2..=6u32);
        let rule = "─".repeat(40);
        Ok(CommandResult::text(format!(
            "SCANNING TARGET: {target}\n\
             {rule}\n  \
             Host: {target}\n  \
             Status: UP (latency: {latency}ms)\n  \
             Ports discovered:\n\
             {port_lines}\
             {rule}\n  \
             {detected} services detected.\n  \
             ⚠ CAUTION: Scan may have been logged."
        )))
    }
}

/// The ping command - simulated echo requests.
pub struct Ping;

#[async_trait]
impl Command for Ping {
    async fn execute(&self, ctx: Context<'_>) -> Result<CommandResult> {
        let target = target_or(&ctx, "localhost").to_string();

        let mut lines = vec![format!(
            "PING {target} ({}.{}.{}.{})",
            ctx.rng.random_range(10..=255u32),
            ctx.rng.random_range(0..=255u32),
            ctx.rng.random_range(0..=255u32),
            ctx.rng.random_range(1..=254u32),
        )];
        for seq in 0..4 {
            let ttl = ctx.rng.random_range(48..=128u32);
            let ms = ctx.rng.random_range(0.5..120.0f64);
            lines.push(format!("  seq={seq} ttl={ttl} time={ms:.1}ms"));
        }
        let received = [4, 4, 4, 3][ctx.rng.random_range(0..4usize)];
        let avg = ctx.rng.random_range(5.0..80.0f64);
        lines.push(format!("--- {target} ping statistics ---"));
        lines.push(format!(
            "  4 packets transmitted, {received} received, avg={avg:.1}ms"
        ));
        Ok(CommandResult::text(lines.join("\n")))
    }
}

/// The traceroute command - simulated hop listing.
pub struct Traceroute;

#[async_trait]
impl Command for Traceroute {
    async fn execute(&self, ctx: Context<'_>) -> Result<CommandResult> {
        const LOCATIONS: &[&str] = &[
            "LOCAL_GW",
            "ISP_NODE",
            "PROXY_01",
            "TOR_ENTRY",
            "RELAY_ALPHA",
            "DARK_NODE",
            "GHOST_RELAY",
            "SECTOR_7G",
            "QUANTUM_BRIDGE",
            "MIRROR_NODE",
            "EXIT_NODE",
            "FINAL_HOP",
            "TARGET",
            "???",
        ];

        let target = target_or(&ctx, "ghost.onion").to_string();
        let hops = ctx.rng.random_range(6..=LOCATIONS.len());
        let mut lines = vec![format!("traceroute to {target}, {hops} hops max")];
        for i in 0..hops {
            if ctx.rng.random_bool(0.15) {
                lines.push(format!("  {}  * * * [REQUEST TIMED OUT]", i + 1));
            } else {
                let ms = ctx.rng.random_range(1.0..300.0f64);
                lines.push(format!("  {}  {}  {ms:.1}ms", i + 1, LOCATIONS[i]));
            }
        }
        let verdict = if ctx.rng.random_bool(0.7) {
            "SECURE"
        } else {
            "⚠ POTENTIALLY COMPROMISED"
        };
        lines.push(format!("  Trace complete. Route {verdict}."));
        Ok(CommandResult::text(lines.join("\n")))
    }
}

/// The nmap command - simulated host discovery.
pub struct Nmap;

#[async_trait]
impl Command for Nmap {
    async fn execute(&self, ctx: Context<'_>) -> Result<CommandResult> {
        const HOSTNAMES: &[&str] = &[
            "ROUTER",
            "DESKTOP-01",
            "UNKNOWN",
            "PRINTER",
            "NAS_VAULT",
            "IOT_DEVICE",
            "CAMERA_03",
            "GHOST_NODE",
            "SMART_LOCK",
        ];

        let target = target_or(&ctx, "192.168.1.0/24").to_string();
        let hosts = ctx.rng.random_range(3..=12u32);
        let rule = "─".repeat(40);
        let mut lines = vec![
            "Starting Nmap 7.94 ( https://nmap.org )".to_string(),
            format!("Scanning {target}..."),
            format!("Discovered {hosts} live hosts:"),
            rule.clone(),
        ];
        for _ in 0..hosts.min(8) {
            let ip = format!("192.168.1.{}", ctx.rng.random_range(1..=254u32));
            let name = HOSTNAMES[ctx.rng.random_range(0..HOSTNAMES.len())];
            let state = if ctx.rng.random_bool(0.9) {
                "UP"
            } else {
                "FILTERED"
            };
            lines.push(format!("  {ip:<16} {name:<16} {state}"));
        }
        lines.push(rule);
        lines.push(format!(
            "Nmap done: {hosts} hosts up. Scan took {}s.",
            ctx.rng.random_range(2..=30u32)
        ));
        lines.push("⚠ Some hosts may have detected your scan.".to_string());
        Ok(CommandResult::text(lines.join("\n")))
    }
}

/// The ifconfig command - simulated interface report.
pub struct Ifconfig;

#[async_trait]
impl Command for Ifconfig {
    async fn execute(&self, ctx: Context<'_>) -> Result<CommandResult> {
        Ok(CommandResult::text(format!(
            "eth0:\n  \
             inet  10.0.{}.{}  mask 255.255.255.0\n  \
             inet6 fe80::{}:{}::{}\n  \
             ether AA:BB:CC:{}:{}:{}\n  \
             RX packets: {}  TX packets: {}\n\n\
             ghost0 (STEALTH ADAPTER):\n  \
             inet  192.168.{}.{}  [MASKED]\n  \
             status: CLOAKED\n  \
             encryption: AES-512-QUANTUM",
            ctx.rng.random_range(0..=255u32),
            ctx.rng.random_range(1..=254u32),
            ctx.rng.random_range(1000..=9999u32),
            ctx.rng.random_range(1000..=9999u32),
            ctx.rng.random_range(1..=99u32),
            ctx.rng.random_range(10..=99u32),
            ctx.rng.random_range(10..=99u32),
            ctx.rng.random_range(10..=99u32),
            ctx.rng.random_range(10_000..=999_999u32),
            ctx.rng.random_range(10_000..=999_999u32),
            ctx.rng.random_range(0..=255u32),
            ctx.rng.random_range(1..=254u32),
        )))
    }
}

/// The ssh command - simulated connection narrative.
pub struct Ssh;

#[async_trait]
impl Command for Ssh {
    async fn execute(&self, ctx: Context<'_>) -> Result<CommandResult> {
        let Some(target) = ctx.args.first() else {
            return Err(Error::Usage(
                "ssh [user@host]\n  Connect to remote system.".to_string(),
            ));
        };

        let fingerprint: String = (0..40)
            .map(|_| HEX_DIGITS[ctx.rng.random_range(0..HEX_DIGITS.len())] as char)
            .collect();
        Ok(CommandResult::text(format!(
            "Connecting to {target}...\n\
             Establishing encrypted tunnel...\n\
             Fingerprint: SHA256:{fingerprint}\n\
             Authentication: KEY_EXCHANGE\n\
             Connection established.\n\
             WARNING: This session is being monitored.\n\
             Type 'exit' to disconnect."
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::super::run_command;
    use super::*;

    #[tokio::test]
    async fn test_scan_defaults_to_local_network() {
        let CommandResult::Text(text) = run_command(&Scan, &[]).await else {
            panic!("expected text");
        };
        assert!(text.starts_with("SCANNING TARGET: LOCAL_NETWORK"));
        assert_eq!(text.matches("PORT ").count(), 6);
    }

    #[tokio::test]
    async fn test_ping_reports_four_probes() {
        let CommandResult::Text(text) = run_command(&Ping, &["dark-node"]).await else {
            panic!("expected text");
        };
        assert!(text.starts_with("PING dark-node ("));
        assert_eq!(text.matches("seq=").count(), 4);
        assert!(text.contains("ping statistics"));
    }

    #[tokio::test]
    async fn test_traceroute_hop_count_matches_header() {
        let CommandResult::Text(text) = run_command(&Traceroute, &[]).await else {
            panic!("expected text");
        };
        let hops: usize = text
            .lines()
            .next()
            .and_then(|l| l.split(", ").nth(1))
            .and_then(|l| l.split(' ').next())
            .and_then(|n| n.parse().ok())
            .expect("hop count in header");
        assert!((6..=14).contains(&hops));
        // header + hops + trailer
        assert_eq!(text.lines().count(), hops + 2);
    }

    #[tokio::test]
    async fn test_nmap_mentions_target() {
        let CommandResult::Text(text) = run_command(&Nmap, &["10.66.0.0/16"]).await else {
            panic!("expected text");
        };
        assert!(text.contains("Scanning 10.66.0.0/16..."));
    }

    #[tokio::test]
    async fn test_ifconfig_lists_both_adapters() {
        let CommandResult::Text(text) = run_command(&Ifconfig, &[]).await else {
            panic!("expected text");
        };
        assert!(text.starts_with("eth0:"));
        assert!(text.contains("ghost0 (STEALTH ADAPTER):"));
    }

    #[tokio::test]
    async fn test_ssh_requires_target() {
        let CommandResult::Error(message) = run_command(&Ssh, &[]).await else {
            panic!("expected usage error");
        };
        assert!(message.starts_with("Usage: ssh"));
    }

    #[tokio::test]
    async fn test_ssh_embeds_forty_hex_fingerprint() {
        let CommandResult::Text(text) = run_command(&Ssh, &["phantom@dark-node"]).await else {
            panic!("expected text");
        };
        let fingerprint = text
            .lines()
            .find_map(|l| l.strip_prefix("Fingerprint: SHA256:"))
            .expect("fingerprint line");
        assert_eq!(fingerprint.len(), 40);
        assert!(fingerprint.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
