//! Node configuration: command-line flags with environment fallbacks.

use std::net::SocketAddr;
use std::time::Duration;

use clap::builder::RangedU64ValueParser;
use clap::Parser;
use hashlink::core::{DEFAULT_KEY_BITS, MAX_DIFFICULTY, MIN_KEY_BITS};
use hashlink::ChainConfig;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "hashlink-node",
    version,
    about = "Serve a signed, hash-linked, proof-of-work gated record chain over HTTP"
)]
pub struct NodeConfig {
    /// Address the HTTP server binds to.
    #[arg(long, env = "HASHLINK_LISTEN_ADDR", default_value = "0.0.0.0:8080")]
    pub listen_addr: SocketAddr,

    /// Leading zero hex digits required of every record digest.
    #[arg(
        long,
        env = "HASHLINK_DIFFICULTY",
        default_value_t = 1,
        value_parser = clap::value_parser!(u32).range(0..=(MAX_DIFFICULTY as i64))
    )]
    pub difficulty: u32,

    /// RSA modulus size of the per-process signing identity.
    #[arg(
        long,
        env = "HASHLINK_KEY_BITS",
        default_value_t = DEFAULT_KEY_BITS,
        value_parser = RangedU64ValueParser::<usize>::new().range((MIN_KEY_BITS as u64)..=16384)
    )]
    pub key_bits: usize,

    /// Log filter used when RUST_LOG is unset.
    #[arg(long, env = "HASHLINK_LOG", default_value = "info")]
    pub log: String,

    /// Per-request timeout in seconds.
    #[arg(long, env = "HASHLINK_REQUEST_TIMEOUT_SECS", default_value_t = 10)]
    pub request_timeout_secs: u64,

    /// Largest accepted request body.
    #[arg(long, env = "HASHLINK_MAX_BODY_BYTES", default_value_t = 1 << 20)]
    pub max_body_bytes: usize,
}

impl NodeConfig {
    pub fn chain_config(&self) -> ChainConfig {
        ChainConfig {
            difficulty: self.difficulty,
            key_bits: self.key_bits,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            difficulty: 1,
            key_bits: DEFAULT_KEY_BITS,
            log: "info".into(),
            request_timeout_secs: 10,
            max_body_bytes: 1 << 20,
        }
    }
}
