//! Command-line configuration.
//!
//! ```text
//! shardring serve --bind 127.0.0.1:3000 [--bind 127.0.0.1:3001 ...]
//! shardring put <key> <value>   [--node <id>=<addr> ...] [--timeout-ms <n>]
//! shardring get <key>           [--node <id>=<addr> ...] [--timeout-ms <n>]
//! shardring list <addr>         [--timeout-ms <n>]
//! shardring demo                [--node <id>=<addr> ...] [--timeout-ms <n>]
//! ```
//!
//! `--verbose` raises the log level to DEBUG for every command.

use crate::ring::Node;

use anyhow::{Context, Result, bail};
use std::net::SocketAddr;
use std::time::Duration;

/// Cluster used by the client commands when no `--node` is given.
pub const DEFAULT_NODES: [(i64, &str); 3] = [
    (0, "127.0.0.1:3000"),
    (1, "127.0.0.1:3001"),
    (2, "127.0.0.1:3002"),
];

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_millis(500);

pub const USAGE: &str = "Usage: shardring <serve|put|get|list|demo> [options]
  serve --bind <addr:port> [--bind <addr:port> ...]
  put <key> <value> [--node <id>=<addr> ...] [--timeout-ms <n>]
  get <key> [--node <id>=<addr> ...] [--timeout-ms <n>]
  list <addr:port> [--timeout-ms <n>]
  demo [--node <id>=<addr> ...] [--timeout-ms <n>]
  --verbose enables debug logging";

#[derive(Debug, Clone, PartialEq)]
pub struct ServeConfig {
    /// One shard listener (and one store) per address.
    pub binds: Vec<SocketAddr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub nodes: Vec<Node>,
    pub request_timeout: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Serve(ServeConfig),
    Put {
        client: ClientConfig,
        key: String,
        value: String,
    },
    Get {
        client: ClientConfig,
        key: String,
    },
    List {
        client: ClientConfig,
        address: String,
    },
    Demo(ClientConfig),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub command: Command,
    pub verbose: bool,
}

/// Parses the process arguments, program name excluded.
pub fn parse_args(args: &[String]) -> Result<Config> {
    let Some(command) = args.first() else {
        bail!("missing command\n{}", USAGE);
    };

    let mut binds: Vec<SocketAddr> = vec![];
    let mut nodes: Vec<Node> = vec![];
    let mut request_timeout = DEFAULT_REQUEST_TIMEOUT;
    let mut verbose = false;
    let mut positional: Vec<String> = vec![];

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--bind" => {
                let raw = flag_value(args, i)?;
                binds.push(raw.parse().with_context(|| format!("invalid --bind {}", raw))?);
                i += 2;
            }
            "--node" => {
                nodes.push(parse_node(flag_value(args, i)?)?);
                i += 2;
            }
            "--timeout-ms" => {
                let raw = flag_value(args, i)?;
                let ms: u64 = raw
                    .parse()
                    .with_context(|| format!("invalid --timeout-ms {}", raw))?;
                request_timeout = Duration::from_millis(ms);
                i += 2;
            }
            "--verbose" => {
                verbose = true;
                i += 1;
            }
            flag if flag.starts_with("--") => bail!("unknown option {}\n{}", flag, USAGE),
            other => {
                positional.push(other.to_string());
                i += 1;
            }
        }
    }

    if nodes.is_empty() {
        nodes = DEFAULT_NODES
            .iter()
            .map(|(id, address)| Node::new(*id, *address))
            .collect();
    }
    let client = ClientConfig {
        nodes,
        request_timeout,
    };

    let command = match (command.as_str(), positional.as_slice()) {
        ("serve", []) => {
            if binds.is_empty() {
                bail!("serve requires at least one --bind\n{}", USAGE);
            }
            Command::Serve(ServeConfig { binds })
        }
        ("put", [key, value]) => Command::Put {
            client,
            key: key.clone(),
            value: value.clone(),
        },
        ("get", [key]) => Command::Get {
            client,
            key: key.clone(),
        },
        ("list", [address]) => Command::List {
            client,
            address: address.clone(),
        },
        ("demo", []) => Command::Demo(client),
        (name, rest) => bail!(
            "invalid invocation: {} with {} argument(s)\n{}",
            name,
            rest.len(),
            USAGE
        ),
    };

    Ok(Config { command, verbose })
}

fn flag_value(args: &[String], i: usize) -> Result<&str> {
    args.get(i + 1)
        .map(String::as_str)
        .with_context(|| format!("{} requires a value", args[i]))
}

/// Parses `<id>=<host:port>`.
fn parse_node(raw: &str) -> Result<Node> {
    let (id, address) = raw
        .split_once('=')
        .with_context(|| format!("invalid --node {}, expected <id>=<addr>", raw))?;
    let id: i64 = id
        .parse()
        .with_context(|| format!("invalid node id in --node {}", raw))?;
    if address.is_empty() {
        bail!("empty address in --node {}", raw);
    }
    Ok(Node::new(id, address))
}
