//! Clap derive structures for the `xmrnodes` CLI.
//!
//! Defines the command tree, global flags, and shared argument types.
//! Kept free of workspace crates so `build.rs` can include it for man pages.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// xmrnodes -- query and administer a Monero remote node monitor
#[derive(Debug, Parser)]
#[command(
    name = "xmrnodes",
    version,
    about = "Browse Monero remote nodes and administer a node monitor",
    long_about = "A command-line client for Monero remote node monitors.\n\n\
        Lists monitored nodes, probe logs, countries and fee estimates,\n\
        submits new nodes, and manages probers and cron jobs with an\n\
        admin session.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Monitor profile to use
    #[arg(long, short = 'p', env = "XMRNODES_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Monitor URL (overrides profile)
    #[arg(long, short = 's', env = "XMRNODES_SERVER", global = true)]
    pub server: Option<String>,

    /// Prober API key (for `job` commands)
    #[arg(long, env = "XMRNODES_API_KEY", global = true, hide_env = true)]
    pub api_key: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "XMRNODES_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k', env = "XMRNODES_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "XMRNODES_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Browse, inspect and submit remote nodes
    #[command(alias = "n")]
    Nodes(NodesArgs),

    /// Browse probe logs
    Logs(LogsArgs),

    /// Node counts per country
    Countries,

    /// Median fee estimates per network
    Fees,

    /// View scheduled cron jobs (admin)
    Crons(CronsArgs),

    /// Manage probers (admin)
    Probers(ProbersArgs),

    /// Log in to or out of the admin session
    Auth(AuthArgs),

    /// Prober job API
    Job(JobArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared List Arguments ────────────────────────────────────────────

/// Shared pagination and sorting arguments for all list commands.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Page number (1-based)
    #[arg(long, default_value = "1")]
    pub page: u32,

    /// Rows per page (overrides profile)
    #[arg(long, short = 'l')]
    pub limit: Option<u32>,

    /// Column to sort by
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort direction
    #[arg(long, default_value = "desc", requires = "sort")]
    pub dir: SortDir,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortDir {
    Asc,
    Desc,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  NODES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct NodesArgs {
    #[command(subcommand)]
    pub command: NodesCommand,
}

#[derive(Debug, Subcommand)]
pub enum NodesCommand {
    /// List monitored nodes
    #[command(alias = "ls")]
    List(NodesListArgs),

    /// Show one node
    Get {
        /// Node ID
        id: u64,
    },

    /// Submit a node for monitoring
    Add {
        /// Protocol used by the node's RPC
        #[arg(value_enum)]
        protocol: RpcProtocol,

        /// Hostname, IP address, .onion or .i2p address
        hostname: String,

        /// RPC port
        port: u16,
    },

    /// Print a curl command that calls `get_info` on a node
    Curl {
        /// Node ID
        id: u64,
    },
}

#[derive(Debug, Args)]
pub struct NodesListArgs {
    #[command(flatten)]
    pub list: ListArgs,

    /// Hostname or IP substring
    #[arg(long)]
    pub host: Option<String>,

    /// Network
    #[arg(long, value_enum)]
    pub nettype: Option<NettypeArg>,

    /// Transport
    #[arg(long, value_enum)]
    pub protocol: Option<ProtocolArg>,

    /// Two-letter country code, or UNKNOWN
    #[arg(long)]
    pub cc: Option<String>,

    /// Only nodes that answered the last probe
    #[arg(long, conflicts_with = "offline")]
    pub online: bool,

    /// Only nodes that failed the last probe
    #[arg(long)]
    pub offline: bool,

    /// Only nodes with CORS enabled
    #[arg(long)]
    pub cors: bool,

    /// Use the web table endpoint instead of the JSON API
    #[arg(long, hide = true)]
    pub datatable: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RpcProtocol {
    Http,
    Https,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum NettypeArg {
    Mainnet,
    Stagenet,
    Testnet,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ProtocolArg {
    Http,
    Https,
    Tor,
    I2p,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  LOGS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct LogsArgs {
    #[command(flatten)]
    pub list: ListArgs,

    /// Only logs for this node
    #[arg(long)]
    pub node: Option<u64>,

    /// Only successful probes
    #[arg(long, conflicts_with = "failed")]
    pub ok: bool,

    /// Only failed probes
    #[arg(long)]
    pub failed: bool,

    /// Failure reason substring
    #[arg(long)]
    pub reason: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ADMIN: CRONS & PROBERS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CronsArgs {
    #[command(flatten)]
    pub list: ListArgs,
}

#[derive(Debug, Args)]
pub struct ProbersArgs {
    #[command(subcommand)]
    pub command: ProbersCommand,
}

#[derive(Debug, Subcommand)]
pub enum ProbersCommand {
    /// List probers
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        list: ListArgs,

        /// Name substring
        #[arg(long)]
        name: Option<String>,
    },

    /// Register a prober and print its API key
    Create {
        /// Prober name
        name: String,
    },

    /// Rename a prober
    Edit {
        /// Prober ID
        id: u64,

        /// New name
        name: String,
    },

    /// Delete a prober
    #[command(alias = "rm")]
    Delete {
        /// Prober ID
        id: u64,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  AUTH
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct AuthArgs {
    #[command(subcommand)]
    pub command: AuthCommand,
}

#[derive(Debug, Subcommand)]
pub enum AuthCommand {
    /// Log in and store the session in the system keyring
    Login {
        /// Admin username (defaults to the profile's)
        #[arg(long, short = 'u')]
        username: Option<String>,

        /// Do not store the session
        #[arg(long)]
        no_save: bool,
    },

    /// End the session and forget the stored cookie
    Logout,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  JOB
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct JobArgs {
    #[command(subcommand)]
    pub command: JobCommand,
}

#[derive(Debug, Subcommand)]
pub enum JobCommand {
    /// Fetch the next node to probe
    Request {
        /// Accept Tor nodes
        #[arg(long)]
        tor: bool,

        /// Accept I2P nodes
        #[arg(long)]
        i2p: bool,

        /// Accept IPv6-only nodes
        #[arg(long)]
        ipv6: bool,
    },

    /// Submit a probe report
    Submit {
        /// JSON file with `took_time`, `message` and `node_info`
        #[arg(long, short = 'F')]
        from_file: PathBuf,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current configuration
    Show,

    /// Set a value on the active profile
    Set {
        /// Profile key (server, username, api_key_env, ca_cert, insecure, timeout, rows_per_page)
        key: String,

        /// Value to set
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store a secret in the system keyring
    SetPassword {
        /// Profile name
        #[arg(long)]
        profile: Option<String>,

        /// Store the prober API key instead of the admin password
        #[arg(long)]
        api_key: bool,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
