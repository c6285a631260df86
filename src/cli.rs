use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct CliOptions {
    /// Optional path to deployment config file (YAML)
    #[arg(long, global = true)]
    pub config_path: Option<PathBuf>,

    /// Run as a server: execute requests with the in-process task engine
    /// instead of submitting them to the backend
    #[arg(short = 'S', long, global = true)]
    pub server: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show task status, optionally waiting for completion
    Status(StatusOptions),
    /// Process a raw disk image on a shared filesystem
    Rawdisk {
        /// Path to the disk image or block device
        #[arg(short, long)]
        local_path: PathBuf,
        #[command(flatten)]
        submit: SubmitOptions,
    },
    /// Process a directory of loose files on a shared filesystem
    Directory {
        /// Path to the directory
        #[arg(short, long)]
        local_path: PathBuf,
        #[command(flatten)]
        submit: SubmitOptions,
    },
    /// Process a cloud persistent disk
    Clouddisk {
        /// Name of the persistent disk
        #[arg(short, long)]
        disk_name: String,
        /// Cloud project the disk lives in
        #[arg(long)]
        project: String,
        /// Zone the disk lives in
        #[arg(long)]
        zone: String,
        #[command(flatten)]
        submit: SubmitOptions,
    },
    /// Process a raw image embedded inside a cloud persistent disk
    ClouddiskEmbedded {
        /// Name of the persistent disk
        #[arg(short, long)]
        disk_name: String,
        /// Cloud project the disk lives in
        #[arg(long)]
        project: String,
        /// Zone the disk lives in
        #[arg(long)]
        zone: String,
        /// Path of the raw image inside the disk
        #[arg(short, long)]
        embedded_path: PathBuf,
        #[command(flatten)]
        submit: SubmitOptions,
    },
}

#[derive(Args, Debug)]
pub struct StatusOptions {
    /// Look back this many days (takes precedence over id filters)
    #[arg(long)]
    pub days_history: Option<u64>,

    /// Show tasks for this request id
    #[arg(long)]
    pub request_id: Option<String>,

    /// Show this task only
    #[arg(long)]
    pub task_id: Option<String>,

    /// Show all fields (request id, task id, saved paths)
    #[arg(long)]
    pub all_fields: bool,

    /// Block until all matching tasks reach a terminal state
    #[arg(long)]
    pub wait: bool,

    /// Seconds between polls while waiting
    #[arg(long)]
    pub poll_interval: Option<u64>,

    /// Give up waiting after this many seconds
    #[arg(long)]
    pub max_wait: Option<u64>,
}

/// Flags shared by every evidence-submitting subcommand.
#[derive(Args, Debug)]
pub struct SubmitOptions {
    /// Display label for the evidence (defaults to its path/identifier)
    #[arg(long)]
    pub name: Option<String>,

    /// Free-text provenance note
    #[arg(long)]
    pub source: Option<String>,

    /// Bypass placement validation (logged loudly)
    #[arg(long)]
    pub force_evidence: bool,

    /// Print the canonical request JSON instead of submitting it
    #[arg(long)]
    pub dump_json: bool,

    /// Block until all tasks spawned by the request complete
    #[arg(long)]
    pub wait: bool,

    /// Seconds between polls while waiting
    #[arg(long)]
    pub poll_interval: Option<u64>,

    /// Give up waiting after this many seconds
    #[arg(long)]
    pub max_wait: Option<u64>,
}

pub fn parse() -> CliOptions {
    CliOptions::parse()
}
