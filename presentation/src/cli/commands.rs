//! CLI command definitions

use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

/// CLI arguments for answer-quorum
#[derive(Parser, Debug)]
#[command(name = "answer-quorum")]
#[command(author, version, about = "Answer ensemble - several LLMs answer, one reviewer decides")]
#[command(long_about = r#"
answer-quorum asks one question of several hosted models at once and lets a
reviewer model pick the final answer.

Each request runs in three steps:
1. Fan-out: every backend with a credential answers in parallel
2. Digest: CSV/TSV attachments are summarized meanwhile
3. Adjudication: the reviewer compares the answers and returns JSON

Credentials are read from OPENAI_API_KEY, ANTHROPIC_API_KEY and
GEMINI_API_KEY. Backends without a key are skipped.

Configuration files are loaded from (in priority order):
1. ANSWER_QUORUM_<SECTION>__<KEY>            Environment overrides
2. --config <path>                           Explicit config file
3. ./answer-quorum.toml                      Project-level config
4. ~/.config/answer-quorum/config.toml       Global config

Example:
  answer-quorum serve --bind 127.0.0.1:8000
  answer-quorum ask question.txt data.csv
  answer-quorum ask --show-candidates question.txt
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files and environment overrides
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Also write logs to a daily-rotated file in this directory
    #[arg(long, value_name = "DIR", global = true)]
    pub log_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP service (POST /api/ with multipart file uploads)
    Serve {
        /// Listen address, overriding `server.bind`
        #[arg(long, value_name = "ADDR")]
        bind: Option<SocketAddr>,
    },

    /// Answer one request from local files; the first file holds the question
    Ask {
        #[arg(value_name = "FILES", required = true)]
        files: Vec<PathBuf>,

        /// Suppress progress indicators
        #[arg(short, long)]
        quiet: bool,

        /// Print every candidate and attachment digest before the answer
        #[arg(long)]
        show_candidates: bool,
    },

    /// Show configuration sources and which backends are active
    Config,
}
