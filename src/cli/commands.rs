//! Command definitions for the timer CLI.
//!
//! Uses clap derive macro for argument parsing. The duration itself is not
//! a flag: it is always entered interactively.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

// ============================================================================
// CLI Structure
// ============================================================================

/// timerpal - a terminal countdown timer
#[derive(Parser, Debug)]
#[command(
    name = "timerpal",
    version,
    about = "大きな数字で表示するシンプルなターミナルタイマー",
    long_about = "起動すると時間の入力欄が表示されます（例: 1h 30m 5s）。\n\
                  カウントダウン中は q キーで中断できます。\n\
                  終了時にデスクトップ通知とサウンドでお知らせします。",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute (runs the timer when omitted)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable the completion sound
    #[arg(long)]
    pub no_sound: bool,

    /// Disable the desktop notification
    #[arg(long)]
    pub no_notify: bool,

    /// Sound file to play on completion
    #[arg(long, value_name = "PATH", conflicts_with = "no_sound")]
    pub sound: Option<PathBuf>,

    /// Configuration file (JSON)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Tests
// ============================================================================
