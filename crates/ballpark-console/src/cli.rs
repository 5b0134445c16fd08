//! Command line definition

use ballpark_core::types::{CommentKey, PostId, QuestionNum, UserNumber};
use ballpark_core::{Config, LogFormat};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Command line interface for the Ballpark admin console
#[derive(Debug, Parser)]
#[command(
    name = "ballpark-admin",
    version = env!("CARGO_PKG_VERSION"),
    about = "Administration console for the Ballpark fan community",
    long_about = "Lists, searches and moderates users, comments, community posts and inquiries through the Ballpark admin API."
)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    /// Enable structured JSON logging
    #[arg(long, global = true)]
    pub json: bool,

    /// Answer yes to every confirmation
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Fold command line flags into the loaded configuration
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(level) = &self.log_level {
            config.logging.level.clone_from(level);
        }
        if self.json {
            config.logging.format = LogFormat::Json;
        }
        if self.yes {
            config.console.assume_yes = true;
        }
    }
}

/// Available subcommands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Manage users
    Users {
        /// User action
        #[command(subcommand)]
        action: UsersCommand,
    },

    /// Moderate comments
    Comments {
        /// Comment action
        #[command(subcommand)]
        action: CommentsCommand,
    },

    /// Moderate community posts
    Community {
        /// Post action
        #[command(subcommand)]
        action: CommunityCommand,
    },

    /// Handle inquiries
    Inquiries {
        /// Inquiry action
        #[command(subcommand)]
        action: InquiriesCommand,
    },

    /// Inspect configuration
    Config {
        /// Show resolved configuration
        #[arg(short, long)]
        show: bool,

        /// Validate configuration
        #[arg(long)]
        validate: bool,
    },
}

/// Search and paging options shared by every `list` command
#[derive(Debug, Clone, Default, Args)]
pub struct ListArgs {
    /// Search term
    #[arg(short, long)]
    pub search: Option<String>,

    /// Search category key (e.g. name, email, author, board, answered)
    #[arg(short, long, value_name = "CATEGORY")]
    pub by: Option<String>,

    /// Page to show
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,

    /// Rows per page; must be one of the configured choices
    #[arg(long)]
    pub page_size: Option<usize>,
}

/// User actions
#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    /// List users with their activity counts
    List(ListArgs),

    /// Show one user's details
    Show {
        /// User number
        number: UserNumber,
    },

    /// Toggle a user's suspension flag
    Suspend {
        /// User number
        number: UserNumber,
    },

    /// Release a suspended user
    Release {
        /// User number
        number: UserNumber,
    },
}

/// Comment actions
#[derive(Debug, Subcommand)]
pub enum CommentsCommand {
    /// List comments, newest first
    List(ListArgs),

    /// Show one comment
    Show {
        /// Comment key `postId_commentNum[_replyId]`
        key: CommentKey,
    },

    /// Delete one comment or reply
    Delete {
        /// Comment key `postId_commentNum[_replyId]`
        key: CommentKey,
    },

    /// Delete several comments at once
    DeleteMany {
        /// Comment keys
        #[arg(required = true, num_args = 1..)]
        keys: Vec<CommentKey>,
    },
}

/// Community post actions
#[derive(Debug, Subcommand)]
pub enum CommunityCommand {
    /// List posts
    List(ListArgs),

    /// Show one post with its content and attachment
    Show {
        /// Post id
        id: PostId,
    },

    /// Delete one post
    Delete {
        /// Post id
        id: PostId,
    },

    /// Delete several posts at once
    DeleteMany {
        /// Post ids
        #[arg(required = true, num_args = 1..)]
        ids: Vec<PostId>,
    },
}

/// Inquiry actions
#[derive(Debug, Subcommand)]
pub enum InquiriesCommand {
    /// List inquiries
    List(ListArgs),

    /// Show one inquiry with its content and attachment
    Show {
        /// Inquiry number
        id: QuestionNum,
    },

    /// Delete one inquiry
    Delete {
        /// Inquiry number
        id: QuestionNum,
    },

    /// Delete several inquiries at once
    DeleteMany {
        /// Inquiry numbers
        #[arg(required = true, num_args = 1..)]
        ids: Vec<QuestionNum>,
    },

    /// Answer an inquiry
    Answer {
        /// Inquiry number
        id: QuestionNum,

        /// Answer text
        #[arg(short, long)]
        text: String,
    },
}
