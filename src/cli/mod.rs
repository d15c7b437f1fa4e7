pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::StoryQueryType;

#[derive(Parser)]
#[command(name = "hackline")]
#[command(about = "Hacker News stories, search, and comment threads", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/hackline/config.toml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List stories of a category (top, ask, show, new, job, best, active)
    Stories {
        category: StoryQueryType,

        /// Number of pages to walk (default: display.page_count)
        #[arg(short, long)]
        pages: Option<usize>,
    },
    /// Search stories by text
    Search {
        /// Free-text query
        text: String,
    },
    /// Show the comment thread of a story
    Comments {
        /// Story id
        id: i64,
    },
}
