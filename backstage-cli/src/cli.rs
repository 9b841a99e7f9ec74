//! Command-line definitions

use std::path::PathBuf;

use backstage_common::model::{
    AccountType, Platform, PostStatus, ReleaseStatus, ReleaseType, ShowStatus,
};
use backstage_common::time::parse_date;
use clap::{Args, Parser, Subcommand};

/// Color tag given to artists created without `--color`
pub const DEFAULT_ARTIST_COLOR: &str = "#FF6B35";

/// Command-line arguments for backstage
#[derive(Parser, Debug)]
#[command(name = "backstage")]
#[command(about = "Artist management dashboard: releases, shows and social posts")]
#[command(version)]
pub struct Cli {
    /// Data folder holding the dashboard snapshots
    #[arg(short, long, global = true)]
    pub root_folder: Option<PathBuf>,

    /// Origin of the booking API proxy
    #[arg(long, global = true)]
    pub proxy_url: Option<String>,

    /// TOML config file (default: platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage the artist roster
    #[command(subcommand)]
    Artist(ArtistCommand),

    /// Track releases
    #[command(subcommand)]
    Release(ReleaseCommand),

    /// Track shows, manual and synced
    #[command(subcommand)]
    Show(ShowCommand),

    /// Plan social posts
    #[command(subcommand)]
    Post(PostCommand),

    /// Save booking API connection details
    Connect(ConnectArgs),

    /// Forget the booking API connection
    Disconnect,

    /// Pull shows from the booking API
    Sync,

    /// Headline numbers for one artist
    Summary {
        /// Artist id or name
        #[arg(short, long)]
        artist: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum ArtistCommand {
    /// Add an artist
    Add {
        name: String,

        #[arg(long, default_value = DEFAULT_ARTIST_COLOR)]
        color: String,
    },
    /// List artists
    List,
}

#[derive(Subcommand, Debug)]
pub enum ReleaseCommand {
    /// Add a release
    Add(ReleaseArgs),
    /// List an artist's releases
    List {
        #[arg(short, long)]
        artist: String,
    },
}

#[derive(Args, Debug)]
pub struct ReleaseArgs {
    /// Artist id or name
    #[arg(short, long)]
    pub artist: String,

    pub title: String,

    /// Single, EP, Album, Remix or Mixtape
    #[arg(long = "type", default_value = "single")]
    pub release_type: ReleaseType,

    /// upcoming, in-progress or released
    #[arg(long, default_value = "upcoming")]
    pub status: ReleaseStatus,

    /// Release date, YYYY-MM-DD
    #[arg(long, value_parser = parse_day)]
    pub date: Option<String>,

    #[arg(long)]
    pub label: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum ShowCommand {
    /// Add a show by hand
    Add(ShowArgs),
    /// Upcoming and past shows for an artist
    List {
        #[arg(short, long)]
        artist: String,

        /// Refresh from the booking API first when connected
        #[arg(long)]
        sync: bool,
    },
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Artist id or name
    #[arg(short, long)]
    pub artist: String,

    pub venue: String,

    #[arg(long)]
    pub city: Option<String>,

    #[arg(long)]
    pub country: Option<String>,

    /// Show date, YYYY-MM-DD
    #[arg(long, value_parser = parse_day)]
    pub date: Option<String>,

    /// Free text, any currency
    #[arg(long)]
    pub fee: Option<String>,

    /// pending, confirmed or cancelled
    #[arg(long, default_value = "pending")]
    pub status: ShowStatus,

    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum PostCommand {
    /// Plan a post
    Add(PostArgs),
    /// List an artist's posts
    List {
        #[arg(short, long)]
        artist: String,
    },
    /// Advance a post: draft, scheduled, posted, then back to draft
    Cycle {
        /// Post id
        id: String,
    },
}

#[derive(Args, Debug)]
pub struct PostArgs {
    /// Artist id or name
    #[arg(short, long)]
    pub artist: String,

    /// Instagram, TikTok, Twitter, YouTube, Facebook or anything else
    #[arg(short, long)]
    pub platform: Platform,

    /// Post, Reel, Story, Video, ...
    #[arg(long = "type", default_value = "Post")]
    pub content_type: String,

    /// Planned date, YYYY-MM-DD
    #[arg(long, value_parser = parse_day)]
    pub date: Option<String>,

    #[arg(long)]
    pub caption: Option<String>,

    #[arg(long, default_value = "draft")]
    pub status: PostStatus,
}

#[derive(Args, Debug)]
pub struct ConnectArgs {
    /// Booking API token
    #[arg(long)]
    pub token: String,

    #[arg(long)]
    pub project_id: String,

    /// artist or agency
    #[arg(long, default_value = "artist")]
    pub account_type: AccountType,

    /// Required for agency accounts
    #[arg(long)]
    pub agency_id: Option<String>,
}

fn parse_day(s: &str) -> Result<String, String> {
    parse_date(s)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .ok_or_else(|| format!("'{}' is not a YYYY-MM-DD date", s))
}
