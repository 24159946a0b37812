use crate::core::filter::{FilterState, PinnedSelect};
use crate::export::ExportFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line interface definition for rTimeline
/// Browse a dataset of dated events grouped by year
#[derive(Parser)]
#[command(
    name = "rtimeline",
    version = env!("CARGO_PKG_VERSION"),
    about = "An interactive timeline viewer: filter, search, pin and export dated events grouped by year",
    long_about = None
)]
pub struct Cli {
    /// Override database path (pinned state and internal log)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Override the dataset location (path, file:// or http(s):// URL)
    #[arg(global = true, long = "data")]
    pub data: Option<String>,

    /// Use a configuration file other than ~/.rtimeline/rtimeline.conf
    #[arg(global = true, long = "config")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(global = true, long = "no-color")]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Every filter control, as flags. Empty values mean "no constraint".
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Free-text search; supports title:, platform:, classification:,
    /// period:, year: and watched: tags
    #[arg(long, short = 'q', default_value = "")]
    pub query: String,

    #[arg(id = "media_format", long = "media-format", help = "Exact media format (e.g. Film, Series)")]
    pub format: Option<String>,

    #[arg(long, help = "Exact classification")]
    pub classification: Option<String>,

    #[arg(long, help = "Platform name contained in the watch-on list")]
    pub platform: Option<String>,

    #[arg(long, help = "Display year (e.g. 1944)")]
    pub year: Option<String>,

    #[arg(long, help = "Exact historical period")]
    pub period: Option<String>,

    #[arg(long, help = "Exact watched value (e.g. Yes, No)")]
    pub watched: Option<String>,

    #[arg(long, value_enum, help = "Only pinned (yes) or only unpinned (no) events")]
    pub pinned: Option<PinnedSelect>,

    #[arg(long = "hide-watched")]
    pub hide_watched: bool,

    #[arg(long = "hide-pinned")]
    pub hide_pinned: bool,

    #[arg(long, help = "Challenge mode: hide everything watched or pinned")]
    pub challenge: bool,
}

impl FilterArgs {
    pub fn to_state(&self) -> FilterState {
        FilterState {
            query: self.query.clone(),
            format: self.format.clone(),
            classification: self.classification.clone(),
            platform: self.platform.clone(),
            year: self.year.clone(),
            period: self.period.clone(),
            watched: self.watched.clone(),
            pinned: self.pinned,
            hide_watched: self.hide_watched,
            hide_pinned: self.hide_pinned,
            challenge: self.challenge,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(long = "editor", help = "Specify the editor to use")]
        editor: Option<String>,
    },

    /// Render the timeline grouped by year
    List {
        #[command(flatten)]
        filters: FilterArgs,

        #[arg(long = "collapse", value_name = "YEAR", help = "Collapse a year group")]
        collapse: Vec<String>,

        #[arg(long, help = "Retry records that failed to render")]
        retry: bool,
    },

    /// Toggle the pinned state of an event, then render the timeline
    Pin {
        /// Record id as shown in the timeline
        id: u32,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Show summary statistics for the filtered events
    Stats {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Export the filtered events
    Export {
        #[arg(long = "to", value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short = 'f')]
        force: bool,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}
