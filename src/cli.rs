//! CLI argument parsing for sectorstore

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::SectorStatus;

#[derive(Parser, Debug)]
#[command(name = "ss")]
#[command(author, version, about = "Sector-by-sector pest control tracking", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Identity triple shared by all sector-targeting commands
#[derive(Args, Debug)]
pub struct SectorArgs {
    /// Block name (e.g. "BLOCO A")
    #[arg(required = true)]
    pub block: String,

    /// Floor name (e.g. "1º Pavimento")
    #[arg(required = true)]
    pub floor: String,

    /// Sector name (e.g. "UTI")
    #[arg(required = true)]
    pub name: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start service on a pending sector
    Checkin {
        #[command(flatten)]
        sector: SectorArgs,

        /// Person performing the service
        #[arg(short, long)]
        executor: String,

        /// Person accountable for the sector
        #[arg(short, long)]
        responsible: String,
    },

    /// Finish service on an in-progress sector
    Checkout {
        #[command(flatten)]
        sector: SectorArgs,
    },

    /// Mark a pending sector completed in one step
    Complete {
        #[command(flatten)]
        sector: SectorArgs,

        /// Person performing the service
        #[arg(short, long)]
        executor: String,

        /// Person accountable for the sector
        #[arg(short, long)]
        responsible: String,

        /// Photo reference, repeatable (max 5)
        #[arg(short, long = "photo")]
        photos: Vec<String>,
    },

    /// Restore a sector to pending
    Reset {
        #[command(flatten)]
        sector: SectorArgs,
    },

    /// Restore every sector to pending
    ResetAll,

    /// Show one sector's record
    Show {
        #[command(flatten)]
        sector: SectorArgs,
    },

    /// List sectors, optionally limited to one block
    List {
        /// Block name to limit to
        #[arg(short, long)]
        block: Option<String>,
    },

    /// Show completion statistics
    Stats,

    /// List sectors checked in today
    Today,

    /// List sectors matching the given filters
    Records {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Export matching sectors as CSV
    Export {
        #[command(flatten)]
        filter: FilterArgs,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Filter flags shared by `records` and `export`
#[derive(Args, Debug)]
pub struct FilterArgs {
    /// Keep records checked in on or after this date (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// Keep records checked in on or before this date (YYYY-MM-DD)
    #[arg(long)]
    pub end_date: Option<NaiveDate>,

    /// Exact block name
    #[arg(short, long)]
    pub block: Option<String>,

    /// Substring of the sector name (case-insensitive)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Substring of the executor (case-insensitive)
    #[arg(short, long)]
    pub executor: Option<String>,

    /// Exact status: pending, in-progress or completed
    #[arg(short, long)]
    pub status: Option<SectorStatus>,
}

impl From<FilterArgs> for crate::registry::RecordFilter {
    fn from(args: FilterArgs) -> Self {
        Self {
            start_date: args.start_date,
            end_date: args.end_date,
            block: args.block,
            name: args.name,
            executor: args.executor,
            status: args.status,
        }
    }
}
