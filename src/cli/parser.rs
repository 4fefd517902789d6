use crate::core::TableKind;
use crate::core::report::GroupBy;
use crate::export::ExportFormat;
use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for rOvertime
/// CLI application to record overtime and uncovered duties with SQLite
#[derive(Parser)]
#[command(
    name = "rovertime",
    version = env!("CARGO_PKG_VERSION"),
    about = "Record employee overtime and uncovered duties, import CSV files and build reports",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Keep records in memory for this run only
    #[arg(global = true, long = "memory")]
    pub memory: bool,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Date and text filters shared by `list`, `duty list` and `report`.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    #[arg(
        long,
        value_name = "RANGE",
        conflicts_with_all = ["from", "to"],
        help = "Filter by year/month/day or a custom range (YYYY, YYYY-MM, YYYY-MM-DD, A:B, all)"
    )]
    pub range: Option<String>,

    #[arg(long, value_name = "DATE", help = "First date included (YYYY-MM-DD)")]
    pub from: Option<String>,

    #[arg(long, value_name = "DATE", help = "Last date included (YYYY-MM-DD)")]
    pub to: Option<String>,

    #[arg(long, help = "Only this category (shift for duties)")]
    pub category: Option<String>,

    #[arg(long, help = "Only this department")]
    pub department: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity and stored values")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print or manage the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Record one overtime entry
    Add {
        #[arg(long, help = "Employee identifier")]
        employee: String,

        #[arg(long, default_value = "", help = "Employee name")]
        name: String,

        #[arg(long)]
        department: String,

        /// Date worked (YYYY-MM-DD)
        #[arg(long)]
        date: String,

        #[arg(long, allow_negative_numbers = true)]
        hours: f64,

        #[arg(long, help = "Overtime category (Regular, Holiday, Special)")]
        category: String,

        #[arg(long, help = "Pending, Approved or Rejected (default from config)")]
        status: Option<String>,

        #[arg(long = "approved-by", default_value = "")]
        approved_by: String,

        #[arg(long, default_value = "")]
        notes: String,

        #[arg(long = "roster-group", default_value = "")]
        roster_group: String,

        #[arg(long = "week-start", help = "Defaults to the Monday of the date's week")]
        week_start: Option<String>,

        #[arg(long = "week-end", help = "Defaults to the Sunday of the date's week")]
        week_end: Option<String>,

        #[arg(long = "reviewed-by", default_value = "")]
        reviewed_by: String,
    },

    /// Record or list uncovered duties
    Duty {
        #[command(subcommand)]
        action: DutyAction,
    },

    /// Append the rows of a CSV file to a table
    Import {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, value_enum, default_value = "overtime")]
        table: TableKind,

        #[arg(long, value_name = "N", default_value_t = 5, help = "Rows shown before confirming")]
        preview: usize,

        #[arg(long, short = 'y', help = "Append without asking for confirmation")]
        yes: bool,
    },

    /// List stored records
    List {
        #[arg(long, value_enum, default_value = "overtime")]
        table: TableKind,

        #[command(flatten)]
        filter: FilterArgs,

        #[arg(long, help = "Show every column")]
        full: bool,
    },

    /// Summary metrics, charts and a table of the filtered records
    Report {
        #[arg(long, value_enum, default_value = "overtime")]
        table: TableKind,

        #[command(flatten)]
        filter: FilterArgs,

        #[arg(long = "group-by", value_enum, default_value = "department")]
        group_by: GroupBy,

        #[arg(long, help = "Show a date x group matrix of hours")]
        pivot: bool,

        #[arg(long, help = "Show every column in the records table")]
        full: bool,

        #[arg(long, help = "Print metrics and chart data as JSON")]
        json: bool,

        #[arg(long, value_name = "FILE", help = "Also export the filtered records")]
        export: Option<String>,

        #[arg(long, value_enum, requires = "export")]
        format: Option<ExportFormat>,

        #[arg(long, short = 'f', requires = "export")]
        force: bool,
    },

    /// Record the audit outcome of an overtime entry
    Audit {
        #[arg(long)]
        id: String,

        #[arg(long, help = "Unaudited, Verified, Discrepancy or Resolved")]
        status: String,

        #[arg(long = "reviewed-by")]
        reviewed_by: Option<String>,

        #[arg(long)]
        comments: Option<String>,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Export stored records
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range"
        )]
        range: Option<String>,

        #[arg(long, value_enum, default_value = "overtime")]
        table: TableKind,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum DutyAction {
    /// Record one uncovered duty
    Add {
        /// Date of the uncovered shift (YYYY-MM-DD)
        #[arg(long)]
        date: String,

        #[arg(long)]
        department: String,

        #[arg(long, help = "Morning, Afternoon or Night")]
        shift: String,

        #[arg(long, allow_negative_numbers = true, help = "Hours left uncovered")]
        hours: f64,

        #[arg(long, default_value = "")]
        reason: String,

        #[arg(long, help = "Open, Covered or Cancelled (default Open)")]
        status: Option<String>,
    },

    /// List uncovered duties
    List {
        #[command(flatten)]
        filter: FilterArgs,

        #[arg(long, help = "Show full ids")]
        full: bool,
    },
}
