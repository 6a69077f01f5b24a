use crate::export::ExportFormat;
use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for rMachLogger
/// CLI application to log machine usage hours into a spreadsheet
#[derive(Parser)]
#[command(
    name = "rmachlogger",
    version = env!("CARGO_PKG_VERSION"),
    about = "A simple machine usage logger: record hours per machine, project and operator and report them",
    long_about = None
)]
pub struct Cli {
    /// Override the log file path (.xlsx or .csv)
    #[arg(global = true, long = "file")]
    pub file: Option<String>,

    /// Override the sheet name used inside the workbook
    #[arg(global = true, long = "sheet")]
    pub sheet: Option<String>,

    /// Enable debug logging on stderr
    #[arg(global = true, long = "debug")]
    pub debug: bool,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Filters shared by list, report and export.
///
/// Omitting a dimension selects every value; an explicitly empty value
/// (e.g. `--machine=`) selects nothing.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    #[arg(long, value_delimiter = ',', num_args = 0.., help = "Machines to include (comma separated)")]
    pub machine: Option<Vec<String>>,

    #[arg(long, value_delimiter = ',', num_args = 0.., help = "Projects to include (comma separated)")]
    pub project: Option<Vec<String>>,

    #[arg(long, value_delimiter = ',', num_args = 0.., help = "Operators to include (comma separated)")]
    pub operator: Option<Vec<String>>,

    #[arg(long, value_delimiter = ',', num_args = 0.., help = "Shifts to include (Morning, Afternoon, Night)")]
    pub shift: Option<Vec<String>>,

    #[arg(
        long,
        short = 'r',
        value_name = "RANGE",
        help = "Date range: YYYY, YYYY-MM, YYYY-MM-DD or START:END (default: whole log)"
    )]
    pub range: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration and an empty log file
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check the configuration for invalid values")]
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

    /// Log one machine usage record
    Add {
        /// Date of the record (YYYY-MM-DD)
        date: String,

        #[arg(long, short = 'm', help = "Machine name")]
        machine: String,

        #[arg(long, short = 'p', help = "Project or activity")]
        project: String,

        #[arg(long, short = 'o', help = "Operator name")]
        operator: String,

        #[arg(long, short = 's', help = "Shift: Morning, Afternoon or Night (default from config)")]
        shift: Option<String>,

        /// Start time (HH:MM)
        #[arg(long = "in", help = "Start time (HH:MM)")]
        start: Option<String>,

        /// End time (HH:MM)
        #[arg(long = "out", help = "End time (HH:MM)")]
        end: Option<String>,

        #[arg(long, help = "Hours worked (derived from --in/--out when omitted)")]
        hours: Option<String>,

        #[arg(long, help = "Free text notes")]
        notes: Option<String>,
    },

    /// List the filtered log records
    List {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Show hours summaries for the filtered records
    Report {
        #[command(flatten)]
        filters: FilterArgs,

        #[arg(
            long = "by",
            value_name = "FIELDS",
            help = "Comma separated group-by fields, repeat for more summaries (default: machine, project, operator)"
        )]
        by: Vec<String>,

        #[arg(long = "rows", help = "Also print the filtered records")]
        rows: bool,
    },

    /// Export the filtered records and their summaries
    Export {
        #[arg(long, value_enum, default_value = "xlsx")]
        format: ExportFormat,

        #[arg(long = "out", value_name = "FILE")]
        out: String,

        #[command(flatten)]
        filters: FilterArgs,

        #[arg(long = "by", value_name = "FIELDS")]
        by: Vec<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Read an external multi-sheet machining workbook and summarize it
    Ingest {
        /// Workbook to read (.xlsx, .xls, .ods)
        workbook: String,

        #[arg(long, value_delimiter = ',', num_args = 0.., help = "Project codes to include")]
        project: Option<Vec<String>>,

        #[arg(long, value_delimiter = ',', num_args = 0.., help = "Machines to include")]
        machine: Option<Vec<String>>,

        #[arg(long = "export", value_name = "FILE", help = "Also export the breakdown")]
        export: Option<String>,

        #[arg(long, value_enum, default_value = "xlsx")]
        format: ExportFormat,

        #[arg(long, short = 'f')]
        force: bool,
    },
}
