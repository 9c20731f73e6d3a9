//! CLI argument parsing via `clap`.

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "auditor",
    version,
    about = "Browse site audit reports",
    long_about = "Auditor — aggregate accessibility, HTML5 and broken-link reports produced by a site audit crawl into a filterable, sortable, paginated listing.\n\nConfiguration precedence: CLI > auditor.toml > defaults.",
    after_help = "Examples:\n  auditor list --dir reports\n  auditor list --type link --level error --order file --sort desc --page 1\n  auditor facets --output json",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Args)]
/// Options shared by every command that reads reports.
pub struct SourceArgs {
    #[arg(long, help = "Project root used to find auditor.toml (default: current dir)")]
    pub root: Option<String>,
    #[arg(long, help = "Reports directory, relative to the root (default: reports)")]
    pub dir: Option<String>,
    #[arg(long, help = "Output mode: human|json (default: human)")]
    pub output: Option<String>,
}

#[derive(Subcommand)]
/// Supported subcommands.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current auditor version.")]
    Version,
    /// List one page of report findings
    #[command(
        about = "List report findings",
        long_about = "Read every <name>-report.json in the reports directory, filter by type and level, sort and print one page. Filenames are replaced by the source URLs recorded in map.json.",
        after_help = "Examples:\n  auditor list --type html5 --type accessibility\n  auditor list --order level --sort desc --page 2"
    )]
    List {
        #[command(flatten)]
        source: SourceArgs,
        #[arg(long = "type", value_name = "TYPE", help = "Keep only this report type (accessibility|html5|link); repeatable")]
        types: Vec<String>,
        #[arg(long = "level", value_name = "LEVEL", help = "Keep only this level; repeatable")]
        levels: Vec<String>,
        #[arg(long, help = "Field to sort by: file|category|level|message")]
        order: Option<String>,
        #[arg(long, default_value = "asc", help = "Sort direction: asc|desc")]
        sort: String,
        #[arg(long, default_value_t = 0, help = "Page index, starting at 0")]
        page: usize,
        #[arg(long, help = "Records per page (default: 25)")]
        page_size: Option<usize>,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Sort all records before paging instead of the requested page only")]
        global_sort: bool,
    },
    /// Show available types and levels with counts
    #[command(
        about = "Show report facets",
        long_about = "Count findings per report type and per level across all report files, ignoring filters."
    )]
    Facets {
        #[command(flatten)]
        source: SourceArgs,
    },
}
