//! Auditor CLI binary entry point.
//! Resolves configuration, runs the listing pipeline and prints results.

use auditor::cli::{Cli, Commands, SourceArgs};
use auditor::config::{self, Effective, Overrides};
use auditor::listing::{run_facets, run_listing, ListingRequest};
use auditor::models::{SortDirection, SortSelection};
use auditor::{output, utils};
use clap::Parser;

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("{} {}", utils::error_prefix(), message);
    std::process::exit(2);
}

fn resolve<'a>(source: &'a SourceArgs, ov: Overrides<'a>) -> Effective {
    let ov = Overrides {
        root: source.root.as_deref(),
        reports: source.dir.as_deref(),
        output: source.output.as_deref(),
        ..ov
    };
    let eff = config::resolve_effective(&ov).unwrap_or_else(|e| fail(e));
    if !eff.config_found && eff.output != "json" {
        eprintln!(
            "{} No auditor.toml found; using defaults.",
            utils::note_prefix()
        );
    }
    log::info!("Reading reports from {}", eff.reports_dir.display());
    eff
}

fn main() {
    let cli = Cli::parse();
    let level = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::List {
            source,
            types,
            levels,
            order,
            sort,
            page,
            page_size,
            global_sort,
        } => {
            let eff = resolve(
                &source,
                Overrides {
                    page_size,
                    global_sort,
                    types: &types,
                    levels: &levels,
                    ..Overrides::default()
                },
            );
            let req = ListingRequest {
                filter: eff.filter.clone(),
                sort: SortSelection {
                    field: order,
                    direction: SortDirection::parse(&sort),
                },
                sort_scope: eff.sort_scope,
                page,
                page_size: eff.page_size,
                ..ListingRequest::new(&eff.reports_dir)
            };
            let listing = run_listing(&req).unwrap_or_else(|e| fail(e));
            output::print_listing(&listing, &eff.output, &eff.reports_dir);
        }
        Commands::Facets { source } => {
            let eff = resolve(&source, Overrides::default());
            let (facets, warnings) = run_facets(&eff.reports_dir, None).unwrap_or_else(|e| fail(e));
            output::print_facets(&facets, &warnings, &eff.output, &eff.reports_dir);
        }
    }
}
