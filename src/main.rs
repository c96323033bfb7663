//! Symref CLI binary
//!
//! Thin adapter over the library: arguments in, diagnostics to stderr,
//! JSON to stdout.

use std::process::ExitCode;

fn main() -> ExitCode {
    // Parse CLI arguments (clap exits with usage on a bad argument count)
    let cli = symref::cli::parse_args();

    let default_level = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let config = cli.to_config();
    eprintln!(
        "Finding references to '{}' (domain: {})",
        config.symbol, config.domain_filter
    );

    let report = match symref::run_scan(&config) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {}", e);
            if e.is_configuration() {
                eprintln!("Usage: symref <PROJECT_ROOT> <SYMBOL> <DOMAIN> [OPTIONS]");
                eprintln!("Run 'symref --help' for details.");
            }
            return ExitCode::from(1);
        }
    };

    eprintln!("Project root: {}", report.root.display());
    eprintln!("Source files matched: {}", report.files_scanned);
    if !report.skipped.is_empty() {
        eprintln!("Files skipped (parse errors): {}", report.skipped.len());
        for skipped in &report.skipped {
            eprintln!("  {}: {}", skipped.file.display(), skipped.reason);
        }
    }
    eprintln!("References found: {}", report.references.len());
    eprint!("{}", report.summary.render_table());

    let output = if cli.report {
        report.report_json()
    } else {
        report.references_json()
    };

    match output {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}
