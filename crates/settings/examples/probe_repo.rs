//! Example: Resolve and print the fsmonitor settings of a repository.
//!
//! Run with: cargo run -p fsmon-settings --example probe_repo -- [PATH] [--json]

use fsmon_settings::Repository;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for debug output
    tracing_subscriber::fmt()
        .with_env_filter("fsmon_settings=debug,fsmon_config=debug")
        .init();

    let mut path = String::from(".");
    let mut json = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--json" => json = true,
            _ => path = arg,
        }
    }

    let mut repo = Repository::open(&path)?;
    let report = repo.fsmonitor_report();

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("=== fsmonitor settings ===");
        println!("{}", report.to_text());
    }
    Ok(())
}
