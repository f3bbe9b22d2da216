use std::path::PathBuf;

use seatplan::config::SeatingConfig;

fn main() {
    let mut args = std::env::args().skip(1);
    let mut db_path: Option<PathBuf> = None;
    let mut config_path: Option<PathBuf> = None;
    let mut enforce_capacity = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--file" | "-f" => {
                db_path = args.next().map(PathBuf::from);
                if db_path.is_none() {
                    eprintln!("Error: --file requires a path argument");
                    std::process::exit(1);
                }
            }
            "--config" | "-c" => {
                config_path = args.next().map(PathBuf::from);
                if config_path.is_none() {
                    eprintln!("Error: --config requires a JSON file path");
                    std::process::exit(1);
                }
            }
            "--enforce-capacity" => enforce_capacity = true,
            "--help" | "-h" => {
                println!("Seatplan - guest list and seating planner");
                println!();
                println!("Usage: seatplan [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -f, --file <PATH>      Database file path (default: .data/seatplan.db)");
                println!("  -c, --config <PATH>    JSON config file");
                println!("  --enforce-capacity     Refuse to seat guests at a full table");
                println!("  -h, --help             Show this help");
                return;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!("Use --help for usage information.");
                std::process::exit(1);
            }
        }
    }

    let mut config = match config_path {
        Some(path) => match SeatingConfig::load(&path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error reading config {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => SeatingConfig::default(),
    };
    if let Some(path) = db_path {
        config.database_path = path;
    }
    if enforce_capacity {
        config.enforce_capacity = true;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.as_str().into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Some(dir) = config.database_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        if let Err(e) = std::fs::create_dir_all(dir) {
            eprintln!("Error: cannot create {}: {}", dir.display(), e);
            std::process::exit(1);
        }
    }

    seatplan::cli::run(&config);
}
