//! Command-line interface entry point for `malla`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use malla::config::Config;
use malla::info;
use malla::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};

fn main() {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    let mut level = Level::parse(&config.logging.level).unwrap_or(Level::Warn);
    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    if !config.logging.file.is_empty() {
        let log_path = std::path::PathBuf::from(&config.logging.file);
        if init_file_logging(&log_path) {
            info!("File logging initialized at: {}", log_path.display());
        } else {
            eprintln!("✗ Failed to initialize file logging at: {}", log_path.display());
        }
    }

    let code = match args.command {
        Command::Config { subcommand } => {
            // Edit the stored file, not this run's overrides
            let mut stored = Config::load();
            commands::config::run(subcommand, &mut stored, &defaults);
            0
        }
        Command::Show {
            format,
            select,
            output,
        } => commands::show::run(&config, format.into(), select.as_deref(), output.as_deref()),
        Command::Toggle { codes } => commands::toggle::run(&config, &codes),
        Command::Info { code } => commands::info::run(&config, &code),
        Command::Clear { yes } => commands::clear::run(&config, yes),
        Command::Interactive => commands::interactive::run(&config),
    };
    std::process::exit(code);
}
