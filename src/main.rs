use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use old_core_files::actions;
use old_core_files::actions::list_old_files::ScanRequest;
use old_core_files::config::Config;
use old_core_files::fs::expand_home;
use old_core_files::known::SourceKind;
use old_core_files::report::OutputFormat;
use old_core_files::scan::{LocalFs, ScanLimits};

#[derive(Parser, Debug)]
#[command(name = "ocf")]
#[command(version, about = "Lists old WordPress core files that are still present after an upgrade", long_about = None)]
struct Cli {
    /// Configuration file (defaults to <config dir>/old-core-files/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// More log output on stderr (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check which known obsolete paths exist under the installation root
    Scan {
        #[command(flatten)]
        target: TargetArgs,
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
        /// Stop after checking this many paths
        #[arg(long, value_name = "N")]
        max_paths: Option<usize>,
        /// Stop once the scan has run for this many seconds
        #[arg(long, value_name = "SECS")]
        time_budget: Option<u64>,
        #[arg(long)]
        no_color: bool,
        /// Exit with status 1 when any old file is found
        #[arg(long)]
        fail_if_found: bool,
    },
    /// Print the known obsolete paths, one per line
    Known {
        #[command(flatten)]
        target: TargetArgs,
    },
    /// Explain why old core files matter
    About,
}

#[derive(Args, Debug)]
struct TargetArgs {
    /// Installation root (defaults to the configured root, then the current directory)
    #[arg(long, value_name = "DIR")]
    root: Option<String>,
    /// Where the known list comes from: auto, bundled, update-core or file
    #[arg(long)]
    source: Option<SourceKind>,
    /// Known-path list file, one path per line
    #[arg(long, value_name = "FILE")]
    list: Option<PathBuf>,
}

struct Target {
    root: PathBuf,
    source: SourceKind,
    list: Option<PathBuf>,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load_or_default(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command {
        Commands::Scan { target, format, max_paths, time_budget, no_color, fail_if_found } => {
            let target = resolve_target(target, &config)?;
            if no_color || !config.output.color {
                colored::control::set_override(false);
            }
            let request = ScanRequest {
                root: target.root,
                source: target.source,
                list: target.list,
                limits: ScanLimits {
                    max_paths: max_paths.or(config.scan.max_paths),
                    time_budget: Duration::from_secs(time_budget.unwrap_or(config.scan.time_budget_secs)),
                },
            };
            let format = format.unwrap_or(config.output.format);
            let found = actions::list_old_files::execute(&request, &LocalFs, format)?;
            return Ok(ExitCode::from(actions::list_old_files::exit_status(found, fail_if_found)));
        }
        Commands::Known { target } => {
            let target = resolve_target(target, &config)?;
            actions::list_known::execute(&target.root, target.source, target.list.as_deref())?;
        }
        Commands::About => actions::about::execute(),
    }
    Ok(ExitCode::SUCCESS)
}

fn init_tracing(verbose: u8) {
    let default_filter = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn resolve_target(args: TargetArgs, config: &Config) -> Result<Target> {
    let root = match args.root.as_deref().or(config.root.as_deref()) {
        Some(root) => expand_home(root).with_context(|| format!("Failed to expand root '{}'", root))?,
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };
    Ok(Target {
        root,
        source: args.source.unwrap_or(config.source),
        list: args.list.or_else(|| config.list.clone()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn cli_flags_override_config() -> Result<()> {
        let config = Config {
            root: Some("/var/www".to_string()),
            source: SourceKind::Bundled,
            list: Some(PathBuf::from("/etc/ocf/list.txt")),
            ..Config::default()
        };

        let from_config = resolve_target(TargetArgs { root: None, source: None, list: None }, &config)?;
        assert_eq!(from_config.root, PathBuf::from("/var/www"));
        assert_eq!(from_config.source, SourceKind::Bundled);
        assert_eq!(from_config.list, Some(PathBuf::from("/etc/ocf/list.txt")));

        let cli = Cli::try_parse_from(["ocf", "scan", "--root", "/srv/wp", "--source", "file", "--list", "old.txt", "--format", "json"])?;
        let Commands::Scan { target, format, .. } = cli.command else {
            panic!("expected scan command");
        };
        assert_eq!(format, Some(OutputFormat::Json));
        let overridden = resolve_target(target, &config)?;
        assert_eq!(overridden.root, PathBuf::from("/srv/wp"));
        assert_eq!(overridden.source, SourceKind::File);
        assert_eq!(overridden.list, Some(PathBuf::from("old.txt")));
        Ok(())
    }

    #[test]
    fn unknown_source_is_rejected_by_parser() {
        assert!(Cli::try_parse_from(["ocf", "known", "--source", "ftp"]).is_err());
    }
}
