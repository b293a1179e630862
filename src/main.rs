use check_zpool_scrub::alerts::{worst, Evaluation, Thresholds};
use check_zpool_scrub::check::{self, CheckOptions};
use check_zpool_scrub::clock::SystemClock;
use check_zpool_scrub::collectors::zfs::ZpoolCommand;
use check_zpool_scrub::config::Config;
use check_zpool_scrub::error::Result;
use check_zpool_scrub::util::human::fmt_duration;
use check_zpool_scrub::util::report::{self, Report};
use check_zpool_scrub::util::timespan::parse_timespan;
use clap::{ArgAction, CommandFactory, Parser};
use clap_complete::Shell;
use std::io;
use tracing_subscriber::EnvFilter;

const PERFDATA_HELP: &str = "\
Performance data (POOL is the name of the pool):
  'POOL: last_scrub_timespan'   seconds since the last scrub
  'POOL: last_scrub_timestamp'  epoch seconds of the last scrub
  'POOL: progress'              scrub progress, 0 - 100 %
  'POOL: speed'                 scrub speed in MB per second
  'POOL: time_to_go'            estimated remaining scrub time in seconds

The last scrub date is read from 'zpool status POOL'.";

#[derive(Parser, Debug)]
#[command(
    name = "check_zpool_scrub",
    version,
    about = "Monitoring plugin to check how long ago the last ZFS scrub was performed",
    after_help = PERFDATA_HELP,
)]
struct Cli {
    /// Name of the pool. If omitted, all pools are checked
    #[arg(short, long)]
    pool: Option<String>,

    /// Interval for warning state, in seconds or as a timespan ("31 days"). Must not exceed -c
    #[arg(short, long, value_parser = parse_span)]
    warning: Option<u64>,

    /// Interval for critical state, in seconds or as a timespan ("2 months")
    #[arg(short, long, value_parser = parse_span)]
    critical: Option<u64>,

    /// Increase output verbosity (use up to 3 times)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Log to stderr: -d info, -dd debug, -ddd trace
    #[arg(short, long, action = ArgAction::Count)]
    debug: u8,

    /// Print the per-pool evaluations as JSON instead of the plugin line
    #[arg(long)]
    json: bool,

    /// Print config file path and resolved values, then exit
    #[arg(long)]
    print_config: bool,

    /// Print a shell completion script and exit
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

fn parse_span(s: &str) -> std::result::Result<u64, String> {
    parse_timespan(s).map_err(|e| e.to_string())
}

fn main() {
    // Help, version and usage errors exit UNKNOWN like every other failure.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            std::process::exit(3);
        }
    };

    init_logging(cli.debug);

    if let Some(shell) = cli.completions {
        clap_complete::generate(shell, &mut Cli::command(), "check_zpool_scrub", &mut io::stdout());
        return;
    }

    if cli.print_config {
        if let Err(e) = run_print_config() {
            std::process::exit(emit(report::generate_error(&e)));
        }
        return;
    }

    let code = match run_check(&cli) {
        Ok(evaluations) if cli.json => match serde_json::to_string_pretty(&evaluations) {
            Ok(json) => {
                println!("{}", json);
                worst(&evaluations).exit_code()
            }
            Err(e) => emit(report::generate_error(&e)),
        },
        Ok(evaluations) => emit(report::generate(&evaluations, cli.verbose)),
        Err(e) => {
            tracing::error!(error = %e, "check aborted");
            emit(report::generate_error(&e))
        }
    };
    std::process::exit(code);
}

fn init_logging(debug: u8) {
    let level = match debug {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn emit(report: Report) -> i32 {
    print!("{}", report.text);
    report.exit_code()
}

/// CLI flags win over the config file, which wins over built-in defaults.
fn resolve_thresholds(cli: &Cli, cfg: &Config) -> Result<Thresholds> {
    let warning = match cli.warning {
        Some(w) => w,
        None    => cfg.thresholds.warning.seconds()?,
    };
    let critical = match cli.critical {
        Some(c) => c,
        None    => cfg.thresholds.critical.seconds()?,
    };
    Thresholds::new(warning, critical)
}

fn run_check(cli: &Cli) -> Result<Vec<Evaluation>> {
    let cfg = Config::load()?;
    let opts = CheckOptions {
        pool:       cli.pool.clone(),
        thresholds: resolve_thresholds(cli, &cfg)?,
    };
    let zpool = ZpoolCommand::new(&cfg.zpool.command);
    check::run(&zpool, &opts, &cfg.scan_parser(), &SystemClock)
}

fn run_print_config() -> Result<()> {
    let cfg = Config::load()?;
    let path = Config::config_path()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| "(unknown)".to_string());
    let warning = cfg.thresholds.warning.seconds()?;
    let critical = cfg.thresholds.critical.seconds()?;
    println!("Config: {}", path);
    println!();
    println!("[thresholds]");
    println!("  warning  = {} ({})", warning, fmt_duration(warning));
    println!("  critical = {} ({})", critical, fmt_duration(critical));
    println!();
    println!("[zpool]");
    println!("  command = {}", cfg.zpool.command);
    println!();
    println!("[parser]");
    println!("  extended_time_to_go = {}", cfg.parser.extended_time_to_go);
    Ok(())
}
