// Binary entry point for the command-line extractor.
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use simplelog::{ColorChoice, TermLogger, TerminalMode};
use std::path::PathBuf;
use taskwhen::config::Config;
use taskwhen::context::StandardContext;
use taskwhen::model::{DateRange, Deadline, Schedule};
use taskwhen::{ExtractionReport, Extractor};

#[derive(Debug, Default)]
struct Args {
    command: Option<String>,
    text: Vec<String>,
    override_root: Option<PathBuf>,
    verbose: bool,
    now: Option<String>,
    deadline: Option<String>,
    start: Option<String>,
    end: Option<String>,
}

fn parse_args(raw: &[String]) -> Args {
    let mut args = Args::default();
    let mut i = 1;
    while i < raw.len() {
        // Flags that take a value consume the next argument when present.
        let value = raw.get(i + 1).cloned();
        match raw[i].as_str() {
            "--root" | "-r" => {
                args.override_root = value.map(PathBuf::from);
                i += 1;
            }
            "--now" => {
                args.now = value;
                i += 1;
            }
            "--deadline" => {
                args.deadline = value;
                i += 1;
            }
            "--start" => {
                args.start = value;
                i += 1;
            }
            "--end" => {
                args.end = value;
                i += 1;
            }
            "--verbose" | "-v" => args.verbose = true,
            word if args.command.is_none() => args.command = Some(word.to_string()),
            word => args.text.push(word.to_string()),
        }
        i += 1;
    }
    args
}

fn parse_instant(flag: &str, value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("{} expects an RFC 3339 timestamp, got '{}'", flag, value))
}

fn current_schedule(args: &Args) -> Result<Schedule> {
    match (&args.deadline, &args.start, &args.end) {
        (Some(_), Some(_), _) | (Some(_), _, Some(_)) => Err(anyhow::anyhow!(
            "--deadline cannot be combined with --start/--end"
        )),
        (Some(d), None, None) => Ok(Schedule::Due(Deadline::new(parse_instant(
            "--deadline",
            d,
        )?))),
        (None, Some(s), Some(e)) => {
            let range = DateRange::new(parse_instant("--start", s)?, parse_instant("--end", e)?)?;
            Ok(Schedule::Span(range))
        }
        (None, Some(_), None) | (None, None, Some(_)) => Err(anyhow::anyhow!(
            "--start and --end must be given together"
        )),
        (None, None, None) => Ok(Schedule::Floating),
    }
}

fn main() -> Result<()> {
    let raw: Vec<String> = std::env::args().collect();

    if raw.len() < 2 || raw.iter().any(|arg| arg == "--help" || arg == "-h") {
        taskwhen::cli::print_help("taskwhen");
        return Ok(());
    }

    let args = parse_args(&raw);
    let ctx = StandardContext::new(args.override_root.clone());
    let config = Config::load_or_default(&ctx)?;

    let level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        config.level_filter()
    };
    // A second logger init only fails if one is already set; nothing to do then.
    let _ = TermLogger::init(
        level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );

    let now = match &args.now {
        Some(value) => parse_instant("--now", value)?,
        None => Utc::now(),
    };
    let extractor = Extractor::from_config(&config);
    let text = args.text.join(" ");

    let report: ExtractionReport = match args.command.as_deref() {
        Some("add") => extractor.report_add(&text, now),
        Some("edit") => extractor.report_edit(&text, &current_schedule(&args)?, now),
        Some(other) => {
            eprintln!("Unknown command '{}'. See 'taskwhen --help'.", other);
            std::process::exit(2);
        }
        None => {
            taskwhen::cli::print_help("taskwhen");
            return Ok(());
        }
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    if let Some(error) = &report.error {
        eprintln!("Error: {}", error);
        std::process::exit(1);
    }
    Ok(())
}
