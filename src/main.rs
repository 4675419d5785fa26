mod debug_report;

use flextype::{BreakpointCache, RuleSpec, size_verbose_with};
use std::io::{self, IsTerminal, Read};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "FLEXTYPE_LOG";

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    init_tracing();

    let cache = BreakpointCache::new();
    let rules = RuleSpec::RawText(config.rules.clone());
    let key = config.key.as_deref().unwrap_or(config.rules.as_str());

    let mut runs = Vec::with_capacity(config.widths.len());
    for &width in &config.widths {
        match size_verbose_with(&cache, &rules, width, Some(key)) {
            Ok(details) => runs.push((width, details)),
            Err(err) => {
                eprintln!("error: {err}");
                std::process::exit(1);
            }
        }
    }

    debug_report::print_run(&config.rules, &runs, config.color);
}

struct CliConfig {
    rules: String,
    widths: Vec<f64>,
    key: Option<String>,
    color: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn parse_args() -> Result<CliConfig, String> {
    let mut rules: Option<String> = None;
    let mut widths: Vec<f64> = Vec::new();
    let mut key: Option<String> = None;
    let mut color = io::stdout().is_terminal();
    let mut args = std::env::args().skip(1).peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("flextype {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--width" | "-w" => {
                let value = args.next().ok_or_else(|| "error: --width expects a value".to_string())?;
                widths.push(parse_width(&value)?);
            }
            "--key" | "-k" => {
                let value = args.next().ok_or_else(|| "error: --key expects a value".to_string())?;
                key = Some(value);
            }
            "--" => {
                let rest = args.collect::<Vec<_>>().join(" ");
                if !rest.trim().is_empty() {
                    rules = Some(rest);
                }
                break;
            }
            _ if arg.starts_with("--width=") => {
                widths.push(parse_width(arg.trim_start_matches("--width="))?);
            }
            _ if arg.starts_with("--key=") => {
                key = Some(arg.trim_start_matches("--key=").to_string());
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => {
                rules = Some(std::iter::once(arg).chain(args).collect::<Vec<_>>().join(" "));
                break;
            }
        }
    }

    if widths.is_empty() {
        return Err(format!("error: at least one --width is required\n\n{}", help_text()));
    }

    let rules = match rules {
        Some(value) => value,
        None => read_stdin_rules()?,
    };

    if rules.trim().is_empty() {
        return Err(format!("error: no rules provided\n\n{}", help_text()));
    }

    Ok(CliConfig { rules, widths, key, color })
}

fn read_stdin_rules() -> Result<String, String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("error: failed to read stdin: {err}"))?;
    Ok(buffer)
}

fn parse_width(value: &str) -> Result<f64, String> {
    value
        .trim()
        .trim_end_matches("px")
        .parse::<f64>()
        .ok()
        .filter(|w| w.is_finite())
        .ok_or_else(|| format!("error: invalid width '{value}' (expected a number, optionally suffixed with px)"))
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "flextype {version}

Evaluate responsive font-size rules at one or more widths.

Usage:
  flextype [OPTIONS] --width <px> [--] <rules...>
  echo '<rules>' | flextype [OPTIONS] --width <px>

Rules are a number (`6`, `6%`) or a JSON object mapping widths to sizes,
e.g. '{{\"500\": 12, \"1000+\": 14, \"1400-\": 20}}'. A `+` suffix holds the
size above a width, `-` holds it below.

Options:
  -w, --width <px>           Width to evaluate. Repeat for several widths.
  -k, --key <key>            Cache key. Default: the rule text.
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Environment:
  {log_env}=<filter>      Log filter (e.g. debug). Default: warn.

Exit codes:
  0  Success.
  1  Malformed rules.
  2  Invalid arguments or missing rules.
",
        version = env!("CARGO_PKG_VERSION"),
        log_env = LOG_ENV
    )
}
