// ABOUTME: CLI binary for the car-analyzer listing scraper.
// ABOUTME: Scrapes listing URLs or a saved HTML file and prints summaries, details or JSON.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use anyhow::Context;
use car_analyzer::logging::{init_logging, LogConfig, LogFormat};
use car_analyzer::{ClientBuilder, Options, VehicleRecord};
use clap::Parser;

const URL_PROMPT: &str = "Gib eine Kleinanzeigen URL ein: ";

#[derive(Parser, Debug)]
#[command(name = "car-scraper")]
#[command(about = "Scrape vehicle listings into structured records")]
struct Args {
    /// Print records as JSON
    #[arg(long = "json")]
    json_output: bool,

    /// Print every extracted field instead of the short summary
    #[arg(long = "details", conflicts_with = "json_output")]
    details: bool,

    /// Output file path (default: stdout)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Saved listing HTML file to parse (requires --url)
    #[arg(long = "html")]
    html: Option<PathBuf>,

    /// Source URL recorded for --html parsing
    #[arg(long = "url")]
    url: Option<String>,

    /// User-Agent header sent with every request (overrides USER_AGENT)
    #[arg(long = "user-agent")]
    user_agent: Option<String>,

    /// Request timeout in seconds
    #[arg(long = "timeout", default_value_t = 30)]
    timeout: u64,

    /// Print elapsed time in ms to stderr
    #[arg(long = "timing")]
    timing: bool,

    /// Log encoding on stderr: text or json
    #[arg(long = "log-format", default_value = "text")]
    log_format: String,

    /// Listing URLs to scrape; prompts for one when omitted
    #[arg()]
    urls: Vec<String>,
}

fn format_output(records: &[VehicleRecord], args: &Args) -> anyhow::Result<String> {
    if args.json_output {
        let json = if records.len() == 1 {
            serde_json::to_string_pretty(&records[0])?
        } else {
            serde_json::to_string_pretty(records)?
        };
        return Ok(json);
    }

    let blocks: Vec<String> = records
        .iter()
        .map(|r| {
            if args.details {
                r.format_text()
            } else {
                r.format_summary()
            }
        })
        .collect();
    Ok(blocks.join("\n\n"))
}

fn prompt_for_url() -> anyhow::Result<String> {
    let mut stdout = io::stdout();
    write!(stdout, "{}", URL_PROMPT)?;
    stdout.flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read URL from stdin")?;
    Ok(line.trim().to_string())
}

fn write_output(output: &str, path: Option<&PathBuf>) -> anyhow::Result<()> {
    match path {
        Some(path) => fs::write(path, output)
            .with_context(|| format!("error writing to {}", path.display())),
        None => {
            println!("{}", output);
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env is the common case.
    dotenvy::dotenv().ok();

    let args = Args::parse();

    if let Err(e) = init_logging(LogConfig {
        format: LogFormat::from(args.log_format.as_str()),
        ..LogConfig::default()
    }) {
        eprintln!("warning: {}", e);
    }

    if args.html.is_some() && args.url.is_none() {
        eprintln!("error: --url is required when using --html");
        return ExitCode::from(1);
    }

    if args.html.is_some() && !args.urls.is_empty() {
        eprintln!("error: cannot use both --html and positional URLs");
        return ExitCode::from(1);
    }

    let mut builder = ClientBuilder::from_options(Options::from_env())
        .timeout(Duration::from_secs(args.timeout));
    if let Some(user_agent) = &args.user_agent {
        builder = builder.user_agent(user_agent.clone());
    }

    let client = match builder.build() {
        Ok(client) => client,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::from(1);
        }
    };

    let start = Instant::now();
    let mut records: Vec<VehicleRecord> = Vec::new();
    let mut had_error = false;

    if let (Some(html_path), Some(url)) = (&args.html, &args.url) {
        match fs::read_to_string(html_path) {
            Ok(html) => match client.scrape_html(&html, url) {
                Ok(record) => records.push(record),
                Err(e) => {
                    eprintln!("error scraping {}: {}", url, e);
                    had_error = true;
                }
            },
            Err(e) => {
                eprintln!("error reading file {}: {}", html_path.display(), e);
                had_error = true;
            }
        }
    } else {
        let urls = if args.urls.is_empty() {
            match prompt_for_url() {
                Ok(url) if !url.is_empty() => vec![url],
                Ok(_) => {
                    eprintln!("error: at least one URL is required");
                    return ExitCode::from(1);
                }
                Err(e) => {
                    eprintln!("error: {:#}", e);
                    return ExitCode::from(1);
                }
            }
        } else {
            args.urls.clone()
        };

        for outcome in client.scrape_all(&urls).await {
            match outcome.result {
                Ok(record) => records.push(record),
                Err(e) => {
                    eprintln!("error scraping {}: {}", outcome.url, e);
                    had_error = true;
                }
            }
        }
    }

    let elapsed = start.elapsed();

    if !records.is_empty() {
        let written = format_output(&records, &args)
            .and_then(|output| write_output(&output, args.output.as_ref()));
        if let Err(e) = written {
            eprintln!("error: {:#}", e);
            had_error = true;
        }
    }

    if args.timing {
        let _ = writeln!(io::stderr(), "elapsed: {}ms", elapsed.as_millis());
    }

    if had_error {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}
