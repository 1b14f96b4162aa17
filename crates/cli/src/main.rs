mod config;
mod error;

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use navigation::{Decision, Preferences, Request, RequestKind};
use policy::Policy;
use serde::Serialize;
use settings::Settings;
use tracing_subscriber::EnvFilter;

use config::Overrides;
use error::Result;

const SETTINGS_FILE: &str = "navguard.toml";
const LOG_ENV: &str = "NAVGUARD_LOG";

#[derive(Parser)]
#[command(name = "navguard")]
#[command(about = "Domain navigation policy for a website shell", long_about = None)]
#[command(version)]
struct Cli {
    /// Settings file
    #[arg(short, long, global = true, default_value = SETTINGS_FILE)]
    config: PathBuf,

    #[command(flatten)]
    overrides: Overrides,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Decide what the shell would do with each URL
    Check {
        /// URLs to check
        #[arg(required = true)]
        urls: Vec<String>,
        /// Treat the URLs as new-window requests
        #[arg(long)]
        new_window: bool,
        /// Print decisions as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the effective policy
    Policy {
        /// Print the policy as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write a default settings file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
    /// Read URLs from stdin and decide each one; `:reload` re-reads settings
    Session,
}

fn main() {
    init_tracing();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Check {
            urls,
            new_window,
            json,
        }) => cmd_check(&cli.config, &cli.overrides, &urls, new_window, json),
        Some(Commands::Policy { json }) => cmd_policy(&cli.config, &cli.overrides, json),
        Some(Commands::Init { force }) => cmd_init(&cli.config, &cli.overrides, force),
        Some(Commands::Session) | None => cmd_session(&cli.config, &cli.overrides),
    }
}

#[derive(Serialize)]
struct CheckOutput<'a> {
    url: &'a str,
    kind: RequestKind,
    #[serde(flatten)]
    decision: Decision,
}

fn cmd_check(
    path: &Path,
    overrides: &Overrides,
    urls: &[String],
    new_window: bool,
    json: bool,
) -> Result<()> {
    let (settings, _) = config::load(path, overrides)?;
    let interceptor = config::build_interceptor(&settings)?;
    let kind = if new_window {
        RequestKind::NewWindow
    } else {
        RequestKind::SameWindow
    };

    let decisions: Vec<_> = urls
        .iter()
        .map(|url| {
            let request = Request {
                url: url.clone(),
                kind,
            };
            CheckOutput {
                url: url.as_str(),
                kind,
                decision: interceptor.decide(&request),
            }
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&decisions)?);
        return Ok(());
    }

    println!("{:<8}  {:<24}  {:<16}  URL", "VERDICT", "REASON", "ACTION");
    println!("{}", "-".repeat(80));
    for output in &decisions {
        let verdict = if output.decision.verdict.is_allowed() {
            "allowed"
        } else {
            "denied"
        };
        println!(
            "{verdict:<8}  {:<24}  {:<16}  {}",
            output.decision.verdict.reason().as_str(),
            output.decision.action.as_str(),
            output.url
        );
    }

    Ok(())
}

#[derive(Serialize)]
struct PolicyOutput<'a> {
    source: String,
    policy: &'a Policy,
    preferences: Preferences,
}

fn cmd_policy(path: &Path, overrides: &Overrides, json: bool) -> Result<()> {
    let (settings, source) = config::load(path, overrides)?;
    let policy = settings.validate()?;

    if json {
        let output = PolicyOutput {
            source: config::describe(&source),
            policy: &policy,
            preferences: config::preferences(&settings),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print_policy(&policy, &settings, &config::describe(&source));
    Ok(())
}

fn print_policy(policy: &Policy, settings: &Settings, source: &str) {
    let list = |domains: &std::collections::BTreeSet<String>, empty: &str| {
        if domains.is_empty() {
            empty.to_string()
        } else {
            domains.iter().cloned().collect::<Vec<_>>().join(", ")
        }
    };
    let yes_no = |b: bool| if b { "yes" } else { "no" };

    println!("Source:           {source}");
    println!(
        "Restriction:      {}",
        if policy.restriction_enabled() {
            "enabled"
        } else {
            "disabled"
        }
    );
    println!("Origin domain:    {}", policy.origin_domain());
    println!(
        "Allowed domains:  {}",
        list(policy.allowed_domains(), "(origin only)")
    );
    println!("Blocked domains:  {}", list(policy.blocked_domains(), "-"));
    println!("Subdomains:       {}", yes_no(policy.allow_subdomains()));
    println!(
        "Open externally:  {}",
        yes_no(settings.open_links_externally)
    );
}

fn cmd_init(path: &Path, overrides: &Overrides, force: bool) -> Result<()> {
    config::init(path, overrides, force)?;
    println!("Wrote {}", path.display());
    Ok(())
}

fn cmd_session(path: &Path, overrides: &Overrides) -> Result<()> {
    println!("navguard v{}", env!("CARGO_PKG_VERSION"));

    let (settings, source) = config::load_lenient(path, overrides);
    let interceptor = config::build_interceptor(&settings)?;
    tracing::debug!(settings = %config::describe(&source), "session started");

    println!("Settings: {}", config::describe(&source));
    println!("Origin: {}", interceptor.policy().current().origin_domain());
    println!("Enter a URL per line (prefix with 'new ' for a new window).");
    println!("Type ':reload' to re-read settings, 'quit' or Ctrl+D to exit.\n");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            // EOF
            break;
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input == "quit" || input == "exit" {
            break;
        }
        if input == ":reload" {
            match config::reload(path, overrides, &interceptor) {
                Ok(()) => println!(
                    "Reloaded. Origin: {}\n",
                    interceptor.policy().current().origin_domain()
                ),
                Err(e) => eprintln!("Reload failed: {e}. Keeping current policy.\n"),
            }
            continue;
        }

        let request = match input.strip_prefix("new ") {
            Some(url) => Request::new_window(url.trim()),
            None => Request::same_window(input),
        };
        let decision = interceptor.decide(&request);
        println!("{} ({})", decision.action, decision.verdict.reason());
    }

    println!("\nSession ended.");
    Ok(())
}
