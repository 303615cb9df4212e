//! CLI for flipull.
//!
//! Replaces text in a file across one or more GitHub repositories and
//! publishes each change as a new branch, optionally with a pull request.

use clap::builder::NonEmptyStringValueParser;
use clap::{Args, Parser, Subcommand};
use flipull::{
    load_job, Edit, ProcessingResult, RunOutcome, RunSummary, Runner, RunnerConfig, RunnerError,
    DEFAULT_CONCURRENCY, DEFAULT_DESCRIPTION_FORMAT, DEFAULT_TITLE_FORMAT,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// A repository failed.
const EXIT_FAILURE: u8 = 1;
/// The run could not start or was interrupted.
const EXIT_CRITICAL: u8 = 2;
/// Every repository was left unchanged.
const EXIT_NO_CHANGE: u8 = 3;

/// flipull - A tool for automating the creation of pull requests.
#[derive(Parser, Debug)]
#[command(name = "flipull", author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replace text in a file and publish the change as a branch and pull request.
    Replace(ReplaceArgs),
}

#[derive(Args, Debug)]
struct ReplaceArgs {
    /// Repository to change, as owner/repo or owner/repo@branch. Repeatable.
    #[arg(
        short = 'r',
        long = "repository",
        value_name = "OWNER/REPO[@BRANCH]",
        required_unless_present = "job"
    )]
    repositories: Vec<String>,

    /// TOML job file describing the edit. Repositories given with
    /// --repository replace the ones listed in the file.
    #[arg(
        long,
        conflicts_with_all = ["path", "find", "replace", "limit", "title", "description"]
    )]
    job: Option<PathBuf>,

    /// Path of the file to change.
    #[arg(long, required_unless_present = "job")]
    path: Option<String>,

    /// Literal text to search for.
    #[arg(long, required_unless_present = "job", value_parser = NonEmptyStringValueParser::new())]
    find: Option<String>,

    /// Text to replace it with.
    #[arg(long, required_unless_present = "job")]
    replace: Option<String>,

    /// Maximum number of replacements; zero or less replaces all.
    #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
    limit: i64,

    /// Pull request title (Handlebars template).
    #[arg(long, default_value = DEFAULT_TITLE_FORMAT)]
    title: String,

    /// Pull request description and commit message (Handlebars template).
    #[arg(long, default_value = DEFAULT_DESCRIPTION_FORMAT)]
    description: String,

    /// Print the new content without publishing anything.
    #[arg(long)]
    dry_run: bool,

    /// Publish the branch without opening a pull request.
    #[arg(long)]
    skip_pull_request: bool,

    /// GitHub Personal Access Token.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: String,

    /// GitHub API base URL, for GitHub Enterprise.
    #[arg(long, env = "GITHUB_API_URL")]
    api_url: Option<String>,

    /// Maximum repositories processed at once.
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
    concurrency: usize,

    /// Give up on a repository after this many seconds.
    #[arg(long)]
    timeout_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    // Errors only if a provider was already installed, which is fine.
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let Command::Replace(args) = Cli::parse().command;

    let result = tokio::select! {
        result = run(args) => result,
        _ = tokio::signal::ctrl_c() => {
            error!("Interrupted, remaining repositories were not processed");
            return ExitCode::from(EXIT_CRITICAL);
        }
    };

    match result {
        Ok(summary) => {
            print_results(&summary);
            print_summary(&summary);

            if summary.has_failures() {
                ExitCode::from(EXIT_FAILURE)
            } else if summary.all_unchanged() {
                ExitCode::from(EXIT_NO_CHANGE)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            error!(error = %e, "Critical failure");
            ExitCode::from(EXIT_CRITICAL)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Logs go to stderr so previewed content on stdout can be piped.
/// Log level filtering via `RUST_LOG` env var (defaults to "info").
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Builds the runner configuration from flags or a job file and runs it.
async fn run(args: ReplaceArgs) -> Result<RunSummary, RunnerError> {
    let config = match &args.job {
        Some(path) => {
            let job = load_job(path)?;
            let mut config = RunnerConfig::from_job(args.token, &job);
            if !args.repositories.is_empty() {
                config = config.with_repositories(args.repositories);
            }
            config.with_skip_pull_request(args.skip_pull_request || job.skip_pull_request)
        }
        None => {
            // clap enforces these when no job file is given.
            let edit = Edit {
                path: args.path.unwrap_or_default(),
                find: args.find.unwrap_or_default(),
                replace: args.replace.unwrap_or_default(),
                limit: args.limit,
                title: args.title,
                description: args.description,
            };
            RunnerConfig::new(args.token, args.repositories, edit)
                .with_skip_pull_request(args.skip_pull_request)
        }
    };

    let config = config
        .with_api_url(args.api_url)
        .with_dry_run(args.dry_run)
        .with_concurrency(args.concurrency)
        .with_timeout(args.timeout_secs.map(Duration::from_secs));

    Runner::new(config)?.run().await
}

/// Prints each repository's result.
///
/// Previewed content is the only thing written to stdout.
fn print_results(summary: &RunSummary) {
    for result in &summary.results {
        let repository = result.repository();
        match result {
            ProcessingResult::Completed {
                outcome: RunOutcome::Preview { content },
                ..
            } => {
                eprintln!("-- {repository}: new content");
                println!("{content}");
            }
            ProcessingResult::Completed {
                outcome: RunOutcome::Published(change),
                ..
            } => match &change.pull_request {
                Some(pr) => eprintln!("-- {repository}: Success!\n{}", pr.url),
                None => eprintln!(
                    "-- {repository}: Success! (skipped pull request, branch {})",
                    change.branch
                ),
            },
            ProcessingResult::Unchanged { .. } => {
                eprintln!("-- {repository}: no content changed");
            }
            ProcessingResult::Failed { error, .. } => {
                eprintln!("-- {repository}: error: {error}");
            }
        }
    }
}

/// Prints the final run summary.
fn print_summary(summary: &RunSummary) {
    eprintln!("\nSummary:");
    eprintln!(
        "  Mode: {}",
        if summary.dry_run { "Dry Run" } else { "Live" }
    );
    eprintln!(
        "  Repositories processed: {}",
        summary.repositories_processed
    );

    if summary.dry_run {
        eprintln!("  Previews: {}", summary.previews);
    } else {
        eprintln!("  Pull requests created: {}", summary.prs_created);
        eprintln!(
            "  Branches without pull request: {}",
            summary.published_without_pr
        );
    }
    eprintln!("  Unchanged: {}", summary.unchanged);
    eprintln!("  Failed: {}", summary.failed);
}
