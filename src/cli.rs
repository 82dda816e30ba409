// Command-line interface for reldiff.
//
// Two subcommands mirror the two service operations: `release` diffs the
// top-level release manifests, `job` diffs one named job's manifest.
// Exit codes: 0 = no differences, 1 = differences found, 2 = error.

use std::process;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

use crate::fetch::LocalFetch;
use crate::service::DiffService;

// ---------------------------------------------------------------------------
// Clap CLI definition
// ---------------------------------------------------------------------------

/// Structural diff for release tarballs.
#[derive(Parser, Debug)]
#[command(
    name = "reldiff",
    version,
    about = "Compare manifests across two release tarballs",
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Cmd,

    /// Quiet mode (suppress non-error output).
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Verbose mode (use multiple times for more detail).
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Output the diff set as a JSON array on stdout.
    #[arg(long = "json", global = true)]
    json_output: bool,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Diff the top-level release manifests of two releases.
    Release(ReleaseArgs),
    /// Diff one job's manifest between two releases.
    Job(JobArgs),
}

#[derive(Args, Debug)]
struct ReleaseArgs {
    /// First release tarball (side A).
    #[arg(value_hint = ValueHint::FilePath)]
    release_a: String,

    /// Second release tarball (side B).
    #[arg(value_hint = ValueHint::FilePath)]
    release_b: String,
}

#[derive(Args, Debug)]
struct JobArgs {
    /// Job name to compare.
    name: String,

    /// First release tarball (side A).
    #[arg(value_hint = ValueHint::FilePath)]
    release_a: String,

    /// Second release tarball (side B).
    #[arg(value_hint = ValueHint::FilePath)]
    release_b: String,
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

fn print_diff(lines: &[String], json: bool, quiet: bool) {
    if json {
        // A Vec<String> always serializes.
        println!("{}", serde_json::to_string(lines).unwrap());
    } else if !quiet {
        for line in lines {
            println!("{line}");
        }
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Main CLI entry point. Parses arguments via clap, dispatches commands.
pub fn run() -> ! {
    let cli = Cli::parse();

    let default_filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let service = DiffService::new(LocalFetch);
    let result = match &cli.command {
        Cmd::Release(args) => service.release_diff(&args.release_a, &args.release_b),
        Cmd::Job(args) => service.job_diff(&args.name, &args.release_a, &args.release_b),
    };

    match result {
        Ok(lines) => {
            print_diff(&lines, cli.json_output, cli.quiet);
            if lines.is_empty() {
                if !cli.quiet && !cli.json_output {
                    eprintln!("reldiff: no differences");
                }
                process::exit(0);
            }
            process::exit(1);
        }
        Err(err) => {
            eprintln!("reldiff: {err}");
            process::exit(2);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_release_subcommand() {
        let cli = Cli::parse_from(["reldiff", "release", "a.tgz", "b.tgz"]);
        match cli.command {
            Cmd::Release(args) => {
                assert_eq!(args.release_a, "a.tgz");
                assert_eq!(args.release_b, "b.tgz");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_job_subcommand_with_flags() {
        let cli = Cli::parse_from(["reldiff", "--json", "job", "nats", "a.tgz", "b.tgz"]);
        assert!(cli.json_output);
        match cli.command {
            Cmd::Job(args) => {
                assert_eq!(args.name, "nats");
                assert_eq!(args.release_a, "a.tgz");
                assert_eq!(args.release_b, "b.tgz");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
