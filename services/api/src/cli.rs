use crate::report::{run_profiles, run_score, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use jobbot::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "JobBot",
    about = "Score, classify and triage job postings from the command line or over HTTP",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score a posting export and print the ranked leads
    Score(ScoreArgs),
    /// List the built-in scoring presets
    Profiles,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Score(args) => run_score(args),
        Command::Profiles => {
            run_profiles();
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobbot::workflows::intake::PostingFormat;
    use jobbot::workflows::jobs::scoring::ScoringProfile;

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["jobbot"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn score_arguments_parse() {
        let cli = Cli::try_parse_from([
            "jobbot",
            "score",
            "--input",
            "jobs.csv",
            "--format",
            "csv",
            "--profile",
            "radar",
            "--limit",
            "5",
            "--now",
            "2025-10-16T09:30:00Z",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Score(args)) => {
                assert_eq!(args.format, PostingFormat::Csv);
                assert_eq!(args.profile, Some(ScoringProfile::Radar));
                assert_eq!(args.limit, 5);
                assert!(args.now.is_some());
                assert!(args.export.is_none());
            }
            other => panic!("expected score command, got {other:?}"),
        }
    }

    #[test]
    fn unknown_profiles_are_rejected() {
        let result = Cli::try_parse_from(["jobbot", "score", "--input", "x", "--profile", "sniper"]);
        assert!(result.is_err());
    }
}
