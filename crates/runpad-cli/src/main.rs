use anyhow::Result;
use clap::{Parser, Subcommand};
use log::LevelFilter;
use runpad_client::{find_language, Session, SubmissionClientFactory, DEFAULT_LANGUAGE_ID};
use runpad_cli::{input, overrides::ConfigOverrides, runner};
use std::path::PathBuf;
use std::process::exit;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[clap(
    name = "runpad",
    author,
    version,
    about = "Run code on a remote Judge0 execution service"
)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,

    #[clap(
        long,
        short,
        global = true,
        env = "RUNPAD_CONFIG",
        help = "YAML configuration file with base_url, api_key, api_host, timeout_secs and poll settings"
    )]
    config: Option<PathBuf>,

    #[clap(flatten)]
    overrides: ConfigOverrides,

    #[clap(long, default_value = "warn", global = true, env = "RUNPAD_LOG")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Submit source code and print the result
    Run {
        #[clap(
            long,
            short,
            help = "Source file to submit, or '-' for standard input (defaults to a C hello world)"
        )]
        file: Option<PathBuf>,

        #[clap(long, short, default_value_t = DEFAULT_LANGUAGE_ID, help = "Execution service language id")]
        language: i64,

        #[clap(long, conflicts_with = "stdin_file", help = "Input passed to the program")]
        stdin: Option<String>,

        #[clap(long, help = "File whose contents are passed to the program as input")]
        stdin_file: Option<PathBuf>,
    },
    /// List the known language ids
    Languages,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level_filter = cli.log_level.parse().unwrap_or(LevelFilter::Warn);
    env_logger::Builder::new()
        .filter_level(log_level_filter)
        .init();

    match cli.command {
        Commands::Languages => runner::print_languages(&mut std::io::stdout()),
        Commands::Run {
            file,
            language,
            stdin,
            stdin_file,
        } => {
            if find_language(language).is_none() {
                log::warn!("Language id {} is not in the known list, submitting anyway", language);
            }

            let config =
                runpad_cli::overrides::load_config(cli.config.as_deref(), &cli.overrides).await?;
            let draft =
                input::build_draft(file.as_deref(), language, stdin.as_deref(), stdin_file.as_deref())
                    .await?;

            let poll = config.poll.clone();
            let client = SubmissionClientFactory::create_http_client(config)?;
            let session = Session::new(Arc::from(client)).with_poll(poll);

            let outcome =
                runner::run_submission(&session, &draft, std::io::stderr(), &mut std::io::stdout())
                    .await?;

            if outcome.is_error() {
                exit(1);
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "runpad",
            "run",
            "--language",
            "71",
            "--api-url",
            "http://localhost:2358",
            "--poll-attempts",
            "3",
            "--config",
            "runpad.yaml",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(cli.overrides.api_url.as_deref(), Some("http://localhost:2358"));
        assert_eq!(cli.overrides.poll_attempts, Some(3));
        assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("runpad.yaml")));
        assert_eq!(cli.log_level, "debug");
        assert!(matches!(cli.command, Commands::Run { language: 71, .. }));
    }

    #[test]
    fn test_global_flags_before_subcommand() {
        let cli = Cli::try_parse_from(["runpad", "--api-key", "secret", "languages"]).unwrap();
        assert_eq!(cli.overrides.api_key.as_deref(), Some("secret"));
        assert!(matches!(cli.command, Commands::Languages));
    }
}
