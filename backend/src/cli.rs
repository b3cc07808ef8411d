//! Command-line interface of the `gamescoreservice` binary.

use clap::{Args, Parser, Subcommand};

use gamescoreservice::Settings;

#[derive(Debug, Parser)]
#[command(name = "gamescoreservice", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create or upgrade the database schema.
    InitDb(DatabaseArgs),
    /// Insert the sample players, games, levels and scores into an empty
    /// database.
    PopulateDb(DatabaseArgs),
    /// Serve the HTTP API.
    Run(RunArgs),
}

#[derive(Debug, Args)]
pub struct DatabaseArgs {
    /// PostgreSQL connection string. Overrides `GSS_DATABASE_URL`.
    #[arg(long, value_name = "URL")]
    pub database_url: Option<String>,
}

#[derive(Debug, Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub database: DatabaseArgs,
    /// Interface to listen on. Overrides `GSS_HOST`.
    #[arg(long)]
    pub host: Option<String>,
    /// Port to listen on. Overrides `GSS_PORT`.
    #[arg(long)]
    pub port: Option<u16>,
}

impl Command {
    /// Layer the flags of this subcommand over `settings`.
    pub fn apply(&self, settings: Settings) -> Settings {
        match self {
            Self::InitDb(db) | Self::PopulateDb(db) => {
                settings.with_database_url(db.database_url.clone())
            }
            Self::Run(run) => settings
                .with_database_url(run.database.database_url.clone())
                .with_listen(run.host.clone(), run.port),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parse(args: &[&str]) -> Command {
        Cli::try_parse_from(args).expect("arguments parse").command
    }

    #[rstest]
    fn run_flags_override_settings() {
        let command = parse(&[
            "gamescoreservice",
            "run",
            "--host",
            "0.0.0.0",
            "--port",
            "8080",
            "--database-url",
            "postgres://cli/db",
        ]);
        let settings = command.apply(Settings::default());

        assert_eq!(settings.host(), "0.0.0.0");
        assert_eq!(settings.port(), 8080);
        assert_eq!(settings.database_url.as_deref(), Some("postgres://cli/db"));
    }

    #[rstest]
    #[case("init-db")]
    #[case("populate-db")]
    fn database_commands_accept_a_url(#[case] name: &str) {
        let command = parse(&["gamescoreservice", name, "--database-url", "postgres://x/y"]);
        let settings = command.apply(Settings::default());

        assert_eq!(settings.database_url.as_deref(), Some("postgres://x/y"));
    }

    #[rstest]
    #[case(&["gamescoreservice"])]
    #[case(&["gamescoreservice", "init-db", "--port", "1"])]
    #[case(&["gamescoreservice", "run", "--port", "http"])]
    fn invalid_invocations_are_rejected(#[case] args: &[&str]) {
        assert!(Cli::try_parse_from(args).is_err());
    }
}
