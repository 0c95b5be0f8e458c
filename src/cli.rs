use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use crate::commands::{CompletionsCommand, GenerateCommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "gudkey", version, about = "Generate a short-term AWS Bedrock API key for GudCommit", long_about = None, arg_required_else_help = false)]
pub struct Cli {
    #[arg(short = 'v', long, global = true, action = ArgAction::Count, help = "Increase verbosity (-v info, -vv debug, -vvv trace)")]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    #[command(about = "Generate a Bedrock API key and save it to ~/.gudcommit-credentials")]
    Generate(GenerateCommand),
    #[command(about = "Generate shell completion scripts for gudkey")]
    Completions(CompletionsCommand),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let command = self
            .command
            .unwrap_or(Commands::Generate(GenerateCommand::default()));

        match command {
            Commands::Generate(cmd) => cmd.execute().await,
            Commands::Completions(cmd) => {
                cmd.execute();
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, error::ErrorKind};

    #[test]
    fn test_no_command_defaults_to_generate() {
        let cli = Cli::try_parse_from(["gudkey"]).unwrap();
        assert!(cli.command.is_none());
        assert!(matches!(
            cli.command
                .unwrap_or(Commands::Generate(GenerateCommand::default())),
            Commands::Generate(_)
        ));
    }

    #[test]
    fn test_generate_command_parsing() {
        let cli = Cli::try_parse_from(["gudkey", "generate"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Generate(_))));
    }

    #[test]
    fn test_completions_command_parsing() {
        let cli = Cli::try_parse_from(["gudkey", "completions", "zsh"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Completions(_))));
    }

    #[test]
    fn test_command_structure_validation() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_unknown_flag_fails() {
        let result = Cli::try_parse_from(["gudkey", "--region", "eu-west-1"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_help_flag_works() {
        let result = Cli::try_parse_from(["gudkey", "--help"]);
        assert!(matches!(result, Err(e) if e.kind() == ErrorKind::DisplayHelp));
    }

    #[test]
    fn test_version_flag_works() {
        let result = Cli::try_parse_from(["gudkey", "--version"]);
        assert!(matches!(result, Err(e) if e.kind() == ErrorKind::DisplayVersion));
    }

    #[test]
    fn test_verbose_flag_counts() {
        assert_eq!(Cli::try_parse_from(["gudkey"]).unwrap().verbose, 0);
        assert_eq!(Cli::try_parse_from(["gudkey", "-vv"]).unwrap().verbose, 2);
        assert_eq!(
            Cli::try_parse_from(["gudkey", "generate", "--verbose"])
                .unwrap()
                .verbose,
            1
        );
    }
}
