//! CLI command definitions and argument parsing.
//!
//! This module defines all the CLI commands and their arguments using the clap crate.
//! Each command group lives in its own file and shares parameters from `params`.

use clap::{Arg, ArgAction, ArgMatches, Command};

pub mod auth;
pub mod beneficiary;
pub mod config;
pub mod params;
pub mod transfer;

use params::PARAMETER_VERBOSE;

/// Build the full command tree.
pub fn cli_command() -> Command {
    Command::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .author(env!("CARGO_PKG_AUTHORS"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .propagate_version(true)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new(PARAMETER_VERBOSE)
                .short('v')
                .long(PARAMETER_VERBOSE)
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Enable verbose output for debugging"),
        )
        .subcommand(beneficiary::beneficiary_command())
        .subcommand(transfer::transfer_command())
        .subcommand(auth::auth_command())
        .subcommand(config::config_command())
}

/// Parse the process arguments.
pub fn create_cli_commands() -> ArgMatches {
    cli_command().get_matches()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_tree_is_consistent() {
        cli_command().debug_assert();
    }

    #[test]
    fn test_validate_conflicts_with_dry_run() {
        let result = cli_command().try_get_matches_from([
            "paycli",
            "beneficiary",
            "create",
            "--validate",
            "--dry-run",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_field_is_repeatable() {
        let matches = cli_command()
            .try_get_matches_from([
                "paycli",
                "beneficiary",
                "create",
                "--field",
                "a=1",
                "--field",
                "b=2",
            ])
            .unwrap();
        let (_, beneficiary) = matches.subcommand().unwrap();
        let (_, create) = beneficiary.subcommand().unwrap();
        let fields: Vec<&String> = create.get_many::<String>(params::PARAMETER_FIELD).unwrap().collect();
        assert_eq!(fields.len(), 2);
    }
}
