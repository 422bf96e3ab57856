//! Configuration command definitions.
//!
//! This module defines CLI commands related to configuration management.

use crate::commands::params::{
    api_url_parameter, environment_parameter, output_parameters, COMMAND_CONFIG, COMMAND_GET,
    COMMAND_PATH, COMMAND_SET, PARAMETER_API_URL, PARAMETER_ENVIRONMENT,
};
use clap::{ArgGroup, Command};

/// Create the config command with all its subcommands.
pub fn config_command() -> Command {
    Command::new(COMMAND_CONFIG)
        .about("Configuration management")
        .subcommand_required(true)
        .subcommand(
            Command::new(COMMAND_GET)
                .about("Get configuration details")
                .args(output_parameters()),
        )
        .subcommand(Command::new(COMMAND_PATH).about("Show configuration file path"))
        .subcommand(
            Command::new(COMMAND_SET)
                .about("Set configuration properties")
                .arg(environment_parameter())
                .arg(api_url_parameter())
                .group(
                    ArgGroup::new("properties")
                        .args([PARAMETER_ENVIRONMENT, PARAMETER_API_URL])
                        .required(true)
                        .multiple(true),
                ),
        )
}
