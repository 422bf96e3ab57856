//! Authentication command definitions.
//!
//! This module defines CLI commands related to stored API credentials.

use crate::commands::params::{
    api_key_parameter, client_id_parameter, COMMAND_AUTH, COMMAND_LOGIN, COMMAND_LOGOUT,
};
use clap::Command;

/// Create the authentication command with all its subcommands.
pub fn auth_command() -> Command {
    Command::new(COMMAND_AUTH)
        .about("Authentication operations")
        .subcommand_required(true)
        .subcommand(
            Command::new(COMMAND_LOGIN)
                .about("Verify API credentials and store them in the keyring")
                .arg(client_id_parameter().required(true))
                .arg(api_key_parameter().required(true)),
        )
        .subcommand(Command::new(COMMAND_LOGOUT).about("Remove stored API credentials"))
}
