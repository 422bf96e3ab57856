//! Transfer command definitions.

use crate::commands::params::{
    api_key_parameter, client_id_parameter, dry_run_parameter, field_parameter, id_parameter,
    output_parameters, request_flag_parameters, validate_parameter, COMMAND_CREATE, COMMAND_GET,
    COMMAND_LIST, COMMAND_TRANSFER,
};
use crate::field_registry::FlagRegistry;
use clap::Command;

/// Create the transfer command with all its subcommands.
pub fn transfer_command() -> Command {
    let registry = FlagRegistry::transfer();

    Command::new(COMMAND_TRANSFER)
        .about("Create and inspect transfers")
        .subcommand_required(true)
        .subcommand(
            Command::new(COMMAND_CREATE)
                .about("Create a transfer to an existing or inline beneficiary")
                .args(request_flag_parameters(&registry))
                .arg(field_parameter())
                .arg(validate_parameter())
                .arg(dry_run_parameter())
                .args(output_parameters())
                .arg(client_id_parameter())
                .arg(api_key_parameter()),
        )
        .subcommand(
            Command::new(COMMAND_GET)
                .about("Get a transfer by ID")
                .arg(id_parameter())
                .args(output_parameters())
                .arg(client_id_parameter())
                .arg(api_key_parameter()),
        )
        .subcommand(
            Command::new(COMMAND_LIST)
                .about("List transfers")
                .visible_alias("ls")
                .args(output_parameters())
                .arg(client_id_parameter())
                .arg(api_key_parameter()),
        )
}
