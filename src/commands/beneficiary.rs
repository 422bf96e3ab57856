//! Beneficiary command definitions.
//!
//! The request flags are generated from the beneficiary flag registry, so a
//! new routing identifier only needs a registry row.

use crate::commands::params::{
    api_key_parameter, client_id_parameter, dry_run_parameter, field_parameter, id_parameter,
    output_parameters, request_flag_parameters, validate_parameter, COMMAND_BENEFICIARY,
    COMMAND_CREATE, COMMAND_DELETE, COMMAND_GET, COMMAND_LIST, COMMAND_UPDATE,
};
use crate::field_registry::FlagRegistry;
use clap::Command;

/// Create the beneficiary command with all its subcommands.
pub fn beneficiary_command() -> Command {
    let registry = FlagRegistry::beneficiary();

    Command::new(COMMAND_BENEFICIARY)
        .about("Manage payout beneficiaries")
        .subcommand_required(true)
        .subcommand(
            Command::new(COMMAND_CREATE)
                .about("Create a beneficiary")
                .args(request_flag_parameters(&registry))
                .arg(field_parameter())
                .arg(validate_parameter())
                .arg(dry_run_parameter())
                .args(output_parameters())
                .arg(client_id_parameter())
                .arg(api_key_parameter()),
        )
        .subcommand(
            Command::new(COMMAND_UPDATE)
                .about("Update an existing beneficiary")
                .arg(id_parameter())
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
                .about("Get a beneficiary by ID")
                .arg(id_parameter())
                .args(output_parameters())
                .arg(client_id_parameter())
                .arg(api_key_parameter()),
        )
        .subcommand(
            Command::new(COMMAND_LIST)
                .about("List beneficiaries")
                .visible_alias("ls")
                .args(output_parameters())
                .arg(client_id_parameter())
                .arg(api_key_parameter()),
        )
        .subcommand(
            Command::new(COMMAND_DELETE)
                .about("Delete a beneficiary")
                .arg(id_parameter())
                .arg(client_id_parameter())
                .arg(api_key_parameter()),
        )
}
