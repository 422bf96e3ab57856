//! Command dispatch.

use clap::ArgMatches;
use tracing::trace;

use crate::{
    actions::{auth, config, resources},
    commands::params::{
        COMMAND_AUTH, COMMAND_BENEFICIARY, COMMAND_CONFIG, COMMAND_CREATE, COMMAND_DELETE,
        COMMAND_GET, COMMAND_LIST, COMMAND_LOGIN, COMMAND_LOGOUT, COMMAND_PATH, COMMAND_SET,
        COMMAND_TRANSFER, COMMAND_UPDATE,
    },
    configuration::Configuration,
    error::CliError,
    payments_api::ResourceKind,
};

fn extract_subcommand_name(sub_matches: &ArgMatches) -> String {
    let message = match sub_matches.subcommand() {
        Some(m) => m.0,
        None => "unknown",
    };

    message.to_string()
}

pub async fn execute_command(
    configuration: &mut Configuration,
    matches: &ArgMatches,
) -> Result<(), CliError> {
    match matches.subcommand() {
        Some((COMMAND_BENEFICIARY, sub_matches)) => {
            let kind = ResourceKind::Beneficiary;
            match sub_matches.subcommand() {
                Some((COMMAND_CREATE, sub_matches)) => {
                    resources::create_resource(configuration, sub_matches, kind).await?
                }
                Some((COMMAND_UPDATE, sub_matches)) => {
                    resources::update_resource(configuration, sub_matches, kind).await?
                }
                Some((COMMAND_GET, sub_matches)) => {
                    resources::get_resource(configuration, sub_matches, kind).await?
                }
                Some((COMMAND_LIST, sub_matches)) => {
                    resources::list_resources(configuration, sub_matches, kind).await?
                }
                Some((COMMAND_DELETE, sub_matches)) => {
                    resources::delete_resource(configuration, sub_matches, kind).await?
                }
                _ => {
                    return Err(CliError::UnsupportedSubcommand(extract_subcommand_name(
                        sub_matches,
                    )))
                }
            }
        }
        Some((COMMAND_TRANSFER, sub_matches)) => {
            let kind = ResourceKind::Transfer;
            match sub_matches.subcommand() {
                Some((COMMAND_CREATE, sub_matches)) => {
                    resources::create_resource(configuration, sub_matches, kind).await?
                }
                Some((COMMAND_GET, sub_matches)) => {
                    resources::get_resource(configuration, sub_matches, kind).await?
                }
                Some((COMMAND_LIST, sub_matches)) => {
                    resources::list_resources(configuration, sub_matches, kind).await?
                }
                _ => {
                    return Err(CliError::UnsupportedSubcommand(extract_subcommand_name(
                        sub_matches,
                    )))
                }
            }
        }
        Some((COMMAND_AUTH, sub_matches)) => match sub_matches.subcommand() {
            Some((COMMAND_LOGIN, sub_matches)) => auth::login(configuration, sub_matches).await?,
            Some((COMMAND_LOGOUT, _)) => auth::logout(configuration).await?,
            _ => {
                return Err(CliError::UnsupportedSubcommand(extract_subcommand_name(
                    sub_matches,
                )))
            }
        },
        Some((COMMAND_CONFIG, sub_matches)) => match sub_matches.subcommand() {
            Some((COMMAND_GET, sub_matches)) => {
                config::print_configuration(configuration, sub_matches)?
            }
            Some((COMMAND_PATH, _)) => config::print_configuration_path()?,
            Some((COMMAND_SET, sub_matches)) => {
                config::set_configuration(configuration, sub_matches)?
            }
            _ => {
                return Err(CliError::UnsupportedSubcommand(extract_subcommand_name(
                    sub_matches,
                )))
            }
        },
        _ => return Err(CliError::UnsupportedSubcommand(extract_subcommand_name(matches))),
    }

    trace!("Command completed");
    Ok(())
}
