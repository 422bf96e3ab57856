use clap::ArgMatches;
use tracing::trace;
use url::Url;

use crate::{
    actions::{
        utils::{get_format_parameter_value, print_formatted},
        CliActionError,
    },
    commands::params::{PARAMETER_API_URL, PARAMETER_ENVIRONMENT},
    configuration::{Configuration, ConfigurationError, Environment},
};

pub fn print_configuration(
    configuration: &Configuration,
    sub_matches: &ArgMatches,
) -> Result<(), CliActionError> {
    trace!("Executing 'config get'");
    let format = get_format_parameter_value(sub_matches)?;
    print_formatted(configuration, &format)
}

pub fn print_configuration_path() -> Result<(), CliActionError> {
    let path = Configuration::get_default_configuration_file_path()?;
    println!("{}", path.display());
    Ok(())
}

/// Apply `config set` and persist the result.
pub fn set_configuration(
    configuration: &mut Configuration,
    sub_matches: &ArgMatches,
) -> Result<(), CliActionError> {
    trace!("Executing 'config set'");

    if let Some(environment) = sub_matches.get_one::<String>(PARAMETER_ENVIRONMENT) {
        let environment: Environment =
            environment
                .parse()
                .map_err(|_| ConfigurationError::InvalidPropertyValue {
                    name: PARAMETER_ENVIRONMENT.to_string(),
                    value: environment.clone(),
                })?;
        configuration.set_environment(environment);
    }

    if let Some(url) = sub_matches.get_one::<Url>(PARAMETER_API_URL) {
        configuration.set_api_base_url(Some(url.clone()));
    }

    configuration.save_to_default()?;
    Ok(())
}
