use clap::ArgMatches;
use tracing::{debug, trace};

use crate::{
    actions::CliActionError,
    auth::{AuthClient, Credentials},
    commands::params::{
        PARAMETER_API_KEY, PARAMETER_CLIENT_ID, PARAMETER_FIELD, PARAMETER_FORMAT,
        PARAMETER_HEADERS, PARAMETER_PRETTY,
    },
    configuration::Configuration,
    field_registry::{FlagRegistry, FlagValues},
    format::{Formattable, OutputFormat, OutputFormatOptions},
    http_utils::{HttpClient, HttpRequestConfig},
    payments_api::PaymentsApiClient,
};

/// Resolve the output format from `--format`, `--pretty` and `--headers`.
pub fn get_format_parameter_value(sub_matches: &ArgMatches) -> Result<OutputFormat, CliActionError> {
    trace!("Resolving output format options...");

    let format = sub_matches
        .get_one::<String>(PARAMETER_FORMAT)
        .map(String::as_str)
        .unwrap_or(crate::format::JSON);
    let options = OutputFormatOptions {
        with_headers: sub_matches.get_flag(PARAMETER_HEADERS),
        pretty: sub_matches.get_flag(PARAMETER_PRETTY),
    };
    trace!("Format: {} {:?}", format, options);

    Ok(OutputFormat::from_string_with_options(format, options)?)
}

/// Collect the supplied request flags, keyed by flag name.
pub fn get_flag_values(sub_matches: &ArgMatches, registry: &FlagRegistry) -> FlagValues {
    registry
        .iter()
        .filter_map(|mapping| {
            sub_matches
                .get_one::<String>(mapping.flag_name)
                .map(|value| (mapping.flag_name, value.as_str()))
        })
        .collect()
}

/// The repeatable `--field` entries, in command-line order.
pub fn get_field_entries(sub_matches: &ArgMatches) -> Vec<String> {
    sub_matches
        .get_many::<String>(PARAMETER_FIELD)
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

pub fn print_formatted<T: Formattable + ?Sized>(
    value: &T,
    format: &OutputFormat,
) -> Result<(), CliActionError> {
    println!("{}", value.format(format)?);
    Ok(())
}

/// Authenticate and build an API client for the configured environment.
pub async fn api_client(
    configuration: &Configuration,
    sub_matches: &ArgMatches,
) -> Result<PaymentsApiClient, CliActionError> {
    let credentials = Credentials::resolve(
        configuration.environment(),
        sub_matches.get_one::<String>(PARAMETER_CLIENT_ID).cloned(),
        sub_matches.get_one::<String>(PARAMETER_API_KEY).cloned(),
    )?;

    let http = HttpClient::new(HttpRequestConfig::from_configuration(configuration))?;
    debug!("Using API at {}", http.config().base_url);
    let token = AuthClient::new(http.clone())
        .get_access_token(&credentials)
        .await?;

    Ok(PaymentsApiClient::new(http, token))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cli_command;
    use crate::field_registry::{FLAG_BSB, FLAG_SWIFT_CODE};

    fn create_matches(args: &[&str]) -> ArgMatches {
        let mut argv = vec!["paycli", "beneficiary", "create"];
        argv.extend_from_slice(args);
        let matches = cli_command().try_get_matches_from(argv).unwrap();
        let (_, beneficiary) = matches.subcommand().unwrap();
        beneficiary.subcommand().unwrap().1.clone()
    }

    #[test]
    fn test_flag_values_only_include_supplied_flags() {
        let matches = create_matches(&["--bsb", "123456", "--swift-code", "X"]);
        let values = get_flag_values(&matches, &FlagRegistry::beneficiary());
        assert_eq!(values.get(FLAG_BSB), Some("123456"));
        assert_eq!(values.get(FLAG_SWIFT_CODE), Some("X"));
        assert_eq!(values.iter().count(), 2);
    }

    #[test]
    fn test_field_entries_keep_order() {
        let matches = create_matches(&["--field", "a=1", "--field", "a=2"]);
        assert_eq!(get_field_entries(&matches), vec!["a=1", "a=2"]);
        assert!(get_field_entries(&create_matches(&[])).is_empty());
    }

    #[test]
    fn test_format_parameter() {
        let matches = create_matches(&["--format", "csv", "--headers"]);
        let format = get_format_parameter_value(&matches).unwrap();
        assert_eq!(
            format,
            OutputFormat::Csv(OutputFormatOptions {
                with_headers: true,
                pretty: false
            })
        );
    }
}
