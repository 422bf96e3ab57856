use clap::ArgMatches;
use tracing::{debug, trace};

use crate::{
    actions::CliActionError,
    auth::{AuthClient, Credentials},
    commands::params::{PARAMETER_API_KEY, PARAMETER_CLIENT_ID},
    configuration::Configuration,
    http_utils::{HttpClient, HttpRequestConfig},
};

/// Verify the credentials against the API, then store them.
pub async fn login(
    configuration: &Configuration,
    sub_matches: &ArgMatches,
) -> Result<(), CliActionError> {
    trace!("Executing 'auth login'");

    let client_id = sub_matches
        .get_one::<String>(PARAMETER_CLIENT_ID)
        .ok_or_else(|| CliActionError::MissingRequiredArgument(PARAMETER_CLIENT_ID.to_string()))?;
    let api_key = sub_matches
        .get_one::<String>(PARAMETER_API_KEY)
        .ok_or_else(|| CliActionError::MissingRequiredArgument(PARAMETER_API_KEY.to_string()))?;
    let credentials = Credentials::new(client_id.as_str(), api_key.as_str());

    let http = HttpClient::new(HttpRequestConfig::from_configuration(configuration))?;
    let token = AuthClient::new(http).login(&credentials).await?;
    debug!("Credentials accepted, token expires at {:?}", token.expires_at);

    credentials.store(configuration.environment())?;
    println!("Logged in to the {} environment", configuration.environment());
    Ok(())
}

pub async fn logout(configuration: &Configuration) -> Result<(), CliActionError> {
    trace!("Executing 'auth logout'");
    Credentials::forget(configuration.environment())?;
    Ok(())
}
