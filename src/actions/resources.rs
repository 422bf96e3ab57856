//! Beneficiary and transfer actions.
//!
//! Create and update run the request pipeline; `--dry-run` stops after
//! gathering, `--validate` stops after the schema check, and only a plain
//! invocation writes to the API.

use clap::ArgMatches;
use tracing::{debug, trace};

use crate::{
    actions::{
        utils::{
            api_client, get_field_entries, get_flag_values, get_format_parameter_value,
            print_formatted,
        },
        CliActionError,
    },
    commands::params::{PARAMETER_DRY_RUN, PARAMETER_ID, PARAMETER_VALIDATE},
    configuration::Configuration,
    field_registry::FlagRegistry,
    format::{OutputFormat, OutputFormatOptions},
    payments_api::{PaymentsApi, ResourceKind},
    request_builder::{submit_request, validate_request, Operation, RequestBuilder},
};

fn registry_for(kind: ResourceKind) -> FlagRegistry {
    match kind {
        ResourceKind::Beneficiary => FlagRegistry::beneficiary(),
        ResourceKind::Transfer => FlagRegistry::transfer(),
    }
}

fn get_id(sub_matches: &ArgMatches) -> Result<String, CliActionError> {
    sub_matches
        .get_one::<String>(PARAMETER_ID)
        .cloned()
        .ok_or_else(|| CliActionError::MissingRequiredArgument(PARAMETER_ID.to_string()))
}

pub async fn create_resource(
    configuration: &Configuration,
    sub_matches: &ArgMatches,
    kind: ResourceKind,
) -> Result<(), CliActionError> {
    trace!("Executing '{} create'", kind);
    submit_from_matches(configuration, sub_matches, kind, Operation::Create).await
}

pub async fn update_resource(
    configuration: &Configuration,
    sub_matches: &ArgMatches,
    kind: ResourceKind,
) -> Result<(), CliActionError> {
    trace!("Executing '{} update'", kind);
    let id = get_id(sub_matches)?;
    submit_from_matches(configuration, sub_matches, kind, Operation::Update { id }).await
}

async fn submit_from_matches(
    configuration: &Configuration,
    sub_matches: &ArgMatches,
    kind: ResourceKind,
    operation: Operation,
) -> Result<(), CliActionError> {
    let registry = registry_for(kind);
    let values = get_flag_values(sub_matches, &registry);
    let fields = get_field_entries(sub_matches);
    let format = get_format_parameter_value(sub_matches)?;

    let builder = RequestBuilder::new(&registry, kind, operation);
    let request = builder.build(&values, &fields)?;

    // would-be requests always print as JSON
    let request_format = OutputFormat::Json(OutputFormatOptions {
        with_headers: false,
        pretty: matches!(&format, OutputFormat::Json(options) if options.pretty),
    });

    if sub_matches.get_flag(PARAMETER_DRY_RUN) {
        debug!("Dry run, not contacting the API");
        return print_formatted(&request.body(), &request_format);
    }

    let api = api_client(configuration, sub_matches).await?;

    if sub_matches.get_flag(PARAMETER_VALIDATE) {
        validate_request(&api, &builder, &request).await?;
        debug!("Request passed schema validation");
        return print_formatted(&request.body(), &request_format);
    }

    let resource = submit_request(&api, &request).await?;
    print_formatted(&resource, &format)
}

pub async fn get_resource(
    configuration: &Configuration,
    sub_matches: &ArgMatches,
    kind: ResourceKind,
) -> Result<(), CliActionError> {
    let id = get_id(sub_matches)?;
    let format = get_format_parameter_value(sub_matches)?;
    let api = api_client(configuration, sub_matches).await?;

    let resource = api.get_resource(kind, &id).await?;
    print_formatted(&resource, &format)
}

pub async fn list_resources(
    configuration: &Configuration,
    sub_matches: &ArgMatches,
    kind: ResourceKind,
) -> Result<(), CliActionError> {
    let format = get_format_parameter_value(sub_matches)?;
    let api = api_client(configuration, sub_matches).await?;

    let resources = api.list_resources(kind).await?;
    print_formatted(&resources, &format)
}

pub async fn delete_resource(
    configuration: &Configuration,
    sub_matches: &ArgMatches,
    kind: ResourceKind,
) -> Result<(), CliActionError> {
    let id = get_id(sub_matches)?;
    let api = api_client(configuration, sub_matches).await?;

    api.delete_resource(kind, &id).await?;
    debug!("Deleted {} {}", kind, id);
    Ok(())
}
