//! Shared command parameters for all CLI commands.
//!
//! This module defines common parameters that are used across multiple command modules.
//! It provides a centralized place to define parameter names and common argument configurations.

use crate::auth::{API_KEY_ENV, CLIENT_ID_ENV};
use crate::configuration::Environment;
use crate::field_registry::FlagRegistry;
use crate::format::OutputFormat;
use clap::{Arg, ArgAction};
use url::Url;

// CRUD operations
pub const COMMAND_CREATE: &str = "create";
pub const COMMAND_GET: &str = "get";
pub const COMMAND_LIST: &str = "list";
pub const COMMAND_UPDATE: &str = "update";
pub const COMMAND_DELETE: &str = "delete";

// Resource commands
pub const COMMAND_BENEFICIARY: &str = "beneficiary";
pub const COMMAND_TRANSFER: &str = "transfer";

// Auth commands
pub const COMMAND_AUTH: &str = "auth";
pub const COMMAND_LOGIN: &str = "login";
pub const COMMAND_LOGOUT: &str = "logout";

// Config commands
pub const COMMAND_CONFIG: &str = "config";
pub const COMMAND_PATH: &str = "path";
pub const COMMAND_SET: &str = "set";

// Parameter names
pub const PARAMETER_VERBOSE: &str = "verbose";
pub const PARAMETER_FORMAT: &str = "format";
pub const PARAMETER_PRETTY: &str = "pretty";
pub const PARAMETER_HEADERS: &str = "headers";
pub const PARAMETER_ID: &str = "id";
pub const PARAMETER_FIELD: &str = "field";
pub const PARAMETER_VALIDATE: &str = "validate";
pub const PARAMETER_DRY_RUN: &str = "dry-run";
pub const PARAMETER_CLIENT_ID: &str = "client-id";
pub const PARAMETER_API_KEY: &str = "api-key";
pub const PARAMETER_ENVIRONMENT: &str = "environment";
pub const PARAMETER_API_URL: &str = "api-url";

/// Create the output format parameter.
pub fn format_parameter() -> Arg {
    Arg::new(PARAMETER_FORMAT)
        .short('f')
        .long(PARAMETER_FORMAT)
        .num_args(1)
        .required(false)
        .env("PAYCLI_FORMAT")
        .default_value("json")
        .help("Output data format")
        .value_parser(OutputFormat::names())
}

pub fn format_pretty_parameter() -> Arg {
    Arg::new(PARAMETER_PRETTY)
        .long(PARAMETER_PRETTY)
        .action(ArgAction::SetTrue)
        .required(false)
        .help("Format the output pretty")
}

pub fn format_with_headers_parameter() -> Arg {
    Arg::new(PARAMETER_HEADERS)
        .long(PARAMETER_HEADERS)
        .action(ArgAction::SetTrue)
        .required(false)
        .help("Format the output with headers")
}

/// The three output parameters every command that prints a resource takes.
pub fn output_parameters() -> [Arg; 3] {
    [
        format_parameter(),
        format_pretty_parameter(),
        format_with_headers_parameter(),
    ]
}

/// Create the resource ID parameter.
pub fn id_parameter() -> Arg {
    Arg::new(PARAMETER_ID)
        .long(PARAMETER_ID)
        .num_args(1)
        .required(true)
        .help("Resource ID")
}

/// Repeatable raw `path=value` override.
pub fn field_parameter() -> Arg {
    Arg::new(PARAMETER_FIELD)
        .long(PARAMETER_FIELD)
        .num_args(1)
        .action(ArgAction::Append)
        .value_name("PATH=VALUE")
        .help("Set a request field by its dot path, overriding every other flag (repeatable)")
}

pub fn validate_parameter() -> Arg {
    Arg::new(PARAMETER_VALIDATE)
        .long(PARAMETER_VALIDATE)
        .action(ArgAction::SetTrue)
        .help("Check the request against the server schema and print it instead of submitting")
}

pub fn dry_run_parameter() -> Arg {
    Arg::new(PARAMETER_DRY_RUN)
        .long(PARAMETER_DRY_RUN)
        .action(ArgAction::SetTrue)
        .conflicts_with(PARAMETER_VALIDATE)
        .help("Print the request without contacting the API")
}

/// Create the client ID parameter.
pub fn client_id_parameter() -> Arg {
    Arg::new(PARAMETER_CLIENT_ID)
        .long(PARAMETER_CLIENT_ID)
        .num_args(1)
        .required(false)
        .env(CLIENT_ID_ENV)
        .help("API client ID")
}

/// Create the API key parameter.
pub fn api_key_parameter() -> Arg {
    Arg::new(PARAMETER_API_KEY)
        .long(PARAMETER_API_KEY)
        .num_args(1)
        .required(false)
        .env(API_KEY_ENV)
        .hide_env_values(true)
        .help("API key")
}

pub fn environment_parameter() -> Arg {
    Arg::new(PARAMETER_ENVIRONMENT)
        .long(PARAMETER_ENVIRONMENT)
        .num_args(1)
        .required(false)
        .help("Target API environment")
        .value_parser(Environment::names())
}

pub fn api_url_parameter() -> Arg {
    Arg::new(PARAMETER_API_URL)
        .long(PARAMETER_API_URL)
        .num_args(1)
        .required(false)
        .help("Override the API base URL")
        .value_parser(clap::value_parser!(Url))
}

/// One plain string argument per registry flag.
pub fn request_flag_parameters(registry: &FlagRegistry) -> Vec<Arg> {
    registry
        .iter()
        .map(|mapping| {
            Arg::new(mapping.flag_name)
                .long(mapping.flag_name)
                .num_args(1)
                .required(false)
                .help(mapping.description)
        })
        .collect()
}
