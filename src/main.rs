use paycli::{
    cli::execute_command,
    commands::{create_cli_commands, params::PARAMETER_VERBOSE},
    configuration::Configuration,
    error::CliError,
};
use tracing_subscriber::EnvFilter;

/// Main entry point for the program
#[tokio::main]
async fn main() {
    let matches = create_cli_commands();

    // Intialize the logging subsystem
    let filter = if matches.get_flag(PARAMETER_VERBOSE) {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match Configuration::load_or_create_default() {
        Ok(mut configuration) => execute_command(&mut configuration, &matches).await,
        Err(e) => Err(CliError::from(e)),
    };

    if let Err(e) = result {
        eprintln!("ERROR: {}", e);
        ::std::process::exit(e.exit_code().code());
    }
}
