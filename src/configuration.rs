use crate::format::{Formattable, FormattingError, OutputFormat};
use dirs::config_dir;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};
use strum::{Display, EnumString, VariantNames};
use tracing::debug;
use url::Url;

pub const DEFAULT_APPLICATION_ID: &str = "paycli";
pub const DEFAULT_CONFIGURATION_FILE_NAME: &str = "config.yml";
pub const CONFIG_DIR_ENV: &str = "PAYCLI_CONFIG_DIR";

static DEMO_API_URL: Lazy<Url> =
    Lazy::new(|| Url::parse("https://api-demo.airwallex.com").unwrap());
static PRODUCTION_API_URL: Lazy<Url> =
    Lazy::new(|| Url::parse("https://api.airwallex.com").unwrap());

#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("failed to resolve the configuration directory")]
    FailedToFindConfigurationDirectory,
    #[error("failed to load configuration data, because of: {cause}")]
    FailedToLoadData { cause: Box<dyn std::error::Error> },
    #[error("failed to write configuration data to file, because of: {cause}")]
    FailedToWriteData { cause: Box<dyn std::error::Error> },
    #[error("invalid value {value:?} for property {name:?}")]
    InvalidPropertyValue { name: String, value: String },
    #[error("{cause}")]
    FormattingError {
        #[from]
        cause: FormattingError,
    },
}

/// Target API environment.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, VariantNames,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Environment {
    #[default]
    Demo,
    Production,
}

impl Environment {
    pub fn names() -> Vec<&'static str> {
        Environment::VARIANTS.to_vec()
    }

    pub fn default_api_url(&self) -> Url {
        match self {
            Environment::Demo => DEMO_API_URL.clone(),
            Environment::Production => PRODUCTION_API_URL.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(default)]
    environment: Environment,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    api_base_url: Option<Url>,
}

impl Configuration {
    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn set_environment(&mut self, environment: Environment) {
        self.environment = environment;
    }

    pub fn set_api_base_url(&mut self, url: Option<Url>) {
        self.api_base_url = url;
    }

    /// The configured base URL, or the environment's default.
    pub fn get_api_base_url(&self) -> Url {
        self.api_base_url
            .clone()
            .unwrap_or_else(|| self.environment.default_api_url())
    }

    pub fn get_default_configuration_file_path() -> Result<PathBuf, ConfigurationError> {
        if let Ok(config_dir_str) = std::env::var(CONFIG_DIR_ENV) {
            let mut config_path = PathBuf::from(config_dir_str);
            config_path.push(DEFAULT_CONFIGURATION_FILE_NAME);
            return Ok(config_path);
        }

        match config_dir() {
            Some(mut path) => {
                path.push(DEFAULT_APPLICATION_ID);
                path.push(DEFAULT_CONFIGURATION_FILE_NAME);
                Ok(path)
            }
            None => Err(ConfigurationError::FailedToFindConfigurationDirectory),
        }
    }

    /// Load the default configuration, creating it on first use.
    pub fn load_or_create_default() -> Result<Configuration, ConfigurationError> {
        let default_file_path = Configuration::get_default_configuration_file_path()?;
        debug!(
            "Loading or creating configuration from {}...",
            default_file_path.display()
        );

        if !default_file_path.exists() {
            debug!("Configuration file not found, creating default configuration");
            let configuration = Configuration::default();
            configuration.save(&default_file_path)?;
            return Ok(configuration);
        }

        Configuration::load_from_file(&default_file_path)
    }

    pub fn load_from_file(path: &Path) -> Result<Configuration, ConfigurationError> {
        let contents = fs::read_to_string(path)
            .map_err(|cause| ConfigurationError::FailedToLoadData { cause: Box::new(cause) })?;
        serde_yaml::from_str(&contents)
            .map_err(|cause| ConfigurationError::FailedToLoadData { cause: Box::new(cause) })
    }

    pub fn write(&self, writer: Box<dyn Write>) -> Result<(), ConfigurationError> {
        serde_yaml::to_writer(writer, self)
            .map_err(|e| ConfigurationError::FailedToWriteData { cause: Box::new(e) })
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigurationError> {
        match path.parent() {
            Some(directory) => fs::create_dir_all(directory)
                .map_err(|_| ConfigurationError::FailedToFindConfigurationDirectory)?,
            None => return Err(ConfigurationError::FailedToFindConfigurationDirectory),
        }

        let file = File::create(path)
            .map_err(|e| ConfigurationError::FailedToWriteData { cause: Box::new(e) })?;
        self.write(Box::new(file))
    }

    pub fn save_to_default(&self) -> Result<(), ConfigurationError> {
        self.save(&Self::get_default_configuration_file_path()?)
    }
}

impl Formattable for Configuration {
    fn format(&self, f: &OutputFormat) -> Result<String, FormattingError> {
        match f {
            OutputFormat::Json(options) => {
                if options.pretty {
                    Ok(serde_json::to_string_pretty(self)?)
                } else {
                    Ok(serde_json::to_string(self)?)
                }
            }
            OutputFormat::Csv(options) => {
                let mut wtr = csv::Writer::from_writer(vec![]);
                if options.with_headers {
                    wtr.write_record(["ENVIRONMENT", "API_BASE_URL"])?;
                }
                wtr.write_record([
                    self.environment.to_string(),
                    self.get_api_base_url().to_string(),
                ])?;
                Ok(String::from_utf8(wtr.into_inner()?)?)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_url_follows_environment() {
        let mut configuration = Configuration::default();
        assert_eq!(configuration.get_api_base_url().as_str(), "https://api-demo.airwallex.com/");

        configuration.set_environment(Environment::Production);
        assert_eq!(configuration.get_api_base_url().as_str(), "https://api.airwallex.com/");

        configuration.set_api_base_url(Some(Url::parse("http://localhost:8080").unwrap()));
        assert_eq!(configuration.get_api_base_url().as_str(), "http://localhost:8080/");
    }

    #[test]
    fn test_save_and_load() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("nested").join(DEFAULT_CONFIGURATION_FILE_NAME);

        let mut configuration = Configuration::default();
        configuration.set_environment(Environment::Production);
        configuration.save(&path).unwrap();

        let loaded = Configuration::load_from_file(&path).unwrap();
        assert_eq!(loaded, configuration);
    }

    #[test]
    fn test_environment_parsing() {
        assert_eq!("production".parse::<Environment>().unwrap(), Environment::Production);
        assert!("staging".parse::<Environment>().is_err());
        assert_eq!(Environment::names(), vec!["demo", "production"]);
    }
}
