use keyring::Entry;
use thiserror::Error;
use tracing::debug;

pub const KEYRING_SERVICE: &str = "paycli";

#[derive(Debug, Error)]
pub enum KeyringError {
    #[error("keyring error")]
    KeyringAccessError(#[from] KeyringErrorInternal),
}

impl From<keyring::Error> for KeyringError {
    fn from(error: keyring::Error) -> Self {
        KeyringError::KeyringAccessError(KeyringErrorInternal::CannotAccessKeyringEntity(error))
    }
}

#[derive(Debug, Error)]
pub enum KeyringErrorInternal {
    #[error("keyring error")]
    CannotAccessKeyringEntity(#[from] keyring::Error),
}

/// Credential store scoped by environment name, so demo and production
/// credentials live side by side.
#[derive(Default)]
pub struct Keyring {}

impl Keyring {
    fn entry(environment: &str, key: &str) -> Result<Entry, KeyringError> {
        let key = entry_name(environment, key);
        Ok(Entry::new(KEYRING_SERVICE, key.as_str())?)
    }

    pub fn get(&self, environment: &str, key: &str) -> Result<Option<String>, KeyringError> {
        let entry = Self::entry(environment, key)?;
        match entry.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(KeyringError::from(e)),
        }
    }

    pub fn put(&self, environment: &str, key: &str, value: &str) -> Result<(), KeyringError> {
        debug!("Storing {} in keyring", entry_name(environment, key));
        let entry = Self::entry(environment, key)?;
        entry.set_password(value)?;
        Ok(())
    }

    /// Removing an entry that does not exist is not an error.
    pub fn delete(&self, environment: &str, key: &str) -> Result<(), KeyringError> {
        let entry = Self::entry(environment, key)?;
        match entry.delete_password() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(KeyringError::from(e)),
        }
    }
}

fn entry_name(environment: &str, key: &str) -> String {
    [environment, key].join(":")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_name_is_scoped_by_environment() {
        assert_eq!(entry_name("demo", "client-id"), "demo:client-id");
        assert_ne!(entry_name("demo", "api-key"), entry_name("production", "api-key"));
    }
}
