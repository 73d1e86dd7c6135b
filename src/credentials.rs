use keyring::Entry;
use std::{io, io::Write};
use thiserror::Error;
use tracing::{debug, info};

/// The keyring service all of our entries live under.
const KEYRING_SERVICE: &str = "oomnitzactl";

/// Possible errors while locating an API key.
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("unable to access the system keyring: {0}")]
    Keyring(#[from] keyring::Error),
    #[error("unable to read the API key from the terminal: {0}")]
    Prompt(#[from] io::Error),
    #[error("no API key was entered")]
    EmptyKey,
}

/// Each organization gets its own keyring entry.
fn keyring_entry(organization: &str) -> Result<Entry, CredentialError> {
    Ok(Entry::new(
        KEYRING_SERVICE,
        &format!("API Key ({organization})"),
    )?)
}

/// Determines the API key to use for the given organization.
///
/// An explicitly provided key (via flag or environment) always wins,
/// unless it is empty, in which case it is treated as absent.
/// Otherwise, we look within the user's keyring, and if nothing is there,
/// we ask the user for their key and store it for next time.
pub fn resolve_api_key(
    organization: &str,
    explicit: Option<String>,
) -> Result<String, CredentialError> {
    if let Some(api_key) = non_empty(explicit) {
        debug!("using explicitly provided API key");
        return Ok(api_key);
    }

    let entry = keyring_entry(organization)?;
    let api_key = stored_or_prompt(&entry, || interactive_prompt(organization))?;
    debug!(organization, "resolved API key");
    Ok(api_key)
}

fn non_empty(api_key: Option<String>) -> Option<String> {
    api_key.filter(|api_key| !api_key.is_empty())
}

/// Reads the key stored within `entry`, falling back to `prompt` only if
/// nothing has been stored. Whatever `prompt` returns is stored.
fn stored_or_prompt(
    entry: &Entry,
    prompt: impl FnOnce() -> Result<String, CredentialError>,
) -> Result<String, CredentialError> {
    match entry.get_password() {
        Ok(api_key) => return Ok(api_key),
        Err(keyring::Error::NoEntry) => {}
        Err(err) => return Err(err.into()),
    }

    // Nothing stored yet.
    let api_key = prompt()?;
    entry.set_password(&api_key)?;
    info!("stored API key within keyring");
    Ok(api_key)
}

/// Removes a stored API key. It's fine if one was never stored.
pub fn forget_api_key(organization: &str) -> Result<(), CredentialError> {
    remove_entry(&keyring_entry(organization)?)
}

fn remove_entry(entry: &Entry) -> Result<(), CredentialError> {
    match entry.delete_password() {
        Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
        Err(err) => Err(err.into()),
    }
}

/// Quick and dirty function to read the API key from the user.
fn interactive_prompt(organization: &str) -> Result<String, CredentialError> {
    let mut response = String::new();
    eprint!("Please enter the API key for {organization}.oomnitza.com: ");
    io::stderr().flush()?;
    io::stdin().read_line(&mut response)?;

    api_key_from_response(&response)
}

/// Removes the trailing newline left over from reading a line.
/// An empty answer is rejected.
fn api_key_from_response(response: &str) -> Result<String, CredentialError> {
    let api_key = response.trim_end_matches(['\n', '\r']);
    if api_key.is_empty() {
        return Err(CredentialError::EmptyKey);
    }
    Ok(api_key.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyring::mock::MockCredential;

    fn mock_entry() -> Entry {
        keyring::set_default_credential_builder(keyring::mock::default_credential_builder());
        keyring_entry("acme").unwrap()
    }

    fn fail_on_prompt() -> Result<String, CredentialError> {
        panic!("should not have prompted");
    }

    #[test]
    fn explicit_key_skips_keyring() {
        let api_key = resolve_api_key("acme", Some("key123".to_string())).unwrap();
        assert_eq!(api_key, "key123");
    }

    #[test]
    fn empty_explicit_key_is_treated_as_absent() {
        assert_eq!(non_empty(Some(String::new())), None);
        assert_eq!(non_empty(None), None);
        assert_eq!(
            non_empty(Some("key123".to_string())),
            Some("key123".to_string())
        );
    }

    #[test]
    fn stored_key_is_used_before_prompting() {
        let entry = mock_entry();
        entry.set_password("stored-key").unwrap();

        let api_key = stored_or_prompt(&entry, fail_on_prompt).unwrap();
        assert_eq!(api_key, "stored-key");
    }

    #[test]
    fn prompted_key_is_stored() {
        let entry = mock_entry();

        let api_key = stored_or_prompt(&entry, || Ok("entered-key".to_string())).unwrap();
        assert_eq!(api_key, "entered-key");
        assert_eq!(entry.get_password().unwrap(), "entered-key");
    }

    #[test]
    fn keyring_failure_is_not_treated_as_missing() {
        let entry = mock_entry();
        let mock: &MockCredential = entry.get_credential().downcast_ref().unwrap();
        mock.set_error(keyring::Error::Invalid(
            "mock".to_string(),
            "locked".to_string(),
        ));

        let result = stored_or_prompt(&entry, fail_on_prompt);
        assert!(matches!(
            result,
            Err(CredentialError::Keyring(keyring::Error::Invalid(..)))
        ));
    }

    #[test]
    fn forgetting_missing_key_succeeds() {
        keyring::set_default_credential_builder(keyring::mock::default_credential_builder());
        assert!(forget_api_key("acme").is_ok());
    }

    #[test]
    fn forgetting_stored_key_removes_it() {
        let entry = mock_entry();
        entry.set_password("stored-key").unwrap();

        remove_entry(&entry).unwrap();
        assert!(matches!(entry.get_password(), Err(keyring::Error::NoEntry)));
    }

    #[test]
    fn response_newlines_are_trimmed() {
        assert_eq!(api_key_from_response("key123\n").unwrap(), "key123");
        assert_eq!(api_key_from_response("key123\r\n").unwrap(), "key123");
        assert_eq!(api_key_from_response(" key 123\n").unwrap(), " key 123");
    }

    #[test]
    fn empty_response_is_rejected() {
        assert!(matches!(
            api_key_from_response("\n"),
            Err(CredentialError::EmptyKey)
        ));
    }
}
