use anyhow::{Result, anyhow};
use keyring::{Entry, Error as KeyringError};

const SERVICE: &str = "inbox_digest";
const API_KEY_ENTRY: &str = "generative_api_key";

/// Environment fallback for the generative service key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Environment source for the TUI's opaque access credential.
pub const ACCESS_TOKEN_ENV: &str = "INBOX_DIGEST_ACCESS_TOKEN";

/// Save the generative API key into the OS keyring
pub fn save_api_key(api_key: &str) -> Result<()> {
    let entry = Entry::new(SERVICE, API_KEY_ENTRY);
    entry?
        .set_password(api_key)
        .map_err(|e| anyhow!(e.to_string()))?;
    Ok(())
}

/// Load the generative API key from the keyring, if one was saved
pub fn load_api_key() -> Result<Option<String>> {
    let entry = Entry::new(SERVICE, API_KEY_ENTRY);
    match entry?.get_password() {
        Ok(v) => Ok(Some(v)),
        Err(KeyringError::NoEntry) => Ok(None),
        Err(e) => Err(anyhow!(e.to_string())),
    }
}

/// Keyring first, then `GEMINI_API_KEY`.
pub fn resolve_api_key() -> Result<String> {
    let from_keyring = match load_api_key() {
        Ok(key) => key,
        Err(e) => {
            log::warn!("keyring unavailable ({e}); falling back to {API_KEY_ENV}");
            None
        }
    };
    from_keyring
        .or_else(|| std::env::var(API_KEY_ENV).ok())
        .filter(|k| !k.trim().is_empty())
        .ok_or_else(|| {
            anyhow!("no generative API key: run `inbox_digest set-api-key` or set {API_KEY_ENV}")
        })
}

/// `--token` flag first, then the environment.
pub fn resolve_access_token(flag: Option<String>) -> Option<String> {
    flag.or_else(|| std::env::var(ACCESS_TOKEN_ENV).ok())
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_token_wins_and_blank_is_none() {
        assert_eq!(
            resolve_access_token(Some(" ya29.tok ".into())),
            Some("ya29.tok".into())
        );
        assert_eq!(resolve_access_token(Some("   ".into())), None);
    }
}
