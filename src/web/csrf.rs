use tower_sessions::Session;

use crate::error::PingAppError;

const CSRF_TOKEN_KEY: &str = "csrf_token";

/// 128 random bits, hex encoded.
pub(crate) fn random_token() -> String {
    format!("{:032x}", rand::random::<u128>())
}

pub(crate) async fn csrf_token(session: &Session) -> Result<String, PingAppError> {
    let existing = session.get::<String>(CSRF_TOKEN_KEY).await?;
    let token = existing.unwrap_or_else(random_token);
    session.insert(CSRF_TOKEN_KEY, token.clone()).await?;
    Ok(token)
}

pub(crate) async fn validate_csrf(session: &Session, token: &str) -> Result<(), PingAppError> {
    let stored = session.get::<String>(CSRF_TOKEN_KEY).await?;
    match stored {
        Some(expected) if expected == token => Ok(()),
        _ => Err(PingAppError::Unauthorized),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_hex_and_distinct() {
        let first = random_token();
        let second = random_token();
        assert_eq!(first.len(), 32);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(first, second);
    }
}
