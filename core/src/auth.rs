//! Per-request header construction.
//!
//! The access token is checked here rather than when the client is built, so
//! a client can be constructed first and given credentials later through a
//! fresh configuration.

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

pub const AUTHORIZATION: &str = "Authorization";
pub const ACCEPT_LANGUAGE: &str = "Accept-Language";
pub const APP_TOKEN: &str = "X-APP-TOKEN";
pub const CONTENT_TYPE: &str = "Content-Type";
pub const APPLICATION_JSON: &str = "application/json";

/// Build the four headers attached to every request.
///
/// An absent app token is emitted as an empty value.
pub fn headers(config: &ClientConfig) -> Result<Vec<(String, String)>> {
    Ok(vec![
        (AUTHORIZATION.to_string(), authorization(config)?),
        (ACCEPT_LANGUAGE.to_string(), config.locale.trim().to_string()),
        (
            APP_TOKEN.to_string(),
            config.app_token.clone().unwrap_or_default(),
        ),
        (CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string()),
    ])
}

fn authorization(config: &ClientConfig) -> Result<String> {
    match config.access_token.as_deref() {
        Some(token) if !token.is_empty() => Ok(format!("Bearer {token}").trim().to_string()),
        _ => Err(ClientError::MissingCredential),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(token: Option<&str>) -> ClientConfig {
        ClientConfig {
            access_token: token.map(str::to_string),
            ..ClientConfig::default()
        }
    }

    #[test]
    fn produces_exactly_four_headers() {
        let headers = headers(&config(Some("abc"))).unwrap();
        let names: Vec<&str> = headers.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(names, vec![AUTHORIZATION, ACCEPT_LANGUAGE, APP_TOKEN, CONTENT_TYPE]);
    }

    #[test]
    fn bearer_token_and_trimmed_locale() {
        let config = ClientConfig {
            access_token: Some("abc".to_string()),
            locale: " en_US ".to_string(),
            ..ClientConfig::default()
        };
        let headers = headers(&config).unwrap();
        assert_eq!(headers[0].1, "Bearer abc");
        assert_eq!(headers[1].1, "en_US");
        assert_eq!(headers[3].1, "application/json");
    }

    #[test]
    fn authorization_is_trimmed() {
        let headers = headers(&config(Some("abc \n"))).unwrap();
        assert_eq!(headers[0].1, "Bearer abc");
    }

    #[test]
    fn missing_token_fails() {
        assert!(matches!(headers(&config(None)), Err(ClientError::MissingCredential)));
    }

    #[test]
    fn empty_token_fails() {
        assert!(matches!(headers(&config(Some(""))), Err(ClientError::MissingCredential)));
    }

    #[test]
    fn app_token_passes_through() {
        let with = ClientConfig {
            app_token: Some(" app-123 ".to_string()),
            ..config(Some("abc"))
        };
        assert_eq!(headers(&with).unwrap()[2].1, " app-123 ");
        assert_eq!(headers(&config(Some("abc"))).unwrap()[2].1, "");
    }
}
