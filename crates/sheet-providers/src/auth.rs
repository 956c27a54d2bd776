use anyhow::Context;
use keyring::Entry;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use sheet_core::model::Credential;
use sheet_core::provider::AuthProvider;
use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::debug;

const SERVICE: &str = "sheet-reader";

const EXPIRY_LEEWAY_SECS: i64 = 60;

pub const GOOGLE_TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";

pub const SCOPES: &[&str] = &[
    "https://www.googleapis.com/auth/spreadsheets.readonly",
    "https://www.googleapis.com/auth/drive",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
struct StoredToken {
    kind: String,
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_at: Option<i64>,
    #[serde(default)]
    token_endpoint: Option<String>,
    #[serde(default)]
    client_id: Option<String>,
    #[serde(default)]
    client_secret: Option<String>,
    #[serde(default)]
    scope: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuthToken {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: Option<i64>,
    pub token_endpoint: String,
    pub client_id: String,
    pub client_secret: Option<String>,
    pub scope: Option<String>,
}

impl From<OAuthToken> for StoredToken {
    fn from(token: OAuthToken) -> Self {
        Self {
            kind: "oauth".to_string(),
            access_token: token.access_token,
            refresh_token: token.refresh_token,
            expires_at: token.expires_at,
            token_endpoint: Some(token.token_endpoint),
            client_id: non_empty(token.client_id),
            client_secret: token.client_secret,
            scope: token.scope,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RefreshTokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

/// Google's `authorized_user` token file, as written by its client libraries.
#[derive(Debug, Deserialize)]
struct AuthorizedUserFile {
    token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    token_uri: Option<String>,
    client_id: String,
    #[serde(default)]
    client_secret: Option<String>,
    #[serde(default)]
    scopes: Vec<String>,
    #[serde(default)]
    expiry: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenStatus {
    Missing,
    Raw,
    OAuth {
        expires_at: Option<i64>,
        refreshable: bool,
    },
}

/// Reads the bearer token for `account` from the OS keyring, refreshing OAuth tokens near expiry.
pub struct KeyringAuth {
    account: String,
}

impl KeyringAuth {
    pub fn new(account: impl Into<String>) -> Self {
        Self {
            account: account.into(),
        }
    }
}

impl AuthProvider for KeyringAuth {
    fn credential(&self) -> anyhow::Result<Credential> {
        let token = get_token(&self.account)?;
        Ok(Credential::bearer(token))
    }
}

pub fn get_token(account: &str) -> anyhow::Result<String> {
    let entry = Entry::new(SERVICE, account).context("open keyring entry")?;
    let value = entry.get_password().context("read token from keyring")?;
    if let Ok(stored) = serde_json::from_str::<StoredToken>(&value)
        && stored.kind == "oauth"
    {
        return ensure_oauth_token(account, &entry, stored);
    }
    Ok(value)
}

pub fn set_token(account: &str, token: &str) -> anyhow::Result<()> {
    let entry = Entry::new(SERVICE, account).context("open keyring entry")?;
    entry.set_password(token).context("write token to keyring")
}

pub fn set_oauth_token(account: &str, token: OAuthToken) -> anyhow::Result<()> {
    let entry = Entry::new(SERVICE, account).context("open keyring entry")?;
    let stored = StoredToken::from(token);
    let payload = serde_json::to_string(&stored).context("serialize oauth token")?;
    entry
        .set_password(&payload)
        .context("write oauth token to keyring")
}

pub fn delete_token(account: &str) -> anyhow::Result<()> {
    let entry = Entry::new(SERVICE, account).context("open keyring entry")?;
    entry
        .delete_credential()
        .context("delete token from keyring")
}

pub fn token_status(account: &str) -> anyhow::Result<TokenStatus> {
    let entry = Entry::new(SERVICE, account).context("open keyring entry")?;
    let value = match entry.get_password() {
        Ok(value) => value,
        Err(keyring::Error::NoEntry) => return Ok(TokenStatus::Missing),
        Err(err) => return Err(err).context("read token from keyring"),
    };
    Ok(status_of(&value))
}

fn status_of(value: &str) -> TokenStatus {
    match serde_json::from_str::<StoredToken>(value) {
        Ok(stored) if stored.kind == "oauth" => TokenStatus::OAuth {
            expires_at: stored.expires_at,
            refreshable: is_set(&stored.refresh_token)
                && is_set(&stored.token_endpoint)
                && is_set(&stored.client_id),
        },
        _ => TokenStatus::Raw,
    }
}

fn is_set(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|value| !value.trim().is_empty())
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Loads an `authorized_user` token file such as the `token.json` Google's client tooling writes.
pub fn read_authorized_user_file(path: &Path) -> anyhow::Result<OAuthToken> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("read token file {}", path.display()))?;
    parse_authorized_user(&data)
}

fn parse_authorized_user(data: &str) -> anyhow::Result<OAuthToken> {
    let file: AuthorizedUserFile = serde_json::from_str(data).context("parse token file")?;
    let expires_at = match file.expiry.as_deref() {
        Some(expiry) => Some(parse_expiry(expiry)?),
        None => None,
    };
    let scope = if file.scopes.is_empty() {
        None
    } else {
        Some(file.scopes.join(" "))
    };
    Ok(OAuthToken {
        access_token: file.token,
        refresh_token: file.refresh_token,
        expires_at,
        token_endpoint: file
            .token_uri
            .unwrap_or_else(|| GOOGLE_TOKEN_ENDPOINT.to_string()),
        client_id: file.client_id,
        client_secret: file.client_secret,
        scope,
    })
}

fn parse_expiry(expiry: &str) -> anyhow::Result<i64> {
    let parsed = OffsetDateTime::parse(expiry, &Rfc3339)
        .or_else(|_| OffsetDateTime::parse(&format!("{expiry}Z"), &Rfc3339))
        .with_context(|| format!("parse token expiry {expiry}"))?;
    Ok(parsed.unix_timestamp())
}

fn ensure_oauth_token(
    account: &str,
    entry: &Entry,
    mut stored: StoredToken,
) -> anyhow::Result<String> {
    if !requires_refresh(&stored, EXPIRY_LEEWAY_SECS) {
        return Ok(stored.access_token);
    }

    let refresh_token = stored
        .refresh_token
        .clone()
        .ok_or_else(|| anyhow::anyhow!("oauth token for {account} expired without refresh token"))?;
    let token_endpoint = stored
        .token_endpoint
        .clone()
        .ok_or_else(|| anyhow::anyhow!("oauth token for {account} missing token endpoint"))?;
    let client_id = stored
        .client_id
        .clone()
        .and_then(non_empty)
        .ok_or_else(|| anyhow::anyhow!("oauth token for {account} missing client id"))?;

    debug!(account, "refreshing oauth token");
    let client = Client::new();
    let mut form = vec![
        ("grant_type", "refresh_token".to_string()),
        ("refresh_token", refresh_token),
        ("client_id", client_id),
    ];
    if let Some(secret) = stored.client_secret.clone() {
        form.push(("client_secret", secret));
    }
    if let Some(scope) = stored.scope.clone() {
        form.push(("scope", scope));
    }

    let response: RefreshTokenResponse = client
        .post(&token_endpoint)
        .form(&form)
        .send()
        .context("request oauth refresh token")?
        .error_for_status()
        .context("refresh token status")?
        .json()
        .context("decode refresh token response")?;

    apply_refresh(&mut stored, response, now_epoch_seconds())?;

    let payload = serde_json::to_string(&stored).context("serialize refreshed token")?;
    entry
        .set_password(&payload)
        .context("write refreshed token to keyring")?;
    Ok(stored.access_token)
}

fn apply_refresh(
    stored: &mut StoredToken,
    response: RefreshTokenResponse,
    now: i64,
) -> anyhow::Result<()> {
    if let Some(error) = response.error {
        let message = response.error_description.unwrap_or(error);
        anyhow::bail!("oauth refresh failed: {message}");
    }
    stored.access_token = response.access_token;
    if let Some(refresh) = response.refresh_token {
        stored.refresh_token = Some(refresh);
    }
    if let Some(expires_in) = response.expires_in {
        stored.expires_at = Some(now + expires_in);
    }
    Ok(())
}

fn requires_refresh(stored: &StoredToken, leeway_secs: i64) -> bool {
    requires_refresh_at(stored, now_epoch_seconds(), leeway_secs)
}

pub fn now_epoch_seconds() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::from_secs(0))
        .as_secs() as i64
}

fn requires_refresh_at(stored: &StoredToken, now: i64, leeway_secs: i64) -> bool {
    if let Some(expires_at) = stored.expires_at {
        return expires_at <= now + leeway_secs;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn stored(expires_at: Option<i64>) -> StoredToken {
        StoredToken {
            kind: "oauth".to_string(),
            access_token: "token".to_string(),
            refresh_token: Some("refresh".to_string()),
            expires_at,
            token_endpoint: Some(GOOGLE_TOKEN_ENDPOINT.to_string()),
            client_id: Some("client".to_string()),
            client_secret: None,
            scope: None,
        }
    }

    #[test]
    fn requires_refresh_with_leeway() {
        let token = stored(Some(100));
        assert!(requires_refresh_at(&token, 50, 60));
        assert!(!requires_refresh_at(&token, 0, 0));
        assert!(!requires_refresh_at(&stored(None), i64::MAX - 100, 60));
    }

    #[test]
    fn refresh_response_updates_token() {
        let mut token = stored(Some(100));
        let response: RefreshTokenResponse = serde_json::from_str(
            r#"{"access_token":"fresh","expires_in":3599,"token_type":"Bearer"}"#,
        )
        .unwrap();
        apply_refresh(&mut token, response, 1_000).unwrap();
        assert_eq!(token.access_token, "fresh");
        assert_eq!(token.expires_at, Some(4_599));
        assert_eq!(token.refresh_token.as_deref(), Some("refresh"));
    }

    #[test]
    fn refresh_error_is_reported() {
        let mut token = stored(Some(100));
        let response: RefreshTokenResponse = serde_json::from_str(
            r#"{"access_token":"","error":"invalid_grant","error_description":"Token has been expired or revoked."}"#,
        )
        .unwrap();
        let err = apply_refresh(&mut token, response, 0).unwrap_err();
        assert!(err.to_string().contains("expired or revoked"));
        assert_eq!(token.access_token, "token");
    }

    #[test]
    fn status_distinguishes_raw_and_oauth() {
        assert_eq!(status_of("ya29.raw-token"), TokenStatus::Raw);
        let payload = serde_json::to_string(&stored(Some(42))).unwrap();
        assert_eq!(
            status_of(&payload),
            TokenStatus::OAuth {
                expires_at: Some(42),
                refreshable: true,
            }
        );
    }

    #[test]
    fn empty_client_id_is_not_refreshable() {
        let mut token = stored(Some(42));
        token.client_id = Some(String::new());
        let payload = serde_json::to_string(&token).unwrap();
        assert_eq!(
            status_of(&payload),
            TokenStatus::OAuth {
                expires_at: Some(42),
                refreshable: false,
            }
        );
    }

    #[test]
    fn blank_client_id_is_not_stored() {
        let stored = StoredToken::from(OAuthToken {
            access_token: "access".to_string(),
            refresh_token: Some("refresh".to_string()),
            expires_at: None,
            token_endpoint: GOOGLE_TOKEN_ENDPOINT.to_string(),
            client_id: "  ".to_string(),
            client_secret: None,
            scope: None,
        });
        assert_eq!(stored.client_id, None);
    }

    #[test]
    fn imports_authorized_user_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("token.json");
        fs::write(
            &path,
            r#"{
                "token": "ya29.access",
                "refresh_token": "1//refresh",
                "token_uri": "https://oauth2.googleapis.com/token",
                "client_id": "client.apps.googleusercontent.com",
                "client_secret": "shh",
                "scopes": [
                    "https://www.googleapis.com/auth/spreadsheets.readonly",
                    "https://www.googleapis.com/auth/drive"
                ],
                "expiry": "2024-05-01T12:00:00.123456Z"
            }"#,
        )
        .unwrap();
        let token = read_authorized_user_file(&path).unwrap();
        assert_eq!(token.access_token, "ya29.access");
        assert_eq!(token.refresh_token.as_deref(), Some("1//refresh"));
        assert_eq!(token.client_secret.as_deref(), Some("shh"));
        assert_eq!(token.expires_at, Some(1_714_564_800));
        assert_eq!(token.scope.as_deref(), Some(SCOPES.join(" ").as_str()));
    }

    #[test]
    fn expiry_without_offset_is_utc() {
        assert_eq!(parse_expiry("2024-05-01T12:00:00").unwrap(), 1_714_564_800);
        assert!(parse_expiry("yesterday").is_err());
    }

    #[test]
    fn import_defaults_token_endpoint() {
        let token = parse_authorized_user(r#"{"token":"t","client_id":"c"}"#).unwrap();
        assert_eq!(token.token_endpoint, GOOGLE_TOKEN_ENDPOINT);
        assert_eq!(token.expires_at, None);
        assert_eq!(token.scope, None);
    }
}
