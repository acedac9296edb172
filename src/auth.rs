use std::fmt;

use async_trait::async_trait;

use crate::error::AuthFailure;

#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

/// Source of bearer tokens. How the token is obtained (login, refresh) is up to the implementor.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    async fn access_token(&self) -> Result<AccessToken, AuthFailure>;
}

/// Hands out a token obtained elsewhere, e.g. from `VIER_ACCESS_TOKEN`.
pub struct StaticTokenProvider {
    token: AccessToken,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: AccessToken::new(token),
        }
    }
}

#[async_trait]
impl AccessTokenProvider for StaticTokenProvider {
    async fn access_token(&self) -> Result<AccessToken, AuthFailure> {
        if self.token.as_str().trim().is_empty() {
            return Err(AuthFailure::MissingToken);
        }
        Ok(self.token.clone())
    }
}
