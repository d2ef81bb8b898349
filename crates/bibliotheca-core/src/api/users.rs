use serde::{Deserialize, Serialize};

/// Body of `PUT /api/users/{id}/refreshToken`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    pub access_token: String,
}

impl RefreshTokenRequest {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
        }
    }
}
