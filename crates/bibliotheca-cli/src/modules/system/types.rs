use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::modules::gateway::{GatewayClient, HttpTransport};

#[derive(Serialize, Deserialize, Default)]
pub struct CliConfig {
    #[serde(default)]
    pub current_context: Option<String>,
    #[serde(default)]
    pub contexts: HashMap<String, CliContext>,
}

#[derive(Serialize, Deserialize, Clone)]
pub struct CliContext {
    pub addr: String,
    #[serde(default)]
    pub auth: Option<AuthConfig>,
}

/// Identity provider settings for the implicit sign-in flow.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthConfig {
    pub authority: String,
    pub tenant: String,
    pub client_id: String,
    pub redirect_uri: String,
    #[serde(default)]
    pub resource: Option<String>,
}

pub struct CommandContext {
    pub gateway: GatewayClient<HttpTransport>,
}
