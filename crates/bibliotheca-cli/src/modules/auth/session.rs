use std::collections::HashMap;
use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::DateTime;
use serde::Deserialize;
use tracing::{debug, info};
use url::Url;
use uuid::Uuid;

use super::storage::{
    clear_session, load_id_token, SessionStorage, EXPIRATION, ID_TOKEN, ID_TOKEN_NONCE,
    LOGIN_ERROR, LOGIN_STATE,
};
use crate::modules::system::AuthConfig;

/// Sign-in state owned by the identity provider integration.
pub(crate) trait AuthorizationSession {
    fn user_is_signed_in(&self) -> anyhow::Result<bool>;

    /// Starts the redirect-based sign-in. Produces no result for the caller.
    fn init_implicit_flow(&mut self) -> anyhow::Result<()>;

    /// Consumes the provider's redirect back to us, if the current location is one.
    fn process_redirect(&mut self) -> anyhow::Result<()>;
}

#[derive(Deserialize)]
struct IdTokenClaims {
    #[serde(default)]
    nonce: Option<String>,
    #[serde(default)]
    exp: Option<i64>,
    #[serde(default)]
    upn: Option<String>,
}

/// OAuth2 implicit flow (`response_type=id_token`) against an Azure AD style authority.
pub(crate) struct ImplicitFlowSession {
    settings: AuthConfig,
    storage: Arc<dyn SessionStorage>,
    location: Option<Url>,
    redirect_target: Option<Url>,
}

impl ImplicitFlowSession {
    pub(crate) fn new(settings: AuthConfig, storage: Arc<dyn SessionStorage>) -> Self {
        Self {
            settings,
            storage,
            location: None,
            redirect_target: None,
        }
    }

    /// The location the provider sent the user back to.
    pub(crate) fn with_location(mut self, location: Option<Url>) -> Self {
        self.location = location;
        self
    }

    /// Where the user has to go to continue signing in, once the flow started.
    pub(crate) fn redirect_target(&self) -> Option<&Url> {
        self.redirect_target.as_ref()
    }

    pub(crate) fn authorize_url(&self, state: &str, nonce: &str) -> anyhow::Result<Url> {
        let mut url = Url::parse(&format!(
            "{}/{}/oauth2/authorize",
            self.settings.authority.trim_end_matches('/'),
            self.settings.tenant
        ))?;
        url.query_pairs_mut()
            .append_pair("response_type", "id_token")
            .append_pair("client_id", &self.settings.client_id)
            .append_pair("redirect_uri", &self.settings.redirect_uri)
            .append_pair("state", state)
            .append_pair("nonce", nonce);
        if let Some(resource) = self.settings.resource.as_deref() {
            url.query_pairs_mut().append_pair("resource", resource);
        }
        Ok(url)
    }

    pub(crate) fn sign_out(&self) -> anyhow::Result<()> {
        clear_session(self.storage.as_ref())?;
        info!("signed out");
        Ok(())
    }

    fn callback_params(&self) -> Option<HashMap<String, String>> {
        let fragment = self.location.as_ref()?.fragment()?;
        let params: HashMap<String, String> = url::form_urlencoded::parse(fragment.as_bytes())
            .into_owned()
            .collect();
        let is_callback = ["id_token", "error", "state"]
            .iter()
            .any(|key| params.contains_key(*key));
        is_callback.then_some(params)
    }

    fn clear_pending(&self) -> anyhow::Result<()> {
        self.storage.remove(LOGIN_STATE)?;
        self.storage.remove(ID_TOKEN_NONCE)
    }
}

fn decode_claims(id_token: &str) -> anyhow::Result<IdTokenClaims> {
    let payload = id_token
        .split('.')
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("id token is not a JWT"))?;
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|err| anyhow::anyhow!("id token payload is not base64url: {err}"))?;
    Ok(serde_json::from_slice(&bytes)?)
}

impl AuthorizationSession for ImplicitFlowSession {
    fn user_is_signed_in(&self) -> anyhow::Result<bool> {
        Ok(load_id_token(self.storage.as_ref())?.is_some())
    }

    fn init_implicit_flow(&mut self) -> anyhow::Result<()> {
        if self.callback_params().is_some() {
            debug!("sign-in callback pending; not starting a new flow");
            return Ok(());
        }
        let state = Uuid::new_v4().to_string();
        let nonce = Uuid::new_v4().to_string();
        self.storage.set(LOGIN_STATE, &state)?;
        self.storage.set(ID_TOKEN_NONCE, &nonce)?;
        let url = self.authorize_url(&state, &nonce)?;
        info!(authority = %self.settings.authority, tenant = %self.settings.tenant, "starting implicit sign-in flow");
        self.redirect_target = Some(url);
        Ok(())
    }

    fn process_redirect(&mut self) -> anyhow::Result<()> {
        let Some(params) = self.callback_params() else {
            return Ok(());
        };
        self.location = None;

        if let Some(error) = params.get("error") {
            let description = params
                .get("error_description")
                .cloned()
                .unwrap_or_default();
            self.storage
                .set(LOGIN_ERROR, &format!("{error}: {description}"))?;
            self.clear_pending()?;
            anyhow::bail!("sign-in failed: {error} {description}");
        }

        let expected_state = self.storage.get(LOGIN_STATE)?.ok_or_else(|| {
            anyhow::anyhow!("no sign-in in progress; run `bibliotheca login` first")
        })?;
        let state = params
            .get("state")
            .ok_or_else(|| anyhow::anyhow!("sign-in response is missing state"))?;
        if *state != expected_state {
            anyhow::bail!("sign-in state mismatch");
        }

        let id_token = params
            .get("id_token")
            .ok_or_else(|| anyhow::anyhow!("sign-in response is missing id_token"))?;
        let claims = decode_claims(id_token)?;
        let expected_nonce = self.storage.get(ID_TOKEN_NONCE)?;
        if expected_nonce.is_none() || claims.nonce != expected_nonce {
            anyhow::bail!("id token nonce mismatch");
        }

        self.storage.set(ID_TOKEN, id_token)?;
        match claims.exp.and_then(|exp| DateTime::from_timestamp(exp, 0)) {
            Some(expires_at) => self.storage.set(EXPIRATION, &expires_at.to_rfc3339())?,
            None => self.storage.remove(EXPIRATION)?,
        }
        self.storage.remove(LOGIN_ERROR)?;
        self.clear_pending()?;
        info!(user = claims.upn.as_deref().unwrap_or("unknown"), "signed in");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::auth::MemoryStorage;
    use chrono::{Duration as ChronoDuration, Utc};
    use serde_json::json;

    fn settings() -> AuthConfig {
        AuthConfig {
            authority: "https://login.example.com/".to_string(),
            tenant: "contoso".to_string(),
            client_id: "client-1".to_string(),
            redirect_uri: "https://docs.example.com/login".to_string(),
            resource: None,
        }
    }

    fn id_token(claims: serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none"}"#);
        let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
        format!("{header}.{payload}.signature")
    }

    fn callback(fragment: &str) -> Option<Url> {
        Some(Url::parse(&format!("https://docs.example.com/login#{fragment}")).expect("url"))
    }

    fn query(url: &Url) -> HashMap<String, String> {
        url.query_pairs().into_owned().collect()
    }

    #[test]
    fn init_builds_authorize_url_and_remembers_state() -> anyhow::Result<()> {
        let storage = Arc::new(MemoryStorage::default());
        let mut session = ImplicitFlowSession::new(settings(), storage.clone());
        session.init_implicit_flow()?;

        let target = session.redirect_target().expect("redirect target");
        assert_eq!(
            target.as_str().split('?').next(),
            Some("https://login.example.com/contoso/oauth2/authorize")
        );
        let params = query(target);
        assert_eq!(params["response_type"], "id_token");
        assert_eq!(params["client_id"], "client-1");
        assert_eq!(params["redirect_uri"], "https://docs.example.com/login");
        assert_eq!(Some(params["state"].clone()), storage.get(LOGIN_STATE)?);
        assert_eq!(Some(params["nonce"].clone()), storage.get(ID_TOKEN_NONCE)?);
        assert!(!params.contains_key("resource"));
        Ok(())
    }

    #[test]
    fn init_is_a_no_op_while_a_callback_is_pending() -> anyhow::Result<()> {
        let storage = Arc::new(MemoryStorage::default());
        let mut session = ImplicitFlowSession::new(settings(), storage.clone())
            .with_location(callback("state=abc&id_token=x.y.z"));
        session.init_implicit_flow()?;
        assert!(session.redirect_target().is_none());
        assert_eq!(storage.get(LOGIN_STATE)?, None);
        Ok(())
    }

    #[test]
    fn redirect_with_matching_state_signs_in() -> anyhow::Result<()> {
        let storage = Arc::new(MemoryStorage::default());
        storage.set(LOGIN_STATE, "state-1")?;
        storage.set(ID_TOKEN_NONCE, "nonce-1")?;
        let exp = (Utc::now() + ChronoDuration::hours(1)).timestamp();
        let token = id_token(json!({ "nonce": "nonce-1", "exp": exp, "upn": "jane@example.com" }));

        let mut session = ImplicitFlowSession::new(settings(), storage.clone())
            .with_location(callback(&format!("id_token={token}&state=state-1&session_state=s")));
        assert!(!session.user_is_signed_in()?);
        session.process_redirect()?;

        assert!(session.user_is_signed_in()?);
        assert_eq!(storage.get(ID_TOKEN)?, Some(token));
        assert!(storage.get(EXPIRATION)?.is_some());
        assert_eq!(storage.get(LOGIN_STATE)?, None);
        assert_eq!(storage.get(ID_TOKEN_NONCE)?, None);
        Ok(())
    }

    #[test]
    fn redirect_with_foreign_state_is_rejected() -> anyhow::Result<()> {
        let storage = Arc::new(MemoryStorage::default());
        storage.set(LOGIN_STATE, "state-1")?;
        storage.set(ID_TOKEN_NONCE, "nonce-1")?;
        let token = id_token(json!({ "nonce": "nonce-1" }));

        let mut session = ImplicitFlowSession::new(settings(), storage.clone())
            .with_location(callback(&format!("id_token={token}&state=other")));
        let err = session.process_redirect().expect_err("state mismatch");
        assert!(err.to_string().contains("state mismatch"));
        assert_eq!(storage.get(ID_TOKEN)?, None);
        Ok(())
    }

    #[test]
    fn redirect_with_wrong_nonce_is_rejected() -> anyhow::Result<()> {
        let storage = Arc::new(MemoryStorage::default());
        storage.set(LOGIN_STATE, "state-1")?;
        storage.set(ID_TOKEN_NONCE, "nonce-1")?;
        let token = id_token(json!({ "nonce": "replayed" }));

        let mut session = ImplicitFlowSession::new(settings(), storage.clone())
            .with_location(callback(&format!("id_token={token}&state=state-1")));
        let err = session.process_redirect().expect_err("nonce mismatch");
        assert!(err.to_string().contains("nonce mismatch"));
        assert!(!session.user_is_signed_in()?);
        Ok(())
    }

    #[test]
    fn provider_error_is_recorded() -> anyhow::Result<()> {
        let storage = Arc::new(MemoryStorage::default());
        storage.set(LOGIN_STATE, "state-1")?;
        let mut session = ImplicitFlowSession::new(settings(), storage.clone()).with_location(
            callback("error=access_denied&error_description=User+cancelled&state=state-1"),
        );
        let err = session.process_redirect().expect_err("provider error");
        assert!(err.to_string().contains("access_denied"));
        assert_eq!(
            storage.get(LOGIN_ERROR)?,
            Some("access_denied: User cancelled".to_string())
        );
        assert_eq!(storage.get(LOGIN_STATE)?, None);
        Ok(())
    }

    #[test]
    fn location_without_callback_is_ignored() -> anyhow::Result<()> {
        let storage = Arc::new(MemoryStorage::default());
        let mut session = ImplicitFlowSession::new(settings(), storage)
            .with_location(Some(Url::parse("https://docs.example.com/login")?));
        session.process_redirect()?;
        assert!(!session.user_is_signed_in()?);
        Ok(())
    }

    #[test]
    fn resource_is_forwarded_when_configured() -> anyhow::Result<()> {
        let mut config = settings();
        config.resource = Some("api://gateway".to_string());
        let session = ImplicitFlowSession::new(config, Arc::new(MemoryStorage::default()));
        let url = session.authorize_url("s", "n")?;
        assert_eq!(query(&url)["resource"], "api://gateway");
        Ok(())
    }

    #[test]
    fn sign_out_forgets_the_token() -> anyhow::Result<()> {
        let storage = Arc::new(MemoryStorage::with_id_token("token"));
        let session = ImplicitFlowSession::new(settings(), storage);
        assert!(session.user_is_signed_in()?);
        session.sign_out()?;
        assert!(!session.user_is_signed_in()?);
        Ok(())
    }
}
