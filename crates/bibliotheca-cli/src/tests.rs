use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use bibliotheca_core::Project;
use mockito::{Matcher, Server};
use serde_json::json;

use crate::cli_args::*;
use crate::modules::auth::{
    handle_login_command, handle_logout, MemoryStorage, SessionStorage, EXPIRATION, ID_TOKEN,
    ID_TOKEN_NONCE, LOGIN_STATE,
};
use crate::modules::gateway::{GatewayClient, HttpTransport};
use crate::modules::system::http::save_response_body;
use crate::modules::system::types::CliContext;
use crate::modules::system::{handle_config_command, AuthConfig, CliConfig};

fn gateway(addr: &str, token: Option<&str>) -> GatewayClient<HttpTransport> {
    let storage: Arc<dyn SessionStorage> = match token {
        Some(token) => Arc::new(MemoryStorage::with_id_token(token)),
        None => Arc::new(MemoryStorage::default()),
    };
    let transport = HttpTransport::new(reqwest::Client::new(), addr, true)
        .expect("transport")
        .with_access_token(token.map(str::to_string));
    GatewayClient::new(transport, storage)
}

fn signed_in_config(addr: &str) -> CliConfig {
    let mut config = CliConfig::default();
    config.contexts.insert(
        "docs".to_string(),
        CliContext {
            addr: addr.to_string(),
            auth: Some(AuthConfig {
                authority: "https://login.example.com".to_string(),
                tenant: "contoso".to_string(),
                client_id: "client-1".to_string(),
                redirect_uri: format!("{addr}/login"),
                resource: None,
            }),
        },
    );
    config
}

fn login_args(redirect_url: Option<String>) -> LoginArgs {
    LoginArgs {
        redirect_url,
        context: Some("docs".to_string()),
    }
}

#[tokio::test]
async fn filtered_projects_sends_filters_and_bearer_token() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/projects?groups=g1&tags=t1&tags=t2")
        .match_header("authorization", "Bearer token")
        .with_status(200)
        .with_body(json!([{ "id": "p1" }]).to_string())
        .create_async()
        .await;

    let tags = vec!["t1".to_string(), "t2".to_string()];
    let response = gateway(&server.url(), Some("token"))
        .filtered_projects(Some("g1"), &tags)
        .await
        .expect("response");
    assert!(response.status().is_success());
    mock.assert_async().await;
}

#[tokio::test]
async fn requests_without_token_are_anonymous() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/tags")
        .match_header("authorization", Matcher::Missing)
        .with_status(401)
        .create_async()
        .await;

    let response = gateway(&server.url(), None).tags().await.expect("response");
    assert_eq!(response.status(), reqwest::StatusCode::UNAUTHORIZED);
    mock.assert_async().await;
}

#[tokio::test]
async fn create_project_posts_camel_case_json() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/projects")
        .match_body(Matcher::Json(json!({
            "id": "docs",
            "name": "Docs",
            "defaultBranch": "master",
            "ownerTeam": "platform"
        })))
        .with_status(201)
        .create_async()
        .await;

    let mut project: Project = serde_json::from_value(json!({
        "id": "docs",
        "name": "Docs",
        "ownerTeam": "platform"
    }))
    .expect("project");
    project.default_branch = Some("master".to_string());
    gateway(&server.url(), Some("token"))
        .create_project(&project)
        .await
        .expect("response");
    mock.assert_async().await;
}

#[tokio::test]
async fn graphql_query_is_sent_verbatim() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/graphql")
        .match_header("content-type", "text/plain")
        .match_body("{ projects { id } }")
        .with_status(200)
        .with_body(r#"{"data":{"projects":[]}}"#)
        .create_async()
        .await;

    gateway(&server.url(), Some("token"))
        .graphql_results("{ projects { id } }")
        .await
        .expect("response");
    mock.assert_async().await;
}

#[tokio::test]
async fn pdf_export_is_saved_to_disk() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/projects/docs/branches/release%2F1.0/export/pdf")
        .match_header("accept", "application/pdf")
        .with_status(200)
        .with_body("%PDF-1.4")
        .create_async()
        .await;
    let dir = tempfile::tempdir().expect("tempdir");
    let output = dir.path().join("docs.pdf");

    let response = gateway(&server.url(), Some("token"))
        .pdf_file("docs", "release/1.0")
        .await
        .expect("response");
    save_response_body(response, &output).await.expect("save");
    assert_eq!(std::fs::read(&output).expect("read"), b"%PDF-1.4");
}

#[tokio::test]
async fn failed_response_is_reported_with_status() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/projects/missing/branches/master/export/pdf")
        .with_status(404)
        .with_body("not found")
        .create_async()
        .await;
    let dir = tempfile::tempdir().expect("tempdir");
    let output = dir.path().join("missing.pdf");

    let response = gateway(&server.url(), Some("token"))
        .pdf_file("missing", "master")
        .await
        .expect("response");
    let err = save_response_body(response, &output)
        .await
        .expect_err("404");
    assert!(err.to_string().contains("404"));
    assert!(!output.exists());
}

#[test]
fn image_src_uses_stored_token() {
    let client = gateway("https://gateway.example.com/", Some("id token"));
    assert_eq!(
        client
            .path_to_image("docs", "master", "images/arch.png")
            .expect("src"),
        "src=\"https://gateway.example.com/api/projects/docs/branches/master/documents/content/images/arch.png?access_token=id%20token\""
    );

    let anonymous = gateway("https://gateway.example.com", None);
    assert!(anonymous.path_to_image("docs", "master", "a.png").is_err());
}

#[test]
fn image_src_ignores_expired_token() {
    let storage = Arc::new(MemoryStorage::with_id_token("stale"));
    storage
        .set(
            EXPIRATION,
            &(chrono::Utc::now() - chrono::Duration::minutes(5)).to_rfc3339(),
        )
        .expect("set");
    let transport = HttpTransport::new(reqwest::Client::new(), "https://gateway.example.com", false)
        .expect("transport");
    let client = GatewayClient::new(transport, storage);

    let err = client
        .path_to_image("docs", "master", "a.png")
        .expect_err("expired");
    assert!(err.to_string().contains("not signed in"));
}

#[test]
fn plain_http_is_refused_without_insecure() {
    let err = HttpTransport::new(reqwest::Client::new(), "http://127.0.0.1:9", false)
        .err()
        .expect("insecure");
    assert!(err
        .to_string()
        .contains("refusing to use http:// without --insecure"));
    assert!(HttpTransport::new(reqwest::Client::new(), "http://127.0.0.1:9", true).is_ok());
}

#[tokio::test]
async fn dot_segment_ids_never_reach_the_gateway() {
    let mut server = Server::new_async().await;
    let catch_all = server
        .mock("DELETE", Matcher::Any)
        .with_status(204)
        .expect(0)
        .create_async()
        .await;
    let client = gateway(&server.url(), Some("token"));

    let err = client.delete_user("..").await.expect_err("dot segment");
    assert!(err.to_string().contains("not a valid path segment"));
    assert!(client.delete_project(".").await.is_err());
    assert!(client
        .document_content("docs", "master", "../../../../../users")
        .await
        .is_err());
    catch_all.assert_async().await;
}

#[test]
fn set_context_fills_sign_in_defaults() {
    let mut config = CliConfig::default();
    handle_config_command(
        ConfigArgs {
            command: ConfigCommand::SetContext(SetContextArgs {
                name: "docs".to_string(),
                addr: Some("https://docs.example.com/".to_string()),
                authority: None,
                tenant: None,
                client_id: Some("client-1".to_string()),
                redirect_uri: None,
                resource: None,
            }),
        },
        &mut config,
    )
    .expect("set-context");

    assert_eq!(config.current_context.as_deref(), Some("docs"));
    let auth = config.contexts["docs"].auth.clone().expect("auth");
    assert_eq!(auth.authority, crate::DEFAULT_AUTHORITY);
    assert_eq!(auth.tenant, crate::DEFAULT_TENANT);
    assert_eq!(auth.redirect_uri, "https://docs.example.com/login");

    handle_config_command(
        ConfigArgs {
            command: ConfigCommand::SetContext(SetContextArgs {
                name: "docs".to_string(),
                addr: None,
                authority: None,
                tenant: Some("contoso".to_string()),
                client_id: None,
                redirect_uri: None,
                resource: None,
            }),
        },
        &mut config,
    )
    .expect("update tenant");
    let auth = config.contexts["docs"].auth.clone().expect("auth");
    assert_eq!(auth.tenant, "contoso");
    assert_eq!(auth.client_id, "client-1");
}

#[test]
fn set_context_requires_client_id_for_sign_in() {
    let mut config = CliConfig::default();
    let err = handle_config_command(
        ConfigArgs {
            command: ConfigCommand::SetContext(SetContextArgs {
                name: "docs".to_string(),
                addr: None,
                authority: None,
                tenant: Some("contoso".to_string()),
                client_id: None,
                redirect_uri: None,
                resource: None,
            }),
        },
        &mut config,
    )
    .expect_err("client id");
    assert!(err.to_string().contains("--client-id"));
}

#[test]
fn use_context_rejects_unknown_names() {
    let mut config = CliConfig::default();
    let err = handle_config_command(
        ConfigArgs {
            command: ConfigCommand::UseContext(UseContextArgs {
                name: "nope".to_string(),
            }),
        },
        &mut config,
    )
    .expect_err("unknown");
    assert!(err.to_string().contains("context not found"));
}

#[test]
fn login_starts_flow_then_completes_from_redirect() {
    let storage = Arc::new(MemoryStorage::default());
    let mut config = signed_in_config("https://docs.example.com");

    let shared: Arc<dyn SessionStorage> = storage.clone();
    handle_login_command(login_args(None), None, &mut config, move |_| shared)
        .expect("start login");
    let state = storage.get(LOGIN_STATE).expect("get").expect("state");
    let nonce = storage.get(ID_TOKEN_NONCE).expect("get").expect("nonce");
    assert_eq!(config.current_context.as_deref(), Some("docs"));

    let payload = URL_SAFE_NO_PAD.encode(json!({ "nonce": nonce }).to_string());
    let token = format!("e30.{payload}.sig");
    let redirect = format!("https://docs.example.com/login#id_token={token}&state={state}");
    let shared: Arc<dyn SessionStorage> = storage.clone();
    handle_login_command(login_args(Some(redirect)), None, &mut config, move |_| {
        shared
    })
    .expect("finish login");

    assert_eq!(storage.get(ID_TOKEN).expect("get"), Some(token));
    assert_eq!(storage.get(LOGIN_STATE).expect("get"), None);
}

#[test]
fn login_when_signed_in_does_not_restart_the_flow() {
    let storage = Arc::new(MemoryStorage::with_id_token("token"));
    let mut config = signed_in_config("https://docs.example.com");
    let shared: Arc<dyn SessionStorage> = storage.clone();
    handle_login_command(login_args(None), None, &mut config, move |_| shared)
        .expect("login");
    assert_eq!(storage.get(LOGIN_STATE).expect("get"), None);
}

#[test]
fn login_without_sign_in_settings_fails() {
    let mut config = CliConfig::default();
    config.contexts.insert(
        "docs".to_string(),
        CliContext {
            addr: "https://docs.example.com".to_string(),
            auth: None,
        },
    );
    let err = handle_login_command(login_args(None), None, &mut config, |_| {
        Arc::new(MemoryStorage::default())
    })
    .expect_err("not configured");
    assert!(err.to_string().contains("sign-in is not configured"));
}

#[test]
fn logout_clears_stored_session() {
    let storage = Arc::new(MemoryStorage::with_id_token("token"));
    storage.set(LOGIN_STATE, "pending").expect("set");
    let config = signed_in_config("https://docs.example.com");
    let shared: Arc<dyn SessionStorage> = storage.clone();
    handle_logout(
        LogoutArgs {
            context: Some("docs".to_string()),
        },
        None,
        &config,
        move |_| shared,
    )
    .expect("logout");
    assert_eq!(storage.get(ID_TOKEN).expect("get"), None);
    assert_eq!(storage.get(LOGIN_STATE).expect("get"), None);
}
