use std::sync::Arc;

use serde::Serialize;

use super::routes;
use super::transport::Transport;
use crate::modules::auth::{load_id_token, SessionStorage};

type Response = anyhow::Result<reqwest::Response>;

/// One method per gateway endpoint; each builds its request and hands it to
/// the transport, returning the raw response.
///
/// Entity bodies are anything serializable: typed models from
/// `bibliotheca_core`, or a `serde_json::Value` read from disk and sent as is.
pub(crate) struct GatewayClient<T> {
    transport: T,
    storage: Arc<dyn SessionStorage>,
}

impl<T: Transport> GatewayClient<T> {
    pub(crate) fn new(transport: T, storage: Arc<dyn SessionStorage>) -> Self {
        Self { transport, storage }
    }

    pub(crate) async fn graphql_results(&self, query: &str) -> Response {
        self.transport.send(routes::graphql(query)).await
    }

    pub(crate) async fn projects(&self) -> Response {
        self.transport.send(routes::projects()).await
    }

    pub(crate) async fn projects_with_keywords(&self, query: &str) -> Response {
        self.transport
            .send(routes::projects_with_keywords(query))
            .await
    }

    pub(crate) async fn filtered_projects(&self, group: Option<&str>, tags: &[String]) -> Response {
        self.transport
            .send(routes::filtered_projects(group, tags))
            .await
    }

    pub(crate) async fn project(&self, project_id: &str) -> Response {
        self.transport.send(routes::project(project_id)?).await
    }

    pub(crate) async fn project_access_token(&self, project_id: &str) -> Response {
        self.transport
            .send(routes::project_access_token(project_id)?)
            .await
    }

    pub(crate) async fn create_project<P: Serialize + ?Sized>(&self, project: &P) -> Response {
        self.transport.send(routes::create_project(project)?).await
    }

    pub(crate) async fn update_project<P: Serialize + ?Sized>(
        &self,
        project_id: &str,
        project: &P,
    ) -> Response {
        self.transport
            .send(routes::update_project(project_id, project)?)
            .await
    }

    pub(crate) async fn delete_project(&self, project_id: &str) -> Response {
        self.transport.send(routes::delete_project(project_id)?).await
    }

    pub(crate) async fn branches(&self, project_id: &str) -> Response {
        self.transport.send(routes::branches(project_id)?).await
    }

    pub(crate) async fn logs(&self, project_id: &str) -> Response {
        self.transport.send(routes::logs(project_id)?).await
    }

    pub(crate) async fn branch(&self, project_id: &str, branch_name: &str) -> Response {
        self.transport
            .send(routes::branch(project_id, branch_name)?)
            .await
    }

    pub(crate) async fn delete_branch(&self, project_id: &str, branch_name: &str) -> Response {
        self.transport
            .send(routes::delete_branch(project_id, branch_name)?)
            .await
    }

    pub(crate) async fn users(&self) -> Response {
        self.transport.send(routes::users()).await
    }

    pub(crate) async fn user(&self, user_id: &str) -> Response {
        self.transport.send(routes::user(user_id)?).await
    }

    pub(crate) async fn create_user<U: Serialize + ?Sized>(&self, user: &U) -> Response {
        self.transport.send(routes::create_user(user)?).await
    }

    pub(crate) async fn update_user<U: Serialize + ?Sized>(&self, user_id: &str, user: &U) -> Response {
        self.transport
            .send(routes::update_user(user_id, user)?)
            .await
    }

    pub(crate) async fn delete_user(&self, user_id: &str) -> Response {
        self.transport.send(routes::delete_user(user_id)?).await
    }

    pub(crate) async fn refresh_user_token(&self, user_id: &str, access_token: &str) -> Response {
        self.transport
            .send(routes::refresh_user_token(user_id, access_token)?)
            .await
    }

    pub(crate) async fn table_of_contents(&self, project_id: &str, branch_name: &str) -> Response {
        self.transport
            .send(routes::table_of_contents(project_id, branch_name)?)
            .await
    }

    pub(crate) async fn search_in_branch(
        &self,
        project_id: &str,
        branch_name: &str,
        query: &str,
    ) -> Response {
        self.transport
            .send(routes::search_in_branch(project_id, branch_name, query)?)
            .await
    }

    pub(crate) async fn document_content(
        &self,
        project_id: &str,
        branch_name: &str,
        file_path: &str,
    ) -> Response {
        self.transport
            .send(routes::document_content(project_id, branch_name, file_path)?)
            .await
    }

    pub(crate) async fn groups(&self) -> Response {
        self.transport.send(routes::groups()).await
    }

    pub(crate) async fn group(&self, name: &str) -> Response {
        self.transport.send(routes::group(name)?).await
    }

    pub(crate) async fn delete_group(&self, name: &str) -> Response {
        self.transport.send(routes::delete_group(name)?).await
    }

    pub(crate) async fn update_group<G: Serialize + ?Sized>(&self, name: &str, group: &G) -> Response {
        self.transport
            .send(routes::update_group(name, group)?)
            .await
    }

    pub(crate) async fn create_group<G: Serialize + ?Sized>(&self, group: &G) -> Response {
        self.transport.send(routes::create_group(group)?).await
    }

    pub(crate) async fn tags(&self) -> Response {
        self.transport.send(routes::tags()).await
    }

    pub(crate) async fn services(&self) -> Response {
        self.transport.send(routes::services()).await
    }

    pub(crate) async fn service_health(&self, service_id: &str) -> Response {
        self.transport
            .send(routes::service_health(service_id)?)
            .await
    }

    pub(crate) async fn search(&self, query: &str) -> Response {
        self.transport.send(routes::search(query)).await
    }

    pub(crate) async fn search_is_enabled(&self) -> Response {
        self.transport.send(routes::search_is_enabled()).await
    }

    pub(crate) async fn reindex_branch(&self, project_id: &str, branch_name: &str) -> Response {
        self.transport
            .send(routes::reindex_branch(project_id, branch_name)?)
            .await
    }

    pub(crate) async fn reindex_status(&self, project_id: &str, branch_name: &str) -> Response {
        self.transport
            .send(routes::reindex_status(project_id, branch_name)?)
            .await
    }

    pub(crate) async fn pdf_file(&self, project_id: &str, branch_name: &str) -> Response {
        self.transport
            .send(routes::pdf_file(project_id, branch_name)?)
            .await
    }

    /// `src="…"` attribute for an image stored in a branch, authorized by the
    /// stored identity token. An expired token counts as missing.
    pub(crate) fn path_to_image(
        &self,
        project_id: &str,
        branch_name: &str,
        file_path: &str,
    ) -> anyhow::Result<String> {
        let token = load_id_token(self.storage.as_ref())?
            .ok_or_else(|| anyhow::anyhow!("not signed in; run `bibliotheca login`"))?;
        let request = routes::image(project_id, branch_name, file_path, &token)?;
        Ok(format!(
            "src=\"{}\"",
            request.url(self.transport.server_address())
        ))
    }
}
