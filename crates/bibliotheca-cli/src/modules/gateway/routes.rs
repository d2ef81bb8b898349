//! One constructor per gateway endpoint. Each is a pure function of its
//! arguments; sending is left to [`super::transport::Transport`]. Constructors that
//! interpolate caller values fail on segments that would escape their slot.

use bibliotheca_core::RefreshTokenRequest;
use reqwest::Method;
use serde::Serialize;

use super::request::{ApiPath, ApiRequest};

type Request = anyhow::Result<ApiRequest>;

pub(crate) const PDF_CONTENT_TYPE: &str = "application/pdf";

fn projects_path() -> ApiPath {
    ApiPath::api().literal("projects")
}

fn project_path(project_id: &str) -> anyhow::Result<ApiPath> {
    projects_path().segment(project_id)
}

fn branch_path(project_id: &str, branch_name: &str) -> anyhow::Result<ApiPath> {
    project_path(project_id)?
        .literal("branches")
        .segment(branch_name)
}

fn search_branch_path(project_id: &str, branch_name: &str) -> anyhow::Result<ApiPath> {
    ApiPath::api()
        .literal("search")
        .literal("projects")
        .segment(project_id)?
        .literal("branches")
        .segment(branch_name)
}

fn users_path() -> ApiPath {
    ApiPath::api().literal("users")
}

fn groups_path() -> ApiPath {
    ApiPath::api().literal("groups")
}

pub(crate) fn graphql(query: &str) -> ApiRequest {
    ApiRequest::new(Method::POST, ApiPath::api().literal("graphql")).raw(query)
}

pub(crate) fn projects() -> ApiRequest {
    ApiRequest::get(projects_path())
}

pub(crate) fn projects_with_keywords(query: &str) -> ApiRequest {
    ApiRequest::get(projects_path()).param("query", query)
}

/// Group filter first, then one `tags` pair per tag. An empty group is no filter.
pub(crate) fn filtered_projects(group: Option<&str>, tags: &[String]) -> ApiRequest {
    let group = group
        .filter(|value| !value.is_empty())
        .map(|value| ("groups".to_string(), value.to_string()));
    let tags = tags.iter().map(|tag| ("tags".to_string(), tag.clone()));
    ApiRequest::get(projects_path()).params(group.into_iter().chain(tags))
}

pub(crate) fn project(project_id: &str) -> Request {
    Ok(ApiRequest::get(project_path(project_id)?))
}

pub(crate) fn project_access_token(project_id: &str) -> Request {
    Ok(ApiRequest::get(
        project_path(project_id)?.literal("accessToken"),
    ))
}

pub(crate) fn create_project<P: Serialize + ?Sized>(project: &P) -> Request {
    ApiRequest::new(Method::POST, projects_path()).json(project)
}

pub(crate) fn update_project<P: Serialize + ?Sized>(project_id: &str, project: &P) -> Request {
    ApiRequest::new(Method::PUT, project_path(project_id)?).json(project)
}

pub(crate) fn delete_project(project_id: &str) -> Request {
    Ok(ApiRequest::delete(project_path(project_id)?))
}

pub(crate) fn branches(project_id: &str) -> Request {
    Ok(ApiRequest::get(project_path(project_id)?.literal("branches")))
}

pub(crate) fn logs(project_id: &str) -> Request {
    Ok(ApiRequest::get(
        ApiPath::api().literal("logs").segment(project_id)?,
    ))
}

pub(crate) fn branch(project_id: &str, branch_name: &str) -> Request {
    Ok(ApiRequest::get(branch_path(project_id, branch_name)?))
}

pub(crate) fn delete_branch(project_id: &str, branch_name: &str) -> Request {
    Ok(ApiRequest::delete(branch_path(project_id, branch_name)?))
}

pub(crate) fn table_of_contents(project_id: &str, branch_name: &str) -> Request {
    Ok(ApiRequest::get(
        branch_path(project_id, branch_name)?.literal("toc"),
    ))
}

fn document_path(project_id: &str, branch_name: &str, file_path: &str) -> anyhow::Result<ApiPath> {
    branch_path(project_id, branch_name)?
        .literal("documents")
        .literal("content")
        .nested(file_path)
}

pub(crate) fn document_content(project_id: &str, branch_name: &str, file_path: &str) -> Request {
    Ok(ApiRequest::get(document_path(
        project_id,
        branch_name,
        file_path,
    )?))
}

pub(crate) fn image(
    project_id: &str,
    branch_name: &str,
    file_path: &str,
    access_token: &str,
) -> Request {
    Ok(
        ApiRequest::get(document_path(project_id, branch_name, file_path)?)
            .param("access_token", access_token),
    )
}

pub(crate) fn pdf_file(project_id: &str, branch_name: &str) -> Request {
    Ok(ApiRequest::get(
        branch_path(project_id, branch_name)?
            .literal("export")
            .literal("pdf"),
    )
    .accept(PDF_CONTENT_TYPE))
}

pub(crate) fn users() -> ApiRequest {
    ApiRequest::get(users_path())
}

pub(crate) fn user(user_id: &str) -> Request {
    Ok(ApiRequest::get(users_path().segment(user_id)?))
}

pub(crate) fn create_user<U: Serialize + ?Sized>(user: &U) -> Request {
    ApiRequest::new(Method::POST, users_path()).json(user)
}

pub(crate) fn update_user<U: Serialize + ?Sized>(user_id: &str, user: &U) -> Request {
    ApiRequest::new(Method::PUT, users_path().segment(user_id)?).json(user)
}

pub(crate) fn delete_user(user_id: &str) -> Request {
    Ok(ApiRequest::delete(users_path().segment(user_id)?))
}

pub(crate) fn refresh_user_token(user_id: &str, access_token: &str) -> Request {
    ApiRequest::new(
        Method::PUT,
        users_path().segment(user_id)?.literal("refreshToken"),
    )
    .json(&RefreshTokenRequest::new(access_token))
}

pub(crate) fn groups() -> ApiRequest {
    ApiRequest::get(groups_path())
}

pub(crate) fn group(name: &str) -> Request {
    Ok(ApiRequest::get(groups_path().segment(name)?))
}

pub(crate) fn create_group<G: Serialize + ?Sized>(group: &G) -> Request {
    ApiRequest::new(Method::POST, groups_path()).json(group)
}

pub(crate) fn update_group<G: Serialize + ?Sized>(name: &str, group: &G) -> Request {
    ApiRequest::new(Method::PUT, groups_path().segment(name)?).json(group)
}

pub(crate) fn delete_group(name: &str) -> Request {
    Ok(ApiRequest::delete(groups_path().segment(name)?))
}

pub(crate) fn tags() -> ApiRequest {
    ApiRequest::get(ApiPath::api().literal("tags"))
}

pub(crate) fn services() -> ApiRequest {
    ApiRequest::get(ApiPath::api().literal("services"))
}

pub(crate) fn service_health(service_id: &str) -> Request {
    Ok(ApiRequest::get(
        ApiPath::api()
            .literal("services")
            .segment(service_id)?
            .literal("current-health"),
    ))
}

pub(crate) fn search(query: &str) -> ApiRequest {
    ApiRequest::get(ApiPath::api().literal("search")).param("query", query)
}

pub(crate) fn search_is_enabled() -> ApiRequest {
    ApiRequest::get(ApiPath::api().literal("search").literal("isEnabled"))
}

pub(crate) fn search_in_branch(project_id: &str, branch_name: &str, query: &str) -> Request {
    Ok(ApiRequest::get(search_branch_path(project_id, branch_name)?).param("query", query))
}

pub(crate) fn reindex_branch(project_id: &str, branch_name: &str) -> Request {
    Ok(ApiRequest::new(
        Method::POST,
        search_branch_path(project_id, branch_name)?.literal("refresh"),
    ))
}

pub(crate) fn reindex_status(project_id: &str, branch_name: &str) -> Request {
    Ok(ApiRequest::get(
        search_branch_path(project_id, branch_name)?.literal("status"),
    ))
}
