pub(crate) mod auth;
pub(crate) mod branches;
pub(crate) mod gateway;
pub(crate) mod groups;
pub(crate) mod projects;
pub(crate) mod search;
pub(crate) mod system;
pub(crate) mod users;
