mod actions;
pub(crate) mod args;
mod login;
mod session;
mod storage;

pub(crate) use actions::{handle_login_command, handle_logout};
pub(crate) use storage::{load_id_token, KeyringStorage, MemoryStorage, SessionStorage};
#[cfg(test)]
pub(crate) use storage::{EXPIRATION, ID_TOKEN, ID_TOKEN_NONCE, LOGIN_STATE};
