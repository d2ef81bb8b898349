use std::sync::Arc;

use url::Url;

use super::login::{CliRouter, LoginPage, HOME_ROUTE};
use super::session::{AuthorizationSession, ImplicitFlowSession};
use super::storage::SessionStorage;
use crate::cli_args::*;
use crate::modules::system::{resolve_context_name, CliConfig};

pub(crate) fn handle_login_command<F>(
    args: LoginArgs,
    context_arg: Option<String>,
    config: &mut CliConfig,
    open_storage: F,
) -> anyhow::Result<()>
where
    F: FnOnce(&str) -> Arc<dyn SessionStorage>,
{
    let context_name = resolve_context_name(args.context.or(context_arg), config);
    let context = config
        .contexts
        .get(&context_name)
        .ok_or_else(|| anyhow::anyhow!("context not found: {}", context_name))?;
    let settings = context.auth.clone().ok_or_else(|| {
        anyhow::anyhow!(
            "sign-in is not configured for context '{0}'; run `bibliotheca config set-context {0} --client-id <id>`",
            context_name
        )
    })?;
    let location = args.redirect_url.as_deref().map(Url::parse).transpose()?;

    let mut session =
        ImplicitFlowSession::new(settings, open_storage(&context_name)).with_location(location);
    let mut router = CliRouter::default();
    LoginPage::new(&mut session, &mut router)?.on_init()?;

    if router.current() == Some(HOME_ROUTE) {
        println!("Already signed in");
    } else if let Some(target) = session.redirect_target() {
        println!("Open this URL in a browser to sign in:");
        println!("{target}");
        println!("Then run `bibliotheca login --redirect-url '<address you were sent back to>'`");
    } else if session.user_is_signed_in()? {
        println!("Signed in");
    }
    config.current_context = Some(context_name);
    Ok(())
}

pub(crate) fn handle_logout<F>(
    args: LogoutArgs,
    context_arg: Option<String>,
    config: &CliConfig,
    open_storage: F,
) -> anyhow::Result<()>
where
    F: FnOnce(&str) -> Arc<dyn SessionStorage>,
{
    let context_name = resolve_context_name(args.context.or(context_arg), config);
    let Some(context) = config.contexts.get(&context_name) else {
        anyhow::bail!("context not found: {}", context_name);
    };
    let settings = context.auth.clone().unwrap_or_default();
    ImplicitFlowSession::new(settings, open_storage(&context_name)).sign_out()?;
    println!("Logged out");
    Ok(())
}
