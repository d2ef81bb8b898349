use tracing::debug;

use super::session::AuthorizationSession;

pub(crate) const HOME_ROUTE: &str = "/home";

pub(crate) trait Router {
    fn navigate(&mut self, commands: &[&str]) -> anyhow::Result<()>;
}

/// Remembers where the login flow sent the user.
#[derive(Default)]
pub(crate) struct CliRouter {
    history: Vec<String>,
}

impl CliRouter {
    pub(crate) fn current(&self) -> Option<&str> {
        self.history.last().map(String::as_str)
    }
}

impl Router for CliRouter {
    fn navigate(&mut self, commands: &[&str]) -> anyhow::Result<()> {
        let route = commands.join("/");
        debug!(route = %route, "navigate");
        self.history.push(route);
        Ok(())
    }
}

pub(crate) struct LoginPage<'a, A: AuthorizationSession + ?Sized> {
    authorization: &'a mut A,
}

impl<'a, A: AuthorizationSession + ?Sized> LoginPage<'a, A> {
    /// Starts sign-in when there is no session, otherwise goes home.
    pub(crate) fn new<R: Router + ?Sized>(
        authorization: &'a mut A,
        router: &mut R,
    ) -> anyhow::Result<Self> {
        if !authorization.user_is_signed_in()? {
            authorization.init_implicit_flow()?;
        } else {
            router.navigate(&[HOME_ROUTE])?;
        }
        Ok(Self { authorization })
    }

    pub(crate) fn on_init(&mut self) -> anyhow::Result<()> {
        self.authorization.process_redirect()
    }
}
