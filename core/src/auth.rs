// Bearer token lookup

/// Name of the client-side storage entry holding the bearer token
pub const AUTH_TOKEN_KEY: &str = "authToken";

/// Source of the bearer token attached to outgoing requests.
///
/// The client asks the provider on every request and never caches the
/// answer, so a token stored (or cleared) between two calls is picked up
/// by the second one.
pub trait TokenProvider {
    /// Current token, or `None` when the user is not signed in.
    fn token(&self) -> Option<String>;
}

/// Provider for anonymous clients
#[derive(Debug, Clone, Copy, Default)]
pub struct NoToken;

impl TokenProvider for NoToken {
    fn token(&self) -> Option<String> {
        None
    }
}

/// Provider returning a fixed token
#[derive(Debug, Clone)]
pub struct StaticToken(pub String);

impl TokenProvider for StaticToken {
    fn token(&self) -> Option<String> {
        non_empty(Some(self.0.clone()))
    }
}

impl<F> TokenProvider for F
where
    F: Fn() -> Option<String>,
{
    fn token(&self) -> Option<String> {
        non_empty(self())
    }
}

/// An empty stored token means "signed out".
pub fn non_empty(token: Option<String>) -> Option<String> {
    token.filter(|t| !t.is_empty())
}
