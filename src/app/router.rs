// ABOUTME: Route names, string route parameters and the navigation history stack

use std::fmt;
use std::str::FromStr;
use url::form_urlencoded;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Carousel,
    SignUp,
    VerifyOtp,
    CreatePassword,
    ForgotPassword,
    ResetPassword,
    Login,
    BusinessClassification,
    ContactPerson,
    AcceptTerms,
    AccountReady,
}

impl Route {
    pub fn all() -> &'static [Route] {
        &[
            Self::Carousel,
            Self::SignUp,
            Self::VerifyOtp,
            Self::CreatePassword,
            Self::ForgotPassword,
            Self::ResetPassword,
            Self::Login,
            Self::BusinessClassification,
            Self::ContactPerson,
            Self::AcceptTerms,
            Self::AccountReady,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Carousel => "carousel",
            Self::SignUp => "sign-up",
            Self::VerifyOtp => "verify-otp",
            Self::CreatePassword => "create-password",
            Self::ForgotPassword => "forgot-password",
            Self::ResetPassword => "reset-password",
            Self::Login => "login",
            Self::BusinessClassification => "business-classification",
            Self::ContactPerson => "contact-person",
            Self::AcceptTerms => "accept-terms",
            Self::AccountReady => "account-ready",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Route {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|r| r.name() == s.trim())
            .ok_or_else(|| format!("Unknown route: {s}"))
    }
}

/// Ordered key/value parameters passed between screens.
///
/// Values are kept percent-encoded, the way they would travel in a deep link,
/// and decoded on read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams {
    entries: Vec<(String, String)>,
}

impl RouteParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`RouteParams::insert`]
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace a value
    pub fn insert(&mut self, key: &str, value: &str) {
        let encoded: String = form_urlencoded::byte_serialize(value.as_bytes()).collect();
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = encoded,
            None => self.entries.push((key.to_string(), encoded)),
        }
    }

    /// Decoded value; `None` when absent or empty
    pub fn get(&self, key: &str) -> Option<String> {
        self.raw(key)
            .map(decode)
            .filter(|value| !value.is_empty())
    }

    /// Encoded value as stored
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Copy the listed keys that are present into a fresh parameter set
    pub fn forward(&self, keys: &[&str]) -> Self {
        let entries = keys
            .iter()
            .filter_map(|key| {
                self.raw(key)
                    .map(|value| ((*key).to_string(), value.to_string()))
            })
            .collect();
        Self { entries }
    }
}

fn decode(encoded: &str) -> String {
    form_urlencoded::parse(encoded.as_bytes())
        .next()
        .map(|(value, _)| value.into_owned())
        .unwrap_or_default()
}

/// History stack; the last entry is the visible screen
#[derive(Debug, Clone)]
pub struct Router {
    history: Vec<(Route, RouteParams)>,
}

impl Router {
    pub fn new(root: Route, params: RouteParams) -> Self {
        Self {
            history: vec![(root, params)],
        }
    }

    pub fn current(&self) -> (Route, &RouteParams) {
        // History is never empty: go_back refuses to pop the root
        let (route, params) = &self.history[self.history.len() - 1];
        (*route, params)
    }

    pub fn navigate(&mut self, route: Route, params: RouteParams) {
        self.history.push((route, params));
    }

    /// Pop the current screen; false when already at the root
    pub fn go_back(&mut self) -> bool {
        if self.history.len() <= 1 {
            return false;
        }
        self.history.pop();
        true
    }

    /// Drop all history and start again at `route`
    pub fn reset(&mut self, route: Route) {
        self.history = vec![(route, RouteParams::new())];
    }

    pub fn depth(&self) -> usize {
        self.history.len()
    }

    pub fn trail(&self) -> impl Iterator<Item = Route> + '_ {
        self.history.iter().map(|(route, _)| *route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_route_names_parse_back() {
        for route in Route::all() {
            assert_eq!(route.name().parse::<Route>(), Ok(*route));
        }
        assert!("loading-screen".parse::<Route>().is_err());
    }

    #[test]
    fn test_params_are_stored_encoded() {
        let params = RouteParams::new()
            .with("email", "ada+ops@example.com")
            .with("firstName", "Ada Lovelace");

        assert_eq!(params.raw("email"), Some("ada%2Bops%40example.com"));
        assert_eq!(params.get("email").as_deref(), Some("ada+ops@example.com"));
        assert_eq!(params.get("firstName").as_deref(), Some("Ada Lovelace"));
        assert_eq!(params.get("phone"), None);
    }

    #[test]
    fn test_empty_value_reads_as_missing() {
        let params = RouteParams::new().with("token", "");
        assert_eq!(params.get("token"), None);
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_insert_replaces_existing_key() {
        let mut params = RouteParams::new().with("email", "a@b.co");
        params.insert("email", "c@d.co");
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("email").as_deref(), Some("c@d.co"));
    }

    #[test]
    fn test_forward_copies_only_listed_keys() {
        let params = RouteParams::new()
            .with("email", "a@b.co")
            .with("token", "secret");
        let forwarded = params.forward(&["email", "phone"]);
        assert_eq!(forwarded.len(), 1);
        assert_eq!(forwarded.get("email").as_deref(), Some("a@b.co"));
    }

    #[test]
    fn test_router_never_pops_root() {
        let mut router = Router::new(Route::Carousel, RouteParams::new());
        assert!(!router.go_back());
        router.navigate(Route::SignUp, RouteParams::new());
        router.navigate(Route::VerifyOtp, RouteParams::new().with("email", "a@b.co"));
        assert_eq!(router.current().0, Route::VerifyOtp);
        assert!(router.go_back());
        assert_eq!(router.current().0, Route::SignUp);
        assert_eq!(router.depth(), 2);
        router.reset(Route::Login);
        assert_eq!(router.trail().collect::<Vec<_>>(), vec![Route::Login]);
    }
}
