//! Where book records are requested from.

use std::str::FromStr;

const DEVELOPMENT_URL: &str = "http://localhost:8000";
const PRODUCTION_URL: &str = "https://isbn-backend.fly.dev";

/// Deployment environment of the book service.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Environment {
    /// A service running on the local machine.
    Development,
    /// The hosted service.
    #[default]
    Production,
}

impl Environment {
    /// Base URL of the book service in this environment.
    #[must_use]
    pub const fn base_url(self) -> &'static str {
        match self {
            Self::Development => DEVELOPMENT_URL,
            Self::Production => PRODUCTION_URL,
        }
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(format!(
                "unknown environment '{s}', expected 'development' or 'production'"
            )),
        }
    }
}

/// The book service endpoint, used to build the URL for each identifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
    base: String,
}

impl Endpoint {
    /// Creates an endpoint with a custom base URL, a trailing `/` is ignored.
    pub fn new<S: Into<String>>(base: S) -> Self {
        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self { base }
    }

    /// The endpoint of the service deployed in `env`.
    #[must_use]
    pub fn for_environment(env: Environment) -> Self {
        Self::new(env.base_url())
    }

    /// Base URL without a trailing `/`.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// URL of the book record for `identifier`.
    ///
    /// The identifier is not validated, only percent-encoded so it stays a single path segment.
    #[must_use]
    pub fn book_url(&self, identifier: &str) -> String {
        format!(
            "{}/api/books/{}/",
            self.base,
            urlencoding::encode(identifier)
        )
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

#[cfg(test)]
mod tests {
    use super::{Endpoint, Environment};

    #[test]
    fn book_url_is_templated_with_identifier() {
        let endpoint = Endpoint::for_environment(Environment::Production);
        assert_eq!(
            "https://isbn-backend.fly.dev/api/books/9780441013593/",
            endpoint.book_url("9780441013593")
        );
    }

    #[test]
    fn development_uses_local_service() {
        let endpoint = Endpoint::for_environment(Environment::Development);
        assert_eq!(
            "http://localhost:8000/api/books/0441013597/",
            endpoint.book_url("0441013597")
        );
    }

    #[test]
    fn trailing_slash_on_base_is_ignored() {
        let endpoint = Endpoint::new("http://books.test//");
        assert_eq!("http://books.test", endpoint.base());
        assert_eq!("http://books.test/api/books/1/", endpoint.book_url("1"));
    }

    #[test]
    fn identifier_is_forwarded_as_a_single_segment() {
        let endpoint = Endpoint::new("http://books.test");
        assert_eq!(
            "http://books.test/api/books/978%2F0%20441/",
            endpoint.book_url("978/0 441")
        );
    }

    #[test]
    fn environment_parses_short_and_long_names() {
        assert_eq!(Ok(Environment::Development), "dev".parse::<Environment>());
        assert_eq!(Ok(Environment::Production), "Production".parse::<Environment>());
        assert_eq!(
            Err("unknown environment 'staging', expected 'development' or 'production'".to_owned()),
            "staging".parse::<Environment>()
        );
    }
}
