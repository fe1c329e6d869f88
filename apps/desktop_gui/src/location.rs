//! The application location: the URL the app was launched with, standing in
//! for the browser address bar.

use shared::protocol::AuthReturn;
use url::Url;

pub const DEFAULT_LAUNCH_URL: &str = "stryde://app/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppLocation {
    url: Url,
}

impl AppLocation {
    pub fn parse(raw: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            url: Url::parse(raw.trim())?,
        })
    }

    pub fn auth_return(&self) -> Option<AuthReturn> {
        AuthReturn::from_query_pairs(self.url.query_pairs())
    }

    /// Rewrites the location in place, dropping query and fragment. This is a
    /// history replacement, not a navigation.
    pub fn strip_query(&mut self) {
        self.url.set_query(None);
        self.url.set_fragment(None);
    }

    pub fn query(&self) -> Option<&str> {
        self.url.query()
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }
}

#[cfg(test)]
#[path = "tests/location_tests.rs"]
mod tests;
