use std::fmt;
use std::str::FromStr;

use crate::Error;

/// One of the six namespaces a named input value can be read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    /// Query-string parameters (`?name=value`)
    Query,
    /// Posted form fields (`application/x-www-form-urlencoded` body)
    Form,
    /// Form fields with query-string fallback
    Request,
    /// Cookies sent with the request
    Cookie,
    /// Server metadata such as `REMOTE_ADDR` or `SERVER_ADMIN`
    Server,
    /// Process environment variables
    Env,
}

impl InputSource {
    /// All sources, in a stable order.
    pub const ALL: [InputSource; 6] = [
        InputSource::Query,
        InputSource::Form,
        InputSource::Request,
        InputSource::Cookie,
        InputSource::Server,
        InputSource::Env,
    ];

    /// Short lowercase name, also accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            InputSource::Query => "query",
            InputSource::Form => "form",
            InputSource::Request => "request",
            InputSource::Cookie => "cookie",
            InputSource::Server => "server",
            InputSource::Env => "env",
        }
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InputSource {
    type Err = Error;

    /// Parses a source name. `get` and `post` are accepted as aliases for
    /// `query` and `form`. Matching is case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "query" | "get" => Ok(InputSource::Query),
            "form" | "post" => Ok(InputSource::Form),
            "request" => Ok(InputSource::Request),
            "cookie" => Ok(InputSource::Cookie),
            "server" => Ok(InputSource::Server),
            "env" => Ok(InputSource::Env),
            _ => Err(Error::UnknownSource(s.to_string())),
        }
    }
}
