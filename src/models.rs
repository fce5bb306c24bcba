// Core data models for wordfuzz

use std::collections::HashSet;
use std::fmt;
use std::time::Duration;

/// Token replaced by each candidate word in the URL and body templates.
pub const PLACEHOLDER: &str = "FUZZ";

/// User-Agent sent with every request.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Per-request upper bound.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(3);

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// One word from the wordlist.
pub type Job = String;

/// HTTP methods the fuzzer issues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    GET,
    POST,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::GET => write!(f, "GET"),
            Method::POST => write!(f, "POST"),
        }
    }
}

/// Responses the user asked to suppress.
///
/// An empty set means no filtering on that dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    /// Compared against the status code's decimal string form.
    pub excluded_status_codes: HashSet<String>,
    /// Compared against the body length in bytes.
    pub excluded_sizes: HashSet<usize>,
}

impl FilterSet {
    pub fn new<C, S>(codes: C, sizes: S) -> Self
    where
        C: IntoIterator,
        C::Item: Into<String>,
        S: IntoIterator<Item = usize>,
    {
        Self {
            excluded_status_codes: codes.into_iter().map(Into::into).collect(),
            excluded_sizes: sizes.into_iter().collect(),
        }
    }

    pub fn excludes_status(&self, status: u16) -> bool {
        self.excluded_status_codes.contains(&status.to_string())
    }

    pub fn excludes_size(&self, size: usize) -> bool {
        self.excluded_sizes.contains(&size)
    }
}

/// URL and optional body templates shared by every request of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSpec {
    pub url_template: String,
    pub body_template: Option<String>,
}

impl RequestSpec {
    pub fn new(url_template: impl Into<String>, body_template: Option<String>) -> Self {
        Self {
            url_template: url_template.into(),
            body_template,
        }
    }

    /// GET without a body template, POST with one.
    pub fn method(&self) -> Method {
        if self.body_template.is_some() {
            Method::POST
        } else {
            Method::GET
        }
    }

    /// Substitute every placeholder occurrence with `word`.
    pub fn render(&self, word: &str) -> RenderedRequest {
        RenderedRequest {
            method: self.method(),
            url: self.url_template.replace(PLACEHOLDER, word),
            body: self
                .body_template
                .as_ref()
                .map(|body| body.replace(PLACEHOLDER, word)),
        }
    }
}

/// A request ready to be sent for one word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<String>,
}

/// What the classifier needs to know about a completed response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseDescriptor {
    pub status: u16,
    pub body_len: usize,
    pub location: Option<String>,
}
