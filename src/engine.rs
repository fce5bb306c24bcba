// Async HTTP engine for wordfuzz
// Sends one request per word and reports what came back

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, LOCATION};
use reqwest::{redirect, Client};

use crate::error::{FuzzError, TransportError};
use crate::models::{
    Method, RenderedRequest, ResponseDescriptor, FORM_CONTENT_TYPE, REQUEST_TIMEOUT, USER_AGENT,
};

/// Outcome of sending one request.
pub type ExecutionOutcome = Result<ResponseDescriptor, TransportError>;

/// Sends a rendered request. Touches no shared state.
#[async_trait]
pub trait RequestExecutor: Send + Sync {
    async fn execute(&self, request: &RenderedRequest) -> ExecutionOutcome;
}

/// reqwest-backed executor: redirects are never followed.
pub struct HttpExecutor {
    pub client: Client,
}

impl HttpExecutor {
    pub fn new() -> Result<Self, FuzzError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .redirect(redirect::Policy::none())
            .pool_max_idle_per_host(10)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl RequestExecutor for HttpExecutor {
    async fn execute(&self, request: &RenderedRequest) -> ExecutionOutcome {
        let req = match (request.method, &request.body) {
            (Method::POST, Some(body)) => self
                .client
                .post(&request.url)
                .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
                .body(body.clone()),
            (Method::POST, None) => self
                .client
                .post(&request.url)
                .header(CONTENT_TYPE, FORM_CONTENT_TYPE),
            (Method::GET, _) => self.client.get(&request.url),
        };

        let resp = req.send().await?;
        let status = resp.status().as_u16();
        let location = resp
            .headers()
            .get(LOCATION)
            .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned());
        let body = resp.bytes().await?;

        Ok(ResponseDescriptor {
            status,
            body_len: body.len(),
            location,
        })
    }
}
