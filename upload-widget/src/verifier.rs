use certs_core::model::{CertificationId, Verdict};
use error_stack::{Report, ResultExt};
use reqwest::{Client, Url};
use serde::Serialize;
use tracing::{debug, instrument};

/// Failures talking to the verification service. Local file problems never end up here.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum VerifyError {
    #[error("Could not reach the verification service. Please try again.")]
    Transport,
    #[error("The verification service sent a response that could not be read.")]
    MalformedResponse,
}

pub type VerifyResult<T> = Result<T, Report<VerifyError>>;

#[cfg_attr(test, mockall::automock)]
pub trait Verifier {
    fn verify(&self, id: CertificationId) -> impl Future<Output = VerifyResult<Verdict>> + Send;
}

#[derive(Serialize)]
struct VerifyBody<'a> {
    #[serde(rename = "certificationId")]
    certification_id: &'a str,
}

/// Calls the verification endpoint over HTTP.
///
/// Verdict bodies are read whatever the status code, since the service answers bad input
/// and store failures with a verdict too.
#[derive(Debug, Clone)]
pub struct HttpVerifier {
    client: Client,
    url: Url,
    api_key: Option<String>,
}

impl HttpVerifier {
    pub fn new(url: Url) -> Self {
        Self {
            client: Client::new(),
            url,
            api_key: None,
        }
    }

    /// Sent both as `apikey` and as a bearer token, which is what hosted function gateways
    /// in front of the service expect.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
}

impl Verifier for HttpVerifier {
    #[instrument(skip_all, fields(certification_id = %id, url = %self.url))]
    async fn verify(&self, id: CertificationId) -> VerifyResult<Verdict> {
        let mut request = self.client.post(self.url.clone()).json(&VerifyBody {
            certification_id: id.as_str(),
        });

        if let Some(api_key) = &self.api_key {
            request = request.header("apikey", api_key).bearer_auth(api_key);
        }

        let response = request.send().await.change_context(VerifyError::Transport)?;
        let status = response.status();
        debug!("verification service answered {status}");

        let body = response
            .bytes()
            .await
            .change_context(VerifyError::Transport)?;

        serde_json::from_slice(&body)
            .change_context(VerifyError::MalformedResponse)
            .attach_with(|| format!("status {status}, {} byte body", body.len()))
    }
}
