//! Retrieval of the raw tabular payload.

use std::{future::Future, time::Duration};

use reqwest::{Client, header};

use crate::error::FetchError;

/// Bound on one payload request; there is no retry here — retries happen
/// only via the next scheduled or user-triggered sync.
const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// A source of raw payload bytes.
///
/// Implemented by [`HttpFetcher`] in production; tests substitute scripted
/// sources to drive the orchestrator.
pub trait FetchSource: Send + Sync {
  fn fetch(
    &self,
  ) -> impl Future<Output = Result<Vec<u8>, FetchError>> + Send + '_;
}

/// Fetches the published sheet over HTTP(S).
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct HttpFetcher {
  client: Client,
  url:    String,
}

impl HttpFetcher {
  pub fn new(url: impl Into<String>) -> Result<Self, FetchError> {
    let client = Client::builder().timeout(FETCH_TIMEOUT).build()?;
    Ok(Self {
      client,
      url: url.into(),
    })
  }
}

impl FetchSource for HttpFetcher {
  async fn fetch(&self) -> Result<Vec<u8>, FetchError> {
    // The sheet is republished in place, so ask intermediaries not to serve
    // a cached copy.
    let response = self
      .client
      .get(&self.url)
      .header(header::CACHE_CONTROL, "no-cache")
      .send()
      .await?;

    let status = response.status();
    if !status.is_success() {
      return Err(FetchError::Status(status.as_u16()));
    }

    Ok(response.bytes().await?.to_vec())
  }
}
