use std::fmt;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::info;

pub const WIKI_BASE: &str = "https://es.wikipedia.org";
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Retrieval failure at the HTTP seam. The session loop decides which of
/// these are fatal; this module only classifies.
#[derive(Debug)]
pub enum FetchError {
    Timeout,
    Connection(reqwest::Error),
    BadStatus(StatusCode),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Timeout => write!(f, "request timed out after {FETCH_TIMEOUT:?}"),
            FetchError::Connection(e) => write!(f, "connection failed: {e}"),
            FetchError::BadStatus(status) => write!(f, "unexpected HTTP status {status}"),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::Connection(e) => Some(e),
            _ => None,
        }
    }
}

/// A retrieved page: raw markup plus the URL the redirect chain landed on.
pub struct FetchedPage {
    pub html: String,
    pub url: String,
}

/// Page retrieval contract used by the session loop. Tests substitute
/// scripted documents for the live client.
#[allow(async_fn_in_trait)]
pub trait Fetch {
    /// Resolve a place name to a page.
    async fn article(&self, place: &str) -> Result<FetchedPage, FetchError>;
    /// Fetch a concrete URL (disambiguation re-fetch).
    async fn page(&self, url: &str) -> Result<FetchedPage, FetchError>;
}

/// Live fetcher over a shared reqwest client with a fixed timeout.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    /// Try the direct article URL first; on a non-200 answer fall back to the
    /// search endpoint, keeping whatever page the redirect chain lands on.
    async fn article(&self, place: &str) -> Result<FetchedPage, FetchError> {
        let title = title_case(place).replace(' ', "_");
        let direct = format!("{WIKI_BASE}/wiki/{title}");

        match self.page(&direct).await {
            Ok(page) => Ok(page),
            Err(FetchError::BadStatus(status)) => {
                info!("No direct article for {place:?} ({status}), trying search");
                let resp = self
                    .client
                    .get(format!("{WIKI_BASE}/w/index.php"))
                    .query(&[("search", place)])
                    .send()
                    .await
                    .map_err(classify)?;
                if !resp.status().is_success() {
                    return Err(FetchError::BadStatus(resp.status()));
                }
                let url = resp.url().to_string();
                let html = resp.text().await.map_err(classify)?;
                Ok(FetchedPage { html, url })
            }
            Err(e) => Err(e),
        }
    }

    async fn page(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let resp = self.client.get(url).send().await.map_err(classify)?;
        if !resp.status().is_success() {
            return Err(FetchError::BadStatus(resp.status()));
        }
        let url = resp.url().to_string();
        let html = resp.text().await.map_err(classify)?;
        Ok(FetchedPage { html, url })
    }
}

fn classify(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Connection(e)
    }
}

/// Uppercase the first letter of each word, as the direct-article URL
/// convention expects ("mar del plata" → "Mar Del Plata").
pub fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(|c| c.to_lowercase()))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_per_word() {
        assert_eq!(title_case("mar del plata"), "Mar Del Plata");
        assert_eq!(title_case("MADRID"), "Madrid");
        assert_eq!(title_case("  córdoba  "), "Córdoba");
        assert_eq!(title_case(""), "");
    }
}
