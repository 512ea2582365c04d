use std::path::PathBuf;
use std::time::Duration;

use crate::feed::error::FeedError;
use crate::feed::oem::OemDocument;

pub const DEFAULT_FEED_URL: &str =
    "https://nasa-public-data.s3.amazonaws.com/iss-coords/current/ISS_OEM/ISS.OEM_J2K_EPH.xml";

pub struct FeedClient {
    http: reqwest::Client,
    url: String,
}

impl FeedClient {
    pub fn new(url: String, timeout: Duration) -> Result<Self, FeedError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, url })
    }

    pub async fn fetch(&self) -> Result<OemDocument, FeedError> {
        log::debug!("Fetching OEM feed from {}", self.url);
        let response = self.http.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status));
        }
        let body = response.text().await?;
        OemDocument::from_xml(&body)
    }
}

/// Where the trajectory document comes from. Every fetch goes back to the
/// source; nothing is cached between calls.
pub enum FeedSource {
    Remote(FeedClient),
    File(PathBuf),
}

impl FeedSource {
    pub async fn fetch(&self) -> Result<OemDocument, FeedError> {
        let document = match self {
            FeedSource::Remote(client) => client.fetch().await?,
            FeedSource::File(path) => {
                let xml = tokio::fs::read_to_string(path).await?;
                OemDocument::from_xml(&xml)?
            }
        };
        log::info!(
            "Loaded {} state vectors ({} to {})",
            document.state_vectors.len(),
            document.metadata.start_time,
            document.metadata.stop_time
        );
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_source() {
        let source = FeedSource::File(PathBuf::from(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/tests/fixtures/ISS.OEM_J2K_EPH.xml"
        )));
        let document = source.fetch().await.unwrap();
        assert_eq!(document.state_vectors.len(), 4);
    }

    #[tokio::test]
    async fn test_missing_file() {
        let source = FeedSource::File(PathBuf::from("/nonexistent/ISS.OEM_J2K_EPH.xml"));
        assert!(matches!(
            source.fetch().await,
            Err(FeedError::FileRead(_))
        ));
    }
}
