use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("feed request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("feed returned HTTP {0}")]
    Status(reqwest::StatusCode),
    #[error("invalid OEM document: {0}")]
    Xml(#[from] quick_xml::DeError),
    #[error("feed file read error: {0}")]
    FileRead(#[from] std::io::Error),
}
