//! Remote sources for the shipped static data file.

use reqwest::header::CACHE_CONTROL;
use reqwest::Client;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::ErrorKind;
use std::path::PathBuf;
use std::time::Duration;

/// Default relative location of the static data file.
pub const DEFAULT_DATA_SOURCE: &str = "data/portfolio.json";

/// Transport-level response of a source fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    /// HTTP status, or the equivalent for non-HTTP sources.
    pub status: u16,
    pub body: String,
}

impl FetchResponse {
    /// Whether the fetch counts as an OK response.
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport failure before any response was produced.
#[derive(Debug)]
pub enum SourceError {
    Http(reqwest::Error),
    Io(std::io::Error),
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http(err) => write!(f, "http transport failed: {err}"),
            Self::Io(err) => write!(f, "file read failed: {err}"),
        }
    }
}

impl Error for SourceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Http(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<reqwest::Error> for SourceError {
    fn from(value: reqwest::Error) -> Self {
        Self::Http(value)
    }
}

impl From<std::io::Error> for SourceError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Where the shipped baseline document comes from.
#[allow(async_fn_in_trait)]
pub trait RemoteSource {
    /// Short location label for logs.
    fn location(&self) -> String;
    /// Fetches the raw document text.
    async fn fetch(&self) -> Result<FetchResponse, SourceError>;
}

/// Static data file served over HTTP, fetched with caching disabled.
pub struct HttpSource {
    client: Client,
    url: String,
}

impl HttpSource {
    /// Builds a source for `url`. `timeout` bounds the whole request.
    pub fn new(url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, SourceError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            url: url.into(),
        })
    }
}

impl RemoteSource for HttpSource {
    fn location(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<FetchResponse, SourceError> {
        let response = self
            .client
            .get(&self.url)
            .header(CACHE_CONTROL, "no-cache")
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(FetchResponse { status, body })
    }
}

/// Static data file on the local filesystem.
///
/// A missing file is reported as status `404`, like a web server would.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RemoteSource for FileSource {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<FetchResponse, SourceError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(body) => Ok(FetchResponse { status: 200, body }),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(FetchResponse {
                status: 404,
                body: String::new(),
            }),
            Err(err) => Err(err.into()),
        }
    }
}

/// Source selected from a configured location string.
pub enum DataSource {
    Http(HttpSource),
    File(FileSource),
}

impl DataSource {
    /// `http://` / `https://` locations use HTTP; anything else is a path.
    pub fn from_location(location: &str, timeout: Option<Duration>) -> Result<Self, SourceError> {
        let trimmed = location.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            return Ok(Self::Http(HttpSource::new(trimmed, timeout)?));
        }
        Ok(Self::File(FileSource::new(trimmed)))
    }
}

impl RemoteSource for DataSource {
    fn location(&self) -> String {
        match self {
            Self::Http(source) => source.location(),
            Self::File(source) => source.location(),
        }
    }

    async fn fetch(&self) -> Result<FetchResponse, SourceError> {
        match self {
            Self::Http(source) => source.fetch().await,
            Self::File(source) => source.fetch().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DataSource, FileSource, RemoteSource};

    #[tokio::test]
    async fn missing_file_maps_to_not_found_status() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSource::new(dir.path().join("absent.json"));
        let response = source.fetch().await.unwrap();
        assert_eq!(response.status, 404);
        assert!(!response.is_ok());
    }

    #[tokio::test]
    async fn existing_file_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("portfolio.json");
        std::fs::write(&path, "{}").unwrap();
        let response = FileSource::new(&path).fetch().await.unwrap();
        assert!(response.is_ok());
        assert_eq!(response.body, "{}");
    }

    #[test]
    fn from_location_picks_transport_by_scheme() {
        let http = DataSource::from_location("HTTPS://example.org/data.json", None).unwrap();
        assert!(matches!(http, DataSource::Http(_)));
        let file = DataSource::from_location("data/portfolio.json", None).unwrap();
        assert!(matches!(file, DataSource::File(_)));
        assert_eq!(file.location(), "data/portfolio.json");
    }
}
