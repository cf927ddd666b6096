//! Where the raw employee JSON comes from.

use std::fmt;
use std::path::PathBuf;

use crate::errors::AppError;

/// Location of the employee JSON document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    File(PathBuf),
    Http(String),
}

impl DataSource {
    /// URLs with an http(s) scheme are fetched over HTTP, anything else is a path.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.starts_with("http://") || value.starts_with("https://") {
            DataSource::Http(value.to_string())
        } else {
            DataSource::File(PathBuf::from(value))
        }
    }

    /// Fetch the whole document.
    pub async fn fetch(&self, client: &reqwest::Client) -> Result<Vec<u8>, AppError> {
        match self {
            DataSource::File(path) => Ok(tokio::fs::read(path).await?),
            DataSource::Http(url) => {
                let response = client.get(url).send().await?.error_for_status()?;
                Ok(response.bytes().await?.to_vec())
            }
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::File(path) => write!(f, "{}", path.display()),
            DataSource::Http(url) => write!(f, "{}", url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_source() {
        assert_eq!(
            DataSource::parse("https://example.com/data/employees.json"),
            DataSource::Http("https://example.com/data/employees.json".to_string())
        );
        assert_eq!(
            DataSource::parse("./data/employees.json"),
            DataSource::File(PathBuf::from("./data/employees.json"))
        );
    }
}
