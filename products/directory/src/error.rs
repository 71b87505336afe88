use thiserror::Error;

/// Which provider endpoint a failure came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resource {
    Groups,
    Employees,
}

impl Resource {
    fn describe(&self) -> &'static str {
        match self {
            Resource::Groups => "employee groups",
            Resource::Employees => "employee data",
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.describe())
    }
}

/// Fetch failures. The display text is what the host shows in its error
/// panel, so it stays human readable.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("failed to load {resource} (HTTP {status})")]
    Status { resource: Resource, status: u16 },
    #[error("failed to load {resource}: {source}")]
    Transport {
        resource: Resource,
        #[source]
        source: reqwest::Error,
    },
    #[error("invalid provider base url: {0}")]
    BaseUrl(#[from] url::ParseError),
}

pub type DirectoryResult<T> = Result<T, DirectoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_errors_read_like_messages() {
        let err = DirectoryError::Status {
            resource: Resource::Employees,
            status: 503,
        };
        assert_eq!(err.to_string(), "failed to load employee data (HTTP 503)");
    }
}
