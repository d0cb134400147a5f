use crate::cache::CacheError;
use crate::types::version::VersionError;
use std::fmt::{Display, Formatter};

/// Errors raised at the fallible edges of the explorer: loading documents,
/// loading configuration and switching versions.
///
/// Curl synthesis and rendering never fail; malformed documents are filtered
/// out by [`crate::curl::requirements_met`] instead.
#[derive(Debug)]
pub enum ExplorerError {
    InvalidJson(String),
    FileRead(String, String),
    UnsupportedSpecVersion(String),
    FieldMissing(String),
    InvalidConfig(String),
    VersionNotFound(String, String),
    Registry(CacheError),
}

impl ExplorerError {
    pub(crate) fn invalid_json<T>(error: &T) -> Self
    where
        T: ToString + ?Sized,
    {
        ExplorerError::InvalidJson(error.to_string())
    }

    pub(crate) fn file_read<P, E>(path: &P, error: &E) -> Self
    where
        P: ToString + ?Sized,
        E: ToString + ?Sized,
    {
        ExplorerError::FileRead(path.to_string(), error.to_string())
    }

    pub(crate) fn invalid_config<T>(message: &T) -> Self
    where
        T: ToString + ?Sized,
    {
        ExplorerError::InvalidConfig(message.to_string())
    }

    pub(crate) fn version_not_found<A, V>(api: &A, version: &V) -> Self
    where
        A: ToString + ?Sized,
        V: ToString + ?Sized,
    {
        ExplorerError::VersionNotFound(api.to_string(), version.to_string())
    }
}

impl Display for ExplorerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ExplorerError::InvalidJson(msg) => write!(f, "Invalid JSON: {}", msg),
            ExplorerError::FileRead(path, msg) => {
                write!(f, "Failed to read {} with error: {}", path, msg)
            }
            ExplorerError::UnsupportedSpecVersion(version) => {
                write!(f, "Unsupported specification version: {}", version)
            }
            ExplorerError::FieldMissing(field) => write!(f, "Field {} expected", field),
            ExplorerError::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            ExplorerError::VersionNotFound(api, version) => {
                write!(f, "Version {} of {} is not loaded", version, api)
            }
            ExplorerError::Registry(err) => write!(f, "Registry error: {}", err),
        }
    }
}

impl std::error::Error for ExplorerError {}

impl From<VersionError> for ExplorerError {
    fn from(value: VersionError) -> Self {
        match value {
            VersionError::UnsupportedVersion(version) => {
                ExplorerError::UnsupportedSpecVersion(version)
            }
            VersionError::MissingDiscriminator => {
                ExplorerError::FieldMissing("swagger/openapi".to_string())
            }
        }
    }
}

impl From<CacheError> for ExplorerError {
    fn from(value: CacheError) -> Self {
        ExplorerError::Registry(value)
    }
}

impl PartialEq for ExplorerError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (ExplorerError::InvalidJson(_), ExplorerError::InvalidJson(_))
                | (ExplorerError::FileRead(_, _), ExplorerError::FileRead(_, _))
                | (
                    ExplorerError::UnsupportedSpecVersion(_),
                    ExplorerError::UnsupportedSpecVersion(_)
                )
                | (ExplorerError::FieldMissing(_), ExplorerError::FieldMissing(_))
                | (ExplorerError::InvalidConfig(_), ExplorerError::InvalidConfig(_))
                | (
                    ExplorerError::VersionNotFound(_, _),
                    ExplorerError::VersionNotFound(_, _)
                )
                | (ExplorerError::Registry(_), ExplorerError::Registry(_))
        )
    }
}
