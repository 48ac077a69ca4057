//! Union declarations loaded from JSON.
//!
//! ```json
//! { "types": ["String", "i64", "list<list<String>>"] }
//! ```
//!
//! Type names use the descriptor text form (see [`crate::descriptor::parse`]).
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::descriptor::TypeDescriptor;
use crate::error::{DescriptorParseError, UnionError};
use crate::union::Union;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("at JSON path {path} → {message}")]
    Json { path: String, message: String },
    #[error("type #{index} (`{name}`): {source}")]
    Descriptor {
        index: usize,
        name: String,
        #[source]
        source: DescriptorParseError,
    },
    #[error(transparent)]
    Union(#[from] UnionError),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnionConfig {
    /// Allowed types, in declaration order.
    pub types: Vec<String>,
}

impl UnionConfig {
    pub fn new<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { types: types.into_iter().map(Into::into).collect() }
    }

    pub fn from_json_str(src: &str) -> Result<Self, ConfigError> {
        from_str_with_path(src)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let src = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&src)
    }

    pub fn descriptors(&self) -> Result<Vec<TypeDescriptor>, ConfigError> {
        self.types
            .iter()
            .enumerate()
            .map(|(index, name)| {
                name.parse::<TypeDescriptor>().map_err(|source| ConfigError::Descriptor {
                    index,
                    name: name.clone(),
                    source,
                })
            })
            .collect()
    }

    pub fn build(&self) -> Result<Union, ConfigError> {
        Ok(Union::of_types(self.descriptors()?)?)
    }
}

/// Deserialize with JSON-path context in error messages.
fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T, ConfigError> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, T>(de).map_err(|err| ConfigError::Json {
        path: err.path().to_string(),
        message: err.into_inner().to_string(),
    })
}

// ------------------------------- Tests ------------------------------------ //
