//! Read-only grid-square lookup table keyed by region.

use std::{fs::File, io::BufReader, io::Read, path::Path};

use hashbrown::{HashMap, HashSet};
use thiserror::Error;
use tracing::debug;

use crate::types::{AREA_TOKEN_LEN, REGION_KEY_LEN, RegionKey, region_key_of};

/// Failure to build or load an [`AreaLookupTable`].
#[derive(Debug, Error)]
pub enum TableError {
    /// The table file could not be read.
    #[error("reading area table: {0}")]
    Io(#[from] std::io::Error),
    /// The table file is not a region → tokens JSON object.
    #[error("decoding area table: {0}")]
    Json(#[from] serde_json::Error),
    /// A token is not five ASCII letters or digits.
    #[error("invalid area token {0:?}")]
    InvalidToken(String),
    /// A token is listed under a region it does not end with.
    #[error("area token {token:?} listed under region {region:?}")]
    RegionMismatch {
        /// Region the token was listed under.
        region: String,
        /// Offending token.
        token: String,
    },
    /// A loaded table holds no tokens at all.
    #[error("area table is empty")]
    Empty,
}

/// Region key → set of valid five-character area tokens ending in that key.
///
/// Built once and never mutated afterwards; share it with `Arc` across
/// threads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AreaLookupTable {
    regions: HashMap<RegionKey, HashSet<String>>,
    len: usize,
}

impl AreaLookupTable {
    /// Groups `tokens` by their region-key suffix.
    ///
    /// Tokens are trimmed and upper-cased first; anything that is not five
    /// ASCII alphanumerics is rejected.
    pub fn from_tokens<I, S>(tokens: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = Self::default();
        for token in tokens {
            let token = normalize_token(token.as_ref())?;
            table.insert(token);
        }
        Ok(table)
    }

    /// Builds a table from an explicit region → tokens mapping, checking that
    /// every token ends with the region it is listed under.
    pub fn from_regions<I, K, T, S>(regions: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = (K, T)>,
        K: AsRef<str>,
        T: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = Self::default();
        for (region, tokens) in regions {
            let region = region.as_ref().trim().to_uppercase();
            for token in tokens {
                let token = normalize_token(token.as_ref())?;
                if region_key_of(&token) != Some(region.as_str()) {
                    return Err(TableError::RegionMismatch { region, token });
                }
                table.insert(token);
            }
        }
        Ok(table)
    }

    /// Decodes a `{"<region>": ["<token>", ...]}` JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, TableError> {
        let raw: HashMap<String, Vec<String>> = serde_json::from_str(json)?;
        Self::from_regions(raw)?.non_empty()
    }

    /// Decodes the JSON table format from a reader.
    pub fn from_json_reader(reader: impl Read) -> Result<Self, TableError> {
        let raw: HashMap<String, Vec<String>> = serde_json::from_reader(reader)?;
        Self::from_regions(raw)?.non_empty()
    }

    /// Loads the JSON table bundled with a deployment.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let path = path.as_ref();
        let table = Self::from_json_reader(BufReader::new(File::open(path)?))?;
        debug!(
            path = %path.display(),
            regions = table.regions.len(),
            tokens = table.len,
            "loaded area table"
        );
        Ok(table)
    }

    /// Tokens registered under `region`, if that region exists.
    pub fn region(&self, region: &str) -> Option<&HashSet<String>> {
        self.regions.get(region)
    }

    /// True when `region` is a known region key.
    pub fn has_region(&self, region: &str) -> bool {
        self.regions.contains_key(region)
    }

    /// True when `token` is a valid area.
    pub fn contains(&self, token: &str) -> bool {
        region_key_of(token)
            .and_then(|key| self.regions.get(key))
            .is_some_and(|set| set.contains(token))
    }

    /// Known region keys, sorted.
    pub fn regions(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.regions.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Number of area tokens.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when no token is registered.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn insert(&mut self, token: String) {
        let key = token[AREA_TOKEN_LEN - REGION_KEY_LEN..].to_string();
        if self.regions.entry(key).or_default().insert(token) {
            self.len += 1;
        }
    }

    fn non_empty(self) -> Result<Self, TableError> {
        if self.is_empty() {
            return Err(TableError::Empty);
        }
        Ok(self)
    }
}

fn normalize_token(raw: &str) -> Result<String, TableError> {
    let token = raw.trim().to_uppercase();
    if token.len() != AREA_TOKEN_LEN || !token.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return Err(TableError::InvalidToken(raw.to_string()));
    }
    Ok(token)
}
