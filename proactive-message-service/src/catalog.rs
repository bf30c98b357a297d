//! Alternative gemstones offered to shoppers when their first choice is not
//! available.
//!
//! The catalog is loaded once at startup and then only read. Field names on the
//! wire stay in Polish because the prompt embeds the serialized list verbatim
//! and the storefront copy is written against them.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Catalog must list at least one gemstone")]
    Empty,

    #[error("Gemstone at position {0} has a blank name")]
    BlankName(usize),
}

/// One alternative the assistant may suggest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gemstone {
    #[serde(rename = "nazwa_kamienia")]
    pub name: String,
    /// Final shelf price in PLN, setting included.
    #[serde(rename = "cena_koncowa_pln")]
    pub final_price_pln: u32,
}

impl Gemstone {
    pub fn new(name: impl Into<String>, final_price_pln: u32) -> Self {
        Self {
            name: name.into(),
            final_price_pln,
        }
    }
}

/// Ordered, validated list of gemstones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    stones: Vec<Gemstone>,
}

impl Catalog {
    pub fn new(stones: Vec<Gemstone>) -> Result<Self, CatalogError> {
        if stones.is_empty() {
            return Err(CatalogError::Empty);
        }
        if let Some(index) = stones.iter().position(|s| s.name.trim().is_empty()) {
            return Err(CatalogError::BlankName(index));
        }
        Ok(Self { stones })
    }

    /// The list the shop launched the assistant with.
    pub fn built_in() -> Self {
        Self {
            stones: vec![
                Gemstone::new("Granat", 290),
                Gemstone::new("Cytryn", 290),
                Gemstone::new("Ametyst", 290),
                Gemstone::new("Topaz Sky Blue", 290),
                Gemstone::new("Topaz London Blue", 340),
                Gemstone::new("Topaz Swiss Blue", 310),
            ],
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let stones: Vec<Gemstone> = serde_json::from_str(raw)?;
        Self::new(stones)
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// Use the file at `path` when given, the built-in list otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        match path {
            Some(path) => Self::from_path(path),
            None => Ok(Self::built_in()),
        }
    }

    /// Pretty JSON array, the form embedded in prompts.
    pub fn to_prompt_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn stones(&self) -> &[Gemstone] {
        &self.stones
    }

    pub fn len(&self) -> usize {
        self.stones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stones.is_empty()
    }
}
