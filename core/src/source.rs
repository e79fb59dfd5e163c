//! Client book sources.
//!
//! RULE: loading is the only fallible step in the pipeline. Whatever a
//! source returns is taken as validated; aggregation never fails.

use crate::{
    config::GeneratorConfig,
    error::BoardResult,
    generator::ClientGenerator,
    types::{Client, Timestamp},
};
use std::path::PathBuf;

/// The contract every client book provider must fulfill.
pub trait ClientSource {
    /// Short stable name used in logs.
    fn name(&self) -> &'static str;

    /// Produce the full, unfiltered client book as of `reference`.
    fn load(&mut self, reference: Timestamp) -> BoardResult<Vec<Client>>;
}

/// Seeded synthetic book.
pub struct SyntheticSource {
    generator: ClientGenerator,
}

impl SyntheticSource {
    pub fn new(config: GeneratorConfig) -> BoardResult<Self> {
        Ok(Self {
            generator: ClientGenerator::new(config)?,
        })
    }
}

impl ClientSource for SyntheticSource {
    fn name(&self) -> &'static str {
        "synthetic"
    }

    fn load(&mut self, reference: Timestamp) -> BoardResult<Vec<Client>> {
        self.generator.generate(reference)
    }
}

/// A JSON array of clients on disk.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ClientSource for JsonFileSource {
    fn name(&self) -> &'static str {
        "json_file"
    }

    fn load(&mut self, _reference: Timestamp) -> BoardResult<Vec<Client>> {
        let content = std::fs::read_to_string(&self.path)?;
        let clients: Vec<Client> = serde_json::from_str(&content)?;
        for client in &clients {
            client.validate()?;
        }
        log::info!("json_file: loaded {} clients from {}", clients.len(), self.path.display());
        Ok(clients)
    }
}
