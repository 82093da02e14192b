//! Container resolution
//!
//! The [`ContainerFactory`] maps a document type to the database/container
//! pair that stores it. Mappings come from `[[cosmosdb.containers]]` and can
//! be extended at runtime with [`ContainerFactory::register`].

use crate::config::schema::default_partition_key_path;
use crate::config::CosmosDbConfig;
use crate::domain::{CosmosDbError, Document, Result};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// Where documents of one kind live
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContainerLocation {
    /// Database name
    pub database: String,

    /// Container name
    pub container: String,

    /// Partition key path used when the container is created
    pub partition_key_path: String,
}

impl ContainerLocation {
    /// Creates a location with the default partition key path
    pub fn new(database: impl Into<String>, container: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            container: container.into(),
            partition_key_path: default_partition_key_path(),
        }
    }

    /// Sets the partition key path
    pub fn with_partition_key_path(mut self, path: impl Into<String>) -> Self {
        self.partition_key_path = path.into();
        self
    }
}

impl fmt::Display for ContainerLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.database, self.container)
    }
}

/// Maps document kinds to container locations
#[derive(Debug, Clone, Default)]
pub struct ContainerFactory {
    locations: HashMap<String, ContainerLocation>,
}

impl ContainerFactory {
    /// Creates an empty factory
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the factory from `[[cosmosdb.containers]]`
    ///
    /// Mappings without a `database` use `cosmosdb.database_name`.
    pub fn from_config(config: &CosmosDbConfig) -> Self {
        let mut factory = Self::new();
        for mapping in &config.containers {
            let database = mapping
                .database
                .clone()
                .unwrap_or_else(|| config.database_name.clone());

            factory.register(
                mapping.kind.clone(),
                ContainerLocation::new(database, mapping.container.clone())
                    .with_partition_key_path(mapping.partition_key_path.clone()),
            );
        }
        factory
    }

    /// Maps a kind to a location, replacing any previous mapping
    pub fn register(&mut self, kind: impl Into<String>, location: ContainerLocation) {
        let kind = kind.into();
        tracing::debug!(kind = %kind, location = %location, "Registered container mapping");
        self.locations.insert(kind, location);
    }

    /// Resolves the location for a kind name
    ///
    /// # Errors
    ///
    /// Returns `ContainerNotMapped` if no mapping exists for the kind.
    pub fn resolve_kind(&self, kind: &str) -> Result<&ContainerLocation> {
        self.locations
            .get(kind)
            .ok_or_else(|| CosmosDbError::ContainerNotMapped(kind.to_string()).into())
    }

    /// Resolves the location for a document type
    pub fn resolve<T: Document>(&self) -> Result<&ContainerLocation> {
        self.resolve_kind(T::KIND)
    }

    /// Iterates over all `(kind, location)` mappings
    pub fn locations(&self) -> impl Iterator<Item = (&str, &ContainerLocation)> {
        self.locations.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Distinct database names across all mappings, sorted
    pub fn databases(&self) -> Vec<String> {
        self.locations
            .values()
            .map(|l| l.database.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}
