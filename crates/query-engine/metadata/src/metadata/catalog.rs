//! Metadata information regarding the query catalog.

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::reference;

// Types

/// A predefined, read-only analytical query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct QueryDefinition {
    /// Short, case-sensitive identifier such as `A1`.
    pub id: String,
    pub title: String,
    pub description: String,
    /// A single read-only statement. It is executed verbatim.
    pub sql: String,
}

impl QueryDefinition {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        sql: impl Into<String>,
    ) -> Self {
        QueryDefinition {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            sql: sql.into(),
        }
    }
}

/// The immutable mapping from identifier to query definition.
///
/// Entries keep the order they were declared in, which is the order the front
/// end lists them. There is no mutation path once the catalog is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryCatalog(IndexMap<String, QueryDefinition>);

/// Errors detected while building a catalog.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("duplicate query identifier '{0}' in catalog")]
    DuplicateId(String),
    #[error("query identifiers must not be blank")]
    BlankId,
    #[error("query '{0}' has no SQL text")]
    BlankSql(String),
}

impl QueryCatalog {
    /// Build a catalog, failing on blank or duplicated identifiers.
    pub fn new(
        definitions: impl IntoIterator<Item = QueryDefinition>,
    ) -> Result<Self, CatalogError> {
        let mut entries = IndexMap::new();
        for definition in definitions {
            if definition.id.trim().is_empty() {
                return Err(CatalogError::BlankId);
            }
            if definition.sql.trim().is_empty() {
                return Err(CatalogError::BlankSql(definition.id));
            }
            if entries.contains_key(&definition.id) {
                return Err(CatalogError::DuplicateId(definition.id));
            }
            entries.insert(definition.id.clone(), definition);
        }
        Ok(QueryCatalog(entries))
    }

    /// The catalog shipped with the service.
    pub fn reference() -> Self {
        QueryCatalog(
            reference::definitions()
                .into_iter()
                .map(|definition| (definition.id.clone(), definition))
                .collect(),
        )
    }

    pub fn lookup(&self, id: &str) -> Option<&QueryDefinition> {
        self.0.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &QueryDefinition> {
        self.0.values()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
