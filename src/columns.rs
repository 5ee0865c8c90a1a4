use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::storage::{KeyValueStore, StorageError};

/// Every column the table knows about. `FullName` is derived from first and last name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColumnId {
    Id,
    FirstName,
    LastName,
    FullName,
    Email,
    City,
    RegisteredDate,
    IsPrivate,
}

impl ColumnId {
    pub const ALL: [ColumnId; 8] = [
        ColumnId::Id,
        ColumnId::FirstName,
        ColumnId::LastName,
        ColumnId::FullName,
        ColumnId::Email,
        ColumnId::City,
        ColumnId::RegisteredDate,
        ColumnId::IsPrivate,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ColumnId::Id => "id",
            ColumnId::FirstName => "firstName",
            ColumnId::LastName => "lastName",
            ColumnId::FullName => "fullName",
            ColumnId::Email => "email",
            ColumnId::City => "city",
            ColumnId::RegisteredDate => "registeredDate",
            ColumnId::IsPrivate => "isPrivate",
        }
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown column '{0}'")]
pub struct UnknownColumn(pub String);

impl FromStr for ColumnId {
    type Err = UnknownColumn;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColumnId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| UnknownColumn(s.to_string()))
    }
}

/// Display metadata of a column. Serialized as-is into the layout store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSpec {
    pub id: ColumnId,
    /// Display hint only, sorting never looks at it.
    pub numeric: bool,
    pub disable_padding: bool,
    pub label: String,
}

impl ColumnSpec {
    fn new(id: ColumnId, numeric: bool, disable_padding: bool, label: &str) -> Self {
        Self {
            id,
            numeric,
            disable_padding,
            label: label.to_string(),
        }
    }
}

pub fn default_columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new(ColumnId::Id, false, true, "ID"),
        ColumnSpec::new(ColumnId::FirstName, false, true, "First Name"),
        ColumnSpec::new(ColumnId::LastName, true, false, "Last Name"),
        ColumnSpec::new(ColumnId::FullName, false, true, "Full Name"),
        ColumnSpec::new(ColumnId::Email, true, false, "Email"),
        ColumnSpec::new(ColumnId::City, true, false, "City"),
        ColumnSpec::new(ColumnId::RegisteredDate, true, false, "Registered Date (g)"),
        ColumnSpec::new(ColumnId::IsPrivate, false, false, "Is Private"),
    ]
}

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("layout is not valid json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("layout columns {found:?} do not match the table columns")]
    ColumnMismatch { found: Vec<ColumnId> },
}

/// Parses a persisted layout. Accepted only if it holds every column exactly once.
pub fn parse_layout(json: &str) -> Result<Vec<ColumnSpec>, LayoutError> {
    let columns: Vec<ColumnSpec> = serde_json::from_str(json)?;
    let ids: HashSet<ColumnId> = columns.iter().map(|c| c.id).collect();
    if columns.len() != ColumnId::ALL.len() || ids.len() != ColumnId::ALL.len() {
        return Err(LayoutError::ColumnMismatch {
            found: columns.iter().map(|c| c.id).collect(),
        });
    }
    Ok(columns)
}

/// Owns the column order shown by the table and its persisted copy.
///
/// The layout is read from the store once, when the store is created. Reorders
/// only change the in-memory order; [`ColumnLayoutStore::save`] has to be
/// called explicitly to persist them.
pub struct ColumnLayoutStore {
    store: Box<dyn KeyValueStore>,
    key: String,
    columns: Vec<ColumnSpec>,
}

impl ColumnLayoutStore {
    pub fn initialize(store: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let columns = match store.get(&key) {
            Ok(Some(json)) => match parse_layout(&json) {
                Ok(columns) => {
                    info!("Restored column layout from '{key}'");
                    columns
                }
                Err(e) => {
                    warn!("Ignoring persisted column layout: {e}");
                    default_columns()
                }
            },
            Ok(None) => {
                debug!("No persisted column layout, using default");
                default_columns()
            }
            Err(e) => {
                warn!("Could not read column layout: {e}");
                default_columns()
            }
        };
        Self {
            store,
            key,
            columns,
        }
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub fn ids(&self) -> Vec<ColumnId> {
        self.columns.iter().map(|c| c.id).collect()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn contains(&self, id: ColumnId) -> bool {
        self.columns.iter().any(|c| c.id == id)
    }

    /// Moves the column at `source` to `destination`, shifting the columns in between.
    ///
    /// A `None` destination is a cancelled drag. Returns whether the order changed.
    pub fn reorder(&mut self, source: usize, destination: Option<usize>) -> bool {
        let Some(destination) = destination else {
            debug!("Reorder of column {source} cancelled");
            return false;
        };
        if source >= self.columns.len() {
            warn!("Reorder source {source} out of range");
            return false;
        }
        let destination = destination.min(self.columns.len() - 1);
        if source == destination {
            return false;
        }
        let column = self.columns.remove(source);
        debug!("Moving column {} from {source} to {destination}", column.id);
        self.columns.insert(destination, column);
        true
    }

    pub fn save(&mut self) -> Result<(), StorageError> {
        let json = serde_json::to_string(&self.columns)?;
        self.store.set(&self.key, &json)?;
        info!("Saved column layout to '{}'", self.key);
        Ok(())
    }

    /// Reverts to the default order. The in-memory layout is reset even if
    /// deleting the persisted copy fails.
    pub fn reset(&mut self) -> Result<(), StorageError> {
        self.columns = default_columns();
        self.store.remove(&self.key)?;
        info!("Reset column layout '{}'", self.key);
        Ok(())
    }

    #[cfg(test)]
    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }
}
