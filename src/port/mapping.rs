//! Mapping storage port.

use crate::domain::MappingTable;
use crate::error::Result;

/// Storage for the curated SAFE/LAB mapping table.
pub trait MappingSource: Send + Sync {
    /// Load the whole table.
    ///
    /// `Ok(None)` means no table exists, which scans as an empty universe.
    fn load_mappings(&self) -> Result<Option<MappingTable>>;
}
