//! Collections of companies: listing, paginated membership and moves between collections.

pub mod service;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::companies::CompanyOutput;

pub use service::CollectionService;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionMetadata {
    pub id: Uuid,
    pub collection_name: String,
}

/// A collection together with one page of its companies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyCollectionOutput {
    pub id: Uuid,
    pub collection_name: String,
    pub companies: Vec<CompanyOutput>,
    /// size of the filtered set before pagination
    pub total: u64,
}
