//! Company catalog: company records enriched with the "liked" flag.

pub mod catalog;

use serde::{Deserialize, Serialize};

pub use catalog::{CompanyCatalog, SeaOrmCompanyCatalog};

/// A company as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyOutput {
    pub id: i32,
    pub company_name: String,
    pub liked: bool,
}

/// One page of companies plus the size of the whole set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyBatchOutput {
    pub companies: Vec<CompanyOutput>,
    pub total: u64,
}
