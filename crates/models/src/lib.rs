pub mod errors;
pub mod db;
pub mod company;
pub mod company_collection;
pub mod company_collection_association;

#[cfg(test)]
mod tests;
