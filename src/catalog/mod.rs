mod entry;
mod error;
mod loader;

pub use error::CatalogError;
pub use loader::{Catalog, CatalogObject};

#[cfg(test)]
pub(crate) use entry::tests::VELOX_JSON;
