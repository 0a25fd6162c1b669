//! Domain value types shared across the pipeline.

mod county;
mod state;
mod zip;

pub use county::CountyId;
pub use state::{MarketplaceType, StateCode};
pub use zip::ZipCode;
