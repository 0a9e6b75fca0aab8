pub mod error;
pub mod normalizer;
pub mod record;
pub mod table;

pub use error::{IngestError, MalformedPeriod};
pub use record::SalesRecord;
pub use table::SalesTable;
