pub mod loader;
pub mod record;

pub use loader::{load_records, CsvFileSource, DataFormat, LoadError, RecordSource};
pub use record::PriceRecord;
