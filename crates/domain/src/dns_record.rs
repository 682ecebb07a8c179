pub mod record;
pub mod record_type;

pub use record::CachedRecord;
pub use record_type::{RecordClass, RecordType};
