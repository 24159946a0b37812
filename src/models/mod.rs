pub mod dataset;
pub mod event_level;
pub mod record;

pub use event_level::EventLevel;
pub use record::{EventRecord, FieldMap, RecordId};
