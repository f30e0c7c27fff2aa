//! Internal domain models, distinct from the public DTOs in `shared`.

pub mod record;

pub use record::ParsedRecord;
