//! Emission vocabulary: classes, process groups and line items.

mod class;
mod record;

pub use class::{EmissionClass, OtherIndirectCategory, ProcessGroup};
pub use record::{EmissionRecord, RecordOwner};
