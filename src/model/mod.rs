//! Entry data model

pub mod collection;
pub mod entry;

pub use collection::EntryCollection;
pub use entry::{
    DefaultOverride, Entry, EntryBuilder, EntryError, InstrumentKind, KeyGroup, KeyValue,
    MeterDetails, TagKeys, DYNAMIC_NAME_MARKER,
};
