/// Read-only statistics over a [`RecordTable`](crate::data::model::RecordTable).
/// Nothing here mutates the table it is given.
pub mod correlation;
pub mod distribution;
pub mod grouping;
pub mod missing;
