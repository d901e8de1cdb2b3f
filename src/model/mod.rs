// File: ./src/model/mod.rs
pub mod adapter;
pub mod item;
pub mod matcher;
pub mod parser;

pub use adapter::{Candidate, Component, DateResolver, Specificity};
pub use item::{DateRange, Deadline, ExtractedSpan, Schedule, SpanKind};
pub use parser::{DateGroup, DateKind, DateOracle, NaturalDateParser, Zone};
