//! Shared HTTP helpers: boundary coercion and the validated query extractor

pub mod coerce;
pub mod validated_query;

pub use validated_query::ValidatedQuery;
