//! Tracing utilities for query rendering and result loading.
//!
//! Enable the `tracing` feature to emit events via the `tracing` crate.
//! These macros no-op when the feature is disabled, avoiding `#[cfg]` boilerplate
//! at every call site.

/// Emit a debug-level tracing event with the rendered SOQL and join count.
///
/// ```ignore
/// soql_trace_query!(&text, self.joins.len());
/// ```
#[macro_export]
macro_rules! soql_trace_query {
    ($soql:expr, $join_count:expr) => {
        #[cfg(feature = "tracing")]
        ::tracing::debug!(soql = %$soql, joins = $join_count, "soql.query");
    };
}

/// Emit a debug-level tracing event when a batch of records is loaded.
///
/// ```ignore
/// soql_trace_load!(schema.name(), records.len());
/// ```
#[macro_export]
macro_rules! soql_trace_load {
    ($schema:expr, $record_count:expr) => {
        #[cfg(feature = "tracing")]
        ::tracing::debug!(schema = %$schema, records = $record_count, "soql.load");
    };
}
