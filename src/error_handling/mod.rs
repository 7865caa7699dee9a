//! Error handling and the audit error taxonomy.

mod types;

pub use types::{AuditError, InitializationError};
