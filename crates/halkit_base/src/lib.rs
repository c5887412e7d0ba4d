/* 📖 # Why have halkit_base as a core library?
halkit_base holds the infrastructure shared by every crate: the error type, tracing setup
and the framework-neutral HTTP types. Keeping them here lets the engine and the CLI agree on
one error type without depending on each other.
*/

pub mod error;
mod error_tests;
pub mod http;
pub mod tracing;

// Re-export commonly used types for convenience
pub use error::{HalkitError, HalkitResult, ResultExt};
