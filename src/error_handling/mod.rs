//! Error handling and processing statistics.
//!
//! This module provides:
//! - Error type definitions (invalid input, initialization, transport failures)
//! - Transport failure categorization from reqwest error chains
//! - Processing statistics tracking (outcomes, transport failures)
//!
//! Only [`InvalidInputError`] ever reaches a caller of the checker; transport
//! failures are recovered by the probe executor and become evidence.

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::{categorize_error_chain, categorize_reqwest_error};
pub use stats::{CheckOutcome, ProcessingStats};
pub use types::{InitializationError, InvalidInputError, TransportFailureKind};
