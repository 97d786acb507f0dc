//! lockdec — deterministic arbitrary-precision decimal arithmetic for
//! replicated state machines.
//!
//! Economic and scoring values computed here feed consensus-critical
//! state: every participating node must independently compute
//! byte-identical results from the same inputs, or the network diverges.
//! All values are immutable, every operation is a pure function, and no
//! floating point is used anywhere on a computation path.
//!
//! ## Crate layout
//! - `context`: the two fixed arithmetic contexts (exact and wide/34).
//! - `dec`: the decimal value, its operation set, and its serialization.
//! - `legacy`: the external fixed-point decimal and the bounded ledger
//!   integer.
//! - `codec`: persistence codec adapters for an ordered key-value store.
//! - `stats`: EMA, exponential decay, standard deviation, and the
//!   logistic gradient/potential functions.
//! - `order`: deterministic iteration helpers for hash-keyed collections.

pub mod codec;
pub mod context;
pub mod dec;
pub mod error;
pub mod legacy;
pub mod order;
pub mod stats;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
///

pub mod prelude {
    pub use crate::{
        codec::{DecCodec, LegacyDecCodec, ValueCodec},
        dec::Dec,
        error::DecError,
        legacy::{LedgerInt, LegacyDec},
    };
}
