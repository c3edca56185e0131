//! lp-protocol: declarative experiment protocols.
//!
//! A protocol is an immutable ordered list of phase instructions plus a
//! role map naming the position of each phase. Downstream extraction code
//! resolves phases by role (e.g. "final rest"), never by hardcoded index,
//! so a trace produced from a differently shaped protocol fails loudly.

pub mod phase;
pub mod protocol;

pub use phase::{PhaseInstruction, PhaseSpec};
pub use protocol::{PhaseRole, Protocol};
