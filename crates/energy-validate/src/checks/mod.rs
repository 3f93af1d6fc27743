//! Validation check modules.
//!
//! Each module performs one of the four named checks and returns its error
//! messages; an empty list means the check passed.

pub(crate) mod energy;
pub(crate) mod ranges;
pub(crate) mod structure;
pub(crate) mod temporal;
