//! # stockwatch-resolver
//!
//! Pure conflict resolution. Given the currently believed status and its
//! decayed confidence plus an incoming report, decide the reconciled status
//! and confidence. No state.

pub mod blend;
pub mod resolver;

pub use resolver::{Belief, ConflictResolver, Resolution, ResolutionKind};
