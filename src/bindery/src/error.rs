//! Errors reported by the runtime-dispatch path.
//!
//! The statically typed path has no error values at all: misuse of `bind` or
//! of a binder's call operator does not compile. Everything here belongs to
//! the dynamically typed path, where the target's signature is resolved per
//! invocation. [`BindError`] covers misuse rejected before a binder is
//! produced; [`CallError`] covers failures at invocation time. Neither is
//! retried or recovered internally; both propagate to the caller.

use thiserror::Error;

use crate::MAX_ARGS;

/// Rejected construction of a dynamic binder.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BindError {
    /// More bound arguments were supplied than [`MAX_ARGS`](crate::MAX_ARGS).
    #[error("{got} bound arguments supplied, at most {} are supported", MAX_ARGS)]
    TooManyArguments {
        /// The number of bound arguments supplied.
        got: usize,
    },

    /// A placeholder index lies outside `1..=`[`MAX_ARGS`](crate::MAX_ARGS).
    #[error("placeholder index {index} is outside 1..={}", MAX_ARGS)]
    PlaceholderIndex {
        /// The offending index.
        index: usize,
    },

    /// The bound-argument count differs from the arity the target declares.
    #[error("target declares {expected} parameter(s) but {got} were bound")]
    ArityMismatch {
        /// The arity the target's signature declares.
        expected: usize,
        /// The number of bound arguments supplied.
        got: usize,
    },
}

/// A failed invocation of a dynamic binder.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CallError {
    /// A placeholder referenced an invocation argument that was not
    /// supplied. Slots preceding the failing one have already been
    /// resolved when this is reported.
    #[error("placeholder {index} needs invocation argument {index}, but only {supplied} were supplied")]
    MissingArgument {
        /// The placeholder's 1-based index.
        index: usize,
        /// The number of invocation arguments actually supplied.
        supplied: usize,
    },

    /// More invocation arguments were supplied than
    /// [`MAX_ARGS`](crate::MAX_ARGS).
    #[error("{got} invocation arguments supplied, at most {} are supported", MAX_ARGS)]
    TooManyArguments {
        /// The number of invocation arguments supplied.
        got: usize,
    },

    /// The resolved argument list does not match the arity the target
    /// accepts.
    #[error("target expects {expected} argument(s), got {got}")]
    ArityMismatch {
        /// The arity the target accepts.
        expected: usize,
        /// The number of arguments it received.
        got: usize,
    },

    /// A resolved argument was rejected by the target's invocation-time
    /// type selection.
    #[error("argument {index}: expected {expected}, found {found}")]
    ArgumentType {
        /// The argument's 1-based position.
        index: usize,
        /// The type the target expected.
        expected: &'static str,
        /// The type that was actually supplied.
        found: &'static str,
    },

    /// The target's result could not be converted to the requested output
    /// type.
    #[error("output: expected {expected}, found {found}")]
    OutputType {
        /// The requested output type.
        expected: &'static str,
        /// The type the target actually returned.
        found: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_positions() {
        let e = CallError::MissingArgument {
            index: 3,
            supplied: 1,
        };
        assert_eq!(
            e.to_string(),
            "placeholder 3 needs invocation argument 3, but only 1 were supplied"
        );

        let e = BindError::PlaceholderIndex { index: 15 };
        assert_eq!(e.to_string(), "placeholder index 15 is outside 1..=14");
    }
}
