//! Value-semantic argument binding and deferred invocation.
//!
//! [`bind`] pairs a callable target with a mixture of *fixed* values,
//! positional *placeholders*, and *nested binders*, producing a reusable
//! [`Binder`]. Invoking the binder later substitutes each placeholder with
//! the invocation argument at its index, evaluates nested binders with the
//! same invocation arguments, and forwards the resulting list to the
//! target:
//!
//! ```
//! use bindery::{bind, fixed, P1, P2};
//!
//! fn sub(a: i32, b: i32) -> i32 {
//!     a - b
//! }
//!
//! // Reorder the invocation arguments.
//! let swapped = bind(sub, (P2, P1));
//! assert_eq!(swapped.call((3, 10)), 7);
//!
//! // Fix one argument; the other arrives at invocation time.
//! let minus_one = bind(sub, (P1, fixed(1)));
//! assert_eq!(minus_one.call((5,)), 4);
//!
//! // Compose: the nested binder sees the same invocation arguments.
//! fn add(a: i32, b: i32) -> i32 {
//!     a + b
//! }
//! let composed = bind(sub, (P1, bind(add, (P1, P2))));
//! assert_eq!(composed.call((10, 3)), 10 - (10 + 3));
//! ```
//!
//! # The two paths
//!
//! Binders come in two flavors, selected at construction:
//!
//! - **Statically typed** ([`bind`], [`bind_in`], [`bind_shared`]): the
//!   target's parameter and return types are carried by its [`Fn`]
//!   implementation. Signature mismatches, out-of-range placeholders, and
//!   over-long argument lists do not compile; invocation is direct calls
//!   and clones, with no boxing and no runtime failure modes.
//! - **Runtime-dispatch** ([`bind_dyn`], [`bind_dyn_shared`],
//!   [`bind_dyn_with_output`]): for targets whose parameter types can only
//!   be resolved per invocation — function objects with several accepted
//!   argument-type combinations, or variadic targets. Arguments are
//!   type-erased [`Value`]s, misuse of the construction surface is a
//!   [`BindError`] before a binder exists, and invocation failures are
//!   [`CallError`]s.
//!
//! Up to [`MAX_ARGS`] arguments may be bound, and a binder may be invoked
//! with up to [`MAX_ARGS`] invocation arguments. Invocation arguments that
//! no placeholder references are evaluated by the caller as usual and then
//! discarded; a placeholder referencing a position that was not supplied is
//! a compile error on the static path and a
//! [`CallError::MissingArgument`] on the dynamic path.

pub mod argument;
pub mod binder;
pub mod callable;
pub mod dynamic;
pub mod error;
pub mod invocation;
pub mod placeholder;
pub mod signature;

pub use argument::{
    fixed, fixed_in, BoundArg, BoundArgList, Fixed, FixedIn, Materialize, MaterializeList,
};
pub use binder::{bind, bind_in, bind_shared, Binder, Invoke, SharedBinder};
pub use callable::Callable;
pub use dynamic::{
    bind_dyn, bind_dyn_shared, bind_dyn_with_output, AnyValue, DynBinder, DynCallable,
    IntoDynCallable, Slot, TypedDynBinder, Value,
};
pub use error::{BindError, CallError};
pub use placeholder::{Placeholder, P1, P10, P11, P12, P13, P14, P2, P3, P4, P5, P6, P7, P8, P9};
pub use signature::{Convention, Signature, SignatureFlags};

/// The largest supported number of bound arguments and of invocation
/// arguments.
pub const MAX_ARGS: usize = 14;

/// The prelude module.
pub mod prelude {
    #[doc(no_inline)]
    pub use crate::placeholder::{
        P1, P10, P11, P12, P13, P14, P2, P3, P4, P5, P6, P7, P8, P9,
    };
    #[doc(no_inline)]
    pub use crate::{bind, bind_dyn, bind_shared, fixed, Slot, Value};
}
