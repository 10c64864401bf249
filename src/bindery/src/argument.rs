//! Bound-argument slots and their evaluation.
//!
//! A bound-argument list is an ordered tuple of up to
//! [`MAX_ARGS`](crate::MAX_ARGS) *slots*, fixed at bind time. Each slot is
//! one of:
//!
//! - a literal captured by [`fixed`] (or [`fixed_in`] for arena-backed
//!   storage) — the capture is the only evaluation of the bind-site
//!   expression, and the captured value is cloned into every invocation;
//! - a [`Placeholder`], replaced by the invocation argument at its index;
//! - a nested binder, invoked with the entire invocation-argument list.
//!
//! [`Materialize`] is the per-slot evaluation contract and
//! [`MaterializeList`] the whole-list form, which evaluates slots strictly
//! left to right, each exactly once per call. The [`BoundArg`] marker closes
//! the set of slot types: a bare value in a bound-argument tuple is rejected
//! when the binder is constructed, not when it is first called.

use bumpalo::Bump;

use crate::invocation::ArgAt;
use crate::placeholder::Placeholder;

// Per-slot evaluation
// ----------------------------------------------------------------------------

/// One bound-argument slot, evaluated against the invocation arguments.
pub trait Materialize<Args> {
    /// The value this slot contributes to the target's argument list.
    type Output;

    /// Produce the slot's value for one invocation.
    fn materialize(&self, args: &Args) -> Self::Output;
}

/// Marker for the types storable in a bound-argument list: captured
/// literals, placeholders, and binders.
pub trait BoundArg {}

/// A literal captured at bind time.
///
/// Created by [`fixed`]. The payload is not accessible after construction,
/// so copies of the enclosing binder can never observe each other.
#[derive(Clone)]
pub struct Fixed<T> {
    value: T,
}

/// Capture `value` as a fixed argument.
///
/// The expression producing `value` is evaluated here, once, at bind time —
/// not at every invocation of the enclosing binder.
pub fn fixed<T: Clone>(value: T) -> Fixed<T> {
    Fixed { value }
}

impl<T> BoundArg for Fixed<T> {}

impl<Args, T: Clone> Materialize<Args> for Fixed<T> {
    type Output = T;

    #[inline]
    fn materialize(&self, _args: &Args) -> T {
        self.value.clone()
    }
}

impl<T> core::fmt::Debug for Fixed<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Fixed<{}>", core::any::type_name::<T>())
    }
}

/// A literal captured into a caller-supplied arena at bind time.
///
/// Created by [`fixed_in`]. The slot borrows the arena for its lifetime and
/// never owns it; copies of the slot share the arena-resident value, which
/// is immutable.
pub struct FixedIn<'arena, T> {
    value: &'arena T,
}

/// Capture `value` as a fixed argument stored in `arena`.
///
/// The value is moved into the arena here, once, at bind time.
pub fn fixed_in<'arena, T: Clone>(arena: &'arena Bump, value: T) -> FixedIn<'arena, T> {
    FixedIn {
        value: arena.alloc(value),
    }
}

impl<T> BoundArg for FixedIn<'_, T> {}

impl<T> Clone for FixedIn<'_, T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for FixedIn<'_, T> {}

impl<Args, T: Clone> Materialize<Args> for FixedIn<'_, T> {
    type Output = T;

    #[inline]
    fn materialize(&self, _args: &Args) -> T {
        self.value.clone()
    }
}

impl<T> core::fmt::Debug for FixedIn<'_, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "FixedIn<{}>", core::any::type_name::<T>())
    }
}

impl<const I: usize> BoundArg for Placeholder<I> {}

/// A placeholder re-reads the invocation argument at its index. Several
/// occurrences of the same placeholder clone the same value; the argument
/// itself was evaluated once, by the caller, when the argument tuple was
/// built.
impl<Args, const I: usize> Materialize<Args> for Placeholder<I>
where
    Args: ArgAt<I>,
    <Args as ArgAt<I>>::Arg: Clone,
{
    type Output = <Args as ArgAt<I>>::Arg;

    #[inline]
    fn materialize(&self, args: &Args) -> Self::Output {
        args.arg().clone()
    }
}

// Whole-list evaluation
// ----------------------------------------------------------------------------

/// An ordered, fixed-arity bound-argument list (a tuple of 0..=14
/// [`BoundArg`]s). Slot order corresponds 1:1 to the target's parameter
/// positions.
pub trait BoundArgList {
    /// The number of bound arguments.
    const LEN: usize;
}

/// Evaluation of a whole bound-argument list, producing the tuple that is
/// forwarded to the target.
pub trait MaterializeList<Args> {
    /// The tuple of every slot's output, in declaration order.
    type Output;

    /// Materialize every slot, left to right, exactly once.
    fn materialize_list(&self, args: &Args) -> Self::Output;
}

macro_rules! impl_bound_arg_list {
    ( @start $($x:tt)* ) => {
        impl_bound_arg_list! { @iter [] [$($x)*] }
    };

    // inductive case
    ( @iter [$(($S:ident, $i:tt))*] [$next_head:tt $($next_tail:tt)*] ) => {
        impl_bound_arg_list! { @impl $(($S, $i))* }
        impl_bound_arg_list! { @iter [$(($S, $i))* $next_head] [$($next_tail)*] }
    };

    // base case: emit the maximum arity
    ( @iter [$(($S:ident, $i:tt))*] [] ) => {
        impl_bound_arg_list! { @impl $(($S, $i))* }
    };

    ( @impl $(($S:ident, $i:tt))* ) => {
        impl<$($S: BoundArg,)*> BoundArgList for ($($S,)*) {
            const LEN: usize = 0 $(+ impl_bound_arg_list!(@one $S))*;
        }

        impl<Args, $($S,)*> MaterializeList<Args> for ($($S,)*)
        where
            $($S: Materialize<Args>,)*
        {
            type Output = ($(<$S as Materialize<Args>>::Output,)*);

            #[inline]
            fn materialize_list(&self, _args: &Args) -> Self::Output {
                ($(self.$i.materialize(_args),)*)
            }
        }
    };

    ( @one $S:ident ) => { 1 };
}

seq_macro::seq!(I in 0..14 { impl_bound_arg_list! { @start #( (S~I, I) )* } });

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placeholder::{P1, P2};

    #[test]
    fn fixed_is_evaluated_at_capture_time() {
        let mut calls = 0;
        let mut make = || {
            calls += 1;
            calls
        };
        let slot = fixed(make());
        assert_eq!(calls, 1);
        assert_eq!(slot.materialize(&()), 1);
        assert_eq!(slot.materialize(&()), 1);
        assert_eq!(calls, 1);
    }

    #[test]
    fn placeholders_select_invocation_arguments() {
        let args = (10u32, "x");
        assert_eq!(P1.materialize(&args), 10u32);
        assert_eq!(P2.materialize(&args), "x");
    }

    #[test]
    fn lists_materialize_in_declaration_order() {
        let args = (5i32,);
        let list = (fixed(1i32), P1, fixed(2i32));
        assert_eq!(list.materialize_list(&args), (1, 5, 2));
    }

    #[test]
    fn empty_list() {
        #[allow(clippy::let_unit_value)]
        let out = ().materialize_list(&(1, 2));
        assert_eq!(out, ());
    }

    #[test]
    fn arena_slots_share_the_arena_value() {
        let arena = Bump::new();
        let slot = fixed_in(&arena, String::from("stored"));
        let copy = slot;
        assert_eq!(slot.materialize(&()), "stored");
        assert_eq!(copy.materialize(&()), "stored");
    }

    #[test]
    fn list_lengths() {
        assert_eq!(<() as BoundArgList>::LEN, 0);
        assert_eq!(<(Fixed<u8>, Placeholder<1>) as BoundArgList>::LEN, 2);
    }
}
