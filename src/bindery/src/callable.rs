//! The target-callable abstraction: descriptor supply and invocation.
//!
//! [`Callable<Args>`] is implemented for every `Fn(A0, .., Ak) -> R` with
//! k ≤ [`MAX_ARGS`](crate::MAX_ARGS), which covers every statically typed
//! target shape:
//!
//! - free functions and function pointers (`fn` items, `fn(..) -> R`);
//! - member functions — `Type::method` is an `Fn` item whose first
//!   parameter is the receiver, supplied either at bind time or at
//!   invocation time like any other argument;
//! - closures and other function objects held by value;
//! - targets held behind a pointer (`&F`, `Box<F>`), which implement `Fn`
//!   by dereference.
//!
//! A target whose parameter types cannot be expressed through the `Fn`
//! traits belongs on the runtime-dispatch path instead (see
//! [`DynCallable`](crate::dynamic::DynCallable)).

use core::any::type_name;

use crate::signature::Signature;

/// A callable target whose parameter types `Args` (a tuple) and output type
/// are statically known.
///
/// [`describe`](Self::describe) reports the target's descriptor; in Rust
/// the introspection that derives it is the trait system itself, so the
/// descriptor is generated together with the invocation glue.
pub trait Callable<Args> {
    /// The target's return type. A `()` output is an ordinary void call.
    type Output;

    /// The number of parameters the target declares.
    const ARITY: usize;

    /// Report the target's descriptor.
    fn describe() -> Signature;

    /// Call the target with an already-materialized argument list.
    fn invoke(&self, args: Args) -> Self::Output;
}

macro_rules! impl_callable {
    ( @start $($x:tt)* ) => {
        impl_callable! { @iter [] [$($x)*] }
    };

    // inductive case
    ( @iter [$(($A:ident, $a:ident))*] [$next_head:tt $($next_tail:tt)*] ) => {
        impl_callable! { @impl $(($A, $a))* }
        impl_callable! { @iter [$(($A, $a))* $next_head] [$($next_tail)*] }
    };

    // base case: emit the maximum arity
    ( @iter [$(($A:ident, $a:ident))*] [] ) => {
        impl_callable! { @impl $(($A, $a))* }
    };

    ( @impl $(($A:ident, $a:ident))* ) => {
        impl<Func, Ret, $($A,)*> Callable<($($A,)*)> for Func
        where
            Func: Fn($($A),*) -> Ret,
        {
            type Output = Ret;

            const ARITY: usize = 0 $(+ impl_callable!(@one $A))*;

            fn describe() -> Signature {
                Signature::known(&[$(type_name::<$A>()),*], type_name::<Ret>())
            }

            #[inline]
            fn invoke(&self, args: ($($A,)*)) -> Ret {
                let ($($a,)*) = args;
                (self)($($a),*)
            }
        }
    };

    ( @one $A:ident ) => { 1 };
}

seq_macro::seq!(I in 0..14 { impl_callable! { @start #( (A~I, a~I) )* } });
