//! The runtime-dispatch path: binders whose target signature is resolved
//! per invocation.
//!
//! The statically typed path (see [`bind`](crate::binder::bind)) requires
//! the target's parameter types to be expressible through the [`Fn`]
//! traits. Some targets cannot offer that: a function object that accepts
//! several argument-type combinations and selects between them by
//! inspecting the supplied values, or a target accepting any number of
//! arguments. For those, [`bind_dyn`] builds a [`DynBinder`] over
//! type-erased [`Value`]s. Everything the static path checks at build time
//! becomes a well-defined runtime error here: misuse of the construction
//! surface is a [`BindError`] reported before a binder exists, and
//! unresolved placeholders or rejected argument types at invocation time
//! are [`CallError`]s.
//!
//! Bound-argument slots are the closed sum [`Slot`]: a literal [`Value`]
//! captured at bind time, a placeholder index, or a nested [`DynBinder`].
//! Resolution walks the slots left to right, exactly once per call, with
//! nested binders invoked (with the entire invocation-argument list)
//! strictly before the outer target.

pub mod value;

use core::any::{self, Any};
use core::fmt;
use core::marker::PhantomData;
use std::rc::Rc;

use arrayvec::ArrayVec;
use log::{debug, trace};

use crate::error::{BindError, CallError};
use crate::placeholder::Placeholder;
use crate::signature::{Convention, Signature};
use crate::MAX_ARGS;

pub use value::{AnyValue, Value};

// Dynamic targets
// ----------------------------------------------------------------------------

/// A target whose parameter types are resolved at each invocation.
///
/// Implementors perform their own argument-type selection inside
/// [`invoke`](Self::invoke), typically with [`Value::downcast_ref`], and
/// report whatever part of their signature is known ahead of time from
/// [`signature`](Self::signature). A target with several accepted
/// argument-type combinations simply reports a deferred signature; that is
/// by design, not an error.
pub trait DynCallable {
    /// The descriptor, as far as it is known ahead of invocation.
    fn signature(&self) -> Signature {
        Signature::deferred()
    }

    /// Deep-copy the target.
    fn clone_target(&self) -> Box<dyn DynCallable>;

    /// Call the target with an already-resolved argument list.
    fn invoke(&self, args: Vec<Value>) -> Result<Value, CallError>;
}

/// Conversion into a boxed [`DynCallable`].
///
/// The `Marker` parameter exists only to keep the blanket implementations
/// apart: closures convert through a `fn(A0, ..) -> R` marker carrying
/// their signature, hand-written [`DynCallable`] objects through
/// [`ObjectShape`]. Callers never name it; inference picks the single
/// applicable implementation.
pub trait IntoDynCallable<Marker> {
    /// Box `self` as a dynamic target.
    fn into_dyn_callable(self) -> Box<dyn DynCallable>;
}

/// Marker type for [`IntoDynCallable`] on hand-written [`DynCallable`]
/// objects.
pub enum ObjectShape {}

impl<T: DynCallable + 'static> IntoDynCallable<ObjectShape> for T {
    fn into_dyn_callable(self) -> Box<dyn DynCallable> {
        Box::new(self)
    }
}

/// Adapts a statically typed closure into a [`DynCallable`] by downcasting
/// each argument and re-erasing the result.
struct FnAdapter<F, Marker> {
    func: F,
    _marker: PhantomData<Marker>,
}

fn downcast_arg<T: Any>(value: Value, index: usize) -> Result<T, CallError> {
    let found = value.type_name();
    value.downcast().map_err(|_| CallError::ArgumentType {
        index: index + 1,
        expected: any::type_name::<T>(),
        found,
    })
}

macro_rules! impl_dyn_fn {
    ( @start $($x:tt)* ) => {
        impl_dyn_fn! { @iter [] [$($x)*] }
    };

    // inductive case
    ( @iter [$(($A:ident, $a:ident, $i:tt))*] [$next_head:tt $($next_tail:tt)*] ) => {
        impl_dyn_fn! { @impl $(($A, $a, $i))* }
        impl_dyn_fn! { @iter [$(($A, $a, $i))* $next_head] [$($next_tail)*] }
    };

    // base case: emit the maximum arity
    ( @iter [$(($A:ident, $a:ident, $i:tt))*] [] ) => {
        impl_dyn_fn! { @impl $(($A, $a, $i))* }
    };

    ( @impl $(($A:ident, $a:ident, $i:tt))* ) => {
        impl<Func, Ret, $($A,)*> DynCallable for FnAdapter<Func, fn($($A,)*) -> Ret>
        where
            Func: Fn($($A),*) -> Ret + Clone + 'static,
            Ret: Any + Clone,
            $($A: Any + Clone,)*
        {
            fn signature(&self) -> Signature {
                Signature::known(&[$(any::type_name::<$A>()),*], any::type_name::<Ret>())
            }

            fn clone_target(&self) -> Box<dyn DynCallable> {
                Box::new(FnAdapter {
                    func: self.func.clone(),
                    _marker: PhantomData::<fn($($A,)*) -> Ret>,
                })
            }

            fn invoke(&self, args: Vec<Value>) -> Result<Value, CallError> {
                const EXPECTED: usize = 0 $(+ impl_dyn_fn!(@one $A))*;
                match <[Value; EXPECTED]>::try_from(args) {
                    Ok([$($a),*]) => {
                        $( let $a = downcast_arg::<$A>($a, $i)?; )*
                        Ok(Value::new((self.func)($($a),*)))
                    }
                    Err(args) => Err(CallError::ArityMismatch {
                        expected: EXPECTED,
                        got: args.len(),
                    }),
                }
            }
        }

        impl<Func, Ret, $($A,)*> IntoDynCallable<fn($($A,)*) -> Ret> for Func
        where
            Func: Fn($($A),*) -> Ret + Clone + 'static,
            Ret: Any + Clone,
            $($A: Any + Clone,)*
        {
            fn into_dyn_callable(self) -> Box<dyn DynCallable> {
                Box::new(FnAdapter {
                    func: self,
                    _marker: PhantomData::<fn($($A,)*) -> Ret>,
                })
            }
        }
    };

    ( @one $A:ident ) => { 1 };
}

seq_macro::seq!(I in 0..14 { impl_dyn_fn! { @start #( (A~I, a~I, I) )* } });

// Bound-argument slots
// ----------------------------------------------------------------------------

/// One bound-argument slot of a [`DynBinder`].
#[derive(Clone, Debug)]
pub enum Slot {
    /// A value captured at bind time, cloned into every invocation.
    Literal(Value),
    /// Replaced by the invocation argument at this 1-based position.
    Placeholder(usize),
    /// Evaluated by invoking the nested binder with the entire
    /// invocation-argument list.
    Nested(Box<DynBinder>),
}

impl Slot {
    /// Capture `value` as a literal slot. The expression producing `value`
    /// is evaluated here, once, at bind time.
    pub fn value<T: Any + Clone>(value: T) -> Self {
        Slot::Literal(Value::new(value))
    }

    /// Reference the invocation argument at 1-based `index`.
    ///
    /// The index is validated against `1..=`[`MAX_ARGS`](crate::MAX_ARGS)
    /// when the binder is constructed.
    pub fn arg(index: usize) -> Self {
        Slot::Placeholder(index)
    }

    /// Nest `binder`, composing it with the enclosing binder.
    pub fn nested(binder: DynBinder) -> Self {
        Slot::Nested(Box::new(binder))
    }
}

impl<const I: usize> From<Placeholder<I>> for Slot {
    fn from(_: Placeholder<I>) -> Self {
        Slot::Placeholder(I)
    }
}

impl From<DynBinder> for Slot {
    fn from(binder: DynBinder) -> Self {
        Slot::Nested(Box::new(binder))
    }
}

impl From<Value> for Slot {
    fn from(value: Value) -> Self {
        Slot::Literal(value)
    }
}

/// Build a `Vec<`[`Value`]`>` invocation-argument list.
///
/// # Examples
///
/// ```
/// use bindery::{bind_dyn, values, Slot};
///
/// let sub = |a: i32, b: i32| a - b;
/// let swapped = bind_dyn(sub, [Slot::arg(2), Slot::arg(1)]).unwrap();
/// let out = swapped.try_call(values![3, 10]).unwrap();
/// assert_eq!(out.downcast::<i32>().unwrap(), 7);
/// ```
#[macro_export]
macro_rules! values {
    ( $($x:expr),* $(,)? ) => {
        ::std::vec![ $( $crate::dynamic::Value::new($x) ),* ]
    };
}

// The binder
// ----------------------------------------------------------------------------

enum TargetStore {
    Owned(Box<dyn DynCallable>),
    Shared(Rc<dyn DynCallable>),
}

impl TargetStore {
    fn get(&self) -> &dyn DynCallable {
        match self {
            TargetStore::Owned(target) => &**target,
            TargetStore::Shared(target) => &**target,
        }
    }

    fn convention(&self) -> Convention {
        match self {
            TargetStore::Owned(_) => Convention::Direct,
            TargetStore::Shared(_) => Convention::ByAddress,
        }
    }
}

impl Clone for TargetStore {
    fn clone(&self) -> Self {
        match self {
            TargetStore::Owned(target) => TargetStore::Owned(target.clone_target()),
            TargetStore::Shared(target) => TargetStore::Shared(Rc::clone(target)),
        }
    }
}

/// A bound callable whose target signature is resolved at each invocation.
///
/// Produced by [`bind_dyn`] and [`bind_dyn_shared`]. The descriptor is
/// captured once at construction and never recomputed. Cloning deep-copies
/// an owned target and every slot; a shared target is aliased by reference
/// count (it is reached by dereference and never mutated).
#[derive(Clone)]
pub struct DynBinder {
    target: TargetStore,
    slots: ArrayVec<Slot, MAX_ARGS>,
    signature: Signature,
}

impl fmt::Debug for DynBinder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynBinder")
            .field("signature", &self.signature)
            .field("slots", &self.slots)
            .finish_non_exhaustive()
    }
}

impl DynBinder {
    /// Construct a binder over an owned target.
    ///
    /// Validates the bound-argument list before any binder exists: at most
    /// [`MAX_ARGS`](crate::MAX_ARGS) slots, every placeholder index in
    /// `1..=`[`MAX_ARGS`](crate::MAX_ARGS), and — when the target declares
    /// its arity — a slot count equal to it.
    pub fn new(
        target: Box<dyn DynCallable>,
        slots: impl IntoIterator<Item = Slot>,
    ) -> Result<Self, BindError> {
        Self::with_store(TargetStore::Owned(target), slots)
    }

    /// Construct a binder over a shared target, reached by dereference.
    pub fn shared(
        target: Rc<dyn DynCallable>,
        slots: impl IntoIterator<Item = Slot>,
    ) -> Result<Self, BindError> {
        Self::with_store(TargetStore::Shared(target), slots)
    }

    fn with_store(
        target: TargetStore,
        slots: impl IntoIterator<Item = Slot>,
    ) -> Result<Self, BindError> {
        let supplied: Vec<Slot> = slots.into_iter().collect();
        if supplied.len() > MAX_ARGS {
            return Err(BindError::TooManyArguments {
                got: supplied.len(),
            });
        }
        for slot in &supplied {
            if let Slot::Placeholder(index) = slot {
                if *index == 0 || *index > MAX_ARGS {
                    return Err(BindError::PlaceholderIndex { index: *index });
                }
            }
        }

        let signature = target.get().signature();
        if let Some(arity) = signature.arity() {
            if supplied.len() != arity {
                return Err(BindError::ArityMismatch {
                    expected: arity,
                    got: supplied.len(),
                });
            }
        }
        let signature = signature.with_convention(target.convention());

        trace!(
            "bound {} argument(s) to a target with signature {signature:?}",
            supplied.len()
        );
        Ok(DynBinder {
            target,
            slots: supplied.into_iter().collect(),
            signature,
        })
    }

    /// The descriptor captured at construction.
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// How the target is held and reached.
    pub fn convention(&self) -> Convention {
        self.target.convention()
    }

    /// The number of bound arguments.
    pub fn bound_len(&self) -> usize {
        self.slots.len()
    }

    /// Invoke the target with the supplied invocation arguments.
    ///
    /// Slots resolve left to right, exactly once per call: literals are
    /// cloned out of the binder, placeholders select the invocation
    /// argument at their index (a missing one is
    /// [`CallError::MissingArgument`]), and nested binders are invoked with
    /// the entire invocation-argument list, strictly before the outer
    /// target. Invocation arguments referenced by no placeholder are
    /// accepted and discarded. Resolution stops at the first failure.
    pub fn try_call(&self, args: Vec<Value>) -> Result<Value, CallError> {
        if args.len() > MAX_ARGS {
            return Err(CallError::TooManyArguments { got: args.len() });
        }
        trace!(
            "resolving {} slot(s) against {} invocation argument(s)",
            self.slots.len(),
            args.len()
        );
        let resolved = self.resolve_slots(&args)?;
        self.target.get().invoke(resolved)
    }

    /// Invoke and downcast the result to `R`.
    pub fn call_as<R: Any>(&self, args: Vec<Value>) -> Result<R, CallError> {
        let value = self.try_call(args)?;
        let found = value.type_name();
        value.downcast::<R>().map_err(|_| CallError::OutputType {
            expected: any::type_name::<R>(),
            found,
        })
    }

    fn resolve_slots(&self, args: &[Value]) -> Result<Vec<Value>, CallError> {
        let mut resolved = Vec::with_capacity(self.slots.len());
        for slot in &self.slots {
            let value = match slot {
                Slot::Literal(value) => value.clone(),
                Slot::Placeholder(index) => match args.get(index - 1) {
                    Some(value) => value.clone(),
                    None => {
                        debug!(
                            "placeholder {index} unresolved: {} argument(s) supplied",
                            args.len()
                        );
                        return Err(CallError::MissingArgument {
                            index: *index,
                            supplied: args.len(),
                        });
                    }
                },
                Slot::Nested(binder) => binder.try_call(args.to_vec())?,
            };
            resolved.push(value);
        }
        Ok(resolved)
    }
}

/// A [`DynBinder`] whose output type was named by the caller.
///
/// Produced by [`bind_dyn_with_output`]. [`try_call`](Self::try_call)
/// downcasts the target's result to `R`, reporting
/// [`CallError::OutputType`] on a mismatch.
pub struct TypedDynBinder<R> {
    inner: DynBinder,
    _output: PhantomData<fn() -> R>,
}

impl<R> Clone for TypedDynBinder<R> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            _output: PhantomData,
        }
    }
}

impl<R> fmt::Debug for TypedDynBinder<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedDynBinder")
            .field("inner", &self.inner)
            .field("output", &any::type_name::<R>())
            .finish()
    }
}

impl<R: Any> TypedDynBinder<R> {
    /// Invoke the target and downcast the result. See
    /// [`DynBinder::try_call`].
    pub fn try_call(&self, args: Vec<Value>) -> Result<R, CallError> {
        self.inner.call_as::<R>(args)
    }

    /// The descriptor captured at construction, with the requested output
    /// type.
    pub fn signature(&self) -> &Signature {
        self.inner.signature()
    }

    /// Discard the output typing.
    pub fn into_inner(self) -> DynBinder {
        self.inner
    }
}

// Factories
// ----------------------------------------------------------------------------

/// Bind a runtime-dispatch target to a bound-argument list.
///
/// `target` is a closure over `Any + Clone` argument types, or any
/// [`DynCallable`] object. Construction validates the list (see
/// [`DynBinder::new`]) and fails with a [`BindError`] before a binder
/// exists.
///
/// # Examples
///
/// ```
/// use bindery::{bind_dyn, Slot, Value};
///
/// let join = |sep: String, a: String, b: String| format!("{a}{sep}{b}");
/// let with_comma = bind_dyn(
///     join,
///     [
///         Slot::value(String::from(", ")),
///         Slot::arg(1),
///         Slot::arg(2),
///     ],
/// )
/// .unwrap();
///
/// let out = with_comma
///     .try_call(vec![
///         Value::new(String::from("a")),
///         Value::new(String::from("b")),
///     ])
///     .unwrap();
/// assert_eq!(out.downcast::<String>().unwrap(), "a, b");
/// ```
pub fn bind_dyn<T, Marker>(
    target: T,
    slots: impl IntoIterator<Item = Slot>,
) -> Result<DynBinder, BindError>
where
    T: IntoDynCallable<Marker>,
{
    DynBinder::new(target.into_dyn_callable(), slots)
}

/// Bind a shared runtime-dispatch target, reached by dereference.
///
/// Clones of the returned binder share the target by reference count; the
/// binder's descriptor reports
/// [`Convention::ByAddress`](crate::signature::Convention::ByAddress).
pub fn bind_dyn_shared(
    target: Rc<dyn DynCallable>,
    slots: impl IntoIterator<Item = Slot>,
) -> Result<DynBinder, BindError> {
    DynBinder::shared(target, slots)
}

/// Bind a runtime-dispatch target, naming its output type explicitly.
///
/// For targets that do not declare a return type (deferred or variadic
/// signatures), the caller states it; the descriptor records it and
/// invocation downcasts to it.
pub fn bind_dyn_with_output<R, T, Marker>(
    target: T,
    slots: impl IntoIterator<Item = Slot>,
) -> Result<TypedDynBinder<R>, BindError>
where
    R: Any,
    T: IntoDynCallable<Marker>,
{
    let mut inner = DynBinder::new(target.into_dyn_callable(), slots)?;
    inner.signature = inner.signature.with_output(any::type_name::<R>());
    Ok(TypedDynBinder {
        inner,
        _output: PhantomData,
    })
}
