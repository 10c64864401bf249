//! The bound-callable composite and its factories.
//!
//! A [`Binder`] pairs a target callable with a bound-argument list and
//! exposes a call operator for 0 to [`MAX_ARGS`](crate::MAX_ARGS)
//! invocation arguments. Invoking it materializes every bound-argument slot
//! (left to right, exactly once), then forwards the materialized tuple to
//! the target.
//!
//! Everything here is statically typed: the target's signature is carried
//! by its [`Fn`] implementation, and any mismatch between the bound
//! arguments, the invocation arguments, and the target's parameters is a
//! build-time diagnostic. For targets whose signature can only be resolved
//! at invocation time, see the [`dynamic`](crate::dynamic) module.

use core::{any, fmt};
use std::rc::Rc;

use bumpalo::Bump;

use crate::argument::{BoundArg, BoundArgList, Materialize, MaterializeList};
use crate::callable::Callable;
use crate::invocation::ArgList;
use crate::signature::Signature;

// Binder
// ----------------------------------------------------------------------------

/// A reusable bound callable.
///
/// Produced by [`bind`], [`bind_in`], or (wrapped) [`bind_shared`].
/// Immutable after construction except through whole-value assignment;
/// cloning deep-copies the target and every bound argument, so distinct
/// binder values never alias each other's storage.
///
/// # Examples
///
/// ```
/// use bindery::{bind, fixed, P1};
///
/// fn scale(factor: i32, value: i32) -> i32 {
///     factor * value
/// }
///
/// let triple = bind(scale, (fixed(3), P1));
/// assert_eq!(triple.call((14,)), 42);
///
/// // The copy is independent but behaves identically.
/// let copy = triple.clone();
/// assert_eq!(copy.call((14,)), 42);
/// ```
pub struct Binder<F, L> {
    target: F,
    bound: L,
}

impl<F: Clone, L: Clone> Clone for Binder<F, L> {
    fn clone(&self) -> Self {
        Self {
            target: self.target.clone(),
            bound: self.bound.clone(),
        }
    }
}

impl<F, L> fmt::Debug for Binder<F, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binder")
            .field("target", &any::type_name::<F>())
            .field("bound", &any::type_name::<L>())
            .finish()
    }
}

impl<F, L: BoundArgList> Binder<F, L> {
    /// The number of bound arguments.
    pub fn bound_len(&self) -> usize {
        L::LEN
    }
}

impl<F, L> Binder<F, L> {
    /// Invoke the target with the supplied invocation arguments.
    ///
    /// Every bound-argument slot is materialized exactly once, left to
    /// right: literals are cloned out of the binder, placeholders select
    /// the invocation argument at their index, and nested binders are
    /// invoked with the entire invocation-argument list. Invocation
    /// arguments referenced by no placeholder are accepted and discarded
    /// (their construction side effects having occurred at the call site),
    /// but every position up to the highest placeholder index used must be
    /// supplied — a placeholder with no matching argument does not compile.
    #[inline]
    pub fn call<Args>(&self, args: Args) -> <Self as Invoke<Args>>::Output
    where
        Args: ArgList,
        Self: Invoke<Args>,
    {
        self.invoke_with(&args)
    }
}

// Invocation dispatch
// ----------------------------------------------------------------------------

/// Arity-generic invocation: materializing a binder's bound arguments
/// against an invocation-argument tuple and calling the target.
///
/// Implemented for every [`Binder`] whose bound-argument list materializes
/// (under `Args`) into a tuple the target accepts.
pub trait Invoke<Args> {
    /// The target's return type.
    type Output;

    /// Materialize every slot against `args`, then call the target.
    fn invoke_with(&self, args: &Args) -> Self::Output;

    /// The descriptor of the target as it will be invoked for `Args`.
    fn describe(&self) -> Signature;
}

impl<F, L, Args> Invoke<Args> for Binder<F, L>
where
    L: MaterializeList<Args>,
    F: Callable<<L as MaterializeList<Args>>::Output>,
{
    type Output = <F as Callable<<L as MaterializeList<Args>>::Output>>::Output;

    #[inline]
    fn invoke_with(&self, args: &Args) -> Self::Output {
        self.target.invoke(self.bound.materialize_list(args))
    }

    fn describe(&self) -> Signature {
        <F as Callable<<L as MaterializeList<Args>>::Output>>::describe()
    }
}

impl<F, L> BoundArg for Binder<F, L> {}

/// A nested binder materializes by invoking itself with the entire
/// invocation-argument list, strictly before the enclosing target's call.
impl<Args, F, L> Materialize<Args> for Binder<F, L>
where
    Binder<F, L>: Invoke<Args>,
{
    type Output = <Binder<F, L> as Invoke<Args>>::Output;

    #[inline]
    fn materialize(&self, args: &Args) -> Self::Output {
        self.invoke_with(args)
    }
}

// Shared binders
// ----------------------------------------------------------------------------

/// A reference-counted binder.
///
/// Produced by [`bind_shared`]. Invocation behaves exactly like the
/// underlying [`Binder`], but cloning shares the target and bound arguments
/// instead of deep-copying them — the economical choice when the same bound
/// callable is handed to many holders. The shared state is immutable, so
/// holders cannot observe each other.
pub struct SharedBinder<F, L> {
    inner: Rc<Binder<F, L>>,
}

impl<F, L> Clone for SharedBinder<F, L> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<F, L> fmt::Debug for SharedBinder<F, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedBinder")
            .field("target", &any::type_name::<F>())
            .field("bound", &any::type_name::<L>())
            .finish()
    }
}

impl<F, L: BoundArgList> SharedBinder<F, L> {
    /// The number of bound arguments.
    pub fn bound_len(&self) -> usize {
        L::LEN
    }
}

impl<F, L> SharedBinder<F, L> {
    /// Invoke the target. See [`Binder::call`].
    #[inline]
    pub fn call<Args>(&self, args: Args) -> <Binder<F, L> as Invoke<Args>>::Output
    where
        Args: ArgList,
        Binder<F, L>: Invoke<Args>,
    {
        self.inner.invoke_with(&args)
    }
}

impl<F, L> BoundArg for SharedBinder<F, L> {}

impl<Args, F, L> Materialize<Args> for SharedBinder<F, L>
where
    Binder<F, L>: Invoke<Args>,
{
    type Output = <Binder<F, L> as Invoke<Args>>::Output;

    #[inline]
    fn materialize(&self, args: &Args) -> Self::Output {
        self.inner.invoke_with(args)
    }
}

// Factories
// ----------------------------------------------------------------------------

/// Bind `target` to a bound-argument list.
///
/// Each element of `bound` is a [`fixed`](crate::argument::fixed) literal,
/// a placeholder [`P1`](crate::placeholder::P1)..[`P14`](crate::placeholder::P14),
/// or another binder. Lists of 0 to [`MAX_ARGS`](crate::MAX_ARGS) elements
/// are supported; anything else — a longer tuple, or a bare value in the
/// list — is rejected at compile time, before a binder exists.
///
/// # Examples
///
/// ```
/// use bindery::{bind, fixed, P1, P2};
///
/// fn join(sep: &str, a: &str, b: &str) -> String {
///     format!("{a}{sep}{b}")
/// }
///
/// let with_comma = bind(join, (fixed(", "), P1, P2));
/// assert_eq!(with_comma.call(("a", "b")), "a, b");
///
/// // Composition: the nested binder sees the same invocation arguments.
/// fn exclaim(s: String) -> String {
///     s + "!"
/// }
/// let excited = bind(exclaim, (bind(join, (fixed(" "), P1, P2)),));
/// assert_eq!(excited.call(("oh", "my")), "oh my!");
/// ```
pub fn bind<F, L: BoundArgList>(target: F, bound: L) -> Binder<F, L> {
    Binder { target, bound }
}

/// Bind `target`, storing it in a caller-supplied arena.
///
/// The target is moved into `arena` and held by reference; the arena is
/// borrowed for the binder's lifetime and never owned by it. Combine with
/// [`fixed_in`](crate::argument::fixed_in) to keep the bound literals in
/// the same arena.
///
/// # Examples
///
/// ```
/// use bindery::{bind_in, fixed_in, P1};
/// use bumpalo::Bump;
///
/// let arena = Bump::new();
/// let add = |a: i32, b: i32| a + b;
/// let offset = bind_in(&arena, add, (fixed_in(&arena, 100), P1));
/// assert_eq!(offset.call((1,)), 101);
/// ```
pub fn bind_in<'arena, F, L: BoundArgList>(
    arena: &'arena Bump,
    target: F,
    bound: L,
) -> Binder<&'arena F, L> {
    Binder {
        target: arena.alloc(target),
        bound,
    }
}

/// Bind `target`, returning a reference-counted [`SharedBinder`].
///
/// Use this when the bound callable is copied around a lot: clones share
/// storage instead of deep-copying the target and bound arguments.
pub fn bind_shared<F, L: BoundArgList>(target: F, bound: L) -> SharedBinder<F, L> {
    SharedBinder {
        inner: Rc::new(bind(target, bound)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::argument::{fixed, fixed_in};
    use crate::placeholder::{P1, P10, P11, P12, P13, P14, P2, P3, P4, P5, P6, P7, P8, P9};
    use quickcheck_macros::quickcheck;
    use std::cell::Cell;

    fn sub(a: i32, b: i32) -> i32 {
        a.wrapping_sub(b)
    }

    fn sum3(a: i32, b: i32, c: i32) -> i32 {
        a.wrapping_add(b).wrapping_add(c)
    }

    fn pair(a: i32, b: i32) -> (i32, i32) {
        (a, b)
    }

    fn one(v: i32) -> i32 {
        v
    }

    #[quickcheck]
    fn straight_through_forwarding(a: i32, b: i32, c: i32) -> bool {
        bind(sum3, (P1, P2, P3)).call((a, b, c)) == sum3(a, b, c)
    }

    #[quickcheck]
    fn literal_fixation(c: i32, x: i32, unused: i32) -> bool {
        bind(sub, (fixed(c), P1)).call((x, unused)) == sub(c, x)
    }

    #[quickcheck]
    fn placeholder_reordering(a: i32, b: i32) -> bool {
        bind(sub, (P2, P1)).call((a, b)) == sub(b, a)
    }

    #[quickcheck]
    fn argument_discarding(x: i32, y: i32, z: i32) -> bool {
        bind(one, (P2,)).call((x, y, z)) == y
    }

    #[quickcheck]
    fn copies_behave_identically(c: i32, x: i32) -> bool {
        let base = bind(sub, (fixed(c), P1));
        base.clone().call((x,)) == base.call((x,))
    }

    #[test]
    fn placeholder_duplication_evaluates_the_argument_once() {
        let calls = Cell::new(0);
        let next = || {
            calls.set(calls.get() + 1);
            calls.get()
        };

        let both = bind(pair, (P1, P1));
        assert_eq!(both.call((next(),)), (1, 1));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn nested_binder_composition() {
        fn outer(p: i32, q: i32) -> i32 {
            p * 100 + q
        }
        fn inner(p: i32, q: i32) -> i32 {
            p + q
        }

        let composed = bind(outer, (P1, bind(inner, (P1, P2))));
        assert_eq!(composed.call((2, 3)), 205);
    }

    #[test]
    fn discarded_arguments_need_not_be_cloneable() {
        struct Opaque;
        assert_eq!(bind(one, (P2,)).call((Opaque, 7, Opaque)), 7);
    }

    #[test]
    fn nullary_targets() {
        fn forty_two() -> i32 {
            42
        }
        assert_eq!(bind(forty_two, ()).call(()), 42);
        // A nullary binder still accepts, and discards, invocation
        // arguments.
        assert_eq!(bind(forty_two, ()).call((1, "x", 3.0)), 42);
    }

    #[test]
    fn void_targets() {
        let hits = Cell::new(0);
        let record = |n: i32| {
            hits.set(hits.get() + n);
        };
        let b = bind(&record, (P1,));
        b.call((5,));
        b.call((2,));
        assert_eq!(hits.get(), 7);
    }

    #[test]
    #[allow(clippy::too_many_arguments)]
    fn full_arity() {
        fn total(
            a: i32,
            b: i32,
            c: i32,
            d: i32,
            e: i32,
            f: i32,
            g: i32,
            h: i32,
            i: i32,
            j: i32,
            k: i32,
            l: i32,
            m: i32,
            n: i32,
        ) -> i32 {
            a + b + c + d + e + f + g + h + i + j + k + l + m + n
        }

        let all = bind(
            total,
            (P1, P2, P3, P4, P5, P6, P7, P8, P9, P10, P11, P12, P13, P14),
        );
        assert_eq!(
            all.call((1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14)),
            105
        );
        assert_eq!(all.bound_len(), 14);

        // The 14th invocation argument is reachable from a single
        // placeholder as well.
        let last = bind(one, (P14,));
        assert_eq!(last.call((0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 99)), 99);
    }

    #[test]
    fn member_function_targets() {
        struct Widget {
            scale: i32,
        }
        impl Widget {
            fn scaled(&self, k: i32) -> i32 {
                self.scale * k
            }
        }

        let w = Widget { scale: 3 };

        // Receiver fixed at bind time.
        let by_bind = bind(Widget::scaled, (fixed(&w), P1));
        assert_eq!(by_bind.call((5,)), 15);

        // Receiver supplied at invocation time.
        let by_call = bind(Widget::scaled, (P1, P2));
        assert_eq!(by_call.call((&w, 7)), 21);
    }

    #[test]
    fn arena_backed_binders() {
        let arena = Bump::new();
        let add = |a: i32, b: i32| a + b;
        let offset = bind_in(&arena, add, (fixed_in(&arena, 100), P1));
        assert_eq!(offset.call((1,)), 101);

        let copy = offset.clone();
        assert_eq!(copy.call((2,)), 102);
    }

    #[test]
    fn shared_binders_share_storage() {
        let shared = bind_shared(sub, (P1, fixed(1)));
        let copy = shared.clone();
        assert_eq!(shared.call((9,)), 8);
        assert_eq!(copy.call((9,)), 8);
        assert_eq!(shared.bound_len(), 2);
    }

    #[test]
    fn shared_binders_nest() {
        fn outer(a: i32, b: i32) -> i32 {
            a * b
        }
        let inner = bind_shared(sub, (P1, P2));
        let composed = bind(outer, (P1, inner));
        assert_eq!(composed.call((6, 2)), 24);
    }

    #[test]
    fn describes_the_target_under_concrete_arguments() {
        use core::any::type_name;

        let b = bind(sub, (P1, P2));
        let sig = Invoke::<(i32, i32)>::describe(&b);
        assert_eq!(sig.arity(), Some(2));
        assert_eq!(sig.params(), &[type_name::<i32>(), type_name::<i32>()][..]);
        assert_eq!(sig.output(), Some(type_name::<i32>()));
    }

    #[test]
    fn debug_output_names_the_types() {
        let b = bind(sub, (P1, P2));
        let text = format!("{b:?}");
        assert!(text.contains("Binder"));
        assert!(text.contains("Placeholder"));
    }
}
