//! Positional access to invocation-argument tuples.
//!
//! Invocation arguments are passed to a binder's call operator as a tuple of
//! 0 to [`MAX_ARGS`](crate::MAX_ARGS) elements. [`ArgAt`] maps a
//! placeholder's 1-based index to the corresponding tuple element; the
//! mapping is total over every valid (arity, index) pair and nothing else,
//! so a placeholder referencing a position the caller did not supply fails
//! to compile instead of failing at runtime.

/// A tuple usable as an invocation-argument list (arity 0..=14).
pub trait ArgList {
    /// The number of invocation arguments.
    const LEN: usize;
}

/// Access to the `I`-th invocation argument (1-based) of an argument tuple.
pub trait ArgAt<const I: usize>: ArgList {
    /// The type of the `I`-th invocation argument.
    type Arg;

    /// Borrow the `I`-th invocation argument.
    fn arg(&self) -> &Self::Arg;
}

macro_rules! impl_arg_list {
    ( @start $($x:tt)* ) => {
        impl_arg_list! { @iter [] [$($x)*] }
    };

    // inductive case
    ( @iter [$(($A:ident, $i:tt))*] [$next_head:tt $($next_tail:tt)*] ) => {
        impl_arg_list! { @impl $(($A, $i))* }
        impl_arg_list! { @iter [$(($A, $i))* $next_head] [$($next_tail)*] }
    };

    // base case: emit the maximum arity
    ( @iter [$(($A:ident, $i:tt))*] [] ) => {
        impl_arg_list! { @impl $(($A, $i))* }
    };

    ( @impl $(($A:ident, $i:tt))* ) => {
        impl<$($A,)*> ArgList for ($($A,)*) {
            const LEN: usize = 0 $(+ impl_arg_list!(@one $A))*;
        }
    };

    ( @one $A:ident ) => { 1 };
}

seq_macro::seq!(I in 0..14 { impl_arg_list! { @start #( (A~I, I) )* } });

// One implementation per (tuple arity, index) pair. The full index table is
// written out so that the element type selected by each index is explicit.
macro_rules! impl_arg_at {
    ( ($($A:ident),+): $($tail:tt)* ) => {
        impl_arg_at! { @go ($($A),+); $($tail)* }
    };

    ( @go ($($A:ident),+); $I:literal => $Sel:ident . $idx:tt , $($tail:tt)* ) => {
        impl<$($A),+> ArgAt<$I> for ($($A,)+) {
            type Arg = $Sel;

            #[inline]
            fn arg(&self) -> &Self::Arg {
                &self.$idx
            }
        }
        impl_arg_at! { @go ($($A),+); $($tail)* }
    };

    ( @go ($($A:ident),+); $I:literal => $Sel:ident . $idx:tt ) => {
        impl<$($A),+> ArgAt<$I> for ($($A,)+) {
            type Arg = $Sel;

            #[inline]
            fn arg(&self) -> &Self::Arg {
                &self.$idx
            }
        }
    };

    ( @go ($($A:ident),+); ) => {};
}

impl_arg_at!((A0): 1 => A0.0);
impl_arg_at!((A0, A1): 1 => A0.0, 2 => A1.1);
impl_arg_at!((A0, A1, A2): 1 => A0.0, 2 => A1.1, 3 => A2.2);
impl_arg_at!((A0, A1, A2, A3): 1 => A0.0, 2 => A1.1, 3 => A2.2, 4 => A3.3);
impl_arg_at!((A0, A1, A2, A3, A4):
    1 => A0.0, 2 => A1.1, 3 => A2.2, 4 => A3.3, 5 => A4.4);
impl_arg_at!((A0, A1, A2, A3, A4, A5):
    1 => A0.0, 2 => A1.1, 3 => A2.2, 4 => A3.3, 5 => A4.4, 6 => A5.5);
impl_arg_at!((A0, A1, A2, A3, A4, A5, A6):
    1 => A0.0, 2 => A1.1, 3 => A2.2, 4 => A3.3, 5 => A4.4, 6 => A5.5,
    7 => A6.6);
impl_arg_at!((A0, A1, A2, A3, A4, A5, A6, A7):
    1 => A0.0, 2 => A1.1, 3 => A2.2, 4 => A3.3, 5 => A4.4, 6 => A5.5,
    7 => A6.6, 8 => A7.7);
impl_arg_at!((A0, A1, A2, A3, A4, A5, A6, A7, A8):
    1 => A0.0, 2 => A1.1, 3 => A2.2, 4 => A3.3, 5 => A4.4, 6 => A5.5,
    7 => A6.6, 8 => A7.7, 9 => A8.8);
impl_arg_at!((A0, A1, A2, A3, A4, A5, A6, A7, A8, A9):
    1 => A0.0, 2 => A1.1, 3 => A2.2, 4 => A3.3, 5 => A4.4, 6 => A5.5,
    7 => A6.6, 8 => A7.7, 9 => A8.8, 10 => A9.9);
impl_arg_at!((A0, A1, A2, A3, A4, A5, A6, A7, A8, A9, A10):
    1 => A0.0, 2 => A1.1, 3 => A2.2, 4 => A3.3, 5 => A4.4, 6 => A5.5,
    7 => A6.6, 8 => A7.7, 9 => A8.8, 10 => A9.9, 11 => A10.10);
impl_arg_at!((A0, A1, A2, A3, A4, A5, A6, A7, A8, A9, A10, A11):
    1 => A0.0, 2 => A1.1, 3 => A2.2, 4 => A3.3, 5 => A4.4, 6 => A5.5,
    7 => A6.6, 8 => A7.7, 9 => A8.8, 10 => A9.9, 11 => A10.10, 12 => A11.11);
impl_arg_at!((A0, A1, A2, A3, A4, A5, A6, A7, A8, A9, A10, A11, A12):
    1 => A0.0, 2 => A1.1, 3 => A2.2, 4 => A3.3, 5 => A4.4, 6 => A5.5,
    7 => A6.6, 8 => A7.7, 9 => A8.8, 10 => A9.9, 11 => A10.10, 12 => A11.11,
    13 => A12.12);
impl_arg_at!((A0, A1, A2, A3, A4, A5, A6, A7, A8, A9, A10, A11, A12, A13):
    1 => A0.0, 2 => A1.1, 3 => A2.2, 4 => A3.3, 5 => A4.4, 6 => A5.5,
    7 => A6.6, 8 => A7.7, 9 => A8.8, 10 => A9.9, 11 => A10.10, 12 => A11.11,
    13 => A12.12, 14 => A13.13);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lengths() {
        assert_eq!(<() as ArgList>::LEN, 0);
        assert_eq!(<(u8,) as ArgList>::LEN, 1);
        assert_eq!(
            <(u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8) as ArgList>::LEN,
            14
        );
    }

    #[test]
    fn selects_by_position() {
        let args = (1u8, "two", 3.0f64);
        assert_eq!(*<_ as ArgAt<1>>::arg(&args), 1u8);
        assert_eq!(*<_ as ArgAt<2>>::arg(&args), "two");
        assert_eq!(*<_ as ArgAt<3>>::arg(&args), 3.0f64);
    }

    #[test]
    fn last_position_of_the_widest_tuple() {
        let args = (0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 99u32);
        assert_eq!(*<_ as ArgAt<14>>::arg(&args), 99u32);
    }
}
