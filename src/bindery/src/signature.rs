//! Static descriptions of bindable targets.
//!
//! A [`Signature`] records what is knowable about a target callable ahead of
//! invocation: its parameter types, its return type, how the binder reaches
//! it ([`Convention`]), and whether any of that knowledge is deferred to
//! invocation time ([`SignatureFlags`]). On the statically typed path the
//! descriptor is derived from the target's [`Fn`] implementation (see
//! [`Callable::describe`](crate::callable::Callable::describe)); on the
//! dynamically typed path each target reports its own, possibly partial,
//! descriptor. A binder derives its descriptor once at construction and
//! never recomputes it.

use arrayvec::ArrayVec;

use crate::MAX_ARGS;

bitflags::bitflags! {
    /// Properties of a target that decide how a binder may treat it.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SignatureFlags: u8 {
        /// Parameter types are resolved anew on every invocation. The
        /// target may accept several argument-type combinations, selected
        /// by inspecting the supplied values.
        const DEFERRED_PARAMS = 1 << 0;

        /// The target accepts any number of arguments. Declared-arity
        /// validation is skipped at construction.
        const VARIADIC = 1 << 1;
    }
}

/// How a binder reaches its target when invoking it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Convention {
    /// The target is held by value and called directly.
    Direct,
    /// The target is held behind a pointer and dereferenced before the
    /// call.
    ByAddress,
}

/// A description of a target callable.
///
/// Parameter and output types are recorded by name
/// ([`core::any::type_name`]), which keeps the descriptor free of `'static`
/// bounds on the described types. The output is `None` when the target does
/// not declare one; an explicitly requested output type (see
/// [`bind_dyn_with_output`](crate::dynamic::bind_dyn_with_output)) overrides
/// it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    params: ArrayVec<&'static str, MAX_ARGS>,
    output: Option<&'static str>,
    flags: SignatureFlags,
    convention: Convention,
}

impl Signature {
    /// A fully known signature: every parameter type and the output type.
    ///
    /// # Panics
    ///
    /// Panics if more than [`MAX_ARGS`](crate::MAX_ARGS) parameters are
    /// listed.
    pub fn known(params: &[&'static str], output: &'static str) -> Self {
        assert!(
            params.len() <= MAX_ARGS,
            "a signature lists at most {MAX_ARGS} parameters"
        );
        let mut list = ArrayVec::new();
        list.extend(params.iter().copied());
        Self {
            params: list,
            output: Some(output),
            flags: SignatureFlags::empty(),
            convention: Convention::Direct,
        }
    }

    /// A signature whose parameter types are resolved per invocation.
    pub fn deferred() -> Self {
        Self {
            params: ArrayVec::new(),
            output: None,
            flags: SignatureFlags::DEFERRED_PARAMS,
            convention: Convention::Direct,
        }
    }

    /// A signature accepting any number of arguments.
    pub fn variadic() -> Self {
        Self {
            params: ArrayVec::new(),
            output: None,
            flags: SignatureFlags::VARIADIC,
            convention: Convention::Direct,
        }
    }

    /// Replace the output type.
    #[must_use]
    pub fn with_output(mut self, output: &'static str) -> Self {
        self.output = Some(output);
        self
    }

    /// Replace the calling convention.
    #[must_use]
    pub fn with_convention(mut self, convention: Convention) -> Self {
        self.convention = convention;
        self
    }

    /// The declared arity, or `None` when it is deferred or unbounded.
    pub fn arity(&self) -> Option<usize> {
        if self
            .flags
            .intersects(SignatureFlags::DEFERRED_PARAMS | SignatureFlags::VARIADIC)
        {
            None
        } else {
            Some(self.params.len())
        }
    }

    /// The declared parameter type names, in order. Empty when deferred.
    pub fn params(&self) -> &[&'static str] {
        &self.params
    }

    /// The output type name, if one is declared or was requested
    /// explicitly.
    pub fn output(&self) -> Option<&'static str> {
        self.output
    }

    /// The property flags.
    pub fn flags(&self) -> SignatureFlags {
        self.flags
    }

    /// The calling convention.
    pub fn convention(&self) -> Convention {
        self.convention
    }

    /// Whether parameter types are resolved per invocation.
    pub fn is_deferred(&self) -> bool {
        self.flags.contains(SignatureFlags::DEFERRED_PARAMS)
    }

    /// Whether the target accepts any number of arguments.
    pub fn is_variadic(&self) -> bool {
        self.flags.contains(SignatureFlags::VARIADIC)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::any::type_name;

    #[test]
    fn known_signatures_declare_their_arity() {
        let sig = Signature::known(&[type_name::<i32>(), type_name::<&str>()], type_name::<u8>());
        assert_eq!(sig.arity(), Some(2));
        assert_eq!(sig.params().len(), 2);
        assert_eq!(sig.output(), Some(type_name::<u8>()));
        assert_eq!(sig.convention(), Convention::Direct);
        assert!(!sig.is_deferred());
        assert!(!sig.is_variadic());
    }

    #[test]
    fn deferred_and_variadic_hide_their_arity() {
        assert_eq!(Signature::deferred().arity(), None);
        assert_eq!(Signature::variadic().arity(), None);
        assert!(Signature::deferred().is_deferred());
        assert!(Signature::variadic().is_variadic());
    }

    #[test]
    fn adjusters() {
        let sig = Signature::deferred()
            .with_output(type_name::<String>())
            .with_convention(Convention::ByAddress);
        assert_eq!(sig.output(), Some(type_name::<String>()));
        assert_eq!(sig.convention(), Convention::ByAddress);
    }

    #[test]
    #[should_panic(expected = "at most")]
    fn oversized_parameter_lists_are_rejected() {
        let names = [type_name::<i32>(); 15];
        let _ = Signature::known(&names, type_name::<i32>());
    }
}
