//! Type-erased, deep-clonable values for the runtime-dispatch path.

use core::any::{self, Any};
use core::fmt;

/// Object-safe backing trait for [`Value`].
///
/// Implemented for every `T: Any + Clone`; there is no reason to implement
/// it by hand.
pub trait AnyValue: Any {
    /// Deep-copy the value.
    fn clone_value(&self) -> Box<dyn AnyValue>;

    /// Borrow as [`Any`] for by-reference downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Unwrap into [`Any`] for by-value downcasting.
    fn into_any(self: Box<Self>) -> Box<dyn Any>;

    /// The name of the erased type, for diagnostics.
    fn value_type_name(&self) -> &'static str;
}

impl<T: Any + Clone> AnyValue for T {
    fn clone_value(&self) -> Box<dyn AnyValue> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }

    fn value_type_name(&self) -> &'static str {
        any::type_name::<T>()
    }
}

/// A type-erased bound or invocation value.
///
/// Cloning a `Value` deep-copies the payload, so values captured in
/// different binders never alias.
pub struct Value(Box<dyn AnyValue>);

impl Value {
    /// Erase `value`.
    pub fn new<T: Any + Clone>(value: T) -> Self {
        Value(Box::new(value))
    }

    /// Whether the erased type is `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.0.as_any().is::<T>()
    }

    /// Recover the concrete value, or give `self` back on a type mismatch.
    pub fn downcast<T: Any>(self) -> Result<T, Self> {
        if !self.is::<T>() {
            return Err(self);
        }
        // The `is` check above makes this downcast infallible.
        Ok(*self.0.into_any().downcast::<T>().expect("type was checked"))
    }

    /// Borrow the concrete value if the type matches.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.as_any().downcast_ref::<T>()
    }

    /// The name of the erased type.
    pub fn type_name(&self) -> &'static str {
        self.0.value_type_name()
    }
}

impl Clone for Value {
    fn clone(&self) -> Self {
        Value(self.0.clone_value())
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Value<{}>", self.type_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips() {
        let v = Value::new(42i32);
        assert!(v.is::<i32>());
        assert_eq!(v.downcast_ref::<i32>(), Some(&42));
        assert_eq!(v.downcast::<i32>().unwrap(), 42);
    }

    #[test]
    fn mismatches_give_the_value_back() {
        let v = Value::new(String::from("kept"));
        let v = v.downcast::<i32>().unwrap_err();
        assert_eq!(v.downcast::<String>().unwrap(), "kept");
    }

    #[test]
    fn clones_are_deep() {
        let original = Value::new(vec![1, 2, 3]);
        let copy = original.clone();
        let mut recovered = original.downcast::<Vec<i32>>().unwrap();
        recovered.push(4);
        // The copy still sees the original three elements.
        assert_eq!(copy.downcast::<Vec<i32>>().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn reports_the_erased_type_name() {
        let v = Value::new(1u8);
        assert_eq!(v.type_name(), core::any::type_name::<u8>());
        assert_eq!(format!("{v:?}"), format!("Value<{}>", v.type_name()));
    }
}
