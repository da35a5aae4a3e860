//! `PropertySet`: shared state threaded through a pass pipeline.
//!
//! ```
//! use hubbard_compile::PropertySet;
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct GatesRemoved(usize);
//!
//! let mut props = PropertySet::new();
//! props.insert(GatesRemoved(3));
//! assert_eq!(props.get::<GatesRemoved>(), Some(&GatesRemoved(3)));
//! ```

use rustc_hash::FxHashMap;
use std::any::{Any, TypeId};

use crate::unitary::UnitaryMatrix;

/// Properties shared between passes.
#[derive(Debug, Default)]
pub struct PropertySet {
    /// Unitary the circuit is required to implement.
    ///
    /// Set by synthesis passes from the circuit they were given; read by
    /// passes that must preserve it.
    pub target: Option<UnitaryMatrix>,

    /// Custom properties storage (type-erased).
    custom: FxHashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl PropertySet {
    /// Create a new empty property set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a property set with a fixed target unitary.
    #[must_use]
    pub fn with_target(mut self, target: UnitaryMatrix) -> Self {
        self.target = Some(target);
        self
    }

    /// Insert a custom property.
    pub fn insert<T: Any + Send + Sync>(&mut self, value: T) {
        self.custom.insert(TypeId::of::<T>(), Box::new(value));
    }

    /// Get a custom property.
    pub fn get<T: Any>(&self) -> Option<&T> {
        self.custom
            .get(&TypeId::of::<T>())
            .and_then(|v| v.downcast_ref())
    }

    /// Get a mutable custom property.
    pub fn get_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.custom
            .get_mut(&TypeId::of::<T>())
            .and_then(|v| v.downcast_mut())
    }

    /// Remove a custom property.
    pub fn remove<T: Any>(&mut self) -> Option<T> {
        self.custom
            .remove(&TypeId::of::<T>())
            .and_then(|v| v.downcast().ok())
            .map(|v| *v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(clippy::items_after_statements)]
    fn test_property_set_custom() {
        let mut props = PropertySet::new();

        #[derive(Debug, PartialEq)]
        struct CustomData(i32);

        props.insert(CustomData(42));
        assert_eq!(props.get::<CustomData>(), Some(&CustomData(42)));

        if let Some(data) = props.get_mut::<CustomData>() {
            data.0 += 1;
        }
        let removed = props.remove::<CustomData>();
        assert_eq!(removed, Some(CustomData(43)));
        assert_eq!(props.get::<CustomData>(), None);
    }

    #[test]
    fn test_target() {
        let props = PropertySet::new().with_target(UnitaryMatrix::identity(2));
        assert_eq!(props.target.as_ref().map(UnitaryMatrix::dim), Some(4));
    }
}
