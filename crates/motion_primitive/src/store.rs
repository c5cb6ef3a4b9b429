use crate::builder::Outcome;
use crate::primitive::MotionPrimitive;
use crate::{Error, Result};

/// Capacity-bounded, append-only collection of accepted primitives
///
/// The capacity is fixed when the store is created and must cover every
/// primitive a run can accept. Going past it is a sizing mistake and is
/// reported as [`Error::StoreFull`]; the store never grows or evicts.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrimitiveStore {
    capacity: usize,
    primitives: Vec<MotionPrimitive>,
}

impl PrimitiveStore {
    /// Create an empty store holding at most `capacity` primitives
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            primitives: Vec::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.primitives.len() == self.capacity
    }

    /// Append an accepted primitive
    pub fn push(&mut self, primitive: MotionPrimitive) -> Result<()> {
        if self.is_full() {
            return Err(Error::StoreFull {
                capacity: self.capacity,
            });
        }
        self.primitives.push(primitive);
        Ok(())
    }

    /// Append the primitive of an accepted outcome; declined outcomes are
    /// dropped
    ///
    /// Returns whether anything was stored.
    pub fn record(&mut self, outcome: Outcome) -> Result<bool> {
        match outcome {
            Outcome::Accepted(primitive) => self.push(primitive).map(|()| true),
            Outcome::Declined(_) => Ok(false),
        }
    }

    /// Append every primitive of `other`, keeping its order
    ///
    /// Used to combine stores filled by independent workers. Nothing is
    /// moved if the combined contents would not fit.
    pub fn merge(&mut self, other: PrimitiveStore) -> Result<()> {
        if self.primitives.len() + other.primitives.len() > self.capacity {
            return Err(Error::StoreFull {
                capacity: self.capacity,
            });
        }
        self.primitives.extend(other.primitives);
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&MotionPrimitive> {
        self.primitives.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MotionPrimitive> {
        self.primitives.iter()
    }

    pub fn as_slice(&self) -> &[MotionPrimitive] {
        &self.primitives
    }

    pub fn into_vec(self) -> Vec<MotionPrimitive> {
        self.primitives
    }
}

impl<'a> IntoIterator for &'a PrimitiveStore {
    type Item = &'a MotionPrimitive;
    type IntoIter = std::slice::Iter<'a, MotionPrimitive>;

    fn into_iter(self) -> Self::IntoIter {
        self.primitives.iter()
    }
}
