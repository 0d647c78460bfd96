//! Vehicle type.

/// A vehicle that starts and ends its route at the depot.
///
/// # Examples
///
/// ```
/// use vrp_engine::models::Vehicle;
///
/// let v = Vehicle::new(0).with_capacity(200);
/// assert_eq!(v.id(), 0);
/// assert_eq!(v.capacity(), Some(200));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vehicle {
    id: usize,
    capacity: Option<i64>,
}

impl Vehicle {
    /// Creates an uncapacitated vehicle with the given ID.
    pub fn new(id: usize) -> Self {
        Self { id, capacity: None }
    }

    /// Sets the load capacity.
    pub fn with_capacity(mut self, capacity: i64) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Vehicle ID.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Maximum load capacity, if the vehicle is capacitated.
    pub fn capacity(&self) -> Option<i64> {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_new() {
        let v = Vehicle::new(3);
        assert_eq!(v.id(), 3);
        assert!(v.capacity().is_none());
    }

    #[test]
    fn test_vehicle_with_capacity() {
        let v = Vehicle::new(1).with_capacity(100);
        assert_eq!(v.capacity(), Some(100));
    }
}
