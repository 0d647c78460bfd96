//! Route type.

/// An ordered sequence of customer visits owned by a single vehicle.
///
/// The route starts and ends at the depot; the depot is not stored in
/// `customers` but is included by [`sequence`](Self::sequence).
///
/// # Examples
///
/// ```
/// use vrp_engine::models::Route;
///
/// let route = Route::new(0, 0, vec![2, 1], 17);
/// assert_eq!(route.sequence(), vec![0, 2, 1, 0]);
/// assert_eq!(route.len(), 2);
///
/// let idle = Route::new(1, 0, vec![], 0);
/// assert_eq!(idle.sequence(), vec![0, 0]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    vehicle_id: usize,
    depot: usize,
    customers: Vec<usize>,
    cost: i64,
}

impl Route {
    /// Creates a route for `vehicle_id` visiting `customers` in order.
    pub fn new(vehicle_id: usize, depot: usize, customers: Vec<usize>, cost: i64) -> Self {
        Self {
            vehicle_id,
            depot,
            customers,
            cost,
        }
    }

    /// Returns the vehicle assigned to this route.
    pub fn vehicle_id(&self) -> usize {
        self.vehicle_id
    }

    pub fn depot(&self) -> usize {
        self.depot
    }

    /// Returns the customer nodes in visit order (depot excluded).
    pub fn customers(&self) -> &[usize] {
        &self.customers
    }

    /// Full node sequence: depot, customers, depot.
    pub fn sequence(&self) -> Vec<usize> {
        let mut seq = Vec::with_capacity(self.customers.len() + 2);
        seq.push(self.depot);
        seq.extend_from_slice(&self.customers);
        seq.push(self.depot);
        seq
    }

    /// Integer arc cost of the whole route.
    pub fn cost(&self) -> i64 {
        self.cost
    }

    /// Returns the number of customer visits (excluding depot).
    pub fn len(&self) -> usize {
        self.customers.len()
    }

    /// Returns `true` if this route has no customer visits.
    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }
}
