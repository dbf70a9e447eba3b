use uuid::Uuid;

use crate::cache::{route_key, vehicle_key};

/// Dependent rows a store removed while deleting a parent row.
///
/// Only vehicles and routes have parents, so only they can be cascaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cascade {
    pub vehicles: Vec<Uuid>,
    pub routes: Vec<Uuid>,
}

impl Cascade {
    /// Returns true if the delete removed nothing but the target row.
    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty() && self.routes.is_empty()
    }

    /// Item cache keys of every removed dependent.
    pub fn item_keys(&self) -> Vec<String> {
        self.vehicles
            .iter()
            .map(|id| vehicle_key(*id))
            .chain(self.routes.iter().map(|id| route_key(*id)))
            .collect()
    }
}
