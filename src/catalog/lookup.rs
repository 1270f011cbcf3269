use super::{Catalog, Vehicle};

/// Result of resolving a model name against the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleMatch<'a> {
    /// A catalog model name contains the query
    Found(&'a Vehicle),
    /// Nothing matched; the catalog's first entry stands in
    FallbackUsed(&'a Vehicle),
}

impl<'a> VehicleMatch<'a> {
    pub fn vehicle(&self) -> &'a Vehicle {
        match self {
            VehicleMatch::Found(v) | VehicleMatch::FallbackUsed(v) => v,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, VehicleMatch::FallbackUsed(_))
    }
}

impl Catalog {
    /// Finds the first vehicle whose model name contains `query`,
    /// ignoring case. Never fails: a miss yields the first entry.
    pub fn find_vehicle(&self, query: &str) -> VehicleMatch<'_> {
        let needle = query.to_lowercase();
        self.vehicles()
            .iter()
            .find(|v| v.model.to_lowercase().contains(&needle))
            .map(VehicleMatch::Found)
            .unwrap_or_else(|| VehicleMatch::FallbackUsed(self.first()))
    }
}
