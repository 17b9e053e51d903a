//! Flow available at a node.

use std::fmt;

use bf_core::Real;

/// How much flow can leave a node.
///
/// Sources are `Unbounded`; every other node is bounded by the smallest
/// flow arriving on its inbound edges. Nodes a lenient run could not order
/// are `Unresolved`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Availability {
    #[default]
    Unbounded,
    Bounded(Real),
    Unresolved,
}

impl Availability {
    /// Flow an outbound edge of this capacity can carry.
    pub fn limit(self, capacity: Real) -> Real {
        match self {
            Availability::Unbounded => capacity,
            Availability::Bounded(v) => v.min(capacity),
            Availability::Unresolved => 0.0,
        }
    }

    /// Merge an inbound flow; availability only ever decreases.
    /// `Unresolved` stays unresolved.
    pub fn constrain(self, inbound: Real) -> Self {
        match self {
            Availability::Unbounded => Availability::Bounded(inbound),
            Availability::Bounded(v) => Availability::Bounded(v.min(inbound)),
            Availability::Unresolved => Availability::Unresolved,
        }
    }

    pub fn is_unbounded(self) -> bool {
        matches!(self, Availability::Unbounded)
    }

    pub fn is_unresolved(self) -> bool {
        matches!(self, Availability::Unresolved)
    }

    /// Finite value, or `None` when unbounded or unresolved.
    pub fn value(self) -> Option<Real> {
        match self {
            Availability::Bounded(v) => Some(v),
            Availability::Unbounded | Availability::Unresolved => None,
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Availability::Unbounded => write!(f, "unbounded"),
            Availability::Bounded(v) => write!(f, "{}", v),
            Availability::Unresolved => write!(f, "unresolved"),
        }
    }
}
