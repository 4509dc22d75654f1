//! Neighbor index: the proximity capability behaviours query.
//!
//! # Snapshot semantics
//!
//! An index is rebuilt once per tick from the positions of the agents live at
//! tick start.  Agents that move, die or are born during the tick are not
//! reflected until the next rebuild; [`NeighborQuery`](crate::NeighborQuery)
//! re-checks liveness against the store so kills are still honoured
//! immediately.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use eco_agent::AgentStore;
use eco_core::{AgentId, Vec2};

/// Pluggable proximity capability.
///
/// # Ordering
///
/// [`within`](Self::within) yields ids in ascending order.  There is no
/// distance ordering: the first result is whichever in-range agent has the
/// lowest id.
///
/// # Thread safety
///
/// Implementations must be `Send` so that independent runs, each owning an
/// index, can execute on different worker threads.
pub trait NeighborIndex: Send {
    /// Replace the indexed set with the store's current live agents.
    fn rebuild(&mut self, store: &AgentStore);

    /// Clear `out` and fill it with every indexed agent whose position lies
    /// within `radius` of `center` (inclusive), ascending by id.
    fn within(&self, center: Vec2, radius: f64, out: &mut Vec<AgentId>);

    /// Number of agents indexed by the last rebuild.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ── R-tree entry ──────────────────────────────────────────────────────────────

#[derive(Clone)]
struct AgentEntry {
    point: [f64; 2],
    id:    AgentId,
}

impl RTreeObject for AgentEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for AgentEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── RTreeIndex ────────────────────────────────────────────────────────────────

/// R-tree backed index.  Bulk-loaded on every rebuild, O(N log N).
pub struct RTreeIndex {
    tree: RTree<AgentEntry>,
}

impl RTreeIndex {
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }
}

impl Default for RTreeIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl NeighborIndex for RTreeIndex {
    fn rebuild(&mut self, store: &AgentStore) {
        let entries: Vec<AgentEntry> = store
            .live_ids()
            .map(|id| AgentEntry { point: store.pos[id].to_array(), id })
            .collect();
        self.tree = RTree::bulk_load(entries);
    }

    fn within(&self, center: Vec2, radius: f64, out: &mut Vec<AgentId>) {
        out.clear();
        out.extend(
            self.tree
                .locate_within_distance(center.to_array(), radius * radius)
                .map(|e| e.id),
        );
        // R-tree iteration order depends on tree shape, not on ids.
        out.sort_unstable();
    }

    fn len(&self) -> usize {
        self.tree.size()
    }
}

// ── ScanIndex ─────────────────────────────────────────────────────────────────

/// Linear scan over a position snapshot.  O(N) per query; the reference
/// implementation the R-tree is tested against, and faster for tiny
/// populations.
#[derive(Default)]
pub struct ScanIndex {
    entries: Vec<(AgentId, Vec2)>,
}

impl ScanIndex {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NeighborIndex for ScanIndex {
    fn rebuild(&mut self, store: &AgentStore) {
        self.entries.clear();
        self.entries.extend(store.live_ids().map(|id| (id, store.pos[id])));
    }

    fn within(&self, center: Vec2, radius: f64, out: &mut Vec<AgentId>) {
        let r2 = radius * radius;
        out.clear();
        // `entries` is already ascending: live_ids() yields in slot order,
        // which is id order.
        out.extend(
            self.entries
                .iter()
                .filter(|(_, pos)| pos.distance_squared(center) <= r2)
                .map(|(id, _)| *id),
        );
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
