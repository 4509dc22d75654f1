//! Agent identifiers.
//!
//! An [`AgentId`] is a generational slot-map key: the arena slot plus the
//! version the slot had when the agent was inserted.  Slots are recycled once
//! their occupant has been reaped, but the version moves on, so an id held
//! across ticks (a scent marker's source rabbit) stops resolving the moment
//! its agent is killed and never names the slot's next occupant.
//!
//! Ids order by slot, which is the order the arena iterates in.

use slotmap::new_key_type;

new_key_type! {
    /// Generation-checked handle to one agent in an `AgentStore`.
    pub struct AgentId;
}
