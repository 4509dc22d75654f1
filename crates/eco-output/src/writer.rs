//! The sink interface shared by every output backend.

use crate::{AgentRow, CensusRow, OutputResult};

/// A destination for per-agent records and census rows.
///
/// [`SimOutputObserver`](crate::SimOutputObserver) calls `write_agents` then
/// `write_census` once per output tick, and `finish` once at the end of the
/// run.  A backend may buffer until `finish`.
pub trait OutputWriter {
    /// Write one output tick's agent rows, in ascending agent id order.
    fn write_agents(&mut self, rows: &[AgentRow]) -> OutputResult<()>;

    fn write_census(&mut self, row: &CensusRow) -> OutputResult<()>;

    /// Flush and close.  Calling it again is a no-op.
    fn finish(&mut self) -> OutputResult<()>;
}
