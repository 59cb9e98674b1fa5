//! Lost-mode location tracking core.
//!
//! Three cooperating pieces, all driven through the capability traits in
//! `locify_common::services`:
//!
//! - [`tracker::LostModeTracker`] samples the agent's position on a fixed
//!   cadence for every device flagged as lost, pushing updates to the
//!   backend while online and queueing them while offline.
//! - [`sync::OfflineSyncAgent`] flushes the queued samples when the
//!   process starts and whenever connectivity returns.
//! - [`store::FilePendingStore`] is the durable queue shared by the two.

pub mod store;
pub mod sync;
pub mod tracker;

#[cfg(test)]
mod fakes;
