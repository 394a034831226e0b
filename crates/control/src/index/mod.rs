//! Registry core: keyed storage of live control entries.
//!
//! # Mental Model
//!
//! 1. **Snapshot:** All state lives in one immutable `Snapshot`: a table per
//!    type namespace holding its id, alias and handle indices in registration
//!    order.
//! 2. **Reads:** [`ControlRegistry::lookup`], [`ControlRegistry::lookup_by_alias`]
//!    and [`ControlRegistry::list_by_type`] load the current snapshot. Listings pin
//!    the type table they were built from.
//! 3. **Writes:** [`ControlRegistry::register`] and [`ControlRegistry::unregister`]
//!    derive a new snapshot from the one they loaded, check keys against it, and
//!    publish with compare-and-swap. A failed swap re-runs the checks on the newer
//!    snapshot.
//! 4. **Teardown:** [`ControlRegistry::teardown`] swaps in an empty, closed snapshot.
//!
//! # Key Types
//!
//! | Type | Role |
//! |------|------|
//! | [`ControlRegistry`] | Atomic container and public entrypoint. |
//! | [`ControlEntry`] | Immutable registered control. |
//! | [`TypeListing`] | Point-in-time view of one type namespace. |
//! | `Snapshot` | Published state (crate-private). |
//!
//! # Concurrency
//!
//! - **Reads:** Wait-free (atomic load of current snapshot).
//! - **Writes:** Lock-free with linearizability (CAS retry loop).
//! - Per-type tables are shared across snapshots and copied only when a write
//!   touches that type, so a write costs the size of one table plus the type map.
//!
//! # Invariants
//!
//! - Must keep `(type, id)` unique among live entries.
//!   - Enforced in: [`ControlRegistry::register`].
//!   - Tested by: `invariants::test_single_winner_per_id`
//!   - Failure symptom: Two handles resolve to controls under one address.
//!
//! - Must keep non-empty `(type, alias)` unique among live entries.
//!   - Enforced in: [`ControlRegistry::register`].
//!   - Tested by: `invariants::test_single_winner_per_alias`
//!   - Failure symptom: Alias lookups flip between controls.
//!
//! - Must never reissue a handle.
//!   - Enforced in: `HandleAllocator`.
//!   - Tested by: `invariants::test_handles_never_reused`
//!   - Failure symptom: A stale unregister removes a newer registration.
//!
//! - Must provide linearizable writes without lost updates.
//!   - Enforced in: [`ControlRegistry::register`], [`ControlRegistry::unregister`] (CAS loop).
//!   - Tested by: `invariants::test_no_lost_updates`
//!   - Failure symptom: Concurrent registrations silently dropped.
//!
//! - Must resolve both keys of a live registration to the same entry.
//!   - Enforced in: `TypeTable::insert` / `TypeTable::remove` (both keys change together).
//!   - Tested by: `invariants::test_keys_resolve_consistently`
//!   - Failure symptom: Alias and id lookups disagree about a control.

mod entry;
mod runtime;
mod snapshot;

pub use entry::{ControlEntry, ControlObject};
pub use runtime::ControlRegistry;
pub use snapshot::TypeListing;

#[cfg(test)]
mod invariants;
