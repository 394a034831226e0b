//! Control registry with atomic snapshot publication.
//!
//! # Role
//!
//! Thread-safe entrypoint for registering, unregistering and resolving controls.
//!
//! # Invariants
//!
//! - Key uniqueness is checked against the exact snapshot being replaced, so two
//!   racing registrations of the same key cannot both publish (see
//!   `invariants::test_single_winner_per_id`).
//! - Concurrent writes are linearizable (see `invariants::test_no_lost_updates`).
//! - Handles are allocated once per registration attempt and never reissued.

use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing::{debug, info, trace, warn};

use super::entry::{ControlEntry, ControlObject};
use super::snapshot::{Snapshot, TypeListing};
use crate::capability::CapabilityProfile;
use crate::config::RegistryConfig;
use crate::descriptor::InterfaceDescriptor;
use crate::error::{ConfigError, RegisterError};
use crate::handle::{ControlHandle, HandleAllocator};
use crate::validate::{InterfacePolicy, check_interface};

/// Process-local directory of control objects.
///
/// Controls are addressed by `(type, id)` and optionally `(type, alias)`. Reads load
/// the current snapshot without locking; writes publish a replacement snapshot with
/// compare-and-swap and retry from the latest one when they lose a race.
pub struct ControlRegistry {
	label: Arc<str>,
	handles: HandleAllocator,
	snap: ArcSwap<Snapshot>,
	policy: Option<Arc<dyn InterfacePolicy>>,
}

impl Default for ControlRegistry {
	fn default() -> Self {
		Self::from_valid(RegistryConfig::default())
	}
}

impl std::fmt::Debug for ControlRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let snap = self.snap.load();
		f.debug_struct("ControlRegistry")
			.field("label", &self.label)
			.field("len", &snap.len())
			.field("closed", &snap.closed)
			.field("policy", &self.policy.as_ref().map(|p| p.name().to_string()))
			.finish()
	}
}

impl ControlRegistry {
	/// Creates an empty registry.
	///
	/// Fails if `config` has an empty label or handle prefix.
	pub fn new(config: RegistryConfig) -> Result<Self, ConfigError> {
		config.validate()?;
		Ok(Self::from_valid(config))
	}

	/// Creates an empty registry that applies `policy` after the minimal check.
	pub fn with_policy(
		config: RegistryConfig,
		policy: Arc<dyn InterfacePolicy>,
	) -> Result<Self, ConfigError> {
		Ok(Self {
			policy: Some(policy),
			..Self::new(config)?
		})
	}

	fn from_valid(config: RegistryConfig) -> Self {
		Self {
			label: Arc::from(config.label),
			handles: HandleAllocator::new(&config.handle_prefix),
			snap: ArcSwap::from_pointee(Snapshot::default()),
			policy: None,
		}
	}

	/// Registry label from its config.
	pub fn label(&self) -> &str {
		&self.label
	}

	/// Registers `object` under `(ty, id)` and, when `alias` is non-empty, `(ty, alias)`.
	///
	/// The entry becomes visible to lookups atomically. `id` collisions are reported
	/// before alias collisions.
	pub fn register(
		&self,
		ty: &str,
		id: &str,
		alias: Option<&str>,
		descriptor: Arc<InterfaceDescriptor>,
		object: ControlObject,
	) -> Result<ControlHandle, RegisterError> {
		if ty.is_empty() {
			return Err(RegisterError::EmptyType);
		}
		if id.is_empty() {
			return Err(RegisterError::EmptyId { ty: ty.to_string() });
		}
		self.check_descriptor(ty, id, &descriptor)?;

		let alias = alias.filter(|a| !a.is_empty());
		let mut pending: Option<Arc<ControlEntry>> = None;

		loop {
			let old = self.snap.load_full();

			if old.closed {
				return Err(RegisterError::Closed {
					label: self.label.to_string(),
				});
			}

			if let Some(table) = old.table(ty) {
				if table.by_id.contains_key(id) {
					warn!(
						registry = %self.label,
						ty,
						id,
						"control registration rejected: duplicate id"
					);
					return Err(RegisterError::DuplicateIdentifier {
						ty: ty.to_string(),
						id: id.to_string(),
					});
				}
				if let Some(alias) = alias
					&& let Some(existing) = table.by_alias.get(alias)
				{
					warn!(
						registry = %self.label,
						ty,
						id,
						alias,
						owner = %existing.id,
						"control registration rejected: duplicate alias"
					);
					return Err(RegisterError::DuplicateAlias {
						ty: ty.to_string(),
						alias: alias.to_string(),
						owner_id: existing.id.to_string(),
					});
				}
			}

			let entry = pending
				.get_or_insert_with(|| {
					Arc::new(ControlEntry {
						ty: Arc::from(ty),
						id: Arc::from(id),
						alias: alias.map(Arc::from),
						descriptor: descriptor.clone(),
						object: object.clone(),
						handle: self.handles.allocate(),
					})
				})
				.clone();

			let next = Arc::new(old.with_entry(entry.clone()));
			let prev = self.snap.compare_and_swap(&old, next);

			if Arc::ptr_eq(&*prev, &old) {
				debug!(
					registry = %self.label,
					ty,
					id,
					alias,
					interface = %descriptor.name,
					handle = %entry.handle,
					"control registered"
				);
				return Ok(entry.handle.clone());
			}
			trace!(registry = %self.label, ty, id, "control registration raced, retrying");
		}
	}

	fn check_descriptor(
		&self,
		ty: &str,
		id: &str,
		descriptor: &InterfaceDescriptor,
	) -> Result<(), RegisterError> {
		let checked = check_interface(descriptor, CapabilityProfile::Minimal).and_then(|()| {
			match &self.policy {
				Some(policy) => policy.check(descriptor),
				None => Ok(()),
			}
		});

		checked.map_err(|violations| {
			warn!(
				registry = %self.label,
				ty,
				id,
				interface = %descriptor.name,
				violations = violations.len(),
				"control registration rejected: invalid interface"
			);
			RegisterError::InvalidInterface {
				interface: descriptor.name.clone(),
				violations,
			}
		})
	}

	/// Removes the entry issued `handle`.
	///
	/// Unknown, already-unregistered and torn-down handles are ignored.
	pub fn unregister(&self, handle: &str) {
		loop {
			let old = self.snap.load_full();
			let Some((next, entry)) = old.without_handle(handle) else {
				trace!(registry = %self.label, handle, "unregister ignored: unknown handle");
				return;
			};

			let prev = self.snap.compare_and_swap(&old, Arc::new(next));
			if Arc::ptr_eq(&*prev, &old) {
				debug!(
					registry = %self.label,
					ty = %entry.ty,
					id = %entry.id,
					handle,
					"control unregistered"
				);
				return;
			}
			trace!(registry = %self.label, handle, "control unregistration raced, retrying");
		}
	}

	/// Resolves `(ty, id)`.
	pub fn lookup(&self, ty: &str, id: &str) -> Option<Arc<ControlEntry>> {
		self.snap.load().table(ty)?.by_id.get(id).cloned()
	}

	/// Resolves `(ty, alias)`. An empty alias never matches.
	pub fn lookup_by_alias(&self, ty: &str, alias: &str) -> Option<Arc<ControlEntry>> {
		self.snap.load().table(ty)?.by_alias.get(alias).cloned()
	}

	/// Returns the live entries of `ty` as of now.
	pub fn list_by_type(&self, ty: &str) -> TypeListing {
		TypeListing {
			table: self.snap.load().table(ty).cloned(),
		}
	}

	/// Returns the types that currently have live entries, sorted.
	pub fn types(&self) -> Vec<Arc<str>> {
		let mut types: Vec<_> = self.snap.load().types.keys().cloned().collect();
		types.sort_unstable();
		types
	}

	/// Returns the number of live entries.
	pub fn len(&self) -> usize {
		self.snap.load().len()
	}

	/// Returns true if there are no live entries.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Returns true once [`Self::teardown`] has run.
	pub fn is_closed(&self) -> bool {
		self.snap.load().closed
	}

	/// Drops every entry and invalidates every handle.
	///
	/// Afterwards lookups miss, unregistration is a no-op and registration fails
	/// with [`RegisterError::Closed`].
	pub fn teardown(&self) {
		let old = self.snap.swap(Arc::new(Snapshot::closed()));
		if !old.closed {
			info!(registry = %self.label, dropped = old.len(), "control registry torn down");
		}
	}
}
