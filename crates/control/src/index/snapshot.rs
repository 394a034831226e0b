//! Immutable published state and the views handed to readers.
//!
//! # Role
//!
//! Pure data. Writers derive a new [`Snapshot`] from the current one; nothing here
//! mutates a published value.
//!
//! # Invariants
//!
//! - Every entry in a table's `by_handle` is present in the same table under `id`,
//!   and under `alias` when it has one. Nothing else is.
//! - A handle appears in at most one table.
//! - Type tables are never empty; the last removal drops the table.
//! - A write copies the outer type map and the one table it touches. Every other
//!   table is shared with the previous snapshot.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::entry::ControlEntry;
use crate::handle::ControlHandle;

/// Entries of one type namespace.
#[derive(Clone, Default)]
pub(crate) struct TypeTable {
	/// Registration order.
	pub(crate) entries: Vec<Arc<ControlEntry>>,
	pub(crate) by_id: FxHashMap<Arc<str>, Arc<ControlEntry>>,
	pub(crate) by_alias: FxHashMap<Arc<str>, Arc<ControlEntry>>,
	pub(crate) by_handle: FxHashMap<ControlHandle, Arc<ControlEntry>>,
}

impl TypeTable {
	fn insert(&mut self, entry: Arc<ControlEntry>) {
		self.by_id.insert(entry.id.clone(), entry.clone());
		if let Some(alias) = &entry.alias {
			self.by_alias.insert(alias.clone(), entry.clone());
		}
		self.by_handle.insert(entry.handle.clone(), entry.clone());
		self.entries.push(entry);
	}

	fn remove(&mut self, entry: &Arc<ControlEntry>) {
		self.entries.retain(|e| !Arc::ptr_eq(e, entry));
		self.by_id.remove(&*entry.id);
		if let Some(alias) = &entry.alias {
			self.by_alias.remove(&**alias);
		}
		self.by_handle.remove(&entry.handle);
	}
}

/// Single source of truth for registry lookups.
#[derive(Clone, Default)]
pub(crate) struct Snapshot {
	/// Per-type tables, shared between snapshots until a write touches them.
	pub(crate) types: FxHashMap<Arc<str>, Arc<TypeTable>>,
	/// Live entries across all tables.
	len: usize,
	/// Set once by teardown.
	pub(crate) closed: bool,
}

impl Snapshot {
	pub(crate) fn closed() -> Self {
		Self {
			closed: true,
			..Self::default()
		}
	}

	pub(crate) fn len(&self) -> usize {
		self.len
	}

	pub(crate) fn table(&self, ty: &str) -> Option<&Arc<TypeTable>> {
		self.types.get(ty)
	}

	/// Returns a copy of this snapshot with `entry` added.
	///
	/// The caller has already checked `entry`'s keys against this snapshot.
	pub(crate) fn with_entry(&self, entry: Arc<ControlEntry>) -> Self {
		let mut types = self.types.clone();
		let table = types.entry(entry.ty.clone()).or_default();
		Arc::make_mut(table).insert(entry);

		Self {
			types,
			len: self.len + 1,
			closed: self.closed,
		}
	}

	/// Returns a copy of this snapshot without the entry issued `handle`, plus that
	/// entry, or `None` if no live entry has that handle.
	pub(crate) fn without_handle(&self, handle: &str) -> Option<(Self, Arc<ControlEntry>)> {
		let entry = self
			.types
			.values()
			.find_map(|table| table.by_handle.get(handle))?
			.clone();

		let mut types = self.types.clone();
		if let Some(table) = types.get_mut(&*entry.ty) {
			let table = Arc::make_mut(table);
			table.remove(&entry);
			if table.entries.is_empty() {
				types.remove(&*entry.ty);
			}
		}

		Some((
			Self {
				types,
				len: self.len - 1,
				closed: self.closed,
			},
			entry,
		))
	}
}

/// Entries of one type as of a single instant.
///
/// Pins the type table it was created from, so later registrations and
/// unregistrations are not reflected. Iterate as many times as needed.
#[derive(Clone, Default)]
pub struct TypeListing {
	pub(crate) table: Option<Arc<TypeTable>>,
}

impl TypeListing {
	/// Iterates entries in registration order.
	pub fn iter(&self) -> std::slice::Iter<'_, Arc<ControlEntry>> {
		match &self.table {
			Some(table) => table.entries.iter(),
			None => Default::default(),
		}
	}

	/// Returns the number of entries.
	pub fn len(&self) -> usize {
		self.table.as_ref().map_or(0, |t| t.entries.len())
	}

	/// Returns true if the type had no live entries.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

impl<'a> IntoIterator for &'a TypeListing {
	type Item = &'a Arc<ControlEntry>;
	type IntoIter = std::slice::Iter<'a, Arc<ControlEntry>>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

impl std::fmt::Debug for TypeListing {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(self.iter()).finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::descriptor::InterfaceDescriptor;
	use crate::handle::HandleAllocator;

	fn entry(alloc: &HandleAllocator, ty: &str, id: &str, alias: Option<&str>) -> Arc<ControlEntry> {
		Arc::new(ControlEntry {
			ty: Arc::from(ty),
			id: Arc::from(id),
			alias: alias.map(Arc::from),
			descriptor: Arc::new(InterfaceDescriptor::new("Counter")),
			object: Arc::new(()),
			handle: alloc.allocate(),
		})
	}

	#[test]
	fn test_write_shares_untouched_tables() {
		let alloc = HandleAllocator::new("t");
		let base = Snapshot::default()
			.with_entry(entry(&alloc, "job", "j-1", None))
			.with_entry(entry(&alloc, "oplet", "o-1", None));

		let added = base.with_entry(entry(&alloc, "oplet", "o-2", Some("Second")));
		assert!(Arc::ptr_eq(added.table("job").unwrap(), base.table("job").unwrap()));
		assert!(!Arc::ptr_eq(added.table("oplet").unwrap(), base.table("oplet").unwrap()));
		assert_eq!(base.table("oplet").unwrap().entries.len(), 1);
		assert_eq!(added.len(), 3);
		assert_eq!(base.len(), 2);
	}

	#[test]
	fn test_remove_shares_untouched_tables() {
		let alloc = HandleAllocator::new("t");
		let job = entry(&alloc, "job", "j-1", None);
		let oplet = entry(&alloc, "oplet", "o-1", Some("Stage"));
		let base = Snapshot::default().with_entry(job).with_entry(oplet.clone());

		let (removed, gone) = base.without_handle(oplet.handle.as_str()).unwrap();
		assert!(Arc::ptr_eq(&gone, &oplet));
		assert!(Arc::ptr_eq(removed.table("job").unwrap(), base.table("job").unwrap()));
		assert!(removed.table("oplet").is_none());
		assert_eq!(removed.len(), 1);
		assert!(removed.without_handle(oplet.handle.as_str()).is_none());
	}

	#[test]
	fn test_handle_index_tracks_its_table() {
		let alloc = HandleAllocator::new("t");
		let a = entry(&alloc, "job", "j-1", Some("A"));
		let b = entry(&alloc, "job", "j-2", None);
		let snap = Snapshot::default().with_entry(a.clone()).with_entry(b.clone());

		let table = snap.table("job").unwrap();
		assert_eq!(table.by_handle.len(), 2);
		assert!(Arc::ptr_eq(&table.by_handle[&a.handle], &a));

		let (snap, _) = snap.without_handle(b.handle.as_str()).unwrap();
		let table = snap.table("job").unwrap();
		assert_eq!(table.by_handle.len(), 1);
		assert!(Arc::ptr_eq(&table.by_alias["A"], &a));
	}
}
