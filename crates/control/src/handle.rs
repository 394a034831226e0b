//! Opaque registration handles.

use std::borrow::Borrow;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide registry serial, so handles of coexisting registries differ.
static REGISTRY_SERIAL: AtomicU64 = AtomicU64::new(1);

/// Token returned by registration and accepted by unregistration.
///
/// Handles are never reused: the sequence part is monotonic for the lifetime of
/// the issuing registry, and the serial part is unique per registry in the process.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ControlHandle(Arc<str>);

impl ControlHandle {
	/// Returns the handle text.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl std::ops::Deref for ControlHandle {
	type Target = str;

	fn deref(&self) -> &str {
		&self.0
	}
}

impl AsRef<str> for ControlHandle {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

impl Borrow<str> for ControlHandle {
	fn borrow(&self) -> &str {
		&self.0
	}
}

impl std::fmt::Display for ControlHandle {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.0)
	}
}

impl std::fmt::Debug for ControlHandle {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_tuple("ControlHandle").field(&&*self.0).finish()
	}
}

/// Issues `<prefix>-<serial>-<sequence>` handles for one registry.
pub(crate) struct HandleAllocator {
	prefix: Box<str>,
	serial: u64,
	next: AtomicU64,
}

impl HandleAllocator {
	pub(crate) fn new(prefix: &str) -> Self {
		Self {
			prefix: prefix.into(),
			serial: REGISTRY_SERIAL.fetch_add(1, Ordering::Relaxed),
			next: AtomicU64::new(1),
		}
	}

	pub(crate) fn allocate(&self) -> ControlHandle {
		let seq = self.next.fetch_add(1, Ordering::Relaxed);
		ControlHandle(Arc::from(format!("{}-{}-{}", self.prefix, self.serial, seq)))
	}
}
