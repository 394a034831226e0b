use std::any::Any;
use std::sync::Arc;

use crate::descriptor::InterfaceDescriptor;
use crate::handle::ControlHandle;

/// Opaque control target. The registry holds it by reference and never invokes it.
pub type ControlObject = Arc<dyn Any + Send + Sync>;

/// One registered control. Immutable once published.
pub struct ControlEntry {
	pub(crate) ty: Arc<str>,
	pub(crate) id: Arc<str>,
	pub(crate) alias: Option<Arc<str>>,
	pub(crate) descriptor: Arc<InterfaceDescriptor>,
	pub(crate) object: ControlObject,
	pub(crate) handle: ControlHandle,
}

impl ControlEntry {
	/// Namespace the control was registered under.
	pub fn ty(&self) -> &str {
		&self.ty
	}

	/// Identifier, unique within [`Self::ty`].
	pub fn id(&self) -> &str {
		&self.id
	}

	/// Alias, unique within [`Self::ty`] when present.
	pub fn alias(&self) -> Option<&str> {
		self.alias.as_deref()
	}

	/// Interface the control exposes.
	pub fn descriptor(&self) -> &Arc<InterfaceDescriptor> {
		&self.descriptor
	}

	/// The registered control object.
	pub fn object(&self) -> &ControlObject {
		&self.object
	}

	/// Returns the control object as `T` if that is its concrete type.
	pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
		Arc::clone(&self.object).downcast::<T>().ok()
	}
}

impl std::fmt::Debug for ControlEntry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ControlEntry")
			.field("ty", &self.ty)
			.field("id", &self.id)
			.field("alias", &self.alias)
			.field("interface", &self.descriptor.name)
			.finish_non_exhaustive()
	}
}
