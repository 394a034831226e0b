//! Service seam for producers and dispatchers.
//!
//! Dispatch backends (management bridges, admin endpoints) are written against
//! [`ControlService`] so they do not depend on a concrete registry. The typed
//! helpers are provided methods, available on any sized implementor.

use std::any::Any;
use std::sync::Arc;

use crate::descriptor::{ControlInterface, InterfaceDescriptor};
use crate::error::RegisterError;
use crate::handle::ControlHandle;
use crate::index::{ControlEntry, ControlObject, ControlRegistry, TypeListing};

/// Registration and resolution of control objects.
pub trait ControlService: Send + Sync {
	/// Registers a control under `(ty, id)` and optional `(ty, alias)`.
	fn register(
		&self,
		ty: &str,
		id: &str,
		alias: Option<&str>,
		descriptor: Arc<InterfaceDescriptor>,
		control: ControlObject,
	) -> Result<ControlHandle, RegisterError>;

	/// Unregisters a control. Unknown handles are ignored.
	fn unregister(&self, handle: &str);

	/// Resolves `(ty, id)`.
	fn lookup(&self, ty: &str, id: &str) -> Option<Arc<ControlEntry>>;

	/// Resolves `(ty, alias)`.
	fn lookup_by_alias(&self, ty: &str, alias: &str) -> Option<Arc<ControlEntry>>;

	/// Point-in-time entries of `ty`.
	fn list_by_type(&self, ty: &str) -> TypeListing;

	/// Registers a control whose type describes its own interface.
	fn register_control<T: ControlInterface>(
		&self,
		ty: &str,
		id: &str,
		alias: Option<&str>,
		control: Arc<T>,
	) -> Result<ControlHandle, RegisterError>
	where
		Self: Sized,
	{
		self.register(ty, id, alias, Arc::new(T::descriptor()), control)
	}

	/// Resolves `(ty, id)` to a control of concrete type `T`.
	fn lookup_as<T: Any + Send + Sync>(&self, ty: &str, id: &str) -> Option<Arc<T>>
	where
		Self: Sized,
	{
		self.lookup(ty, id)?.downcast::<T>()
	}

	/// Resolves `(ty, alias)` to a control of concrete type `T`.
	fn control<T: Any + Send + Sync>(&self, ty: &str, alias: &str) -> Option<Arc<T>>
	where
		Self: Sized,
	{
		self.lookup_by_alias(ty, alias)?.downcast::<T>()
	}
}

impl ControlService for ControlRegistry {
	fn register(
		&self,
		ty: &str,
		id: &str,
		alias: Option<&str>,
		descriptor: Arc<InterfaceDescriptor>,
		control: ControlObject,
	) -> Result<ControlHandle, RegisterError> {
		ControlRegistry::register(self, ty, id, alias, descriptor, control)
	}

	fn unregister(&self, handle: &str) {
		ControlRegistry::unregister(self, handle)
	}

	fn lookup(&self, ty: &str, id: &str) -> Option<Arc<ControlEntry>> {
		ControlRegistry::lookup(self, ty, id)
	}

	fn lookup_by_alias(&self, ty: &str, alias: &str) -> Option<Arc<ControlEntry>> {
		ControlRegistry::lookup_by_alias(self, ty, alias)
	}

	fn list_by_type(&self, ty: &str) -> TypeListing {
		ControlRegistry::list_by_type(self, ty)
	}
}
