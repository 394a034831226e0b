//! Process-local registry of control objects.
//!
//! A control object is a live runtime object exposing a constrained management
//! interface: attributes and operations, no notifications. Producers publish
//! controls under a `(type, id)` address, optionally with a human-assigned alias
//! that is also unique within the type. Dispatch backends look controls up by
//! either key and bind the described operations to their own transport; the
//! registry itself never invokes a control.
//!
//! # Modules
//!
//! - [`index`] - Registry core: keys, handles, snapshots, lifecycle
//! - [`validate`] - Capability checks over interface descriptors
//! - [`descriptor`] - Structural interface descriptions
//! - [`capability`] - Type classes and capability profiles
//! - [`service`] - Trait seam for producers and dispatchers
//! - [`types`] - Well-known control types
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use control_registry::{
//! 	ControlRegistry, InterfaceDescriptor, OperationDescriptor, RegistryConfig, TypeDescriptor,
//! 	types,
//! };
//!
//! struct Job;
//!
//! let registry = ControlRegistry::new(RegistryConfig::new("runtime")).unwrap();
//! let desc = Arc::new(
//! 	InterfaceDescriptor::new("JobControl")
//! 		.attribute("name", TypeDescriptor::String)
//! 		.operation(OperationDescriptor::new("cancel")),
//! );
//!
//! let handle = registry
//! 	.register(types::JOB, "j-101", Some("PumpAnalytics"), desc, Arc::new(Job))
//! 	.unwrap();
//! assert!(registry.lookup_by_alias(types::JOB, "PumpAnalytics").is_some());
//!
//! registry.unregister(&handle);
//! assert!(registry.lookup(types::JOB, "j-101").is_none());
//! ```

pub mod capability;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod handle;
pub mod index;
pub mod service;
pub mod types;
pub mod validate;

pub use capability::{CapabilityProfile, TypeClass, TypeClassSet};
pub use config::RegistryConfig;
pub use descriptor::{
	Access, AttributeDescriptor, ControlInterface, EnumDescriptor, FieldDescriptor,
	InterfaceDescriptor, OperationDescriptor, ParamDescriptor, RecordDescriptor, TypeDescriptor,
};
pub use error::{ConfigError, InterfaceViolation, MemberRef, RegisterError, ViolationReason};
pub use handle::ControlHandle;
pub use index::{ControlEntry, ControlObject, ControlRegistry, TypeListing};
pub use service::ControlService;
pub use validate::{InterfacePolicy, ProfilePolicy, check_interface, is_minimal_control_interface};
