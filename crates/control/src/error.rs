use thiserror::Error;

use crate::capability::CapabilityProfile;

/// Errors returned by [`crate::ControlRegistry::register`].
///
/// All variants are caller errors. Nothing is retried internally; the caller picks
/// a different id/alias, fixes the interface, or unregisters the existing entry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegisterError {
	/// The control type was empty.
	#[error("control type must not be empty")]
	EmptyType,
	/// The control id was empty.
	#[error("control id must not be empty: type={ty}")]
	EmptyId { ty: String },
	/// The interface descriptor is outside the supported capability set.
	#[error("invalid control interface `{interface}`: {}", join_violations(.violations))]
	InvalidInterface {
		interface: String,
		violations: Vec<InterfaceViolation>,
	},
	/// A live entry already uses this `(type, id)`.
	#[error("duplicate control id: type={ty} id={id}")]
	DuplicateIdentifier { ty: String, id: String },
	/// A live entry already uses this `(type, alias)`.
	///
	/// Reports the owner's id, never its handle: handles are only returned to the
	/// registrant.
	#[error("duplicate control alias: type={ty} alias={alias} owner={owner_id}")]
	DuplicateAlias {
		ty: String,
		alias: String,
		owner_id: String,
	},
	/// The registry was torn down.
	#[error("control registry `{label}` has been torn down")]
	Closed { label: String },
}

fn join_violations(violations: &[InterfaceViolation]) -> String {
	violations
		.iter()
		.map(ToString::to_string)
		.collect::<Vec<_>>()
		.join("; ")
}

/// One reason a descriptor was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{member}: {reason}")]
pub struct InterfaceViolation {
	pub member: MemberRef,
	pub reason: ViolationReason,
}

/// The part of a descriptor a violation refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberRef {
	/// The interface as a whole.
	Interface,
	/// An operation's own declaration (its name).
	Operation { operation: String },
	/// A parameter, by zero-based position.
	Parameter {
		operation: String,
		index: usize,
		name: String,
	},
	/// An operation's return type.
	Return { operation: String },
	/// An attribute.
	Attribute { attribute: String },
}

impl std::fmt::Display for MemberRef {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Interface => f.write_str("interface"),
			Self::Operation { operation } => write!(f, "operation `{operation}`"),
			Self::Parameter {
				operation,
				index,
				name,
			} => write!(f, "parameter #{index} `{name}` of operation `{operation}`"),
			Self::Return { operation } => write!(f, "return type of operation `{operation}`"),
			Self::Attribute { attribute } => write!(f, "attribute `{attribute}`"),
		}
	}
}

/// Why a member was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViolationReason {
	#[error("type `{type_name}` is not supported by the {profile} profile")]
	UnsupportedType {
		type_name: String,
		profile: CapabilityProfile,
	},
	#[error("aggregate `{type_name}` may only contain primitives, strings or enums")]
	NestedAggregate { type_name: String },
	#[error("void is only valid as a return type")]
	VoidValue,
	#[error("name must not be empty")]
	EmptyName,
	#[error("attribute declared more than once")]
	DuplicateAttribute,
	#[error("enum `{name}` declares no variants")]
	EmptyEnum { name: String },
	#[error("enum `{name}` declares variant `{variant}` more than once")]
	DuplicateVariant { name: String, variant: String },
	#[error("record `{name}` field #{index} has an empty name")]
	EmptyFieldName { name: String, index: usize },
}

/// Errors produced while loading a [`crate::RegistryConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
	#[error("invalid registry config: {0}")]
	Parse(#[from] toml::de::Error),
	#[error("registry label must not be empty")]
	EmptyLabel,
	#[error("handle prefix must not be empty")]
	EmptyHandlePrefix,
}
