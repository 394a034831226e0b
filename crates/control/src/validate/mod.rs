//! Capability validation for control interface descriptors.
//!
//! The checks here only inspect descriptor shape. Registration always runs
//! [`check_interface`] with [`CapabilityProfile::Minimal`], so every live entry is
//! portable to every backend. A registry may be given an extra [`InterfacePolicy`]
//! that runs after the baseline and can only narrow what is accepted. Backends that
//! carry richer types check against [`CapabilityProfile::Extended`] on their own side.
//!
//! # Rules
//!
//! - Parameters, attributes and non-void returns must be in the profile's
//!   accepted [`TypeClassSet`](crate::TypeClassSet).
//! - `void` is only a return type.
//! - Aggregates (extended profile) hold scalars only, one level deep.
//! - Operation, parameter, attribute and field names are non-empty; attribute
//!   names are unique. Operations may be overloaded.
//! - Enums declare at least one variant, each once.

use rustc_hash::FxHashSet;

use crate::capability::{CapabilityProfile, TypeClass};
use crate::descriptor::{InterfaceDescriptor, TypeDescriptor};
use crate::error::{InterfaceViolation, MemberRef, ViolationReason};


/// Returns true if `descriptor` only uses the portable subset every backend supports.
pub fn is_minimal_control_interface(descriptor: &InterfaceDescriptor) -> bool {
	check_interface(descriptor, CapabilityProfile::Minimal).is_ok()
}

/// Checks `descriptor` against `profile`, reporting every offending member.
pub fn check_interface(
	descriptor: &InterfaceDescriptor,
	profile: CapabilityProfile,
) -> Result<(), Vec<InterfaceViolation>> {
	let mut violations = Vec::new();

	if descriptor.name.is_empty() {
		violations.push(InterfaceViolation {
			member: MemberRef::Interface,
			reason: ViolationReason::EmptyName,
		});
	}

	for op in &descriptor.operations {
		if op.name.is_empty() {
			violations.push(InterfaceViolation {
				member: MemberRef::Operation {
					operation: op.name.clone(),
				},
				reason: ViolationReason::EmptyName,
			});
		}

		for (index, param) in op.params.iter().enumerate() {
			let member = || MemberRef::Parameter {
				operation: op.name.clone(),
				index,
				name: param.name.clone(),
			};
			if param.name.is_empty() {
				violations.push(InterfaceViolation {
					member: member(),
					reason: ViolationReason::EmptyName,
				});
			}
			if let Err(reason) = check_value_type(&param.ty, profile) {
				violations.push(InterfaceViolation {
					member: member(),
					reason,
				});
			}
		}

		if op.returns != TypeDescriptor::Void
			&& let Err(reason) = check_value_type(&op.returns, profile)
		{
			violations.push(InterfaceViolation {
				member: MemberRef::Return {
					operation: op.name.clone(),
				},
				reason,
			});
		}
	}

	let mut seen = FxHashSet::default();
	for attr in &descriptor.attributes {
		let member = || MemberRef::Attribute {
			attribute: attr.name.clone(),
		};
		if attr.name.is_empty() {
			violations.push(InterfaceViolation {
				member: member(),
				reason: ViolationReason::EmptyName,
			});
		} else if !seen.insert(attr.name.as_str()) {
			violations.push(InterfaceViolation {
				member: member(),
				reason: ViolationReason::DuplicateAttribute,
			});
		}
		if let Err(reason) = check_value_type(&attr.ty, profile) {
			violations.push(InterfaceViolation {
				member: member(),
				reason,
			});
		}
	}

	if violations.is_empty() {
		Ok(())
	} else {
		Err(violations)
	}
}

/// Checks a type used as a value (parameter, attribute or non-void return).
fn check_value_type(ty: &TypeDescriptor, profile: CapabilityProfile) -> Result<(), ViolationReason> {
	let class = TypeClass::of(ty);
	if class == TypeClass::Void {
		return Err(ViolationReason::VoidValue);
	}
	if !profile.accepts(class) {
		return Err(unsupported(ty, profile));
	}

	match ty {
		TypeDescriptor::Enum(e) => check_enum(&e.name, &e.variants),
		TypeDescriptor::Array(inner) | TypeDescriptor::Optional(inner) => {
			check_element(ty, inner, profile)
		}
		TypeDescriptor::Record(record) => {
			for (index, field) in record.fields.iter().enumerate() {
				if field.name.is_empty() {
					return Err(ViolationReason::EmptyFieldName {
						name: record.name.clone(),
						index,
					});
				}
				check_element(ty, &field.ty, profile)?;
			}
			Ok(())
		}
		_ => Ok(()),
	}
}

/// Checks a type nested inside an aggregate.
fn check_element(
	outer: &TypeDescriptor,
	inner: &TypeDescriptor,
	profile: CapabilityProfile,
) -> Result<(), ViolationReason> {
	match TypeClass::of(inner) {
		TypeClass::Void => Err(ViolationReason::VoidValue),
		TypeClass::Array | TypeClass::Optional | TypeClass::Record => {
			Err(ViolationReason::NestedAggregate {
				type_name: outer.to_string(),
			})
		}
		class if !profile.accepts(class) => Err(unsupported(inner, profile)),
		_ => match inner {
			TypeDescriptor::Enum(e) => check_enum(&e.name, &e.variants),
			_ => Ok(()),
		},
	}
}

fn check_enum(name: &str, variants: &[String]) -> Result<(), ViolationReason> {
	if variants.is_empty() {
		return Err(ViolationReason::EmptyEnum {
			name: name.to_string(),
		});
	}
	let mut seen = FxHashSet::default();
	for variant in variants {
		if !seen.insert(variant.as_str()) {
			return Err(ViolationReason::DuplicateVariant {
				name: name.to_string(),
				variant: variant.clone(),
			});
		}
	}
	Ok(())
}

fn unsupported(ty: &TypeDescriptor, profile: CapabilityProfile) -> ViolationReason {
	ViolationReason::UnsupportedType {
		type_name: ty.to_string(),
		profile,
	}
}

/// Additional descriptor check a backend applies on top of the minimal baseline.
pub trait InterfacePolicy: Send + Sync {
	/// Short name used in logs.
	fn name(&self) -> &str;

	/// Returns every violation of this policy.
	fn check(&self, descriptor: &InterfaceDescriptor) -> Result<(), Vec<InterfaceViolation>>;
}

/// Policy that checks descriptors against a fixed [`CapabilityProfile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfilePolicy(pub CapabilityProfile);

impl InterfacePolicy for ProfilePolicy {
	fn name(&self) -> &str {
		match self.0 {
			CapabilityProfile::Minimal => "minimal",
			CapabilityProfile::Extended => "extended",
		}
	}

	fn check(&self, descriptor: &InterfaceDescriptor) -> Result<(), Vec<InterfaceViolation>> {
		check_interface(descriptor, self.0)
	}
}
