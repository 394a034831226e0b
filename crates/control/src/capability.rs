use crate::descriptor::TypeDescriptor;

/// Structural class of a [`TypeDescriptor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeClass {
	/// The `void` return marker.
	Void,
	/// Numeric, boolean and character types.
	Primitive,
	/// Strings.
	String,
	/// Enumerations.
	Enum,
	/// Arrays.
	Array,
	/// Optionals.
	Optional,
	/// Records.
	Record,
	/// Types with no structural description.
	Opaque,
}

bitflags::bitflags! {
	/// A set of type classes a backend accepts.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct TypeClassSet: u32 {
		/// The `void` return marker.
		const VOID = 1 << 0;
		/// Numeric, boolean and character types.
		const PRIMITIVE = 1 << 1;
		/// Strings.
		const STRING = 1 << 2;
		/// Enumerations.
		const ENUM = 1 << 3;
		/// Arrays.
		const ARRAY = 1 << 4;
		/// Optionals.
		const OPTIONAL = 1 << 5;
		/// Records.
		const RECORD = 1 << 6;
		/// Types with no structural description.
		const OPAQUE = 1 << 7;

		/// Values every backend can carry.
		const SCALAR = Self::PRIMITIVE.bits() | Self::STRING.bits() | Self::ENUM.bits();
		/// Aggregates of scalars.
		const AGGREGATE = Self::ARRAY.bits() | Self::OPTIONAL.bits() | Self::RECORD.bits();
	}
}

impl TypeClass {
	/// Returns the class of a type.
	pub fn of(ty: &TypeDescriptor) -> Self {
		match ty {
			TypeDescriptor::Void => Self::Void,
			TypeDescriptor::String => Self::String,
			TypeDescriptor::Enum(_) => Self::Enum,
			TypeDescriptor::Array(_) => Self::Array,
			TypeDescriptor::Optional(_) => Self::Optional,
			TypeDescriptor::Record(_) => Self::Record,
			TypeDescriptor::Opaque(_) => Self::Opaque,
			_ => Self::Primitive,
		}
	}

	/// Returns the bitflag for this class.
	pub const fn as_set(self) -> TypeClassSet {
		match self {
			Self::Void => TypeClassSet::VOID,
			Self::Primitive => TypeClassSet::PRIMITIVE,
			Self::String => TypeClassSet::STRING,
			Self::Enum => TypeClassSet::ENUM,
			Self::Array => TypeClassSet::ARRAY,
			Self::Optional => TypeClassSet::OPTIONAL,
			Self::Record => TypeClassSet::RECORD,
			Self::Opaque => TypeClassSet::OPAQUE,
		}
	}
}

impl From<TypeClass> for TypeClassSet {
	fn from(class: TypeClass) -> Self {
		class.as_set()
	}
}

impl FromIterator<TypeClass> for TypeClassSet {
	fn from_iter<I: IntoIterator<Item = TypeClass>>(iter: I) -> Self {
		let mut set = TypeClassSet::empty();
		for class in iter {
			set |= class.as_set();
		}
		set
	}
}

/// Named capability level a descriptor is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CapabilityProfile {
	/// Primitives, strings and enumerations. Supported by every backend.
	#[default]
	Minimal,
	/// [`CapabilityProfile::Minimal`] plus single-level arrays, optionals and
	/// records of minimal types.
	Extended,
}

impl CapabilityProfile {
	/// Returns the value classes accepted for parameters, attributes and returns.
	pub const fn accepted(self) -> TypeClassSet {
		match self {
			Self::Minimal => TypeClassSet::SCALAR,
			Self::Extended => TypeClassSet::SCALAR.union(TypeClassSet::AGGREGATE),
		}
	}

	/// Returns true if values of `class` are accepted.
	pub fn accepts(self, class: TypeClass) -> bool {
		self.accepted().contains(class.as_set())
	}
}

impl std::fmt::Display for CapabilityProfile {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Minimal => f.write_str("minimal"),
			Self::Extended => f.write_str("extended"),
		}
	}
}
