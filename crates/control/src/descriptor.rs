//! Structural description of a control interface.
//!
//! A control object is registered together with an [`InterfaceDescriptor`]: the
//! list of operations (typed parameters and return) and attributes (typed values)
//! that a dispatching backend may expose. The registry never looks at the object
//! itself, only at this description.

use std::any::Any;

/// Type of a parameter, return value, attribute or record field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDescriptor {
	/// No value. Only valid as an operation return type.
	Void,
	/// Boolean.
	Bool,
	/// Signed 8-bit integer.
	I8,
	/// Signed 16-bit integer.
	I16,
	/// Signed 32-bit integer.
	I32,
	/// Signed 64-bit integer.
	I64,
	/// Unsigned 8-bit integer.
	U8,
	/// Unsigned 16-bit integer.
	U16,
	/// Unsigned 32-bit integer.
	U32,
	/// Unsigned 64-bit integer.
	U64,
	/// 32-bit float.
	F32,
	/// 64-bit float.
	F64,
	/// Unicode scalar value.
	Char,
	/// UTF-8 string.
	String,
	/// Enumeration with a closed set of named variants.
	Enum(EnumDescriptor),
	/// Homogeneous sequence.
	Array(Box<TypeDescriptor>),
	/// Value that may be absent.
	Optional(Box<TypeDescriptor>),
	/// Named aggregate of fields.
	Record(RecordDescriptor),
	/// Any type the descriptor cannot express structurally.
	Opaque(String),
}

impl TypeDescriptor {
	/// Creates an enumeration type.
	pub fn enumeration<I, S>(name: impl Into<String>, variants: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self::Enum(EnumDescriptor {
			name: name.into(),
			variants: variants.into_iter().map(Into::into).collect(),
		})
	}

	/// Creates an array type.
	pub fn array(element: TypeDescriptor) -> Self {
		Self::Array(Box::new(element))
	}

	/// Creates an optional type.
	pub fn optional(inner: TypeDescriptor) -> Self {
		Self::Optional(Box::new(inner))
	}

	/// Creates a record type.
	pub fn record<I, S>(name: impl Into<String>, fields: I) -> Self
	where
		I: IntoIterator<Item = (S, TypeDescriptor)>,
		S: Into<String>,
	{
		Self::Record(RecordDescriptor {
			name: name.into(),
			fields: fields
				.into_iter()
				.map(|(name, ty)| FieldDescriptor {
					name: name.into(),
					ty,
				})
				.collect(),
		})
	}

	/// Creates an opaque type with the given display name.
	pub fn opaque(name: impl Into<String>) -> Self {
		Self::Opaque(name.into())
	}

	/// Returns true for the numeric, boolean and character types.
	pub fn is_primitive(&self) -> bool {
		matches!(
			self,
			Self::Bool
				| Self::I8 | Self::I16
				| Self::I32 | Self::I64
				| Self::U8 | Self::U16
				| Self::U32 | Self::U64
				| Self::F32 | Self::F64
				| Self::Char
		)
	}

	/// Returns true for types that hold other types.
	pub fn is_aggregate(&self) -> bool {
		matches!(self, Self::Array(_) | Self::Optional(_) | Self::Record(_))
	}
}

impl std::fmt::Display for TypeDescriptor {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Void => f.write_str("void"),
			Self::Bool => f.write_str("bool"),
			Self::I8 => f.write_str("i8"),
			Self::I16 => f.write_str("i16"),
			Self::I32 => f.write_str("i32"),
			Self::I64 => f.write_str("i64"),
			Self::U8 => f.write_str("u8"),
			Self::U16 => f.write_str("u16"),
			Self::U32 => f.write_str("u32"),
			Self::U64 => f.write_str("u64"),
			Self::F32 => f.write_str("f32"),
			Self::F64 => f.write_str("f64"),
			Self::Char => f.write_str("char"),
			Self::String => f.write_str("string"),
			Self::Enum(e) => write!(f, "enum {}", e.name),
			Self::Array(inner) => write!(f, "array<{inner}>"),
			Self::Optional(inner) => write!(f, "optional<{inner}>"),
			Self::Record(r) => write!(f, "record {}", r.name),
			Self::Opaque(name) => write!(f, "opaque {name}"),
		}
	}
}

/// Enumeration declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumDescriptor {
	pub name: String,
	pub variants: Vec<String>,
}

/// Record declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordDescriptor {
	pub name: String,
	pub fields: Vec<FieldDescriptor>,
}

/// Named record field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldDescriptor {
	pub name: String,
	pub ty: TypeDescriptor,
}

/// Named, typed operation parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParamDescriptor {
	pub name: String,
	pub ty: TypeDescriptor,
}

/// Invocable operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OperationDescriptor {
	pub name: String,
	pub params: Vec<ParamDescriptor>,
	pub returns: TypeDescriptor,
}

impl OperationDescriptor {
	/// Creates an operation with no parameters returning `void`.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			params: Vec::new(),
			returns: TypeDescriptor::Void,
		}
	}

	/// Appends a parameter.
	pub fn param(mut self, name: impl Into<String>, ty: TypeDescriptor) -> Self {
		self.params.push(ParamDescriptor {
			name: name.into(),
			ty,
		});
		self
	}

	/// Sets the return type.
	pub fn returns(mut self, ty: TypeDescriptor) -> Self {
		self.returns = ty;
		self
	}
}

/// Whether an attribute may be written by a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Access {
	#[default]
	ReadOnly,
	ReadWrite,
}

/// Readable (and possibly writable) attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttributeDescriptor {
	pub name: String,
	pub ty: TypeDescriptor,
	pub access: Access,
}

/// The capability surface a control object exposes.
///
/// Built with the chaining methods:
///
/// ```
/// use control_registry::{InterfaceDescriptor, OperationDescriptor, TypeDescriptor};
///
/// let desc = InterfaceDescriptor::new("JobControl")
/// 	.attribute("name", TypeDescriptor::String)
/// 	.operation(OperationDescriptor::new("cancel").param("force", TypeDescriptor::Bool));
/// assert_eq!(desc.operations.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InterfaceDescriptor {
	pub name: String,
	pub operations: Vec<OperationDescriptor>,
	pub attributes: Vec<AttributeDescriptor>,
}

impl InterfaceDescriptor {
	/// Creates an empty interface.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			operations: Vec::new(),
			attributes: Vec::new(),
		}
	}

	/// Appends an operation.
	pub fn operation(mut self, op: OperationDescriptor) -> Self {
		self.operations.push(op);
		self
	}

	/// Appends a read-only attribute.
	pub fn attribute(self, name: impl Into<String>, ty: TypeDescriptor) -> Self {
		self.attribute_with(name, ty, Access::ReadOnly)
	}

	/// Appends a read-write attribute.
	pub fn writable_attribute(self, name: impl Into<String>, ty: TypeDescriptor) -> Self {
		self.attribute_with(name, ty, Access::ReadWrite)
	}

	fn attribute_with(mut self, name: impl Into<String>, ty: TypeDescriptor, access: Access) -> Self {
		self.attributes.push(AttributeDescriptor {
			name: name.into(),
			ty,
			access,
		});
		self
	}

	/// Looks up an operation by name. Returns the first match for overloaded names.
	pub fn find_operation(&self, name: &str) -> Option<&OperationDescriptor> {
		self.operations.iter().find(|op| op.name == name)
	}

	/// Looks up an attribute by name.
	pub fn find_attribute(&self, name: &str) -> Option<&AttributeDescriptor> {
		self.attributes.iter().find(|attr| attr.name == name)
	}
}

/// Implemented by control object types that describe their own interface.
///
/// Lets producers register a typed control without building the descriptor at
/// the call site, see [`crate::ControlService::register_control`].
pub trait ControlInterface: Any + Send + Sync {
	/// Returns the interface this type exposes.
	fn descriptor() -> InterfaceDescriptor;
}
