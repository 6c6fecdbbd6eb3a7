use crate::coerce::ValueKind;
use crate::tag::Role;
use std::error::Error;

/// Errors produced while binding a structure or invoking one of its members.
#[derive(Debug, thiserror::Error)]
pub enum BindError {
  /// The structure's declaration does not fit the binding rules. Raised by `bind`, before any host
  /// operation for the offending member is attempted.
  #[error("schema error: {0}")]
  Schema(#[from] SchemaError),

  /// A host value did not have the representation the declared type requires.
  #[error("coercion error: {0}")]
  Coercion(#[from] CoercionError),

  /// The host's own `get`/`set`/`call` reported a failure.
  #[error("host error: {0}")]
  Host(#[source] Box<dyn Error + Send + Sync + 'static>),

  /// A member was invoked before its structure was bound.
  #[error("member called before its structure was bound")]
  Unbound,
}

impl BindError {
  pub fn host<E: Error + Send + Sync + 'static>(e: E) -> Self {
    Self::Host(Box::new(e))
  }

  pub fn is_schema(&self) -> bool {
    matches!(self, BindError::Schema(_))
  }
}

/// Bind-time errors. Fatal to the enclosing `bind` call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
  /// No field of the structure has the handle type being bound.
  #[error("handle field not found: `{structure}` has no field of type `{expected}`")]
  HandleFieldNotFound {
    structure: &'static str,
    expected: &'static str,
  },

  /// A tag was attached to a field that is not a member slot.
  #[error("tagged field must be callable: `{field}` is declared as `{declared}`")]
  NotCallable { field: &'static str, declared: String },

  /// The declared signature has more outputs than any role can produce.
  #[error("`{key}` declares {outputs} outputs, expected 0 or 1")]
  TooManyOutputs { key: String, outputs: usize },

  /// The declared signature's arity is not legal for the tag's role.
  #[error("{role} `{key}` accessed with {inputs} inputs and {outputs} outputs, expected {expected}")]
  UnsupportedShape {
    key: String,
    role: Role,
    inputs: usize,
    outputs: usize,
    expected: &'static str,
  },

  /// The declared output type is not one the synthesizer can coerce into.
  #[error("unsupported return kind: {role} `{key}` returns {kind}")]
  UnsupportedReturnKind {
    key: String,
    role: Role,
    kind: ValueKind,
  },
}

/// Call-time mismatch between a host value and a declared type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoercionError {
  #[error("expected {expected}, host returned {found}")]
  Mismatch {
    expected: ValueKind,
    found: &'static str,
  },

  #[error("host integer {value} does not fit in `{target}`")]
  OutOfRange { target: &'static str, value: i64 },

  #[error("structure `{structure}` passed as an argument before it was bound")]
  UnboundArgument { structure: &'static str },

  #[error("{kind} values cannot be coerced")]
  Unsupported { kind: ValueKind },
}
