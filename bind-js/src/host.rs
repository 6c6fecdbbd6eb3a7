use crate::error::BindError;
use std::fmt;
use std::rc::Rc;

/// A host-native value.
#[derive(Clone, Debug, PartialEq)]
pub enum HostValue<O> {
  Undefined,
  Null,
  Bool(bool),
  Int(i64),
  Float(f64),
  String(String),
  Object(O),
}

impl<O> HostValue<O> {
  /// Whether this is one of the host's "empty" values.
  pub fn is_nullish(&self) -> bool {
    matches!(self, HostValue::Undefined | HostValue::Null)
  }

  pub fn as_object(&self) -> Option<&O> {
    match self {
      HostValue::Object(o) => Some(o),
      _ => None,
    }
  }

  /// Name of the representation, for diagnostics.
  pub fn type_name(&self) -> &'static str {
    match self {
      HostValue::Undefined => "undefined",
      HostValue::Null => "null",
      HostValue::Bool(_) => "boolean",
      HostValue::Int(_) => "integer",
      HostValue::Float(_) => "float",
      HostValue::String(_) => "string",
      HostValue::Object(_) => "object",
    }
  }
}

impl<O> Default for HostValue<O> {
  fn default() -> Self {
    HostValue::Undefined
  }
}

/// The operations a dynamically-typed host runtime must provide.
///
/// This is the entire surface the binder depends on. All methods take `&self`; the host is shared by
/// every member closure produced from one bind pass, so implementations that need mutation use
/// interior mutability. Access is single-threaded and synchronous: every call returns before the
/// next one starts.
pub trait Host: 'static {
  /// Reference to one node of the host object graph. Equality is host identity.
  type Object: Clone + PartialEq + fmt::Debug + 'static;
  type Error: std::error::Error + Send + Sync + 'static;

  /// Reads `key` from `object`. Absent keys yield an empty value rather than an error.
  fn get(&self, object: &Self::Object, key: &str) -> Result<HostValue<Self::Object>, Self::Error>;

  /// Writes `key` on `object`. Hosts may ignore unknown keys.
  fn set(
    &self,
    object: &Self::Object,
    key: &str,
    value: HostValue<Self::Object>,
  ) -> Result<(), Self::Error>;

  /// Invokes the method `key` on `object`.
  fn call(
    &self,
    object: &Self::Object,
    key: &str,
    args: Vec<HostValue<Self::Object>>,
  ) -> Result<HostValue<Self::Object>, Self::Error>;

  /// Host-defined truthiness. The default follows the JS falsy set.
  fn truthy(&self, value: &HostValue<Self::Object>) -> bool {
    match value {
      HostValue::Undefined | HostValue::Null => false,
      HostValue::Bool(b) => *b,
      HostValue::Int(n) => *n != 0,
      HostValue::Float(n) => !(*n == 0.0 || n.is_nan()),
      HostValue::String(s) => !s.is_empty(),
      HostValue::Object(_) => true,
    }
  }

  /// Enumerable own keys of `value`, in host order. Empty for falsy values.
  fn enumerate_keys(&self, value: &HostValue<Self::Object>) -> Result<Vec<String>, Self::Error>;
}

/// A reference to a single host object, together with the host that owns it.
///
/// Cloning is cheap. The host runtime owns the underlying object; a handle only keeps the host
/// instance alive.
pub struct HostHandle<H: Host> {
  host: Rc<H>,
  object: H::Object,
}

impl<H: Host> HostHandle<H> {
  pub fn new(host: Rc<H>, object: H::Object) -> Self {
    Self { host, object }
  }

  pub fn host(&self) -> &Rc<H> {
    &self.host
  }

  pub fn object(&self) -> &H::Object {
    &self.object
  }

  /// The handle as a host value, e.g. to pass it as a call argument.
  pub fn to_value(&self) -> HostValue<H::Object> {
    HostValue::Object(self.object.clone())
  }

  /// Another handle on the same host.
  pub fn sibling(&self, object: H::Object) -> Self {
    Self::new(Rc::clone(&self.host), object)
  }

  pub fn get(&self, key: &str) -> Result<HostValue<H::Object>, BindError> {
    self.host.get(&self.object, key).map_err(BindError::host)
  }

  pub fn set(&self, key: &str, value: HostValue<H::Object>) -> Result<(), BindError> {
    self
      .host
      .set(&self.object, key, value)
      .map_err(BindError::host)
  }

  pub fn call(
    &self,
    key: &str,
    args: Vec<HostValue<H::Object>>,
  ) -> Result<HostValue<H::Object>, BindError> {
    self
      .host
      .call(&self.object, key, args)
      .map_err(BindError::host)
  }

  pub fn truthy(&self) -> bool {
    self.host.truthy(&self.to_value())
  }
}

impl<H: Host> Clone for HostHandle<H> {
  fn clone(&self) -> Self {
    Self {
      host: Rc::clone(&self.host),
      object: self.object.clone(),
    }
  }
}

impl<H: Host> PartialEq for HostHandle<H> {
  fn eq(&self, other: &Self) -> bool {
    Rc::ptr_eq(&self.host, &other.host) && self.object == other.object
  }
}

impl<H: Host> fmt::Debug for HostHandle<H> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("HostHandle").field(&self.object).finish()
  }
}
