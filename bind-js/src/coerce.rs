//! Conversions between host-native values and declared member types.
//!
//! Scalars are mapped without narrowing: a host integer that does not fit the declared width, or a
//! host float with a fractional part declared as an integer, is a [`CoercionError`]. Bindable
//! structures are "coerced" by binding a fresh instance onto the returned object.

use crate::binder::Bindable;
use crate::binder::Binder;
use crate::error::BindError;
use crate::error::CoercionError;
use crate::host::Host;
use crate::host::HostHandle;
use crate::host::HostValue;
use std::any::type_name;
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::fmt;

/// The coercion class of a declared input or output type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
  String,
  Int,
  Float,
  Bool,
  /// An uncoerced host value.
  Value,
  /// A raw host handle.
  Handle,
  /// A bindable structure, by value (`nullable == false`) or as an optional reference.
  Bindable {
    structure: &'static str,
    nullable: bool,
  },
  Map,
  Array,
}

impl ValueKind {
  pub fn is_bindable(self) -> bool {
    matches!(self, ValueKind::Bindable { .. })
  }

  /// Whether a getter or method may declare this kind as its output.
  pub fn is_returnable(self) -> bool {
    matches!(
      self,
      ValueKind::String
        | ValueKind::Int
        | ValueKind::Float
        | ValueKind::Bool
        | ValueKind::Bindable { .. }
    )
  }
}

impl fmt::Display for ValueKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ValueKind::String => f.write_str("string"),
      ValueKind::Int => f.write_str("integer"),
      ValueKind::Float => f.write_str("float"),
      ValueKind::Bool => f.write_str("boolean"),
      ValueKind::Value => f.write_str("host value"),
      ValueKind::Handle => f.write_str("host handle"),
      ValueKind::Bindable {
        structure,
        nullable: false,
      } => write!(f, "`{structure}`"),
      ValueKind::Bindable {
        structure,
        nullable: true,
      } => write!(f, "optional `{structure}`"),
      ValueKind::Map => f.write_str("map"),
      ValueKind::Array => f.write_str("array"),
    }
  }
}

fn mismatch<O>(expected: ValueKind, found: &HostValue<O>) -> BindError {
  CoercionError::Mismatch {
    expected,
    found: found.type_name(),
  }
  .into()
}

/// Context available while coercing a call result.
pub struct CoerceCx<'a, H: Host> {
  /// The handle the member was bound against; nested handles share its host.
  pub handle: &'a HostHandle<H>,
  pub binder: &'a Binder,
}

impl<H: Host> CoerceCx<'_, H> {
  fn bind_fresh<T: Bindable<Host = H>>(&self, object: H::Object) -> Result<T, BindError> {
    let mut target = T::default();
    self.binder.bind(&mut target, self.handle.sibling(object))?;
    Ok(target)
  }
}

/// A type that can be passed to the host as a member input.
pub trait IntoHost<H: Host> {
  fn kind() -> ValueKind;

  fn into_host(self) -> Result<HostValue<H::Object>, BindError>;
}

/// A type that can be declared as a member's output.
///
/// Every declarable output describes itself through [`Returns::outputs`]; whether it is actually
/// supported is decided when the member is synthesized, before any host call.
pub trait Returns<H: Host>: Sized {
  /// The declared output kinds. Empty for `()`.
  fn outputs() -> Vec<ValueKind>;

  fn from_host(value: HostValue<H::Object>, cx: &CoerceCx<'_, H>) -> Result<Self, BindError>;

  /// The value substituted when a bindable output fails open.
  fn zero() -> Self;
}

impl<H: Host> IntoHost<H> for String {
  fn kind() -> ValueKind {
    ValueKind::String
  }

  fn into_host(self) -> Result<HostValue<H::Object>, BindError> {
    Ok(HostValue::String(self))
  }
}

impl<H: Host> IntoHost<H> for &'static str {
  fn kind() -> ValueKind {
    ValueKind::String
  }

  fn into_host(self) -> Result<HostValue<H::Object>, BindError> {
    Ok(HostValue::String(self.to_string()))
  }
}

impl<H: Host> IntoHost<H> for f64 {
  fn kind() -> ValueKind {
    ValueKind::Float
  }

  fn into_host(self) -> Result<HostValue<H::Object>, BindError> {
    Ok(HostValue::Float(self))
  }
}

impl<H: Host> IntoHost<H> for bool {
  fn kind() -> ValueKind {
    ValueKind::Bool
  }

  fn into_host(self) -> Result<HostValue<H::Object>, BindError> {
    Ok(HostValue::Bool(self))
  }
}

impl<H: Host> IntoHost<H> for HostValue<H::Object> {
  fn kind() -> ValueKind {
    ValueKind::Value
  }

  fn into_host(self) -> Result<HostValue<H::Object>, BindError> {
    Ok(self)
  }
}

impl<H: Host> IntoHost<H> for HostHandle<H> {
  fn kind() -> ValueKind {
    ValueKind::Handle
  }

  fn into_host(self) -> Result<HostValue<H::Object>, BindError> {
    Ok(self.to_value())
  }
}

impl<T: Bindable> IntoHost<T::Host> for T {
  fn kind() -> ValueKind {
    ValueKind::Bindable {
      structure: type_name::<T>(),
      nullable: false,
    }
  }

  fn into_host(self) -> Result<HostValue<<T::Host as Host>::Object>, BindError> {
    match self.handle() {
      Some(handle) => Ok(handle.to_value()),
      None => Err(
        CoercionError::UnboundArgument {
          structure: type_name::<T>(),
        }
        .into(),
      ),
    }
  }
}

impl<T: Bindable> IntoHost<T::Host> for Option<T> {
  fn kind() -> ValueKind {
    ValueKind::Bindable {
      structure: type_name::<T>(),
      nullable: true,
    }
  }

  fn into_host(self) -> Result<HostValue<<T::Host as Host>::Object>, BindError> {
    match self {
      Some(v) => <T as IntoHost<T::Host>>::into_host(v),
      None => Ok(HostValue::Null),
    }
  }
}

impl<H: Host> Returns<H> for () {
  fn outputs() -> Vec<ValueKind> {
    Vec::new()
  }

  fn from_host(_value: HostValue<H::Object>, _cx: &CoerceCx<'_, H>) -> Result<Self, BindError> {
    Ok(())
  }

  fn zero() -> Self {}
}

impl<H: Host> Returns<H> for String {
  fn outputs() -> Vec<ValueKind> {
    vec![ValueKind::String]
  }

  fn from_host(value: HostValue<H::Object>, _cx: &CoerceCx<'_, H>) -> Result<Self, BindError> {
    match value {
      HostValue::String(s) => Ok(s),
      other => Err(mismatch(ValueKind::String, &other)),
    }
  }

  fn zero() -> Self {
    String::new()
  }
}

/// Reads a host integer. Floats are accepted only when they hold an exact integer.
fn host_int<O>(value: HostValue<O>) -> Result<i64, BindError> {
  match value {
    HostValue::Int(n) => Ok(n),
    // `i64::MAX as f64` rounds up to 2^63, hence the strict upper bound.
    HostValue::Float(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
      Ok(f as i64)
    }
    other => Err(mismatch(ValueKind::Int, &other)),
  }
}

impl<H: Host> Returns<H> for i64 {
  fn outputs() -> Vec<ValueKind> {
    vec![ValueKind::Int]
  }

  fn from_host(value: HostValue<H::Object>, _cx: &CoerceCx<'_, H>) -> Result<Self, BindError> {
    host_int(value)
  }

  fn zero() -> Self {
    0
  }
}

impl<H: Host> IntoHost<H> for i64 {
  fn kind() -> ValueKind {
    ValueKind::Int
  }

  fn into_host(self) -> Result<HostValue<H::Object>, BindError> {
    Ok(HostValue::Int(self))
  }
}

macro_rules! impl_narrow_int {
  ($($t:ty),* $(,)?) => {
    $(
      impl<H: Host> Returns<H> for $t {
        fn outputs() -> Vec<ValueKind> {
          vec![ValueKind::Int]
        }

        fn from_host(value: HostValue<H::Object>, _cx: &CoerceCx<'_, H>) -> Result<Self, BindError> {
          let n = host_int(value)?;
          <$t>::try_from(n).map_err(|_| {
            CoercionError::OutOfRange {
              target: stringify!($t),
              value: n,
            }
            .into()
          })
        }

        fn zero() -> Self {
          0
        }
      }

      impl<H: Host> IntoHost<H> for $t {
        fn kind() -> ValueKind {
          ValueKind::Int
        }

        fn into_host(self) -> Result<HostValue<H::Object>, BindError> {
          Ok(HostValue::Int(i64::from(self)))
        }
      }
    )*
  };
}

impl_narrow_int!(i32, u32);

/// Integers up to this magnitude have an exact `f64` representation.
const MAX_EXACT_FLOAT_INT: u64 = 1 << 53;

impl<H: Host> Returns<H> for f64 {
  fn outputs() -> Vec<ValueKind> {
    vec![ValueKind::Float]
  }

  fn from_host(value: HostValue<H::Object>, _cx: &CoerceCx<'_, H>) -> Result<Self, BindError> {
    match value {
      HostValue::Float(f) => Ok(f),
      HostValue::Int(n) if n.unsigned_abs() <= MAX_EXACT_FLOAT_INT => Ok(n as f64),
      HostValue::Int(n) => Err(
        CoercionError::OutOfRange {
          target: "f64",
          value: n,
        }
        .into(),
      ),
      other => Err(mismatch(ValueKind::Float, &other)),
    }
  }

  fn zero() -> Self {
    0.0
  }
}

impl<H: Host> Returns<H> for bool {
  fn outputs() -> Vec<ValueKind> {
    vec![ValueKind::Bool]
  }

  fn from_host(value: HostValue<H::Object>, _cx: &CoerceCx<'_, H>) -> Result<Self, BindError> {
    match value {
      HostValue::Bool(b) => Ok(b),
      other => Err(mismatch(ValueKind::Bool, &other)),
    }
  }

  fn zero() -> Self {
    false
  }
}

impl<T: Bindable> Returns<T::Host> for T {
  fn outputs() -> Vec<ValueKind> {
    vec![<T as IntoHost<T::Host>>::kind()]
  }

  fn from_host(
    value: HostValue<<T::Host as Host>::Object>,
    cx: &CoerceCx<'_, T::Host>,
  ) -> Result<Self, BindError> {
    match value {
      HostValue::Undefined | HostValue::Null => Ok(T::default()),
      HostValue::Object(object) => cx.bind_fresh(object),
      other => Err(mismatch(<T as IntoHost<T::Host>>::kind(), &other)),
    }
  }

  fn zero() -> Self {
    T::default()
  }
}

impl<T: Bindable> Returns<T::Host> for Option<T> {
  fn outputs() -> Vec<ValueKind> {
    vec![<Option<T> as IntoHost<T::Host>>::kind()]
  }

  fn from_host(
    value: HostValue<<T::Host as Host>::Object>,
    cx: &CoerceCx<'_, T::Host>,
  ) -> Result<Self, BindError> {
    match value {
      HostValue::Undefined | HostValue::Null => Ok(None),
      HostValue::Object(object) => cx.bind_fresh(object).map(Some),
      other => Err(mismatch(<Option<T> as IntoHost<T::Host>>::kind(), &other)),
    }
  }

  fn zero() -> Self {
    None
  }
}

// Collections and multiple outputs are declarable so that a declaration using them is reported by
// `bind` rather than rejected by the compiler with an unrelated trait error.

impl<H: Host, K: 'static, V: 'static> Returns<H> for HashMap<K, V> {
  fn outputs() -> Vec<ValueKind> {
    vec![ValueKind::Map]
  }

  fn from_host(_value: HostValue<H::Object>, _cx: &CoerceCx<'_, H>) -> Result<Self, BindError> {
    Err(CoercionError::Unsupported { kind: ValueKind::Map }.into())
  }

  fn zero() -> Self {
    HashMap::new()
  }
}

impl<H: Host, K: Ord + 'static, V: 'static> Returns<H> for BTreeMap<K, V> {
  fn outputs() -> Vec<ValueKind> {
    vec![ValueKind::Map]
  }

  fn from_host(_value: HostValue<H::Object>, _cx: &CoerceCx<'_, H>) -> Result<Self, BindError> {
    Err(CoercionError::Unsupported { kind: ValueKind::Map }.into())
  }

  fn zero() -> Self {
    BTreeMap::new()
  }
}

impl<H: Host, T: 'static> Returns<H> for Vec<T> {
  fn outputs() -> Vec<ValueKind> {
    vec![ValueKind::Array]
  }

  fn from_host(_value: HostValue<H::Object>, _cx: &CoerceCx<'_, H>) -> Result<Self, BindError> {
    Err(CoercionError::Unsupported {
      kind: ValueKind::Array,
    }
    .into())
  }

  fn zero() -> Self {
    Vec::new()
  }
}

fn element_kind<H: Host, R: Returns<H>>() -> ValueKind {
  match R::outputs().as_slice() {
    [kind] => *kind,
    _ => ValueKind::Value,
  }
}

impl<H: Host, A: Returns<H>, B: Returns<H>> Returns<H> for (A, B) {
  fn outputs() -> Vec<ValueKind> {
    // One output per element, `()` included.
    vec![element_kind::<H, A>(), element_kind::<H, B>()]
  }

  fn from_host(value: HostValue<H::Object>, _cx: &CoerceCx<'_, H>) -> Result<Self, BindError> {
    Err(mismatch(ValueKind::Value, &value))
  }

  fn zero() -> Self {
    (A::zero(), B::zero())
  }
}

#[cfg(test)]
mod tests {
  use super::host_int;
  use super::ValueKind;
  use crate::error::BindError;
  use crate::error::CoercionError;
  use crate::host::HostValue;

  #[test]
  fn integers_are_taken_as_is() {
    assert_eq!(host_int::<()>(HostValue::Int(-7)).unwrap(), -7);
    assert_eq!(host_int::<()>(HostValue::Float(42.0)).unwrap(), 42);
  }

  #[test]
  fn fractional_floats_are_not_truncated() {
    let err = host_int::<()>(HostValue::Float(1.5)).unwrap_err();
    assert!(matches!(
      err,
      BindError::Coercion(CoercionError::Mismatch {
        expected: ValueKind::Int,
        found: "float",
      })
    ));
    assert!(host_int::<()>(HostValue::Float(f64::NAN)).is_err());
    assert!(host_int::<()>(HostValue::Float(1e300)).is_err());
  }

  #[test]
  fn strings_are_not_integers() {
    assert!(host_int::<()>(HostValue::String("1".to_string())).is_err());
  }

  #[test]
  fn only_scalars_and_bindables_are_returnable() {
    assert!(ValueKind::String.is_returnable());
    assert!(ValueKind::Bindable {
      structure: "X",
      nullable: true
    }
    .is_returnable());
    assert!(!ValueKind::Map.is_returnable());
    assert!(!ValueKind::Array.is_returnable());
    assert!(!ValueKind::Value.is_returnable());
  }
}
