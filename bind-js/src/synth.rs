//! Member synthesis.
//!
//! Synthesis has two phases. [`plan`] looks only at the tag and the declared signature and picks
//! one of a closed set of [`Adapter`]s, rejecting illegal shapes; it never touches the host.
//! [`synthesize`] then instantiates the chosen adapter as a closure over the host handle. All
//! validation happens in the first phase and all coercion in the second, per call.

use crate::binder::Binder;
use crate::coerce::CoerceCx;
use crate::coerce::Returns;
use crate::coerce::ValueKind;
use crate::error::BindError;
use crate::error::SchemaError;
use crate::host::Host;
use crate::host::HostHandle;
use crate::host::HostValue;
use crate::member::BoundCallable;
use crate::member::Invoke;
use crate::options::NestedFailurePolicy;
use crate::signature::Signature;
use crate::signature::SignatureDesc;
use crate::tag::Role;
use crate::tag::Tag;
use std::rc::Rc;
use tracing::warn;

const PROPERTY_SHAPES: &str = "fn() -> T (getter) or fn(T) (setter)";

/// How a synthesized member talks to the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Adapter {
  /// `call(key, args..)`; the result is discarded without coercion.
  CallDiscard,
  /// `call(key, args..)`; the result is coerced to the given kind.
  CallReturn(ValueKind),
  /// `get(key)`, coerced to the given kind.
  Get(ValueKind),
  /// `set(key, value)` with the single input, passed as its host-native value.
  Set(ValueKind),
}

fn returnable(tag: &Tag, kind: ValueKind) -> Result<ValueKind, SchemaError> {
  if kind.is_returnable() {
    Ok(kind)
  } else {
    Err(SchemaError::UnsupportedReturnKind {
      key: tag.key().to_string(),
      role: tag.role(),
      kind,
    })
  }
}

/// Chooses the adapter for a member, or explains why its declaration cannot be bound.
pub fn plan(tag: &Tag, signature: &SignatureDesc) -> Result<Adapter, SchemaError> {
  let inputs = signature.inputs.as_slice();
  let outputs = signature.outputs.as_slice();
  if outputs.len() > 1 {
    return Err(SchemaError::TooManyOutputs {
      key: tag.key().to_string(),
      outputs: outputs.len(),
    });
  }
  match tag.role() {
    Role::Method => match outputs.first() {
      None => Ok(Adapter::CallDiscard),
      Some(kind) => returnable(tag, *kind).map(Adapter::CallReturn),
    },
    Role::Property => match (inputs, outputs) {
      ([], [kind]) => returnable(tag, *kind).map(Adapter::Get),
      ([kind], []) => Ok(Adapter::Set(*kind)),
      _ => Err(SchemaError::UnsupportedShape {
        key: tag.key().to_string(),
        role: Role::Property,
        inputs: inputs.len(),
        outputs: outputs.len(),
        expected: PROPERTY_SHAPES,
      }),
    },
  }
}

/// Applies the output coercion, and the nested-failure policy for bindable outputs.
fn resolve<H: Host, R: Returns<H>>(
  kind: ValueKind,
  key: &str,
  raw: Result<HostValue<H::Object>, BindError>,
  handle: &HostHandle<H>,
  binder: &Binder,
) -> Result<R, BindError> {
  let cx = CoerceCx { handle, binder };
  match raw.and_then(|value| R::from_host(value, &cx)) {
    Err(error)
      if kind.is_bindable()
        && binder.options().nested_failure == NestedFailurePolicy::ZeroValue =>
    {
      warn!(key, %kind, %error, "nested bind failed; returning zero value");
      Ok(R::zero())
    }
    result => result,
  }
}

/// Builds the callable for one member.
pub fn synthesize<H: Host, F: Signature<H>>(
  tag: &Tag,
  handle: &HostHandle<H>,
  binder: &Binder,
) -> Result<BoundCallable<H, F>, BindError> {
  let adapter = plan(tag, &SignatureDesc::of::<H, F>())?;
  let key: Rc<str> = Rc::from(tag.key());
  let handle = handle.clone();
  let binder = binder.clone();

  let invoke: Invoke<H, F> = match adapter {
    Adapter::CallDiscard => Rc::new(move |args: F::Args| -> Result<F::Output, BindError> {
      let args = F::lower(args)?;
      handle.call(&key, args)?;
      Ok(<F::Output as Returns<H>>::zero())
    }),
    Adapter::CallReturn(kind) => Rc::new(move |args: F::Args| -> Result<F::Output, BindError> {
      let args = F::lower(args)?;
      let raw = handle.call(&key, args);
      resolve::<H, F::Output>(kind, &key, raw, &handle, &binder)
    }),
    Adapter::Get(kind) => Rc::new(move |_args: F::Args| -> Result<F::Output, BindError> {
      let raw = handle.get(&key);
      resolve::<H, F::Output>(kind, &key, raw, &handle, &binder)
    }),
    Adapter::Set(_) => Rc::new(move |args: F::Args| -> Result<F::Output, BindError> {
      let value = F::lower(args)?.into_iter().next().unwrap_or_default();
      handle.set(&key, value)?;
      Ok(<F::Output as Returns<H>>::zero())
    }),
  };
  Ok(BoundCallable::new(tag.clone(), invoke))
}
