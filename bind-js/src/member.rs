use crate::coerce::IntoHost;
use crate::coerce::Returns;
use crate::error::BindError;
use crate::host::Host;
use crate::signature::Signature;
use crate::tag::Tag;
use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

pub(crate) type Invoke<H, F> =
  Rc<dyn Fn(<F as Signature<H>>::Args) -> Result<<F as Signature<H>>::Output, BindError>>;

/// The closure installed into a member slot by a bind pass.
///
/// It has already captured the host object, the key and the coercion rule, so invoking it performs
/// exactly one host operation (plus, for bindable outputs, a nested bind of the result).
pub struct BoundCallable<H: Host, F: Signature<H>> {
  tag: Tag,
  invoke: Invoke<H, F>,
}

impl<H: Host, F: Signature<H>> BoundCallable<H, F> {
  pub(crate) fn new(tag: Tag, invoke: Invoke<H, F>) -> Self {
    Self { tag, invoke }
  }

  pub fn tag(&self) -> &Tag {
    &self.tag
  }

  pub fn invoke(&self, args: F::Args) -> Result<F::Output, BindError> {
    (self.invoke)(args)
  }
}

impl<H: Host, F: Signature<H>> Clone for BoundCallable<H, F> {
  fn clone(&self) -> Self {
    Self {
      tag: self.tag.clone(),
      invoke: Rc::clone(&self.invoke),
    }
  }
}

/// A member slot of a bindable structure.
///
/// `F` is the declared signature as a function pointer type; the slot's role (property or method)
/// comes from its tag. A slot is empty until its structure is bound, and each bind pass replaces
/// its callable.
pub struct Member<H: Host, F: Signature<H>> {
  bound: Option<BoundCallable<H, F>>,
  _signature: PhantomData<fn() -> F>,
}

impl<H: Host, F: Signature<H>> Member<H, F> {
  pub fn is_bound(&self) -> bool {
    self.bound.is_some()
  }

  pub fn bound(&self) -> Option<&BoundCallable<H, F>> {
    self.bound.as_ref()
  }

  pub(crate) fn install(&mut self, callable: BoundCallable<H, F>) {
    self.bound = Some(callable);
  }

  /// Invokes the member with its inputs as a tuple.
  pub fn invoke(&self, args: F::Args) -> Result<F::Output, BindError> {
    match &self.bound {
      Some(callable) => callable.invoke(args),
      None => Err(BindError::Unbound),
    }
  }
}

impl<H: Host, F: Signature<H>> Default for Member<H, F> {
  fn default() -> Self {
    Self {
      bound: None,
      _signature: PhantomData,
    }
  }
}

impl<H: Host, F: Signature<H>> Clone for Member<H, F> {
  fn clone(&self) -> Self {
    Self {
      bound: self.bound.clone(),
      _signature: PhantomData,
    }
  }
}

impl<H: Host, F: Signature<H>> fmt::Debug for Member<H, F> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.bound {
      Some(callable) => write!(f, "Member({})", callable.tag()),
      None => f.write_str("Member(<unbound>)"),
    }
  }
}

// Positional `call` for each supported arity.
macro_rules! impl_member_call {
  ($($arg:ident),*) => {
    impl<H: Host, $($arg: IntoHost<H> + 'static,)* R: Returns<H> + 'static> Member<H, fn($($arg),*) -> R> {
      #[allow(non_snake_case)]
      pub fn call(&self, $($arg: $arg),*) -> Result<R, BindError> {
        self.invoke(($($arg,)*))
      }
    }
  };
}

impl_member_call!();
impl_member_call!(A);
impl_member_call!(A, B);
impl_member_call!(A, B, C);
impl_member_call!(A, B, C, D);
impl_member_call!(A, B, C, D, E);
impl_member_call!(A, B, C, D, E, G);
