use crate::coerce::IntoHost;
use crate::coerce::Returns;
use crate::coerce::ValueKind;
use crate::error::BindError;
use crate::host::Host;
use crate::host::HostValue;
use std::fmt;

/// The shape of a declared member: how many values flow in and out, and of which kinds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignatureDesc {
  pub inputs: Vec<ValueKind>,
  pub outputs: Vec<ValueKind>,
}

impl SignatureDesc {
  pub fn of<H: Host, F: Signature<H>>() -> Self {
    Self {
      inputs: F::inputs(),
      outputs: <F::Output as Returns<H>>::outputs(),
    }
  }
}

impl fmt::Display for SignatureDesc {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("fn(")?;
    for (i, kind) in self.inputs.iter().enumerate() {
      if i > 0 {
        f.write_str(", ")?;
      }
      write!(f, "{kind}")?;
    }
    f.write_str(")")?;
    match self.outputs.as_slice() {
      [] => Ok(()),
      [one] => write!(f, " -> {one}"),
      many => {
        f.write_str(" -> (")?;
        for (i, kind) in many.iter().enumerate() {
          if i > 0 {
            f.write_str(", ")?;
          }
          write!(f, "{kind}")?;
        }
        f.write_str(")")
      }
    }
  }
}

/// A declared member signature, expressed as a function pointer type such as
/// `fn(String) -> Option<HtmlElement<H>>`. Implemented for up to six inputs.
pub trait Signature<H: Host>: 'static {
  /// The inputs as a tuple.
  type Args;
  type Output: Returns<H>;

  fn inputs() -> Vec<ValueKind>;

  /// Converts the inputs to host values, in declaration order.
  fn lower(args: Self::Args) -> Result<Vec<HostValue<H::Object>>, BindError>;
}

macro_rules! impl_signature {
  ($($arg:ident),*) => {
    impl<H: Host, $($arg: IntoHost<H> + 'static,)* R: Returns<H> + 'static> Signature<H> for fn($($arg),*) -> R {
      type Args = ($($arg,)*);
      type Output = R;

      fn inputs() -> Vec<ValueKind> {
        vec![$(<$arg as IntoHost<H>>::kind()),*]
      }

      #[allow(non_snake_case)]
      fn lower(args: Self::Args) -> Result<Vec<HostValue<H::Object>>, BindError> {
        let ($($arg,)*) = args;
        Ok(vec![$(<$arg as IntoHost<H>>::into_host($arg)?),*])
      }
    }
  };
}

impl_signature!();
impl_signature!(A);
impl_signature!(A, B);
impl_signature!(A, B, C);
impl_signature!(A, B, C, D);
impl_signature!(A, B, C, D, E);
impl_signature!(A, B, C, D, E, G);
