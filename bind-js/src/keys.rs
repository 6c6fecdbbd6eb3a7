use crate::binder::Bindable;
use crate::error::BindError;
use crate::host::Host;
use crate::host::HostHandle;
use crate::host::HostValue;

/// Lists the enumerable keys of a host value, in host enumeration order.
///
/// Falsy values (as the host defines them) have no keys; this is not an error. Order is whatever
/// the host produces and may differ between hosts.
pub fn keys<H: Host>(host: &H, value: &HostValue<H::Object>) -> Result<Vec<String>, BindError> {
  if !host.truthy(value) {
    return Ok(Vec::new());
  }
  host.enumerate_keys(value).map_err(BindError::host)
}

impl<H: Host> HostHandle<H> {
  pub fn keys(&self) -> Result<Vec<String>, BindError> {
    keys(self.host().as_ref(), &self.to_value())
  }
}

/// Keys of the object a structure is bound to. An unbound structure has none.
pub fn keys_of<T: Bindable>(structure: &T) -> Result<Vec<String>, BindError> {
  match structure.handle() {
    Some(handle) => handle.keys(),
    None => Ok(Vec::new()),
  }
}
