use crate::error::BindError;
use crate::error::SchemaError;
use crate::host::Host;
use crate::host::HostHandle;
use crate::options::BindOptions;
use crate::schema::Schema;
use crate::schema::SchemaBuilder;
use std::any::type_name;
use tracing::debug;
use tracing::debug_span;
use tracing::warn;

/// A structure that can be projected onto a host object.
///
/// Implementations declare exactly one field holding an `Option<HostHandle<Self::Host>>` and any
/// number of [`Member`](crate::Member) slots, and list them in [`Bindable::describe`]. The
/// [`bindable!`](crate::bindable) macro writes all of this from a struct-like declaration.
pub trait Bindable: Default + 'static {
  type Host: Host;

  /// Lists the structure's fields, in declaration order.
  fn describe(schema: &mut SchemaBuilder<Self>);

  /// The handle this structure was bound to, if any.
  fn handle(&self) -> Option<&HostHandle<Self::Host>>;
}

/// Binds structures onto host objects.
///
/// A binder holds only its options. Members with bindable outputs keep a clone of the binder so
/// nested results are bound with the same options.
#[derive(Clone, Debug, Default)]
pub struct Binder {
  options: BindOptions,
}

impl Binder {
  pub fn new(options: BindOptions) -> Self {
    Self { options }
  }

  pub fn options(&self) -> &BindOptions {
    &self.options
  }

  /// Assigns `handle` to `target`'s handle field, then synthesizes and installs every tagged
  /// member, in declaration order.
  ///
  /// On error the bind stops; members installed before the failing one stay installed. Binding
  /// again, with the same or another handle, replaces every tagged member. The host is not
  /// contacted: members only talk to the host when they are called.
  pub fn bind<T: Bindable>(
    &self,
    target: &mut T,
    handle: HostHandle<T::Host>,
  ) -> Result<(), BindError> {
    let schema = Schema::<T>::of();
    let _span = debug_span!("bind", structure = schema.structure()).entered();

    assign_handle(&schema, target, &handle)?;

    for field in schema.fields() {
      let Some(tag) = field.tag() else {
        continue;
      };
      match field.install(target, tag, &handle, self) {
        Some(result) => {
          result?;
          debug!(field = field.name(), %tag, "installed member");
        }
        None => {
          return Err(
            SchemaError::NotCallable {
              field: field.name(),
              declared: field.shape().declared(),
            }
            .into(),
          );
        }
      }
    }
    Ok(())
  }
}

fn assign_handle<T: Bindable>(
  schema: &Schema<T>,
  target: &mut T,
  handle: &HostHandle<T::Host>,
) -> Result<(), SchemaError> {
  let mut candidates = schema.handle_fields::<HostHandle<T::Host>>();
  let Some(field) = candidates.next() else {
    return Err(SchemaError::HandleFieldNotFound {
      structure: schema.structure(),
      expected: type_name::<HostHandle<T::Host>>(),
    });
  };
  if let Some(ignored) = candidates.next() {
    warn!(
      structure = schema.structure(),
      used = field.name(),
      ignored = ignored.name(),
      "several handle fields; using the first"
    );
  }
  if !field.assign_handle(target, handle) {
    return Err(SchemaError::HandleFieldNotFound {
      structure: schema.structure(),
      expected: type_name::<HostHandle<T::Host>>(),
    });
  }
  Ok(())
}

/// Binds `target` to `handle` with default options.
pub fn bind<T: Bindable>(target: &mut T, handle: HostHandle<T::Host>) -> Result<(), BindError> {
  Binder::default().bind(target, handle)
}
