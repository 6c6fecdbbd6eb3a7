//! Descriptor tables for bindable structures.
//!
//! A structure describes its fields once, through [`Bindable::describe`]. The resulting [`Schema`]
//! records, per field in declaration order, its name, its parsed tag, and its shape (handle,
//! member with a declared signature, or plain value), together with the accessor the binder uses
//! to write into it. Schemas are built on first use and cached per type for the current thread.

use crate::binder::Bindable;
use crate::binder::Binder;
use crate::error::BindError;
use crate::host::HostHandle;
use crate::member::Member;
use crate::signature::Signature;
use crate::signature::SignatureDesc;
use crate::synth::synthesize;
use crate::tag::Tag;
use ahash::AHashMap;
use std::any::type_name;
use std::any::Any;
use std::any::TypeId;
use std::cell::RefCell;
use std::rc::Rc;

thread_local! {
  static SCHEMAS: RefCell<AHashMap<TypeId, Rc<dyn Any>>> = RefCell::new(AHashMap::new());
}

/// The declared shape of one field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldShape {
  /// Holds the structure's own host handle. Matched against the handle type by `TypeId`.
  Handle {
    declared: &'static str,
    type_id: TypeId,
  },
  /// A callable member slot.
  Member(SignatureDesc),
  /// Any other value; cannot carry a tag.
  Plain { declared: &'static str },
}

impl FieldShape {
  pub fn declared(&self) -> String {
    match self {
      FieldShape::Handle { declared, .. } | FieldShape::Plain { declared } => declared.to_string(),
      FieldShape::Member(signature) => signature.to_string(),
    }
  }
}

type AssignHandle<T> = Box<dyn Fn(&mut T, &dyn Any) -> bool>;
type InstallMember<T> =
  Box<dyn Fn(&mut T, &Tag, &HostHandle<<T as Bindable>::Host>, &Binder) -> Result<(), BindError>>;

enum Slot<T: Bindable> {
  Handle(AssignHandle<T>),
  Member(InstallMember<T>),
  Plain,
}

pub struct FieldDescriptor<T: Bindable> {
  name: &'static str,
  tag: Option<Tag>,
  shape: FieldShape,
  slot: Slot<T>,
}

impl<T: Bindable> FieldDescriptor<T> {
  pub fn name(&self) -> &'static str {
    self.name
  }

  /// The parsed tag; `None` for untagged fields.
  pub fn tag(&self) -> Option<&Tag> {
    self.tag.as_ref()
  }

  pub fn shape(&self) -> &FieldShape {
    &self.shape
  }

  pub(crate) fn assign_handle(&self, target: &mut T, handle: &dyn Any) -> bool {
    match &self.slot {
      Slot::Handle(assign) => assign(target, handle),
      Slot::Member(_) | Slot::Plain => false,
    }
  }

  /// Synthesizes and installs this field's callable. `None` if the field is not a member slot.
  pub(crate) fn install(
    &self,
    target: &mut T,
    tag: &Tag,
    handle: &HostHandle<T::Host>,
    binder: &Binder,
  ) -> Option<Result<(), BindError>> {
    match &self.slot {
      Slot::Member(install) => Some(install(target, tag, handle, binder)),
      Slot::Handle(_) | Slot::Plain => None,
    }
  }
}

/// Collects field descriptors, in declaration order.
pub struct SchemaBuilder<T: Bindable> {
  fields: Vec<FieldDescriptor<T>>,
}

impl<T: Bindable> SchemaBuilder<T> {
  fn new() -> Self {
    Self { fields: Vec::new() }
  }

  /// Declares a field that holds a host handle of type `K`.
  pub fn handle<K: Clone + 'static>(
    &mut self,
    name: &'static str,
    access: fn(&mut T) -> &mut Option<K>,
  ) -> &mut Self {
    self.fields.push(FieldDescriptor {
      name,
      tag: None,
      shape: FieldShape::Handle {
        declared: type_name::<K>(),
        type_id: TypeId::of::<K>(),
      },
      slot: Slot::Handle(Box::new(move |target: &mut T, handle: &dyn Any| -> bool {
        match handle.downcast_ref::<K>() {
          Some(handle) => {
            *access(target) = Some(handle.clone());
            true
          }
          None => false,
        }
      })),
    });
    self
  }

  /// Declares a member slot. `tag` is the raw annotation; an empty tag leaves the slot unbound.
  pub fn member<F: Signature<T::Host>>(
    &mut self,
    name: &'static str,
    tag: &'static str,
    access: fn(&mut T) -> &mut Member<T::Host, F>,
  ) -> &mut Self {
    self.fields.push(FieldDescriptor {
      name,
      tag: Tag::parse(tag),
      shape: FieldShape::Member(SignatureDesc::of::<T::Host, F>()),
      slot: Slot::Member(Box::new(
        move |target: &mut T,
              tag: &Tag,
              handle: &HostHandle<T::Host>,
              binder: &Binder|
              -> Result<(), BindError> {
          let callable = synthesize::<T::Host, F>(tag, handle, binder)?;
          access(target).install(callable);
          Ok(())
        },
      )),
    });
    self
  }

  /// Declares a field of any other type `V`. Declaring it with a non-empty tag makes every bind of
  /// the structure fail.
  pub fn plain<V: 'static>(&mut self, name: &'static str, tag: &'static str) -> &mut Self {
    self.fields.push(FieldDescriptor {
      name,
      tag: Tag::parse(tag),
      shape: FieldShape::Plain {
        declared: type_name::<V>(),
      },
      slot: Slot::Plain,
    });
    self
  }
}

/// The descriptor table of a bindable structure.
pub struct Schema<T: Bindable> {
  structure: &'static str,
  fields: Vec<FieldDescriptor<T>>,
}

impl<T: Bindable> Schema<T> {
  fn build() -> Self {
    let mut builder = SchemaBuilder::new();
    T::describe(&mut builder);
    Self {
      structure: type_name::<T>(),
      fields: builder.fields,
    }
  }

  /// The schema of `T`, built on first use.
  pub fn of() -> Rc<Self> {
    let id = TypeId::of::<T>();
    let cached = SCHEMAS.with(|schemas| schemas.borrow().get(&id).cloned());
    if let Some(schema) = cached.and_then(|any| any.downcast::<Self>().ok()) {
      return schema;
    }
    // `describe` runs without the cache borrowed.
    let schema = Rc::new(Self::build());
    SCHEMAS.with(|schemas| {
      schemas
        .borrow_mut()
        .insert(id, Rc::clone(&schema) as Rc<dyn Any>);
    });
    schema
  }

  pub fn structure(&self) -> &'static str {
    self.structure
  }

  pub fn fields(&self) -> &[FieldDescriptor<T>] {
    &self.fields
  }

  pub fn field(&self, name: &str) -> Option<&FieldDescriptor<T>> {
    self.fields.iter().find(|f| f.name == name)
  }

  /// Fields whose declared type is exactly `K`, in declaration order.
  pub(crate) fn handle_fields<K: 'static>(&self) -> impl Iterator<Item = &FieldDescriptor<T>> {
    let id = TypeId::of::<K>();
    self.fields.iter().filter(move |f| {
      matches!(f.shape, FieldShape::Handle { type_id, .. } if type_id == id)
    })
  }
}
