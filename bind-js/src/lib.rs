//! Declarative binding of typed structures onto a dynamically-typed host object graph.
//!
//! A *bindable structure* has one field holding a [`HostHandle`] and any number of tagged
//! [`Member`] slots. [`bind`] assigns the handle and installs a callable into every tagged member:
//! - a tag `key` makes the member a property: `fn() -> T` reads `key`, `fn(T)` writes it;
//! - a tag `key()` makes the member a method: `fn(A, ..) -> R` calls `key` with the inputs.
//!
//! Outputs are coerced to the declared type on every call. When the declared output is itself a
//! bindable structure, the call result is bound into a fresh instance before it is returned, so a
//! whole host object graph can be walked through typed structures. Binding is driven by calls,
//! never by eager traversal, so cyclic graphs need no special handling.
//!
//! The host is abstracted by [`Host`]: `get`, `set`, `call`, `truthy` and `enumerate_keys` are all
//! the binder needs.
//!
//! # Errors
//!
//! - [`SchemaError`]s come from [`bind`] and describe declarations that cannot be bound (wrong
//!   arity for the role, unsupported output type, missing handle field, tagged non-member field).
//! - [`CoercionError`]s and host errors come from calling a member. For members whose output is a
//!   bindable structure they are logged and replaced by the zero value by default; see
//!   [`NestedFailurePolicy`].
//!
//! # Threading
//!
//! Binding and calls are synchronous and single-threaded. Handles and members are built on `Rc` and
//! cannot leave the thread that created them.

#[macro_use]
mod macros;

mod binder;
mod coerce;
pub mod dom;
mod error;
mod host;
mod keys;
mod member;
mod options;
mod schema;
mod signature;
pub mod synth;
mod tag;

pub use crate::binder::bind;
pub use crate::binder::Bindable;
pub use crate::binder::Binder;
pub use crate::coerce::CoerceCx;
pub use crate::coerce::IntoHost;
pub use crate::coerce::Returns;
pub use crate::coerce::ValueKind;
pub use crate::error::BindError;
pub use crate::error::CoercionError;
pub use crate::error::SchemaError;
pub use crate::host::Host;
pub use crate::host::HostHandle;
pub use crate::host::HostValue;
pub use crate::keys::keys;
pub use crate::keys::keys_of;
pub use crate::member::BoundCallable;
pub use crate::member::Member;
pub use crate::options::BindOptions;
pub use crate::options::NestedFailurePolicy;
pub use crate::schema::FieldDescriptor;
pub use crate::schema::FieldShape;
pub use crate::schema::Schema;
pub use crate::schema::SchemaBuilder;
pub use crate::signature::Signature;
pub use crate::signature::SignatureDesc;
pub use crate::tag::Role;
pub use crate::tag::Tag;
