/// Declares a bindable structure.
///
/// ```ignore
/// bindable! {
///   pub struct Document<H> {
///     pub value: HostHandle,
///     pub body: fn() -> Option<HtmlElement<H>> = "body",
///     pub create_element: fn(String) -> Option<HtmlElement<H>> = "createElement()",
///   }
/// }
/// ```
///
/// The first field is the handle field and must be written as `name: HostHandle`; it is declared
/// as `Option<HostHandle<H>>`. Every other field is a [`Member`](crate::Member) with the given
/// signature and tag. The macro also implements `Default`, `Clone`, `Debug` and
/// [`Bindable`](crate::Bindable) without placing bounds on `H` beyond [`Host`](crate::Host).
#[macro_export]
macro_rules! bindable {
  (
    $(#[$meta:meta])*
    $vis:vis struct $name:ident<$h:ident> {
      $(#[$handle_meta:meta])*
      $handle_vis:vis $handle:ident: HostHandle,
      $(
        $(#[$field_meta:meta])*
        $field_vis:vis $field:ident: $sig:ty = $tag:literal
      ),* $(,)?
    }
  ) => {
    $(#[$meta])*
    $vis struct $name<$h: $crate::Host> {
      $(#[$handle_meta])*
      $handle_vis $handle: ::core::option::Option<$crate::HostHandle<$h>>,
      $(
        $(#[$field_meta])*
        $field_vis $field: $crate::Member<$h, $sig>,
      )*
    }

    impl<$h: $crate::Host> ::core::default::Default for $name<$h> {
      fn default() -> Self {
        Self {
          $handle: ::core::option::Option::None,
          $($field: ::core::default::Default::default(),)*
        }
      }
    }

    impl<$h: $crate::Host> ::core::clone::Clone for $name<$h> {
      fn clone(&self) -> Self {
        Self {
          $handle: ::core::clone::Clone::clone(&self.$handle),
          $($field: ::core::clone::Clone::clone(&self.$field),)*
        }
      }
    }

    impl<$h: $crate::Host> ::core::fmt::Debug for $name<$h> {
      fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        f.debug_struct(::core::stringify!($name))
          .field(::core::stringify!($handle), &self.$handle)
          $(.field(::core::stringify!($field), &self.$field))*
          .finish()
      }
    }

    impl<$h: $crate::Host> $crate::Bindable for $name<$h> {
      type Host = $h;

      fn describe(schema: &mut $crate::SchemaBuilder<Self>) {
        schema.handle(::core::stringify!($handle), |s| &mut s.$handle);
        $(schema.member(::core::stringify!($field), $tag, |s| &mut s.$field);)*
      }

      fn handle(&self) -> ::core::option::Option<&$crate::HostHandle<$h>> {
        self.$handle.as_ref()
      }
    }
  };
}
