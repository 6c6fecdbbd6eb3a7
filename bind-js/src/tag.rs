//! Member tag grammar.
//!
//! A tag is the annotation that links a declared member to the host. It has exactly two shapes:
//! - `key` addresses a property, read with `get` or written with `set`.
//! - `key()` addresses a method, invoked with `call`.
//!
//! There is no escaping and no nesting; only a single trailing `()` is significant.

use std::fmt;

const CALL_MARKER: &str = "()";

/// How the host is asked for a member.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
  Property,
  Method,
}

impl fmt::Display for Role {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Role::Property => f.write_str("property"),
      Role::Method => f.write_str("method"),
    }
  }
}

/// A parsed member tag.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Tag {
  Property(String),
  Method(String),
}

impl Tag {
  /// Parses a raw annotation. Returns `None` for the empty annotation, which marks a plain,
  /// unbound field.
  pub fn parse(raw: &str) -> Option<Tag> {
    if raw.is_empty() {
      return None;
    }
    Some(match raw.strip_suffix(CALL_MARKER) {
      Some(key) => Tag::Method(key.to_string()),
      None => Tag::Property(raw.to_string()),
    })
  }

  pub fn key(&self) -> &str {
    match self {
      Tag::Property(key) | Tag::Method(key) => key,
    }
  }

  pub fn role(&self) -> Role {
    match self {
      Tag::Property(_) => Role::Property,
      Tag::Method(_) => Role::Method,
    }
  }
}

impl fmt::Display for Tag {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Tag::Property(key) => f.write_str(key),
      Tag::Method(key) => write!(f, "{key}{CALL_MARKER}"),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::Role;
  use super::Tag;

  #[test]
  fn plain_key_is_a_property() {
    let tag = Tag::parse("title").unwrap();
    assert_eq!(tag, Tag::Property("title".to_string()));
    assert_eq!(tag.key(), "title");
    assert_eq!(tag.role(), Role::Property);
  }

  #[test]
  fn call_marker_is_stripped_for_methods() {
    let tag = Tag::parse("createElement()").unwrap();
    assert_eq!(tag, Tag::Method("createElement".to_string()));
    assert_eq!(tag.role(), Role::Method);
  }

  #[test]
  fn empty_annotation_is_untagged() {
    assert_eq!(Tag::parse(""), None);
  }

  #[test]
  fn only_the_trailing_marker_counts() {
    assert_eq!(
      Tag::parse("a()b"),
      Some(Tag::Property("a()b".to_string()))
    );
    assert_eq!(Tag::parse("f()()"), Some(Tag::Method("f()".to_string())));
    assert_eq!(Tag::parse("()"), Some(Tag::Method(String::new())));
    assert_eq!(Tag::parse("f("), Some(Tag::Property("f(".to_string())));
  }

  #[test]
  fn parse_is_pure() {
    for raw in ["innerHTML", "appendChild()", "x", "()", "a.b()"] {
      assert_eq!(Tag::parse(raw), Tag::parse(raw));
    }
  }

  #[test]
  fn display_restores_the_raw_annotation() {
    for raw in ["innerHTML", "appendChild()", "f()()"] {
      assert_eq!(Tag::parse(raw).unwrap().to_string(), raw);
    }
  }
}
