use serde::Deserialize;
use serde::Serialize;

/// What a member with a bindable output does when the host call or the nested bind fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NestedFailurePolicy {
  /// Log the failure and return the output type's zero value (`None`, or an unbound structure).
  /// One malformed branch of the host graph then does not block use of the rest.
  #[default]
  ZeroValue,
  /// Return the error to the caller of the member.
  Propagate,
}

/// Binder configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BindOptions {
  pub nested_failure: NestedFailurePolicy,
}

impl BindOptions {
  pub fn with_nested_failure(mut self, policy: NestedFailurePolicy) -> Self {
    self.nested_failure = policy;
    self
  }
}

#[cfg(test)]
mod tests {
  use super::BindOptions;
  use super::NestedFailurePolicy;

  #[test]
  fn defaults_fail_open() {
    assert_eq!(
      BindOptions::default().nested_failure,
      NestedFailurePolicy::ZeroValue
    );
  }

  #[test]
  fn deserializes_from_partial_config() {
    let opts: BindOptions = serde_json::from_str("{}").unwrap();
    assert_eq!(opts, BindOptions::default());

    let opts: BindOptions = serde_json::from_str(r#"{"nested_failure":"propagate"}"#).unwrap();
    assert_eq!(opts.nested_failure, NestedFailurePolicy::Propagate);
  }

  #[test]
  fn serializes_policy_in_snake_case() {
    let opts = BindOptions::default().with_nested_failure(NestedFailurePolicy::Propagate);
    assert_eq!(
      serde_json::to_string(&opts).unwrap(),
      r#"{"nested_failure":"propagate"}"#
    );
  }
}
