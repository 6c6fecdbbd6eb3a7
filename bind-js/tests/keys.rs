mod toy;

use std::collections::BTreeSet;

use bind_js::bind;
use bind_js::dom::Global;
use bind_js::keys;
use bind_js::keys_of;
use bind_js::HostValue;
use toy::ToyHost;

fn set(keys: Vec<String>) -> BTreeSet<String> {
  keys.into_iter().collect()
}

#[test]
fn lists_own_keys() {
  let toy = ToyHost::new();
  let obj = toy.alloc();
  toy.define(obj, "b", HostValue::Int(1));
  toy.define(obj, "a", HostValue::Null);
  toy.define(obj, "c", ToyHost::string(""));

  let found = keys(&*toy, &HostValue::Object(obj)).unwrap();
  assert_eq!(found.len(), 3);
  assert_eq!(
    set(found),
    set(vec!["a".to_string(), "b".to_string(), "c".to_string()])
  );
  assert!(toy.log().is_empty());
}

#[test]
fn falsy_values_have_no_keys() {
  let toy = ToyHost::new();
  for value in [
    HostValue::Undefined,
    HostValue::Null,
    HostValue::Bool(false),
    HostValue::Int(0),
    HostValue::Float(f64::NAN),
    ToyHost::string(""),
  ] {
    assert!(keys(&*toy, &value).unwrap().is_empty());
  }
}

#[test]
fn keys_of_a_bound_structure() {
  let toy = ToyHost::new();
  let global = toy.alloc();
  toy.define(global, "window", HostValue::Object(global));
  toy.define(global, "innerWidth", HostValue::Int(800));

  let mut root = Global::<ToyHost>::default();
  assert!(keys_of(&root).unwrap().is_empty());

  bind(&mut root, toy.handle(global)).unwrap();
  assert_eq!(
    set(keys_of(&root).unwrap()),
    set(vec!["window".to_string(), "innerWidth".to_string()])
  );
  assert_eq!(
    set(toy.handle(global).keys().unwrap()),
    set(keys_of(&root).unwrap())
  );
}
