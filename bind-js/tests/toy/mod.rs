#![allow(dead_code)]

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use bind_js::Host;
use bind_js::HostHandle;
use bind_js::HostValue;

#[derive(Debug)]
pub enum ToyError {
  NotCallable(String),
  Thrown(String),
}

impl fmt::Display for ToyError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ToyError::NotCallable(key) => write!(f, "TypeError: {key} is not a function"),
      ToyError::Thrown(msg) => write!(f, "Error: {msg}"),
    }
  }
}

impl std::error::Error for ToyError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ToyObject(pub usize);

pub type ToyValue = HostValue<ToyObject>;

/// One host operation, as observed by the toy host.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
  Get(ToyObject, String),
  Set(ToyObject, String, ToyValue),
  Call(ToyObject, String, Vec<ToyValue>),
}

pub type NativeFn = Rc<dyn Fn(&ToyHost, ToyObject, Vec<ToyValue>) -> Result<ToyValue, ToyError>>;

#[derive(Default)]
pub struct ToyObjectData {
  pub props: Vec<(String, ToyValue)>,
  pub methods: Vec<(String, NativeFn)>,
  /// Keys whose reads fail with a host error.
  pub poisoned: Vec<String>,
}

/// An in-memory host: objects with ordered own properties and native methods, plus a log of every
/// `get`/`set`/`call` the binder performs.
#[derive(Default)]
pub struct ToyHost {
  objects: RefCell<Vec<ToyObjectData>>,
  log: RefCell<Vec<Op>>,
}

impl ToyHost {
  pub fn new() -> Rc<Self> {
    Rc::new(Self::default())
  }

  pub fn alloc(&self) -> ToyObject {
    let mut objects = self.objects.borrow_mut();
    objects.push(ToyObjectData::default());
    ToyObject(objects.len() - 1)
  }

  /// Defines a property without logging an operation.
  pub fn define(&self, obj: ToyObject, key: &str, value: ToyValue) {
    let mut objects = self.objects.borrow_mut();
    let props = &mut objects[obj.0].props;
    match props.iter_mut().find(|(k, _)| k == key) {
      Some((_, v)) => *v = value,
      None => props.push((key.to_string(), value)),
    }
  }

  pub fn define_method(
    &self,
    obj: ToyObject,
    key: &str,
    f: impl Fn(&ToyHost, ToyObject, Vec<ToyValue>) -> Result<ToyValue, ToyError> + 'static,
  ) {
    self.objects.borrow_mut()[obj.0]
      .methods
      .push((key.to_string(), Rc::new(f)));
  }

  pub fn poison(&self, obj: ToyObject, key: &str) {
    self.objects.borrow_mut()[obj.0]
      .poisoned
      .push(key.to_string());
  }

  /// Reads a property without logging an operation.
  pub fn prop(&self, obj: ToyObject, key: &str) -> ToyValue {
    self.objects.borrow()[obj.0]
      .props
      .iter()
      .find(|(k, _)| k == key)
      .map(|(_, v)| v.clone())
      .unwrap_or(HostValue::Undefined)
  }

  pub fn string(s: &str) -> ToyValue {
    HostValue::String(s.to_string())
  }

  pub fn log(&self) -> Vec<Op> {
    self.log.borrow().clone()
  }

  pub fn clear_log(&self) {
    self.log.borrow_mut().clear();
  }

  pub fn handle(self: &Rc<Self>, obj: ToyObject) -> HostHandle<ToyHost> {
    HostHandle::new(Rc::clone(self), obj)
  }
}

impl Host for ToyHost {
  type Object = ToyObject;
  type Error = ToyError;

  fn get(&self, object: &ToyObject, key: &str) -> Result<ToyValue, ToyError> {
    self.log.borrow_mut().push(Op::Get(*object, key.to_string()));
    if self.objects.borrow()[object.0]
      .poisoned
      .iter()
      .any(|k| k == key)
    {
      return Err(ToyError::Thrown(format!("reading {key}")));
    }
    Ok(self.prop(*object, key))
  }

  fn set(&self, object: &ToyObject, key: &str, value: ToyValue) -> Result<(), ToyError> {
    self
      .log
      .borrow_mut()
      .push(Op::Set(*object, key.to_string(), value.clone()));
    self.define(*object, key, value);
    Ok(())
  }

  fn call(&self, object: &ToyObject, key: &str, args: Vec<ToyValue>) -> Result<ToyValue, ToyError> {
    self
      .log
      .borrow_mut()
      .push(Op::Call(*object, key.to_string(), args.clone()));
    let method = self.objects.borrow()[object.0]
      .methods
      .iter()
      .find(|(k, _)| k == key)
      .map(|(_, f)| Rc::clone(f));
    match method {
      // The borrow is released before the native runs; it may allocate or define properties.
      Some(f) => f(self, *object, args),
      None => Err(ToyError::NotCallable(key.to_string())),
    }
  }

  fn enumerate_keys(&self, value: &ToyValue) -> Result<Vec<String>, ToyError> {
    match value {
      HostValue::Object(o) => Ok(
        self.objects.borrow()[o.0]
          .props
          .iter()
          .map(|(k, _)| k.clone())
          .collect(),
      ),
      _ => Ok(Vec::new()),
    }
  }
}

/// A second host type, for handle-type mismatches.
#[derive(Default)]
pub struct OtherHost;

impl Host for OtherHost {
  type Object = u32;
  type Error = ToyError;

  fn get(&self, _object: &u32, key: &str) -> Result<HostValue<u32>, ToyError> {
    Err(ToyError::Thrown(format!("get {key}")))
  }

  fn set(&self, _object: &u32, key: &str, _value: HostValue<u32>) -> Result<(), ToyError> {
    Err(ToyError::Thrown(format!("set {key}")))
  }

  fn call(&self, _object: &u32, key: &str, _args: Vec<HostValue<u32>>) -> Result<HostValue<u32>, ToyError> {
    Err(ToyError::NotCallable(key.to_string()))
  }

  fn enumerate_keys(&self, _value: &HostValue<u32>) -> Result<Vec<String>, ToyError> {
    Ok(Vec::new())
  }
}
