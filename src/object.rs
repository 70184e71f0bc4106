//! # Object
//!
//! This module mainly defines the `Obj` type, the heap-allocated payload a
//! `Value::Obj` points at. There is only one kind in scope: interned strings.

use std::fmt::{self, Display};
use std::rc::Rc;

/// ## Obj
///
/// Reference-counted heap data referenced from a `Value`. Sharing is via
/// `Rc`, so cloning an `Obj` is a refcount bump, not a deep copy.
#[derive(Debug, Clone)]
pub enum Obj {
  String(Rc<str>),
}

impl Obj {
  pub fn as_str(&self) -> &str {
    match self {
      Obj::String(s) => s,
    }
  }
}

impl PartialEq for Obj {
  fn eq(&self, other: &Self) -> bool {
    match (self, other) {
      (Obj::String(a), Obj::String(b)) => Rc::ptr_eq(a, b) || a == b,
    }
  }
}

impl Display for Obj {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Obj::String(s) => write!(f, "{}", s),
    }
  }
}
