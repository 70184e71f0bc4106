//! # Table
//!
//! A module which wraps [`std::collections::HashMap`].
//!
//! Used for the VM's global-variable map: interned name handles to values.

use std::collections::HashMap;
use std::rc::Rc;

use crate::{utils::Init, value::Value};

#[derive(Debug, Clone, Default)]
pub struct Table(HashMap<Rc<str>, Value>);

impl Table {
  pub fn get(&self, key: &str) -> Option<&Value> {
    self.0.get(key)
  }

  pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
    self.0.get_mut(key)
  }

  /// Insert `key => value`, returning the previous value if `key` was
  /// already defined.
  pub fn set(&mut self, key: Rc<str>, value: Value) -> Option<Value> {
    self.0.insert(key, value)
  }

  pub fn contains(&self, key: &str) -> bool {
    self.0.contains_key(key)
  }

  pub fn remove(&mut self, key: &str) -> Option<Value> {
    self.0.remove(key)
  }

  pub fn free(&mut self) {
    self.0.clear()
  }
}

impl Init for Table {}
