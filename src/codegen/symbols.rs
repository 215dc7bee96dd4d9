// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

use std::collections::HashMap;

use crate::ast::Type;
use crate::diag::ErrType;
use super::enums::Value;

/// What to do when a constant is declared a second time.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Redeclare {
    /// The new declaration replaces the old one.
    Overwrite,
    /// Declaring a constant twice is an error.
    Reject,
}

impl Default for Redeclare {
    fn default() -> Self { Redeclare::Overwrite }
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Entry {
    pub ty: Type,
    pub value: Value,
}

/// The constants declared so far in one compilation.
#[derive(Debug, Default)]
pub struct SymbolTable {
    entries: HashMap<String, Entry>,
    policy: Redeclare,
}

impl SymbolTable {
    pub fn new(policy: Redeclare) -> Self {
        SymbolTable { entries: HashMap::new(), policy }
    }

    pub fn declare(&mut self, name: &str, ty: Type, value: Value) -> Result<(), ErrType> {
        check_type(name, value, ty)?;
        if self.policy == Redeclare::Reject && self.entries.contains_key(name) {
            return Err(ErrType::Redeclared(name.into()));
        }
        self.entries.insert(name.into(), Entry { ty, value });
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Result<Value, ErrType> {
        self.entries.get(name)
            .map(|entry| entry.value)
            .ok_or_else(|| ErrType::UndefinedIdentifier(name.into()))
    }

    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn check_type(name: &str, value: Value, declared: Type) -> Result<(), ErrType> {
    if value.ty() == declared {
        Ok(())
    } else {
        Err(ErrType::ConstType { name: name.into(), declared, actual: value.ty() })
    }
}
