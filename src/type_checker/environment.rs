use std::collections::HashMap;

use crate::{
    ast::types::Type,
    errors::errors::{Error, ErrorImpl},
    Position,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub name: String,
    pub declared_type: Type,
    pub initialized: bool,
}

/// Symbol table for one compilation unit.
///
/// Each parse and each type check gets its own table; nothing is shared
/// between files or stages.
#[derive(Debug, Default)]
pub struct Environment {
    variable_lookup: HashMap<String, Symbol>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            variable_lookup: HashMap::new(),
        }
    }

    /// Registers a variable. A second declaration of the same name replaces
    /// the first.
    pub fn declare_variable(&mut self, name: String, declared_type: Type, initialized: bool) {
        self.variable_lookup.insert(
            name.clone(),
            Symbol {
                name,
                declared_type,
                initialized,
            },
        );
    }

    pub fn get_variable(&self, name: &str) -> Option<&Symbol> {
        self.variable_lookup.get(name)
    }

    /// Looks up a variable for reading: it must be declared and hold a value.
    pub fn read_variable(&self, name: &str, position: Position) -> Result<&Symbol, Error> {
        match self.variable_lookup.get(name) {
            None => Err(Error::new(
                ErrorImpl::UndeclaredVariable {
                    variable: name.to_string(),
                },
                position,
            )),
            Some(symbol) if !symbol.initialized => Err(Error::new(
                ErrorImpl::UninitializedVariable {
                    variable: name.to_string(),
                },
                position,
            )),
            Some(symbol) => Ok(symbol),
        }
    }

    /// Marks a declared variable as holding a value.
    pub fn initialize_variable(&mut self, name: &str, position: Position) -> Result<Type, Error> {
        match self.variable_lookup.get_mut(name) {
            Some(symbol) => {
                symbol.initialized = true;
                Ok(symbol.declared_type)
            }
            None => Err(Error::new(
                ErrorImpl::UndeclaredVariable {
                    variable: name.to_string(),
                },
                position,
            )),
        }
    }

    pub fn len(&self) -> usize {
        self.variable_lookup.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variable_lookup.is_empty()
    }
}
