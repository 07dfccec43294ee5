use std::collections::HashMap;

use tracing::trace;

use crate::{
    ast::Type,
    error::{DeclarationError, RuntimeError},
    interpreter::value::core::Value,
};

/// Names that can never be declared, compared case-insensitively.
pub const RESERVED: &[&str] = &["if",
                                 "while",
                                 "for",
                                 "function",
                                 "print",
                                 "static_cast",
                                 "true",
                                 "false",
                                 "int",
                                 "float",
                                 "string",
                                 "bool"];

/// Whether `name` collides with a keyword or a type name.
///
/// # Example
/// ```
/// use slate::interpreter::scope::is_reserved;
///
/// assert!(is_reserved("while"));
/// assert!(is_reserved("Int"));
/// assert!(!is_reserved("whiles"));
/// ```
#[must_use]
pub fn is_reserved(name: &str) -> bool {
    RESERVED.iter().any(|reserved| reserved.eq_ignore_ascii_case(name))
}

/// A declared name: its immutable type and its current value.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    /// Declared type; every later assignment must match it.
    pub ty:    Type,
    /// Absent until the variable is first given a value.
    pub value: Option<Value>,
}

/// One lexical nesting level.
#[derive(Debug, Default)]
pub struct Scope {
    names: HashMap<String, Variable>,
}

impl Scope {
    fn bind(&mut self, name: &str, variable: Variable) -> Result<(), DeclarationError> {
        if is_reserved(name) {
            return Err(DeclarationError::KeywordOrTypeName { name: name.to_string() });
        }
        if self.names.contains_key(name) {
            return Err(DeclarationError::AlreadyExists { name: name.to_string() });
        }
        self.names.insert(name.to_string(), variable);
        Ok(())
    }

    /// Replaces the value of `name` if it is bound here.
    ///
    /// Returns `Ok(false)` when this scope does not bind `name`.
    fn assign(&mut self, name: &str, value: &Value) -> Result<bool, RuntimeError> {
        let Some(variable) = self.names.get_mut(name) else {
            return Ok(false);
        };
        if variable.ty != value.type_of() {
            return Err(RuntimeError::mismatch(format!("cannot assign {} '{value}' to '{name}' \
                                                       of type {}",
                                                      value.type_of(),
                                                      variable.ty)));
        }
        variable.value = Some(value.clone());
        Ok(true)
    }

    /// Looks up `name` in this scope only.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.names.get(name)
    }
}

/// Nested symbol tables from the global scope (index 0) to the current one.
///
/// Reads and writes resolve differently. [`ScopeStack::get`] walks the whole
/// chain from the innermost scope outwards, while [`ScopeStack::assign`] only
/// looks at the top scope and then the global scope. A block nested in a
/// function can therefore read, but not overwrite, a variable of the function
/// body.
///
/// # Example
/// ```
/// use slate::interpreter::{scope::ScopeStack, value::core::Value};
///
/// let mut scopes = ScopeStack::new();
/// scopes.add_scope();
/// scopes.define("x", Value::Integer(1)).unwrap();
/// scopes.add_scope();
///
/// assert_eq!(scopes.get("x").unwrap(), Some(&Value::Integer(1)));
/// assert!(scopes.assign("x", Value::Integer(2)).is_err());
/// ```
#[derive(Debug)]
pub struct ScopeStack {
    scopes: Vec<Scope>,
}

impl Default for ScopeStack {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeStack {
    /// Creates a stack holding only the global scope.
    #[must_use]
    pub fn new() -> Self {
        Self { scopes: vec![Scope::default()] }
    }

    /// Current number of scopes, at least one.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Pushes a fresh scope.
    pub fn add_scope(&mut self) {
        self.scopes.push(Scope::default());
        trace!(depth = self.scopes.len(), "pushed scope");
    }

    /// Pops the top scope. The global scope is never removed.
    pub fn remove_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
            trace!(depth = self.scopes.len(), "popped scope");
        }
    }

    fn top(&mut self) -> &mut Scope {
        let top = self.scopes.len() - 1;
        &mut self.scopes[top]
    }

    /// Declares `name` with type `ty` and no value in the top scope.
    ///
    /// # Errors
    /// - `KeywordOrTypeName` if `name` is reserved.
    /// - `AlreadyExists` if the top scope already binds `name`; the existing
    ///   binding is left untouched.
    pub fn declare(&mut self, name: &str, ty: Type) -> Result<(), DeclarationError> {
        self.top().bind(name, Variable { ty, value: None })
    }

    /// Declares `name` in the top scope with the type of `value` and binds
    /// the value.
    ///
    /// # Errors
    /// Same as [`ScopeStack::declare`].
    pub fn define(&mut self, name: &str, value: Value) -> Result<(), DeclarationError> {
        self.top().bind(name, Variable { ty:    value.type_of(),
                                         value: Some(value), })
    }

    /// Overwrites the value of `name`, searching the top scope and then the
    /// global scope. Intermediate scopes are skipped.
    ///
    /// # Errors
    /// - `TypeMismatch` if the declared type differs from the value's type.
    /// - `UndeclaredName` if neither scope binds `name`.
    pub fn assign(&mut self, name: &str, value: Value) -> Result<(), RuntimeError> {
        if self.top().assign(name, &value)? || self.scopes[0].assign(name, &value)? {
            return Ok(());
        }
        Err(RuntimeError::UndeclaredName { name: name.to_string() })
    }

    /// Reads `name` from the innermost scope that binds it.
    ///
    /// A declared variable without a value yields `Ok(None)`.
    ///
    /// # Errors
    /// `UndeclaredName` if no scope binds `name`.
    pub fn get(&self, name: &str) -> Result<Option<&Value>, RuntimeError> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(name))
            .map(|variable| variable.value.as_ref())
            .ok_or_else(|| RuntimeError::UndeclaredName { name: name.to_string() })
    }

    /// Checks that `name` may be used for a new function.
    ///
    /// # Errors
    /// - `KeywordOrTypeName` if `name` is reserved.
    /// - `Redefinition` if any scope binds `name`.
    pub fn is_available(&self, name: &str) -> Result<(), RuntimeError> {
        if is_reserved(name) {
            return Err(DeclarationError::KeywordOrTypeName { name: name.to_string() }.into());
        }
        if self.scopes.iter().any(|scope| scope.get(name).is_some()) {
            return Err(RuntimeError::Redefinition { name: name.to_string() });
        }
        Ok(())
    }
}
