use thiserror::Error;

/// Failures of a declaration in the scope stack.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeclarationError {
    /// The name is already bound in the current scope.
    #[error("Variable '{name}' already exists in this scope.")]
    AlreadyExists {
        /// The name of the variable.
        name: String,
    },
    /// The name is a keyword or a type name.
    #[error("'{name}' is a keyword or type name and cannot be declared.")]
    KeywordOrTypeName {
        /// The rejected name.
        name: String,
    },
    /// The type is not one of `int`, `float`, `string`, `bool`. A `:=` whose
    /// value is absent reports the type `none`.
    #[error("'{type_name}' is not a valid type.")]
    InvalidType {
        /// The rejected type name.
        type_name: String,
    },
}

/// Represents all errors that can occur during evaluation.
///
/// Errors carry no line; the evaluator attaches the line of the node that
/// failed when it records the diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// A declaration was rejected.
    #[error(transparent)]
    Declaration(#[from] DeclarationError),
    /// Operands, guards, or assigned values had incompatible types.
    #[error("Type mismatch: {details}.")]
    TypeMismatch {
        /// Details about the mismatch.
        details: String,
    },
    /// Read of or assignment to a name that is not declared.
    #[error("Undeclared name '{name}'.")]
    UndeclaredName {
        /// The name looked up.
        name: String,
    },
    /// A call passed the wrong number of arguments.
    #[error("Function '{name}' expects {expected} argument(s) but {found} were given.")]
    ArityError {
        /// The called function.
        name:     String,
        /// Declared parameter count.
        expected: usize,
        /// Number of arguments in the call.
        found:    usize,
    },
    /// A function definition reuses a name that is already taken.
    #[error("Name '{name}' is already defined.")]
    Redefinition {
        /// The name of the function.
        name: String,
    },
    /// Called a function that was never registered.
    #[error("Function '{name}' is not defined.")]
    FunctionNotDefined {
        /// The name of the function.
        name: String,
    },
    /// Division by zero, overflow, or a math domain error.
    #[error("Arithmetic error: {details}.")]
    Arithmetic {
        /// What went wrong.
        details: String,
    },
    /// The nesting of user function calls got too deep.
    #[error("Call to '{name}' exceeds the maximum call depth of {limit}.")]
    RecursionLimit {
        /// The function being entered.
        name:  String,
        /// The configured limit.
        limit: usize,
    },
}

impl RuntimeError {
    pub(crate) fn mismatch(details: impl Into<String>) -> Self {
        Self::TypeMismatch { details: details.into() }
    }

    pub(crate) fn arithmetic(details: impl Into<String>) -> Self {
        Self::Arithmetic { details: details.into() }
    }
}
