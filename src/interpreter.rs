/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator walks the tree, runs statements for their effects, computes
/// expression values and checks types at runtime. Failures never abort a
/// program: they are recorded as diagnostics and the failing node yields no
/// value.
///
/// # Responsibilities
/// - Evaluates every node kind, including control flow and user functions.
/// - Owns the scope stack and the function table.
/// - Records runtime errors with the line they happened on.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a stream of tokens, each
/// paired with the line it starts on. This is the first stage of
/// interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with source lines.
/// - Handles numeric and string literals, identifiers, keywords and comments.
/// - Reports illegal characters and keeps lexing after them.
pub mod lexer;
/// The optimizer module rewrites the tree before it is evaluated.
///
/// # Responsibilities
/// - Removes comments and folds constant arithmetic.
/// - Applies algebraic identities between literals and variable reads.
/// - Removes bindings and functions that are never used.
pub mod optimizer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token stream produced by the lexer and constructs
/// the tree of statements and expressions, recovering from syntax errors so
/// that one mistake does not hide the rest of the program.
///
/// # Responsibilities
/// - Converts tokens into AST nodes with fresh ids.
/// - Encodes precedence and associativity of the operators.
/// - Reports syntax errors with location info.
pub mod parser;
/// Drawing of syntax trees into an abstract graph sink.
pub mod render;
/// Lexical scopes and the rules for declaring, assigning and reading names.
pub mod scope;
/// The value module defines the runtime data types for evaluation.
///
/// # Responsibilities
/// - Defines the `Value` enum for the four primitive types.
/// - Implements arithmetic, comparison and casts between the types.
pub mod value;
