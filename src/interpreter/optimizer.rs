/// The optimizer driver and the child-mapping helper shared by its passes.
pub mod core;

/// Comment removal, identity eliminations and constant folding.
///
/// Runs bottom-up in a single pass; a second pass over its output changes
/// nothing.
pub mod fold;

/// Removal of declarations, assignments and functions nobody uses.
pub mod dead_code;
