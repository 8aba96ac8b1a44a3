//! Function declarations.

use rustc_hash::FxHashSet;

use super::Block;
use crate::{collect_local_names, Span};

/// A function literal or named declaration.
///
/// `locals` is the set of identifiers the body assigns with plain `=`,
/// computed before evaluation. The evaluator uses it to keep such names
/// local to the function even before their first assignment runs.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FuncDecl {
    pub name: Option<String>,
    pub params: Vec<String>,
    pub body: Block,
    pub locals: FxHashSet<String>,
    pub span: Span,
}

impl FuncDecl {
    /// Build a declaration, deriving `locals` from the body.
    pub fn new(name: Option<String>, params: Vec<String>, body: Block, span: Span) -> Self {
        let locals = collect_local_names(&body);
        FuncDecl {
            name,
            params,
            body,
            locals,
            span,
        }
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}
