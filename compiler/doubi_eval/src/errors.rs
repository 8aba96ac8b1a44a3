//! Error types for evaluation.
//!
//! `EvalErrorKind` carries the structured category; factory functions
//! (`undefined_name()`, `division_by_zero()`, ...) are the construction API.
//! The evaluator annotates errors with the span of the node that raised them
//! and, when an error leaves a user function, with a backtrace of the live
//! call stack.

use std::fmt;

use doubi_ir::{BinaryOp, Span};

use crate::value::Value;

/// Result of evaluation.
pub type EvalResult<T = Value> = Result<T, EvalError>;

/// Typed error category.
///
/// `category()` maps each kind onto the coarse error classes hosts report
/// (`NameError`, `TypeError`, ...).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    // Names and literals
    UndefinedName {
        name: String,
    },
    InvalidLiteral {
        text: String,
        reason: String,
    },

    // Dispatch
    /// The receiver does not understand the message.
    UnsupportedOperation {
        type_name: String,
        message: String,
    },
    UndefinedProperty {
        name: String,
        type_name: String,
    },

    // Type/Operator
    TypeMismatch {
        expected: String,
        got: String,
    },
    BinaryTypeMismatch {
        op: BinaryOp,
        left: String,
        right: String,
    },

    // Arithmetic
    DivisionByZero,
    IntegerOverflow {
        operation: String,
    },

    // Access
    IndexOutOfBounds {
        index: i64,
        len: usize,
    },
    KeyNotFound {
        key: String,
    },
    InvalidAssignTarget {
        target: String,
    },

    // Values and calls
    /// An expression produced no value where one was required.
    ValueExpected {
        context: String,
    },
    ValueCountMismatch {
        expected: usize,
        got: usize,
    },
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
    StackOverflow {
        depth: usize,
    },

    // Control flow
    BranchOutsideLoop {
        keyword: &'static str,
    },

    // Concurrency
    SpawnFailed {
        reason: String,
    },

    Custom {
        message: String,
    },
}

impl EvalErrorKind {
    /// Coarse error class.
    pub const fn category(&self) -> &'static str {
        match self {
            Self::UndefinedName { .. } => "NameError",
            Self::InvalidLiteral { .. } => "LiteralError",
            Self::UnsupportedOperation { .. } | Self::UndefinedProperty { .. } => {
                "UnsupportedOperationError"
            }
            Self::TypeMismatch { .. }
            | Self::BinaryTypeMismatch { .. }
            | Self::InvalidAssignTarget { .. } => "TypeError",
            Self::DivisionByZero => "DivideByZeroError",
            Self::IntegerOverflow { .. } => "OverflowError",
            Self::IndexOutOfBounds { .. } | Self::KeyNotFound { .. } => "LookupError",
            Self::ValueExpected { .. }
            | Self::ValueCountMismatch { .. }
            | Self::ArityMismatch { .. } => "ArgumentError",
            Self::StackOverflow { .. } => "RecursionError",
            Self::BranchOutsideLoop { .. } => "SyntaxError",
            Self::SpawnFailed { .. } | Self::Custom { .. } => "RuntimeError",
        }
    }
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UndefinedName { name } => write!(f, "name `{name}` is not defined"),
            Self::InvalidLiteral { text, reason } => {
                write!(f, "invalid literal {text}: {reason}")
            }

            Self::UnsupportedOperation { type_name, message } => {
                write!(f, "{type_name} does not support `{message}`")
            }
            Self::UndefinedProperty { name, type_name } => {
                write!(f, "{type_name} has no property `{name}`")
            }

            Self::TypeMismatch { expected, got } => {
                write!(f, "type mismatch: expected {expected}, got {got}")
            }
            Self::BinaryTypeMismatch { op, left, right } => {
                write!(
                    f,
                    "operator `{}` cannot be applied to {left} and {right}",
                    op.as_symbol()
                )
            }

            Self::DivisionByZero => write!(f, "division by zero"),
            Self::IntegerOverflow { operation } => {
                write!(f, "integer overflow in {operation}")
            }

            Self::IndexOutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds for length {len}")
            }
            Self::KeyNotFound { key } => write!(f, "key not found: {key}"),
            Self::InvalidAssignTarget { target } => write!(f, "cannot assign to {target}"),

            Self::ValueExpected { context } => write!(f, "{context} produced no value"),
            Self::ValueCountMismatch { expected, got } => {
                write!(f, "expected {expected} values, got {got}")
            }
            Self::ArityMismatch {
                name,
                expected,
                got,
            } => {
                let arg_word = if *expected == 1 {
                    "argument"
                } else {
                    "arguments"
                };
                write!(f, "{name} expects {expected} {arg_word}, got {got}")
            }
            Self::StackOverflow { depth } => {
                write!(f, "maximum call depth exceeded (limit: {depth})")
            }

            Self::BranchOutsideLoop { keyword } => write!(f, "`{keyword}` outside of a loop"),

            Self::SpawnFailed { reason } => write!(f, "failed to spawn: {reason}"),

            Self::Custom { message } => write!(f, "{message}"),
        }
    }
}

/// A single frame in an evaluation backtrace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BacktraceFrame {
    /// Function name, `#<closure>` for anonymous functions.
    pub name: String,
    /// Source location of the call site.
    pub span: Option<Span>,
}

/// Snapshot of the user call stack taken where an error left a function.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalBacktrace {
    frames: Vec<BacktraceFrame>,
}

impl EvalBacktrace {
    pub fn new(frames: Vec<BacktraceFrame>) -> Self {
        Self { frames }
    }

    /// Frames, most recent call first.
    pub fn frames(&self) -> &[BacktraceFrame] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }
}

impl fmt::Display for EvalBacktrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.frames.is_empty() {
            return Ok(());
        }
        writeln!(f, "call backtrace:")?;
        for (i, frame) in self.frames.iter().enumerate() {
            write!(f, "  {i}: {}", frame.name)?;
            if let Some(span) = frame.span {
                write!(f, " at {span}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Evaluation error.
#[derive(Clone, Debug, thiserror::Error)]
#[error("{kind}")]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Source location of the innermost node that raised the error.
    pub span: Option<Span>,
    /// User call stack at the point the error left the innermost function.
    pub backtrace: Option<EvalBacktrace>,
}

impl EvalError {
    /// Create an error with just a message (`Custom` kind).
    pub fn new(message: impl Into<String>) -> Self {
        Self::from_kind(EvalErrorKind::Custom {
            message: message.into(),
        })
    }

    pub fn from_kind(kind: EvalErrorKind) -> Self {
        Self {
            kind,
            span: None,
            backtrace: None,
        }
    }

    /// Attach `span` unless a more precise one is already set.
    #[must_use]
    pub fn or_span(mut self, span: Span) -> Self {
        if self.span.is_none() && !span.is_dummy() {
            self.span = Some(span);
        }
        self
    }

    /// Attach a backtrace unless an inner call already attached one.
    #[must_use]
    pub fn with_backtrace(mut self, backtrace: EvalBacktrace) -> Self {
        if self.backtrace.is_none() {
            self.backtrace = Some(backtrace);
        }
        self
    }

    #[inline]
    pub fn category(&self) -> &'static str {
        self.kind.category()
    }
}

// Names and literals

#[cold]
pub fn undefined_name(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedName {
        name: name.to_string(),
    })
}

#[cold]
pub fn invalid_literal(text: &str, reason: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidLiteral {
        text: text.to_string(),
        reason: reason.into(),
    })
}

// Dispatch

/// The receiver's kind has no handler for `message`.
#[cold]
pub fn unsupported_operation(type_name: &str, message: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnsupportedOperation {
        type_name: type_name.to_string(),
        message: message.to_string(),
    })
}

#[cold]
pub fn undefined_property(name: &str, type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedProperty {
        name: name.to_string(),
        type_name: type_name.to_string(),
    })
}

// Type/Operator

#[cold]
pub fn type_mismatch(expected: &str, got: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        expected: expected.to_string(),
        got: got.to_string(),
    })
}

#[cold]
pub fn binary_type_mismatch(op: BinaryOp, left: &str, right: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::BinaryTypeMismatch {
        op,
        left: left.to_string(),
        right: right.to_string(),
    })
}

// Arithmetic

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

#[cold]
pub fn integer_overflow(operation: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IntegerOverflow {
        operation: operation.to_string(),
    })
}

// Access

#[cold]
pub fn index_out_of_bounds(index: i64, len: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IndexOutOfBounds { index, len })
}

#[cold]
pub fn key_not_found(key: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::KeyNotFound {
        key: key.to_string(),
    })
}

#[cold]
pub fn invalid_assign_target(target: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidAssignTarget {
        target: target.to_string(),
    })
}

// Values and calls

#[cold]
pub fn value_expected(context: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ValueExpected {
        context: context.to_string(),
    })
}

#[cold]
pub fn value_count_mismatch(expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ValueCountMismatch { expected, got })
}

#[cold]
pub fn wrong_arg_count(name: &str, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        name: name.to_string(),
        expected,
        got,
    })
}

#[cold]
pub fn call_depth_exceeded(depth: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::StackOverflow { depth })
}

// Control flow

#[cold]
pub fn branch_outside_loop(keyword: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::BranchOutsideLoop { keyword })
}

// Concurrency

#[cold]
pub fn spawn_failed(reason: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::SpawnFailed {
        reason: reason.into(),
    })
}
