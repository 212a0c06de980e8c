use super::object::{Object, ObjectType};
use crate::frontend::grammar::{InfixOperator, PrefixOperator};

use std::fmt;

/// Runtime faults. They end the evaluation they occur in.
#[derive(Debug, PartialEq, Clone)]
pub enum RuntimeError {
    TypeMismatch(ObjectType, InfixOperator, ObjectType),
    UnknownInfixOperator(ObjectType, InfixOperator, ObjectType),
    UnknownPrefixOperator(PrefixOperator, ObjectType),
    IdentifierNotFound(String),
    NotAFunction(ObjectType),
    UnusableAsHashKey(ObjectType),
    IndexNotSupported(ObjectType),
    /// (got, want)
    WrongArgumentCount(usize, usize),
    /// (builtin name, actual type)
    ArgumentMustBeArray(&'static str, ObjectType),
    LenNotSupported(ObjectType),
    DivisionByZero,
    Output(String),
}

/// Reasons evaluation stops early: a `return` on its way to the enclosing
/// call, or a fault on its way to the top.
#[derive(Debug, PartialEq, Clone)]
pub enum Unwind {
    Return(Object),
    Error(RuntimeError),
}

pub type RuntimeResult<T> = Result<T, Unwind>;

impl From<RuntimeError> for Unwind {
    fn from(err: RuntimeError) -> Self {
        Unwind::Error(err)
    }
}

impl From<std::io::Error> for RuntimeError {
    fn from(err: std::io::Error) -> Self {
        RuntimeError::Output(err.to_string())
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RuntimeError::TypeMismatch(lhs, op, rhs) => {
                write!(f, "type mismatch: {} {} {}", lhs, op, rhs)
            }
            RuntimeError::UnknownInfixOperator(lhs, op, rhs) => {
                write!(f, "unknown operator: {} {} {}", lhs, op, rhs)
            }
            RuntimeError::UnknownPrefixOperator(op, value) => {
                write!(f, "unknown operator: {}{}", op, value)
            }
            RuntimeError::IdentifierNotFound(name) => write!(f, "Identifier not found: {}", name),
            RuntimeError::NotAFunction(t) => write!(f, "not a function: {}", t),
            RuntimeError::UnusableAsHashKey(t) => write!(f, "unusable as hash key: {}", t),
            RuntimeError::IndexNotSupported(t) => write!(f, "index operator not supported {}", t),
            RuntimeError::WrongArgumentCount(got, want) => {
                write!(f, "wrong number of arguments. got={}, want={}", got, want)
            }
            RuntimeError::ArgumentMustBeArray(name, t) => {
                write!(f, "argument to `{}` must be ARRAY, got {}", name, t)
            }
            RuntimeError::LenNotSupported(t) => {
                write!(f, "argument to `len` not supported, got {}", t)
            }
            RuntimeError::DivisionByZero => f.write_str("division by zero: INTEGER / INTEGER"),
            RuntimeError::Output(msg) => write!(f, "output error: {}", msg),
        }
    }
}
