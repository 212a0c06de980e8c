use super::builtins::Builtin;
use super::errors::RuntimeError;
use super::function::Function;
use crate::frontend::grammar::{InfixOperator, PrefixOperator};

use std::collections::HashMap;
use std::fmt;

#[derive(Debug, PartialEq, Clone)]
pub enum Object {
    Integer(i64),
    Boolean(bool),
    Str(String),
    Null,
    Array(Vec<Object>),
    Hash(HashObject),
    Function(Function),
    Builtin(&'static Builtin),
    Error(RuntimeError),
}

pub const TRUE: Object = Object::Boolean(true);
pub const FALSE: Object = Object::Boolean(false);
pub const NULL: Object = Object::Null;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ObjectType {
    Integer,
    Boolean,
    Str,
    Null,
    Array,
    Hash,
    Function,
    Builtin,
    Error,
}

/// Key derived from a hashable value. The variant keeps values of different
/// types apart, so `4` and `"4"` never collide.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub enum HashKey {
    Integer(i64),
    Str(String),
    Boolean(bool),
}

/// Key/value pairs in insertion order with lookup by hash key.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct HashObject {
    pairs: Vec<(Object, Object)>,
    index: HashMap<HashKey, usize>,
}

impl HashObject {
    pub fn new() -> Self {
        Self::default()
    }

    /// A repeated key keeps its first position and takes the new value.
    pub fn insert(&mut self, key: HashKey, key_object: Object, value: Object) {
        match self.index.get(&key) {
            Some(&slot) => self.pairs[slot].1 = value,
            None => {
                self.index.insert(key, self.pairs.len());
                self.pairs.push((key_object, value));
            }
        }
    }

    pub fn get(&self, key: &HashKey) -> Option<&Object> {
        self.index.get(key).map(|&slot| &self.pairs[slot].1)
    }

    pub fn pairs(&self) -> impl Iterator<Item = &(Object, Object)> {
        self.pairs.iter()
    }
}

impl Object {
    pub fn from_bool(value: bool) -> Object {
        if value {
            TRUE
        } else {
            FALSE
        }
    }

    /// Only `false` and `null` are falsy. Zero, empty strings and empty
    /// collections are all truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Object::Null | Object::Boolean(false))
    }

    pub fn type_tag(&self) -> ObjectType {
        match self {
            Object::Integer(_) => ObjectType::Integer,
            Object::Boolean(_) => ObjectType::Boolean,
            Object::Str(_) => ObjectType::Str,
            Object::Null => ObjectType::Null,
            Object::Array(_) => ObjectType::Array,
            Object::Hash(_) => ObjectType::Hash,
            Object::Function(_) => ObjectType::Function,
            Object::Builtin(_) => ObjectType::Builtin,
            Object::Error(_) => ObjectType::Error,
        }
    }

    /// Key for hashable values, `None` for every other type.
    pub fn hash_key(&self) -> Option<HashKey> {
        match self {
            Object::Integer(n) => Some(HashKey::Integer(*n)),
            Object::Str(s) => Some(HashKey::Str(s.clone())),
            Object::Boolean(b) => Some(HashKey::Boolean(*b)),
            _ => None,
        }
    }

    pub fn apply_infix_op(op: InfixOperator, lhs: Object, rhs: Object) -> Result<Object, RuntimeError> {
        match (lhs, rhs) {
            (Object::Integer(a), Object::Integer(b)) => integer_infix_op(op, a, b),
            (Object::Str(a), Object::Str(b)) => match op {
                InfixOperator::Add => Ok(Object::Str(a + &b)),
                _ => Err(RuntimeError::UnknownInfixOperator(
                    ObjectType::Str,
                    op,
                    ObjectType::Str,
                )),
            },
            (lhs, rhs) if lhs.type_tag() != rhs.type_tag() => Err(RuntimeError::TypeMismatch(
                lhs.type_tag(),
                op,
                rhs.type_tag(),
            )),
            (lhs, rhs) => Err(RuntimeError::UnknownInfixOperator(
                lhs.type_tag(),
                op,
                rhs.type_tag(),
            )),
        }
    }

    pub fn apply_prefix_op(op: PrefixOperator, value: Object) -> Result<Object, RuntimeError> {
        match op {
            PrefixOperator::LogicalNot => Ok(Object::from_bool(!value.is_truthy())),
            PrefixOperator::Negate => match value {
                Object::Integer(n) => Ok(Object::Integer(n.wrapping_neg())),
                _ => Err(RuntimeError::UnknownPrefixOperator(op, value.type_tag())),
            },
        }
    }
}

fn integer_infix_op(op: InfixOperator, a: i64, b: i64) -> Result<Object, RuntimeError> {
    let result = match op {
        InfixOperator::Add => Object::Integer(a.wrapping_add(b)),
        InfixOperator::Subtract => Object::Integer(a.wrapping_sub(b)),
        InfixOperator::Multiply => Object::Integer(a.wrapping_mul(b)),
        InfixOperator::Divide => {
            if b == 0 {
                return Err(RuntimeError::DivisionByZero);
            }
            Object::Integer(a.wrapping_div(b))
        }
        InfixOperator::LessThan => Object::from_bool(a < b),
        InfixOperator::GreaterThan => Object::from_bool(a > b),
        InfixOperator::EqualTo => Object::from_bool(a == b),
        InfixOperator::NotEqualTo => Object::from_bool(a != b),
    };

    Ok(result)
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let tag = match self {
            ObjectType::Integer => "INTEGER",
            ObjectType::Boolean => "BOOLEAN",
            ObjectType::Str => "STRING",
            ObjectType::Null => "NULL",
            ObjectType::Array => "ARRAY",
            ObjectType::Hash => "HASH",
            ObjectType::Function => "FUNCTION",
            ObjectType::Builtin => "BUILTIN",
            ObjectType::Error => "ERROR",
        };
        f.write_str(tag)
    }
}

/// Human readable inspection of a value.
impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Object::Integer(n) => write!(f, "{}", n),
            Object::Boolean(b) => write!(f, "{}", b),
            Object::Str(s) => f.write_str(s),
            Object::Null => f.write_str("null"),
            Object::Array(elements) => {
                let elements: Vec<_> = elements.iter().map(|e| e.to_string()).collect();
                write!(f, "[{}]", elements.join(", "))
            }
            Object::Hash(hash) => {
                let pairs: Vec<_> = hash.pairs().map(|(k, v)| format!("{}: {}", k, v)).collect();
                write!(f, "{{{}}}", pairs.join(", "))
            }
            Object::Function(func) => write!(f, "{}", func),
            Object::Builtin(_) => f.write_str("builtin function"),
            Object::Error(err) => write!(f, "Error: {}", err),
        }
    }
}
