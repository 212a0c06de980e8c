use super::errors::RuntimeError;
use super::object::{Object, ObjectType, NULL};

use std::fmt;
use std::io::Write;

type BuiltinResult = Result<Object, RuntimeError>;
type FnType = fn(Vec<Object>, &mut dyn Write) -> BuiltinResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    AtLeast(usize),
    Any,
}

impl Arity {
    fn accepts(&self, count: usize) -> bool {
        match *self {
            Arity::Exact(n) => count == n,
            Arity::AtLeast(n) => count >= n,
            Arity::Any => true,
        }
    }

    fn wanted(&self) -> usize {
        match *self {
            Arity::Exact(n) | Arity::AtLeast(n) => n,
            Arity::Any => 0,
        }
    }
}

/// Host function callable from scripts.
pub struct Builtin {
    pub name: &'static str,
    pub arity: Arity,
    func: FnType,
}

static BUILTINS: [Builtin; 6] = [
    Builtin {
        name: "len",
        arity: Arity::Exact(1),
        func: len,
    },
    Builtin {
        name: "first",
        arity: Arity::Exact(1),
        func: first,
    },
    Builtin {
        name: "last",
        arity: Arity::Exact(1),
        func: last,
    },
    Builtin {
        name: "tail",
        arity: Arity::Exact(1),
        func: tail,
    },
    Builtin {
        name: "push",
        arity: Arity::AtLeast(2),
        func: push,
    },
    Builtin {
        name: "puts",
        arity: Arity::Any,
        func: puts,
    },
];

/// Finds a builtin by name. Only consulted after the scope chain misses.
pub fn lookup(name: &str) -> Option<&'static Builtin> {
    BUILTINS.iter().find(|builtin| builtin.name == name)
}

impl Builtin {
    pub fn execute(&self, args: Vec<Object>, output: &mut dyn Write) -> BuiltinResult {
        if self.arity.accepts(args.len()) {
            (self.func)(args, output)
        } else {
            Err(RuntimeError::WrongArgumentCount(
                args.len(),
                self.arity.wanted(),
            ))
        }
    }
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "<builtin {}>", self.name)
    }
}

impl PartialEq<Builtin> for Builtin {
    // Entries live in one static table, so identity is address equality.
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}

/// Takes the array out of the first argument.
fn array_arg(name: &'static str, args: Vec<Object>) -> Result<Vec<Object>, RuntimeError> {
    match args.into_iter().next() {
        Some(Object::Array(elements)) => Ok(elements),
        Some(other) => Err(RuntimeError::ArgumentMustBeArray(name, other.type_tag())),
        None => Err(RuntimeError::ArgumentMustBeArray(name, ObjectType::Null)),
    }
}

fn len(args: Vec<Object>, _output: &mut dyn Write) -> BuiltinResult {
    match &args[0] {
        Object::Str(s) => Ok(Object::Integer(s.chars().count() as i64)),
        Object::Array(elements) => Ok(Object::Integer(elements.len() as i64)),
        other => Err(RuntimeError::LenNotSupported(other.type_tag())),
    }
}

fn first(args: Vec<Object>, _output: &mut dyn Write) -> BuiltinResult {
    let elements = array_arg("first", args)?;
    Ok(elements.into_iter().next().unwrap_or(NULL))
}

fn last(args: Vec<Object>, _output: &mut dyn Write) -> BuiltinResult {
    let elements = array_arg("last", args)?;
    Ok(elements.into_iter().last().unwrap_or(NULL))
}

fn tail(args: Vec<Object>, _output: &mut dyn Write) -> BuiltinResult {
    let elements = array_arg("tail", args)?;
    if elements.is_empty() {
        return Ok(NULL);
    }

    Ok(Object::Array(elements.into_iter().skip(1).collect()))
}

fn push(args: Vec<Object>, _output: &mut dyn Write) -> BuiltinResult {
    let mut args = args.into_iter();
    let mut elements = array_arg("push", args.by_ref().take(1).collect())?;
    elements.extend(args);

    Ok(Object::Array(elements))
}

fn puts(args: Vec<Object>, output: &mut dyn Write) -> BuiltinResult {
    for arg in args.iter() {
        writeln!(output, "{}", arg)?;
    }

    Ok(NULL)
}
