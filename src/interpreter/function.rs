use super::environment::Environment;
use super::errors::{RuntimeResult, Unwind};
use super::interpreter::Interpreter;
use super::object::Object;
use crate::frontend::grammar::{BlockStatement, Identifier};

use std::fmt;
use std::io::Write;
use std::rc::Rc;

pub struct FunctionData {
    params: Vec<Identifier>,
    body: BlockStatement,
    closure: Environment,
}

/// A function value together with the scope it was defined in.
#[derive(Clone)]
pub struct Function(Rc<FunctionData>);

impl Function {
    pub fn new(params: Vec<Identifier>, body: BlockStatement, closure: Environment) -> Self {
        let data = FunctionData {
            params,
            body,
            closure,
        };
        Function(Rc::new(data))
    }

    pub fn params(&self) -> &[Identifier] {
        &self.0.params
    }

    /// Runs the body in a fresh scope nested in the closure. Parameters bind
    /// positionally; parameters without an argument stay unbound and extra
    /// arguments are ignored.
    pub fn execute<W: Write>(
        &self,
        args: Vec<Object>,
        interpreter: &mut Interpreter<W>,
    ) -> RuntimeResult<Object> {
        // Create a new environment pointing to surrounding closure
        let env = Environment::with_enclosing(&self.0.closure);

        for (param, arg) in self.0.params.iter().zip(args.into_iter()) {
            env.define(param.name.clone(), arg);
        }

        match interpreter.eval_block(&self.0.body, &env) {
            Ok(value) => Ok(value),
            Err(Unwind::Return(value)) => Ok(value),
            Err(e) => Err(e),
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let params: Vec<_> = self.0.params.iter().map(|p| p.name.as_str()).collect();
        write!(f, "fn({}) {}", params.join(", "), self.0.body)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "<function {}>", self)
    }
}

impl PartialEq<Function> for Function {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Function {}
