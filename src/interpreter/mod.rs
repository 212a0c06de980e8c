pub mod builtins;
pub mod environment;
pub mod errors;
pub mod function;
#[allow(clippy::module_inception)]
pub mod interpreter;
pub mod object;

pub use environment::Environment;
pub use errors::RuntimeError;
pub use interpreter::Interpreter;
pub use object::Object;
