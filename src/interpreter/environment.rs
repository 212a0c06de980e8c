use super::object::Object;

use log::debug;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Shared handle to a scope. Clones point at the same bindings, so a write
/// through one handle is seen by every closure holding another.
#[derive(Clone)]
pub struct Environment {
    env_ptr: Rc<RefCell<EnvironmentData>>,
}

struct EnvironmentData {
    values: HashMap<String, Object>,
    enclosing: Option<Environment>,
}

impl Environment {
    pub fn new() -> Self {
        let env_data = EnvironmentData {
            values: HashMap::new(),
            enclosing: None,
        };
        Environment {
            env_ptr: Rc::new(RefCell::new(env_data)),
        }
    }

    pub fn with_enclosing(env: &Environment) -> Self {
        debug!("entering scope nested in {:p}", Rc::as_ptr(&env.env_ptr));
        let env_data = EnvironmentData {
            values: HashMap::new(),
            enclosing: Some(env.clone()),
        };
        Environment {
            env_ptr: Rc::new(RefCell::new(env_data)),
        }
    }

    /// Binds `name` in this scope, replacing any previous binding here.
    pub fn define(&self, name: String, value: Object) {
        self.env_ptr.borrow_mut().values.insert(name, value);
    }

    /// Looks `name` up in this scope and then in each enclosing one.
    pub fn get(&self, name: &str) -> Option<Object> {
        let env_data = self.env_ptr.borrow();

        match env_data.values.get(name) {
            Some(obj) => Some(obj.clone()),
            None => env_data.enclosing.as_ref()?.get(name),
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
