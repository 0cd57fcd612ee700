//! Environments: name → binding mappings with lexical chaining
//!
//! A binding is either an already-computed value or a lazy argument
//! thunk. Which one a name holds is an explicit tagged variant — callers
//! pattern-match rather than probe. Forcing a thunk replaces that one
//! binding with its value; nothing else in the chain is touched. From the
//! engine's perspective environments are read-only during rewriting:
//! marker resolution only performs lookups.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::Result;
use crate::eval::{EvalError, Evaluator};
use crate::thunk::ArgThunk;
use crate::value::Value;

/// Shared handle to an environment
pub type EnvRef = Rc<RefCell<Environment>>;

/// What a name is bound to
#[derive(Debug, Clone)]
pub enum Binding {
    /// A lazy argument: unevaluated code plus its defining environment
    Thunk(ArgThunk),
    /// A computed value (defined directly, or a thunk after forcing)
    Value(Value),
}

/// A name → binding mapping with an optional lexical parent
///
/// Bindings keep insertion order, which is what makes ordered whole-frame
/// capture (`capture_caller_list`) well-defined.
#[derive(Debug)]
pub struct Environment {
    bindings: Vec<(String, Binding)>,
    parent: Option<EnvRef>,
}

impl Environment {
    /// Create a new root environment
    pub fn root() -> EnvRef {
        Rc::new(RefCell::new(Environment {
            bindings: Vec::new(),
            parent: None,
        }))
    }

    /// Create a child environment chained to `parent`
    pub fn child(parent: &EnvRef) -> EnvRef {
        Rc::new(RefCell::new(Environment {
            bindings: Vec::new(),
            parent: Some(parent.clone()),
        }))
    }

    /// Define or replace a value binding in this environment
    pub fn define_value(&mut self, name: impl Into<String>, value: Value) {
        self.set_local(name.into(), Binding::Value(value));
    }

    /// Define or replace a thunk binding in this environment
    pub fn define_thunk(&mut self, name: impl Into<String>, thunk: ArgThunk) {
        self.set_local(name.into(), Binding::Thunk(thunk));
    }

    /// Capture a lazy argument binding at a call boundary
    ///
    /// `source` is the literal syntax written at the call site, parsed in
    /// quoting mode against the caller's environment; `None` records an
    /// argument position the call left unsupplied.
    pub fn define_captured_arg(
        &mut self,
        name: impl Into<String>,
        source: Option<&str>,
        caller: &EnvRef,
    ) -> Result<()> {
        let thunk = match source {
            Some(src) => ArgThunk::capture(src, caller)?,
            None => ArgThunk::missing(caller),
        };
        self.define_thunk(name, thunk);
        Ok(())
    }

    fn set_local(&mut self, name: String, binding: Binding) {
        if let Some(slot) = self.bindings.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = binding;
        } else {
            self.bindings.push((name, binding));
        }
    }

    /// Look up a binding in this environment only
    pub fn lookup_local(&self, name: &str) -> Option<Binding> {
        self.bindings
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, b)| b.clone())
    }

    /// Look up a binding, walking the lexical chain
    pub fn lookup(&self, name: &str) -> Option<Binding> {
        if let Some(binding) = self.lookup_local(name) {
            return Some(binding);
        }
        self.parent
            .as_ref()
            .and_then(|parent| parent.borrow().lookup(name))
    }

    /// This environment's own bindings, in insertion order
    pub fn local_bindings(&self) -> Vec<(String, Binding)> {
        self.bindings.clone()
    }

    /// Force the binding for `name`: evaluate a thunk and replace it with
    /// its value, or return an existing value as-is
    ///
    /// The replacement happens in the environment that owns the binding,
    /// wherever in the chain that is.
    pub fn force(
        env: &EnvRef,
        name: &str,
        eval: &mut dyn Evaluator,
    ) -> std::result::Result<Value, EvalError> {
        let owner = Self::find_owner(env, name).ok_or_else(|| EvalError::UnboundSymbol {
            name: name.to_string(),
        })?;

        let binding = owner
            .borrow()
            .lookup_local(name)
            .expect("owner has the binding");

        match binding {
            Binding::Value(value) => Ok(value),
            Binding::Thunk(thunk) => {
                if thunk.is_missing() {
                    return Err(EvalError::MissingArgument);
                }
                // Borrows are released here; the thunk body may refer
                // back into this chain
                let value = eval.evaluate(&thunk.expression(), &thunk.environment())?;
                owner
                    .borrow_mut()
                    .set_local(name.to_string(), Binding::Value(value.clone()));
                Ok(value)
            }
        }
    }

    /// Find the environment in the chain that holds a binding for `name`
    fn find_owner(env: &EnvRef, name: &str) -> Option<EnvRef> {
        let mut current = env.clone();
        loop {
            if current.borrow().lookup_local(name).is_some() {
                return Some(current);
            }
            let parent = current.borrow().parent.clone();
            match parent {
                Some(p) => current = p,
                None => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::Interpreter;

    #[test]
    fn test_lookup_walks_the_chain() {
        let root = Environment::root();
        root.borrow_mut().define_value("x", Value::Int(1));
        let child = Environment::child(&root);

        assert!(matches!(
            child.borrow().lookup("x"),
            Some(Binding::Value(Value::Int(1)))
        ));
        assert!(child.borrow().lookup_local("x").is_none());
    }

    #[test]
    fn test_shadowing() {
        let root = Environment::root();
        root.borrow_mut().define_value("x", Value::Int(1));
        let child = Environment::child(&root);
        child.borrow_mut().define_value("x", Value::Int(2));

        assert!(matches!(
            child.borrow().lookup("x"),
            Some(Binding::Value(Value::Int(2)))
        ));
        assert!(matches!(
            root.borrow().lookup("x"),
            Some(Binding::Value(Value::Int(1)))
        ));
    }

    #[test]
    fn test_force_replaces_thunk_with_value() {
        let caller = Environment::root();
        caller.borrow_mut().define_value("a", Value::Int(20));

        let frame = Environment::child(&caller);
        frame
            .borrow_mut()
            .define_captured_arg("x", Some("a + 1"), &caller)
            .unwrap();

        let mut interp = Interpreter::new();
        let value = Environment::force(&frame, "x", &mut interp).unwrap();
        assert_eq!(value, Value::Int(21));

        // The binding is now a value, no longer a thunk
        assert!(matches!(
            frame.borrow().lookup("x"),
            Some(Binding::Value(Value::Int(21)))
        ));
    }

    #[test]
    fn test_forcing_a_missing_argument_is_an_error() {
        let caller = Environment::root();
        let frame = Environment::child(&caller);
        frame
            .borrow_mut()
            .define_captured_arg("x", None, &caller)
            .unwrap();

        let mut interp = Interpreter::new();
        assert!(matches!(
            Environment::force(&frame, "x", &mut interp),
            Err(crate::eval::EvalError::MissingArgument)
        ));
    }

    #[test]
    fn test_binding_order_is_preserved() {
        let env = Environment::root();
        env.borrow_mut().define_value("b", Value::Int(2));
        env.borrow_mut().define_value("a", Value::Int(1));
        env.borrow_mut().define_value("c", Value::Int(3));

        let names: Vec<String> = env
            .borrow()
            .local_bindings()
            .into_iter()
            .map(|(n, _)| n)
            .collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }
}
