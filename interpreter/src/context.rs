use crate::value::{Procedure, Value};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use turtle_errors::RuntimeError;
use turtle_span::Span;

struct Frame {
    elements: HashMap<String, Value>,
    definitions: HashMap<String, Procedure>,
    parent: Option<Rc<RefCell<Frame>>>,
}

/// A lexical scope frame: local variables, a local procedure table, and an
/// optional parent. Cheaply `Clone`able (an `Rc` handle to shared state),
/// so evaluator functions pass contexts by value rather than by reference.
#[derive(Clone)]
pub struct Context(Rc<RefCell<Frame>>);

impl Context {
    /// A context with no parent — used exactly once, for the program root.
    pub fn new_root() -> Self {
        Context(Rc::new(RefCell::new(Frame { elements: HashMap::new(), definitions: HashMap::new(), parent: None })))
    }

    /// A fresh child scope, e.g. for an `if`/`while` block body.
    pub fn child(&self) -> Self {
        Context(Rc::new(RefCell::new(Frame {
            elements: HashMap::new(),
            definitions: HashMap::new(),
            parent: Some(self.0.clone()),
        })))
    }

    /// A context for a procedure invocation: its elements are the bound
    /// parameters, and its parent is explicitly `root` — never the
    /// caller's context. This is what keeps procedures from capturing
    /// caller locals.
    pub fn for_call(elements: HashMap<String, Value>, root: &Context) -> Self {
        Context(Rc::new(RefCell::new(Frame { elements, definitions: HashMap::new(), parent: Some(root.0.clone()) })))
    }

    /// Searches this frame's elements then definitions, then recurses into
    /// the parent chain.
    pub fn get(&self, name: &str) -> Option<Value> {
        let frame = self.0.borrow();
        if let Some(value) = frame.elements.get(name) {
            return Some(value.clone());
        }
        if let Some(proc) = frame.definitions.get(name) {
            return Some(Value::Procedure(proc.clone()));
        }
        let parent = frame.parent.clone();
        drop(frame);
        parent.map(Context).and_then(|p| p.get(name))
    }

    /// Implements the language's write-through assignment semantics:
    /// updates the nearest enclosing binding if one exists anywhere in the
    /// chain (including this frame), otherwise creates a new local binding
    /// in this frame. A name already bound as a procedure in this exact
    /// frame is a hard error — elements and definitions never shadow each
    /// other silently.
    pub fn define_element(&self, name: &str, value: Value, span: Span) -> Result<(), RuntimeError> {
        if self.0.borrow().definitions.contains_key(name) {
            return Err(RuntimeError::Redefinition { name: name.to_string(), span });
        }

        let mut cursor = self.clone();
        loop {
            if cursor.0.borrow().elements.contains_key(name) {
                cursor.0.borrow_mut().elements.insert(name.to_string(), value);
                return Ok(());
            }
            let next = cursor.0.borrow().parent.clone();
            match next {
                Some(parent) => cursor = Context(parent),
                None => break,
            }
        }

        self.0.borrow_mut().elements.insert(name.to_string(), value);
        Ok(())
    }

    /// Registers a procedure (user-defined or built-in) in this frame's
    /// definition table.
    pub fn define_procedure(&self, name: String, proc: Procedure) {
        self.0.borrow_mut().definitions.insert(name, proc);
    }

    /// Walks the parent chain to the topmost context.
    pub fn root(&self) -> Context {
        let parent = self.0.borrow().parent.clone();
        match parent {
            Some(p) => Context(p).root(),
            None => self.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_through_updates_enclosing_binding() {
        let root = Context::new_root();
        root.define_element("x", Value::Number(0.0), Span::dummy()).unwrap();
        let child = root.child();
        child.define_element("x", Value::Number(1.0), Span::dummy()).unwrap();
        match root.get("x") {
            Some(Value::Number(n)) => assert_eq!(n, 1.0),
            other => panic!("expected Number(1.0), got {other:?}"),
        }
    }

    #[test]
    fn absent_binding_creates_local() {
        let root = Context::new_root();
        let child = root.child();
        child.define_element("y", Value::Number(2.0), Span::dummy()).unwrap();
        assert!(root.get("y").is_none());
        match child.get("y") {
            Some(Value::Number(n)) => assert_eq!(n, 2.0),
            other => panic!("expected Number(2.0), got {other:?}"),
        }
    }

    #[test]
    fn procedure_call_cannot_see_caller_locals() {
        let root = Context::new_root();
        let caller = root.child();
        caller.define_element("a", Value::Number(7.0), Span::dummy()).unwrap();
        let call_ctx = Context::for_call(HashMap::new(), &root);
        assert!(call_ctx.get("a").is_none());
    }

    #[test]
    fn redefinition_of_a_procedure_name_is_rejected() {
        let root = Context::new_root();
        root.define_procedure("f".to_string(), fake_procedure());
        assert!(matches!(
            root.define_element("f", Value::Number(0.0), Span::dummy()),
            Err(RuntimeError::Redefinition { .. })
        ));
    }

    fn fake_procedure() -> Procedure {
        use crate::value::Native;
        Procedure::Native(Rc::new(Native { name: "f".to_string(), func: Box::new(|_, _| Ok(Value::Unit)) }))
    }
}
