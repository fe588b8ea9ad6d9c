use crate::canvas::Canvas;
use crate::context::Context;
use crate::flow::{EvalResult, Flow};
use crate::value::{Native, Procedure, Turtle, Value};
use std::cell::RefCell;
use std::rc::Rc;
use turtle_errors::RuntimeError;
use turtle_span::Span;

fn expect_arity(values: &[Value], expected: usize, span: Span) -> EvalResult<()> {
    if values.len() != expected {
        return Err(RuntimeError::ArityMismatch { expected, found: values.len(), span }.into());
    }
    Ok(())
}

fn native(name: &str, func: impl Fn(&[Value], Span) -> EvalResult<Value> + 'static) -> Procedure {
    Procedure::Native(Rc::new(Native { name: name.to_string(), func: Box::new(func) }))
}

/// Populates the root context with the language's built-ins: `print`,
/// `println`, the `Turtle` constructor, and the `True`/`False` constants.
/// `return` is installed per procedure-invocation instead — see
/// `evaluate::call_procedure`.
pub fn install(root: &Context, canvas: Rc<RefCell<Canvas>>, log: Rc<RefCell<String>>) {
    root.define_procedure("print".to_string(), {
        let log = log.clone();
        native("print", move |args, span| {
            expect_arity(args, 1, span)?;
            log.borrow_mut().push_str(&args[0].to_string());
            Ok(Value::Unit)
        })
    });

    root.define_procedure("println".to_string(), {
        let log = log.clone();
        native("println", move |args, span| {
            expect_arity(args, 1, span)?;
            log.borrow_mut().push_str(&args[0].to_string());
            log.borrow_mut().push('\n');
            Ok(Value::Unit)
        })
    });

    root.define_procedure("Turtle".to_string(), {
        let canvas = canvas.clone();
        native("Turtle", move |args, span| {
            expect_arity(args, 0, span)?;
            let id = canvas.borrow_mut().add_turtle();
            let turtle = Turtle { x: 0.0, y: 0.0, angle: 0.0, id, canvas: canvas.clone() };
            Ok(Value::Object(Rc::new(RefCell::new(turtle))))
        })
    });

    root.define_element("True", Value::Bool(true), Span::dummy())
        .expect("built-in installation never hits a redefinition conflict");
    root.define_element("False", Value::Bool(false), Span::dummy())
        .expect("built-in installation never hits a redefinition conflict");
}

/// The `return` procedure installed fresh in every call frame: calling it
/// does not produce a value through the normal call path, it unwinds
/// straight to the invocation that installed it via [`Flow::Return`].
pub fn return_procedure() -> Procedure {
    native("return", |args, span| {
        if args.len() > 1 {
            return Err(RuntimeError::ArityMismatch { expected: 1, found: args.len(), span }.into());
        }
        let value = args.first().cloned().unwrap_or(Value::Unit);
        Err(Flow::Return(value, span))
    })
}

/// Resolves `.field` access on a turtle into a bound native callable.
pub fn turtle_field(turtle: &Rc<RefCell<Turtle>>, name: &str, span: Span) -> Result<Value, RuntimeError> {
    let proc = match name {
        "get_x" => {
            let turtle = turtle.clone();
            native("get_x", move |args, span| {
                expect_arity(args, 0, span)?;
                Ok(Value::Number(turtle.borrow().x))
            })
        }
        "get_y" => {
            let turtle = turtle.clone();
            native("get_y", move |args, span| {
                expect_arity(args, 0, span)?;
                Ok(Value::Number(turtle.borrow().y))
            })
        }
        "move" => {
            let turtle = turtle.clone();
            native("move", move |args, span| {
                expect_arity(args, 1, span)?;
                let distance = as_number(&args[0], span)?;
                let mut t = turtle.borrow_mut();
                let theta = -(t.angle.to_radians());
                let dx = distance * theta.sin();
                let dy = distance * theta.cos();
                t.canvas.borrow_mut().move_turtle(t.id, dx, dy);
                t.x += dx;
                t.y += dy;
                Ok(Value::Unit)
            })
        }
        "rotate" => {
            let turtle = turtle.clone();
            native("rotate", move |args, span| {
                expect_arity(args, 1, span)?;
                let delta = as_number(&args[0], span)?;
                let mut t = turtle.borrow_mut();
                t.angle += delta;
                let (id, angle) = (t.id, t.angle);
                t.canvas.borrow_mut().rotate_turtle(id, angle);
                Ok(Value::Unit)
            })
        }
        "set_angle" => {
            let turtle = turtle.clone();
            native("set_angle", move |args, span| {
                expect_arity(args, 1, span)?;
                let angle = as_number(&args[0], span)?;
                let mut t = turtle.borrow_mut();
                t.angle = angle;
                let id = t.id;
                t.canvas.borrow_mut().rotate_turtle(id, angle);
                Ok(Value::Unit)
            })
        }
        "set_x" => {
            let turtle = turtle.clone();
            native("set_x", move |args, span| {
                expect_arity(args, 1, span)?;
                turtle.borrow_mut().x = as_number(&args[0], span)?;
                Ok(Value::Unit)
            })
        }
        "set_y" => {
            let turtle = turtle.clone();
            native("set_y", move |args, span| {
                expect_arity(args, 1, span)?;
                turtle.borrow_mut().y = as_number(&args[0], span)?;
                Ok(Value::Unit)
            })
        }
        _ => return Err(RuntimeError::MissingField { name: name.to_string(), span }),
    };
    Ok(Value::Procedure(proc))
}

fn as_number(value: &Value, span: Span) -> EvalResult<f64> {
    match value {
        Value::Number(n) => Ok(*n),
        other => Err(RuntimeError::TypeMismatch { lhs: other.type_name().to_string(), rhs: "number".to_string(), span }.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use crate::context::Context;
    use crate::flow::Flow;

    fn call(proc: &Procedure, args: Vec<Value>) -> EvalResult<Value> {
        match proc {
            Procedure::Native(native) => (native.func)(&args, Span::dummy()),
            Procedure::User(_) => unreachable!("builtins are always native"),
        }
    }

    fn get_procedure(ctx: &Context, name: &str) -> Procedure {
        match ctx.get(name) {
            Some(Value::Procedure(proc)) => proc,
            other => panic!("expected a procedure bound to {name}, got {other:?}"),
        }
    }

    #[test]
    fn print_writes_without_a_trailing_newline() {
        let root = Context::new_root();
        let canvas = Rc::new(RefCell::new(Canvas::new()));
        let log = Rc::new(RefCell::new(String::new()));
        install(&root, canvas, log.clone());

        call(&get_procedure(&root, "print"), vec![Value::Number(3.0)]).unwrap();
        assert_eq!(log.borrow().as_str(), "3");
    }

    #[test]
    fn println_appends_a_newline() {
        let root = Context::new_root();
        let canvas = Rc::new(RefCell::new(Canvas::new()));
        let log = Rc::new(RefCell::new(String::new()));
        install(&root, canvas, log.clone());

        call(&get_procedure(&root, "println"), vec![Value::String("hi".to_string())]).unwrap();
        assert_eq!(log.borrow().as_str(), "hi\n");
    }

    #[test]
    fn print_rejects_the_wrong_arity() {
        let root = Context::new_root();
        let canvas = Rc::new(RefCell::new(Canvas::new()));
        let log = Rc::new(RefCell::new(String::new()));
        install(&root, canvas, log);

        let err = call(&get_procedure(&root, "print"), vec![]).unwrap_err();
        assert!(matches!(err, Flow::Error(turtle_errors::Error::Runtime(RuntimeError::ArityMismatch { .. }))));
    }

    #[test]
    fn turtle_constructor_registers_a_fresh_turtle_at_the_origin() {
        let root = Context::new_root();
        let canvas = Rc::new(RefCell::new(Canvas::new()));
        let log = Rc::new(RefCell::new(String::new()));
        install(&root, canvas.clone(), log);

        let value = call(&get_procedure(&root, "Turtle"), vec![]).unwrap();
        assert!(matches!(value, Value::Object(_)));
        assert_eq!(canvas.borrow().next_id(), 1);
    }

    #[test]
    fn turtle_field_rejects_an_unknown_method_name() {
        let canvas = Rc::new(RefCell::new(Canvas::new()));
        let id = canvas.borrow_mut().add_turtle();
        let turtle = Rc::new(RefCell::new(Turtle { x: 0.0, y: 0.0, angle: 0.0, id, canvas }));

        let err = turtle_field(&turtle, "fly", Span::dummy()).unwrap_err();
        assert!(matches!(err, RuntimeError::MissingField { .. }));
    }

    #[test]
    fn move_rejects_a_non_numeric_argument() {
        let canvas = Rc::new(RefCell::new(Canvas::new()));
        let id = canvas.borrow_mut().add_turtle();
        let turtle = Rc::new(RefCell::new(Turtle { x: 0.0, y: 0.0, angle: 0.0, id, canvas }));
        let move_proc = match turtle_field(&turtle, "move", Span::dummy()).unwrap() {
            Value::Procedure(proc) => proc,
            other => panic!("expected a procedure, got {other:?}"),
        };

        let err = call(&move_proc, vec![Value::String("not a number".to_string())]).unwrap_err();
        assert!(matches!(err, Flow::Error(turtle_errors::Error::Runtime(RuntimeError::TypeMismatch { .. }))));
    }

    #[test]
    fn return_procedure_unwinds_as_a_flow_return() {
        let Procedure::Native(native) = return_procedure() else { unreachable!() };
        let span = Span::new(2, 3);
        match (native.func)(&[Value::Number(9.0)], span) {
            Err(Flow::Return(Value::Number(n), got_span)) => {
                assert_eq!(n, 9.0);
                assert_eq!(got_span, span);
            }
            other => panic!("expected Flow::Return(Number(9.0), span), got {other:?}"),
        }
    }

    #[test]
    fn true_and_false_are_bound_at_the_root() {
        let root = Context::new_root();
        let canvas = Rc::new(RefCell::new(Canvas::new()));
        let log = Rc::new(RefCell::new(String::new()));
        install(&root, canvas, log);

        assert!(matches!(root.get("True"), Some(Value::Bool(true))));
        assert!(matches!(root.get("False"), Some(Value::Bool(false))));
    }
}
