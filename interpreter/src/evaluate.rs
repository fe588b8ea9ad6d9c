use crate::builtins;
use crate::context::Context;
use crate::flow::{EvalResult, Flow};
use crate::value::{Procedure, Value};
use std::collections::HashMap;
use std::rc::Rc;
use turtle_ast::{
    AddExpr, AddOp, Block, Expr, IdentExpr, Literal, LogicAndExpr, LogicOrExpr, MulExpr, MulOp,
    Postfix, Program, RelationExpr, Stmt, UnaryExpr, UnaryOp,
};
use turtle_errors::{Error, RuntimeError};
use turtle_span::Span;

/// Runs a whole program against its root context: registers every
/// top-level procedure definition first (so forward references between
/// procedures work), then executes the top-level statements in order.
///
/// A `return` that escapes every procedure frame — i.e. one executed at
/// top level — is not control flow anymore, it's a reported error.
pub fn execute_program(program: &Program, root: &Context) -> Result<(), Error> {
    for def in &program.definitions {
        root.define_procedure(def.name.clone(), Procedure::User(Rc::new(def.clone())));
    }
    for stmt in &program.statements {
        match execute_stmt(stmt, root) {
            Ok(()) => {}
            Err(Flow::Error(err)) => return Err(err),
            Err(Flow::Return(_, span)) => return Err(RuntimeError::ReturnOutsideProcedure { span }.into()),
        }
    }
    Ok(())
}

pub fn execute_block(block: &Block, ctx: &Context) -> EvalResult<()> {
    for stmt in &block.statements {
        execute_stmt(stmt, ctx)?;
    }
    Ok(())
}

fn execute_stmt(stmt: &Stmt, ctx: &Context) -> EvalResult<()> {
    match stmt {
        Stmt::Assign(assign) => {
            let value = evaluate_expr(&assign.value, ctx)?;
            ctx.define_element(&assign.name, value, assign.span)?;
            Ok(())
        }
        Stmt::If(stmt) => {
            if evaluate_expr(&stmt.condition, ctx)?.is_truthy() {
                execute_block(&stmt.then_branch, &ctx.child())
            } else if !stmt.else_branch.statements.is_empty() {
                execute_block(&stmt.else_branch, &ctx.child())
            } else {
                Ok(())
            }
        }
        Stmt::While(stmt) => {
            // A single child context is reused across iterations; write-through
            // assignment makes this equivalent to a fresh context per loop.
            let body_ctx = ctx.child();
            while evaluate_expr(&stmt.condition, &body_ctx)?.is_truthy() {
                execute_block(&stmt.body, &body_ctx)?;
            }
            Ok(())
        }
        Stmt::Expr(expr) => {
            evaluate_expr(expr, ctx)?;
            Ok(())
        }
    }
}

pub fn evaluate_expr(expr: &Expr, ctx: &Context) -> EvalResult<Value> {
    match expr {
        Expr::LogicOr(e) => evaluate_logic_or(e, ctx),
        Expr::LogicAnd(e) => evaluate_logic_and(e, ctx),
        Expr::Relation(e) => evaluate_relation(e, ctx),
        Expr::Add(e) => evaluate_add(e, ctx),
        Expr::Mul(e) => evaluate_mul(e, ctx),
        Expr::Unary(e) => evaluate_unary(e, ctx),
        Expr::Ident(e) => evaluate_ident(e, ctx),
        Expr::Const(e) => Ok(literal_value(&e.value)),
    }
}

fn literal_value(literal: &Literal) -> Value {
    match literal {
        Literal::Number(n) => Value::Number(*n),
        Literal::Bool(b) => Value::Bool(*b),
        Literal::String(s) => Value::String(s.clone()),
    }
}

fn evaluate_logic_or(e: &LogicOrExpr, ctx: &Context) -> EvalResult<Value> {
    for operand in &e.operands {
        if evaluate_expr(operand, ctx)?.is_truthy() {
            return Ok(Value::Bool(true));
        }
    }
    Ok(Value::Bool(false))
}

fn evaluate_logic_and(e: &LogicAndExpr, ctx: &Context) -> EvalResult<Value> {
    for operand in &e.operands {
        if !evaluate_expr(operand, ctx)?.is_truthy() {
            return Ok(Value::Bool(false));
        }
    }
    Ok(Value::Bool(true))
}

fn evaluate_relation(e: &RelationExpr, ctx: &Context) -> EvalResult<Value> {
    use turtle_ast::CompareOp::*;

    let lhs = evaluate_expr(&e.lhs, ctx)?;
    let rhs = evaluate_expr(&e.rhs, ctx)?;
    match e.op {
        Eq => Ok(Value::Bool(lhs.values_equal(&rhs))),
        Neq => Ok(Value::Bool(!lhs.values_equal(&rhs))),
        Lt | Gt | Le | Ge => {
            let (a, b) = as_number_pair(&lhs, &rhs, e.span)?;
            let result = match e.op {
                Lt => a < b,
                Gt => a > b,
                Le => a <= b,
                Ge => a >= b,
                Eq | Neq => unreachable!("handled above"),
            };
            Ok(Value::Bool(result))
        }
    }
}

fn as_number_pair(lhs: &Value, rhs: &Value, span: Span) -> EvalResult<(f64, f64)> {
    match (lhs, rhs) {
        (Value::Number(a), Value::Number(b)) => Ok((*a, *b)),
        _ => Err(type_mismatch(lhs, rhs, span)),
    }
}

fn type_mismatch(lhs: &Value, rhs: &Value, span: Span) -> Flow {
    RuntimeError::TypeMismatch { lhs: lhs.type_name().to_string(), rhs: rhs.type_name().to_string(), span }.into()
}

fn evaluate_add(e: &AddExpr, ctx: &Context) -> EvalResult<Value> {
    let mut acc = evaluate_expr(&e.first, ctx)?;
    for (op, rhs_expr) in &e.rest {
        let rhs = evaluate_expr(rhs_expr, ctx)?;
        acc = apply_add_op(*op, acc, rhs, e.span)?;
    }
    Ok(acc)
}

fn apply_add_op(op: AddOp, lhs: Value, rhs: Value, span: Span) -> EvalResult<Value> {
    match (op, &lhs, &rhs) {
        (AddOp::Add, Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
        (AddOp::Add, Value::String(a), Value::String(b)) => Ok(Value::String(format!("{a}{b}"))),
        (AddOp::Sub, Value::Number(a), Value::Number(b)) => Ok(Value::Number(a - b)),
        _ => Err(type_mismatch(&lhs, &rhs, span)),
    }
}

fn evaluate_mul(e: &MulExpr, ctx: &Context) -> EvalResult<Value> {
    let mut acc = evaluate_expr(&e.first, ctx)?;
    for (op, rhs_expr) in &e.rest {
        let rhs = evaluate_expr(rhs_expr, ctx)?;
        acc = apply_mul_op(*op, acc, rhs, e.span)?;
    }
    Ok(acc)
}

fn apply_mul_op(op: MulOp, lhs: Value, rhs: Value, span: Span) -> EvalResult<Value> {
    let (a, b) = as_number_pair(&lhs, &rhs, span)?;
    match op {
        MulOp::Mul => Ok(Value::Number(a * b)),
        MulOp::Div => {
            if b == 0.0 {
                Err(RuntimeError::DivisionByZero { span }.into())
            } else {
                Ok(Value::Number(a / b))
            }
        }
    }
}

fn evaluate_unary(e: &UnaryExpr, ctx: &Context) -> EvalResult<Value> {
    let inner = evaluate_expr(&e.inner, ctx)?;
    match e.op {
        UnaryOp::Not => Ok(Value::Bool(!inner.is_truthy())),
        // The reference evaluator applies no operand check for unary `+`:
        // it's a pure no-op, not a numeric assertion.
        UnaryOp::Plus => Ok(inner),
        UnaryOp::Minus => match inner {
            Value::Number(n) => Ok(Value::Number(-n)),
            other => Err(RuntimeError::TypeMismatch { lhs: other.type_name().to_string(), rhs: "number".to_string(), span: e.span }.into()),
        },
    }
}

fn evaluate_ident(e: &IdentExpr, ctx: &Context) -> EvalResult<Value> {
    let mut value = ctx
        .get(&e.name)
        .ok_or_else(|| RuntimeError::UndefinedVariable { name: e.name.clone(), span: e.span })?;

    for postfix in &e.postfixes {
        value = match postfix {
            Postfix::Field(field) => match &value {
                Value::Object(turtle) => builtins::turtle_field(turtle, &field.name, field.span)?,
                other => {
                    return Err(RuntimeError::TypeMismatch {
                        lhs: other.type_name().to_string(),
                        rhs: "object".to_string(),
                        span: field.span,
                    }
                    .into());
                }
            },
            Postfix::Call(call) => {
                let proc = match &value {
                    Value::Procedure(proc) => proc.clone(),
                    other => {
                        return Err(RuntimeError::TypeMismatch {
                            lhs: other.type_name().to_string(),
                            rhs: "procedure".to_string(),
                            span: call.span,
                        }
                        .into());
                    }
                };
                let mut args = Vec::with_capacity(call.args.len());
                for arg in &call.args {
                    args.push(evaluate_expr(arg, ctx)?);
                }
                call_procedure(&proc, args, ctx, call.span)?
            }
        };
    }

    Ok(value)
}

/// Invokes a procedure value. User-defined procedures always run against a
/// fresh context rooted at `ctx`'s root, never at `ctx` itself — see the
/// "no caller-local capture" invariant in the design notes.
pub fn call_procedure(proc: &Procedure, args: Vec<Value>, ctx: &Context, span: Span) -> EvalResult<Value> {
    match proc {
        Procedure::Native(native) => (native.func)(&args, span),
        Procedure::User(def) => {
            if args.len() != def.params.len() {
                return Err(RuntimeError::ArityMismatch { expected: def.params.len(), found: args.len(), span }.into());
            }

            let elements: HashMap<String, Value> = def.params.iter().cloned().zip(args).collect();
            let root = ctx.root();
            let call_ctx = Context::for_call(elements, &root);
            call_ctx.define_procedure("return".to_string(), builtins::return_procedure());

            match execute_block(&def.body, &call_ctx) {
                Ok(()) => Ok(Value::Unit),
                Err(Flow::Return(value, _)) => Ok(value),
                Err(err) => Err(err),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use std::cell::RefCell;

    fn run(source: &str) -> Result<Context, Error> {
        let program = turtle_parser::parse_program(source)?;
        let root = Context::new_root();
        let canvas = Rc::new(RefCell::new(Canvas::new()));
        let log = Rc::new(RefCell::new(String::new()));
        builtins::install(&root, canvas, log);
        execute_program(&program, &root)?;
        Ok(root)
    }

    fn number(ctx: &Context, name: &str) -> f64 {
        match ctx.get(name) {
            Some(Value::Number(n)) => n,
            other => panic!("expected {name} to be a number, got {other:?}"),
        }
    }

    #[test]
    fn scenario_a_simple_assignment() {
        let ctx = run("x=6234").unwrap();
        assert_eq!(number(&ctx, "x"), 6234.0);
    }

    #[test]
    fn scenario_b_chained_assignment() {
        let ctx = run("x=12 y=34 z=x").unwrap();
        assert_eq!(number(&ctx, "x"), 12.0);
        assert_eq!(number(&ctx, "y"), 34.0);
        assert_eq!(number(&ctx, "z"), 12.0);
    }

    #[test]
    fn scenario_c_arithmetic_precedence() {
        let ctx = run("x=43/32 y=3*2").unwrap();
        assert!((number(&ctx, "x") - 1.34375).abs() < 1e-9);
        assert_eq!(number(&ctx, "y"), 6.0);
    }

    #[test]
    fn scenario_d_logical_and_comparisons() {
        let ctx = run("x=43<4 && 33<2").unwrap();
        match ctx.get("x") {
            Some(Value::Bool(b)) => assert!(!b),
            other => panic!("expected Bool(false), got {other:?}"),
        }
    }

    #[test]
    fn scenario_e_while_loop() {
        let ctx = run("x=0 y=0 while(x==0){ y=y+1 x=1 }").unwrap();
        assert_eq!(number(&ctx, "x"), 1.0);
        assert_eq!(number(&ctx, "y"), 1.0);
    }

    #[test]
    fn scenario_f_recursive_fibonacci() {
        let ctx = run(
            "fun fib(n){ if(n<=1){ return(1) } return(fib(n-1)+fib(n-2)) } \
             x0=fib(0) x1=fib(1) x2=fib(2) x3=fib(3) x4=fib(4) x5=fib(5)",
        )
        .unwrap();
        assert_eq!(number(&ctx, "x0"), 1.0);
        assert_eq!(number(&ctx, "x1"), 1.0);
        assert_eq!(number(&ctx, "x2"), 2.0);
        assert_eq!(number(&ctx, "x3"), 3.0);
        assert_eq!(number(&ctx, "x4"), 5.0);
        assert_eq!(number(&ctx, "x5"), 8.0);
    }

    #[test]
    fn invariant_5_write_through_assignment() {
        let ctx = run("x = 0 if (True) { x = 1 }").unwrap();
        assert_eq!(number(&ctx, "x"), 1.0);
    }

    #[test]
    fn invariant_6_procedure_parameter_shadows() {
        let ctx = run("x = 5 fun f(x){ x = x + 1 } f(10)").unwrap();
        assert_eq!(number(&ctx, "x"), 5.0);
    }

    #[test]
    fn invariant_7_no_caller_local_capture() {
        // `a` only ever gets created inside the `if`'s child context here
        // (there is no pre-existing root binding for it to write through
        // to), so it is a caller local, not a root-level variable — `g`'s
        // call context is rooted at the program root and cannot see it.
        let err = run("if (True) { a = 7 } fun g(){ return(a) } x = g()").unwrap_err();
        assert!(matches!(err, Error::Runtime(RuntimeError::UndefinedVariable { .. })));
    }

    #[test]
    fn invariant_7_root_level_variable_is_visible() {
        let ctx = run("a = 7 fun g(){ return(a) } x = g()").unwrap();
        assert_eq!(number(&ctx, "x"), 7.0);
    }

    #[test]
    fn invariant_8_return_stops_execution() {
        let ctx = run("fun f(){ return(1) x = 99 } y = f()").unwrap();
        assert_eq!(number(&ctx, "y"), 1.0);
        assert!(ctx.get("x").is_none());
    }

    #[test]
    fn invariant_4_short_circuit_or_skips_call() {
        let ctx = run("fun bad(){ x = 1 return(True) } y = True || bad()").unwrap();
        assert!(ctx.get("x").is_none());
        match ctx.get("y") {
            Some(Value::Bool(b)) => assert!(b),
            other => panic!("expected Bool(true), got {other:?}"),
        }
    }

    #[test]
    fn invariant_4_short_circuit_and_skips_call() {
        let ctx = run("fun bad(){ x = 1 return(False) } y = False && bad()").unwrap();
        assert!(ctx.get("x").is_none());
        match ctx.get("y") {
            Some(Value::Bool(b)) => assert!(!b),
            other => panic!("expected Bool(false), got {other:?}"),
        }
    }

    #[test]
    fn division_by_zero_is_reported() {
        let err = run("x = 1 / 0").unwrap_err();
        assert!(matches!(err, Error::Runtime(RuntimeError::DivisionByZero { .. })));
    }

    #[test]
    fn return_outside_procedure_is_reported() {
        let err = run("x = return(1)").unwrap_err();
        assert!(matches!(err, Error::Runtime(RuntimeError::ReturnOutsideProcedure { .. })));
    }

    #[test]
    fn scenario_g_turtle_drawing() {
        let program = turtle_parser::parse_program("t=Turtle() t.move(10) t.rotate(30)").unwrap();
        let root = Context::new_root();
        let canvas = Rc::new(RefCell::new(Canvas::new()));
        let log = Rc::new(RefCell::new(String::new()));
        builtins::install(&root, canvas.clone(), log);
        execute_program(&program, &root).unwrap();

        assert_eq!(canvas.borrow().next_id(), 1);
        assert_eq!(canvas.borrow().turtle_lines()[&0].len(), 2);
        assert_eq!(canvas.borrow().turtle_angles()[&0], 30.0);
    }

    #[test]
    fn print_and_println_write_to_the_log_sink() {
        let program = turtle_parser::parse_program(r#"print("a") println("b")"#).unwrap();
        let root = Context::new_root();
        let canvas = Rc::new(RefCell::new(Canvas::new()));
        let log = Rc::new(RefCell::new(String::new()));
        builtins::install(&root, canvas, log.clone());
        execute_program(&program, &root).unwrap();
        assert_eq!(*log.borrow(), "ab\n");
    }
}
