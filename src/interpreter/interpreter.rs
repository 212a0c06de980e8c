use super::builtins;
use super::environment::Environment;
use super::errors::{RuntimeError, RuntimeResult, Unwind};
use super::function::Function;
use super::object::{HashObject, Object, NULL};
use crate::frontend::grammar::{
    BlockStatement, Expression, IfExpression, InfixOperator, PrefixOperator, Program, Statement,
};

use log::{debug, trace};
use std::io::{self, Write};

/// Tree-walking evaluator. `puts` writes to `output`.
pub struct Interpreter<W: Write> {
    output: W,
}

impl Interpreter<io::Stdout> {
    pub fn new() -> Self {
        Interpreter {
            output: io::stdout(),
        }
    }
}

impl Default for Interpreter<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> Interpreter<W> {
    pub fn with_output(output: W) -> Self {
        Interpreter { output }
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    /// Evaluates every statement in `env` and returns the last value. A
    /// top-level `return` yields its value; a fault stops evaluation and is
    /// returned as an `Object::Error`.
    pub fn eval_program(&mut self, program: &Program, env: &Environment) -> Object {
        let result = self.eval_statements(&program.statements, env);
        if let Err(e) = self.output.flush() {
            debug!("could not flush output: {}", e);
        }

        match result {
            Ok(value) => value,
            Err(Unwind::Return(value)) => value,
            Err(Unwind::Error(err)) => {
                debug!("evaluation stopped: {}", err);
                Object::Error(err)
            }
        }
    }

    fn eval_statements(&mut self, stmts: &[Statement], env: &Environment) -> RuntimeResult<Object> {
        let mut result = NULL;
        for stmt in stmts.iter() {
            result = self.eval_statement(stmt, env)?;
        }
        Ok(result)
    }

    /// Blocks run in the scope they appear in.
    pub fn eval_block(&mut self, block: &BlockStatement, env: &Environment) -> RuntimeResult<Object> {
        self.eval_statements(&block.statements, env)
    }

    pub fn eval_statement(&mut self, stmt: &Statement, env: &Environment) -> RuntimeResult<Object> {
        match stmt {
            Statement::Let(name, expr) => {
                let value = self.eval_expression(expr, env)?;
                env.define(name.name.clone(), value);
                Ok(NULL)
            }
            Statement::Return(expr) => {
                let value = self.eval_expression(expr, env)?;
                Err(Unwind::Return(value))
            }
            Statement::Expression(expr) => self.eval_expression(expr, env),
            Statement::Block(block) => self.eval_block(block, env),
        }
    }

    pub fn eval_expression(&mut self, expr: &Expression, env: &Environment) -> RuntimeResult<Object> {
        match expr {
            Expression::Identifier(ident) => self.eval_identifier(&ident.name, env),
            Expression::Integer(n) => Ok(Object::Integer(*n)),
            Expression::Str(s) => Ok(Object::Str(s.clone())),
            Expression::Boolean(b) => Ok(Object::from_bool(*b)),
            Expression::Array(elements) => Ok(Object::Array(self.eval_expressions(elements, env)?)),
            Expression::Hash(pairs) => self.eval_hash_literal(pairs, env),
            Expression::Prefix(op, expr) => self.eval_prefix_operator(*op, expr, env),
            Expression::Infix(op, lhs, rhs) => self.eval_infix_operator(*op, lhs, rhs, env),
            Expression::If(if_expr) => self.eval_if_else(if_expr, env),
            Expression::Function(func) => Ok(Object::Function(Function::new(
                func.params.clone(),
                func.body.clone(),
                env.clone(),
            ))),
            Expression::Call(callee, args) => self.eval_func_call(callee, args, env),
            Expression::Index(lhs, index) => {
                let lhs = self.eval_expression(lhs, env)?;
                let index = self.eval_expression(index, env)?;
                Ok(eval_index(lhs, index)?)
            }
        }
    }

    /// Scope chain first, then the builtins.
    fn eval_identifier(&self, name: &str, env: &Environment) -> RuntimeResult<Object> {
        if let Some(value) = env.get(name) {
            return Ok(value);
        }

        match builtins::lookup(name) {
            Some(builtin) => Ok(Object::Builtin(builtin)),
            None => Err(RuntimeError::IdentifierNotFound(name.to_owned()).into()),
        }
    }

    /// Evaluates left to right, stopping at the first failure.
    fn eval_expressions(&mut self, exprs: &[Expression], env: &Environment) -> RuntimeResult<Vec<Object>> {
        let mut values = Vec::with_capacity(exprs.len());
        for expr in exprs.iter() {
            values.push(self.eval_expression(expr, env)?);
        }
        Ok(values)
    }

    fn eval_hash_literal(
        &mut self,
        pairs: &[(Expression, Expression)],
        env: &Environment,
    ) -> RuntimeResult<Object> {
        let mut hash = HashObject::new();

        for (key_expr, value_expr) in pairs.iter() {
            let key = self.eval_expression(key_expr, env)?;
            let hash_key = match key.hash_key() {
                Some(hash_key) => hash_key,
                None => return Err(RuntimeError::UnusableAsHashKey(key.type_tag()).into()),
            };
            let value = self.eval_expression(value_expr, env)?;

            hash.insert(hash_key, key, value);
        }

        Ok(Object::Hash(hash))
    }

    pub fn eval_prefix_operator(
        &mut self,
        op: PrefixOperator,
        expr: &Expression,
        env: &Environment,
    ) -> RuntimeResult<Object> {
        let value = self.eval_expression(expr, env)?;
        Ok(Object::apply_prefix_op(op, value)?)
    }

    pub fn eval_infix_operator(
        &mut self,
        op: InfixOperator,
        lhs: &Expression,
        rhs: &Expression,
        env: &Environment,
    ) -> RuntimeResult<Object> {
        // Right operand first: its errors and output come before the left's.
        let rhs = self.eval_expression(rhs, env)?;
        let lhs = self.eval_expression(lhs, env)?;
        Ok(Object::apply_infix_op(op, lhs, rhs)?)
    }

    pub fn eval_if_else(&mut self, if_expr: &IfExpression, env: &Environment) -> RuntimeResult<Object> {
        if self.eval_expression(&if_expr.condition, env)?.is_truthy() {
            return self.eval_block(&if_expr.consequence, env);
        }
        if let Some(alternative) = &if_expr.alternative {
            return self.eval_block(alternative, env);
        }

        Ok(NULL)
    }

    pub fn eval_func_call(
        &mut self,
        callee: &Expression,
        raw_args: &[Expression],
        env: &Environment,
    ) -> RuntimeResult<Object> {
        let callee = self.eval_expression(callee, env)?;
        let args = self.eval_expressions(raw_args, env)?;

        match callee {
            Object::Function(func) => {
                trace!("calling {} with {} args", func, args.len());
                func.execute(args, self)
            }
            Object::Builtin(builtin) => {
                trace!("calling builtin {}", builtin.name);
                Ok(builtin.execute(args, &mut self.output)?)
            }
            other => Err(RuntimeError::NotAFunction(other.type_tag()).into()),
        }
    }
}

/// Arrays are indexed from 1. Out of range positions give null.
fn eval_index(lhs: Object, index: Object) -> Result<Object, RuntimeError> {
    match (lhs, index) {
        (Object::Array(elements), Object::Integer(i)) => {
            if i < 1 {
                return Ok(NULL);
            }
            let element = usize::try_from(i - 1)
                .ok()
                .and_then(|slot| elements.into_iter().nth(slot));
            Ok(element.unwrap_or(NULL))
        }
        (Object::Hash(hash), index) => match index.hash_key() {
            Some(key) => Ok(hash.get(&key).cloned().unwrap_or(NULL)),
            None => Err(RuntimeError::UnusableAsHashKey(index.type_tag())),
        },
        (lhs, _) => Err(RuntimeError::IndexNotSupported(lhs.type_tag())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::keywords::KeywordTable;
    use crate::frontend::{Lexer, Parser};
    use crate::interpreter::object::{FALSE, TRUE};

    fn parse(source: &str) -> Program {
        let lexer = Lexer::with_keywords(source, KeywordTable::classic());
        match Parser::new(lexer).parse() {
            Ok(program) => program,
            Err(errors) => panic!("parser errors in {}: {:?}", source, errors),
        }
    }

    fn eval_with_output(source: &str) -> (Object, String) {
        let mut interpreter = Interpreter::with_output(Vec::new());
        let result = interpreter.eval_program(&parse(source), &Environment::new());
        let output = String::from_utf8(interpreter.output().clone()).unwrap();
        (result, output)
    }

    fn eval(source: &str) -> Object {
        eval_with_output(source).0
    }

    fn assert_values(cases: &[(&str, Object)]) {
        for (source, expected) in cases.iter() {
            assert_eq!(&eval(source), expected, "in {}", source);
        }
    }

    fn error_message(source: &str) -> String {
        match eval(source) {
            Object::Error(err) => err.to_string(),
            other => panic!("expected error from {}, got {}", source, other),
        }
    }

    #[test]
    fn test_integer_expressions() {
        assert_values(&[
            ("5", Object::Integer(5)),
            ("-10", Object::Integer(-10)),
            ("5 + 5 + 5 + 5 - 10", Object::Integer(10)),
            ("2 * 2 * 2 * 2 * 2", Object::Integer(32)),
            ("-50 + 100 + -50", Object::Integer(0)),
            ("50 / 2 * 2 + 10", Object::Integer(60)),
            ("3 * (3 * 3) + 10", Object::Integer(37)),
            ("(5 + 10 * 2 + 15 / 3) * 2 + -10", Object::Integer(50)),
            ("7 / 2", Object::Integer(3)),
            ("-7 / 2", Object::Integer(-3)),
        ]);
    }

    #[test]
    fn test_boolean_expressions() {
        assert_values(&[
            ("true", TRUE),
            ("1 < 2", TRUE),
            ("1 > 2", FALSE),
            ("1 == 1", TRUE),
            ("1 != 1", FALSE),
        ]);
    }

    #[test]
    fn test_bang_operator() {
        assert_values(&[
            ("!true", FALSE),
            ("!false", TRUE),
            ("!5", FALSE),
            ("!0", FALSE),
            ("!!true", TRUE),
            ("!!false", FALSE),
            ("!!5", TRUE),
            (r#"!!"text""#, TRUE),
        ]);
    }

    #[test]
    fn test_if_else_expressions() {
        assert_values(&[
            ("if (true) { 10 }", Object::Integer(10)),
            ("if (false) { 10 }", NULL),
            ("if (1) { 10 }", Object::Integer(10)),
            ("if (0) { 10 } else { 20 }", Object::Integer(10)),
            ("if (1 < 2) { 10 }", Object::Integer(10)),
            ("if (1 > 2) { 10 } else { 20 }", Object::Integer(20)),
            ("if (1 > 2) { 10 }", NULL),
            ("if ([]) { 1 } else { 2 }", Object::Integer(1)),
        ]);
    }

    #[test]
    fn test_return_statements() {
        assert_values(&[
            ("return 10;", Object::Integer(10)),
            ("return 10; 9;", Object::Integer(10)),
            ("return 2 * 5; 9;", Object::Integer(10)),
            ("9; return 2 * 5; 9;", Object::Integer(10)),
            (
                "if (10 > 1) { if (10 > 1) { return 10; } return 1; }",
                Object::Integer(10),
            ),
            (
                "let f = fn(x) if (x > 1) { return 1; } return 2; end; f(5)",
                Object::Integer(1),
            ),
            (
                "let f = fn(x) if (x > 1) { return 1; } return 2; end; f(0)",
                Object::Integer(2),
            ),
        ]);
    }

    #[test]
    fn test_error_handling() {
        let cases = [
            ("5 + true;", "type mismatch: INTEGER + BOOLEAN"),
            ("5 + true; 5;", "type mismatch: INTEGER + BOOLEAN"),
            ("-true", "unknown operator: -BOOLEAN"),
            ("true + false;", "unknown operator: BOOLEAN + BOOLEAN"),
            ("5; true + false; 5", "unknown operator: BOOLEAN + BOOLEAN"),
            ("true == true", "unknown operator: BOOLEAN == BOOLEAN"),
            ("true != false", "unknown operator: BOOLEAN != BOOLEAN"),
            ("(1 < 2) == true", "unknown operator: BOOLEAN == BOOLEAN"),
            (
                "if (10 > 1) { true + false; }",
                "unknown operator: BOOLEAN + BOOLEAN",
            ),
            (
                "if (10 > 1) { if (10 > 1) { return true + false; } return 1; }",
                "unknown operator: BOOLEAN + BOOLEAN",
            ),
            ("foobar", "Identifier not found: foobar"),
            (r#""Hello" - "World""#, "unknown operator: STRING - STRING"),
            (
                r#"{"name": "Monkey"}[fn(x) x end];"#,
                "unusable as hash key: FUNCTION",
            ),
            ("{[1]: 2}", "unusable as hash key: ARRAY"),
            ("5(1)", "not a function: INTEGER"),
            ("1[1]", "index operator not supported INTEGER"),
            (r#"[1]["a"]"#, "index operator not supported ARRAY"),
            ("1 / 0", "division by zero: INTEGER / INTEGER"),
            ("[1] + [2]", "unknown operator: ARRAY + ARRAY"),
        ];

        for (source, expected) in cases {
            assert_eq!(error_message(source), expected, "in {}", source);
        }
    }

    #[test]
    fn test_errors_stop_the_program() {
        let (result, output) = eval_with_output("puts(1); foo; puts(2)");
        assert_eq!(
            result,
            Object::Error(RuntimeError::IdentifierNotFound("foo".to_owned()))
        );
        assert_eq!(output, "1\n");

        let (result, output) = eval_with_output("let f = fn(a) a end; f(1, foo, puts(3))");
        assert_eq!(result.to_string(), "Error: Identifier not found: foo");
        assert_eq!(output, "");
    }

    #[test]
    fn test_infix_evaluates_right_operand_first() {
        assert_eq!(error_message("foo + bar"), "Identifier not found: bar");

        let (result, output) = eval_with_output("puts(1) + puts(2)");
        assert_eq!(result.to_string(), "Error: unknown operator: NULL + NULL");
        assert_eq!(output, "2\n1\n");

        let (result, output) = eval_with_output(r#"len(puts("a")) - len(puts("b"))"#);
        assert_eq!(result.to_string(), "Error: argument to `len` not supported, got NULL");
        assert_eq!(output, "b\n");
    }

    #[test]
    fn test_let_statements() {
        assert_values(&[
            ("let a = 5; a;", Object::Integer(5)),
            ("let a = 5 * 5; a;", Object::Integer(25)),
            ("let a = 5; let b = a; b;", Object::Integer(5)),
            (
                "let a = 5; let b = a; let c = a + b + 5; c;",
                Object::Integer(15),
            ),
            ("let a = 1", NULL),
            ("let a = 1; let a = a + 1; a", Object::Integer(2)),
        ]);
    }

    #[test]
    fn test_function_object() {
        match eval("fn(x) x + 2; end") {
            Object::Function(func) => {
                assert_eq!(func.params().len(), 1);
                assert_eq!(func.params()[0].name, "x");
                assert_eq!(func.to_string(), "fn(x) (x + 2)");
            }
            other => panic!("expected function, got {}", other),
        }
    }

    #[test]
    fn test_function_application() {
        assert_values(&[
            ("let identity = fn(x) x; end; identity(5);", Object::Integer(5)),
            ("let identity = fn(x) return x; end; identity(5);", Object::Integer(5)),
            ("let double = fn(x) x * 2; end; double(5);", Object::Integer(10)),
            ("let add = fn(x, y) x + y; end; add(5, 5);", Object::Integer(10)),
            (
                "let add = fn(x, y) x + y; end; add(5 + 5, add(5, 5));",
                Object::Integer(20),
            ),
            ("fn(x) x; end(5)", Object::Integer(5)),
            ("let f = fn() end; f()", NULL),
        ]);
    }

    #[test]
    fn test_closures() {
        assert_values(&[
            (
                "let newAdder = fn(x) fn(y) x + y end end; let addTwo = newAdder(2); addTwo(2);",
                Object::Integer(4),
            ),
            (
                "let x = 5; let f = fn() x end; let x = 10; f()",
                Object::Integer(10),
            ),
            (
                "let fact = fn(n) if (n < 2) { return 1; } n * fact(n - 1) end; fact(5)",
                Object::Integer(120),
            ),
            (
                "let x = 1; let f = fn(x) x end; f(2) + x",
                Object::Integer(3),
            ),
        ]);
    }

    #[test]
    fn test_argument_binding() {
        assert_eq!(
            error_message("let f = fn(a, b) b end; f(1)"),
            "Identifier not found: b"
        );
        assert_values(&[
            ("let b = 7; let f = fn(a, b) b end; f(1)", Object::Integer(7)),
            ("let f = fn(a) a end; f(1, 2)", Object::Integer(1)),
        ]);
    }

    #[test]
    fn test_string_expressions() {
        assert_values(&[
            (r#""Hello World!""#, Object::Str("Hello World!".to_owned())),
            (
                r#""Hello" + " " + "World!""#,
                Object::Str("Hello World!".to_owned()),
            ),
        ]);
    }

    #[test]
    fn test_builtin_functions() {
        assert_values(&[
            (r#"len("")"#, Object::Integer(0)),
            (r#"len("four")"#, Object::Integer(4)),
            ("len([1, 2, 3])", Object::Integer(3)),
            ("first([1, 2, 3])", Object::Integer(1)),
            ("last([])", NULL),
            ("let a = [1, 2]; let b = push(a, 3); len(a) + len(b)", Object::Integer(5)),
            (r#"let len = fn(x) 42 end; len("a")"#, Object::Integer(42)),
        ]);
        assert_eq!(
            error_message("len(1)"),
            "argument to `len` not supported, got INTEGER"
        );
        assert_eq!(
            error_message(r#"len("one", "two")"#),
            "wrong number of arguments. got=2, want=1"
        );
        assert_eq!(eval("len").to_string(), "builtin function");
    }

    #[test]
    fn test_puts_output() {
        let (result, output) = eval_with_output(r#"puts("hi", 1, [1, "a"]); puts()"#);
        assert_eq!(result, NULL);
        assert_eq!(output, "hi\n1\n[1, a]\n");
    }

    #[test]
    fn test_array_literals_and_indexing() {
        assert_eq!(eval("[1, 2 * 2, 3 + 3]").to_string(), "[1, 4, 6]");
        assert_values(&[
            ("[1, 2, 3][1]", Object::Integer(1)),
            ("[1, 2, 3][2]", Object::Integer(2)),
            ("[1, 2, 3][3]", Object::Integer(3)),
            ("let i = 1; [1][i];", Object::Integer(1)),
            ("[1, 2, 3][1 + 1];", Object::Integer(2)),
            ("let myArray = [1, 2, 3]; myArray[3];", Object::Integer(3)),
            (
                "let myArray = [1, 2, 3]; myArray[1] + myArray[2] + myArray[3];",
                Object::Integer(6),
            ),
            ("[1, 2, 3][0]", NULL),
            ("[1, 2, 3][4]", NULL),
            ("[1, 2, 3][-1]", NULL),
        ]);
    }

    #[test]
    fn test_hash_literals() {
        let source = r#"
let two = "two";
{
  "one": 10 - 9,
  two: 1 + 1,
  "thr" + "ee": 6 / 2,
  4: 4,
  true: 5,
  false: 6
}"#;
        assert_eq!(
            eval(source).to_string(),
            "{one: 1, two: 2, three: 3, 4: 4, true: 5, false: 6}"
        );
        assert_eq!(
            eval(r#"{"a": 1, "b": 2, "a": 3}"#).to_string(),
            "{a: 3, b: 2}"
        );

        match eval(r#"{"key": 1, "key": 2}"#) {
            Object::Hash(hash) => assert_eq!(hash.pairs().count(), 1),
            other => panic!("expected hash, got {}", other),
        }
    }

    #[test]
    fn test_hash_indexing() {
        assert_values(&[
            (r#"{"foo": 5}["foo"]"#, Object::Integer(5)),
            (r#"{"foo": 5}["bar"]"#, NULL),
            (r#"let key = "foo"; {"foo": 5}[key]"#, Object::Integer(5)),
            (r#"{}["foo"]"#, NULL),
            ("{5: 5}[5]", Object::Integer(5)),
            ("{true: 5}[true]", Object::Integer(5)),
            ("{false: 5}[false]", Object::Integer(5)),
            (r#"{4: 1}["4"]"#, NULL),
        ]);
        assert_eq!(
            error_message(r#"{"a": 1}[[1]]"#),
            "unusable as hash key: ARRAY"
        );
    }

    #[test]
    fn test_environment_is_shared_across_programs() {
        let env = Environment::new();
        let mut interpreter = Interpreter::with_output(Vec::new());

        interpreter.eval_program(&parse("let counter = fn(x) x + base end;"), &env);
        interpreter.eval_program(&parse("let base = 100;"), &env);
        assert_eq!(
            interpreter.eval_program(&parse("counter(1)"), &env),
            Object::Integer(101)
        );
    }

    #[test]
    fn test_quebecois_program() {
        let source = "
MET MOI CA ICITTE max = JAI JAMAIS TOUCHER A MES FILLES(a, b)
  AMETON QUE (a > b) { TOKEBEC a; } SINON LA { TOKEBEC b; }
SAUF UNE FOIS AU CHALET;
max(3, 8);
";
        let program = Parser::new(Lexer::new(source)).parse().unwrap();
        let mut interpreter = Interpreter::with_output(io::sink());
        assert_eq!(
            interpreter.eval_program(&program, &Environment::new()),
            Object::Integer(8)
        );
    }
}
