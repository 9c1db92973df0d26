//! Native modules: `io` and `math`.

use crate::console::Console;
use crate::error::EvalResult;
use crate::value::Value;

/// Signature shared by every native function.
pub type NativeFn = fn(&mut Console, &[Value]) -> EvalResult<Value>;

/// A native function exposed as `module.name`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Builtin {
    pub name: &'static str,
    /// Required argument count; `None` means variadic.
    pub arity: Option<usize>,
    pub func: NativeFn,
}

impl Builtin {
    const fn new(name: &'static str, arity: Option<usize>, func: NativeFn) -> Self {
        Self { name, arity, func }
    }
}

/// Names of the modules that exist without a module file.
pub const BUILTIN_MODULES: &[&str] = &["io", "math"];

/// Functions of a builtin module, or `None` if `module` is not builtin.
pub fn builtin_module(module: &str) -> Option<&'static [Builtin]> {
    match module {
        "io" => Some(IO),
        "math" => Some(MATH),
        _ => None,
    }
}

// ── io ────────────────────────────────────────────────────────────────────────

const IO: &[Builtin] = &[
    Builtin::new("print", None, io_print),
    Builtin::new("input", Some(0), io_input),
];

/// Space-joined arguments plus a newline.
fn io_print(console: &mut Console, args: &[Value]) -> EvalResult<Value> {
    let line = args
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ");
    console.print_line(&line)?;
    Ok(Value::Null)
}

/// One line of input as a string, null at end of input.
fn io_input(console: &mut Console, _args: &[Value]) -> EvalResult<Value> {
    Ok(console.read_line()?.map_or(Value::Null, Value::String))
}

// ── math ──────────────────────────────────────────────────────────────────────

const MATH: &[Builtin] = &[
    Builtin::new("sqrt", Some(1), |_, args| unary(args, f64::sqrt)),
    Builtin::new("pow", Some(2), math_pow),
    Builtin::new("sin", Some(1), |_, args| unary(args, f64::sin)),
    Builtin::new("cos", Some(1), |_, args| unary(args, f64::cos)),
    Builtin::new("tan", Some(1), |_, args| unary(args, f64::tan)),
    Builtin::new("log", Some(1), |_, args| unary(args, f64::ln)),
    Builtin::new("exp", Some(1), |_, args| unary(args, f64::exp)),
    Builtin::new("abs", Some(1), |_, args| unary(args, f64::abs)),
    // Halves round to even.
    Builtin::new("round", Some(1), |_, args| unary(args, f64::round_ties_even)),
    Builtin::new("floor", Some(1), |_, args| unary(args, f64::floor)),
    Builtin::new("ceil", Some(1), |_, args| unary(args, f64::ceil)),
];

fn arg(args: &[Value], index: usize) -> EvalResult<f64> {
    args.get(index).unwrap_or(&Value::Null).to_number()
}

fn unary(args: &[Value], op: fn(f64) -> f64) -> EvalResult<Value> {
    Ok(Value::Number(op(arg(args, 0)?)))
}

fn math_pow(_console: &mut Console, args: &[Value]) -> EvalResult<Value> {
    Ok(Value::Number(arg(args, 0)?.powf(arg(args, 1)?)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(module: &str, name: &str, args: &[Value]) -> EvalResult<Value> {
        let builtin = builtin_module(module)
            .and_then(|fns| fns.iter().find(|b| b.name == name))
            .unwrap();
        (builtin.func)(&mut Console::captured(), args)
    }

    #[test]
    fn test_math_functions() {
        assert_eq!(call("math", "sqrt", &[Value::Number(16.0)]), Ok(Value::Number(4.0)));
        assert_eq!(
            call("math", "pow", &[Value::Number(2.0), Value::Number(10.0)]),
            Ok(Value::Number(1024.0))
        );
        assert_eq!(call("math", "abs", &[Value::Number(-3.0)]), Ok(Value::Number(3.0)));
        assert_eq!(call("math", "floor", &[Value::Number(2.7)]), Ok(Value::Number(2.0)));
        assert_eq!(call("math", "ceil", &[Value::Number(2.1)]), Ok(Value::Number(3.0)));
        assert_eq!(call("math", "log", &[Value::Number(1.0)]), Ok(Value::Number(0.0)));
        assert_eq!(call("math", "exp", &[Value::Number(0.0)]), Ok(Value::Number(1.0)));
    }

    #[test]
    fn test_round_ties_to_even() {
        assert_eq!(call("math", "round", &[Value::Number(2.5)]), Ok(Value::Number(2.0)));
        assert_eq!(call("math", "round", &[Value::Number(3.5)]), Ok(Value::Number(4.0)));
        assert_eq!(call("math", "round", &[Value::Number(2.4)]), Ok(Value::Number(2.0)));
    }

    #[test]
    fn test_math_coerces_numeric_strings() {
        assert_eq!(call("math", "sqrt", &[Value::from("9")]), Ok(Value::Number(3.0)));
        assert!(call("math", "sqrt", &[Value::from("nine")]).is_err());
    }

    #[test]
    fn test_io_print_joins_with_spaces() {
        let mut console = Console::captured();
        let args = [
            Value::from("sum:"),
            Value::Number(3.0),
            Value::List(vec![Value::Number(1.0), Value::Number(2.0)]),
        ];
        io_print(&mut console, &args).unwrap();
        assert_eq!(console.output(), ["sum: 3 [1, 2]"]);
    }

    #[test]
    fn test_io_input_reads_queue_then_null() {
        let mut console = Console::with_input(["hello"]);
        assert_eq!(io_input(&mut console, &[]), Ok(Value::from("hello")));
        assert_eq!(io_input(&mut console, &[]), Ok(Value::Null));
    }

    #[test]
    fn test_builtin_arities() {
        let arity = |module, name| {
            builtin_module(module)
                .and_then(|fns| fns.iter().find(|b| b.name == name))
                .map(|b| b.arity)
        };
        assert_eq!(arity("io", "print"), Some(None));
        assert_eq!(arity("io", "input"), Some(Some(0)));
        assert_eq!(arity("math", "pow"), Some(Some(2)));
        assert_eq!(arity("math", "tan"), Some(Some(1)));
        assert_eq!(builtin_module("net"), None);
    }
}
