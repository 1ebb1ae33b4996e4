use std::fs;
use std::path::{Path, PathBuf};

use analyzer::{
    Binding, Diagnostic, Environment, TokenKind, Value, analyze_syntax, check_expr,
    format_diagnostics, lex,
};
use anyhow::Context as _;
use clap::Parser;
use evaluator::{EvalError, EvalResult, evaluate};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "calc", version, about = "Evaluate a typed arithmetic expression")]
struct Cli {
    /// Expression to evaluate, e.g. `3 + 4 * (2 - x)`.
    expr: String,

    /// Bind a name to a number. Repeatable; integers stay integers, anything else is a float.
    #[arg(long = "bind", value_name = "NAME=VALUE", value_parser = parse_binding)]
    bindings: Vec<Binding>,

    /// JSON file holding an array of `{"name": .., "value": {"Int": ..} | {"Float": ..}}`.
    #[arg(long, value_name = "FILE")]
    env: Option<PathBuf>,

    /// Print the parsed expression in canonical form before the result.
    #[arg(long)]
    ast: bool,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let env = build_env(&cli.bindings, cli.env.as_deref())?;
    let source = cli.expr.as_str();

    let syntax = analyze_syntax(source);
    if syntax.has_errors() {
        let count = syntax.diagnostics.len();
        eprint!("{}", format_diagnostics(source, syntax.diagnostics));
        anyhow::bail!("aborting due to {count} syntax error(s)");
    }

    if cli.ast {
        println!("{}", syntax.expr);
    }

    let result = check_expr(&syntax.expr, &env)
        .map_err(EvalError::from)
        .and_then(|checked| evaluate(&checked, &env));

    println!("{}", report(source, result)?);
    Ok(())
}

/// Formats a value as `VALUE : KIND`. An error is rendered to stderr once; the returned
/// error only says that evaluation stopped.
fn report(source: &str, result: EvalResult<Value>) -> anyhow::Result<String> {
    match result {
        Ok(value) => Ok(format!("{value} : {}", value.kind())),
        Err(err) => {
            eprint!("{}", render_error(source, &err));
            anyhow::bail!("aborting due to previous error");
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Command-line bindings are entered first, so they shadow same-named entries of the file.
fn build_env(bindings: &[Binding], env_file: Option<&Path>) -> anyhow::Result<Environment> {
    let mut env = Environment::new();
    for binding in bindings {
        enter(&mut env, binding.clone(), "--bind");
    }

    if let Some(path) = env_file {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read environment '{}'", path.display()))?;
        let from_file: Environment = serde_json::from_str(&text)
            .with_context(|| format!("parse environment '{}'", path.display()))?;
        for binding in from_file.iter() {
            enter(&mut env, binding.clone(), "environment file");
        }
    }

    tracing::debug!(bindings = env.len(), "environment ready");
    Ok(env)
}

fn enter(env: &mut Environment, binding: Binding, origin: &str) {
    let name = binding.name.clone();
    if !env.insert(binding.name, binding.value) {
        tracing::warn!(%name, origin, "name already bound, keeping the first binding");
    }
}

fn parse_binding(arg: &str) -> Result<Binding, String> {
    let (name, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got `{arg}`"))?;
    let name = name.trim();
    let value = value.trim();

    let tokens = lex(name).tokens;
    if !matches!(
        tokens.iter().map(|t| &t.kind).collect::<Vec<_>>().as_slice(),
        [TokenKind::Ident(_), TokenKind::Eof]
    ) {
        return Err(format!("`{name}` is not a valid name"));
    }

    let value = if let Ok(v) = value.parse::<i64>() {
        Value::Int(v)
    } else if let Ok(v) = value.parse::<f64>() {
        Value::Float(v)
    } else {
        return Err(format!("`{value}` is not a number"));
    };

    Ok(Binding {
        name: name.to_string(),
        value,
    })
}

fn render_error(source: &str, err: &EvalError) -> String {
    format_diagnostics(source, vec![Diagnostic::from(err)])
}
