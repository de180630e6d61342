//! Canonical Gemfile text rendering.
//!
//! Each statement renders to one line, blocks render an opening `... do`
//! line, their nested statements indented two spaces per level, and a closing
//! `end`. Lines are joined with `\n` and the document never ends with a
//! newline.

use crate::types::{Block, GemArg, Statement, Token, Value};
use std::fmt::{self, Write as _};

const INDENT: &str = "  ";

/// Renders statements in order as Gemfile text.
pub fn render(statements: &[Statement]) -> String {
    let mut lines = Vec::new();
    for statement in statements {
        push_lines(statement, 0, &mut lines);
    }
    lines.join("\n")
}

fn push_lines(statement: &Statement, depth: usize, lines: &mut Vec<String>) {
    let indent = INDENT.repeat(depth);
    match statement {
        Statement::Source { value } => lines.push(format!("{indent}source {value}")),
        Statement::Ruby { version } => lines.push(format!("{indent}ruby {version}")),
        Statement::Gem { name, args } => {
            let mut line = format!("{indent}gem {}", Token::String(name.clone()));
            for arg in args {
                line.push_str(", ");
                line.push_str(&arg.to_string());
            }
            lines.push(line);
        }
        Statement::Gemspec { options } if options.is_empty() => {
            lines.push(format!("{indent}gemspec"));
        }
        Statement::Gemspec { options } => {
            lines.push(format!("{indent}gemspec {}", join_args(options)));
        }
        Statement::Block(block) => push_block(block, depth, lines),
    }
}

fn push_block(block: &Block, depth: usize, lines: &mut Vec<String>) {
    let indent = INDENT.repeat(depth);
    lines.push(format!(
        "{indent}{} {} do",
        block.kind.tag(),
        join_args(&block.args)
    ));
    for statement in &block.statements {
        push_lines(statement, depth + 1, lines);
    }
    lines.push(format!("{indent}end"));
}

fn join_args(args: &[GemArg]) -> String {
    args.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Quotes a string the way Ruby's `String#inspect` does.
fn write_quoted(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    f.write_char('"')?;
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            '\u{1b}' => f.write_str("\\e")?,
            '#' if matches!(chars.peek(), Some('{' | '$' | '@')) => f.write_str("\\#")?,
            c if c.is_control() => write!(f, "\\u{:04X}", c as u32)?,
            c => f.write_char(c)?,
        }
    }
    f.write_char('"')
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(value) => write_quoted(f, value),
            Self::Symbol(name) => write!(f, ":{name}"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Token(token) => write!(f, "{token}"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::List(items) => {
                f.write_char('[')?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_char(']')
            }
            Self::Raw(expr) => f.write_str(expr.trim()),
        }
    }
}

impl fmt::Display for GemArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Positional(value) => write!(f, "{value}"),
            Self::Keyword { key, value } => write!(f, "{key}: {value}"),
        }
    }
}
