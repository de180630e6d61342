//! Statement model for Gemfile manifests.

use crate::error::{GemfileError, Result};
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

// Bare Ruby symbols: identifiers with an optional predicate/bang/setter suffix
static SYMBOL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*[?!=]?$").expect("Invalid regex"));

// Keyword option keys (`require:`, `platforms:`)
static KEYWORD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("Invalid regex"));

/// A source value, group name or platform name.
///
/// Strings render double-quoted, symbols render with a leading `:`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Token {
    /// `"https://rubygems.org"`
    String(String),
    /// `:rubygems`
    Symbol(String),
}

impl Token {
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Symbol(name.into())
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::String(s) | Self::Symbol(s) => s,
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        match self {
            Self::String(_) => Ok(()),
            Self::Symbol(name) if SYMBOL_PATTERN.is_match(name) => Ok(()),
            Self::Symbol(name) => Err(GemfileError::invalid_argument(format!(
                "'{name}' cannot be rendered as a bare symbol"
            ))),
        }
    }
}

impl From<&str> for Token {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Token {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

/// Argument value of a `gem` line, a keyword option or a block header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Token(Token),
    Bool(bool),
    List(Vec<Value>),
    /// Ruby expression rendered verbatim (`ENV["RAILS_VERSION"]`, `-> { ... }`)
    Raw(String),
}

impl Value {
    pub fn string(value: impl Into<String>) -> Self {
        Self::Token(Token::String(value.into()))
    }

    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Token(Token::Symbol(name.into()))
    }

    pub fn raw(expression: impl Into<String>) -> Self {
        Self::Raw(expression.into())
    }

    pub(crate) fn validate(&self) -> Result<()> {
        match self {
            Self::Token(token) => token.validate(),
            Self::Bool(_) => Ok(()),
            Self::List(items) => items.iter().try_for_each(Self::validate),
            Self::Raw(expr) if expr.trim().is_empty() => Err(GemfileError::invalid_argument(
                "raw expression must not be empty",
            )),
            Self::Raw(expr) if expr.contains(['\n', '\r']) => Err(
                GemfileError::invalid_argument(format!("raw expression '{expr}' spans lines")),
            ),
            Self::Raw(_) => Ok(()),
        }
    }
}

impl From<Token> for Value {
    fn from(token: Token) -> Self {
        Self::Token(token)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::string(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// One argument after the gem name: a version requirement or `key: value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum GemArg {
    Positional(Value),
    Keyword { key: String, value: Value },
}

impl GemArg {
    /// Version requirement such as `"~> 7.0"`.
    pub fn requirement(requirement: impl Into<String>) -> Self {
        Self::Positional(Value::string(requirement))
    }

    pub fn keyword(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Keyword {
            key: key.into(),
            value: value.into(),
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        match self {
            Self::Positional(value) => value.validate(),
            Self::Keyword { key, value } => {
                if !KEYWORD_PATTERN.is_match(key) {
                    return Err(GemfileError::invalid_argument(format!(
                        "'{key}' is not a valid option key"
                    )));
                }
                value.validate()
            }
        }
    }

    pub(crate) fn is_keyword(&self) -> bool {
        matches!(self, Self::Keyword { .. })
    }
}

impl From<Value> for GemArg {
    fn from(value: Value) -> Self {
        Self::Positional(value)
    }
}

/// Tag of a scoped block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Group,
    Platforms,
    Git,
    Path,
    Source,
    InstallIf,
}

impl BlockKind {
    /// Keyword that opens the block in rendered text.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Group => "group",
            Self::Platforms => "platforms",
            Self::Git => "git",
            Self::Path => "path",
            Self::Source => "source",
            Self::InstallIf => "install_if",
        }
    }
}

/// A scoped block and the statements declared inside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    pub kind: BlockKind,
    pub args: Vec<GemArg>,
    pub statements: Vec<Statement>,
}

/// One declarative entry of a Gemfile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Statement {
    Source { value: Token },
    Ruby { version: Token },
    Gem { name: String, args: Vec<GemArg> },
    Gemspec { options: Vec<GemArg> },
    Block(Block),
}
