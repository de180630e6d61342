//! Append-only Gemfile builder.
//!
//! [`Gemfile`] records declarations in call order and renders them on demand.
//! Scoped blocks (`group`, `platforms`, `git`, ...) run a caller-supplied body
//! against a child builder and append the child's statements as one block.

use crate::diagnostics::{DiagnosticSink, TracingSink};
use crate::error::{GemfileError, Result};
use crate::formatter;
use crate::types::{Block, BlockKind, GemArg, Statement, Token, Value};
use std::fmt;
use std::sync::Arc;

/// In-memory Gemfile.
///
/// # Examples
///
/// ```
/// use gemfile_dsl::{Gemfile, Token};
///
/// let mut gemfile = Gemfile::new();
/// gemfile.source("https://rubygems.org")?;
/// gemfile.group([Token::symbol("development"), Token::symbol("test")], |group| {
///     group.gem("rspec")?;
///     Ok(())
/// })?;
///
/// assert_eq!(
///     gemfile.render(),
///     "source \"https://rubygems.org\"\ngroup :development, :test do\n  gem \"rspec\"\nend"
/// );
/// # Ok::<(), gemfile_dsl::GemfileError>(())
/// ```
#[derive(Clone)]
pub struct Gemfile {
    statements: Vec<Statement>,
    sink: Arc<dyn DiagnosticSink>,
}

impl Gemfile {
    /// Creates an empty Gemfile reporting warnings through `tracing`.
    pub fn new() -> Self {
        Self::with_sink(Arc::new(TracingSink))
    }

    /// Creates an empty Gemfile reporting warnings to `sink`.
    pub fn with_sink(sink: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            statements: Vec::new(),
            sink,
        }
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// Number of top-level statements.
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Appends `source "..."` or `source :name`.
    pub fn source(&mut self, value: impl Into<Token>) -> Result<&mut Self> {
        let value = value.into();
        value.validate()?;
        self.push(Statement::Source { value })
    }

    /// Appends `ruby "<version>"`.
    pub fn ruby(&mut self, version: impl Into<Token>) -> Result<&mut Self> {
        let version = version.into();
        version.validate()?;
        self.push(Statement::Ruby { version })
    }

    /// Appends `gem "<name>"` without requirements or options.
    pub fn gem(&mut self, name: &str) -> Result<&mut Self> {
        self.gem_with(name, Vec::new())
    }

    /// Appends `gem "<name>", <args>...`.
    ///
    /// Positional arguments (version requirements) must precede keyword
    /// options.
    pub fn gem_with(
        &mut self,
        name: &str,
        args: impl IntoIterator<Item = GemArg>,
    ) -> Result<&mut Self> {
        if name.trim().is_empty() {
            return Err(GemfileError::invalid_argument("gem name must not be empty"));
        }
        let args: Vec<GemArg> = args.into_iter().collect();
        validate_args(&args)?;
        self.push(Statement::Gem {
            name: name.to_string(),
            args,
        })
    }

    /// Appends a bare `gemspec`.
    pub fn gemspec(&mut self) -> Result<&mut Self> {
        self.gemspec_with(Vec::new())
    }

    /// Appends `gemspec` with keyword options such as `path: "../"`.
    pub fn gemspec_with(&mut self, options: impl IntoIterator<Item = GemArg>) -> Result<&mut Self> {
        let options: Vec<GemArg> = options.into_iter().collect();
        if let Some(arg) = options.iter().find(|arg| !arg.is_keyword()) {
            return Err(GemfileError::invalid_argument(format!(
                "gemspec accepts only keyword options, got '{arg}'"
            )));
        }
        validate_args(&options)?;
        self.push(Statement::Gemspec { options })
    }

    /// Appends a `group <names> do ... end` block built by `body`.
    pub fn group<I, T, F>(&mut self, names: I, body: F) -> Result<&mut Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<Token>,
        F: FnOnce(&mut Gemfile) -> Result<()>,
    {
        self.block(BlockKind::Group, name_args(names), body)
    }

    /// Same as [`Gemfile::group`], plus a deprecation warning on the sink.
    #[deprecated(note = "use `group` instead")]
    pub fn groups<I, T, F>(&mut self, names: I, body: F) -> Result<&mut Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<Token>,
        F: FnOnce(&mut Gemfile) -> Result<()>,
    {
        self.warn_deprecated("groups", "group");
        self.group(names, body)
    }

    /// Appends a `platforms <names> do ... end` block built by `body`.
    pub fn platforms<I, T, F>(&mut self, names: I, body: F) -> Result<&mut Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<Token>,
        F: FnOnce(&mut Gemfile) -> Result<()>,
    {
        self.block(BlockKind::Platforms, name_args(names), body)
    }

    /// Singular spelling of [`Gemfile::platforms`]; renders identically.
    pub fn platform<I, T, F>(&mut self, names: I, body: F) -> Result<&mut Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<Token>,
        F: FnOnce(&mut Gemfile) -> Result<()>,
    {
        self.platforms(names, body)
    }

    /// Appends `git "<url>", <options> do ... end`.
    pub fn git<F>(
        &mut self,
        url: &str,
        options: impl IntoIterator<Item = GemArg>,
        body: F,
    ) -> Result<&mut Self>
    where
        F: FnOnce(&mut Gemfile) -> Result<()>,
    {
        let args = located_args(url, options);
        self.block(BlockKind::Git, args, body)
    }

    /// Appends `path "<dir>", <options> do ... end`.
    pub fn path<F>(
        &mut self,
        dir: &str,
        options: impl IntoIterator<Item = GemArg>,
        body: F,
    ) -> Result<&mut Self>
    where
        F: FnOnce(&mut Gemfile) -> Result<()>,
    {
        let args = located_args(dir, options);
        self.block(BlockKind::Path, args, body)
    }

    /// Appends `source "<url>" do ... end`, scoping gems to that source.
    pub fn source_block<F>(&mut self, value: impl Into<Token>, body: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut Gemfile) -> Result<()>,
    {
        let args = vec![GemArg::Positional(Value::Token(value.into()))];
        self.block(BlockKind::Source, args, body)
    }

    /// Appends `install_if <condition> do ... end`.
    ///
    /// `condition` is a Ruby expression and is rendered verbatim.
    pub fn install_if<F>(&mut self, condition: &str, body: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut Gemfile) -> Result<()>,
    {
        let args = vec![GemArg::Positional(Value::raw(condition))];
        self.block(BlockKind::InstallIf, args, body)
    }

    /// Renders the canonical Gemfile text. Never ends with a newline.
    pub fn render(&self) -> String {
        formatter::render(&self.statements)
    }

    /// Pretty-printed JSON view of the statement tree.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.statements)?)
    }

    /// Empty builder sharing this builder's sink.
    pub(crate) fn child(&self) -> Self {
        Self::with_sink(Arc::clone(&self.sink))
    }

    /// Appends a block whose body was built separately.
    pub(crate) fn append_block(
        &mut self,
        kind: BlockKind,
        args: Vec<GemArg>,
        body: Self,
    ) -> Result<&mut Self> {
        validate_block_header(kind, &args)?;
        self.push(Statement::Block(Block {
            kind,
            args,
            statements: body.statements,
        }))
    }

    pub(crate) fn warn_deprecated(&self, name: &str, replacement: &str) {
        self.sink.warn(&format!(
            "`{name}` is deprecated and will be removed in a future release, use `{replacement}` instead"
        ));
    }

    fn block<F>(&mut self, kind: BlockKind, args: Vec<GemArg>, body: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut Gemfile) -> Result<()>,
    {
        validate_block_header(kind, &args)?;
        let mut child = self.child();
        body(&mut child)?;
        self.append_block(kind, args, child)
    }

    fn push(&mut self, statement: Statement) -> Result<&mut Self> {
        self.statements.push(statement);
        Ok(self)
    }
}

impl Default for Gemfile {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Gemfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gemfile")
            .field("statements", &self.statements)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Gemfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

fn name_args<I, T>(names: I) -> Vec<GemArg>
where
    I: IntoIterator<Item = T>,
    T: Into<Token>,
{
    names
        .into_iter()
        .map(|name| GemArg::Positional(Value::Token(name.into())))
        .collect()
}

fn located_args(location: &str, options: impl IntoIterator<Item = GemArg>) -> Vec<GemArg> {
    std::iter::once(GemArg::Positional(Value::string(location)))
        .chain(options)
        .collect()
}

fn validate_args(args: &[GemArg]) -> Result<()> {
    let mut seen_keyword = false;
    for arg in args {
        arg.validate()?;
        if arg.is_keyword() {
            seen_keyword = true;
        } else if seen_keyword {
            return Err(GemfileError::invalid_argument(format!(
                "positional argument '{arg}' follows keyword options"
            )));
        }
    }
    Ok(())
}

/// Checks the header of a block before its body is built.
pub(crate) fn validate_block_header(kind: BlockKind, args: &[GemArg]) -> Result<()> {
    validate_args(args)?;
    let positional: Vec<&GemArg> = args.iter().filter(|arg| !arg.is_keyword()).collect();
    let tag = kind.tag();

    match kind {
        BlockKind::Group | BlockKind::Platforms => {
            if positional.is_empty() {
                return Err(GemfileError::invalid_argument(format!(
                    "{tag} requires at least one name"
                )));
            }
            if let Some(arg) = positional
                .iter()
                .find(|arg| !matches!(arg, GemArg::Positional(Value::Token(_))))
            {
                return Err(GemfileError::invalid_argument(format!(
                    "{tag} names must be strings or symbols, got '{arg}'"
                )));
            }
        }
        BlockKind::Git | BlockKind::Path | BlockKind::Source | BlockKind::InstallIf => {
            if positional.len() != 1 {
                return Err(GemfileError::invalid_argument(format!(
                    "{tag} requires exactly one argument, got {}",
                    positional.len()
                )));
            }
            if let GemArg::Positional(Value::Token(Token::String(location))) = positional[0]
                && location.trim().is_empty()
            {
                return Err(GemfileError::invalid_argument(format!(
                    "{tag} location must not be empty"
                )));
            }
        }
    }
    Ok(())
}
