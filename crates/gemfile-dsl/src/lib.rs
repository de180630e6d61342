//! In-memory builder and renderer for Bundler Gemfiles.
//!
//! This crate records Gemfile declarations in call order and renders them as
//! canonical Gemfile text.
//!
//! # Features
//!
//! - `source`, `ruby`, `gem` and `gemspec` statements
//! - Scoped `group`, `platforms`, `git`, `path`, `source` and `install_if` blocks
//! - Deterministic rendering with no trailing newline
//! - Deprecation warnings routed to an injectable [`DiagnosticSink`]
//! - Loading existing Gemfile text back into a builder
//!
//! # Examples
//!
//! ```
//! use gemfile_dsl::{Gemfile, Token};
//!
//! let mut gemfile = Gemfile::new();
//! gemfile.source(Token::symbol("rubygems"))?;
//! gemfile.platforms([Token::symbol("jruby")], |block| {
//!     block.gem("jruby-openssl")?;
//!     Ok(())
//! })?;
//!
//! assert_eq!(
//!     gemfile.render(),
//!     "source :rubygems\nplatforms :jruby do\n  gem \"jruby-openssl\"\nend"
//! );
//! # Ok::<(), gemfile_dsl::GemfileError>(())
//! ```

pub mod diagnostics;
pub mod error;
pub mod formatter;
pub mod manifest;
pub mod parser;
pub mod types;

// Re-export commonly used types
pub use diagnostics::{CaptureSink, DiagnosticSink, StderrSink, TracingSink};
pub use error::{GemfileError, Result};
pub use manifest::Gemfile;
pub use parser::{load_file, parse_gemfile, parse_gemfile_with_sink};
pub use types::{Block, BlockKind, GemArg, Statement, Token, Value};
