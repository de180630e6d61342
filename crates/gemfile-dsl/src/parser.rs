//! Loads existing Gemfile text into a [`Gemfile`] builder.
//!
//! Uses regex-based line parsing. Every recognized line is replayed through
//! the builder's append operations, so loaded files are validated exactly like
//! files built in code. Block keywords open a child builder that is appended
//! to its parent on the matching `end`.

use crate::diagnostics::{DiagnosticSink, TracingSink};
use crate::error::{GemfileError, Result};
use crate::manifest::{Gemfile, validate_block_header};
use crate::types::{BlockKind, GemArg, Token, Value};
use regex::Regex;
use std::iter::Peekable;
use std::path::Path;
use std::str::Chars;
use std::sync::{Arc, LazyLock};

// Patterns run against trimmed lines with trailing comments removed
static BLOCK_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(group|groups|platforms|platform|git|path|source|install_if)\b\s*(.+?)\s+do$")
        .expect("Invalid regex")
});

static BLOCK_END: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^end$").expect("Invalid regex"));

static SOURCE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^source\b\s*(.+)$").expect("Invalid regex"));

static RUBY_VERSION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ruby\b\s*(.+)$").expect("Invalid regex"));

static GEMSPEC_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^gemspec\b\s*(.*)$").expect("Invalid regex"));

static GEM_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^gem\b\s*(.+)$").expect("Invalid regex"));

static KEYWORD_OPTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*):\s+(.+)$").expect("Invalid regex"));

static HASH_ROCKET_OPTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^:([A-Za-z_][A-Za-z0-9_]*)\s*=>\s*(.+)$").expect("Invalid regex")
});

static SYMBOL_LITERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^:([A-Za-z_][A-Za-z0-9_]*[?!=]?)$").expect("Invalid regex"));

/// Block opened on `line` whose statements are still being collected.
struct Frame {
    kind: BlockKind,
    args: Vec<GemArg>,
    line: usize,
    body: Gemfile,
}

/// Parses Gemfile text, reporting warnings through `tracing`.
pub fn parse_gemfile(content: &str) -> Result<Gemfile> {
    parse_gemfile_with_sink(content, Arc::new(TracingSink))
}

/// Parses Gemfile text, reporting warnings (such as `groups` usage) to `sink`.
pub fn parse_gemfile_with_sink(content: &str, sink: Arc<dyn DiagnosticSink>) -> Result<Gemfile> {
    let mut root = Gemfile::with_sink(sink);
    let mut frames: Vec<Frame> = Vec::new();

    for (line_no, text) in logical_lines(content)? {
        let line = text.as_str();
        let current = frames.last_mut().map_or(&mut root, |frame| &mut frame.body);

        if let Some(caps) = BLOCK_START.captures(line) {
            let keyword = &caps[1];
            let (kind, args) = parse_block_header(keyword, &caps[2]);
            if keyword == "groups" {
                current.warn_deprecated("groups", "group");
            }
            validate_block_header(kind, &args).map_err(|e| e.at_line(line_no))?;
            let body = current.child();
            frames.push(Frame {
                kind,
                args,
                line: line_no,
                body,
            });
            continue;
        }

        if BLOCK_END.is_match(line) {
            let frame = frames
                .pop()
                .ok_or_else(|| GemfileError::parse_error(line_no, "unmatched `end`"))?;
            let parent = frames.last_mut().map_or(&mut root, |frame| &mut frame.body);
            parent
                .append_block(frame.kind, frame.args, frame.body)
                .map_err(|e| e.at_line(frame.line))?;
            continue;
        }

        if let Some(caps) = GEM_PATTERN.captures(line) {
            let mut args = split_args(strip_parens(&caps[1])).into_iter();
            let name = match args.next().map(parse_value) {
                Some(Value::Token(Token::String(name))) => name,
                _ => {
                    return Err(GemfileError::parse_error(
                        line_no,
                        "gem name must be a string literal",
                    ));
                }
            };
            let args: Vec<GemArg> = args.map(parse_arg).collect();
            current
                .gem_with(&name, args)
                .map_err(|e| e.at_line(line_no))?;
            continue;
        }

        if let Some(caps) = SOURCE_PATTERN.captures(line) {
            let value = single_token(&caps[1], "source", line_no)?;
            current.source(value).map_err(|e| e.at_line(line_no))?;
            continue;
        }

        if let Some(caps) = RUBY_VERSION_PATTERN.captures(line) {
            let version = single_token(&caps[1], "ruby", line_no)?;
            current.ruby(version).map_err(|e| e.at_line(line_no))?;
            continue;
        }

        if let Some(caps) = GEMSPEC_PATTERN.captures(line) {
            let options: Vec<GemArg> = split_args(strip_parens(&caps[1]))
                .into_iter()
                .map(parse_arg)
                .collect();
            current
                .gemspec_with(options)
                .map_err(|e| e.at_line(line_no))?;
            continue;
        }

        return Err(GemfileError::parse_error(
            line_no,
            format!("unsupported statement '{line}'"),
        ));
    }

    if let Some(frame) = frames.last() {
        return Err(GemfileError::parse_error(
            frame.line,
            format!("unclosed `{}` block", frame.kind.tag()),
        ));
    }

    tracing::debug!("Loaded Gemfile with {} top-level statements", root.len());
    Ok(root)
}

/// Reads and parses the Gemfile at `path`.
pub fn load_file(path: &Path, sink: Arc<dyn DiagnosticSink>) -> Result<Gemfile> {
    tracing::debug!("Loading Gemfile from {}", path.display());
    let content = std::fs::read_to_string(path)?;
    parse_gemfile_with_sink(&content, sink)
}

/// Joins statements continued over several lines (a trailing comma) into
/// one line, numbered by the line they start on. Blank and comment-only lines
/// are dropped.
fn logical_lines(content: &str) -> Result<Vec<(usize, String)>> {
    let mut lines = Vec::new();
    let mut pending: Option<(usize, String)> = None;

    for (line_idx, raw_line) in content.lines().enumerate() {
        let line = strip_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }
        let (line_no, joined) = match pending.take() {
            Some((start, mut text)) => {
                text.push(' ');
                text.push_str(line);
                (start, text)
            }
            None => (line_idx + 1, line.to_string()),
        };
        if joined.ends_with(',') {
            pending = Some((line_no, joined));
            continue;
        }
        lines.push((line_no, joined));
    }

    if let Some((line_no, _)) = pending {
        return Err(GemfileError::parse_error(
            line_no,
            "statement continues past the end of the file",
        ));
    }
    Ok(lines)
}

fn parse_block_header(keyword: &str, text: &str) -> (BlockKind, Vec<GemArg>) {
    let kind = match keyword {
        "group" | "groups" => BlockKind::Group,
        "platforms" | "platform" => BlockKind::Platforms,
        "git" => BlockKind::Git,
        "path" => BlockKind::Path,
        "source" => BlockKind::Source,
        _ => BlockKind::InstallIf,
    };
    let text = strip_parens(text);
    let args = if kind == BlockKind::InstallIf {
        vec![GemArg::Positional(Value::raw(text))]
    } else {
        split_args(text).into_iter().map(parse_arg).collect()
    };
    (kind, args)
}

fn single_token(text: &str, keyword: &str, line_no: usize) -> Result<Token> {
    let mut args = split_args(strip_parens(text));
    match (args.len(), args.pop().map(parse_value)) {
        (1, Some(Value::Token(token))) => Ok(token),
        _ => Err(GemfileError::parse_error(
            line_no,
            format!("{keyword} expects a single string or symbol"),
        )),
    }
}

fn parse_arg(text: &str) -> GemArg {
    if let Some(caps) = KEYWORD_OPTION
        .captures(text)
        .or_else(|| HASH_ROCKET_OPTION.captures(text))
    {
        return GemArg::Keyword {
            key: caps[1].to_string(),
            value: parse_value(&caps[2]),
        };
    }
    GemArg::Positional(parse_value(text))
}

fn parse_value(text: &str) -> Value {
    let text = text.trim();

    if let Some(value) = parse_string_literal(text) {
        return value;
    }

    if let Some(caps) = SYMBOL_LITERAL.captures(text) {
        return Value::symbol(&caps[1]);
    }

    match text {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }

    if let Some(inner) = text.strip_prefix('[').and_then(|t| t.strip_suffix(']')) {
        let items = split_args(inner);
        if items.iter().all(|item| !item.is_empty()) {
            return Value::List(items.into_iter().map(parse_value).collect());
        }
    }

    Value::raw(text)
}

/// Decodes a whole-value string literal. Interpolated strings stay raw.
fn parse_string_literal(text: &str) -> Option<Value> {
    let quote = text.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let body = text.strip_prefix(quote)?.strip_suffix(quote)?;

    let mut decoded = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' if quote == '\'' => {
                let escaped = chars.next()?;
                if escaped != '\'' && escaped != '\\' {
                    decoded.push('\\');
                }
                decoded.push(escaped);
            }
            '\\' => decode_escape(&mut chars, &mut decoded)?,
            // Unescaped closing quote inside the body: not a single literal
            c if c == quote => return None,
            '#' if quote == '"' && matches!(chars.peek(), Some('{' | '@' | '$')) => {
                return Some(Value::raw(text));
            }
            c => decoded.push(c),
        }
    }
    Some(Value::string(decoded))
}

/// Decodes one double-quoted escape sequence following a backslash.
fn decode_escape(chars: &mut Peekable<Chars<'_>>, decoded: &mut String) -> Option<()> {
    let escaped = chars.next()?;
    match escaped {
        'n' => decoded.push('\n'),
        't' => decoded.push('\t'),
        'r' => decoded.push('\r'),
        'e' => decoded.push('\u{1b}'),
        'a' => decoded.push('\u{7}'),
        'b' => decoded.push('\u{8}'),
        'f' => decoded.push('\u{c}'),
        'v' => decoded.push('\u{b}'),
        's' => decoded.push(' '),
        'u' if chars.peek() == Some(&'{') => {
            chars.next();
            let mut count = 0;
            loop {
                while chars.next_if_eq(&' ').is_some() {}
                if chars.next_if_eq(&'}').is_some() {
                    break;
                }
                decoded.push(hex_char(&take_digits(chars, 16, 6))?);
                count += 1;
            }
            if count == 0 {
                return None;
            }
        }
        'u' => {
            let digits = take_digits(chars, 16, 4);
            if digits.len() != 4 {
                return None;
            }
            decoded.push(hex_char(&digits)?);
        }
        'x' => decoded.push(hex_char(&take_digits(chars, 16, 2))?),
        '0'..='7' => {
            let mut digits = escaped.to_string();
            digits.push_str(&take_digits(chars, 8, 2));
            decoded.push(char::from_u32(u32::from_str_radix(&digits, 8).ok()?)?);
        }
        other => decoded.push(other),
    }
    Some(())
}

fn take_digits(chars: &mut Peekable<Chars<'_>>, radix: u32, max: usize) -> String {
    let mut digits = String::new();
    while digits.len() < max {
        match chars.next_if(|c| c.is_digit(radix)) {
            Some(c) => digits.push(c),
            None => break,
        }
    }
    digits
}

fn hex_char(digits: &str) -> Option<char> {
    if digits.is_empty() {
        return None;
    }
    char::from_u32(u32::from_str_radix(digits, 16).ok()?)
}

/// Splits on top-level commas, outside quotes and brackets.
fn split_args(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut start = 0;

    for (i, c) in text.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(text[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }

    let tail = text[start..].trim();
    if !tail.is_empty() || !parts.is_empty() {
        parts.push(tail);
    }
    parts
}

fn strip_parens(text: &str) -> &str {
    let text = text.trim();
    text.strip_prefix('(')
        .and_then(|t| t.strip_suffix(')'))
        .map_or(text, str::trim)
}

/// Drops a trailing `# comment` that is outside string literals.
fn strip_comment(line: &str) -> &str {
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut prev = ' ';

    for (i, c) in line.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
        } else if c == '"' || c == '\'' {
            quote = Some(c);
        } else if c == '#' && prev.is_whitespace() {
            return &line[..i];
        }
        prev = c;
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::CaptureSink;
    use crate::types::Statement;

    #[test]
    fn test_parse_simple_gem() {
        let gemfile = parse_gemfile("source 'https://rubygems.org'\ngem 'rails'").unwrap();
        assert_eq!(gemfile.len(), 2);
        assert_eq!(
            gemfile.render(),
            "source \"https://rubygems.org\"\ngem \"rails\""
        );
    }

    #[test]
    fn test_parse_gem_with_version() {
        let gemfile = parse_gemfile("gem 'rails', '~> 7.0'").unwrap();
        match &gemfile.statements()[0] {
            Statement::Gem { name, args } => {
                assert_eq!(name, "rails");
                assert_eq!(args, &vec![GemArg::requirement("~> 7.0")]);
            }
            other => panic!("Expected Gem, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_keyword_options() {
        let gemfile = parse_gemfile(
            "gem 'tzinfo-data', platforms: [:mingw, :mswin], require: false",
        )
        .unwrap();
        assert_eq!(
            gemfile.render(),
            "gem \"tzinfo-data\", platforms: [:mingw, :mswin], require: false"
        );
    }

    #[test]
    fn test_parse_hash_rocket_options() {
        let gemfile = parse_gemfile("gem 'rails', :git => 'https://github.com/rails/rails.git'")
            .unwrap();
        assert_eq!(
            gemfile.render(),
            "gem \"rails\", git: \"https://github.com/rails/rails.git\""
        );
    }

    #[test]
    fn test_parse_symbol_source() {
        let gemfile = parse_gemfile("source :rubygems").unwrap();
        assert_eq!(gemfile.render(), "source :rubygems");
    }

    #[test]
    fn test_parse_group_block() {
        let content = r"source 'https://rubygems.org'

group :development, :test do
  gem 'rspec'
  gem 'pry'
end

gem 'rails'";
        let gemfile = parse_gemfile(content).unwrap();
        assert_eq!(gemfile.len(), 3);
        assert_eq!(
            gemfile.render(),
            "source \"https://rubygems.org\"\ngroup :development, :test do\n  gem \"rspec\"\n  gem \"pry\"\nend\ngem \"rails\""
        );
    }

    #[test]
    fn test_parse_groups_alias_warns() {
        let sink = Arc::new(CaptureSink::new());
        let content = "groups :development, :test do\n  gem 'one'\nend";
        let gemfile = parse_gemfile_with_sink(content, sink.clone()).unwrap();
        assert_eq!(
            gemfile.render(),
            "group :development, :test do\n  gem \"one\"\nend"
        );
        assert_eq!(sink.messages().len(), 1);
        assert!(sink.messages()[0].contains("deprecated"));
    }

    #[test]
    fn test_parse_platform_spellings() {
        let singular = parse_gemfile("platform :jruby do\n  gem 'one'\nend").unwrap();
        let plural = parse_gemfile("platforms :jruby do\n  gem 'one'\nend").unwrap();
        assert_eq!(singular.render(), "platforms :jruby do\n  gem \"one\"\nend");
        assert_eq!(singular.render(), plural.render());
    }

    #[test]
    fn test_parse_nested_blocks() {
        let content = "group :test do\n  platforms :jruby do\n    gem 'one'\n  end\nend";
        let gemfile = parse_gemfile(content).unwrap();
        assert_eq!(gemfile.len(), 1);
        assert_eq!(gemfile.render(), content.replace("'one'", "\"one\""));
    }

    #[test]
    fn test_parse_install_if() {
        let content = "install_if -> { RUBY_PLATFORM =~ /darwin/ } do\n  gem 'pasteboard'\nend";
        let gemfile = parse_gemfile(content).unwrap();
        assert_eq!(
            gemfile.render(),
            "install_if -> { RUBY_PLATFORM =~ /darwin/ } do\n  gem \"pasteboard\"\nend"
        );
    }

    #[test]
    fn test_parse_ruby_and_gemspec() {
        let gemfile = parse_gemfile("ruby '3.2.2'\ngemspec path: '../'\ngemspec").unwrap();
        assert_eq!(
            gemfile.render(),
            "ruby \"3.2.2\"\ngemspec path: \"../\"\ngemspec"
        );
    }

    #[test]
    fn test_parse_parenthesized_calls() {
        let gemfile = parse_gemfile("gem('rails', '7.0')\ngroup(:test) do\nend").unwrap();
        assert_eq!(
            gemfile.render(),
            "gem \"rails\", \"7.0\"\ngroup :test do\nend"
        );
    }

    #[test]
    fn test_gemfile_with_comments() {
        let content = "source 'https://rubygems.org'\n# This is a comment\ngem 'rails' # web\n# gem 'disabled'";
        let gemfile = parse_gemfile(content).unwrap();
        assert_eq!(
            gemfile.render(),
            "source \"https://rubygems.org\"\ngem \"rails\""
        );
    }

    #[test]
    fn test_hash_inside_string_is_not_a_comment() {
        let gemfile = parse_gemfile("gem 'sharp', git: 'https://example.com/#main'").unwrap();
        assert_eq!(
            gemfile.render(),
            "gem \"sharp\", git: \"https://example.com/#main\""
        );
    }

    #[test]
    fn test_raw_expressions_are_kept() {
        let gemfile = parse_gemfile("gem 'rails', ENV.fetch('RAILS_VERSION', '7.0')").unwrap();
        assert_eq!(
            gemfile.render(),
            "gem \"rails\", ENV.fetch('RAILS_VERSION', '7.0')"
        );
    }

    #[test]
    fn test_interpolated_string_is_raw() {
        assert_eq!(parse_value("\"#{x}\""), Value::raw("\"#{x}\""));
    }

    #[test]
    fn test_empty_gemfile() {
        let gemfile = parse_gemfile("").unwrap();
        assert!(gemfile.is_empty());
        assert_eq!(gemfile.render(), "");
    }

    #[test]
    fn test_unmatched_end() {
        let err = parse_gemfile("gem 'rails'\nend").unwrap_err();
        assert!(matches!(err, GemfileError::ParseError { line: 2, .. }));
    }

    #[test]
    fn test_unclosed_block() {
        let err = parse_gemfile("gem 'rails'\ngroup :test do\n  gem 'rspec'").unwrap_err();
        match err {
            GemfileError::ParseError { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("group"));
            }
            other => panic!("Expected ParseError, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_group_names_rejected_with_line() {
        let err = parse_gemfile("gem 'a'\ngroup () do\nend").unwrap_err();
        assert!(matches!(err, GemfileError::ParseError { line: 2, .. }));
    }

    #[test]
    fn test_unsupported_statement() {
        let err = parse_gemfile("eval_gemfile 'other'").unwrap_err();
        assert!(err.to_string().contains("unsupported statement"));
    }

    #[test]
    fn test_gem_name_must_be_literal() {
        assert!(parse_gemfile("gem name").is_err());
    }

    #[test]
    fn test_split_args() {
        assert_eq!(split_args("'a', 'b'"), vec!["'a'", "'b'"]);
        assert_eq!(
            split_args("'a', platforms: [:x, :y]"),
            vec!["'a'", "platforms: [:x, :y]"]
        );
        assert_eq!(split_args("'a,b', c"), vec!["'a,b'", "c"]);
        assert!(split_args("").is_empty());
        assert!(split_args("  ").is_empty());
    }

    #[test]
    fn test_parse_value_literals() {
        assert_eq!(parse_value("'one'"), Value::string("one"));
        assert_eq!(parse_value("\"a\\\"b\""), Value::string("a\"b"));
        assert_eq!(parse_value("'it\\'s'"), Value::string("it's"));
        assert_eq!(parse_value(":one"), Value::symbol("one"));
        assert_eq!(parse_value("true"), Value::Bool(true));
        assert_eq!(
            parse_value("[:a, 'b']"),
            Value::List(vec![Value::symbol("a"), Value::string("b")])
        );
        assert_eq!(parse_value("'a' + 'b'"), Value::raw("'a' + 'b'"));
        assert_eq!(parse_value("'"), Value::raw("'"));
    }

    #[test]
    fn test_strip_comment() {
        assert_eq!(strip_comment("gem 'a' # note"), "gem 'a' ");
        assert_eq!(strip_comment("# whole line"), "");
        assert_eq!(strip_comment("gem 'a#b'"), "gem 'a#b'");
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Gemfile");
        std::fs::write(&path, "source 'https://rubygems.org'\ngem 'rack'\n").unwrap();

        let gemfile = load_file(&path, Arc::new(TracingSink)).unwrap();
        assert_eq!(
            gemfile.render(),
            "source \"https://rubygems.org\"\ngem \"rack\""
        );
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_file(&dir.path().join("Gemfile"), Arc::new(TracingSink)).unwrap_err();
        assert!(matches!(err, GemfileError::Io(_)));
    }

    #[test]
    fn test_decode_double_quoted_escapes() {
        assert_eq!(parse_value(r#""caf\u00e9""#), Value::string("café"));
        assert_eq!(parse_value(r#""\u{63 61}""#), Value::string("ca"));
        assert_eq!(parse_value(r#""\x41\101""#), Value::string("AA"));
        assert_eq!(parse_value(r#""a\0b""#), Value::string("a\0b"));
        assert_eq!(
            parse_value(r#""\a\b\f\v\s""#),
            Value::string("\u{7}\u{8}\u{c}\u{b} ")
        );
        assert_eq!(parse_value(r#""\q\#""#), Value::string("q#"));
    }

    #[test]
    fn test_malformed_escape_is_raw() {
        assert_eq!(parse_value(r#""\u12""#), Value::raw(r#""\u12""#));
        assert_eq!(parse_value(r#""\u{}""#), Value::raw(r#""\u{}""#));
        assert_eq!(parse_value(r#""\xZ""#), Value::raw(r#""\xZ""#));
    }

    #[test]
    fn test_instance_and_global_interpolation_is_raw() {
        assert_eq!(parse_value(r##""#@name""##), Value::raw(r##""#@name""##));
        assert_eq!(parse_value(r##""#$gvar""##), Value::raw(r##""#$gvar""##));
        let gemfile = parse_gemfile(r##"gem "#@name""##).unwrap_err();
        assert!(matches!(gemfile, GemfileError::ParseError { line: 1, .. }));
        assert_eq!(parse_value(r##""#1""##), Value::string("#1"));
    }

    #[test]
    fn test_rendered_escapes_load_back_unchanged() {
        let mut original = Gemfile::new();
        original.source(Token::string("a\u{1}b")).unwrap();
        original.gem("café").unwrap();
        original
            .gem_with(
                "ünicode",
                [GemArg::requirement("tab\there \u{7f} \u{1b} \\ \" #{literal} #@x")],
            )
            .unwrap();

        let rendered = original.render();
        let reloaded = parse_gemfile(&rendered).unwrap();
        assert_eq!(reloaded.statements(), original.statements());
        assert_eq!(reloaded.render(), rendered);
    }

    #[test]
    fn test_statement_continued_over_lines() {
        let content = "gem 'rails', # web framework\n    '~> 7.0',\n    require: false\ngroup :development,\n      :test do\n  gem 'pg'\nend";
        let gemfile = parse_gemfile(content).unwrap();
        assert_eq!(gemfile.len(), 2);
        assert_eq!(
            gemfile.render(),
            "gem \"rails\", \"~> 7.0\", require: false\ngroup :development, :test do\n  gem \"pg\"\nend"
        );
    }

    #[test]
    fn test_continued_statement_errors_report_start_line() {
        let err = parse_gemfile("gem 'a'\n\ngem 'rails',\n  require: false,\n  '~> 7.0'").unwrap_err();
        assert!(matches!(err, GemfileError::ParseError { line: 3, .. }));

        let err = parse_gemfile("gem 'a'\ngem 'rails',").unwrap_err();
        match err {
            GemfileError::ParseError { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("end of the file"));
            }
            other => panic!("Expected ParseError, got {other:?}"),
        }
    }
}
