use crate::error::{ParseError, ParseResult};
use crate::lexer::{lex, Lexer, SpannedToken, Token, TokenSpan};
use crate::number::Number;
use crate::value::Value;
use std::iter::Peekable;
use std::str::CharIndices;

const HI_SURROGATE_MIN: u32 = 0xD800;
const HI_SURROGATE_MAX: u32 = 0xDBFF;
const LO_SURROGATE_MIN: u32 = 0xDC00;
const LO_SURROGATE_MAX: u32 = 0xDFFF;

/// Default limit on nested arrays/objects.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Knobs for [`Parser`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Reject anything but whitespace after the first complete value.
    pub require_end: bool,
    /// Deepest allowed nesting of arrays and objects.
    pub max_depth: usize,
}

impl ParseOptions {
    /// Options that reject trailing content.
    pub fn strict() -> Self {
        Self::default().require_end(true)
    }

    pub fn require_end(mut self, require_end: bool) -> Self {
        self.require_end = require_end;
        self
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            require_end: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Recursive-descent parser for JSON text
///
/// One method per grammar rule. Any failure aborts the whole parse; the
/// partially built tree is dropped before the error reaches the caller.
pub struct Parser<'src> {
    tokens: Peekable<Lexer<'src>>,
    options: ParseOptions,
    depth: usize,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str) -> Self {
        Self::with_options(source, ParseOptions::default())
    }

    pub fn with_options(source: &'src str, options: ParseOptions) -> Self {
        Self {
            tokens: lex(source).peekable(),
            options,
            depth: 0,
        }
    }

    /// Parse a complete document
    pub fn parse(mut self) -> ParseResult<Value> {
        let value = self.parse_value()?;

        if self.options.require_end {
            if let Some(next) = self.tokens.next() {
                let next = next?;
                return Err(ParseError::unexpected_token(
                    next.span,
                    "end of input",
                    next.token.to_string(),
                ));
            }
        }

        Ok(value)
    }

    fn parse_value(&mut self) -> ParseResult<Value> {
        let SpannedToken { token, span } = self.next_token("a value")?;
        match token {
            Token::Null => Ok(Value::Null),
            Token::True => Ok(Value::Bool(true)),
            Token::False => Ok(Value::Bool(false)),
            Token::String(raw) => Ok(Value::String(unescape(raw, span)?)),
            Token::Number(raw) => Number::parse(raw)
                .map(Value::Number)
                .ok_or_else(|| ParseError::invalid_syntax(span, "malformed number")),
            Token::LBracket => self.parse_array(span),
            Token::LBrace => self.parse_object(span),
            other => Err(ParseError::unexpected_token(span, "a value", other.to_string())),
        }
    }

    /// Parse the rest of an array after its `[`
    fn parse_array(&mut self, open: TokenSpan) -> ParseResult<Value> {
        self.enter(open)?;
        let mut elements = Vec::new();

        if !self.match_token(&Token::RBracket) {
            loop {
                elements.push(self.parse_value()?);
                if self.match_token(&Token::Comma) {
                    continue;
                }
                self.expect(&Token::RBracket, "',' or ']'")?;
                break;
            }
        }

        self.depth -= 1;
        Ok(Value::Array(elements))
    }

    /// Parse the rest of an object after its `{`
    fn parse_object(&mut self, open: TokenSpan) -> ParseResult<Value> {
        self.enter(open)?;
        let mut members = Vec::new();

        if !self.match_token(&Token::RBrace) {
            loop {
                let key = self.expect_key()?;
                self.expect(&Token::Colon, "':'")?;
                let value = self.parse_value()?;
                members.push((key, value));

                if self.match_token(&Token::Comma) {
                    continue;
                }
                self.expect(&Token::RBrace, "',' or '}'")?;
                break;
            }
        }

        self.depth -= 1;
        Ok(Value::Object(members))
    }

    fn expect_key(&mut self) -> ParseResult<String> {
        let SpannedToken { token, span } = self.next_token("a string key")?;
        match token {
            Token::String(raw) => unescape(raw, span),
            other => Err(ParseError::unexpected_token(
                span,
                "a string key",
                other.to_string(),
            )),
        }
    }

    fn enter(&mut self, open: TokenSpan) -> ParseResult<()> {
        self.depth += 1;
        if self.depth > self.options.max_depth {
            return Err(ParseError::NestingTooDeep {
                span: open,
                limit: self.options.max_depth,
            });
        }
        Ok(())
    }

    // Helper methods

    fn next_token(&mut self, expected: &str) -> ParseResult<SpannedToken<'src>> {
        match self.tokens.next() {
            Some(token) => Ok(token?),
            None => Err(ParseError::unexpected_eof(expected)),
        }
    }

    fn check(&mut self, token: &Token) -> bool {
        match self.tokens.peek() {
            Some(Ok(next)) => std::mem::discriminant(&next.token) == std::mem::discriminant(token),
            _ => false,
        }
    }

    fn match_token(&mut self, token: &Token) -> bool {
        if self.check(token) {
            self.tokens.next();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: &Token, expected: &str) -> ParseResult<()> {
        if self.match_token(token) {
            return Ok(());
        }
        match self.tokens.next() {
            Some(Ok(found)) => Err(ParseError::unexpected_token(
                found.span,
                expected,
                found.token.to_string(),
            )),
            Some(Err(error)) => Err(error.into()),
            None => Err(ParseError::unexpected_eof(expected)),
        }
    }
}

/// Decode the escapes in the raw contents of a string token.
///
/// `span` covers the token including its quotes and is only used to place
/// errors. Unknown escapes decode to the escaped character itself.
fn unescape(raw: &str, span: TokenSpan) -> ParseResult<String> {
    if !raw.contains('\\') {
        return Ok(raw.to_string());
    }

    let offset = span.start + 1;
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.char_indices();

    while let Some((i, c)) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let escape_span = TokenSpan::new(offset + i, offset + i + 2);
        let Some((_, escaped)) = chars.next() else {
            return Err(ParseError::invalid_syntax(escape_span, "dangling backslash"));
        };
        match escaped {
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'u' => {
                let escape_span = TokenSpan::new(offset + i, offset + i + 6);
                out.push(read_unicode_escape(&mut chars, escape_span)?);
            }
            other => out.push(other),
        }
    }

    Ok(out)
}

/// Decode the code point of a `\u` escape whose `\u` was just consumed,
/// pulling in the low half when it starts a surrogate pair.
fn read_unicode_escape(chars: &mut CharIndices<'_>, span: TokenSpan) -> ParseResult<char> {
    let high = read_hex4(chars, span)?;

    let code = match high {
        HI_SURROGATE_MIN..=HI_SURROGATE_MAX => {
            let pair_span = TokenSpan::new(span.start, span.end + 6);
            let backslash = chars.next().map(|(_, c)| c);
            let u = chars.next().map(|(_, c)| c);
            if backslash != Some('\\') || u != Some('u') {
                return Err(ParseError::invalid_syntax(span, "unpaired high surrogate"));
            }
            let low = read_hex4(chars, pair_span)?;
            if !(LO_SURROGATE_MIN..=LO_SURROGATE_MAX).contains(&low) {
                return Err(ParseError::invalid_syntax(pair_span, "invalid surrogate pair"));
            }
            0x10000 + ((high - HI_SURROGATE_MIN) << 10) + (low - LO_SURROGATE_MIN)
        }
        LO_SURROGATE_MIN..=LO_SURROGATE_MAX => {
            return Err(ParseError::invalid_syntax(span, "unpaired low surrogate"));
        }
        code => code,
    };

    char::from_u32(code).ok_or_else(|| ParseError::invalid_syntax(span, "invalid code point"))
}

fn read_hex4(chars: &mut CharIndices<'_>, span: TokenSpan) -> ParseResult<u32> {
    let mut code = 0;
    for _ in 0..4 {
        let digit = chars
            .next()
            .and_then(|(_, c)| c.to_digit(16))
            .ok_or_else(|| ParseError::invalid_syntax(span, "expected four hex digits"))?;
        code = (code << 4) | digit;
    }
    Ok(code)
}

/// Parse JSON text, ignoring anything after the first complete value
#[tracing::instrument(level = "trace", skip_all, fields(len = source.len()))]
pub fn parse(source: &str) -> ParseResult<Value> {
    Parser::new(source).parse()
}

/// Parse JSON text with explicit options
#[tracing::instrument(level = "trace", skip_all, fields(len = source.len()))]
pub fn parse_with(source: &str, options: ParseOptions) -> ParseResult<Value> {
    Parser::with_options(source, options).parse()
}

/// Parse a UTF-8 byte buffer, such as a response body
pub fn parse_bytes(bytes: &[u8]) -> ParseResult<Value> {
    parse_bytes_with(bytes, ParseOptions::default())
}

pub fn parse_bytes_with(bytes: &[u8], options: ParseOptions) -> ParseResult<Value> {
    let source = std::str::from_utf8(bytes).map_err(|e| {
        let start = e.valid_up_to();
        ParseError::LexError {
            span: TokenSpan::new(start, start + e.error_len().unwrap_or(1)),
            message: "invalid UTF-8".to_string(),
        }
    })?;
    parse_with(source, options)
}
