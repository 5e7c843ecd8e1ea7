//! Lexer for JSON text using logos
//!
//! Every byte at or below 0x20 counts as insignificant whitespace, which is
//! looser than RFC 8259 but matches what the SDK has always accepted.

use logos::Logos;
use std::fmt;
use std::ops::Range;

/// Token types for JSON text
#[derive(Logos, Debug, Clone, PartialEq, Eq, Hash)]
#[logos(skip r"[\x00-\x20]+")]
pub enum Token<'src> {
    // Literals
    #[token("null")]
    Null,
    #[token("true")]
    True,
    #[token("false")]
    False,

    /// Raw string contents, quotes stripped and escapes still encoded.
    #[regex(r#""([^"\\]|\\.)*""#, |lex| {
        let s = lex.slice();
        &s[1..s.len()-1]
    })]
    String(&'src str),

    #[regex(r"-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?", |lex| lex.slice())]
    Number(&'src str),

    // Punctuation
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Null => write!(f, "null"),
            Token::True => write!(f, "true"),
            Token::False => write!(f, "false"),
            Token::String(s) => write!(f, "string \"{}\"", s),
            Token::Number(n) => write!(f, "number {}", n),
            Token::LBracket => write!(f, "'['"),
            Token::RBracket => write!(f, "']'"),
            Token::LBrace => write!(f, "'{{'"),
            Token::RBrace => write!(f, "'}}'"),
            Token::Comma => write!(f, "','"),
            Token::Colon => write!(f, "':'"),
        }
    }
}

/// Byte range of a token in the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSpan {
    pub start: usize,
    pub end: usize,
}

impl TokenSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

impl From<Range<usize>> for TokenSpan {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

/// A token with its span
#[derive(Debug, Clone, PartialEq)]
pub struct SpannedToken<'src> {
    pub token: Token<'src>,
    pub span: TokenSpan,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LexError {
    pub span: TokenSpan,
    pub message: String,
}

/// Lazily lexes JSON text into spanned tokens.
///
/// Tokens are produced on demand, so content after the first complete value
/// is never looked at unless the parser asks for it.
pub struct Lexer<'src> {
    source: &'src str,
    inner: logos::SpannedIter<'src, Token<'src>>,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            inner: Token::lexer(source).spanned(),
        }
    }

    fn describe_error(&self, span: &Range<usize>) -> String {
        match self.source[span.start..].chars().next() {
            Some('"') => "unterminated string".to_string(),
            Some(c) if c.is_ascii_alphabetic() => "invalid literal".to_string(),
            Some('-' | '0'..='9') => "malformed number".to_string(),
            Some(c) => format!("unexpected character {:?}", c),
            None => "unexpected end of input".to_string(),
        }
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Result<SpannedToken<'src>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        let (result, span) = self.inner.next()?;
        Some(match result {
            Ok(token) => Ok(SpannedToken {
                token,
                span: span.into(),
            }),
            Err(()) => Err(LexError {
                message: self.describe_error(&span),
                span: span.into(),
            }),
        })
    }
}

/// Lex source text into tokens with spans
pub fn lex(source: &str) -> Lexer<'_> {
    Lexer::new(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lex_punctuation() {
        let tokens: Vec<_> = lex("[ ] { } , :").filter_map(|r| r.ok()).collect();

        assert_eq!(tokens.len(), 6);
        assert_eq!(tokens[0].token, Token::LBracket);
        assert_eq!(tokens[1].token, Token::RBracket);
        assert_eq!(tokens[2].token, Token::LBrace);
        assert_eq!(tokens[3].token, Token::RBrace);
        assert_eq!(tokens[4].token, Token::Comma);
        assert_eq!(tokens[5].token, Token::Colon);
    }

    #[test]
    fn test_lex_literals() {
        let tokens: Vec<_> = lex("null true false").filter_map(|r| r.ok()).collect();

        assert_eq!(tokens[0].token, Token::Null);
        assert_eq!(tokens[1].token, Token::True);
        assert_eq!(tokens[2].token, Token::False);
    }

    #[test]
    fn test_lex_string_keeps_escapes() {
        let tokens: Vec<_> = lex(r#""a\"b" "x\\""#).filter_map(|r| r.ok()).collect();

        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].token, Token::String(r#"a\"b"#));
        assert_eq!(tokens[1].token, Token::String(r"x\\"));
    }

    #[test]
    fn test_lex_numbers() {
        let tokens: Vec<_> = lex("0 -12 3.25 1e9 -2.5E-3").filter_map(|r| r.ok()).collect();

        assert_eq!(tokens[0].token, Token::Number("0"));
        assert_eq!(tokens[1].token, Token::Number("-12"));
        assert_eq!(tokens[2].token, Token::Number("3.25"));
        assert_eq!(tokens[3].token, Token::Number("1e9"));
        assert_eq!(tokens[4].token, Token::Number("-2.5E-3"));
    }

    #[test]
    fn test_control_bytes_are_whitespace() {
        let tokens: Vec<_> = lex("\u{1}\u{7}[\u{0}]\u{1f}").filter_map(|r| r.ok()).collect();

        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].span, TokenSpan::new(2, 3));
    }

    #[test]
    fn test_lex_errors() {
        let first = lex("tru").next().unwrap();
        assert_eq!(first.unwrap_err().message, "invalid literal");

        let first = lex("\"open").next().unwrap();
        assert_eq!(first.unwrap_err().message, "unterminated string");

        let first = lex("@").next().unwrap();
        assert!(first.unwrap_err().message.contains('@'));
    }

    #[test]
    fn test_lex_is_lazy() {
        let mut lexer = lex("1 @@@");
        assert_eq!(lexer.next().unwrap().unwrap().token, Token::Number("1"));
        assert!(lexer.next().unwrap().is_err());
    }
}
