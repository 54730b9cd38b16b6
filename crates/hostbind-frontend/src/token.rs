// src/token.rs

/// Single source of truth for keyword-to-token mapping.
///
/// Each entry `"text" => Variant` generates:
/// - A match arm in `TokenType::keyword_type`: `"text" => Some(TokenType::Variant)`
/// - A match arm in `TokenType::as_str`:       `Self::Variant => "text"`
macro_rules! define_keywords {
    ( $( $text:literal => $variant:ident ),+ $(,)? ) => {
        impl TokenType {
            /// Check if a string is a keyword and return its token type.
            pub fn keyword_type(text: &str) -> Option<TokenType> {
                match text {
                    $( $text => Some(TokenType::$variant), )+
                    _ => None,
                }
            }

            /// String representation for keyword tokens (used by `as_str`).
            fn keyword_as_str(&self) -> Option<&'static str> {
                match self {
                    $( Self::$variant => Some($text), )+
                    _ => None,
                }
            }
        }
    };
}

define_keywords! {
    "const"    => KwConst,
    "noexcept" => KwNoexcept,
}

/// All token types of the type-expression grammar.
///
/// `off_thread` is not a keyword; it lexes as an identifier and is only
/// recognized in function-modifier position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    Identifier,

    // Keywords
    KwConst,
    KwNoexcept,

    // Punctuation
    ColonColon, // ::
    Colon,
    Arrow, // ->
    Minus,
    AmpAmp, // &&
    Amp,
    Star,
    LParen,
    RParen,
    Lt,
    Gt,
    Comma,

    // Special
    Eof,
    Error,
}

impl TokenType {
    /// Get string representation for error messages
    pub fn as_str(&self) -> &'static str {
        if let Some(s) = self.keyword_as_str() {
            return s;
        }
        match self {
            Self::Identifier => "identifier",
            Self::ColonColon => "::",
            Self::Colon => ":",
            Self::Arrow => "->",
            Self::Minus => "-",
            Self::AmpAmp => "&&",
            Self::Amp => "&",
            Self::Star => "*",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Comma => ",",
            Self::Eof => "end of input",
            Self::Error => "error",
            Self::KwConst | Self::KwNoexcept => "keyword",
        }
    }
}

/// Source location span. Type expressions are single-line, so byte offsets suffice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Span {
    pub start: usize, // Byte offset
    pub end: usize,   // Byte offset (exclusive)
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start,
            end: other.end,
        }
    }
}

impl From<Span> for miette::SourceSpan {
    fn from(span: Span) -> Self {
        // miette uses (offset, length)
        (span.start, span.len()).into()
    }
}

impl From<&Span> for miette::SourceSpan {
    fn from(span: &Span) -> Self {
        (span.start, span.len()).into()
    }
}

/// A token with its location in the expression text
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub ty: TokenType,
    pub lexeme: String,
    pub span: Span,
}

impl Token {
    pub fn new(ty: TokenType, lexeme: impl Into<String>, span: Span) -> Self {
        Self {
            ty,
            lexeme: lexeme.into(),
            span,
        }
    }

    /// Text to show for this token in "found ..." messages.
    pub fn describe(&self) -> &str {
        match self.ty {
            TokenType::Identifier => &self.lexeme,
            _ => self.ty.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_map_both_ways() {
        assert_eq!(TokenType::keyword_type("const"), Some(TokenType::KwConst));
        assert_eq!(
            TokenType::keyword_type("noexcept"),
            Some(TokenType::KwNoexcept)
        );
        assert_eq!(TokenType::keyword_type("off_thread"), None);
        assert_eq!(TokenType::KwConst.as_str(), "const");
        assert_eq!(TokenType::AmpAmp.as_str(), "&&");
    }

    #[test]
    fn span_merge_takes_outer_bounds() {
        let merged = Span::new(2, 5).merge(Span::new(9, 12));
        assert_eq!(merged, Span::new(2, 12));
        assert_eq!(merged.len(), 10);
    }

    #[test]
    fn span_converts_to_offset_and_length() {
        let source_span: miette::SourceSpan = Span::new(4, 7).into();
        assert_eq!(source_span.offset(), 4);
        assert_eq!(source_span.len(), 3);
    }

    #[test]
    fn describe_prefers_identifier_text() {
        let ident = Token::new(TokenType::Identifier, "foo", Span::new(0, 3));
        let comma = Token::new(TokenType::Comma, ",", Span::new(3, 4));
        assert_eq!(ident.describe(), "foo");
        assert_eq!(comma.describe(), ",");
    }
}
