// src/lexer.rs

use crate::errors::LexerError;
use crate::token::{Span, Token, TokenType};

pub struct Lexer<'src> {
    source: &'src str,
    chars: std::iter::Peekable<std::str::CharIndices<'src>>,
    start: usize,
    current: usize,
    // Error collection
    errors: Vec<LexerError>,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            start: 0,
            current: 0,
            errors: Vec::new(),
        }
    }

    /// Take all collected errors, leaving the internal list empty.
    pub fn take_errors(&mut self) -> Vec<LexerError> {
        std::mem::take(&mut self.errors)
    }

    /// Check if any errors have been collected.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Get the source string being lexed.
    pub fn source(&self) -> &'src str {
        self.source
    }

    /// Lex the whole input, ending with an `Eof` token.
    ///
    /// Stops at the first unexpected character: one bad character aborts the
    /// expression it appears in.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexerError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            match token.ty {
                TokenType::Error => {
                    if let Some(error) = self.take_errors().into_iter().next() {
                        return Err(error);
                    }
                }
                TokenType::Eof => {
                    tokens.push(token);
                    return Ok(tokens);
                }
                _ => tokens.push(token),
            }
        }
    }

    /// Get the next token from the source
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        self.start = self.current;

        let Some(c) = self.advance() else {
            return self.make_token(TokenType::Eof);
        };

        match c {
            // Single character tokens
            '(' => self.make_token(TokenType::LParen),
            ')' => self.make_token(TokenType::RParen),
            '<' => self.make_token(TokenType::Lt),
            '>' => self.make_token(TokenType::Gt),
            ',' => self.make_token(TokenType::Comma),
            '*' => self.make_token(TokenType::Star),

            // Single or double character tokens
            ':' => {
                if self.match_char(':') {
                    self.make_token(TokenType::ColonColon)
                } else {
                    self.make_token(TokenType::Colon)
                }
            }
            '-' => {
                if self.match_char('>') {
                    self.make_token(TokenType::Arrow)
                } else {
                    self.make_token(TokenType::Minus)
                }
            }
            '&' => {
                if self.match_char('&') {
                    self.make_token(TokenType::AmpAmp)
                } else {
                    self.make_token(TokenType::Amp)
                }
            }

            // Identifier or keyword
            c if c.is_ascii_alphabetic() || c == '_' => self.identifier(),

            _ => self.error_unexpected_char(c),
        }
    }

    /// Skip whitespace
    fn skip_whitespace(&mut self) {
        while let Some(' ') | Some('\t') | Some('\r') | Some('\n') = self.peek() {
            self.advance();
        }
    }

    /// Advance to the next character and return it
    fn advance(&mut self) -> Option<char> {
        if let Some((idx, c)) = self.chars.next() {
            self.current = idx + c.len_utf8();
            Some(c)
        } else {
            None
        }
    }

    /// Peek at the next character without consuming it
    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    /// Consume the next character if it matches the expected character
    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Create a token from start to current position
    fn make_token(&self, ty: TokenType) -> Token {
        let lexeme = &self.source[self.start..self.current];
        Token::new(ty, lexeme, Span::new(self.start, self.current))
    }

    /// Create an error token and collect an error for an unexpected character.
    fn error_unexpected_char(&mut self, c: char) -> Token {
        let span = Span::new(self.start, self.current);
        tracing::debug!(ch = %c, offset = self.start, "unexpected character in type expression");
        let error = LexerError::UnexpectedCharacter {
            ch: c,
            span: span.into(),
        };
        let message = format!("unexpected character '{}'", c);
        self.errors.push(error);
        Token::new(TokenType::Error, message, span)
    }

    /// Scan an identifier or keyword
    fn identifier(&mut self) -> Token {
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                self.advance();
            } else {
                break;
            }
        }

        let text = &self.source[self.start..self.current];
        let ty = TokenType::keyword_type(text).unwrap_or(TokenType::Identifier);
        self.make_token(ty)
    }
}
