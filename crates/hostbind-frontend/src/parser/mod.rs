// src/parser/mod.rs
//
// Recursive-descent parser for type expressions and function signatures.

use std::fmt;

use miette::{Diagnostic, LabeledSpan, SourceCode};

use crate::errors::{LexerError, ParserError};
use crate::lexer::Lexer;
use crate::token::{Span, Token, TokenType};
use crate::type_spec::{ArgSpec, FunctionSpec, ModifierKind, TypeSpec};

/// Parse one type expression or function signature.
pub fn parse_type(source: &str) -> Result<TypeSpec, ParseError> {
    Parser::new(source)?.parse()
}

pub struct Parser<'src> {
    source: &'src str,
    tokens: Vec<Token>,
    pos: usize,
}

/// A parse error wrapping a miette-enabled ParserError, together with the
/// text it was raised for.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub error: ParserError,
    pub span: Span,
    pub input: String,
    /// The input ran out before the expression was complete.
    pub at_end: bool,
}

impl ParseError {
    /// Create a new parse error
    pub fn new(error: ParserError, span: Span, input: impl Into<String>) -> Self {
        let input = input.into();
        let at_end = span.start >= input.len();
        Self {
            error,
            span,
            input,
            at_end,
        }
    }

    fn lexical(error: LexerError, input: &str) -> Self {
        let LexerError::UnexpectedCharacter { span, .. } = &error;
        let span = Span::new(span.offset(), span.offset() + span.len());
        Self::new(ParserError::Lexer(error), span, input)
    }

    /// The bare message, without the rendered input.
    pub fn message(&self) -> String {
        self.error.to_string()
    }

    /// The input with a caret line under the offending token, or `AT END`.
    pub fn render_context(&self) -> String {
        if self.at_end {
            return format!("{}\nAT END", self.input);
        }
        let pad = self.input[..self.span.start].chars().count();
        let width = self
            .input
            .get(self.span.start..self.span.end)
            .map_or(1, |text| text.chars().count().max(1));
        format!("{}\n{}{}", self.input, " ".repeat(pad), "^".repeat(width))
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}", self.error, self.render_context())
    }
}

impl std::error::Error for ParseError {}

impl Diagnostic for ParseError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.error.code()
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.error.help()
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        Some(&self.input)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        self.error.labels()
    }
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str) -> Result<Self, ParseError> {
        let tokens = Lexer::new(source)
            .tokenize()
            .map_err(|error| ParseError::lexical(error, source))?;
        Ok(Self {
            source,
            tokens,
            pos: 0,
        })
    }

    /// Parse a complete expression; anything left over is an error.
    pub fn parse(&mut self) -> Result<TypeSpec, ParseError> {
        let ty = self.parse_type()?;
        if !self.check(TokenType::Eof) {
            return Err(self.error(ParserError::TrailingInput {
                found: self.current().describe().to_string(),
                span: self.current().span.into(),
            }));
        }
        Ok(ty)
    }

    fn current(&self) -> &Token {
        // `tokenize` always ends with Eof and `advance` never moves past it
        &self.tokens[self.pos]
    }

    /// Advance to the next token
    fn advance(&mut self) {
        if self.current().ty != TokenType::Eof {
            self.pos += 1;
        }
    }

    /// Check if the current token matches the given type
    fn check(&self, ty: TokenType) -> bool {
        self.current().ty == ty
    }

    /// Consume the current token if it matches, otherwise return false
    fn match_token(&mut self, ty: TokenType) -> bool {
        if self.check(ty) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Require a token of the given type, or return an error
    fn consume(&mut self, ty: TokenType, expected: &str) -> Result<Token, ParseError> {
        if self.check(ty) {
            let token = self.current().clone();
            self.advance();
            Ok(token)
        } else {
            Err(self.error(ParserError::ExpectedToken {
                expected: expected.to_string(),
                found: self.current().describe().to_string(),
                span: self.current().span.into(),
            }))
        }
    }

    fn error(&self, error: ParserError) -> ParseError {
        ParseError::new(error, self.current().span, self.source)
    }

    /// Type := Function | RefType
    fn parse_type(&mut self) -> Result<TypeSpec, ParseError> {
        if self.check(TokenType::LParen) {
            return self.parse_function();
        }
        self.parse_ref_type()
    }

    /// RefType := Base ( '&' | '&&' )?
    fn parse_ref_type(&mut self) -> Result<TypeSpec, ParseError> {
        let base = self.parse_base()?;
        let kind = if self.match_token(TokenType::Amp) {
            ModifierKind::Ref
        } else if self.match_token(TokenType::AmpAmp) {
            ModifierKind::RRef
        } else {
            return Ok(base);
        };

        match self.current().ty {
            TokenType::KwConst | TokenType::Star | TokenType::Amp | TokenType::AmpAmp => {
                Err(self.error(ParserError::ModifierAfterReference {
                    modifier: self.current().lexeme.clone(),
                    span: self.current().span.into(),
                }))
            }
            _ => Ok(TypeSpec::modified(kind, base)),
        }
    }

    /// Base := 'const'? Core ('const' | '*')*
    fn parse_base(&mut self) -> Result<TypeSpec, ParseError> {
        let leading_const = self.match_token(TokenType::KwConst);
        let mut ty = self.parse_core()?;
        if leading_const {
            ty = TypeSpec::modified(ModifierKind::Const, ty);
        }

        loop {
            if self.match_token(TokenType::KwConst) {
                ty = TypeSpec::modified(ModifierKind::Const, ty);
            } else if self.match_token(TokenType::Star) {
                ty = TypeSpec::modified(ModifierKind::Pointer, ty);
            } else {
                return Ok(ty);
            }
        }
    }

    /// Core := Identifier ('::' Identifier)* ( '<' Type (',' Type)* '>' )?
    fn parse_core(&mut self) -> Result<TypeSpec, ParseError> {
        if !self.check(TokenType::Identifier) {
            return Err(self.error(ParserError::ExpectedType {
                found: self.current().describe().to_string(),
                span: self.current().span.into(),
            }));
        }
        let mut name = self.current().lexeme.clone();
        self.advance();

        while self.match_token(TokenType::ColonColon) {
            let segment = self.consume(TokenType::Identifier, "identifier after '::'")?;
            name.push_str("::");
            name.push_str(&segment.lexeme);
        }

        if !self.match_token(TokenType::Lt) {
            return Ok(TypeSpec::Name(name));
        }

        let mut args = vec![self.parse_type()?];
        while self.match_token(TokenType::Comma) {
            if self.check(TokenType::Gt) {
                break;
            }
            args.push(self.parse_type()?);
        }
        self.consume(TokenType::Gt, "'>' to close template arguments")?;

        Ok(TypeSpec::Template { name, args })
    }

    /// Function := '(' [Arg (',' Arg)*] ')' FuncModifier* ( '->' Type )?
    fn parse_function(&mut self) -> Result<TypeSpec, ParseError> {
        self.consume(TokenType::LParen, "'('")?;

        let mut args = Vec::new();
        if !self.check(TokenType::RParen) {
            loop {
                args.push(self.parse_arg()?);
                if !self.match_token(TokenType::Comma) || self.check(TokenType::RParen) {
                    break;
                }
            }
        }
        self.consume(TokenType::RParen, "')' to close the argument list")?;

        let mut func = FunctionSpec::new(args, TypeSpec::void());
        self.parse_function_modifiers(&mut func)?;

        if self.match_token(TokenType::Arrow) {
            func.ret = Box::new(self.parse_type()?);
        }

        Ok(TypeSpec::Function(func))
    }

    /// FuncModifier := 'const' | 'noexcept' | 'off_thread', each at most once
    fn parse_function_modifiers(&mut self, func: &mut FunctionSpec) -> Result<(), ParseError> {
        loop {
            let token = self.current();
            let flag = match token.ty {
                TokenType::KwConst => &mut func.is_const,
                TokenType::KwNoexcept => &mut func.is_noexcept,
                TokenType::Identifier if token.lexeme == "off_thread" => &mut func.is_off_thread,
                TokenType::Identifier => {
                    return Err(self.error(ParserError::UnknownModifier {
                        modifier: token.lexeme.clone(),
                        span: token.span.into(),
                    }));
                }
                _ => return Ok(()),
            };
            if *flag {
                return Err(self.error(ParserError::DuplicateModifier {
                    modifier: token.lexeme.clone(),
                    span: token.span.into(),
                }));
            }
            *flag = true;
            self.advance();
        }
    }

    /// Arg := Identifier ':' Type
    fn parse_arg(&mut self) -> Result<ArgSpec, ParseError> {
        let name = self.consume(TokenType::Identifier, "argument name")?;
        self.consume(TokenType::Colon, "':' after argument name")?;
        let ty = self.parse_type()?;
        Ok(ArgSpec::new(name.lexeme, ty))
    }
}

#[cfg(test)]
mod tests;
