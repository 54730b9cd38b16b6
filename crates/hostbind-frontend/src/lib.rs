//! hostbind frontend: lexer, parser, and the `TypeSpec` tree for type expressions.

pub mod errors;
pub mod lexer;
pub mod parser;
pub mod token;
pub mod type_spec;

pub use errors::{LexerError, ParserError};
pub use lexer::Lexer;
pub use parser::{ParseError, Parser, parse_type};
pub use token::{Span, Token, TokenType};
pub use type_spec::{ArgSpec, FunctionSpec, ModifierKind, TypeSpec};
