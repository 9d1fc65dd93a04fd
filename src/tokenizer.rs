//! # Tokenizer / Lexer
//!
//! Scans fragments of a JSON stream into a lazy sequence of value tokens,
//! tolerating noise and torn values at the fragment boundary.
pub mod lexer;
pub mod token;

// Re-exports
pub use lexer::{Lexer, tokenize};
pub use token::{Token, TokenKind};
