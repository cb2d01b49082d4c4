//! logos-based template tokenizer.
//!
//! Token priority in logos is determined by:
//! 1. Longest match wins (e.g. `#prev` as IdSelector beats `#` alone)
//! 2. For equal length matches, earlier-defined variants win
//!
//! Line comments (`// ...`) and whitespace are skipped by the lexer itself,
//! so the parser only ever sees meaningful tokens.

use logos::Logos;

/// Template token produced by the lexer.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r\f]+|//[^\n]*")]
pub enum Token {
    /// Id selector: `#slides`, `#prev`, `#next`.
    #[regex(r"#[a-zA-Z_][a-zA-Z0-9_-]*")]
    IdSelector,

    /// Double-quoted string literal (control labels).
    #[regex(r#""[^"]*""#)]
    StringLiteral,

    /// Identifier: keywords (`slideshow`, `slot`, `control`) and action names.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_-]*")]
    Ident,

    /// `{`
    #[token("{")]
    BraceOpen,

    /// `}`
    #[token("}")]
    BraceClose,

    /// `;`
    #[token(";")]
    Semicolon,
}
