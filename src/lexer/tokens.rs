use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("let", TokenKind::Let);
        map.insert("print", TokenKind::Print);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("for", TokenKind::For);
        map.insert("break", TokenKind::Break);
        map.insert("continue", TokenKind::Continue);
        map.insert("fn", TokenKind::Fn);
        map.insert("return", TokenKind::Return);
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Number,
    String,
    Identifier,

    OpenBracket,
    CloseBracket,
    OpenParen,
    CloseParen,
    OpenBrace,
    CloseBrace,

    Equal,      // =
    EqualEqual, // ==
    Not,        // !
    NotEqual,   // !=

    Plus,
    PlusPlus,
    PlusEqual,
    Minus,
    MinusMinus,
    MinusEqual,
    Star,
    StarEqual,
    Slash,
    SlashEqual,

    Dot,

    // Reserved
    Let,
    Print,
    If,
    Else,
    For,
    Break,
    Continue,
    Fn,
    Return,
    True,
    False,
}

impl TokenKind {
    /// Stable lowercase name used in diagnostics and token dumps.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::EOF => "eof",
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::Identifier => "identifier",
            TokenKind::OpenBracket => "open_bracket",
            TokenKind::CloseBracket => "close_bracket",
            TokenKind::OpenParen => "open_paren",
            TokenKind::CloseParen => "close_paren",
            TokenKind::OpenBrace => "open_brace",
            TokenKind::CloseBrace => "close_brace",
            TokenKind::Equal => "equal",
            TokenKind::EqualEqual => "equal_equal",
            TokenKind::Not => "not",
            TokenKind::NotEqual => "not_equal",
            TokenKind::Plus => "plus",
            TokenKind::PlusPlus => "plus_plus",
            TokenKind::PlusEqual => "plus_equal",
            TokenKind::Minus => "minus",
            TokenKind::MinusMinus => "minus_minus",
            TokenKind::MinusEqual => "minus_equal",
            TokenKind::Star => "star",
            TokenKind::StarEqual => "star_equal",
            TokenKind::Slash => "slash",
            TokenKind::SlashEqual => "slash_equal",
            TokenKind::Dot => "dot",
            TokenKind::Let => "let",
            TokenKind::Print => "print",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::For => "for",
            TokenKind::Break => "break",
            TokenKind::Continue => "continue",
            TokenKind::Fn => "fn",
            TokenKind::Return => "return",
            TokenKind::True => "true",
            TokenKind::False => "false",
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_literal() {
            write!(f, "{} ({})", self.kind, self.value)
        } else {
            write!(f, "{} ()", self.kind)
        }
    }
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>, span: Span) -> Self {
        Token {
            kind,
            value: value.into(),
            span,
        }
    }

    pub fn is_one_of_many(&self, kinds: &[TokenKind]) -> bool {
        for kind in kinds {
            if *kind == self.kind {
                return true;
            }
        }

        false
    }

    /// Numbers, strings and identifiers carry text worth echoing.
    pub fn is_literal(&self) -> bool {
        self.is_one_of_many(&[TokenKind::Number, TokenKind::String, TokenKind::Identifier])
    }

    pub fn debug(&self) {
        println!("{}", self);
    }
}
