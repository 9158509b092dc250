//! Utility macros for the tokenizer.
//!
//! - `MK_TOKEN!` - Creates a Token instance spanning `start..end`
//! - `MK_LITERAL!` - Creates a pattern rule for a fixed-spelling token
//!
//! These macros reduce boilerplate when building the pattern table.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$value` - The token's text
/// * `$start` - Byte offset of the first character
/// * `$end` - Byte offset one past the last character
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Number, "42", 0, 2);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $start:expr, $end:expr) => {
        $crate::lexer::tokens::Token::new(
            $kind,
            $value,
            $crate::Span {
                start: $crate::Position($start),
                end: $crate::Position($end),
            },
        )
    };
}

/// Creates a pattern rule that recognises exactly one spelling.
///
/// The spelling is regex-escaped, so operator characters need no quoting.
/// The rule is handled by the lexer's default handler, which pushes a token
/// of `$kind` carrying the spelling and advances past it.
///
/// # Example
///
/// ```ignore
/// let rule = MK_LITERAL!(TokenKind::PlusEqual, "+=");
/// ```
#[macro_export]
macro_rules! MK_LITERAL {
    ($kind:expr, $value:literal) => {
        $crate::lexer::lexer::RegexPattern::literal($kind, $value)
    };
}
