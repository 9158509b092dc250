use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, trace};

use crate::{errors::errors::{Error, ErrorImpl}, Position, MK_LITERAL, MK_TOKEN};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, &RegexPattern);

lazy_static! {
    static ref DEFAULT_PATTERNS: Vec<RegexPattern> =
        build_default_patterns().expect("built-in lexer patterns must compile");
}

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
    literal: Option<(TokenKind, &'static str)>,
}

impl RegexPattern {
    /// Compiles `pattern` anchored to the start of the input, so a rule only
    /// ever matches at the cursor.
    pub fn new(pattern: &str, handler: RegexHandler) -> Result<Self, Error> {
        let regex = Regex::new(&format!("^(?:{})", pattern)).map_err(|err| {
            Error::new(
                ErrorImpl::InvalidPattern { pattern: pattern.to_string(), message: err.to_string() },
                Position(0),
            )
        })?;

        Ok(RegexPattern { regex, handler, literal: None })
    }

    pub fn literal(kind: TokenKind, spelling: &'static str) -> Result<Self, Error> {
        let mut pattern = RegexPattern::new(&regex::escape(spelling), default_handler)?;
        pattern.literal = Some((kind, spelling));
        Ok(pattern)
    }

    /// Fixed spelling recognised by this rule, if it is a literal rule.
    pub fn spelling(&self) -> Option<&'static str> {
        self.literal.map(|(_, spelling)| spelling)
    }

    /// Length of the non-empty match at the start of `input`, if any.
    pub fn match_len(&self, input: &str) -> Option<usize> {
        self.regex.find(input).map(|m| m.end()).filter(|len| *len > 0)
    }
}

/// How the engine picks a rule when several match at the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchPolicy {
    /// The first rule in table order wins.
    #[default]
    FirstMatch,
    /// The longest match wins, ties go to the earlier rule.
    LongestMatch,
}

pub struct Lexer<'a> {
    patterns: &'a [RegexPattern],
    policy: MatchPolicy,
    tokens: Vec<Token>,
    source: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Lexer<'a> {
        Lexer::with_policy(source, MatchPolicy::default())
    }

    pub fn with_policy(source: &'a str, policy: MatchPolicy) -> Lexer<'a> {
        Lexer {
            patterns: default_patterns(),
            policy,
            tokens: vec![],
            source,
            pos: 0,
        }
    }

    /// Builds a lexer over a caller-supplied table. Under first-match
    /// dispatch the table must not contain unreachable literal rules.
    pub fn with_patterns(
        source: &'a str,
        patterns: &'a [RegexPattern],
        policy: MatchPolicy,
    ) -> Result<Lexer<'a>, Error> {
        if policy == MatchPolicy::FirstMatch {
            check_reachability(patterns)?;
        }

        Ok(Lexer {
            patterns,
            policy,
            tokens: vec![],
            source,
            pos: 0,
        })
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        trace!(target: "tokenizer::lexer", kind = %token.kind, text = ?token.value, pos = self.pos, "push");
        self.tokens.push(token);
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn at(&self) -> Option<char> {
        self.remainder().chars().next()
    }

    pub fn remainder(&self) -> &'a str {
        let source: &'a str = self.source;
        &source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Text matched by `pattern` at the cursor, empty if it does not match.
    pub fn matched(&self, pattern: &RegexPattern) -> &'a str {
        let remaining = self.remainder();
        pattern.match_len(remaining).map_or("", |len| &remaining[..len])
    }

    fn select(&self) -> Option<&'a RegexPattern> {
        let patterns: &'a [RegexPattern] = self.patterns;
        let remaining = self.remainder();

        match self.policy {
            MatchPolicy::FirstMatch => patterns.iter().find(|pattern| pattern.match_len(remaining).is_some()),
            MatchPolicy::LongestMatch => {
                let mut best: Option<(usize, &'a RegexPattern)> = None;

                for pattern in patterns.iter() {
                    if let Some(len) = pattern.match_len(remaining) {
                        if best.map_or(true, |(best_len, _)| len > best_len) {
                            best = Some((len, pattern));
                        }
                    }
                }

                best.map(|(_, pattern)| pattern)
            }
        }
    }

    pub fn tokenize(mut self) -> Result<Vec<Token>, Error> {
        debug!(target: "tokenizer::lexer", len = self.source.len(), policy = ?self.policy, "tokenizing");

        while !self.at_eof() {
            match self.select() {
                Some(pattern) => (pattern.handler)(&mut self, pattern),
                None => {
                    let token = self.at().map(String::from).unwrap_or_default();
                    debug!(target: "tokenizer::lexer", pos = self.pos, token = ?token, "no rule matches");
                    return Err(Error::new(ErrorImpl::UnrecognisedToken { token }, Position(self.pos)));
                }
            }
        }

        let end = self.pos;
        self.push(MK_TOKEN!(TokenKind::EOF, "EOF", end, end));
        debug!(target: "tokenizer::lexer", count = self.tokens.len(), "tokenized");
        Ok(self.tokens)
    }
}

/// The built-in rule table, compiled once per process.
pub fn default_patterns() -> &'static [RegexPattern] {
    &DEFAULT_PATTERNS
}

fn build_default_patterns() -> Result<Vec<RegexPattern>, Error> {
    Ok(vec![
        RegexPattern::new("\\s+", skip_handler)?,
        RegexPattern::new("//.*", skip_handler)?,
        RegexPattern::new("[0-9]+(\\.[0-9]+)?", number_handler)?,
        RegexPattern::new("\"[^\"]*\"", string_handler)?,
        RegexPattern::new("[a-zA-Z_][a-zA-Z0-9_]*", symbol_handler)?,
        MK_LITERAL!(TokenKind::OpenBracket, "[")?,
        MK_LITERAL!(TokenKind::CloseBracket, "]")?,
        MK_LITERAL!(TokenKind::OpenParen, "(")?,
        MK_LITERAL!(TokenKind::CloseParen, ")")?,
        MK_LITERAL!(TokenKind::OpenBrace, "{")?,
        MK_LITERAL!(TokenKind::CloseBrace, "}")?,
        MK_LITERAL!(TokenKind::EqualEqual, "==")?,
        MK_LITERAL!(TokenKind::NotEqual, "!=")?,
        MK_LITERAL!(TokenKind::Equal, "=")?,
        MK_LITERAL!(TokenKind::Not, "!")?,
        MK_LITERAL!(TokenKind::PlusPlus, "++")?,
        MK_LITERAL!(TokenKind::PlusEqual, "+=")?,
        MK_LITERAL!(TokenKind::Plus, "+")?,
        MK_LITERAL!(TokenKind::MinusMinus, "--")?,
        MK_LITERAL!(TokenKind::MinusEqual, "-=")?,
        MK_LITERAL!(TokenKind::Minus, "-")?,
        MK_LITERAL!(TokenKind::StarEqual, "*=")?,
        MK_LITERAL!(TokenKind::Star, "*")?,
        MK_LITERAL!(TokenKind::SlashEqual, "/=")?,
        MK_LITERAL!(TokenKind::Slash, "/")?,
        MK_LITERAL!(TokenKind::Dot, ".")?,
    ])
}

/// Fails if a literal rule can never fire under first-match dispatch, i.e. an
/// earlier rule already matches at the start of its spelling.
pub fn check_reachability(patterns: &[RegexPattern]) -> Result<(), Error> {
    for (index, pattern) in patterns.iter().enumerate() {
        let Some(spelling) = pattern.spelling() else {
            continue;
        };

        if let Some(earlier) = patterns[..index].iter().position(|p| p.match_len(spelling).is_some()) {
            return Err(Error::new(
                ErrorImpl::ShadowedPattern { spelling: spelling.to_string(), rule: index, shadowed_by: earlier },
                Position(0),
            ));
        }
    }

    Ok(())
}

fn default_handler(lexer: &mut Lexer, pattern: &RegexPattern) {
    let Some((kind, spelling)) = pattern.literal else {
        return skip_handler(lexer, pattern);
    };

    let start = lexer.pos;
    lexer.push(MK_TOKEN!(kind, spelling, start, start + spelling.len()));
    lexer.advance_n(spelling.len());
}

fn number_handler(lexer: &mut Lexer, pattern: &RegexPattern) {
    let matched = lexer.matched(pattern);
    let start = lexer.pos;

    lexer.push(MK_TOKEN!(TokenKind::Number, matched, start, start + matched.len()));
    lexer.advance_n(matched.len());
}

fn skip_handler(lexer: &mut Lexer, pattern: &RegexPattern) {
    let matched = lexer.matched(pattern);
    trace!(target: "tokenizer::lexer", pos = lexer.pos, len = matched.len(), "skip");
    lexer.advance_n(matched.len());
}

fn string_handler(lexer: &mut Lexer, pattern: &RegexPattern) {
    // quotes stay in the text, escapes are left for a later stage
    let matched = lexer.matched(pattern);
    let start = lexer.pos;

    lexer.push(MK_TOKEN!(TokenKind::String, matched, start, start + matched.len()));
    lexer.advance_n(matched.len());
}

fn symbol_handler(lexer: &mut Lexer, pattern: &RegexPattern) {
    let value = lexer.matched(pattern);
    let start = lexer.pos;
    let kind = RESERVED_LOOKUP.get(value).copied().unwrap_or(TokenKind::Identifier);

    lexer.push(MK_TOKEN!(kind, value, start, start + value.len()));
    lexer.advance_n(value.len());
}

pub fn tokenize(source: &str) -> Result<Vec<Token>, Error> {
    Lexer::new(source).tokenize()
}

/// Tokenizes with the built-in table under the given dispatch policy.
pub fn tokenize_with(source: &str, policy: MatchPolicy) -> Result<Vec<Token>, Error> {
    Lexer::with_policy(source, policy).tokenize()
}
