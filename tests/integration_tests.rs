//! Integration tests for end-to-end tokenization.
//!
//! These tests drive the public library API over whole programs and run the
//! compiled `tokenizer` binary against files on disk.

use std::{fs, path::PathBuf, process::Command};

use tokenizer::lexer::{
    lexer::{tokenize, tokenize_with, MatchPolicy},
    tokens::TokenKind,
};

const PROGRAM: &str = "\
// counts down and prints
let n = 10
for i = 0 {
    if n == 0 { break }
    n -= 1
    print(\"tick\")
}
fn half(x) { return x / 2.0 }
let done = !false
";

fn write_source(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join("tokenizer_integration_tests");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(format!("{}-{}.src", name, std::process::id()));
    fs::write(&path, contents).unwrap();
    path
}

fn run_binary(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_tokenizer"))
        .args(args)
        .output()
        .expect("failed to spawn tokenizer binary")
}

#[test]
fn test_program_has_single_trailing_eof() {
    let tokens = tokenize(PROGRAM).unwrap();

    assert_eq!(tokens.last().unwrap().kind, TokenKind::EOF);
    assert_eq!(tokens.iter().filter(|t| t.kind == TokenKind::EOF).count(), 1);
}

#[test]
fn test_texts_reconstruct_source_without_trivia() {
    let tokens = tokenize(PROGRAM).unwrap();

    let rebuilt: String = tokens
        .iter()
        .filter(|t| t.kind != TokenKind::EOF)
        .map(|t| t.value.as_str())
        .collect();

    // drop comments, then whitespace outside of string literals
    let mut expected = String::new();
    let mut in_string = false;
    for line in PROGRAM.lines() {
        let code = if in_string { line } else { line.split("//").next().unwrap() };
        for c in code.chars() {
            if c == '"' {
                in_string = !in_string;
            }
            if in_string || c == '"' || !c.is_whitespace() {
                expected.push(c);
            }
        }
    }

    assert_eq!(rebuilt, expected);
}

#[test]
fn test_spans_index_back_into_source() {
    let tokens = tokenize(PROGRAM).unwrap();

    for token in tokens.iter().filter(|t| t.kind != TokenKind::EOF) {
        assert_eq!(&PROGRAM[token.span.start.0..token.span.end.0], token.value);
    }
}

#[test]
fn test_program_token_kinds() {
    let tokens = tokenize("for i = 0 { n -= 1 print(\"tick\") }").unwrap();
    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();

    assert_eq!(
        kinds,
        vec![
            TokenKind::For,
            TokenKind::Identifier,
            TokenKind::Equal,
            TokenKind::Number,
            TokenKind::OpenBrace,
            TokenKind::Identifier,
            TokenKind::MinusEqual,
            TokenKind::Number,
            TokenKind::Print,
            TokenKind::OpenParen,
            TokenKind::String,
            TokenKind::CloseParen,
            TokenKind::CloseBrace,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_both_policies_agree_on_program() {
    assert_eq!(
        tokenize_with(PROGRAM, MatchPolicy::FirstMatch).unwrap(),
        tokenize_with(PROGRAM, MatchPolicy::LongestMatch).unwrap()
    );
}

#[test]
fn test_error_reports_offset_of_bad_character() {
    let source = "let x = 1\nlet y = x @ 2\n";
    let err = tokenize(source).unwrap_err();

    assert_eq!(err.get_position().0, source.find('@').unwrap());
    assert_eq!(err.to_string(), format!("unrecognized token at position {}", source.find('@').unwrap()));
}

#[test]
fn test_cli_tokenize_prints_tokens() {
    let path = write_source("ok", "let x = 42 + y\n");
    let output = run_binary(&["tokenize", path.to_str().unwrap()]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec!["let ()", "identifier (x)", "equal ()", "number (42)", "plus ()", "identifier (y)", "eof ()"]
    );
}

#[test]
fn test_cli_reports_lex_error() {
    let path = write_source("bad", "let x = 1\nlet y = @\n");
    let output = run_binary(&["tokenize", path.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("unrecognized token at position 18"));
    assert!(stderr.contains("2 | let y = @"));
}

#[test]
fn test_cli_missing_file() {
    let output = run_binary(&["tokenize", "/definitely/not/here.src"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8(output.stderr).unwrap().contains("Unable to read the file"));
}

#[test]
fn test_cli_usage_errors() {
    let output = run_binary(&[]);
    assert!(!output.status.success());
    assert!(!output.stderr.is_empty());

    let output = run_binary(&["compile", "file.src"]);
    assert!(!output.status.success());
    assert!(!output.stderr.is_empty());

    let output = run_binary(&["tokenize"]);
    assert!(!output.status.success());
}
