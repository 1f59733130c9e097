use std::rc::Rc;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    errors::errors::{Error, ErrorImpl},
    get_line_at_position, Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind};

pub type RegexHandler = fn(&mut Lexer, &Regex);

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

lazy_static! {
    /// Token patterns in priority order. The first pattern matching at the
    /// current position wins, so keywords must come before identifiers.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern { regex: Regex::new(r"^\s+").unwrap(), handler: skip_handler },

        // Comments
        RegexPattern { regex: Regex::new(r"^//[^\n]*").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new(r"^/\*(?s:.*?)\*/").unwrap(), handler: skip_handler },

        // Operators
        RegexPattern { regex: Regex::new(r"^\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+") },
        RegexPattern { regex: Regex::new(r"^-").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Minus, "-") },
        RegexPattern { regex: Regex::new(r"^\*").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Multiply, "*") },
        RegexPattern { regex: Regex::new(r"^/").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Divide, "/") },

        // Grouping
        RegexPattern { regex: Regex::new(r"^\(").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::LParen, "(") },
        RegexPattern { regex: Regex::new(r"^\)").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::RParen, ")") },
        RegexPattern { regex: Regex::new(r"^\{").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::LBrace, "{") },
        RegexPattern { regex: Regex::new(r"^\}").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::RBrace, "}") },
        RegexPattern { regex: Regex::new(r"^\[").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::LBracket, "[") },
        RegexPattern { regex: Regex::new(r"^\]").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::RBracket, "]") },

        // Type keywords
        RegexPattern { regex: Regex::new(r"^int\b").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::TypeInt, "int") },
        RegexPattern { regex: Regex::new(r"^float\b").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::TypeFloat, "float") },
        RegexPattern { regex: Regex::new(r"^str\b").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::TypeStr, "str") },
        RegexPattern { regex: Regex::new(r"^list\b").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::TypeList, "list") },
        RegexPattern { regex: Regex::new(r"^dict\b").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::TypeDict, "dict") },
        RegexPattern { regex: Regex::new(r"^bool\b").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::TypeBool, "bool") },

        // Literals, float before integer so `1.5` is not split
        RegexPattern { regex: Regex::new(r"^[0-9]+\.[0-9]+").unwrap(), handler: float_handler },
        RegexPattern { regex: Regex::new(r#"^"(?:\\.|[^"\\])*""#).unwrap(), handler: string_handler },
        RegexPattern { regex: Regex::new(r"^[0-9]+").unwrap(), handler: integer_handler },

        // Punctuation
        RegexPattern { regex: Regex::new(r"^=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Equals, "=") },
        RegexPattern { regex: Regex::new(r"^;").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";") },
        RegexPattern { regex: Regex::new(r"^:").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Colon, ":") },
        RegexPattern { regex: Regex::new(r"^\.").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dot, ".") },
        RegexPattern { regex: Regex::new(r"^,").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Comma, ",") },

        RegexPattern { regex: Regex::new(r"^print\b").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Print, "print") },
        RegexPattern { regex: Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*").unwrap(), handler: symbol_handler },
    ];
}

pub struct Lexer {
    tokens: Vec<Token>,
    source: String,
    pos: usize,
    line: u32,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            tokens: vec![],
            source,
            pos: 0,
            line: 1,
            file: file_name,
        }
    }

    /// Moves past `n` bytes, counting the newlines crossed on the way.
    pub fn advance_n(&mut self, n: usize) {
        let end = (self.pos + n).min(self.source.len());
        self.line += self.source[self.pos..end].matches('\n').count() as u32;
        self.pos = end;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn at(&self) -> Option<char> {
        self.remainder().chars().next()
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn position(&self) -> Position {
        Position::new(self.pos as u32, self.line, Rc::clone(&self.file))
    }

    /// Span of the next `len` bytes starting at the current position.
    pub fn span_of(&self, len: usize) -> Span {
        let end = (self.pos + len).min(self.source.len());
        let end_line = self.line + self.source[self.pos..end].matches('\n').count() as u32;

        Span {
            start: self.position(),
            end: Position::new(end as u32, end_line, Rc::clone(&self.file)),
        }
    }

    fn unrecognized_character(&self) -> Error {
        let (_, line_text, _) = get_line_at_position(&self.source, self.pos as u32);

        Error::new(
            ErrorImpl::UnrecognizedCharacter {
                character: self.at().unwrap_or_default(),
                line_text: line_text.trim_end().to_string(),
            },
            self.position(),
        )
    }
}

fn push_match(lexer: &mut Lexer, regex: &Regex, kind: TokenKind) {
    let Some(matched) = regex.find(lexer.remainder()) else {
        return;
    };
    let value = matched.as_str().to_string();
    let len = value.len();

    let span = lexer.span_of(len);
    lexer.push(MK_TOKEN!(kind, value, span));
    lexer.advance_n(len);
}

fn skip_handler(lexer: &mut Lexer, regex: &Regex) {
    if let Some(matched) = regex.find(lexer.remainder()) {
        lexer.advance_n(matched.end());
    }
}

fn float_handler(lexer: &mut Lexer, regex: &Regex) {
    push_match(lexer, regex, TokenKind::Float);
}

fn integer_handler(lexer: &mut Lexer, regex: &Regex) {
    push_match(lexer, regex, TokenKind::Integer);
}

// Quotes and escapes are kept; the parser decodes the literal.
fn string_handler(lexer: &mut Lexer, regex: &Regex) {
    push_match(lexer, regex, TokenKind::String);
}

fn symbol_handler(lexer: &mut Lexer, regex: &Regex) {
    push_match(lexer, regex, TokenKind::Identifier);
}

/// Converts source text into tokens, terminated by a single `EOF` token.
pub fn tokenize(source: String, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, file);

    while !lex.at_eof() {
        let pattern = PATTERNS
            .iter()
            .find(|pattern| pattern.regex.is_match(lex.remainder()));

        match pattern {
            Some(pattern) => (pattern.handler)(&mut lex, &pattern.regex),
            None => return Err(lex.unrecognized_character()),
        }
    }

    let span = lex.span_of(0);
    lex.push(MK_TOKEN!(TokenKind::EOF, String::new(), span));
    Ok(lex.tokens)
}

/// Renders tokens back into source text, one statement per line.
///
/// Lexing the result again produces the same kinds and lexemes.
pub fn pretty_print_tokens(tokens: &[Token]) -> String {
    let mut output = String::new();

    for token in tokens.iter().filter(|token| token.kind != TokenKind::EOF) {
        if !output.is_empty() && !output.ends_with('\n') {
            output.push(' ');
        }
        output.push_str(&token.value);

        if token.kind == TokenKind::Semicolon {
            output.push('\n');
        }
    }

    output
}
