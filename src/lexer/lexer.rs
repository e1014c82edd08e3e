use std::rc::Rc;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, Span, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, &Regex);

/// Fixed spellings carry their kind and literal text and share one generic
/// handler; the pattern-driven families inspect the match themselves.
#[derive(Clone, Copy)]
pub enum Handler {
    Literal(TokenKind, &'static str),
    Fn(RegexHandler),
}

pub struct RegexPattern {
    regex: Regex,
    handler: Handler,
}

impl RegexPattern {
    /// A pattern only fires when its match starts exactly at the cursor.
    fn fires_at_cursor(&self, lexer: &Lexer) -> bool {
        self.regex
            .find(lexer.remainder())
            .map_or(false, |found| found.start() == 0)
    }

    fn invoke(&self, lexer: &mut Lexer) {
        match self.handler {
            Handler::Literal(kind, value) => literal_handler(lexer, kind, value),
            Handler::Fn(handler) => handler(lexer, &self.regex),
        }
    }
}

lazy_static! {
    // Registration order is the priority order: the first pattern that fires
    // at the cursor wins. Every multi-character spelling must stay registered
    // before the shorter spelling it shares a prefix with ("==" before "=",
    // ".." before ".").
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern { regex: Regex::new("[a-zA-Z_][a-zA-Z0-9_]*").unwrap(), handler: Handler::Fn(identifier_handler) },
        RegexPattern { regex: Regex::new("[0-9]+(\\.[0-9]+)?").unwrap(), handler: Handler::Fn(number_handler) },
        RegexPattern { regex: Regex::new("\\s+").unwrap(), handler: Handler::Fn(skip_handler) },
        RegexPattern { regex: Regex::new("\"[^\"]*\"").unwrap(), handler: Handler::Fn(string_handler) },
        RegexPattern { regex: Regex::new("\\/\\/.*").unwrap(), handler: Handler::Fn(skip_handler) },
        RegexPattern { regex: Regex::new("\\[").unwrap(), handler: Handler::Literal(TokenKind::OpenBracket, "[") },
        RegexPattern { regex: Regex::new("\\]").unwrap(), handler: Handler::Literal(TokenKind::CloseBracket, "]") },
        RegexPattern { regex: Regex::new("\\{").unwrap(), handler: Handler::Literal(TokenKind::OpenCurly, "{") },
        RegexPattern { regex: Regex::new("\\}").unwrap(), handler: Handler::Literal(TokenKind::CloseCurly, "}") },
        RegexPattern { regex: Regex::new("\\(").unwrap(), handler: Handler::Literal(TokenKind::OpenParen, "(") },
        RegexPattern { regex: Regex::new("\\)").unwrap(), handler: Handler::Literal(TokenKind::CloseParen, ")") },
        RegexPattern { regex: Regex::new("==").unwrap(), handler: Handler::Literal(TokenKind::Equals, "==") },
        RegexPattern { regex: Regex::new("!=").unwrap(), handler: Handler::Literal(TokenKind::NotEquals, "!=") },
        RegexPattern { regex: Regex::new("!").unwrap(), handler: Handler::Literal(TokenKind::Not, "!") },
        RegexPattern { regex: Regex::new("=").unwrap(), handler: Handler::Literal(TokenKind::Assignment, "=") },
        RegexPattern { regex: Regex::new("<=").unwrap(), handler: Handler::Literal(TokenKind::LessEquals, "<=") },
        RegexPattern { regex: Regex::new("<").unwrap(), handler: Handler::Literal(TokenKind::Less, "<") },
        RegexPattern { regex: Regex::new(">=").unwrap(), handler: Handler::Literal(TokenKind::GreaterEquals, ">=") },
        RegexPattern { regex: Regex::new(">").unwrap(), handler: Handler::Literal(TokenKind::Greater, ">") },
        RegexPattern { regex: Regex::new("\\|\\|").unwrap(), handler: Handler::Literal(TokenKind::Or, "||") },
        RegexPattern { regex: Regex::new("&&").unwrap(), handler: Handler::Literal(TokenKind::And, "&&") },
        RegexPattern { regex: Regex::new("\\.\\.").unwrap(), handler: Handler::Literal(TokenKind::DotDot, "..") },
        RegexPattern { regex: Regex::new("\\.").unwrap(), handler: Handler::Literal(TokenKind::Dot, ".") },
        RegexPattern { regex: Regex::new(";").unwrap(), handler: Handler::Literal(TokenKind::Semicolon, ";") },
        RegexPattern { regex: Regex::new(":").unwrap(), handler: Handler::Literal(TokenKind::Colon, ":") },
        RegexPattern { regex: Regex::new("\\?").unwrap(), handler: Handler::Literal(TokenKind::Question, "?") },
        RegexPattern { regex: Regex::new(",").unwrap(), handler: Handler::Literal(TokenKind::Comma, ",") },
        RegexPattern { regex: Regex::new("\\+\\+").unwrap(), handler: Handler::Literal(TokenKind::PlusPlus, "++") },
        RegexPattern { regex: Regex::new("--").unwrap(), handler: Handler::Literal(TokenKind::MinusMinus, "--") },
        RegexPattern { regex: Regex::new("\\+=").unwrap(), handler: Handler::Literal(TokenKind::PlusEquals, "+=") },
        RegexPattern { regex: Regex::new("-=").unwrap(), handler: Handler::Literal(TokenKind::MinusEquals, "-=") },
        RegexPattern { regex: Regex::new("\\+").unwrap(), handler: Handler::Literal(TokenKind::Plus, "+") },
        RegexPattern { regex: Regex::new("-").unwrap(), handler: Handler::Literal(TokenKind::Dash, "-") },
        RegexPattern { regex: Regex::new("/").unwrap(), handler: Handler::Literal(TokenKind::Slash, "/") },
        RegexPattern { regex: Regex::new("\\*").unwrap(), handler: Handler::Literal(TokenKind::Star, "*") },
        RegexPattern { regex: Regex::new("%").unwrap(), handler: Handler::Literal(TokenKind::Percent, "%") },
    ];
}

pub struct Lexer {
    tokens: Vec<Token>,
    source: String,
    pos: usize,
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
            pos: 0,
            tokens: vec![],
            source,
            file: file_name,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn at(&self) -> char {
        self.source.as_bytes()[self.pos] as char
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn span_here(&self, len: usize) -> Span {
        Span {
            start: Position(self.pos as u32, Rc::clone(&self.file)),
            end: Position((self.pos + len) as u32, Rc::clone(&self.file)),
        }
    }
}

fn literal_handler(lexer: &mut Lexer, kind: TokenKind, value: &'static str) {
    let span = lexer.span_here(value.len());
    lexer.push(MK_TOKEN!(kind, String::from(value), span));
    lexer.advance_n(value.len());
}

fn identifier_handler(lexer: &mut Lexer, regex: &Regex) {
    let value = regex.find(lexer.remainder()).unwrap().as_str().to_string();
    let kind = RESERVED_LOOKUP
        .get(value.as_str())
        .copied()
        .unwrap_or(TokenKind::Identifier);

    let span = lexer.span_here(value.len());
    let len = value.len();
    lexer.push(MK_TOKEN!(kind, value, span));
    lexer.advance_n(len);
}

fn number_handler(lexer: &mut Lexer, regex: &Regex) {
    let value = regex.find(lexer.remainder()).unwrap().as_str().to_string();

    let span = lexer.span_here(value.len());
    let len = value.len();
    lexer.push(MK_TOKEN!(TokenKind::Number, value, span));
    lexer.advance_n(len);
}

fn string_handler(lexer: &mut Lexer, regex: &Regex) {
    // value keeps the surrounding quotes, exactly as written in the source
    let value = regex.find(lexer.remainder()).unwrap().as_str().to_string();

    let span = lexer.span_here(value.len());
    let len = value.len();
    lexer.push(MK_TOKEN!(TokenKind::String, value, span));
    lexer.advance_n(len);
}

fn skip_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = regex.find(lexer.remainder()).unwrap().end();
    lexer.advance_n(matched);
}

pub fn tokenize(source: String, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, file);

    'scan: while !lex.at_eof() {
        for pattern in PATTERNS.iter() {
            if pattern.fires_at_cursor(&lex) {
                pattern.invoke(&mut lex);
                continue 'scan;
            }
        }

        return Err(Error::new(
            ErrorImpl::UnrecognisedToken {
                token: lex.at().to_string(),
            },
            Position(lex.pos as u32, Rc::clone(&lex.file)),
        ));
    }

    let span = lex.span_here(0);
    lex.push(MK_TOKEN!(TokenKind::EOF, String::from("EOF"), span));
    Ok(lex.tokens)
}
