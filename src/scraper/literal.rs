// literal.rs
//
// Permissive reader for the object literal embedded in the listing page
// script. Accepts strict JSON plus the looser forms the site emits:
// single-quoted strings, bare keys, trailing commas and the capitalised
// boolean/null spellings. Nothing is ever evaluated.

use serde_json::{Map, Number, Value};
use thiserror::Error;

/// Deepest object/array nesting accepted, same as serde_json.
pub const MAX_DEPTH: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at offset {offset}")]
pub struct LiteralError {
    pub offset: usize,
    pub message: String,
}

impl LiteralError {
    fn new(offset: usize, message: impl Into<String>) -> Self {
        Self {
            offset,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Colon,
    Comma,
    Str(String),
    Num(Number),
    Ident(String),
    Eof,
}

/// Parse a single object/array/scalar literal into a generic value.
pub fn parse_literal(input: &str) -> Result<Value, LiteralError> {
    let tokens = tokenize(input)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };

    let value = parser.parse_value()?;
    match parser.next() {
        (_, Token::Eof) => Ok(value),
        (offset, tok) => Err(LiteralError::new(
            offset,
            format!("unexpected trailing token {tok:?}"),
        )),
    }
}

fn tokenize(input: &str) -> Result<Vec<(usize, Token)>, LiteralError> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(offset, c)) = chars.peek() {
        let token = match c {
            c if c.is_whitespace() => {
                chars.next();
                continue;
            }
            '{' => single(&mut chars, Token::LBrace),
            '}' => single(&mut chars, Token::RBrace),
            '[' => single(&mut chars, Token::LBracket),
            ']' => single(&mut chars, Token::RBracket),
            ':' => single(&mut chars, Token::Colon),
            ',' => single(&mut chars, Token::Comma),
            '"' | '\'' => Token::Str(lex_string(&mut chars, offset)?),
            '-' | '+' | '.' | '0'..='9' => Token::Num(lex_number(&mut chars, offset)?),
            c if c.is_alphabetic() || c == '_' || c == '$' => {
                let mut ident = String::new();
                while let Some(&(_, c)) = chars.peek() {
                    if c.is_alphanumeric() || c == '_' || c == '$' {
                        ident.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                Token::Ident(ident)
            }
            other => {
                return Err(LiteralError::new(
                    offset,
                    format!("unexpected character '{other}'"),
                ))
            }
        };
        tokens.push((offset, token));
    }

    tokens.push((input.len(), Token::Eof));
    Ok(tokens)
}

type Chars<'a> = std::iter::Peekable<std::str::CharIndices<'a>>;

fn single(chars: &mut Chars<'_>, token: Token) -> Token {
    chars.next();
    token
}

fn lex_string(chars: &mut Chars<'_>, start: usize) -> Result<String, LiteralError> {
    let quote = match chars.next() {
        Some((_, q)) => q,
        None => return Err(LiteralError::new(start, "expected string")),
    };
    let mut out = String::new();

    loop {
        match chars.next() {
            None => return Err(LiteralError::new(start, "unterminated string")),
            Some((_, c)) if c == quote => return Ok(out),
            Some((pos, '\\')) => match chars.next() {
                None => return Err(LiteralError::new(pos, "unterminated escape")),
                Some((_, 'n')) => out.push('\n'),
                Some((_, 't')) => out.push('\t'),
                Some((_, 'r')) => out.push('\r'),
                Some((_, 'b')) => out.push('\u{8}'),
                Some((_, 'f')) => out.push('\u{c}'),
                Some((_, 'u')) => out.push(lex_unicode_escape(chars, pos)?),
                // \" \' \\ \/ and anything unknown stand for themselves
                Some((_, other)) => out.push(other),
            },
            Some((_, c)) => out.push(c),
        }
    }
}

fn read_hex4(chars: &mut Chars<'_>, at: usize) -> Result<u32, LiteralError> {
    let mut code = 0u32;
    for _ in 0..4 {
        let digit = chars
            .next()
            .and_then(|(_, c)| c.to_digit(16))
            .ok_or_else(|| LiteralError::new(at, "invalid \\u escape"))?;
        code = code * 16 + digit;
    }
    Ok(code)
}

fn lex_unicode_escape(chars: &mut Chars<'_>, at: usize) -> Result<char, LiteralError> {
    let high = read_hex4(chars, at)?;

    if (0xD800..0xDC00).contains(&high) {
        // surrogate pair: expect a trailing \uDC00..\uDFFF
        let mut lookahead = chars.clone();
        if let (Some((_, '\\')), Some((_, 'u'))) = (lookahead.next(), lookahead.next()) {
            let low = read_hex4(&mut lookahead, at)?;
            if (0xDC00..0xE000).contains(&low) {
                *chars = lookahead;
                let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
                return Ok(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
            }
        }
        return Ok(char::REPLACEMENT_CHARACTER);
    }

    Ok(char::from_u32(high).unwrap_or(char::REPLACEMENT_CHARACTER))
}

fn lex_number(chars: &mut Chars<'_>, start: usize) -> Result<Number, LiteralError> {
    let mut text = String::new();
    while let Some(&(_, c)) = chars.peek() {
        if c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E') {
            text.push(c);
            chars.next();
        } else {
            break;
        }
    }

    let trimmed = text.strip_prefix('+').unwrap_or(&text);
    let is_float = trimmed.contains(['.', 'e', 'E']);

    if !is_float {
        if let Ok(n) = trimmed.parse::<i64>() {
            return Ok(Number::from(n));
        }
        if let Ok(n) = trimmed.parse::<u64>() {
            return Ok(Number::from(n));
        }
    }

    trimmed
        .parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .ok_or_else(|| LiteralError::new(start, format!("invalid number '{text}'")))
}

struct Parser {
    tokens: Vec<(usize, Token)>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn next(&mut self) -> (usize, Token) {
        let item = self.tokens[self.pos].clone();
        // Eof is sticky
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        item
    }

    fn parse_value(&mut self) -> Result<Value, LiteralError> {
        match self.next() {
            (offset, Token::LBrace) => self.nested(offset, Self::parse_object),
            (offset, Token::LBracket) => self.nested(offset, Self::parse_array),
            (_, Token::Str(s)) => Ok(Value::String(s)),
            (_, Token::Num(n)) => Ok(Value::Number(n)),
            (offset, Token::Ident(ident)) => match ident.as_str() {
                "true" | "True" => Ok(Value::Bool(true)),
                "false" | "False" => Ok(Value::Bool(false)),
                "null" | "None" | "undefined" => Ok(Value::Null),
                _ => Err(LiteralError::new(
                    offset,
                    format!("unsupported identifier '{ident}'"),
                )),
            },
            (offset, tok) => Err(LiteralError::new(
                offset,
                format!("expected a value, found {tok:?}"),
            )),
        }
    }

    fn nested(
        &mut self,
        offset: usize,
        parse: fn(&mut Self) -> Result<Value, LiteralError>,
    ) -> Result<Value, LiteralError> {
        if self.depth >= MAX_DEPTH {
            return Err(LiteralError::new(offset, "nesting too deep"));
        }
        self.depth += 1;
        let value = parse(self);
        self.depth -= 1;
        value
    }

    fn parse_object(&mut self) -> Result<Value, LiteralError> {
        let mut map = Map::new();

        loop {
            let key = match self.next() {
                (_, Token::RBrace) => break,
                (_, Token::Str(s)) | (_, Token::Ident(s)) => s,
                (_, Token::Num(n)) => n.to_string(),
                (offset, tok) => {
                    return Err(LiteralError::new(
                        offset,
                        format!("expected object key, found {tok:?}"),
                    ))
                }
            };

            match self.next() {
                (_, Token::Colon) => {}
                (offset, tok) => {
                    return Err(LiteralError::new(
                        offset,
                        format!("expected ':' after key '{key}', found {tok:?}"),
                    ))
                }
            }

            let value = self.parse_value()?;
            map.insert(key, value);

            match self.next() {
                (_, Token::Comma) => continue,
                (_, Token::RBrace) => break,
                (offset, tok) => {
                    return Err(LiteralError::new(
                        offset,
                        format!("expected ',' or '}}' in object, found {tok:?}"),
                    ))
                }
            }
        }

        Ok(Value::Object(map))
    }

    fn parse_array(&mut self) -> Result<Value, LiteralError> {
        let mut items = Vec::new();

        loop {
            if let (_, Token::RBracket) = &self.tokens[self.pos] {
                self.next();
                break;
            }

            items.push(self.parse_value()?);

            match self.next() {
                (_, Token::Comma) => continue,
                (_, Token::RBracket) => break,
                (offset, tok) => {
                    return Err(LiteralError::new(
                        offset,
                        format!("expected ',' or ']' in array, found {tok:?}"),
                    ))
                }
            }
        }

        Ok(Value::Array(items))
    }
}
