//! Turns a normalized expression string into the token sequence the grammar
//! consumes. Identifier classification happens here already: a name followed
//! immediately by `(` must be a known function, any other name must be a
//! known constant.

use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use smallvec::SmallVec;

use crate::operators::{Const, Func};
use crate::value::Number;
use crate::{calcerr, CalcResult, ErrorKind};

/// Typical expressions fit on the stack with this many tokens.
pub const N_TOKENS_ON_STACK: usize = 32;

pub type TokenVec = SmallVec<[Token; N_TOKENS_ON_STACK]>;

/// Operator characters as scanned; whether a `-` negates or subtracts is
/// decided by the grammar position in [`parse`](crate::parse::parse).
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum OpToken {
    Plus,
    Minus,
    Mul,
    Div,
    Pow,
    Fact,
    Percent,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Token {
    Num(Number),
    Op(OpToken),
    LParen,
    RParen,
    Comma,
    Func(Func),
    Const(Const),
}

/// Checks whether `text` starts with a number literal and returns it if so.
/// At most one decimal point is allowed and a lone `.` is not a number.
pub fn is_numeric_text(text: &str) -> Option<&str> {
    let mut n_dots = 0;
    let n_num_chars = text
        .chars()
        .take_while(|c| {
            let is_dot = *c == '.';
            if is_dot {
                n_dots += 1;
            }
            c.is_ascii_digit() || is_dot
        })
        .count();
    if (n_num_chars > 1 && n_dots < 2) || (n_num_chars == 1 && n_dots == 0) {
        Some(&text[0..n_num_chars])
    } else {
        None
    }
}

/// Scans the text left to right into tokens.
///
/// # Errors
///
/// * `UnknownCharacter` if a character belongs to neither a number, an
///   operator, a parenthesis, a comma, nor an identifier,
/// * `UnknownIdentifier` if an identifier is not a known function name
///   (when followed by `(`) or constant name (otherwise).
///
pub fn tokenize(text: &str) -> CalcResult<TokenVec> {
    // the normalizer has already rewritten every supported non-ascii glyph
    if let Some(c) = text.chars().find(|c| !c.is_ascii()) {
        return Err(calcerr!(
            ErrorKind::UnknownCharacter,
            "unsupported character '{}'",
            c
        ));
    }

    lazy_static! {
        static ref RE_NAME: Regex = Regex::new(r"^[a-zA-Z][a-zA-Z0-9]*").unwrap();
    }

    let mut res = TokenVec::new();
    let mut cur_offset = 0usize;
    while cur_offset < text.len() {
        let text_rest = &text[cur_offset..];
        let c = text_rest.chars().next().unwrap_or(' ');
        if c.is_ascii_whitespace() {
            cur_offset += 1;
            continue;
        }
        let next_token = if let Some(op) = single_char_token(c) {
            cur_offset += 1;
            op
        } else if let Some(num_str) = is_numeric_text(text_rest) {
            cur_offset += num_str.len();
            Token::Num(Number::from_str(num_str)?)
        } else if let Some(name_match) = RE_NAME.find(text_rest) {
            let name = name_match.as_str();
            cur_offset += name.len();
            let is_call = text[cur_offset..].starts_with('(');
            classify_identifier(name, is_call)?
        } else {
            return Err(calcerr!(
                ErrorKind::UnknownCharacter,
                "how to parse the beginning of {}",
                text_rest
            ));
        };
        res.push(next_token);
    }
    Ok(res)
}

fn single_char_token(c: char) -> Option<Token> {
    Some(match c {
        '+' => Token::Op(OpToken::Plus),
        '-' => Token::Op(OpToken::Minus),
        '*' => Token::Op(OpToken::Mul),
        '/' => Token::Op(OpToken::Div),
        '^' => Token::Op(OpToken::Pow),
        '!' => Token::Op(OpToken::Fact),
        '%' => Token::Op(OpToken::Percent),
        '(' => Token::LParen,
        ')' => Token::RParen,
        ',' => Token::Comma,
        _ => return None,
    })
}

fn classify_identifier(name: &str, is_call: bool) -> CalcResult<Token> {
    if is_call {
        Func::from_name(name).map(Token::Func).ok_or_else(|| {
            calcerr!(ErrorKind::UnknownIdentifier, "unknown function '{}'", name)
        })
    } else {
        Const::from_name(name).map(Token::Const).ok_or_else(|| {
            calcerr!(ErrorKind::UnknownIdentifier, "unknown constant '{}'", name)
        })
    }
}
