//! Builds an expression tree from the token sequence. The grammar encodes
//! the precedence ladder, loosest binding first:
//!
//! ```text
//! sum     := term { ('+'|'-') term }            left-associative
//! term    := factor { ('*'|'/') factor | '%' }  left-associative
//! factor  := '-' factor | power                 prefix negation
//! power   := postfix [ '^' factor ]             right-associative
//! postfix := primary { '!' }
//! primary := NUMBER | CONST | '(' sum ')' | FUNC '(' sum {',' sum} ')'
//! ```
//!
//! Note that the exponent is a `factor`, which gives `2^3^2 == 2^(3^2)` and
//! lets `2^-3` parse, while `-2^2` still negates the whole power.

use crate::operators::{BinKind, Const, Func, UnaryKind};
use crate::parser::{OpToken, Token};
use crate::value::Number;
use crate::{calcerr, CalcResult, ErrorKind};

/// Owned expression tree; one is built per evaluation call and dropped with
/// the result.
#[derive(Clone, PartialEq, Debug)]
pub enum Ast {
    Num(Number),
    Const(Const),
    Unary(UnaryKind, Box<Ast>),
    Bin(BinKind, Box<Ast>, Box<Ast>),
    Call(Func, Vec<Ast>),
}

/// Parses a complete token sequence into an [`Ast`](Ast).
///
/// # Errors
///
/// * `EmptyExpression` if there are no tokens at all,
/// * `MissingOperand` if an operand is expected but an operator, a closing
///   parenthesis, or the end of input is found, e.g. after a trailing `+`,
/// * `UnbalancedParentheses` if a `(` is never closed or a stray `)` is left
///   over after a complete expression,
/// * `WrongArity` if a function is called with the wrong argument count,
/// * `UnexpectedToken` for any other leftover token, e.g. `2 3`.
///
pub fn parse(tokens: &[Token]) -> CalcResult<Ast> {
    if tokens.is_empty() {
        return Err(calcerr!(ErrorKind::EmptyExpression, "nothing to parse"));
    }
    let mut cursor = Cursor { tokens, idx: 0 };
    let ast = cursor.sum()?;
    match cursor.peek() {
        None => Ok(ast),
        Some(Token::RParen) => Err(calcerr!(
            ErrorKind::UnbalancedParentheses,
            "closing parenthesis without a matching opening one"
        )),
        Some(t) => Err(calcerr!(
            ErrorKind::UnexpectedToken,
            "trailing {:?} after a complete expression",
            t
        )),
    }
}

struct Cursor<'a> {
    tokens: &'a [Token],
    idx: usize,
}

impl<'a> Cursor<'a> {
    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.idx)
    }

    fn advance(&mut self) {
        self.idx += 1;
    }

    /// Consumes the next token if it is the given operator.
    fn eat_op(&mut self, op: OpToken) -> bool {
        match self.peek() {
            Some(Token::Op(found)) if *found == op => {
                self.advance();
                true
            }
            _ => false,
        }
    }

    fn sum(&mut self) -> CalcResult<Ast> {
        let mut lhs = self.term()?;
        loop {
            let kind = if self.eat_op(OpToken::Plus) {
                BinKind::Add
            } else if self.eat_op(OpToken::Minus) {
                BinKind::Sub
            } else {
                return Ok(lhs);
            };
            let rhs = self.term()?;
            lhs = Ast::Bin(kind, Box::new(lhs), Box::new(rhs));
        }
    }

    fn term(&mut self) -> CalcResult<Ast> {
        let mut lhs = self.factor()?;
        loop {
            if self.eat_op(OpToken::Percent) {
                lhs = Ast::Unary(UnaryKind::Percent, Box::new(lhs));
            } else if self.eat_op(OpToken::Mul) {
                let rhs = self.factor()?;
                lhs = Ast::Bin(BinKind::Mul, Box::new(lhs), Box::new(rhs));
            } else if self.eat_op(OpToken::Div) {
                let rhs = self.factor()?;
                lhs = Ast::Bin(BinKind::Div, Box::new(lhs), Box::new(rhs));
            } else {
                return Ok(lhs);
            }
        }
    }

    fn factor(&mut self) -> CalcResult<Ast> {
        if self.eat_op(OpToken::Minus) {
            let operand = self.factor()?;
            Ok(Ast::Unary(UnaryKind::Neg, Box::new(operand)))
        } else {
            self.power()
        }
    }

    fn power(&mut self) -> CalcResult<Ast> {
        let base = self.postfix()?;
        if self.eat_op(OpToken::Pow) {
            // recursing into factor makes `^` right-associative and allows a
            // negated exponent as in `2^-3`
            let exponent = self.factor()?;
            Ok(Ast::Bin(BinKind::Pow, Box::new(base), Box::new(exponent)))
        } else {
            Ok(base)
        }
    }

    fn postfix(&mut self) -> CalcResult<Ast> {
        let mut operand = self.primary()?;
        while self.eat_op(OpToken::Fact) {
            operand = Ast::Unary(UnaryKind::Fact, Box::new(operand));
        }
        Ok(operand)
    }

    fn primary(&mut self) -> CalcResult<Ast> {
        match self.peek() {
            Some(Token::Num(n)) => {
                let n = n.clone();
                self.advance();
                Ok(Ast::Num(n))
            }
            Some(Token::Const(c)) => {
                let c = *c;
                self.advance();
                Ok(Ast::Const(c))
            }
            Some(Token::LParen) => {
                self.advance();
                let inner = self.sum()?;
                self.expect_rparen()?;
                Ok(inner)
            }
            Some(Token::Func(f)) => {
                let f = *f;
                self.advance();
                self.call(f)
            }
            Some(Token::Comma) => Err(calcerr!(
                ErrorKind::UnexpectedToken,
                "comma outside of a function call"
            )),
            Some(Token::Op(op)) => Err(calcerr!(
                ErrorKind::MissingOperand,
                "expected an operand, found operator {:?}",
                op
            )),
            Some(Token::RParen) => Err(calcerr!(
                ErrorKind::MissingOperand,
                "expected an operand, found a closing parenthesis"
            )),
            None => Err(calcerr!(
                ErrorKind::MissingOperand,
                "expression ends where an operand is expected"
            )),
        }
    }

    fn call(&mut self, f: Func) -> CalcResult<Ast> {
        // the tokenizer only emits Func when a `(` follows
        match self.peek() {
            Some(Token::LParen) => self.advance(),
            _ => {
                return Err(calcerr!(
                    ErrorKind::UnexpectedToken,
                    "function {} without an argument list",
                    f
                ))
            }
        }
        let mut args = vec![self.sum()?];
        while let Some(Token::Comma) = self.peek() {
            self.advance();
            args.push(self.sum()?);
        }
        self.expect_rparen()?;
        if args.len() != f.arity() {
            return Err(calcerr!(
                ErrorKind::WrongArity,
                "{} takes {} argument(s), got {}",
                f,
                f.arity(),
                args.len()
            ));
        }
        Ok(Ast::Call(f, args))
    }

    fn expect_rparen(&mut self) -> CalcResult<()> {
        match self.peek() {
            Some(Token::RParen) => {
                self.advance();
                Ok(())
            }
            _ => Err(calcerr!(
                ErrorKind::UnbalancedParentheses,
                "opening parenthesis is never closed"
            )),
        }
    }
}
