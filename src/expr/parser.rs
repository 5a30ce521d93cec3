//! Recursive-descent parser for the algebraic text form
//!
//! Grammar, lowest precedence first:
//!
//! ```text
//! sum     := product (('+' | '-') product)*
//! product := unary (('*' | '/') unary)*
//! unary   := ('-' | '+') unary | power
//! power   := atom (('**' | '^') unary)?
//! atom    := number | symbol | function '(' sum ')' | '(' sum ')'
//! ```

use super::{Expr, ExprError, Function};

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Number(v) => v.to_string(),
            Token::Ident(name) => name.clone(),
            Token::Plus => "+".to_string(),
            Token::Minus => "-".to_string(),
            Token::Star => "*".to_string(),
            Token::Slash => "/".to_string(),
            Token::Caret => "**".to_string(),
            Token::LParen => "(".to_string(),
            Token::RParen => ")".to_string(),
        }
    }
}

/// Parse `text` into an unsimplified expression tree
pub(super) fn parse(text: &str) -> Result<Expr, ExprError> {
    let tokens = tokenize(text)?;
    if tokens.is_empty() {
        return Err(ExprError::Empty);
    }

    let mut parser = Parser { tokens, pos: 0 };
    let expr = parser.parse_sum()?;
    if let Some((position, token)) = parser.tokens.get(parser.pos) {
        return Err(ExprError::UnexpectedToken {
            token: token.describe(),
            position: *position,
        });
    }
    Ok(expr)
}

fn tokenize(text: &str) -> Result<Vec<(usize, Token)>, ExprError> {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let c = bytes[i];
        let start = i;
        match c {
            b' ' | b'\t' | b'\n' | b'\r' => {
                i += 1;
                continue;
            }
            b'+' => tokens.push((start, Token::Plus)),
            b'-' => tokens.push((start, Token::Minus)),
            b'/' => tokens.push((start, Token::Slash)),
            b'^' => tokens.push((start, Token::Caret)),
            b'(' => tokens.push((start, Token::LParen)),
            b')' => tokens.push((start, Token::RParen)),
            b'*' => {
                if bytes.get(i + 1) == Some(&b'*') {
                    i += 1;
                    tokens.push((start, Token::Caret));
                } else {
                    tokens.push((start, Token::Star));
                }
            }
            b'0'..=b'9' | b'.' => {
                i = scan_number(bytes, i);
                let literal = &text[start..i];
                let value = literal
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| ExprError::InvalidNumber(literal.to_string()))?;
                tokens.push((start, Token::Number(value)));
                continue;
            }
            c if c.is_ascii_alphabetic() || c == b'_' => {
                while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
                    i += 1;
                }
                tokens.push((start, Token::Ident(text[start..i].to_string())));
                continue;
            }
            _ => {
                let ch = text[start..].chars().next().unwrap_or('?');
                return Err(ExprError::UnexpectedCharacter { ch, position: start });
            }
        }
        i += 1;
    }

    Ok(tokens)
}

/// Return the end offset of the numeric literal starting at `i`
fn scan_number(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'.') {
        i += 1;
    }
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        if j < bytes.len() && bytes[j].is_ascii_digit() {
            while j < bytes.len() && bytes[j].is_ascii_digit() {
                j += 1;
            }
            i = j;
        }
    }
    i
}

struct Parser {
    tokens: Vec<(usize, Token)>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(_, t)| t)
    }

    fn next(&mut self) -> Option<(usize, Token)> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, expected: Token) -> Result<(), ExprError> {
        match self.next() {
            Some((_, token)) if token == expected => Ok(()),
            Some((position, token)) => Err(ExprError::UnexpectedToken {
                token: token.describe(),
                position,
            }),
            None => Err(ExprError::UnexpectedEnd),
        }
    }

    fn parse_sum(&mut self) -> Result<Expr, ExprError> {
        let mut terms = vec![self.parse_product()?];
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.pos += 1;
                    terms.push(self.parse_product()?);
                }
                Some(Token::Minus) => {
                    self.pos += 1;
                    terms.push(negate(self.parse_product()?));
                }
                _ => break,
            }
        }
        Ok(if terms.len() == 1 {
            terms.remove(0)
        } else {
            Expr::Add(terms)
        })
    }

    fn parse_product(&mut self) -> Result<Expr, ExprError> {
        let mut factors = vec![self.parse_unary()?];
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.pos += 1;
                    factors.push(self.parse_unary()?);
                }
                Some(Token::Slash) => {
                    self.pos += 1;
                    let divisor = self.parse_unary()?;
                    factors.push(Expr::Pow(Box::new(divisor), Box::new(Expr::Num(-1.0))));
                }
                _ => break,
            }
        }
        Ok(if factors.len() == 1 {
            factors.remove(0)
        } else {
            Expr::Mul(factors)
        })
    }

    fn parse_unary(&mut self) -> Result<Expr, ExprError> {
        match self.peek() {
            Some(Token::Minus) => {
                self.pos += 1;
                Ok(negate(self.parse_unary()?))
            }
            Some(Token::Plus) => {
                self.pos += 1;
                self.parse_unary()
            }
            _ => self.parse_power(),
        }
    }

    fn parse_power(&mut self) -> Result<Expr, ExprError> {
        let base = self.parse_atom()?;
        if self.peek() == Some(&Token::Caret) {
            self.pos += 1;
            let exponent = self.parse_unary()?;
            return Ok(Expr::Pow(Box::new(base), Box::new(exponent)));
        }
        Ok(base)
    }

    fn parse_atom(&mut self) -> Result<Expr, ExprError> {
        match self.next() {
            Some((_, Token::Number(v))) => Ok(Expr::Num(v)),
            Some((_, Token::Ident(name))) => {
                if self.peek() != Some(&Token::LParen) {
                    return Ok(Expr::Sym(name));
                }
                let function =
                    Function::from_name(&name).ok_or(ExprError::UnknownFunction(name))?;
                self.pos += 1;
                let argument = self.parse_sum()?;
                self.expect(Token::RParen)?;
                Ok(Expr::Func(function, Box::new(argument)))
            }
            Some((_, Token::LParen)) => {
                let inner = self.parse_sum()?;
                self.expect(Token::RParen)?;
                Ok(inner)
            }
            Some((position, token)) => Err(ExprError::UnexpectedToken {
                token: token.describe(),
                position,
            }),
            None => Err(ExprError::UnexpectedEnd),
        }
    }
}

fn negate(expr: Expr) -> Expr {
    Expr::Mul(vec![Expr::Num(-1.0), expr])
}
