use std::rc::Rc;

use crate::{lexer::prelude::{lex, lex_at, Spanned, Token}, utils::prelude::SrcSpan};
use super::error::{ParseError, ParseErrorType};
use super::ast::{Definition, Expr};

/// Separator between a definition's name and its body.
pub const DEFINITION_SEPARATOR: &str = " = ";

pub struct Parser<T: Iterator<Item = Spanned>> {
    pub current_token: Option<Spanned>,
    consumed: usize,
    last_end: u32,

    tokens: T,
}

// An `ap` whose operands are still being read.
enum Pending {
    Function,
    Argument(Rc<Expr>),
}

impl<T: Iterator<Item = Spanned>> Parser<T> {
    pub fn new(input: T) -> Self {
        Self::starting_at(input, 0)
    }

    /// Like `new`, but an empty input reports its errors at `offset`.
    pub fn starting_at(input: T, offset: u32) -> Self {
        let mut parser = Self {
            current_token: None,
            consumed: 0,
            last_end: offset,

            tokens: input,
        };

        parser.current_token = parser.tokens.next();

        parser
    }

    pub fn next_token(&mut self) -> Option<Spanned> {
        let t = self.current_token.take();

        if let Some((_, _, end)) = &t {
            self.consumed += 1;
            self.last_end = *end;
            self.current_token = self.tokens.next();
        }

        t
    }

    /// Number of tokens consumed so far.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Reads exactly one expression and leaves any following tokens in place.
    ///
    /// `ap` frames are kept on an explicit stack, so a long chain of
    /// applications does not deepen the native call stack.
    pub fn parse_expression(&mut self) -> Result<Rc<Expr>, ParseError> {
        let mut pending: Vec<Pending> = vec![];

        loop {
            let token = match self.next_token() {
                Some((_, token, _)) => token,
                None => return parse_error(
                    ParseErrorType::UnexpectedEof {
                        open_applications: pending.len()
                    },
                    SrcSpan::point(self.last_end)
                ),
            };

            let mut expr = match token {
                Token::Ap => {
                    pending.push(Pending::Function);
                    continue;
                },
                Token::Int(value) => Expr::number(value),
                Token::Symbol(name) => Expr::symbol(name),
            };

            loop {
                match pending.pop() {
                    None => return Ok(expr),
                    Some(Pending::Function) => {
                        pending.push(Pending::Argument(expr));
                        break;
                    },
                    Some(Pending::Argument(function)) => {
                        expr = Expr::ap(function, expr);
                    }
                }
            }
        }
    }

    pub fn expect_end(&mut self) -> Result<(), ParseError> {
        match self.current_token.take() {
            None => Ok(()),
            Some((start, token, end)) => {
                let mut span = SrcSpan { start, end };

                while let Some((_, _, end)) = self.tokens.next() {
                    span.end = end;
                }

                parse_error(ParseErrorType::TrailingTokens { token }, span)
            }
        }
    }

    /// Parses the whole input as a single expression.
    pub fn parse(&mut self) -> Result<Rc<Expr>, ParseError> {
        let expr = self.parse_expression()?;
        self.expect_end()?;

        Ok(expr)
    }
}

/// Parses a whole string as one expression; trailing tokens are an error.
pub fn parse_expression(src: &str) -> Result<Rc<Expr>, ParseError> {
    Parser::new(lex(src)).parse()
}

/// Parses one expression from the front of `tokens` and returns it together
/// with the tokens it did not consume. Spans count tokens, not bytes.
pub fn parse_tokens<S: AsRef<str>>(tokens: &[S]) -> Result<(Rc<Expr>, &[S]), ParseError> {
    let spanned = tokens.iter()
        .enumerate()
        .map(|(idx, word)| (idx as u32, Token::from_word(word.as_ref()), idx as u32 + 1));

    let mut parser = Parser::new(spanned);
    let expr = parser.parse_expression()?;

    Ok((expr, &tokens[parser.consumed()..]))
}

/// Parses one `name = expression` line starting at byte `offset` of its file.
pub fn parse_definition(line: &str, offset: u32) -> Result<Definition, ParseError> {
    let line_span = SrcSpan::from(offset, offset as usize + line.len());
    let pieces = line.split(DEFINITION_SEPARATOR).collect::<Vec<&str>>();

    let (name, body) = match pieces[..] {
        [name, body] => (name, body),
        _ => return parse_error(
            ParseErrorType::InvalidDefinition { pieces: pieces.len() },
            line_span
        ),
    };

    let location = SrcSpan::from(offset, offset as usize + name.len());

    if name.is_empty() || name.contains(char::is_whitespace) {
        return parse_error(
            ParseErrorType::InvalidName { name: name.to_string() },
            location
        );
    }

    let body_offset = location.end + DEFINITION_SEPARATOR.len() as u32;
    let expr = Parser::starting_at(lex_at(body, body_offset), body_offset).parse()?;

    Ok(Definition {
        name: name.to_string(),
        expr,
        location,
        line: line_span,
    })
}

pub fn parse_error<T>(error: ParseErrorType, span: SrcSpan) -> Result<T, ParseError> {
    Err(ParseError { error, span })
}
