use std::fmt::Display;
use std::iter::Peekable;

use super::token::Token;

pub type Spanned = (u32, Token, u32);

#[derive(Debug)]
pub struct Lexer<T: Iterator<Item = (u32, char)>> {
	input: Peekable<T>,
	position: u32,
}

impl<T: Iterator<Item = (u32, char)>> Display for Lexer<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "Lexer {{ position: {} }}", self.position)
	}
}

impl<T: Iterator<Item = (u32, char)>> Lexer<T> {
	pub fn new(input: T) -> Self {
		Self {
			input: input.peekable(),
			position: 0,
		}
	}

	pub fn next_token(&mut self) -> Option<Spanned> {
		self.skip_whitespace();

		let start = match self.input.peek() {
			Some(&(pos, _)) => pos,
			None => return None,
		};

		let mut word = String::new();

		while let Some(&(pos, ch)) = self.input.peek() {
			if ch.is_whitespace() {
				break;
			}

			word.push(ch);
			self.position = pos + ch.len_utf8() as u32;
			self.input.next();
		}

		Some((start, Token::from_word(&word), self.position))
	}

	fn skip_whitespace(&mut self) {
		while let Some(&(pos, ch)) = self.input.peek() {
			if !ch.is_whitespace() {
				break;
			}

			self.position = pos + ch.len_utf8() as u32;
			self.input.next();
		}
	}
}

impl<T: Iterator<Item = (u32, char)>> Iterator for Lexer<T> {
	type Item = Spanned;

	fn next(&mut self) -> Option<Self::Item> {
		self.next_token()
	}
}

pub fn lex(src: &str) -> Lexer<impl Iterator<Item = (u32, char)> + '_> {
	lex_at(src, 0)
}

/// Lexes `src` as if it started at byte `offset` of a larger source.
pub fn lex_at(src: &str, offset: u32) -> Lexer<impl Iterator<Item = (u32, char)> + '_> {
	Lexer::new(src.char_indices().map(move |(i, c)| (offset + i as u32, c)))
}
