use std::{io::Write, path::PathBuf, rc::Rc};

use galaxy_core::{
    bridge::prelude::{render, Rendered},
    environment::prelude::SymbolTable,
    parser::prelude::{parse_definition, parse_expression, Definition, ParseError, DEFINITION_SEPARATOR},
    utils::prelude::Error
};
use log::debug;

use crate::cli::print_error;

const PROMPT: &str = ">> ";

pub fn start(definitions: Vec<Definition>) -> std::io::Result<()> {
	let stdin = std::io::stdin();
	let mut session = Session::new(definitions);

	loop {
		let mut input = String::from("");

		print!("{}", PROMPT);
		std::io::stdout().flush()?;

		if stdin.read_line(&mut input)? == 0 {
			return Ok(());
		}

		if let Some('\n') = input.chars().next_back() {
			input.pop();
		}
		if let Some('\r') = input.chars().next_back() {
			input.pop();
		}

		match input.as_str() {
			"" => {},
			".exit" => return Ok(()),
			line => {
				if let Err(err) = session.run(line) {
					print_error(&err);
				}
			}
		}
	}
}

struct Session {
	definitions: Vec<Definition>,
	table: SymbolTable,
}

impl Session {
	fn new(definitions: Vec<Definition>) -> Self {
		let table = definitions.iter().collect();

		Self {
			definitions,
			table,
		}
	}

	fn run(&mut self, line: &str) -> Result<(), Error> {
		if line.contains(DEFINITION_SEPARATOR) {
			let name = self.define(line)?;
			println!("{name} defined");

			return Ok(());
		}

		println!("{}", self.evaluate(line)?);

		Ok(())
	}

	fn evaluate(&self, line: &str) -> Result<Rendered, Error> {
		let expr = parse_expression(line)
			.map_err(|error| input_error(line, error))?;

		Ok(render(&expr, &self.table)?)
	}

	/// Adds a definition, replacing any earlier one with the same name.
	///
	/// Memoized nodes may hold results that relied on the name being unbound
	/// or bound to another body, so every definition is parsed afresh and
	/// the old nodes are dropped with the old table.
	fn define(&mut self, line: &str) -> Result<String, Error> {
		let definition = parse_definition(line, 0)
			.map_err(|error| input_error(line, error))?;
		let name = definition.name.clone();

		let fresh = reparse(self.definitions.iter().chain(std::iter::once(&definition)))?;

		self.table = fresh.iter().collect();
		self.definitions = fresh.into_iter()
			.filter(|definition| {
				self.table.get(&definition.name)
					.is_some_and(|expr| Rc::ptr_eq(expr, &definition.expr))
			})
			.collect();

		debug!("rebuilt {} definition(s)", self.definitions.len());

		Ok(name)
	}
}

fn reparse<'a>(definitions: impl Iterator<Item = &'a Definition>) -> Result<Vec<Definition>, Error> {
	definitions
		.map(|definition| {
			let line = definition.to_string();
			parse_definition(&line, 0).map_err(|error| input_error(&line, error))
		})
		.collect()
}

fn input_error(line: &str, error: ParseError) -> Error {
	Error::Parse {
		path: PathBuf::from("<repl>"),
		src: line.to_string(),
		error,
	}
}
