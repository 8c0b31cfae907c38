pub mod error;

pub mod prelude {
    pub use super::{
        error::*,
        load,
        load_source,
        parse_program,
        Program
    };
}


use std::{collections::HashMap, io::BufReader, path::PathBuf, rc::Rc};

use log::debug;
use utf8_chars::BufReadCharsExt;

use crate::{
    environment::prelude::SymbolTable,
    eval::prelude::Combinator,
    parser::prelude::{parse_definition, Definition, ParseError},
    utils::prelude::{Error, ProgramWarningEmitter, SrcSpan, WarningEmitter, WarningEmitterIO}
};

use self::error::LoadWarning;

/// A loaded program file.
#[derive(Debug)]
pub struct Program {
    pub path: PathBuf,
    pub src: String,
    /// In file order, duplicates included.
    pub definitions: Vec<Definition>,
    pub table: SymbolTable,
}

/// Splits program text into definitions, one per line.
///
/// A single trailing newline is allowed; any other empty line is an invalid
/// definition. Spans are byte offsets into `src`.
pub fn parse_program(src: &str) -> Result<Vec<Definition>, ParseError> {
    let body = src.strip_suffix('\n').unwrap_or(src);

    let mut definitions = vec![];
    let mut offset = 0u32;

    for raw in body.split('\n') {
        let line = raw.strip_suffix('\r').unwrap_or(raw);

        definitions.push(parse_definition(line, offset)?);
        offset += raw.len() as u32 + 1;
    }

    Ok(definitions)
}

/// Reads the program at `path` as a UTF-8 character stream and loads it.
pub fn load(
    path: PathBuf,
    warnings: Rc<dyn WarningEmitterIO>,
) -> Result<Program, Error> {
    let file = std::fs::File::open(&path)?;
    let file_size = file.metadata()?.len() as usize;

    let mut src = String::with_capacity(file_size);
    let mut reader = BufReader::new(file);

    for c in reader.chars() {
        src.push(c?);
    }

    load_source(path, src, warnings)
}

/// Loads program text that is already in memory. `path` is only used for
/// diagnostics.
pub fn load_source(
    path: PathBuf,
    src: String,
    warnings: Rc<dyn WarningEmitterIO>,
) -> Result<Program, Error> {
    if src.is_empty() || src == "\n" {
        return Err(Error::EmptyProgram { path });
    }

    let definitions = match parse_program(&src) {
        Ok(definitions) => definitions,
        Err(error) => return Err(Error::Parse { path, src, error }),
    };

    let warnings = ProgramWarningEmitter::new(
        path.clone(),
        &src,
        WarningEmitter::new(warnings)
    );

    let table = {
        let mut table = SymbolTable::new();
        let mut seen: HashMap<&str, SrcSpan> = HashMap::new();

        for definition in &definitions {
            if let Some(first) = seen.insert(&definition.name, definition.location) {
                warnings.emit(LoadWarning::Redefinition {
                    name: definition.name.clone(),
                    first,
                    second: definition.location,
                });
            }

            if Combinator::from_name(&definition.name).is_some() {
                warnings.emit(LoadWarning::ShadowedCombinator {
                    name: definition.name.clone(),
                    location: definition.location,
                });
            }

            table.define(definition.name.clone(), Rc::clone(&definition.expr));
        }

        table
    };

    debug!(
        "loaded {} definition(s), {} name(s), {} warning(s) from {}",
        definitions.len(),
        table.len(),
        warnings.count(),
        path.display()
    );

    drop(warnings);

    Ok(Program {
        path,
        src,
        definitions,
        table,
    })
}
