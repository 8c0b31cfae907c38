use std::path::PathBuf;

use termcolor::Buffer;
use thiserror::Error;

use crate::{
    eval::prelude::EvalError,
    parser::prelude::{ParseError, ParseErrorType},
};
use super::diagnostic::{Diagnostic, Label, Level, Location};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("failed to parse source code")]
    Parse {
        path: PathBuf,
        src: String,
        error: ParseError
    },
    #[error("program `{}` has no definitions", path.display())]
    EmptyProgram {
        path: PathBuf,
    },
    #[error("evaluation failed: {error}")]
    Eval {
        #[from]
        error: EvalError
    },
    #[error("IO operation failed")]
    StdIo {
        err: std::io::ErrorKind
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::StdIo { err: err.kind() }
    }
}

impl Error {
    pub fn pretty_string(&self) -> String {
        let mut nocolor = Buffer::no_color();
        self.pretty(&mut nocolor);
        String::from_utf8(nocolor.into_inner()).expect("Error printing produced invalid utf8")
    }

    pub fn pretty(&self, buf: &mut Buffer) {
        use std::io::Write;

        for diagnostic in self.to_diagnostics() {
            diagnostic.write(buf);
            writeln!(buf).expect("write new line diagnostic");
        }
    }

    pub fn to_diagnostics(&self) -> Vec<Diagnostic> {
        match self {
            Error::Parse { path, src, error } => {
                let (label, extra) = error.details();
                let text = extra.join("\n");

                let hint = match error.error {
                    ParseErrorType::UnexpectedEof { .. } =>
                        Some("Every `ap` takes exactly two expressions.".to_string()),
                    ParseErrorType::InvalidDefinition { .. } =>
                        Some("Blank lines are not allowed inside a program.".to_string()),
                    _ => None,
                };

                vec![Diagnostic {
                    title: "Syntax error".into(),
                    text,
                    hint,
                    level: Level::Error,
                    location: Some(Location {
                        src,
                        path: path.clone(),
                        label: Label {
                            text: Some(label.to_string()),
                            span: error.span,
                        },
                        extra_labels: vec![],
                    }),
                }]
            },
            Error::EmptyProgram { path } => {
                vec![Diagnostic {
                    title: "Empty program".into(),
                    text: format!("`{}` contains no definitions.", path.display()),
                    hint: None,
                    level: Level::Error,
                    location: None,
                }]
            },
            Error::Eval { error } => {
                let (title, extra) = error.details();

                vec![Diagnostic {
                    title: title.into(),
                    text: extra.join("\n"),
                    hint: None,
                    level: Level::Error,
                    location: None,
                }]
            },
            Error::StdIo { err, } => {
                vec![Diagnostic {
                    title: "Standard IO error".into(),
                    text: format!("{err}"),
                    hint: None,
                    level: Level::Error,
                    location: None,
                }]
            }
        }
    }
}
