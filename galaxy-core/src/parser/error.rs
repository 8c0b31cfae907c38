use crate::{lexer::prelude::Token, utils::prelude::SrcSpan};

#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorType {
    UnexpectedEof {
        open_applications: usize,
    },
    TrailingTokens {
        token: Token,
    },
    InvalidDefinition {
        pieces: usize,
    },
    InvalidName {
        name: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub error: ParseErrorType,
    pub span: SrcSpan
}

impl ParseError {
    pub fn details(&self) -> (&'static str, Vec<String>) {
        match &self.error {
            ParseErrorType::UnexpectedEof { open_applications } => {
                let messages = match open_applications {
                    0 => vec!["Expected an expression".to_string()],
                    n => vec![format!("{n} `ap` still waiting for arguments")],
                };

                ("Unexpected end of input", messages)
            },
            ParseErrorType::TrailingTokens { token } => (
                "Unexpected token after a complete expression",
                vec![format!("Found `{}`, expected end of input", token.as_literal())]
            ),
            ParseErrorType::InvalidDefinition { pieces } => {
                let found = match pieces {
                    0 | 1 => "no ` = ` separator".to_string(),
                    n => format!("{} ` = ` separators", n - 1),
                };

                (
                    "Invalid definition",
                    vec![
                        "Expected `<name> = <expression>`".to_string(),
                        format!("Found {found}"),
                    ]
                )
            },
            ParseErrorType::InvalidName { name } => (
                "Invalid definition name",
                vec![format!("`{name}` is not a single word")]
            ),
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (message, messages) = self.details();

        write!(f, "[at {}] {message}", self.span)?;

        for line in messages {
            write!(f, "; {line}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ParseError {}
