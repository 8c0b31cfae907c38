use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    // ap <expr> <expr>
    Ap,
    // [+|-]{<digit>}, anything wider than i64 lexes as a symbol
    Int(i64),
    // any other run of non-whitespace characters
    Symbol(String),
}

impl Token {
    pub fn from_word(word: &str) -> Self {
        if word == "ap" {
            return Token::Ap;
        }

        match word.parse::<i64>() {
            Ok(value) => Token::Int(value),
            Err(_) => Token::Symbol(word.to_string()),
        }
    }

    pub fn as_literal(&self) -> String {
        match self {
            Token::Ap => "ap".to_string(),
            Token::Int(value) => value.to_string(),
            Token::Symbol(name) => name.clone(),
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_literal())
    }
}
