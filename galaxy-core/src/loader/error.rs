use crate::utils::prelude::SrcSpan;

#[derive(Debug, Clone, PartialEq)]
pub enum LoadWarning {
    /// A name defined on more than one line. The later definition wins.
    ///
    /// Example:
    /// ```text
    /// x = 1
    /// x = 2 <- `x` is already defined
    /// ```
    Redefinition {
        name: String,
        first: SrcSpan,
        second: SrcSpan,
    },
    /// A definition named like a built-in. Every use of the name in the
    /// program now refers to the definition.
    ///
    /// Example:
    /// ```text
    /// add = mul
    /// ```
    ShadowedCombinator {
        name: String,
        location: SrcSpan,
    },
}

impl LoadWarning {
    pub fn location(&self) -> SrcSpan {
        match self {
            LoadWarning::Redefinition { second, .. } => *second,
            LoadWarning::ShadowedCombinator { location, .. } => *location,
        }
    }
}
