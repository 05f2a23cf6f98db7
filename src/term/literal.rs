//! Literal value representation

use std::fmt;

/// Datatype of a literal
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Datatype {
    /// Plain literal (no datatype)
    Plain,
    /// Language-tagged literal
    Language(String),
    /// Typed literal with datatype URI
    Typed(String),
}

/// An RDF literal: a lexical form plus its datatype
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Literal {
    lexical: String,
    datatype: Datatype,
}

impl Literal {
    /// Create a plain literal
    pub fn plain(lexical: String) -> Self {
        Literal {
            lexical,
            datatype: Datatype::Plain,
        }
    }

    /// Create a typed literal
    pub fn typed(lexical: String, datatype: String) -> Self {
        Literal {
            lexical,
            datatype: Datatype::Typed(datatype),
        }
    }

    /// Create a language-tagged literal
    pub fn with_language(lexical: String, lang: String) -> Self {
        Literal {
            lexical,
            datatype: Datatype::Language(lang.to_lowercase()),
        }
    }

    /// Get the lexical form
    pub fn lexical(&self) -> &str {
        &self.lexical
    }

    /// Get the datatype
    pub fn datatype(&self) -> &Datatype {
        &self.datatype
    }

    /// Get the language tag if present
    pub fn language(&self) -> Option<&str> {
        match &self.datatype {
            Datatype::Language(lang) => Some(lang),
            _ => None,
        }
    }

    /// Get the datatype URI if present
    pub fn datatype_uri(&self) -> Option<&str> {
        match &self.datatype {
            Datatype::Typed(uri) => Some(uri),
            _ => None,
        }
    }

    /// Try to parse the lexical form as an integer
    pub fn as_integer(&self) -> Option<i64> {
        self.lexical.parse().ok()
    }
}

impl fmt::Debug for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.datatype {
            Datatype::Plain => write!(f, "\"{}\"", self.lexical),
            Datatype::Language(lang) => write!(f, "\"{}\"@{}", self.lexical, lang),
            Datatype::Typed(dt) => write!(f, "\"{}\"^^<{}>", self.lexical, dt),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_literal() {
        let lit = Literal::plain("hello".into());
        assert_eq!(lit.lexical(), "hello");
        assert_eq!(format!("{}", lit), "\"hello\"");
    }

    #[test]
    fn test_typed_literal() {
        let lit = Literal::typed("42".into(), "http://www.w3.org/2001/XMLSchema#integer".into());
        assert_eq!(lit.as_integer(), Some(42));
        assert!(lit.datatype_uri().is_some());
    }

    #[test]
    fn test_equality_includes_datatype() {
        let plain = Literal::plain("42".into());
        let typed = Literal::typed("42".into(), "http://www.w3.org/2001/XMLSchema#integer".into());
        assert_ne!(plain, typed);
    }
}
