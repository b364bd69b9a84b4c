//! Literals, with either a datatype or a language tag.

use crate::ns::{rdf, xsd};
use crate::{Iri, Result, TermError};
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use std::sync::Arc;

lazy_static! {
    /// A simplified BCP47 language tag: a primary subtag followed by any number of subtags.
    static ref LANGUAGE_TAG: Regex = Regex::new(r"^[A-Za-z]{1,8}(-[A-Za-z0-9]{1,8})*$").unwrap();
}

/// What qualifies the lexical form of a [`Literal`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LiteralKind {
    /// A typed literal.
    Datatype(Iri),
    /// A language-tagged string; the tag is stored lower-cased.
    Lang(Arc<str>),
}

/// An RDF literal.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Literal {
    lexical: Arc<str>,
    kind: LiteralKind,
}

impl Literal {
    /// A plain literal, typed as `xsd:string`.
    pub fn new_simple<U: AsRef<str>>(lexical: U) -> Self {
        Self::new_dt(lexical, xsd::string.clone())
    }

    /// A typed literal.
    pub fn new_dt<U: AsRef<str>>(lexical: U, datatype: Iri) -> Self {
        Literal {
            lexical: Arc::from(lexical.as_ref()),
            kind: LiteralKind::Datatype(datatype),
        }
    }

    /// A language-tagged string; fails if `lang` is not a well-formed language tag.
    pub fn new_lang<U: AsRef<str>, V: AsRef<str>>(lexical: U, lang: V) -> Result<Self> {
        let lang = lang.as_ref();
        if !LANGUAGE_TAG.is_match(lang) {
            return Err(TermError::InvalidLanguageTag(lang.to_string()));
        }
        Ok(Literal {
            lexical: Arc::from(lexical.as_ref()),
            kind: LiteralKind::Lang(Arc::from(lang.to_ascii_lowercase())),
        })
    }

    /// The lexical form of this literal.
    pub fn lexical_form(&self) -> &str {
        &self.lexical
    }

    /// The datatype of this literal (`rdf:langString` for language-tagged strings).
    pub fn datatype(&self) -> &Iri {
        match &self.kind {
            LiteralKind::Datatype(iri) => iri,
            LiteralKind::Lang(_) => &*rdf::langString,
        }
    }

    /// The language tag of this literal, if any.
    pub fn language_tag(&self) -> Option<&str> {
        match &self.kind {
            LiteralKind::Lang(tag) => Some(tag),
            LiteralKind::Datatype(_) => None,
        }
    }

    /// Whether this literal is a language-tagged string or a typed one.
    pub fn kind(&self) -> &LiteralKind {
        &self.kind
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("\"")?;
        for c in self.lexical.chars() {
            match c {
                '"' => f.write_str("\\\"")?,
                '\\' => f.write_str("\\\\")?,
                '\n' => f.write_str("\\n")?,
                '\r' => f.write_str("\\r")?,
                _ => write!(f, "{c}")?,
            }
        }
        f.write_str("\"")?;
        match &self.kind {
            LiteralKind::Lang(tag) => write!(f, "@{tag}"),
            LiteralKind::Datatype(dt) if *dt == *xsd::string => Ok(()),
            LiteralKind::Datatype(dt) => write!(f, "^^{dt}"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn simple_is_xsd_string() {
        let l = Literal::new_simple("hello");
        assert_eq!(l.datatype(), &*xsd::string);
        assert_eq!(l.language_tag(), None);
        assert_eq!(l.to_string(), r#""hello""#);
    }

    #[test]
    fn lang_tag_is_normalized() {
        let l1 = Literal::new_lang("chat", "FR").unwrap();
        let l2 = Literal::new_lang("chat", "fr").unwrap();
        assert_eq!(l1, l2);
        assert_eq!(l1.datatype(), &*rdf::langString);
        assert_eq!(l1.to_string(), r#""chat"@fr"#);
    }

    #[test]
    fn bad_lang_tag() {
        assert!(Literal::new_lang("chat", "").is_err());
        assert!(Literal::new_lang("chat", "fr_FR").is_err());
    }

    #[test]
    fn escaping() {
        let l = Literal::new_dt("a\"b\n", xsd::integer.clone());
        assert_eq!(
            l.to_string(),
            r#""a\"b\n"^^<http://www.w3.org/2001/XMLSchema#integer>"#
        );
    }
}
