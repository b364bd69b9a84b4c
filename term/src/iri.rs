//! IRIs, validated with [`oxiri`].

use crate::{Result, TermError};
use std::fmt;
use std::sync::Arc;

/// An absolute IRI.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Iri(Arc<str>);

impl Iri {
    /// Build an IRI, checking that `iri` is a valid absolute IRI.
    pub fn new<U: AsRef<str>>(iri: U) -> Result<Self> {
        let txt = iri.as_ref();
        match oxiri::Iri::parse(txt) {
            Ok(_) => Ok(Iri(Arc::from(txt))),
            Err(err) => Err(TermError::InvalidIri {
                iri: txt.to_string(),
                reason: err.to_string(),
            }),
        }
    }

    /// Build an IRI without checking it.
    ///
    /// # Pre-condition
    ///
    /// `iri` must be a valid absolute IRI.
    pub fn new_unchecked<U: AsRef<str>>(iri: U) -> Self {
        debug_assert!(
            oxiri::Iri::parse(iri.as_ref()).is_ok(),
            "invalid IRI {:?}",
            iri.as_ref()
        );
        Iri(Arc::from(iri.as_ref()))
    }

    /// The text of this IRI.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Iri {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn valid_iri() {
        let i = Iri::new("http://champin.net/").unwrap();
        assert_eq!(i.as_str(), "http://champin.net/");
        assert_eq!(i.to_string(), "<http://champin.net/>");
    }

    #[test]
    fn invalid_iri() {
        assert!(Iri::new("1://champin.net/").is_err());
        assert!(Iri::new("relative/path").is_err());
    }
}
