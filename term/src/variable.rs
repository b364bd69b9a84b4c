//! Variables, as found in SPARQL queries and Notation3 formulae.

use crate::{Result, TermError};
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use std::sync::Arc;

lazy_static! {
    /// Production of SPARQL's VARNAME according to the
    /// [SPARQL spec](https://www.w3.org/TR/sparql11-query/#rVARNAME).
    static ref VARNAME: Regex = Regex::new(r"(?x)
      ^
      [A-Za-z\u{c0}-\u{d6}\u{d8}-\u{f6}\u{f8}-\u{2ff}\u{370}-\u{37D}\u{37F}-\u{1FFF}\u{200C}-\u{200D}\u{2070}-\u{218F}\u{2C00}-\u{2FEF}\u{3001}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFFD}\u{10000}-\u{EFFFF}_0-9]
      [A-Za-z\u{c0}-\u{d6}\u{d8}-\u{f6}\u{f8}-\u{2ff}\u{370}-\u{37D}\u{37F}-\u{1FFF}\u{200C}-\u{200D}\u{2070}-\u{218F}\u{2C00}-\u{2FEF}\u{3001}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFFD}\u{10000}-\u{EFFFF}_0-9\u{00B7}\u{0300}-\u{036F}\u{203F}-\u{2040}]*
      $
    ").unwrap();
}

/// A variable, identified by its name (without the leading `?`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Variable(Arc<str>);

impl Variable {
    /// Build a variable, checking that `name` is a valid SPARQL variable name.
    pub fn new<U: AsRef<str>>(name: U) -> Result<Self> {
        if VARNAME.is_match(name.as_ref()) {
            Ok(Variable(Arc::from(name.as_ref())))
        } else {
            Err(TermError::InvalidVariableName(name.as_ref().to_string()))
        }
    }

    /// Build a variable without checking its name.
    ///
    /// # Pre-condition
    ///
    /// `name` must be a valid SPARQL variable name.
    pub fn new_unchecked<U: AsRef<str>>(name: U) -> Self {
        debug_assert!(
            VARNAME.is_match(name.as_ref()),
            "invalid variable name {:?}",
            name.as_ref()
        );
        Variable(Arc::from(name.as_ref()))
    }

    /// The name of this variable.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "?{}", self.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn names() {
        assert!(Variable::new("x").is_ok());
        assert!(Variable::new("x_1").is_ok());
        assert!(Variable::new("").is_err());
        assert!(Variable::new("?x").is_err());
        assert!(Variable::new("a b").is_err());
        assert_eq!(Variable::new_unchecked("foo").to_string(), "?foo");
    }
}
