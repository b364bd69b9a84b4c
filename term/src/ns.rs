//! # Standard namespaces
//!
//! This module provides the few IRIs of standard vocabularies
//! required by the node model itself.

/// Helper for creating a "namespace module"
/// defining a set of [`Iri`](crate::Iri)s within a given IRI space.
///
/// # Safety
/// This macro is conceptually unsafe,
/// as it is never checked that the prefix IRI is a valid IRI.
#[macro_export]
macro_rules! namespace {
    ($iri_prefix:expr, $($suffix:ident),*) => {
        /// Prefix used in this namespace.
        pub static PREFIX: &str = $iri_prefix;
        lazy_static::lazy_static! {
            $(
                /// Generated IRI.
                #[allow(non_upper_case_globals, non_camel_case_types)]
                pub static ref $suffix: $crate::Iri =
                    $crate::Iri::new_unchecked(concat!($iri_prefix, stringify!($suffix)));
            )*
        }
    };
}

/// The standard `rdf:` namespace.
pub mod rdf {
    namespace!(
        "http://www.w3.org/1999/02/22-rdf-syntax-ns#",
        langString,
        first,
        rest,
        nil
    );
}

/// The standard `xsd:` namespace.
pub mod xsd {
    namespace!(
        "http://www.w3.org/2001/XMLSchema#",
        string,
        boolean,
        integer,
        decimal,
        double
    );
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn generated_iris() {
        assert_eq!(
            xsd::string.as_str(),
            "http://www.w3.org/2001/XMLSchema#string"
        );
        assert_eq!(
            rdf::langString.as_str(),
            "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString"
        );
        assert!(xsd::PREFIX.ends_with('#'));
    }
}
