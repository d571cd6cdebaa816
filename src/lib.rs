//! Structural survey and grammar-driven autocomplete for SQL scripts.
//!
//! [`survey`] turns a script into a location-indexed model of its nested
//! queries: top-level statements, parenthesized subqueries and common table
//! expressions, each with the tables it references, the tokens it spans and
//! the syntax errors found inside it. [`autocomplete`] ranks keyword and
//! positional suggestions at a cursor offset, including for partially typed
//! or invalid text.
//!
//! Both entry points are backed by a pluggable [`Dialect`]; the crate ships
//! [`GenericDialect`], a T-SQL flavoured grammar.
//!
//! ```rust
//! let parsed = sqlsurveyor::survey("SELECT a FROM (SELECT b FROM u) x");
//! let query = parsed.query_at(0).unwrap();
//! assert_eq!(query.subqueries.len(), 1);
//! assert!(query.referenced_tables.contains_key("x"));
//! ```
reexport!(testing, test);
reexport!(error);
reexport!(config);
reexport!(location);
reexport!(model);
reexport!(grammar);
reexport!(sql);
reexport!(dialect);
reexport!(survey);
reexport!(autocomplete);
reexport!(surveyor);
#[allow(unused_imports)]
pub(crate) use tracing::{debug, error, info, span, trace, warn};

#[macro_export]
macro_rules! reexport {
    ($module:ident) => {
        $crate::reexport!($module, false);
    };
    ($module:ident, test) => {
        $crate::reexport!($module, true);
    };
    ($module:ident, $is_test:literal) => {
        #[cfg_attr($is_test, cfg(test))]
        mod $module;
        #[cfg_attr($is_test, cfg(test))]
        #[allow(unused_imports)]
        #[allow(ambiguous_glob_reexports)]
        pub use $module::*;
    };
}
