//! The survey result model.
//!
//! A [`ParsedSql`] owns the top-level [`ParsedQuery`]s of a script. Each
//! query owns its subqueries and common table expressions, so the nesting of
//! the script is the nesting of the model. Every query, token and error keeps
//! the [`TokenLocation`] it came from.
crate::reexport!(option);
crate::reexport!(parsed_sql);
crate::reexport!(query);
crate::reexport!(query_error);
crate::reexport!(table);
