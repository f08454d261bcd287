//! Request validation and dispatch for the financial function catalog.
//!
//! A caller hands [`dispatch`] a function name and a JSON object of arguments. The object is
//! checked against the function's [`schema::Schema`], defaults are filled in, domain rules that
//! the schema cannot express are applied, and the numeric routine from `fin_formulas` runs. The
//! outcome is always an [`Envelope`].

mod args;
mod builtins;
mod envelope;
mod error;
mod functions;
pub mod schema;
mod validate;
mod wrapper;

pub use args::{parse_date, Args};
pub use envelope::Envelope;
pub use error::DispatchError;
pub use functions::{
    dispatch, evaluate, iter_function_specs, lookup_function, FunctionImpl, FunctionSpec,
};
pub use validate::{validate, Validation};
pub use wrapper::dispatch_wrapped;
