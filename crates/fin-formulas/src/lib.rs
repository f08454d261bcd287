//! Time-value-of-money routines with spreadsheet-compatible semantics.
//!
//! Every function is pure and deterministic. Iterative solvers run a bounded number of steps and
//! report [`FinanceError::NoConvergence`] instead of looping; none of them retry with other seeds.

mod cashflows;
mod depreciation;
pub mod error;
mod iterative;
mod polynomial;
mod rates;
mod schedules;
mod time_value;

pub use cashflows::{irr, mirr, npv, xirr, xnpv, DEFAULT_XIRR_GUESS};
pub use depreciation::sln;
pub use error::{FinanceError, FinanceResult};
pub use rates::{effect, nominal};
pub use schedules::fvschedule;
pub use time_value::{fv, ipmt, nper, pmt, ppmt, pv, rate, DEFAULT_RATE_GUESS};
