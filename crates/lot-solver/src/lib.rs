//! Rule engine, objective, widening loop and result projection on
//! top of a pluggable CP-SAT-shaped [`backend::Solver`].

pub mod backend;
pub mod cpsat;
pub mod error;
pub mod objective;
pub mod result;
pub mod rules;
pub mod stub;
pub mod widen;

pub use backend::{Outcome, Solver};
pub use cpsat::CpSatSolver;
pub use error::SolveError;
pub use result::ScheduleResult;
pub use stub::StubSolver;
pub use widen::{solve, WidenConfig};
