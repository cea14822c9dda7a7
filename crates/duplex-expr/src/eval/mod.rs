pub(crate) mod binary;
pub mod runtime;

pub use runtime::Evaluator;
