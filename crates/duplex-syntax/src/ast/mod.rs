pub mod expr;
pub mod literal;
pub mod node;
pub mod operator;
pub mod path;
pub mod span;
pub mod visitor;
