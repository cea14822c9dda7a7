pub mod builder;
pub mod cache;
pub mod compile;
pub mod error;
mod factor;
pub mod guard;
pub mod loader;
pub mod prepared;
mod render;
pub mod segment;
pub mod template;

pub use builder::{BuilderConfig, SqlBuilder};
pub use cache::TemplateCache;
pub use compile::{CompileOptions, compile, compile_with};
pub use error::TemplateError;
pub use loader::SqlLoader;
pub use prepared::PreparedQuery;
pub use template::{CompiledTemplate, ParamValue};
