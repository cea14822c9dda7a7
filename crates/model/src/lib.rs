pub mod params;
pub mod value;

pub use params::ParamMap;
pub use value::Value;
