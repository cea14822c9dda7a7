use crate::value::Value;
use std::collections::HashMap;

/// Call-time arguments for a template render, keyed by declared name.
pub type ParamMap = HashMap<String, Value>;

#[macro_export]
macro_rules! value {
    (null) => {
        $crate::value::Value::Null
    };
    ($val:expr) => {
        $crate::value::Value::from($val)
    };
}

#[macro_export]
macro_rules! params {
    () => {
        $crate::params::ParamMap::new()
    };
    ($($key:expr => $val:expr),+ $(,)?) => {{
        let mut map = $crate::params::ParamMap::new();
        $(
            map.insert($key.to_string(), $crate::value::Value::from($val));
        )+
        map
    }};
}

/// Looks a name up in the argument map; a declared argument that was not
/// supplied reads as Null.
pub fn lookup(params: &ParamMap, name: &str) -> Value {
    params.get(name).cloned().unwrap_or(Value::Null)
}
