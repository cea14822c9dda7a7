use crate::error::CliError;
use duplex_engine::{CompiledTemplate, PreparedQuery};
use model::Value;
use serde_json::json;

/// Prints the rendered statement followed by one line per bind value.
pub fn print_prepared(prepared: &PreparedQuery) {
    println!("{}", prepared.statement());
    if prepared.binds().is_empty() {
        return;
    }
    println!();
    for (name, value) in prepared.binds() {
        println!("  :{name} = {value}");
    }
}

pub fn print_prepared_json(prepared: &PreparedQuery) -> Result<(), CliError> {
    let binds: serde_json::Map<String, serde_json::Value> = prepared
        .binds()
        .iter()
        .map(|(name, value)| (name.clone(), value_to_json(value)))
        .collect();
    let payload = json!({
        "statement": prepared.statement(),
        "binds": binds,
    });
    let text = serde_json::to_string_pretty(&payload).map_err(CliError::JsonSerialize)?;
    println!("{text}");
    Ok(())
}

/// Prints each slot with its value source and the conditions guarding it.
pub fn print_slots(template: &CompiledTemplate) {
    for name in template.slot_names() {
        let Some(param) = template.param(name) else {
            continue;
        };
        if param.guard().is_always_true() {
            println!("  :{name} <- {}", param.source());
        } else {
            let terms: Vec<String> = param
                .guard()
                .terms()
                .iter()
                .map(|term| {
                    if term.expected {
                        term.condition_text.clone()
                    } else {
                        format!("not ({})", term.condition_text)
                    }
                })
                .collect();
            println!("  :{name} <- {} when {}", param.source(), terms.join(" and "));
        }
    }
}

fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Int(v) => json!(v),
        Value::Float(v) => json!(v),
        Value::Decimal(d) => json!(d.to_string()),
        Value::String(s) => json!(s),
        Value::Boolean(b) => json!(b),
        Value::Date(d) => json!(d.to_string()),
        Value::Timestamp(t) => json!(t.to_rfc3339()),
        Value::Uuid(u) => json!(u.to_string()),
        Value::Json(j) => j.clone(),
        Value::Bytes(b) => {
            let hex: String = b.iter().map(|byte| format!("{byte:02x}")).collect();
            json!(format!("0x{hex}"))
        }
    }
}
