use crate::error::CliError;
use clap::Parser;
use commands::Commands;
use duplex_engine::{TemplateError, compile};
use model::{ParamMap, Value};
use tracing::Level;

mod commands;
mod error;
mod output;

#[derive(Parser)]
#[command(name = "duplex", version = "0.1.0", about = "Two-way SQL template compiler")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<(), CliError> {
    // Initialize logger
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            file,
            sql,
            args,
            json,
        } => {
            let source = load_source(file, sql)?;
            let (params, declared) = parse_args(args.as_deref())?;
            let declared: Vec<&str> = declared.iter().map(String::as_str).collect();

            let template = compile(&source, &declared)?;
            let prepared = template.prepare(&params)?;
            if json {
                output::print_prepared_json(&prepared)?;
            } else {
                output::print_prepared(&prepared);
            }
        }
        Commands::Check { file, sql, declare } => {
            let source = load_source(file, sql)?;
            let declared = split_names(declare.as_deref());
            let declared: Vec<&str> = declared.iter().map(String::as_str).collect();

            match compile(&source, &declared) {
                Ok(template) => {
                    println!("Template OK: {} slot(s)", template.slot_names().len());
                    output::print_slots(&template);
                }
                Err(error) => {
                    match &error {
                        TemplateError::Parse(parse) => eprintln!("{}", parse.format_error()),
                        other => eprintln!("{other}"),
                    }
                    return Err(CliError::CheckFailed);
                }
            }
        }
        Commands::Ast { file, sql } => {
            let source = load_source(file, sql)?;
            let ast = duplex_syntax::parse(&source).map_err(TemplateError::from)?;
            let json = serde_json::to_string_pretty(&ast).map_err(CliError::JsonSerialize)?;
            println!("{json}");
        }
    }

    Ok(())
}

fn load_source(file: Option<String>, sql: Option<String>) -> Result<String, CliError> {
    match (file, sql) {
        (Some(path), _) => Ok(std::fs::read_to_string(path)?),
        (None, Some(sql)) => Ok(sql),
        (None, None) => Err(CliError::MissingTemplate),
    }
}

/// The keys of the arguments object double as the declared argument names,
/// so an argument that should read as NULL is passed as JSON null.
fn parse_args(args: Option<&str>) -> Result<(ParamMap, Vec<String>), CliError> {
    let Some(text) = args else {
        return Ok((ParamMap::new(), Vec::new()));
    };
    let json: serde_json::Value = serde_json::from_str(text)?;
    let serde_json::Value::Object(map) = json else {
        return Err(CliError::ArgsNotObject(json.to_string()));
    };
    let mut params = ParamMap::new();
    let mut declared = Vec::with_capacity(map.len());
    for (name, value) in map {
        declared.push(name.clone());
        params.insert(name, Value::from(value));
    }
    Ok((params, declared))
}

fn split_names(list: Option<&str>) -> Vec<String> {
    list.map(|names| {
        names
            .split(',')
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect()
    })
    .unwrap_or_default()
}
