use duplex_engine::TemplateError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read the template file: {0}")]
    TemplateFileRead(#[from] std::io::Error),

    #[error("Failed to parse the arguments as JSON: {0}")]
    ArgsParse(#[from] serde_json::Error),

    #[error("Arguments must be a JSON object, got: {0}")]
    ArgsNotObject(String),

    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(serde_json::Error),

    #[error("Provide a template with --file or --sql")]
    MissingTemplate,

    #[error("Template check failed")]
    CheckFailed,
}
