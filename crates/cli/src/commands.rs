use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Render a template against JSON arguments and print the statement
    /// with its bind values
    Render {
        #[arg(long, help = "Template file path")]
        file: Option<String>,

        #[arg(long, help = "Inline template source, alternative to --file")]
        sql: Option<String>,

        #[arg(
            long,
            help = "Arguments as a JSON object; its keys declare the argument names"
        )]
        args: Option<String>,

        #[arg(long, help = "If set, prints the result as JSON instead of text")]
        json: bool,
    },
    /// Parse and validate a template without rendering it
    Check {
        #[arg(long, help = "Template file path")]
        file: Option<String>,

        #[arg(long, help = "Inline template source, alternative to --file")]
        sql: Option<String>,

        #[arg(long, help = "Declared argument names, comma-separated")]
        declare: Option<String>,
    },
    /// Print the parsed template AST as JSON
    Ast {
        #[arg(long, help = "Template file path")]
        file: Option<String>,

        #[arg(long, help = "Inline template source, alternative to --file")]
        sql: Option<String>,
    },
}
