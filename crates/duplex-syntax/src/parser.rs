use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "grammar/duplex.pest"]
pub struct DuplexParser;
