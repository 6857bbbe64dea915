use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Comma-separated list of available ingredients
    #[arg(short, long)]
    pub ingredients: String,

    /// Optional dietary restrictions (e.g. vegan, gluten-free)
    #[arg(short, long)]
    pub dietary_restrictions: Option<String>,
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
