use clap::{Args, Parser, Subcommand, ValueEnum};

/// Compare traditional marketplace coverage against DPC plus catastrophic.
#[derive(Debug, Parser)]
#[command(name = "carecost", version, about)]
pub struct Cli {
    /// Output format.
    #[arg(long, global = true, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run a full cost comparison for one person.
    Compare(CompareArgs),
    /// Resolve a ZIP code to its county FIPS.
    County(CountyArgs),
}

#[derive(Debug, Args)]
pub struct CompareArgs {
    /// Age in years.
    #[arg(long)]
    pub age: u8,

    /// 5-digit ZIP code.
    #[arg(long)]
    pub zip: String,

    /// 2-letter state code.
    #[arg(long)]
    pub state: String,

    /// Number of chronic conditions under management.
    #[arg(long, default_value_t = 0)]
    pub conditions: u8,

    /// Expected primary-care visits per year.
    #[arg(long, default_value_t = 0)]
    pub visits: u16,

    /// Number of ongoing prescriptions.
    #[arg(long, default_value_t = 0)]
    pub prescriptions: u16,

    /// Annual household income, for subsidy-aware plan pricing.
    #[arg(long)]
    pub income: Option<f64>,

    /// Coverage year.
    #[arg(long)]
    pub year: Option<u16>,

    /// Skip live marketplace data and use estimators only.
    #[arg(long)]
    pub no_api: bool,

    /// Marketplace API key; falls back to MARKETPLACE_API_KEY.
    #[arg(long)]
    pub api_key: Option<String>,
}

#[derive(Debug, Args)]
pub struct CountyArgs {
    /// 5-digit ZIP code to resolve.
    pub zip: String,
}
