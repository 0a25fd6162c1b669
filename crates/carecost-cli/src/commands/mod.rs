mod compare;
mod county;

use serde_json::Value;

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub async fn run(cli: &Cli) -> Result<Value, CliError> {
    match &cli.command {
        Command::Compare(args) => compare::run(args).await,
        Command::County(args) => county::run(args).await,
    }
}
