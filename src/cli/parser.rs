use std::path::PathBuf;

use clap::Parser;
use indoc::indoc;

use super::commands::Commands;

const HELP_TEMPLATE: &str = indoc! {"
    EXAMPLES:
        %BINARY_NAME% followers.bin add alice bob carol
        %BINARY_NAME% followers.bin get alice
        %BINARY_NAME% followers.bin del alice bob
        %BINARY_NAME% followers.bin del-by-prefix alice bo
        %BINARY_NAME% followers.bin update alice dan
        %BINARY_NAME% followers.bin exist alice
"};

#[derive(Parser, Debug)]
#[command(
    name = env!("CARGO_PKG_NAME"),
    version = env!("CARGO_PKG_VERSION"),
    about = env!("CARGO_PKG_DESCRIPTION"),
    after_help = HELP_TEMPLATE.replace("%BINARY_NAME%", env!("CARGO_PKG_NAME"))
)]
pub struct Cli {
    /// Path to the backing file (created if absent).
    pub storage: PathBuf,

    /// Mapping length in bytes; omit (or pass a value <= 0) for the 64 GiB default.
    #[arg(long)]
    pub length: Option<i64>,

    #[command(subcommand)]
    pub command: Commands,
}
