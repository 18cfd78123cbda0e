mod generate;
mod schema;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ddl-maker")]
#[command(version)]
#[command(about = "Generate MySQL CREATE TABLE scripts from record descriptions", long_about = None)]
pub struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a DDL script from a YAML schema file
    Generate {
        /// YAML file holding a list of record descriptions
        schema: PathBuf,

        /// YAML config file (driver, engine, charset, output path)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output SQL file (default: config out_file_path, else stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Target driver (only mysql is supported)
        #[arg(long)]
        driver: Option<String>,

        /// Storage engine, e.g. InnoDB
        #[arg(long)]
        engine: Option<String>,

        /// Default character set, e.g. utf8mb4
        #[arg(long)]
        charset: Option<String>,

        /// Assume an `id` primary key for records that declare none
        #[arg(long)]
        implicit_id_pk: bool,
    },

    /// Print the JSON Schema of the config or schema file format
    Schema {
        /// Schema name: config or records (all when omitted)
        name: Option<String>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Generate {
            schema,
            config,
            output,
            driver,
            engine,
            charset,
            implicit_id_pk,
        } => generate::run(
            schema,
            config,
            output,
            driver,
            engine,
            charset,
            implicit_id_pk,
        ),
        Commands::Schema { name } => schema::run(name),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "ddl-maker", &mut io::stdout());
            Ok(())
        }
    }
}
