use anyhow::Context;
use ddl_maker::{Config, Maker, Record};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

pub fn run(
    schema: PathBuf,
    config: Option<PathBuf>,
    output: Option<PathBuf>,
    driver: Option<String>,
    engine: Option<String>,
    charset: Option<String>,
    implicit_id_pk: bool,
) -> anyhow::Result<()> {
    let mut config = match config {
        Some(path) => Config::load(&path)?,
        None => Config::default(),
    };

    // Flags take precedence over the config file
    if let Some(driver) = driver {
        config = config.with_driver(driver);
    }
    if let Some(engine) = engine {
        config = config.with_engine(engine);
    }
    if let Some(charset) = charset {
        config = config.with_charset(charset);
    }
    if let Some(output) = output {
        config = config.with_out_file_path(output);
    }
    if implicit_id_pk {
        config = config.with_implicit_id_primary_key(true);
    }

    let records = Record::load_all(&schema)?;
    tracing::debug!(path = %schema.display(), records = records.len(), "loaded schema");

    let mut maker = Maker::new(config)?;
    maker.add_structs(records);

    let start_time = Instant::now();

    match maker.config().out_file_path.clone() {
        Some(out_path) => {
            maker
                .generate_file()
                .with_context(|| format!("failed to generate ddl from {}", schema.display()))?;
            eprintln!(
                "Wrote {} tables to {} in {:.3?}",
                maker.tables().len(),
                out_path.display(),
                start_time.elapsed()
            );
        }
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            maker
                .generate(&mut writer)
                .with_context(|| format!("failed to generate ddl from {}", schema.display()))?;
            writer.flush().context("failed to flush stdout")?;
        }
    }

    Ok(())
}
