use anyhow::{bail, Context, Result};
use std::{env, fs, path::Path};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};
use vtl_dataset::{dataset::parse_dataset, Config, ValidationClient};

const USAGE: &str = "usage: vtl-dataset parse <file> [name]\n       vtl-dataset lint <file>";

fn read_input(path: &str) -> Result<String> {
    fs::read_to_string(Path::new(path)).with_context(|| format!("reading {}", path))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = Config::from_env()?;

    // ─── init logging ────────────────────────────────────────────────
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.log_filter));
    fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        ["parse", path] | ["parse", path, _] => {
            let name = args.get(2).map(String::as_str);
            let text = read_input(path)?;
            let dataset =
                parse_dataset(&text, name).with_context(|| format!("parsing dataset in {}", path))?;
            info!(
                columns = dataset.columns().len(),
                rows = dataset.rows().len(),
                "parsed {}",
                path
            );
            println!("{}", serde_json::to_string_pretty(&dataset)?);
        }
        ["lint", path] => {
            let text = read_input(path)?;
            let client = ValidationClient::new(&cfg)?;
            info!(url = %client.endpoint(), "linting {}", path);
            let markers = client
                .lint(&text)
                .await
                .with_context(|| format!("validating {}", path))?;
            info!(markers = markers.len(), "validation finished");
            println!("{}", serde_json::to_string_pretty(&markers)?);
        }
        _ => bail!(USAGE),
    }

    Ok(())
}
