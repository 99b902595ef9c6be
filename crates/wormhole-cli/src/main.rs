use clap::Parser;
use std::process::ExitCode;
use tracing::info;
use wormhole_cli::{logging, App, Cli, Outcome};
use wormhole_shortener::ShortenerSettings;
use wormhole_storage::FileStore;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    logging::init(cli.log_format);

    info!(
        store_path = %cli.store_path.display(),
        base_url = %cli.base_url,
        seeded = cli.seed.is_some(),
        "starting wormhole"
    );

    let settings = ShortenerSettings::builder().base_url(cli.base_url).build();
    let app = App::new(FileStore::new(cli.store_path), settings, cli.seed);

    let mut stdout = std::io::stdout().lock();
    match app.run(cli.command, &mut stdout).await? {
        Outcome::Success => Ok(ExitCode::SUCCESS),
        Outcome::Failure(message) => {
            eprintln!("{}", message);
            Ok(ExitCode::FAILURE)
        }
    }
}
