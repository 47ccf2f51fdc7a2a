use clap::Parser;
use typer_desktop::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    typer_desktop::run(cli).await
}
