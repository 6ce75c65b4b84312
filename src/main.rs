use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = config_echo::cli::Cli::parse();
    if let Err(e) = config_echo::cmd::dispatch(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
