use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = contrackt_lib::Cli::parse();
    if let Err(e) = contrackt_lib::run(cli).await {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
