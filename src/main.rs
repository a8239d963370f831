#[tokio::main]
async fn main() {
    if let Err(e) = shopcore::run().await {
        eprintln!("{:?}", e);
        std::process::exit(1);
    }
}
