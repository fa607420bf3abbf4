use plugboard_client::PluginApi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let base_url = std::env::var("PLUGBOARD_URL")
        .unwrap_or_else(|_| "http://127.0.0.1:7700/api".to_string());
    let api = PluginApi::new(&base_url);

    match api.list_plugins().await {
        Ok(list) => {
            println!("Installed plugins: {}", list.len());
        }
        Err(e) => {
            eprintln!("Error: {e}");
        }
    }

    match api.list_market_plugins().await {
        Ok(list) => {
            println!("Market plugins: {}", list.len());
        }
        Err(e) => {
            eprintln!("Error: {e}");
        }
    }

    Ok(())
}
