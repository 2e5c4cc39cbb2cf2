use crate::api::HttpEndpoint;
use anyhow::{Context, Result};
use courier_core::{PeerEndpoint, DEFAULT_TIMEOUT};

pub async fn execute(server: &str) -> Result<()> {
    let endpoint =
        HttpEndpoint::new(server, DEFAULT_TIMEOUT).context("Failed to create HTTP client")?;
    let pem = endpoint
        .fetch_public_key()
        .await
        .context("Failed to fetch server public key")?;

    print!("{}", pem);
    if !pem.ends_with('\n') {
        println!();
    }
    Ok(())
}
