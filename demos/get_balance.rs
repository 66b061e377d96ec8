use std::io;

use werbelokal::{Labels, MemoryPreferences, WerbelokalClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let username = std::env::var("WERBELOKAL_USERNAME").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "WERBELOKAL_USERNAME environment variable is required",
        )
    })?;
    let password = std::env::var("WERBELOKAL_PASSWORD").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "WERBELOKAL_PASSWORD environment variable is required",
        )
    })?;

    let client = WerbelokalClient::new()?;
    let prefs = MemoryPreferences::with_credentials(username, password);
    let mut spec = client.connector().init_spec(&Labels::default());

    let balance = client.update_balance(&prefs, &mut spec).await?;
    println!("{}: {balance}", spec.name());

    Ok(())
}
