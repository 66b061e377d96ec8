use std::io;

use werbelokal::{
    ConnectorCommand, DefaultPrefix, Labels, MemoryPreferences, MessageText, RawPhoneNumber,
    Tariff, WerbelokalClient,
};

fn required_env(name: &str) -> Result<String, io::Error> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let username = required_env("WERBELOKAL_USERNAME")?;
    let password = required_env("WERBELOKAL_PASSWORD")?;
    let phone_raw = required_env("WERBELOKAL_PHONE")?;
    let tariff = std::env::var("WERBELOKAL_TARIFF").unwrap_or_else(|_| "1".to_owned());
    let prefix = std::env::var("WERBELOKAL_PREFIX").unwrap_or_else(|_| "+49".to_owned());
    let message = std::env::var("WERBELOKAL_MESSAGE")
        .unwrap_or_else(|_| "Hello from the werbelokal example.".to_owned());

    let client = WerbelokalClient::new()?;
    let prefs = MemoryPreferences::with_credentials(username, password);
    let mut spec = client.connector().init_spec(&Labels::default());

    let tariff = Tariff::from_id(&tariff)?;
    let label = spec
        .sub_connector(tariff)
        .map(|it| it.label.clone())
        .unwrap_or_default();

    let command = ConnectorCommand::send(
        tariff,
        vec![RawPhoneNumber::new(phone_raw)?],
        DefaultPrefix::new(prefix)?,
        None,
        MessageText::new(message)?,
    )?;

    client.send(&prefs, &mut spec, &command).await?;
    println!("message accepted ({label}), status: {:?}", spec.status());

    Ok(())
}
