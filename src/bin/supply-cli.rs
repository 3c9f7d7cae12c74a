use clap::Parser;
use tracing::info;

use supply_analysis::{
    coin_supply, driver_for_chain, env::ENV_CONFIG, log, ChainId, Coin, DriverOptions,
    SupplyModifier,
};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Chain to fetch supply figures from.
    #[clap(long, default_value = "algorand")]
    chain: String,

    /// Coin identifier, used for logging only.
    #[clap(long, default_value = "algorand")]
    coin: String,

    /// Wallet address whose balance is excluded from circulating supply. Repeatable.
    #[clap(long = "modifier")]
    modifiers: Vec<String>,
}

#[tokio::main]
pub async fn main() -> Result<(), anyhow::Error> {
    log::init();

    let cli = Cli::parse();

    let chain = cli.chain.parse::<ChainId>()?;
    let driver = driver_for_chain(
        chain,
        DriverOptions {
            base_url: ENV_CONFIG.explorer_url.clone(),
            api_key: ENV_CONFIG.driver_api_key.clone(),
        },
    );

    let coin = Coin {
        id: cli.coin,
        modifiers: cli.modifiers.into_iter().map(SupplyModifier::from).collect(),
    };

    info!(%chain, coin = %coin.id, modifiers = coin.modifiers.len(), "fetching supply");

    let supply = coin_supply(driver.as_ref(), &coin).await?;

    println!("{}", serde_json::to_string_pretty(&supply)?);

    Ok(())
}
