use std::time::Duration;

use async_trait::async_trait;
use format_url::FormatUrl;
use futures::future::try_join_all;
use futures::try_join;
use serde::Deserialize;

use crate::request::RateLimitedClient;
use crate::supply::{Coin, ModifierBalance, Supply, SupplyModifier};
use crate::units::MicroAlgoNewtype;

use super::{Capabilities, DriverError, DriverOptions, SupplyDriver};

const ALGOEXPLORER_API: &str = "https://api.algoexplorer.io";

// The explorer allows roughly ten requests per second per IP.
const REQUEST_SPACING: Duration = Duration::from_millis(100);

/// Status figures stay in the chain's smallest unit; only per-address balances are converted
/// to whole tokens.
#[derive(Debug, Deserialize)]
struct StatusResponse {
    maxsupply: MicroAlgoNewtype,
    totalsupply: MicroAlgoNewtype,
}

#[derive(Debug, Deserialize)]
struct AccountResponse {
    balance: MicroAlgoNewtype,
}

/// Driver for the Algorand chain, backed by the AlgoExplorer API.
pub struct Algorand {
    server_url: String,
    client: RateLimitedClient,
}

impl Algorand {
    pub fn new(options: DriverOptions) -> Self {
        let server_url = options
            .base_url
            .unwrap_or_else(|| ALGOEXPLORER_API.to_string());

        Self {
            server_url,
            client: RateLimitedClient::new(REQUEST_SPACING),
        }
    }

    pub fn new_with_url(server_url: &str) -> Self {
        Self::new(DriverOptions {
            base_url: Some(server_url.to_string()),
            ..DriverOptions::default()
        })
    }

    async fn fetch_status(&self) -> Result<StatusResponse, DriverError> {
        let url = FormatUrl::new(&self.server_url)
            .with_path_template("/v1/status")
            .format_url();
        Ok(self.client.get_json(&url).await?)
    }
}

#[async_trait]
impl SupplyDriver for Algorand {
    fn supports(&self) -> Capabilities {
        Capabilities {
            max: true,
            balances: true,
        }
    }

    async fn fetch_max_supply(&self) -> Result<f64, DriverError> {
        let status = self.fetch_status().await?;
        Ok(status.maxsupply.into())
    }

    async fn fetch_total_supply(&self) -> Result<f64, DriverError> {
        let status = self.fetch_status().await?;
        Ok(status.totalsupply.into())
    }

    async fn fetch_balance(&self, modifier: &SupplyModifier) -> Result<f64, DriverError> {
        // The address lands in the path as-is. Callers supply addresses that are already safe
        // for URL path inclusion.
        let url = format!("{}/v1/account/{}", self.server_url, modifier);
        let account: AccountResponse = self.client.get_json(&url).await?;
        Ok(account.balance.to_algo())
    }

    async fn get_supply(&self, coin: &Coin) -> Result<Supply, DriverError> {
        let (max, total) = try_join!(self.fetch_max_supply(), self.fetch_total_supply())?;

        let modifiers = try_join_all(coin.modifiers.iter().map(|modifier| async move {
            let balance = self.fetch_balance(modifier).await?;
            Ok::<_, DriverError>(ModifierBalance {
                reference: modifier.clone(),
                balance,
            })
        }))
        .await?;

        Ok(Supply::from_parts(max, total, modifiers))
    }
}
