mod algorand;
mod registry;

pub use algorand::Algorand;
pub use registry::driver_for_chain;
pub use registry::ChainId;
pub use registry::ParseChainIdError;

use async_trait::async_trait;
use mockall::{automock, predicate::*};
use thiserror::Error;

use crate::request::RequestError;
use crate::supply::{Coin, Supply, SupplyModifier};

/// Operations a driver advertises. Callers check these before invoking the corresponding
/// operation; drivers do not advertise what their explorer cannot serve.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Capabilities {
    pub max: bool,
    pub balances: bool,
}

/// Caller-supplied construction options, passed through the registry to whichever driver gets
/// selected. Drivers ignore what they don't need; the Algorand explorer takes no API key.
#[derive(Clone, Debug, Default)]
pub struct DriverOptions {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
}

#[derive(Debug, Error)]
pub enum DriverError {
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error("driver does not support fetching {operation}")]
    Unsupported { operation: &'static str },
}

/// One implementation per chain, selected through [`driver_for_chain`].
#[automock]
#[async_trait]
pub trait SupplyDriver {
    fn supports(&self) -> Capabilities;

    /// Hard cap on token units that will ever exist.
    async fn fetch_max_supply(&self) -> Result<f64, DriverError>;

    /// Token units currently minted.
    async fn fetch_total_supply(&self) -> Result<f64, DriverError>;

    /// Whole-token balance of a single excluded address.
    async fn fetch_balance(&self, modifier: &SupplyModifier) -> Result<f64, DriverError>;

    /// Fetches max, total, and every modifier balance, reduced to a normalized [`Supply`].
    async fn get_supply(&self, coin: &Coin) -> Result<Supply, DriverError>;
}

/// System-side entry point: checks the advertised capabilities before asking the driver for a
/// full supply figure, so an unsupported request fails without a single network call.
pub async fn coin_supply(driver: &dyn SupplyDriver, coin: &Coin) -> Result<Supply, DriverError> {
    let supports = driver.supports();

    if !supports.max {
        return Err(DriverError::Unsupported {
            operation: "max supply",
        });
    }

    if !supports.balances && !coin.modifiers.is_empty() {
        return Err(DriverError::Unsupported {
            operation: "balances",
        });
    }

    driver.get_supply(coin).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coin_with_modifiers(modifiers: Vec<SupplyModifier>) -> Coin {
        Coin {
            id: "algorand".to_string(),
            modifiers,
        }
    }

    #[tokio::test]
    async fn coin_supply_rejects_missing_balances_support_test() {
        let mut driver = MockSupplyDriver::new();
        driver.expect_supports().return_const(Capabilities {
            max: true,
            balances: false,
        });
        driver.expect_get_supply().never();

        let coin = coin_with_modifiers(vec!["A".into()]);
        let result = coin_supply(&driver, &coin).await;

        assert!(matches!(
            result,
            Err(DriverError::Unsupported {
                operation: "balances"
            })
        ));
    }

    #[tokio::test]
    async fn coin_supply_rejects_missing_max_support_test() {
        let mut driver = MockSupplyDriver::new();
        driver.expect_supports().return_const(Capabilities {
            max: false,
            balances: true,
        });
        driver.expect_get_supply().never();

        let coin = coin_with_modifiers(vec![]);
        let result = coin_supply(&driver, &coin).await;

        assert!(matches!(result, Err(DriverError::Unsupported { .. })));
    }

    #[tokio::test]
    async fn coin_supply_allows_modifierless_coin_without_balances_support_test() {
        let mut driver = MockSupplyDriver::new();
        driver.expect_supports().return_const(Capabilities {
            max: true,
            balances: false,
        });
        driver
            .expect_get_supply()
            .times(1)
            .returning(|_| Ok(Supply::from_parts(100.0, 90.0, vec![])));

        let coin = coin_with_modifiers(vec![]);
        let supply = coin_supply(&driver, &coin).await.unwrap();

        assert_eq!(supply.circulating, 90.0);
    }

    #[tokio::test]
    async fn coin_supply_delegates_to_driver_test() {
        let mut driver = MockSupplyDriver::new();
        driver.expect_supports().return_const(Capabilities {
            max: true,
            balances: true,
        });
        driver
            .expect_get_supply()
            .times(1)
            .returning(|coin: &Coin| {
                assert_eq!(coin.modifiers.len(), 1);
                Ok(Supply::from_parts(100.0, 90.0, vec![]))
            });

        let coin = coin_with_modifiers(vec!["A".into()]);
        let supply = coin_supply(&driver, &coin).await.unwrap();

        assert_eq!(supply.total, 90.0);
    }
}
