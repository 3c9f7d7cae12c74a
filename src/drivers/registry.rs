use std::{fmt::Display, str::FromStr};

use thiserror::Error;

use super::{Algorand, DriverOptions, SupplyDriver};

/// Chains a supply driver is registered for.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ChainId {
    Algorand,
}

#[derive(Debug, Error)]
pub enum ParseChainIdError {
    #[error("no supply driver registered for chain {0}")]
    UnknownChain(String),
}

impl FromStr for ChainId {
    type Err = ParseChainIdError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "algorand" => Ok(ChainId::Algorand),
            unknown_chain => Err(ParseChainIdError::UnknownChain(unknown_chain.to_string())),
        }
    }
}

impl Display for ChainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChainId::Algorand => write!(f, "algorand"),
        }
    }
}

/// Selects the driver for a chain. Options are handed through opaquely; each driver picks out
/// what it understands.
pub fn driver_for_chain(
    chain: ChainId,
    options: DriverOptions,
) -> Box<dyn SupplyDriver + Send + Sync> {
    match chain {
        ChainId::Algorand => Box::new(Algorand::new(options)),
    }
}
