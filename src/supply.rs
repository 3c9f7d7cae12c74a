use std::fmt;

use serde::{Deserialize, Serialize};

use crate::units::AlgoF64;

/// A wallet address whose balance is excluded from circulating supply, e.g. a treasury, locked,
/// or burn address. Compared by value; the address must already be safe for URL path inclusion.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SupplyModifier(pub String);

impl fmt::Display for SupplyModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SupplyModifier {
    fn from(address: &str) -> Self {
        Self(address.to_string())
    }
}

impl From<String> for SupplyModifier {
    fn from(address: String) -> Self {
        Self(address)
    }
}

/// A coin as the aggregation layer sees it: an identifier plus the addresses excluded from its
/// circulating supply.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Coin {
    pub id: String,
    pub modifiers: Vec<SupplyModifier>,
}

/// A fetched balance paired back with the modifier that produced it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ModifierBalance {
    pub reference: SupplyModifier,
    pub balance: AlgoF64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Supply {
    pub max: f64,
    pub total: f64,
    pub circulating: f64,
    pub modifiers: Vec<ModifierBalance>,
}

impl Supply {
    /// Computes circulating supply as an ordered left fold over the modifier balances. The fold
    /// order matches the input order, keeping the output reproducible even though subtraction
    /// over reals is order-independent.
    pub fn from_parts(max: f64, total: f64, modifiers: Vec<ModifierBalance>) -> Self {
        let circulating = modifiers
            .iter()
            .fold(total, |current, modifier| current - modifier.balance);

        Self {
            max,
            total,
            circulating,
            modifiers,
        }
    }
}
