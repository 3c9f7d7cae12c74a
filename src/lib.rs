pub mod drivers;
pub mod env;
pub mod log;
pub mod request;
pub mod supply;
pub mod units;

pub use drivers::coin_supply;
pub use drivers::driver_for_chain;
pub use drivers::Capabilities;
pub use drivers::ChainId;
pub use drivers::DriverError;
pub use drivers::DriverOptions;
pub use drivers::SupplyDriver;
pub use supply::Coin;
pub use supply::ModifierBalance;
pub use supply::Supply;
pub use supply::SupplyModifier;
