//! dYdX SoloMargin `operate` argument semantics
//!
//! Takes the argument tree an ABI decoder produced for
//! `operate(Account.Info[] accounts, Actions.ActionArgs[] actions)` and turns
//! the generic action tuples into named, rescaled fields.
//!
//! ```rust,ignore
//! use txsemantics_dydx::decode_operate;
//!
//! let actions: Vec<ArgumentNode> = serde_json::from_str(decoded_actions_json)?;
//! let actions = decode_operate(actions)?;
//! ```

pub mod config;
pub mod decimals;
pub mod parsers;
pub mod registry;

pub use config::DydxConfig;
pub use decimals::{DEFAULT_DECIMALS, TransactionContext, decimals_for};
pub use parsers::{
    ActionType, AssetDenomination, AssetReference, Market, SlotRole, decode_operate,
    parse_action, parse_asset_amount, parse_market, parse_operate, parse_signed_number,
};
pub use registry::{ContractRegistry, KnownAddressRegistry};

/// Registers the SoloMargin contract and its market tokens
pub fn register(contract_reg: &mut ContractRegistry) {
    DydxConfig::register_contracts(contract_reg);
    DydxConfig::register_market_tokens(contract_reg);
}
