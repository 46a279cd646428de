//! Transforms over the decoded arguments of `SoloMargin.operate`
//!
//! Leaves first: [`signed_number`] and [`asset_amount`] rescale amounts,
//! [`market`] resolves market ids, and [`operate`] drives both over every
//! action of a call.

pub mod asset_amount;
pub mod market;
pub mod operate;
pub mod signed_number;

pub use asset_amount::{AssetDenomination, AssetReference, parse_asset_amount};
pub use market::{Market, parse_market};
pub use operate::{ActionType, SlotRole, decode_operate, parse_action, parse_operate};
pub use signed_number::parse_signed_number;
