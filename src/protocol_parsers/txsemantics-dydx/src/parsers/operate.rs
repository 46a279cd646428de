//! `SoloMargin.operate(accounts, actions)` action relabeling
//!
//! Every `Actions.ActionArgs` tuple has the same eight slots:
//!
//! | slot | field |
//! |---|---|
//! | 0 | actionType |
//! | 1 | accountId |
//! | 2 | amount (`Types.AssetAmount`) |
//! | 3 | primaryMarketId |
//! | 4 | secondaryMarketId |
//! | 5 | otherAddress |
//! | 6 | otherAccountId |
//! | 7 | data |
//!
//! What each slot means depends on the action type, so the generic ABI names
//! are replaced with per-type names (or the slot is tagged `ignore`).

use alloy_primitives::U256;
use log::debug;
use txsemantics::{ArgumentNode, ArgumentValue, SemanticsError};

use super::asset_amount::parse_asset_amount;
use super::market::parse_market;

pub const ACTION_SLOTS: usize = 8;

const ACTION: &str = "action";
const ACTION_TYPE: &str = "action type";

/// `Actions.ActionType`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionType {
    Deposit,
    Withdraw,
    Transfer,
    Buy,
    Sell,
    Trade,
    Liquidate,
    Vaporize,
    Call,
    /// Code outside the protocol's enumeration
    Unknown(U256),
}

/// What a slot becomes for a given action type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotRole {
    Label(&'static str),
    Ignore,
}

use SlotRole::{Ignore, Label};

/// Roles of slots 1 through 7
type ActionSchema = [SlotRole; ACTION_SLOTS - 1];

const DEPOSIT: ActionSchema = [
    Label("account"),
    Label("amount"),
    Label("market"),
    Ignore,
    Label("from"),
    Ignore,
    Ignore,
];

const WITHDRAW: ActionSchema = [
    Label("account"),
    Label("amount"),
    Label("market"),
    Ignore,
    Label("to"),
    Ignore,
    Ignore,
];

const TRANSFER: ActionSchema = [
    Label("accountOne"),
    Label("amount"),
    Label("market"),
    Ignore,
    Label("accountTwo"),
    Ignore,
    Ignore,
];

const BUY: ActionSchema = [
    Label("account"),
    Label("amount"),
    Label("makerMarket"),
    Label("takerMarket"),
    Label("exchangeWrapper"),
    Ignore,
    Label("orderData"),
];

const SELL: ActionSchema = [
    Label("account"),
    Label("amount"),
    Label("takerMarket"),
    Label("makerMarket"),
    Label("exchangeWrapper"),
    Ignore,
    Label("orderData"),
];

const TRADE: ActionSchema = [
    Label("takerAccount"),
    Label("amount"),
    Label("inputMarket"),
    Label("outputMarket"),
    Label("autoTrader"),
    Label("makerAccount"),
    Label("tradeData"),
];

const LIQUIDATE: ActionSchema = [
    Label("solidAccount"),
    Label("amount"),
    Label("owedMarket"),
    Label("heldMarket"),
    Ignore,
    Label("liquidAccount"),
    Ignore,
];

const VAPORIZE: ActionSchema = [
    Label("solidAccount"),
    Label("amount"),
    Label("owedMarket"),
    Label("heldMarket"),
    Ignore,
    Label("vaporAccount"),
    Ignore,
];

impl ActionType {
    pub fn from_code(code: U256) -> Self {
        match u8::try_from(code) {
            Ok(0) => Self::Deposit,
            Ok(1) => Self::Withdraw,
            Ok(2) => Self::Transfer,
            Ok(3) => Self::Buy,
            Ok(4) => Self::Sell,
            Ok(5) => Self::Trade,
            Ok(6) => Self::Liquidate,
            Ok(7) => Self::Vaporize,
            Ok(8) => Self::Call,
            _ => Self::Unknown(code),
        }
    }

    pub fn name(&self) -> Option<&'static str> {
        Some(match self {
            Self::Deposit => "Deposit",
            Self::Withdraw => "Withdraw",
            Self::Transfer => "Transfer",
            Self::Buy => "Buy",
            Self::Sell => "Sell",
            Self::Trade => "Trade",
            Self::Liquidate => "Liquidate",
            Self::Vaporize => "Vaporize",
            Self::Call => "Call",
            Self::Unknown(_) => return None,
        })
    }

    /// Slot roles for this type. `Call` has none: its slots keep their ABI
    /// names and slot 0 keeps the raw code.
    pub fn schema(&self) -> Option<&'static [SlotRole; ACTION_SLOTS - 1]> {
        match self {
            Self::Deposit => Some(&DEPOSIT),
            Self::Withdraw => Some(&WITHDRAW),
            Self::Transfer => Some(&TRANSFER),
            Self::Buy => Some(&BUY),
            Self::Sell => Some(&SELL),
            Self::Trade => Some(&TRADE),
            Self::Liquidate => Some(&LIQUIDATE),
            Self::Vaporize => Some(&VAPORIZE),
            Self::Call | Self::Unknown(_) => None,
        }
    }
}

/// Decodes one action in place and returns its type.
///
/// The amount and both market slots are rewritten for every action, `Call`
/// and unknown types included.
pub fn parse_action(action: &mut ArgumentNode) -> Result<ActionType, SemanticsError> {
    let slots = action.children_mut(ACTION, ACTION_SLOTS)?;
    let action_type = ActionType::from_code(slots[0].expect_uint(ACTION_TYPE)?);

    parse_asset_amount(&mut slots[2])?;
    parse_market(&mut slots[3]);
    parse_market(&mut slots[4]);

    let (Some(name), Some(schema)) = (action_type.name(), action_type.schema()) else {
        debug!("no slot schema for {action_type:?}");
        return Ok(action_type);
    };

    slots[0].payload = ArgumentValue::Str(name.to_string());
    for (slot, role) in slots[1..].iter_mut().zip(schema) {
        match role {
            Label(label) => slot.set_label(*label),
            Ignore => slot.mark_ignored(),
        }
    }

    debug!("decoded {name} action");
    Ok(action_type)
}

/// Decodes every action of an `operate` call in place.
///
/// Single pass only: a decoded action no longer carries an integer type code
/// and is rejected on a second run.
pub fn parse_operate(actions: &mut [ArgumentNode]) -> Result<(), SemanticsError> {
    for (index, action) in actions.iter_mut().enumerate() {
        parse_action(action).map_err(|source| SemanticsError::Action {
            index,
            source: Box::new(source),
        })?;
    }
    Ok(())
}

pub fn decode_operate(mut actions: Vec<ArgumentNode>) -> Result<Vec<ArgumentNode>, SemanticsError> {
    parse_operate(&mut actions)?;
    Ok(actions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use txsemantics::ArgumentKind;
    use txsemantics::test_utils::{
        assert_slot_ignored, assert_slot_label, assert_slot_labels, assert_slot_payload, slot,
    };

    fn account(owner: &str, number: u64) -> ArgumentNode {
        ArgumentNode::tuple(vec![
            ArgumentNode::new(ArgumentKind::Address, ArgumentValue::Str(owner.to_string()))
                .with_label("owner"),
            ArgumentNode::uint(number).with_label("number"),
        ])
    }

    fn action(code: u64, amount: [u128; 4], primary: u64, secondary: u64) -> ArgumentNode {
        let [sign, denomination, reference, value] = amount;
        ArgumentNode::tuple(vec![
            ArgumentNode::uint(code).with_label("actionType"),
            ArgumentNode::uint(0u64).with_label("accountId"),
            ArgumentNode::tuple(vec![
                ArgumentNode::flag(sign == 1).with_label("sign"),
                ArgumentNode::uint(denomination).with_label("denomination"),
                ArgumentNode::uint(reference).with_label("ref"),
                ArgumentNode::uint(value).with_label("value"),
            ])
            .with_label("amount"),
            ArgumentNode::uint(primary).with_label("primaryMarketId"),
            ArgumentNode::uint(secondary).with_label("secondaryMarketId"),
            ArgumentNode::new(
                ArgumentKind::Address,
                ArgumentValue::Str("0x0000000000000000000000000000000000000abc".to_string()),
            )
            .with_label("otherAddress"),
            ArgumentNode::uint(1u64).with_label("otherAccountId"),
            ArgumentNode::new(ArgumentKind::Bytes, ArgumentValue::Str("0x".to_string()))
                .with_label("data"),
        ])
    }

    #[test]
    fn test_deposit() {
        let mut deposit = action(0, [1, 0, 0, 1_000_000_000_000_000_000], 0, 0);
        assert_eq!(parse_action(&mut deposit).unwrap(), ActionType::Deposit);

        assert_slot_payload(&deposit, 0, "Deposit");
        assert_slot_label(&deposit, 1, "account");
        assert_slot_label(&deposit, 2, "amount");
        assert_slot_payload(&deposit, 2, "1.0 (Delta)");
        assert_slot_label(&deposit, 3, "market");
        assert_slot_payload(&deposit, 3, "WETH");
        assert_slot_ignored(&deposit, 4);
        assert_slot_label(&deposit, 5, "from");
        assert_slot_ignored(&deposit, 6);
        assert_slot_ignored(&deposit, 7);

        // ignored slots keep their original names
        assert_slot_label(&deposit, 4, "secondaryMarketId");
        assert_eq!(slot(&deposit, 5).kind, ArgumentKind::Address);
    }

    #[test]
    fn test_withdraw_and_transfer() {
        let mut withdraw = action(1, [0, 1, 1, 0], 2, 0);
        parse_action(&mut withdraw).unwrap();
        assert_slot_payload(&withdraw, 0, "Withdraw");
        assert_slot_payload(&withdraw, 3, "USDC");
        assert_slot_label(&withdraw, 5, "to");

        let mut transfer = action(2, [1, 1, 0, 5], 3, 0);
        parse_action(&mut transfer).unwrap();
        assert_slot_labels(
            &transfer,
            &[
                Some("actionType"),
                Some("accountOne"),
                Some("amount"),
                Some("market"),
                Some("secondaryMarketId"),
                Some("accountTwo"),
                Some("otherAccountId"),
                Some("data"),
            ],
        );
        assert_slot_ignored(&transfer, 6);
    }

    #[test]
    fn test_buy_and_sell_swap_market_roles() {
        let mut buy = action(3, [1, 0, 0, 1], 0, 2);
        parse_action(&mut buy).unwrap();
        assert_slot_label(&buy, 3, "makerMarket");
        assert_slot_label(&buy, 4, "takerMarket");
        assert_slot_payload(&buy, 4, "USDC");
        assert_slot_label(&buy, 5, "exchangeWrapper");
        assert_slot_ignored(&buy, 6);
        assert_slot_label(&buy, 7, "orderData");

        let mut sell = action(4, [1, 0, 0, 1], 0, 2);
        parse_action(&mut sell).unwrap();
        assert_slot_payload(&sell, 0, "Sell");
        assert_slot_label(&sell, 3, "takerMarket");
        assert_slot_label(&sell, 4, "makerMarket");
    }

    #[test]
    fn test_trade_labels_every_slot() {
        let mut trade = action(5, [1, 1, 1, 9], 1, 3);
        parse_action(&mut trade).unwrap();
        assert_slot_labels(
            &trade,
            &[
                Some("actionType"),
                Some("takerAccount"),
                Some("amount"),
                Some("inputMarket"),
                Some("outputMarket"),
                Some("autoTrader"),
                Some("makerAccount"),
                Some("tradeData"),
            ],
        );
        assert_slot_payload(&trade, 3, "SAI");
        assert_slot_payload(&trade, 4, "DAI");
        for index in 1..ACTION_SLOTS {
            assert_ne!(slot(&trade, index).kind, ArgumentKind::Ignore);
        }
    }

    #[test]
    fn test_liquidate_and_vaporize() {
        let mut liquidate = action(6, [1, 1, 1, 0], 3, 0);
        parse_action(&mut liquidate).unwrap();
        assert_slot_label(&liquidate, 1, "solidAccount");
        assert_slot_label(&liquidate, 3, "owedMarket");
        assert_slot_label(&liquidate, 4, "heldMarket");
        assert_slot_ignored(&liquidate, 5);
        assert_slot_label(&liquidate, 6, "liquidAccount");
        assert_slot_ignored(&liquidate, 7);

        let mut vaporize = action(7, [1, 1, 1, 0], 3, 0);
        parse_action(&mut vaporize).unwrap();
        assert_slot_payload(&vaporize, 0, "Vaporize");
        assert_slot_label(&vaporize, 6, "vaporAccount");
    }

    #[test]
    fn test_call_is_preprocessed_but_not_relabeled() {
        let mut call = action(8, [1, 0, 1, 0], 9, 1);
        assert_eq!(parse_action(&mut call).unwrap(), ActionType::Call);

        assert_slot_payload(&call, 0, "8");
        assert_slot_payload(&call, 2, "0.0");
        assert_eq!(slot(&call, 2).kind, ArgumentKind::String);
        assert_slot_payload(&call, 3, "Unkown Market (9)");
        assert_slot_payload(&call, 4, "SAI");
        assert_slot_label(&call, 1, "accountId");
        assert_slot_label(&call, 5, "otherAddress");
    }

    #[test]
    fn test_unknown_action_type_passes_through() {
        let mut unknown = action(99, [0, 1, 0, 42], 2, 7);
        assert_eq!(
            parse_action(&mut unknown).unwrap(),
            ActionType::Unknown(U256::from(99u64))
        );

        assert_slot_payload(&unknown, 0, "99");
        assert_slot_payload(&unknown, 2, "-42 (Delta)");
        assert_slot_payload(&unknown, 3, "USDC");
        assert_slot_payload(&unknown, 4, "Unkown Market (7)");
        assert_slot_labels(
            &unknown,
            &[
                Some("actionType"),
                Some("accountId"),
                Some("amount"),
                Some("primaryMarketId"),
                Some("secondaryMarketId"),
                Some("otherAddress"),
                Some("otherAccountId"),
                Some("data"),
            ],
        );
    }

    #[test]
    fn test_nested_account_slot_is_untouched() {
        let mut deposit = action(0, [1, 1, 1, 3], 0, 0);
        if let ArgumentValue::Nodes(slots) = &mut deposit.payload {
            slots[1] = account("0x00000000000000000000000000000000000000aa", 4).with_label("accountId");
        }
        parse_action(&mut deposit).unwrap();

        let account_slot = slot(&deposit, 1);
        assert_eq!(account_slot.label.as_deref(), Some("account"));
        assert_eq!(account_slot.kind, ArgumentKind::Tuple);
        assert_slot_payload(&deposit, 1, "[0x00000000000000000000000000000000000000aa, 4]");
    }

    #[test]
    fn test_parse_operate_is_single_pass() {
        let mut actions = vec![action(0, [1, 0, 0, 1], 0, 0), action(5, [1, 1, 1, 2], 1, 2)];
        parse_operate(&mut actions).unwrap();
        assert_slot_payload(&actions[0], 0, "Deposit");
        assert_slot_payload(&actions[1], 0, "Trade");

        let err = parse_operate(&mut actions).unwrap_err();
        assert!(matches!(err, SemanticsError::Action { index: 0, .. }));
    }

    #[test]
    fn test_error_reports_action_index() {
        let mut short = action(0, [1, 0, 0, 1], 0, 0);
        if let ArgumentValue::Nodes(slots) = &mut short.payload {
            slots.truncate(7);
        }
        let actions = vec![action(1, [1, 0, 0, 1], 0, 0), short];

        let err = decode_operate(actions).unwrap_err();
        match err {
            SemanticsError::Action { index, source } => {
                assert_eq!(index, 1);
                assert!(matches!(
                    *source,
                    SemanticsError::ArityMismatch {
                        expected: 8,
                        actual: 7,
                        ..
                    }
                ));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_empty_operate() {
        assert_eq!(decode_operate(Vec::new()).unwrap(), Vec::new());
    }
}
