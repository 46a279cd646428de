//! `Types.AssetAmount`: `[sign, denomination, ref, value]`
//!
//! The denomination only decides the scaling. The reference decides the
//! display: a `Delta` amount is rendered relative (`"-42 (Delta)"`), anything
//! else as the bare number.

use log::{debug, warn};
use txsemantics::{ArgumentKind, ArgumentNode, ArgumentValue, SemanticsError, scale};

const ASSET_AMOUNT: &str = "asset amount";
const ASSET_AMOUNT_VALUE: &str = "asset amount value";

/// Fixed-point position of `Wei` amounts
pub const WEI_DECIMALS: u8 = 18;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetDenomination {
    Wei = 0,
    Par = 1,
}

impl AssetDenomination {
    pub fn resolve(node: &ArgumentNode) -> Option<Self> {
        match u8::try_from(node.as_uint()?).ok()? {
            0 => Some(Self::Wei),
            1 => Some(Self::Par),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Wei => "Wei",
            Self::Par => "Par",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetReference {
    Delta = 0,
    Target = 1,
}

impl AssetReference {
    pub fn resolve(node: &ArgumentNode) -> Option<Self> {
        match u8::try_from(node.as_uint()?).ok()? {
            0 => Some(Self::Delta),
            1 => Some(Self::Target),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Delta => "Delta",
            Self::Target => "Target",
        }
    }
}

/// Rewrites an asset amount into its display value and tags it `string`.
///
/// Unknown denominations fall back to the unscaled branch and unknown
/// references to the bare-number branch. Only a missing field or a
/// non-integer value is an error.
pub fn parse_asset_amount(asset_amount: &mut ArgumentNode) -> Result<(), SemanticsError> {
    let fields = asset_amount.children(ASSET_AMOUNT, 4)?;

    let positive = fields[0].is_positive_flag();
    let denomination = AssetDenomination::resolve(&fields[1]);
    let reference = AssetReference::resolve(&fields[2]);
    let magnitude = fields[3].expect_uint(ASSET_AMOUNT_VALUE)?;

    if denomination.is_none() {
        warn!("unknown AssetDenomination {}", fields[1].payload);
    }
    if reference.is_none() {
        warn!("unknown AssetReference {}", fields[2].payload);
    }

    if let (Some(denomination), Some(reference)) = (denomination, reference) {
        debug!("asset amount in {} by {}", denomination.name(), reference.name());
    }

    let decimals = match denomination {
        Some(AssetDenomination::Wei) => Some(WEI_DECIMALS),
        Some(AssetDenomination::Par) | None => None,
    };
    let value = scale(positive, magnitude, decimals)?;

    let payload = match reference {
        Some(AssetReference::Delta) => {
            ArgumentValue::Str(format!("{value} ({})", AssetReference::Delta.name()))
        }
        Some(AssetReference::Target) | None => ArgumentValue::Decimal(value),
    };
    asset_amount.replace_payload(ArgumentKind::String, payload);

    Ok(())
}
