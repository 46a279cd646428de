use txsemantics::{ArgumentNode, DecodedNumber, SemanticsError, scale};

const SIGNED_NUMBER: &str = "signed number";
const SIGNED_NUMBER_VALUE: &str = "signed number value";

/// Decodes a `Types.Wei` / `Types.Par` pair `[sign, value]`.
///
/// Returns `sign * value / 10^decimals`, `decimals` defaulting to 0. The
/// result is always a divided decimal, so whole values print as `42.0`.
pub fn parse_signed_number(
    argument: &ArgumentNode,
    decimals: Option<u8>,
) -> Result<DecodedNumber, SemanticsError> {
    let fields = argument.children(SIGNED_NUMBER, 2)?;
    let magnitude = fields[1].expect_uint(SIGNED_NUMBER_VALUE)?;

    scale(fields[0].is_positive_flag(), magnitude, Some(decimals.unwrap_or(0)))
}
