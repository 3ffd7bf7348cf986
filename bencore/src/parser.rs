use atoi::{FromRadix10Checked, FromRadix10SignedChecked};

use crate::error::DecodeError;

#[derive(PartialEq, Debug)]
pub enum Token<'a> {
    Int(i64),
    String(&'a [u8]),
    BeginList(usize),
    BeginDict(usize), // Cumberbatch
    EndObject(usize),
}

/// Parses `<len>:<bytes>` starting at `pos`, which must point at a digit.
/// Returns the token and the number of bytes it spans.
pub(crate) fn parse_string(src: &[u8], pos: usize) -> Result<(Token<'_>, usize), DecodeError> {
    let digits = src[pos..].iter().take_while(|b| b.is_ascii_digit()).count();
    let colon = pos + digits;

    if src[pos] == b'0' && digits > 1 {
        return Err(DecodeError::ZeroPaddedLength(pos));
    }

    if src.get(colon) != Some(&b':') {
        return Err(DecodeError::MissingColon(colon));
    }

    let len = match usize::from_radix_10_checked(&src[pos..colon]) {
        (Some(len), _) => len,
        (None, _) => return Err(DecodeError::InvalidLength(pos)),
    };

    let start = colon + 1;
    let have = src.len() - start;
    if have < len {
        return Err(DecodeError::UnterminatedString(pos, len, have));
    }

    Ok((Token::String(&src[start..start + len]), digits + 1 + len))
}

/// Parses `i<digits>e` starting at `pos`, which must point at `i`.
/// Returns the token and the number of bytes it spans.
pub(crate) fn parse_int(src: &[u8], pos: usize) -> Result<(Token<'_>, usize), DecodeError> {
    let body_start = pos + 1;
    let body_len = src[body_start..]
        .iter()
        .take_while(|b| b.is_ascii_digit() || **b == b'-')
        .count();
    let end = body_start + body_len;

    match src.get(end) {
        Some(b'e') => {}
        Some(_) => return Err(DecodeError::InvalidInt(end)),
        None => return Err(DecodeError::UnterminatedInt(pos)),
    }

    let body = &src[body_start..end];
    if body.is_empty() {
        return Err(DecodeError::EmptyInt(pos));
    }

    let digits = body.strip_prefix(b"-").unwrap_or(body);
    if digits.is_empty() || digits.contains(&b'-') {
        return Err(DecodeError::InvalidInt(pos));
    }

    if digits[0] == b'0' {
        if digits.len() != body.len() {
            return Err(DecodeError::NegativeZero(pos));
        }
        if digits.len() > 1 {
            return Err(DecodeError::ZeroPaddedInt(pos));
        }
    }

    match i64::from_radix_10_signed_checked(body) {
        (Some(n), used) if used == body.len() => Ok((Token::Int(n), body_len + 2)),
        _ => Err(DecodeError::IntOverflow(pos)),
    }
}
