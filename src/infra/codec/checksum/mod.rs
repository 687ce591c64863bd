//! NMEA 0183 checksum: XOR of every byte strictly between `$` and `*`,
//! rendered as two uppercase hexadecimal digits.
use crate::error::MalformedInput;

/// XOR of all bytes of `body`.
pub fn checksum(body: &[u8]) -> u8 {
    body.iter().fold(0u8, |acc, b| acc ^ b)
}

/// Bytes covered by the checksum: after the leading `$` (if any) and before
/// the first `*`, or up to the end of the line when there is no `*` yet.
pub fn sentence_body(sentence: &[u8]) -> &[u8] {
    let start = usize::from(sentence.first() == Some(&b'$'));
    let rest = &sentence[start..];
    let end = rest
        .iter()
        .position(|&b| b == b'*' || b == b'\r' || b == b'\n')
        .unwrap_or(rest.len());
    &rest[..end]
}

/// Split a sentence into its body and the two checksum digits, when present.
/// Trailing CR/LF are ignored.
pub fn split_checksum(sentence: &[u8]) -> (&[u8], Option<&[u8]>) {
    let body = sentence_body(sentence);
    let start = usize::from(sentence.first() == Some(&b'$'));
    let after = &sentence[start + body.len()..];
    match after.first() {
        Some(b'*') => {
            let digits = &after[1..];
            let end = digits
                .iter()
                .position(|&b| b == b'\r' || b == b'\n')
                .unwrap_or(digits.len());
            (body, Some(&digits[..end]))
        }
        _ => (body, None),
    }
}

/// Decode two uppercase or lowercase hexadecimal digits.
pub fn parse_hex_pair(digits: &[u8]) -> Option<u8> {
    match digits {
        [hi, lo] => Some((hex_value(*hi)? << 4) | hex_value(*lo)?),
        _ => None,
    }
}

fn hex_value(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'A'..=b'F' => Some(c - b'A' + 10),
        b'a'..=b'f' => Some(c - b'a' + 10),
        _ => None,
    }
}

/// Uppercase hexadecimal rendering of a checksum byte.
pub fn to_hex_pair(cs: u8) -> [u8; 2] {
    const DIGITS: &[u8; 16] = b"0123456789ABCDEF";
    [DIGITS[(cs >> 4) as usize], DIGITS[(cs & 0x0F) as usize]]
}

/// Check the `*HH` suffix against the body. Sentences without a checksum pass.
pub fn verify(sentence: &[u8]) -> Result<(), MalformedInput> {
    let (body, digits) = split_checksum(sentence);
    let Some(digits) = digits else {
        return Ok(());
    };
    let expected = parse_hex_pair(digits).ok_or(MalformedInput::InvalidChecksum)?;
    let computed = checksum(body);
    if expected == computed {
        Ok(())
    } else {
        Err(MalformedInput::ChecksumMismatch { expected, computed })
    }
}
