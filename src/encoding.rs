use thiserror::Error;

/// Number of modules (unit widths) in a complete EAN-13 symbol:
/// 3 (left guard) + 6×7 (left digits) + 5 (center guard) + 6×7 (right digits) + 3 (right guard).
pub const SYMBOL_MODULES: usize = 95;

/// Left/right guard pattern.
pub const EDGE: &str = "101";
/// Center guard pattern.
pub const MIDDLE: &str = "01010";

/// Left-half digit encodings, odd parity ("A" set).
const TABLE_A: [&str; 10] = [
    "0001101", "0011001", "0010011", "0111101", "0100011", "0110001", "0101111", "0111011",
    "0110111", "0001011",
];

/// Left-half digit encodings, even parity ("B" set).
const TABLE_B: [&str; 10] = [
    "0100111", "0110011", "0011011", "0100001", "0011101", "0111001", "0000101", "0010001",
    "0001001", "0010111",
];

/// Right-half digit encodings ("C" set), used for all six right digits.
const TABLE_C: [&str; 10] = [
    "1110010", "1100110", "1101100", "1000010", "1011100", "1001110", "1010000", "1000100",
    "1001000", "1110100",
];

/// Parity selection for the six left-half digits, indexed by the leading digit.
/// The leading digit itself is never drawn as bars; it is implied by this pattern.
const LEFT_PATTERN: [&str; 10] = [
    "AAAAAA", "AABABB", "AABBAB", "AABBBA", "ABAABB", "ABBAAB", "ABBBAA", "ABABAB", "ABABBA",
    "ABBABA",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodeError {
    #[error("identifier '{0}' is not 12 or 13 decimal digits")]
    InvalidFormat(String),
    #[error("check digit mismatch for '{identifier}': expected {expected}, found {found}")]
    CheckDigitMismatch {
        identifier: String,
        expected: u8,
        found: u8,
    },
    #[error("digit '{0}' resolves outside the encoding tables")]
    InvalidDigit(char),
    #[error("internal error: symbol came out {0} modules long instead of {SYMBOL_MODULES}")]
    SymbolLength(usize),
}

/// Validated EAN-13/JAN identifier in canonical 13-digit form.
///
/// A 12-digit input gets its check digit computed and appended; a 13-digit
/// input has its final digit verified against the other twelve. Anything
/// else is rejected up front, so downstream table lookups cannot fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ean13 {
    digits: String,
}

impl Ean13 {
    pub fn parse(input: &str) -> Result<Self, EncodeError> {
        let trimmed = input.trim();
        if !trimmed.bytes().all(|b| b.is_ascii_digit()) || trimmed.is_empty() {
            return Err(EncodeError::InvalidFormat(trimmed.to_string()));
        }
        let digits = match trimmed.len() {
            12 => {
                let check = check_digit(trimmed)?;
                format!("{trimmed}{check}")
            }
            13 => {
                let expected = check_digit(&trimmed[..12])?;
                let found = trimmed.as_bytes()[12] - b'0';
                if found != expected {
                    return Err(EncodeError::CheckDigitMismatch {
                        identifier: trimmed.to_string(),
                        expected,
                        found,
                    });
                }
                trimmed.to_string()
            }
            _ => return Err(EncodeError::InvalidFormat(trimmed.to_string())),
        };
        Ok(Self { digits })
    }

    /// Canonical 13-digit form, check digit included.
    pub fn as_str(&self) -> &str {
        &self.digits
    }

    /// Encode into the 95-module bar/space pattern.
    pub fn symbol(&self) -> Result<Symbol, EncodeError> {
        let digits = self.digits.as_bytes();
        let pattern = LEFT_PATTERN[(digits[0] - b'0') as usize];

        let mut modules = String::with_capacity(SYMBOL_MODULES);
        modules.push_str(EDGE);
        for (i, parity) in pattern.chars().enumerate() {
            let digit = (digits[i + 1] - b'0') as usize;
            let table = match parity {
                'A' => &TABLE_A,
                'B' => &TABLE_B,
                other => return Err(EncodeError::InvalidDigit(other)),
            };
            modules.push_str(table[digit]);
        }
        modules.push_str(MIDDLE);
        for &byte in &digits[7..13] {
            modules.push_str(TABLE_C[(byte - b'0') as usize]);
        }
        modules.push_str(EDGE);

        if modules.len() != SYMBOL_MODULES {
            return Err(EncodeError::SymbolLength(modules.len()));
        }
        Ok(Symbol(modules))
    }
}

/// Ordered 95-module bit pattern of one EAN-13 symbol, `'1'` = ink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol(String);

impl Symbol {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterate the modules left to right; `true` means ink.
    pub fn modules(&self) -> impl Iterator<Item = bool> + '_ {
        self.0.bytes().map(|b| b == b'1')
    }
}

/// Compute the EAN-13 check digit for a 12-digit string.
///
/// Standard GS1 weighting over the 12 digits that precede the check digit:
/// digits at odd 0-based positions count triple, even positions count
/// single; check = (10 - sum mod 10) mod 10.
pub fn check_digit(digits: &str) -> Result<u8, EncodeError> {
    if digits.len() != 12 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(EncodeError::InvalidFormat(digits.to_string()));
    }
    let sum: u32 = digits
        .bytes()
        .enumerate()
        .map(|(i, b)| {
            let n = (b - b'0') as u32;
            if i % 2 != 0 { n * 3 } else { n }
        })
        .sum();
    Ok(((10 - (sum % 10)) % 10) as u8)
}

/// Trim-and-encode entry point: 12-digit inputs gain a check digit,
/// 13-digit inputs are verified, and the result is the module pattern.
pub fn encode(identifier: &str) -> Result<Symbol, EncodeError> {
    Ean13::parse(identifier)?.symbol()
}

/// Guard mask: ink only at the left, center, and right guard patterns.
/// Drawn as a second, taller pass below the main bar field.
pub fn guard_mask() -> String {
    let gap = "0".repeat(42);
    format!("{EDGE}{gap}{MIDDLE}{gap}{EDGE}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // 4006381333931: first digit 4 selects parity pattern ABAABB.
    const GOLDEN: &str = concat!(
        "101",
        "000110101001110101111011110100010010110011",
        "01010",
        "100001010000101000010111010010000101100110",
        "101",
    );

    #[test]
    fn check_digit_matches_reference() {
        assert_eq!(check_digit("400638133393").unwrap(), 1);
        assert_eq!(check_digit("490123456789").unwrap(), 4);
    }

    #[test]
    fn check_digit_rejects_short_or_non_numeric() {
        assert!(check_digit("12345678901").is_err());
        assert!(check_digit("40063813339x").is_err());
    }

    #[test]
    fn check_digit_is_stable_under_reapplication() {
        let full = Ean13::parse("400638133393").unwrap();
        let recomputed = check_digit(&full.as_str()[..12]).unwrap();
        assert_eq!(
            recomputed,
            full.as_str().as_bytes()[12] - b'0',
            "recomputing over the canonical 12-digit window must reproduce the stored check digit"
        );
    }

    #[test]
    fn twelve_digit_input_gains_check_digit() {
        let id = Ean13::parse("400638133393").unwrap();
        assert_eq!(id.as_str(), "4006381333931");
    }

    #[test]
    fn twelve_and_thirteen_digit_forms_encode_identically() {
        assert_eq!(
            encode("400638133393").unwrap(),
            encode("4006381333931").unwrap()
        );
    }

    #[test]
    fn golden_symbol() {
        let symbol = encode("4006381333931").unwrap();
        assert_eq!(symbol.as_str(), GOLDEN);
    }

    #[test]
    fn symbol_is_95_binary_modules() {
        let symbol = encode(" 4901234567894 ").unwrap();
        assert_eq!(symbol.as_str().len(), SYMBOL_MODULES);
        assert!(symbol.as_str().bytes().all(|b| b == b'0' || b == b'1'));
    }

    #[test]
    fn guard_modules_are_ink_for_any_identifier() {
        for input in ["4006381333931", "4901234567894", "000000000000"] {
            let symbol = encode(input).unwrap();
            let bytes = symbol.as_str().as_bytes().to_vec();
            for i in [0usize, 2, 46, 48, 92, 94] {
                assert_eq!(bytes[i], b'1', "module {i} of {input}");
            }
            for i in [1usize, 45, 47, 49, 93] {
                assert_eq!(bytes[i], b'0', "module {i} of {input}");
            }
        }
    }

    #[test]
    fn encoding_is_deterministic() {
        assert_eq!(
            encode("4901234567894").unwrap(),
            encode("4901234567894").unwrap()
        );
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(matches!(
            encode("40063813339"),
            Err(EncodeError::InvalidFormat(_))
        ));
        assert!(matches!(
            encode("4006381333931X"),
            Err(EncodeError::InvalidFormat(_))
        ));
        assert!(matches!(
            encode("4OO638133393"),
            Err(EncodeError::InvalidFormat(_))
        ));
        assert!(matches!(encode(""), Err(EncodeError::InvalidFormat(_))));
    }

    #[test]
    fn verifies_supplied_check_digit() {
        let err = encode("4006381333930").unwrap_err();
        assert_eq!(
            err,
            EncodeError::CheckDigitMismatch {
                identifier: "4006381333930".to_string(),
                expected: 1,
                found: 0,
            }
        );
    }

    #[test]
    fn guard_mask_shape() {
        let mask = guard_mask();
        assert_eq!(mask.len(), SYMBOL_MODULES);
        assert_eq!(&mask[..3], EDGE);
        assert_eq!(&mask[45..50], MIDDLE);
        assert_eq!(&mask[92..], EDGE);
        assert!(mask[3..45].bytes().all(|b| b == b'0'));
    }
}
