use alloy::primitives::{Address, U256};
use thiserror::Error;

/// Why a piece of typed input was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("input is empty")]
    Empty,

    #[error("negative values are not allowed: `{0}`")]
    Negative(String),

    #[error("not a decimal integer: `{0}`")]
    NotANumber(String),

    #[error("does not fit in uint256: `{0}`")]
    TooLarge(String),

    #[error("not a contract address: `{0}`")]
    BadAddress(String),
}

/// Parse the number draft as a non-negative decimal integer.
pub fn parse_num(draft: &str) -> Result<U256, DraftError> {
    let text = draft.trim();
    if text.is_empty() {
        return Err(DraftError::Empty);
    }
    if let Some(rest) = text.strip_prefix('-') {
        // "-0" is still refused
        return if !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()) {
            Err(DraftError::Negative(text.to_string()))
        } else {
            Err(DraftError::NotANumber(text.to_string()))
        };
    }
    if !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DraftError::NotANumber(text.to_string()));
    }
    U256::from_str_radix(text, 10).map_err(|_| DraftError::TooLarge(text.to_string()))
}

/// Parse the contract address draft (`0x` followed by 40 hex digits).
pub fn parse_address(draft: &str) -> Result<Address, DraftError> {
    let text = draft.trim();
    if text.is_empty() {
        return Err(DraftError::Empty);
    }
    text.parse::<Address>()
        .map_err(|_| DraftError::BadAddress(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_num_accepts_digits() {
        assert_eq!(parse_num("0").unwrap(), U256::ZERO);
        assert_eq!(parse_num("42").unwrap(), U256::from(42));
        assert_eq!(parse_num("  7 ").unwrap(), U256::from(7));
    }

    #[test]
    fn test_parse_num_rejects_negative() {
        assert_eq!(parse_num("-1"), Err(DraftError::Negative("-1".into())));
        assert_eq!(parse_num("-0"), Err(DraftError::Negative("-0".into())));
    }

    #[test]
    fn test_parse_num_rejects_non_numeric() {
        for input in ["abc", "1.5", "12abc", "+3", "0x10", "1e3", "-", "--1", "- 1"] {
            assert!(
                matches!(parse_num(input), Err(DraftError::NotANumber(_))),
                "{input} should be refused"
            );
        }
    }

    #[test]
    fn test_parse_num_rejects_empty() {
        assert_eq!(parse_num(""), Err(DraftError::Empty));
        assert_eq!(parse_num("   "), Err(DraftError::Empty));
    }

    #[test]
    fn test_parse_num_rejects_overflow() {
        let too_big = format!("{}0", U256::MAX);
        assert!(matches!(parse_num(&too_big), Err(DraftError::TooLarge(_))));
        assert_eq!(parse_num(&U256::MAX.to_string()).unwrap(), U256::MAX);
    }

    #[test]
    fn test_parse_address() {
        let addr = parse_address("0x5FbDB2315678afecb367f032d93F642f64180aa3").unwrap();
        assert_eq!(
            format!("{addr}"),
            "0x5FbDB2315678afecb367f032d93F642f64180aa3"
        );
    }

    #[test]
    fn test_parse_address_rejects_garbage() {
        assert_eq!(parse_address(""), Err(DraftError::Empty));
        assert!(matches!(
            parse_address("0xABC"),
            Err(DraftError::BadAddress(_))
        ));
        assert!(matches!(
            parse_address("hello"),
            Err(DraftError::BadAddress(_))
        ));
    }
}
