//! Argument parsing helpers

use crate::error::{Result, StudioAppError};
use museq_core::EQ_SLOTS;

/// Parse a band assignment of the form `INDEX=DB`, e.g. `0=6` or `7=-3.5`
pub fn parse_band(text: &str) -> Result<(usize, f32)> {
    let (index, db) = text
        .split_once('=')
        .ok_or_else(|| StudioAppError::Argument(format!("expected INDEX=DB, got '{text}'")))?;

    let index: usize = index
        .trim()
        .parse()
        .map_err(|_| StudioAppError::Argument(format!("invalid band index '{index}'")))?;
    if index >= EQ_SLOTS {
        return Err(StudioAppError::Argument(format!(
            "band index must be below {EQ_SLOTS}, got {index}"
        )));
    }

    let db: f32 = db
        .trim()
        .parse()
        .map_err(|_| StudioAppError::Argument(format!("invalid gain '{db}'")))?;
    if !db.is_finite() {
        return Err(StudioAppError::Argument(format!("gain must be finite, got {db}")));
    }

    Ok((index, db))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_band() {
        assert_eq!(parse_band("0=6").unwrap(), (0, 6.0));
        assert_eq!(parse_band(" 7 = -3.5 ").unwrap(), (7, -3.5));
    }

    #[test]
    fn test_parse_band_rejects_garbage() {
        assert!(parse_band("6").is_err());
        assert!(parse_band("x=1").is_err());
        assert!(parse_band("8=1").is_err());
        assert!(parse_band("1=loud").is_err());
        assert!(parse_band("1=inf").is_err());
    }
}
