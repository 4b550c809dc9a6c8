use crate::error::{BlurdError, BlurdResult};
use crate::TOKEN_DECIMALS;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed-point token amount stored in base units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TokenAmount {
    /// Base-unit value (wei-style).
    pub raw: u128,
    /// Number of decimal places of the token.
    pub decimals: u8,
}

impl Default for TokenAmount {
    fn default() -> Self {
        Self::zero(TOKEN_DECIMALS)
    }
}

impl TokenAmount {
    /// Build from a raw base-unit value.
    pub fn from_raw(raw: u128, decimals: u8) -> Self {
        Self { raw, decimals }
    }

    /// Parse a human decimal string like "100.5" into base units.
    pub fn from_decimal(s: &str, decimals: u8) -> BlurdResult<Self> {
        let parts: Vec<&str> = s.split('.').collect();
        if parts.len() > 2 {
            return Err(BlurdError::Payment("Invalid decimal format".into()));
        }

        let whole: u128 = parts[0]
            .parse()
            .map_err(|_| BlurdError::Payment("Invalid number".into()))?;

        let frac = if parts.len() == 2 {
            let frac_str = parts[1];
            if frac_str.len() > decimals as usize {
                return Err(BlurdError::Payment("Too many decimal places".into()));
            }
            let padded = format!("{:0<width$}", frac_str, width = decimals as usize);
            padded
                .parse::<u128>()
                .map_err(|_| BlurdError::Payment("Invalid fraction".into()))?
        } else {
            0
        };

        let multiplier = 10u128.pow(decimals as u32);
        let raw = whole
            .checked_mul(multiplier)
            .and_then(|w| w.checked_add(frac))
            .ok_or_else(|| BlurdError::Payment("Amount overflow".into()))?;

        Ok(Self { raw, decimals })
    }

    /// Parse a base-unit integer string (the on-the-wire amount form).
    pub fn from_base_units(s: &str, decimals: u8) -> BlurdResult<Self> {
        let raw: u128 = s
            .trim()
            .parse()
            .map_err(|_| BlurdError::Payment("Invalid base-unit amount".into()))?;
        Ok(Self { raw, decimals })
    }

    /// Render back to a human decimal string.
    pub fn to_decimal(&self) -> String {
        let multiplier = 10u128.pow(self.decimals as u32);
        let whole = self.raw / multiplier;
        let frac = self.raw % multiplier;

        if frac == 0 {
            whole.to_string()
        } else {
            let frac_str = format!("{:0>width$}", frac, width = self.decimals as usize);
            let trimmed = frac_str.trim_end_matches('0');
            format!("{}.{}", whole, trimmed)
        }
    }

    /// Render as a base-unit integer string.
    pub fn to_base_units(&self) -> String {
        self.raw.to_string()
    }

    /// Zero amount with the given decimals.
    pub fn zero(decimals: u8) -> Self {
        Self { raw: 0, decimals }
    }

    /// Whether the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.raw == 0
    }

    /// Checked addition; None on overflow or decimals mismatch.
    pub fn checked_add(&self, other: &Self) -> Option<Self> {
        if self.decimals != other.decimals {
            return None;
        }
        self.raw.checked_add(other.raw).map(|raw| Self {
            raw,
            decimals: self.decimals,
        })
    }

    /// Checked subtraction; None on underflow or decimals mismatch.
    pub fn checked_sub(&self, other: &Self) -> Option<Self> {
        if self.decimals != other.decimals {
            return None;
        }
        self.raw.checked_sub(other.raw).map(|raw| Self {
            raw,
            decimals: self.decimals,
        })
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_decimal())
    }
}
