//! `slots.csv` codec: one line of nine used-slot counts.

use crate::common::{join_list, FIELD_SEPARATOR};
use crate::entities::{SlotTotals, SLOT_LEVELS};
use crate::error::DomainError;

/// Decodes the used counts. An empty file means nothing has been spent.
pub fn decode_slots(content: &str) -> Result<SlotTotals, DomainError> {
    let line = content.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
    if line.is_empty() {
        return Ok([0; SLOT_LEVELS]);
    }
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    if fields.len() != SLOT_LEVELS {
        return Err(DomainError::parse(format!(
            "slots.csv: expected {SLOT_LEVELS} values, found {}",
            fields.len()
        )));
    }
    let mut used = [0u8; SLOT_LEVELS];
    for (count, raw) in used.iter_mut().zip(&fields) {
        *count = raw
            .trim()
            .parse()
            .map_err(|_| DomainError::parse(format!("slots.csv: bad slot count '{raw}'")))?;
    }
    Ok(used)
}

pub fn encode_slots(used: &SlotTotals) -> String {
    let mut out = join_list(used.iter().map(u8::to_string));
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_one_line() {
        assert_eq!(encode_slots(&[2, 1, 0, 0, 0, 0, 0, 0, 0]), "2,1,0,0,0,0,0,0,0\n");
    }

    #[test]
    fn decodes_counts() {
        assert_eq!(
            decode_slots("2,1,0,0,0,0,0,0,0\n").unwrap(),
            [2, 1, 0, 0, 0, 0, 0, 0, 0]
        );
    }

    #[test]
    fn empty_content_is_unspent() {
        assert_eq!(decode_slots("").unwrap(), [0; SLOT_LEVELS]);
        assert_eq!(decode_slots("\n\n").unwrap(), [0; SLOT_LEVELS]);
    }

    #[test]
    fn wrong_width_is_parse_error() {
        assert!(decode_slots("1,2,3\n").unwrap_err().is_parse());
        assert!(decode_slots("1,2,3,4,5,6,7,8,x\n").unwrap_err().is_parse());
        assert!(decode_slots("1,2,3,4,5,6,7,8,300\n").is_err());
    }
}
