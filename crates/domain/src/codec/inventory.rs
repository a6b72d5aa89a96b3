//! `inventory.csv` codec: `name,quantity,equipped,attuned` per line.
//!
//! The three trailing columns are split from the right, so item names may
//! themselves contain commas ("Rope, hempen (50 feet)").

use crate::common::{flag, parse_flag, FIELD_SEPARATOR};
use crate::entities::{Inventory, InventoryItem};
use crate::error::DomainError;

fn line_error(line_no: usize, msg: impl std::fmt::Display) -> DomainError {
    DomainError::parse(format!("inventory.csv line {line_no}: {msg}"))
}

fn decode_item(line_no: usize, line: &str) -> Result<InventoryItem, DomainError> {
    let mut cols = line.rsplitn(4, FIELD_SEPARATOR);
    let (Some(attuned), Some(equipped), Some(quantity), Some(name)) =
        (cols.next(), cols.next(), cols.next(), cols.next())
    else {
        return Err(line_error(line_no, "expected name,quantity,equipped,attuned"));
    };
    if name.is_empty() {
        return Err(line_error(line_no, "missing item name"));
    }
    let quantity = quantity
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|q| *q >= 1)
        .ok_or_else(|| line_error(line_no, format!("quantity '{quantity}' must be at least 1")))?;
    let equipped = parse_flag(equipped)
        .ok_or_else(|| line_error(line_no, format!("equipped flag '{equipped}' is not 0 or 1")))?;
    let attuned = parse_flag(attuned)
        .ok_or_else(|| line_error(line_no, format!("attuned flag '{attuned}' is not 0 or 1")))?;
    Ok(InventoryItem {
        name: name.to_string(),
        quantity,
        equipped,
        attuned,
    })
}

/// Decodes the inventory file. Blank lines are skipped.
pub fn decode_inventory(content: &str) -> Result<Inventory, DomainError> {
    let items = content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| decode_item(i + 1, line))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Inventory::from_items(items))
}

/// Encodes one item line (without the newline).
pub fn encode_item(item: &InventoryItem) -> Result<String, DomainError> {
    if item.name.contains(['\n', '\r']) || item.name.is_empty() {
        return Err(DomainError::validation(format!(
            "Item name '{}' must be a non-empty single line",
            item.name
        )));
    }
    Ok(format!(
        "{}{sep}{}{sep}{}{sep}{}",
        item.name,
        item.quantity,
        flag(item.equipped),
        flag(item.attuned),
        sep = FIELD_SEPARATOR
    ))
}

/// Encodes the whole inventory, one newline-terminated line per item.
pub fn encode_inventory(inventory: &Inventory) -> Result<String, DomainError> {
    let mut out = String::new();
    for item in inventory.items() {
        out.push_str(&encode_item(item)?);
        out.push('\n');
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sword_attune_then_equip_toggle() {
        let mut inv = decode_inventory("Sword,1,1,0\n").unwrap();
        inv.attune_item("Sword").unwrap();
        assert_eq!(encode_inventory(&inv).unwrap(), "Sword,1,1,1\n");

        inv.equip_item("Sword").unwrap();
        assert_eq!(encode_inventory(&inv).unwrap(), "Sword,1,0,0\n");
    }

    #[test]
    fn names_with_commas_survive() {
        let content = "Rope, hempen (50 feet),1,0,0\nTorch,5,0,0\n";
        let inv = decode_inventory(content).unwrap();
        assert_eq!(inv.items()[0].name, "Rope, hempen (50 feet)");
        assert_eq!(inv.items()[1].quantity, 5);
        assert_eq!(encode_inventory(&inv).unwrap(), content);
    }

    #[test]
    fn blank_lines_skipped() {
        let inv = decode_inventory("\nTorch,5,0,0\n\n").unwrap();
        assert_eq!(inv.items().len(), 1);
    }

    #[test]
    fn malformed_lines_report_line_number() {
        let err = decode_inventory("Torch,5,0,0\nShield,1,1\n").unwrap_err();
        assert!(err.to_string().contains("line 2"));

        assert!(decode_inventory("Torch,0,0,0\n").is_err());
        assert!(decode_inventory("Torch,x,0,0\n").is_err());
        assert!(decode_inventory("Torch,1,yes,0\n").is_err());
        assert!(decode_inventory(",1,0,0\n").is_err());
    }

    #[test]
    fn empty_file_is_empty_inventory() {
        assert!(decode_inventory("").unwrap().items().is_empty());
        assert_eq!(encode_inventory(&Inventory::new()).unwrap(), "");
    }
}
