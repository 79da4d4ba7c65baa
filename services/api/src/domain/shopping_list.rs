//! Shopping list aggregation and plain-text rendering.

use std::collections::BTreeMap;

use crate::domain::types::CartLine;

pub const SHOPPING_LIST_FILENAME: &str = "ShoppingList.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingListItem {
    pub name: String,
    pub measurement_unit: String,
    pub amount: i64,
}

/// Sum cart lines per (ingredient name, unit), ordered by name then unit.
pub fn aggregate(lines: impl IntoIterator<Item = CartLine>) -> Vec<ShoppingListItem> {
    let mut totals: BTreeMap<(String, String), i64> = BTreeMap::new();
    for line in lines {
        *totals
            .entry((line.name, line.measurement_unit))
            .or_default() += line.amount;
    }
    totals
        .into_iter()
        .map(|((name, measurement_unit), amount)| ShoppingListItem {
            name,
            measurement_unit,
            amount,
        })
        .collect()
}

/// One `<name> - <amount> <unit>; ` line per item.
pub fn render(items: &[ShoppingListItem]) -> String {
    items
        .iter()
        .map(|item| {
            format!(
                "{} - {} {}; \n",
                item.name, item.amount, item.measurement_unit
            )
        })
        .collect()
}
