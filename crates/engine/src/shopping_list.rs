//! Shopping-list aggregation and rendering.
//!
//! Aggregation joins the user's cart recipes to their ingredient lines,
//! groups by `(name, measurement_unit)` and sums amounts. The reduction is
//! done in memory over the joined rows rather than pushed into the storage
//! engine, so the result is reproducible regardless of the database's
//! collation: ordering is ascending by ingredient name in plain codepoint
//! order (`Ord` on `String`), with the unit breaking ties.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One consolidated line of a shopping list.
///
/// `total_amount` is the sum of `amount` over every ingredient line of
/// every recipe currently in the user's cart that matches this
/// `(name, measurement_unit)` pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedLine {
    pub name: String,
    pub measurement_unit: String,
    pub total_amount: i64,
}

/// Reduces joined `(name, unit, amount)` rows into ordered aggregated
/// lines, one per distinct `(name, unit)` pair.
pub(crate) fn aggregate<I>(rows: I) -> Vec<AggregatedLine>
where
    I: IntoIterator<Item = (String, String, i64)>,
{
    let mut totals: BTreeMap<(String, String), i64> = BTreeMap::new();
    for (name, unit, amount) in rows {
        *totals.entry((name, unit)).or_insert(0) += amount;
    }

    totals
        .into_iter()
        .map(|((name, measurement_unit), total_amount)| AggregatedLine {
            name,
            measurement_unit,
            total_amount,
        })
        .collect()
}

/// Renders aggregated lines into the downloadable plain-text document.
///
/// Total and infallible: the header is always present, lines keep their
/// input order, and empty input yields the header-only document.
pub fn render_shopping_list(lines: &[AggregatedLine]) -> String {
    let body = lines
        .iter()
        .map(|line| {
            format!(
                "{}, {}, {}",
                line.name, line.measurement_unit, line.total_amount
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!("Your shopping list:\n\n{body}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, unit: &str, amount: i64) -> (String, String, i64) {
        (name.to_string(), unit.to_string(), amount)
    }

    #[test]
    fn empty_input_renders_header_only() {
        let lines = aggregate(Vec::new());
        assert!(lines.is_empty());
        assert_eq!(render_shopping_list(&lines), "Your shopping list:\n\n");
    }

    #[test]
    fn sums_across_recipes_one_line_per_pair() {
        let lines = aggregate(vec![
            row("Flour", "g", 200),
            row("Egg", "pcs", 2),
            row("Flour", "g", 100),
            row("Milk", "ml", 50),
        ]);

        assert_eq!(
            lines,
            vec![
                AggregatedLine {
                    name: "Egg".to_string(),
                    measurement_unit: "pcs".to_string(),
                    total_amount: 2,
                },
                AggregatedLine {
                    name: "Flour".to_string(),
                    measurement_unit: "g".to_string(),
                    total_amount: 300,
                },
                AggregatedLine {
                    name: "Milk".to_string(),
                    measurement_unit: "ml".to_string(),
                    total_amount: 50,
                },
            ]
        );
    }

    #[test]
    fn renders_two_recipe_cart_document() {
        let lines = aggregate(vec![
            row("Flour", "g", 200),
            row("Egg", "pcs", 2),
            row("Flour", "g", 100),
            row("Milk", "ml", 50),
        ]);

        assert_eq!(
            render_shopping_list(&lines),
            "Your shopping list:\n\nEgg, pcs, 2\nFlour, g, 300\nMilk, ml, 50"
        );
    }

    #[test]
    fn orders_by_name_ascending() {
        let lines = aggregate(vec![
            row("Sugar", "g", 10),
            row("Apple", "pcs", 3),
            row("Milk", "ml", 200),
        ]);

        let names: Vec<&str> = lines.iter().map(|line| line.name.as_str()).collect();
        assert_eq!(names, vec!["Apple", "Milk", "Sugar"]);
    }

    #[test]
    fn same_name_different_unit_stays_separate() {
        let lines = aggregate(vec![row("Salt", "g", 5), row("Salt", "pinch", 1)]);

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].measurement_unit, "g");
        assert_eq!(lines[1].measurement_unit, "pinch");
    }

    #[test]
    fn aggregation_is_deterministic() {
        let rows = vec![row("Basil", "g", 10), row("Almond", "g", 40)];
        assert_eq!(aggregate(rows.clone()), aggregate(rows));
    }
}
