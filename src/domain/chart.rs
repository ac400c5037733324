use super::{Category, Cents, saturating_total};

pub const CHART_TITLE: &str = "Percentage spent by category";

const BAR: &str = "o";
const GAP: &str = " ";
const LABEL_INDENT: &str = "    ";

/// Share of `spent` taken by `withdrawn`, floored to a multiple of 10.
/// 19% and 15% both land in the 10 bucket. A zero `spent` yields 0.
pub fn bucket_percentage(withdrawn: Cents, spent: Cents) -> u32 {
    if spent == 0 {
        return 0;
    }
    let share = 100.0 * withdrawn as f64 / spent as f64;
    ((share / 10.0).floor() as u32) * 10
}

/// Bucketed share of total withdrawals for each category, in input order.
pub fn spend_percentages(categories: &[Category]) -> Vec<u32> {
    let withdrawn: Vec<Cents> = categories
        .iter()
        .map(Category::withdrawals_amount)
        .collect();
    let spent = saturating_total(withdrawn.iter().copied());
    withdrawn
        .iter()
        .map(|&amount| bucket_percentage(amount, spent))
        .collect()
}

/// Render the bar chart of spending per category, with the category names
/// printed vertically below their bars.
pub fn create_spend_chart(categories: &[Category]) -> String {
    let percentages = spend_percentages(categories);
    let mut lines = vec![CHART_TITLE.to_string()];

    for threshold in (0..=100u32).rev().step_by(10) {
        let cells: Vec<&str> = percentages
            .iter()
            .map(|&percentage| if percentage >= threshold { BAR } else { GAP })
            .collect();
        lines.push(format!("{:>3}| {}  ", threshold, cells.join("  ")));
    }

    lines.push(format!(
        "{}{}",
        LABEL_INDENT,
        "-".repeat(3 * categories.len() + 1)
    ));

    let names: Vec<Vec<char>> = categories
        .iter()
        .map(|category| category.name().chars().collect())
        .collect();
    let longest = names.iter().map(Vec::len).max().unwrap_or(0);

    for index in 0..longest {
        let mut line = String::from(LABEL_INDENT);
        for name in &names {
            match name.get(index) {
                Some(ch) => line.push_str(&format!("{:^3}", ch)),
                None => line.push_str("   "),
            }
        }
        line.push(' ');
        lines.push(line);
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spent(name: &str, amount: Cents) -> Category {
        let mut category = Category::new(name);
        category.deposit(100000, "deposit");
        category.withdraw(amount, "").unwrap();
        category
    }

    #[test]
    fn test_bucket_floors_to_ten() {
        assert_eq!(bucket_percentage(50, 100), 50);
        assert_eq!(bucket_percentage(19, 100), 10);
        assert_eq!(bucket_percentage(15, 100), 10);
        assert_eq!(bucket_percentage(9, 100), 0);
        assert_eq!(bucket_percentage(100, 100), 100);
        assert_eq!(bucket_percentage(1, 3), 30);
    }

    #[test]
    fn test_bucket_zero_spend() {
        assert_eq!(bucket_percentage(0, 0), 0);
    }

    #[test]
    fn test_spend_percentages() {
        let categories = vec![
            spent("Food", 10000),
            spent("Clothing", 5000),
            spent("Auto", 5000),
        ];

        assert_eq!(spend_percentages(&categories), vec![50, 20, 20]);
    }

    #[test]
    fn test_spend_chart_layout() {
        let categories = vec![
            spent("Food", 10000),
            spent("Clothing", 5000),
            spent("Auto", 5000),
        ];

        let expected = [
            "Percentage spent by category",
            "100|          ",
            " 90|          ",
            " 80|          ",
            " 70|          ",
            " 60|          ",
            " 50| o        ",
            " 40| o        ",
            " 30| o        ",
            " 20| o  o  o  ",
            " 10| o  o  o  ",
            "  0| o  o  o  ",
            "    ----------",
            "     F  C  A  ",
            "     o  l  u  ",
            "     o  o  t  ",
            "     d  t  o  ",
            "        h     ",
            "        i     ",
            "        n     ",
            "        g     ",
        ]
        .join("\n");

        assert_eq!(create_spend_chart(&categories), expected);
    }

    #[test]
    fn test_spend_chart_uneven_names() {
        let categories = vec![
            spent("Business", 1099),
            spent("Food", 10555),
            spent("Entertainment", 3340),
        ];

        let chart = create_spend_chart(&categories);
        let lines: Vec<&str> = chart.lines().collect();

        assert_eq!(lines[4], " 70|    o     ");
        assert_eq!(lines[9], " 20|    o  o  ");
        assert_eq!(lines[11], "  0| o  o  o  ");
        assert_eq!(lines[12], "    ----------");
        assert_eq!(lines.len(), 13 + "Entertainment".len());
        assert_eq!(lines.last(), Some(&"           t  "));
        assert!(lines.iter().skip(1).all(|line| line.len() == 14));
    }

    #[test]
    fn test_spend_chart_zero_spend() {
        let categories = vec![Category::new("A"), Category::new("B")];

        let chart = create_spend_chart(&categories);
        let lines: Vec<&str> = chart.lines().collect();

        assert_eq!(lines[1], "100|       ");
        assert_eq!(lines[11], "  0| o  o  ");
        assert_eq!(lines[13], "     A  B  ");
    }

    #[test]
    fn test_spend_chart_empty() {
        let chart = create_spend_chart(&[]);
        let lines: Vec<&str> = chart.lines().collect();

        assert_eq!(lines.len(), 13);
        assert_eq!(lines[1], "100|   ");
        assert_eq!(lines[12], "    -");
    }

    #[test]
    fn test_spend_chart_is_idempotent() {
        let categories = vec![spent("Food", 4567), spent("Auto", 1234)];

        assert_eq!(
            create_spend_chart(&categories),
            create_spend_chart(&categories)
        );
    }
}
