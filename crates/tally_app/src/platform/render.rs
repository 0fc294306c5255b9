use std::fmt::Write;

use tally_core::RankedWord;

const BAR: char = '\u{2588}';

/// Renders a horizontal bar chart, one row per word, in the given order.
///
/// The largest count gets a bar `width` characters long and the others are
/// scaled against it. Every non-zero count gets at least one character.
pub fn bar_chart(title: &str, rows: &[RankedWord], width: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{}", "-".repeat(title.chars().count()));

    if rows.is_empty() {
        let _ = writeln!(out, "(no words)");
        return out;
    }

    let label_width = rows
        .iter()
        .map(|row| row.word.chars().count())
        .max()
        .unwrap_or(0);
    let max_count = rows.iter().map(|row| row.count).max().unwrap_or(0);

    for row in rows {
        let bar = BAR.to_string().repeat(bar_len(row.count, max_count, width));
        let pad = label_width - row.word.chars().count();
        let _ = writeln!(
            out,
            "{}{} | {} {}",
            " ".repeat(pad),
            row.word,
            bar,
            row.count
        );
    }
    out
}

pub fn chart_title(top: usize) -> String {
    format!("Top {top} most frequent words")
}

fn bar_len(count: u64, max_count: u64, width: usize) -> usize {
    if count == 0 || max_count == 0 {
        return 0;
    }
    let scaled = (count as u128 * width as u128 + max_count as u128 / 2) / max_count as u128;
    (scaled as usize).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(word: &str, count: u64) -> RankedWord {
        RankedWord {
            word: word.to_string(),
            count,
        }
    }

    fn bar_widths(chart: &str) -> Vec<usize> {
        chart
            .lines()
            .skip(2)
            .map(|line| line.chars().filter(|c| *c == BAR).count())
            .collect()
    }

    #[test]
    fn bars_scale_to_largest_count() {
        let chart = bar_chart("t", &[row("the", 10), row("of", 5), row("a", 1)], 20);
        assert_eq!(bar_widths(&chart), vec![20, 10, 2]);
    }

    #[test]
    fn tiny_counts_still_get_a_bar() {
        let chart = bar_chart("t", &[row("big", 1000), row("small", 1)], 10);
        assert_eq!(bar_widths(&chart), vec![10, 1]);
    }

    #[test]
    fn labels_are_right_aligned() {
        let chart = bar_chart("Top", &[row("elizabeth", 3), row("i", 2)], 3);
        let lines: Vec<&str> = chart.lines().collect();
        assert_eq!(lines[0], "Top");
        assert_eq!(lines[1], "---");
        assert!(lines[2].starts_with("elizabeth | "));
        assert!(lines[3].starts_with("        i | "));
        assert!(lines[2].ends_with(" 3"));
    }

    #[test]
    fn empty_rows_say_so() {
        let chart = bar_chart(&chart_title(10), &[], 10);
        assert!(chart.starts_with("Top 10 most frequent words\n"));
        assert!(chart.ends_with("(no words)\n"));
    }
}
