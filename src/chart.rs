//! Horizontal bar chart of recommendation scores for the terminal.
//!
//! Highest score on top; bars are scaled against the largest score.

use shelfwise_core::models::Recommendation;

const BAR_WIDTH: usize = 40;
const LABEL_WIDTH: usize = 40;

pub fn render(query_title: &str, top_n: usize, results: &[Recommendation<'_>]) -> String {
    let mut s = format!("Top {} Recommendations for '{}'\n\n", top_n, query_title);
    if results.is_empty() {
        s.push_str("No results.\n");
        return s;
    }

    let max = results.iter().map(|r| r.score).fold(0.0f64, f64::max);
    let label_width = results
        .iter()
        .map(|r| r.item.title.chars().count())
        .max()
        .unwrap_or(0)
        .min(LABEL_WIDTH);

    for rec in results {
        let label = truncate(&rec.item.title, label_width);
        let len = if max > 0.0 {
            ((rec.score / max) * BAR_WIDTH as f64).round() as usize
        } else {
            0
        };
        s.push_str(&format!(
            "{:<width$} | {} {:.4}\n",
            label,
            "█".repeat(len),
            rec.score,
            width = label_width
        ));
    }
    s.push_str(&format!(
        "{:<width$}   Recommendation Score\n",
        "",
        width = label_width
    ));
    s
}

fn truncate(title: &str, width: usize) -> String {
    if title.chars().count() <= width {
        return title.to_string();
    }
    let mut out: String = title.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}
