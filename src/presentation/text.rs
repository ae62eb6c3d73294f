//! Plain-text rendering of the stage for terminals.

use super::stage::{PlaceCounts, StageState};
use crate::scenario::Place;

const BOX_WIDTH: usize = 64;
/// Two borders, two spaces and at least one content column.
const MIN_BOX_WIDTH: usize = 5;

/// Wrap text in a box with an optional title. Widths below five are widened.
pub fn box_text(text: &str, title: &str, width: usize) -> String {
    let width = width.max(MIN_BOX_WIDTH);
    let content_width = width - 4;
    let mut result = Vec::new();

    if title.is_empty() {
        result.push(format!("┌{}┐", "─".repeat(width - 2)));
    } else {
        let title_part = format!(" {title} ");
        let remaining = (width - 2).saturating_sub(title_part.chars().count());
        let left = remaining / 2;
        let right = remaining - left;
        result.push(format!(
            "┌{}{}{}┐",
            "─".repeat(left),
            title_part,
            "─".repeat(right)
        ));
    }

    for line in text.lines() {
        let chars: Vec<char> = line.chars().collect();
        if chars.is_empty() {
            result.push(format!("│ {:content_width$} │", ""));
        }
        for chunk in chars.chunks(content_width) {
            let chunk: String = chunk.iter().collect();
            let pad = content_width - chunk.chars().count();
            result.push(format!("│ {chunk}{} │", " ".repeat(pad)));
        }
    }

    result.push(format!("└{}┘", "─".repeat(width - 2)));
    result.join("\n")
}

/// Non-empty places, highest first: `thousand:2  ten:4`.
fn counts_line(counts: &PlaceCounts) -> String {
    Place::ALL
        .iter()
        .rev()
        .filter(|p| counts.get(**p) > 0)
        .map(|p| format!("{}:{}", p.singular(), counts.get(*p)))
        .collect::<Vec<_>>()
        .join("  ")
}

/// Render the stage as a boxed summary.
pub fn render_stage(stage: &StageState) -> String {
    let mut lines = Vec::new();

    if let Some(narration) = &stage.narration {
        lines.push(format!("» {narration}"));
        lines.push(String::new());
    }

    if !stage.paper_notes.is_empty() {
        lines.push(format!("paper:      {}", stage.paper_notes.join(" | ")));
    }
    if !stage.multiplicand_cards.is_empty() || stage.multiplier_card.is_some() {
        lines.push(format!(
            "cards:      [{}] × [{}]",
            stage.multiplicand_cards.join("] ["),
            stage.multiplier_card.as_deref().unwrap_or(" ")
        ));
    }

    for (i, tray) in stage.trays.iter().enumerate() {
        let contents = if tray.is_empty() {
            "(empty)".to_string()
        } else {
            counts_line(tray)
        };
        lines.push(format!("tray {:<2}     {contents}", i + 1));
    }

    if stage.divider {
        lines.push("─".repeat(BOX_WIDTH - 4));
        if !stage.below_line.is_empty() {
            lines.push(format!("below line: {}", counts_line(&stage.below_line)));
        }
    }

    if let Some(counted) = stage.counted {
        lines.push(format!("counted:    {} {}", counted.total, counted.place.name()));
    }
    if let Some(grouping) = stage.grouping {
        lines.push(format!(
            "grouping:   {} × {} {}",
            grouping.groups,
            grouping.quantity,
            grouping.place.name()
        ));
    }
    for exchange in &stage.exchanges {
        lines.push(format!(
            "exchanged:  {} → carry {} to {}, {} left",
            exchange.from.name(),
            exchange.carry,
            exchange.to.name(),
            exchange.remainder
        ));
    }

    let cards: Vec<String> = Place::ALL
        .iter()
        .rev()
        .filter_map(|p| stage.result_card(*p).map(|d| format!("{}={d}", p.singular())))
        .collect();
    if !cards.is_empty() {
        lines.push(format!("results:    {}", cards.join("  ")));
    }
    if !stage.digit_stack.is_empty() {
        let digits: String = stage
            .digit_stack
            .iter()
            .map(|d| char::from_digit(d.digit, 10).unwrap_or('?'))
            .collect();
        lines.push(format!("stacked:    {digits}"));
    }
    if let Some(product) = &stage.product {
        lines.push(format!("product:    {product}"));
    }
    if let Some(target) = stage.highlight {
        lines.push(format!("highlight:  {target:?}"));
    }

    if lines.is_empty() {
        lines.push("(empty stage)".to_string());
    }
    box_text(&lines.join("\n"), "stage", BOX_WIDTH)
}
