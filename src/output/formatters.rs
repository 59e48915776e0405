//! Formatting utilities for terminal and JSON output

use crate::core::Rank;

/// Label for a rank, with entries past the table shown as `≥top_k`
#[must_use]
pub fn rank_label(rank: Rank, top_k: usize) -> String {
    match rank {
        Rank::Ranked(position) => position.to_string(),
        Rank::BeyondTopK => format!("≥{top_k}"),
    }
}

/// Similarity on the 0-100 scale with two decimals
#[must_use]
pub fn similarity_percent(similarity: f64) -> String {
    format!("{:.2}", similarity * 100.0)
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    // Cast is safe: values are clamped to [0, width]
    let filled = ((value / max).clamp(0.0, 1.0) * width as f64) as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Similarity as a bar; negative similarities render empty
#[must_use]
pub fn similarity_bar(similarity: f64, width: usize) -> String {
    create_progress_bar(similarity, 1.0, width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_labels() {
        assert_eq!(rank_label(Rank::Ranked(0), 1000), "0");
        assert_eq!(rank_label(Rank::Ranked(37), 1000), "37");
        assert_eq!(rank_label(Rank::BeyondTopK, 1000), "≥1000");
    }

    #[test]
    fn percent_has_two_decimals() {
        assert_eq!(similarity_percent(1.0), "100.00");
        assert_eq!(similarity_percent(0.6321), "63.21");
        assert_eq!(similarity_percent(-0.05), "-5.00");
    }

    #[test]
    fn progress_bar_empty() {
        let bar = create_progress_bar(0.0, 100.0, 10);
        assert_eq!(bar, "░░░░░░░░░░");
    }

    #[test]
    fn progress_bar_full() {
        let bar = create_progress_bar(100.0, 100.0, 10);
        assert_eq!(bar, "██████████");
    }

    #[test]
    fn progress_bar_half() {
        let bar = create_progress_bar(50.0, 100.0, 10);
        assert_eq!(bar, "█████░░░░░");
    }

    #[test]
    fn similarity_bar_clamps() {
        assert_eq!(similarity_bar(-0.3, 4), "░░░░");
        assert_eq!(similarity_bar(1.5, 4), "████");
    }
}
