/// Width of a full bar, in cells.
const BAR_WIDTH: usize = 30;

/// One labelled horizontal bar scaled against `max`.
pub fn bar(label: &str, value: usize, max: usize) -> String {
    let filled = if max == 0 {
        0
    } else {
        (value * BAR_WIDTH).div_ceil(max).min(BAR_WIDTH)
    };
    format!(
        "{:<12} {}{} {}",
        label,
        "\u{2588}".repeat(filled),
        "\u{00B7}".repeat(BAR_WIDTH - filled),
        value
    )
}

/// A bar per row, all scaled against the largest value.
pub fn bar_chart(rows: impl IntoIterator<Item = (String, usize)>) -> String {
    let rows: Vec<(String, usize)> = rows.into_iter().collect();
    let max = rows.iter().map(|(_, v)| *v).max().unwrap_or(0);
    rows.iter()
        .map(|(label, value)| bar(label, *value, max))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Dot strip: filled for days with activity, hollow otherwise.
pub fn activity_strip(days: &[bool]) -> String {
    days.iter()
        .map(|active| if *active { "\u{25CF}" } else { "\u{25CB}" })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bars_scale_to_max() {
        let line = bar("Meetings", 5, 10);
        assert!(line.starts_with("Meetings"));
        assert_eq!(line.matches('\u{2588}').count(), BAR_WIDTH / 2);
        assert!(line.ends_with(" 5"));
    }

    #[test]
    fn zero_max_draws_empty_bars() {
        assert_eq!(bar("x", 0, 0).matches('\u{2588}').count(), 0);
        assert_eq!(bar_chart(Vec::new()), "");
    }

    #[test]
    fn strip() {
        assert_eq!(activity_strip(&[true, false]), "\u{25CF} \u{25CB}");
    }
}
