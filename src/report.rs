// File: ./src/report.rs
//! Aligned plain-text table output.
use crate::model::Series;
use crate::model::event::format_rule;
use crate::model::title::truncate_title;
use std::io::{self, Write};
use unicode_width::UnicodeWidthStr;

const HEADER: [&str; 3] = ["Name", "Frequency", "RRULE"];

// Spaces between the widest cell of a column and the next column.
const PADDING: usize = 1;

pub struct Reporter {
    title_width: usize,
}

impl Reporter {
    pub fn new(title_width: usize) -> Self {
        Self { title_width }
    }

    /// Cells of one data row: truncated title, frequency label, rule.
    pub fn row(&self, series: &Series) -> [String; 3] {
        [
            truncate_title(&series.title, self.title_width),
            format!("{} Times", series.occurrence_count),
            format_rule(&series.recurrence_rule),
        ]
    }

    /// Writes the header and one row per series. The caller flushes.
    pub fn write_table<W: Write>(&self, series: &[Series], out: &mut W) -> io::Result<()> {
        let mut rows: Vec<[String; 3]> = Vec::with_capacity(series.len() + 1);
        rows.push(HEADER.map(String::from));
        rows.extend(series.iter().map(|s| self.row(s)));

        let mut widths = [0usize; 2];
        for row in &rows {
            for (i, w) in widths.iter_mut().enumerate() {
                *w = (*w).max(row[i].width());
            }
        }

        for row in &rows {
            let mut line = String::new();
            for (i, w) in widths.iter().enumerate() {
                line.push_str(&row[i]);
                let pad = w - row[i].width() + PADDING;
                line.extend(std::iter::repeat_n(' ', pad));
            }
            line.push_str(&row[2]);
            writeln!(out, "{}", line.trim_end())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::event::parse_rule;

    fn series(title: &str, count: usize, rule: &str) -> Series {
        Series {
            title: title.to_string(),
            occurrence_count: count,
            annual_frequency_estimate: count,
            recurrence_rule: parse_rule(rule),
            until: String::new(),
            frequency: None,
            interval: 1,
            annual_multiplier: 0,
        }
    }

    fn render(reporter: &Reporter, list: &[Series]) -> String {
        let mut buf = Vec::new();
        reporter.write_table(list, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_empty_is_header_only() {
        let out = render(&Reporter::new(42), &[]);
        assert_eq!(out, "Name Frequency RRULE\n");
    }

    #[test]
    fn test_columns_aligned() {
        let list = vec![
            series("Gym", 3, "FREQ=WEEKLY"),
            series("Standup", 52, "FREQ=WEEKLY;BYDAY=MO"),
        ];
        let out = render(&Reporter::new(42), &list);
        let expected = "\
Name    Frequency RRULE
Gym     3 Times   FREQ=WEEKLY
Standup 52 Times  BYDAY=MO;FREQ=WEEKLY
";
        assert_eq!(out, expected);
    }

    #[test]
    fn test_title_truncated_to_width() {
        let list = vec![series("A very long recurring meeting title", 1, "FREQ=DAILY")];
        let out = render(&Reporter::new(6), &list);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("A very 1 Times"));
        assert!(!out.contains("long"));
    }

    #[test]
    fn test_empty_rule_column() {
        let list = vec![series("Gym", 1, "")];
        let out = render(&Reporter::new(42), &list);
        assert_eq!(out.lines().nth(1), Some("Gym  1 Times"));
    }
}
