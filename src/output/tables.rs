use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color as TableColor, ContentArrangement, Table};

use jenkins_state::{BuildRecord, StateIcon};

/// Table and cell creation helpers
pub fn create_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn create_cyan_header(labels: &[&str]) -> Vec<Cell> {
    labels
        .iter()
        .map(|label| Cell::new(*label).fg(TableColor::Cyan))
        .collect()
}

pub fn color_coded_status_cell(record: &BuildRecord) -> Cell {
    let text = record.status().to_string();
    match record.state_icon() {
        StateIcon::Blue => Cell::new(text).fg(TableColor::Blue),
        StateIcon::Red => Cell::new(text).fg(TableColor::Red),
        StateIcon::Yellow => Cell::new(text).fg(TableColor::Yellow),
        StateIcon::Grey | StateIcon::Folder => Cell::new(text).fg(TableColor::Grey),
    }
}

pub fn duration_cell(duration: Option<u64>) -> Cell {
    match duration {
        #[allow(clippy::cast_precision_loss)]
        Some(millis) => Cell::new(format!("{:.1}s", millis as f64 / 1000.0)),
        None => Cell::new("-"),
    }
}

pub fn records_table(records: &[BuildRecord]) -> Table {
    let mut table = create_table();
    table.set_header(create_cyan_header(&[
        "#", "Status", "Building", "Date", "Duration", "Message", "URL",
    ]));

    for record in records {
        table.add_row(vec![
            Cell::new(record.number()),
            color_coded_status_cell(record),
            Cell::new(if record.is_building() { "yes" } else { "no" }),
            Cell::new(record.build_date().format("%Y-%m-%d %H:%M:%S")),
            duration_cell(record.duration()),
            Cell::new(record.message().unwrap_or("")),
            Cell::new(record.url().unwrap_or("")),
        ]);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_cell() {
        assert_eq!(duration_cell(Some(1500)).content(), "1.5s");
        assert_eq!(duration_cell(None).content(), "-");
    }

    #[test]
    fn test_records_table_lists_every_record() {
        let records = vec![
            BuildRecord::from_workspace("http://x/1", "1", "SUCCESS", false, "", 0, 1000).unwrap(),
            BuildRecord::from_rss("http://x/2", "2", "FAILURE", true, "", "broken").unwrap(),
        ];

        let rendered = records_table(&records).to_string();
        assert!(rendered.contains("SUCCESS"));
        assert!(rendered.contains("FAILURE"));
        assert!(rendered.contains("broken"));
        assert!(rendered.contains("http://x/2"));
    }
}
