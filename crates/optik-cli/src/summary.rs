//! Table rendering for command output.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use optik_core::ImportReport;
use optik_map::DetectionResult;
use optik_model::{ExamConfig, Severity, ValidationWarning, WarningSummary};
use optik_scoring::report::{ScoreLine, StatisticsReport, score_lines};

pub fn print_exams(profiles: &[ExamConfig]) {
    println!("{}", exams_table(profiles));
}

pub fn print_detection(detection: &DetectionResult) {
    println!("{}", detection_table(detection));
    if !detection.unmapped_headers.is_empty() {
        println!("Unmapped: {}", detection.unmapped_headers.join(", "));
    }
    match &detection.exam_type.exam_code {
        Some(code) => println!(
            "Exam type: {code} ({}%) - {}",
            detection.exam_type.confidence, detection.exam_type.reasoning
        ),
        None => println!("Exam type: unknown - {}", detection.exam_type.reasoning),
    }
    print_warnings(&detection.warnings);
}

pub fn print_score(report: &ImportReport) {
    println!(
        "Exam: {} ({}), penalty {}",
        report.key.config.code, report.key.config.label, report.key.config.penalty
    );
    println!("{}", ranking_table(&score_lines(&report.outcome.students)));
    println!(
        "{}",
        statistics_table(&StatisticsReport::from(&report.outcome.statistics))
    );
    print_warnings(&report.warnings);
    println!("{}", summary_line(&report.summary));
}

fn print_warnings(warnings: &[ValidationWarning]) {
    if warnings.is_empty() {
        return;
    }
    println!();
    println!("Issues:");
    println!("{}", warnings_table(warnings));
}

pub fn exams_table(profiles: &[ExamConfig]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Exam"),
        header_cell("Label"),
        header_cell("Questions"),
        header_cell("Penalty"),
        header_cell("Booklets"),
        header_cell("Subjects"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for profile in profiles {
        let booklets: String = profile
            .booklets
            .iter()
            .map(|booklet| {
                if *booklet == profile.base_booklet {
                    format!("{booklet}*")
                } else {
                    booklet.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" ");
        let subjects = profile
            .layout
            .subjects()
            .iter()
            .map(|subject| format!("{} {}-{}", subject.code, subject.start, subject.end))
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            Cell::new(&profile.code)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(&profile.label),
            Cell::new(profile.total_questions()),
            Cell::new(profile.penalty.to_string()),
            Cell::new(booklets),
            Cell::new(subjects),
        ]);
    }
    table
}

pub fn detection_table(detection: &DetectionResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Header"),
        header_cell("Confidence"),
        header_cell("Alternatives"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for field in &detection.fields {
        let name = if field.required {
            format!("{}*", field.field)
        } else {
            field.field.to_string()
        };
        let header = match &field.header {
            Some(header) => Cell::new(header),
            None if field.required => Cell::new("missing")
                .fg(Color::Red)
                .add_attribute(Attribute::Bold),
            None => dim_cell("-"),
        };
        let alternatives = field
            .alternatives
            .iter()
            .map(|alt| format!("{} ({})", alt.header, alt.confidence))
            .collect::<Vec<_>>();
        table.add_row(vec![
            Cell::new(name),
            header,
            confidence_cell(field.confidence, field.is_resolved()),
            if alternatives.is_empty() {
                dim_cell("-")
            } else {
                Cell::new(alternatives.join(", "))
            },
        ]);
    }
    table
}

pub fn ranking_table(lines: &[ScoreLine]) -> Table {
    let subjects: Vec<String> = lines
        .first()
        .map(|line| line.subject_nets.keys().cloned().collect())
        .unwrap_or_default();
    let mut header = vec![
        header_cell("Rank"),
        header_cell("Number"),
        header_cell("Name"),
        header_cell("Booklet"),
        header_cell("C"),
        header_cell("W"),
        header_cell("B"),
    ];
    header.extend(subjects.iter().map(|code| header_cell(code)));
    header.push(header_cell("Net"));
    header.push(header_cell("%"));

    let mut table = Table::new();
    table.set_header(header);
    apply_summary_table_style(&mut table);
    let numeric_from = 4;
    for column in numeric_from..numeric_from + 3 + subjects.len() + 2 {
        align_column(&mut table, column, CellAlignment::Right);
    }
    align_column(&mut table, 3, CellAlignment::Center);

    for line in lines {
        let mut row = vec![
            Cell::new(line.rank).add_attribute(Attribute::Bold),
            Cell::new(&line.student_id),
            Cell::new(&line.student_name),
            Cell::new(line.booklet),
            Cell::new(line.correct).fg(Color::Green),
            Cell::new(line.wrong).fg(Color::Red),
            dim_cell(line.blank),
        ];
        row.extend(subjects.iter().map(|code| {
            line.subject_nets
                .get(code)
                .map_or_else(|| dim_cell("-"), |net| Cell::new(format!("{net:.2}")))
        }));
        row.push(Cell::new(format!("{:.2}", line.net)).add_attribute(Attribute::Bold));
        row.push(Cell::new(format!("{:.2}", line.percentage)));
        table.add_row(row);
    }
    table
}

pub fn statistics_table(stats: &StatisticsReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Statistic"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Students"), Cell::new(stats.student_count)]);
    table.add_row(vec![Cell::new("Mean net"), Cell::new(format!("{:.2}", stats.mean))]);
    table.add_row(vec![
        Cell::new("Median net"),
        Cell::new(format!("{:.2}", stats.median)),
    ]);
    for (label, extreme) in [("Highest", &stats.highest), ("Lowest", &stats.lowest)] {
        if let Some(extreme) = extreme {
            table.add_row(vec![
                Cell::new(label),
                Cell::new(format!(
                    "{:.2} ({} {})",
                    extreme.net, extreme.student_id, extreme.student_name
                )),
            ]);
        }
    }
    for (code, average) in &stats.subject_averages {
        table.add_row(vec![
            Cell::new(format!("{code} average")),
            Cell::new(format!("{average:.2}")),
        ]);
    }
    table
}

pub fn warnings_table(warnings: &[ValidationWarning]) -> Table {
    let mut sorted: Vec<&ValidationWarning> = warnings.iter().collect();
    sorted.sort_by_key(|warning| (severity_rank(warning.severity), warning.row));

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Severity"),
        header_cell("Row"),
        header_cell("Column"),
        header_cell("Message"),
        header_cell("Suggestion"),
    ]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    align_column(&mut table, 1, CellAlignment::Right);
    for warning in sorted {
        table.add_row(vec![
            severity_cell(warning.severity),
            warning.row.map_or_else(|| dim_cell("-"), Cell::new),
            warning
                .column
                .as_ref()
                .map_or_else(|| dim_cell("-"), Cell::new),
            Cell::new(&warning.message),
            warning
                .suggestion
                .as_ref()
                .map_or_else(|| dim_cell("-"), Cell::new),
        ]);
    }
    table
}

pub fn summary_line(summary: &WarningSummary) -> String {
    format!(
        "{} errors, {} warnings, {} notes",
        summary.errors, summary.warnings, summary.infos
    )
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(165);
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn severity_rank(severity: Severity) -> u8 {
    match severity {
        Severity::Error => 0,
        Severity::Warning => 1,
        Severity::Info => 2,
    }
}

fn severity_cell(severity: Severity) -> Cell {
    match severity {
        Severity::Error => Cell::new("ERROR")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        Severity::Warning => Cell::new("WARN").fg(Color::Yellow),
        Severity::Info => Cell::new("INFO").fg(Color::Cyan),
    }
}

fn confidence_cell(confidence: u8, resolved: bool) -> Cell {
    match confidence {
        _ if !resolved => dim_cell("-"),
        90.. => Cell::new(confidence).fg(Color::Green),
        70..=89 => Cell::new(confidence).fg(Color::Yellow),
        _ => Cell::new(confidence).fg(Color::Red),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use optik_model::ValidationWarning;

    use super::*;

    #[test]
    fn test_exams_table_lists_profiles() {
        let profiles = optik_standards::load_profiles().unwrap();
        let rendered = exams_table(&profiles).to_string();
        assert!(rendered.contains("TYT"));
        assert!(rendered.contains("A* B C D"));
        assert!(rendered.contains("MAT 61-100"));
    }

    #[test]
    fn test_warnings_sorted_by_severity() {
        let warnings = vec![
            ValidationWarning::info("low confidence"),
            ValidationWarning::error("duplicate question").at_row(4),
        ];
        let rendered = warnings_table(&warnings).to_string();
        let error_at = rendered.find("duplicate question").unwrap();
        let info_at = rendered.find("low confidence").unwrap();
        assert!(error_at < info_at);
    }

    #[test]
    fn test_summary_line() {
        let summary = WarningSummary {
            errors: 1,
            warnings: 2,
            infos: 0,
        };
        insta::assert_snapshot!(summary_line(&summary), @"1 errors, 2 warnings, 0 notes");
    }
}
