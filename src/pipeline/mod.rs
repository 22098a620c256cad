/// The report pipeline, one module per stage:
///
/// ```text
///  load ─► clean ─► select ─► features ─► summarize ─► export
/// ```
///
/// [`process`] runs everything between loading and export on an in-memory
/// table; [`run`] adds the file I/O on both ends.
pub mod clean;
pub mod columns;
pub mod features;
pub mod select;

use crate::config::ReportConfig;
use crate::data::export::write_table;
use crate::data::loader::{load_table, LoadOptions};
use crate::data::model::RecordTable;
use crate::error::Result;
use crate::report::{Report, StageCounts};
use crate::stats::correlation::correlation_matrix;
use crate::stats::grouping::grouped_mean;
use crate::stats::missing::DatasetOverview;

/// Everything a finished run produced.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    /// Final table, as written to the output file.
    pub table: RecordTable,
    pub report: Report,
    /// Present `Engagement Ratio` values, for the distribution chart.
    pub engagement_ratios: Vec<f64>,
}

/// Load, process and export. Nothing is written unless every earlier stage
/// succeeded.
pub fn run(config: &ReportConfig) -> Result<PipelineOutcome> {
    let options = LoadOptions {
        encoding: &config.encoding,
        delimiter: config.delimiter_byte(),
        na_values: &config.na_values,
    };
    let raw = load_table(&config.input_path, &options)?;
    let outcome = process(raw, config)?;
    write_table(&outcome.table, &config.output_path, config.delimiter_byte())?;
    Ok(outcome)
}

/// All in-memory stages, from a freshly loaded table to the final one.
pub fn process(raw: RecordTable, config: &ReportConfig) -> Result<PipelineOutcome> {
    let overview = DatasetOverview::of(&raw);
    let loaded = raw.height();

    let cleaned = clean::clean(raw);
    let selected = select::select_columns(&cleaned.table, &config.selected_columns)?;
    let selected_preview = selected.head(config.preview_rows);
    let selected_rows = selected.height();

    let engineered = features::engineer_features(selected, &config.date_formats);
    let mut table = engineered.table;
    let engineered_preview = table.head(config.preview_rows);

    let correlations = correlation_matrix(&table);
    let ranking = correlations
        .ranking(columns::TOTAL_INTERACTIONS)
        .unwrap_or_default();

    features::add_interaction_rate(&mut table);
    let interaction_by_type = grouped_mean(&table, columns::TYPE, columns::INTERACTION_RATE);

    let engagement_ratios = table
        .column(columns::ENGAGEMENT_RATIO)
        .filter_map(|v| v.as_f64())
        .collect();

    let report = Report {
        overview,
        missing_before: cleaned.missing_before,
        missing_after: cleaned.missing_after,
        counts: StageCounts {
            loaded,
            cleaned: cleaned.table.height(),
            selected: selected_rows,
            engineered: table.height(),
        },
        duplicates_removed: cleaned.duplicates_removed,
        rows_dropped: engineered.rows_dropped,
        unparsed_dates: engineered.unparsed_dates,
        selected_columns: config.selected_columns.clone(),
        selected_preview,
        new_features: columns::ENGINEERED.iter().map(|s| (*s).to_owned()).collect(),
        engineered_preview,
        correlation_ranking: ranking,
        interaction_by_type,
        output_path: config.output_path.clone(),
    };

    Ok(PipelineOutcome {
        table,
        report,
        engagement_ratios,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Value;
    use crate::error::PipelineError;

    const HEADER: &str = "Page Name,Followers at Posting,Post Created Date,Type,Total Interactions,Likes,Comments,Shares,Message,Link Text,Extra";

    fn write_input(dir: &std::path::Path, body: &str) -> std::path::PathBuf {
        let path = dir.join("posts.csv");
        std::fs::write(&path, format!("{HEADER}\n{body}")).unwrap();
        path
    }

    fn config(dir: &std::path::Path, input: std::path::PathBuf) -> ReportConfig {
        ReportConfig {
            input_path: input,
            output_path: dir.join("processed.csv"),
            show_chart: false,
            ..ReportConfig::default()
        }
    }

    const BODY: &str = "\
Acme,1000,2019-05-06 19:00:19 EDT,Photo,50,40,5,5,Hello,,x
Acme,1000,2019-05-06 19:00:19 EDT,Photo,50,40,5,5,Hello,,x
Acme,N/A,2019-05-07 08:00:00 EDT,Link,10,8,1,1,Read this,Site,x
Acme,2000,2019-05-08 12:30:00 EDT,Video,200,150,30,20,,,x
Acme,0,2019-05-09 09:00:00 EDT,Status,5,5,0,0,Hi,,x
Acme,500,not a date,Photo,25,20,3,2,Look,,x
";

    #[test]
    fn end_to_end_writes_expected_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(dir.path(), BODY);
        let config = config(dir.path(), input);

        let outcome = run(&config).unwrap();
        let r = &outcome.report;

        assert_eq!(r.counts.loaded, 6);
        assert_eq!(r.duplicates_removed, 1);
        assert_eq!(r.counts.cleaned, 5);
        assert_eq!(r.counts.selected, 5);
        assert_eq!(r.rows_dropped, 1);
        assert_eq!(r.counts.engineered, 4);
        assert_eq!(r.unparsed_dates, 1);
        assert!(r.counts.engineered <= r.counts.selected);
        assert!(r.counts.selected <= r.counts.cleaned);
        assert!(r.counts.cleaned <= r.counts.loaded);

        let text = std::fs::read_to_string(&config.output_path).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("Page Name,Followers at Posting,Post Created Date,Type,Total Interactions,Likes,Comments,Shares,Message,Link Text,Engagement Ratio,Post Hour,Post Day,Post Month,Post Length,Presence of Media,Interaction Rate")
        );
        assert_eq!(
            lines.next(),
            Some("Acme,1000,2019-05-06 19:00:19,Photo,50,40,5,5,Hello,,0.05,19,Monday,May,5,1,0.05")
        );
        assert_eq!(lines.count(), 3);
    }

    #[test]
    fn ratios_and_media_flags_hold_for_every_row() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(dir.path(), BODY);
        let outcome = run(&config(dir.path(), input)).unwrap();
        let t = &outcome.table;

        for r in 0..t.height() {
            let followers = t.value(r, columns::FOLLOWERS).and_then(Value::as_f64).unwrap();
            let total = t.value(r, columns::TOTAL_INTERACTIONS).and_then(Value::as_f64).unwrap();
            let ratio = t.value(r, columns::ENGAGEMENT_RATIO).unwrap();
            if followers == 0.0 {
                assert!(ratio.is_null());
            } else {
                assert_eq!(ratio, &Value::Float(total / followers));
            }

            let is_media = matches!(
                t.value(r, columns::TYPE).and_then(Value::as_text),
                Some("Photo" | "Video")
            );
            assert_eq!(
                t.value(r, columns::PRESENCE_OF_MEDIA),
                Some(&Value::Integer(i64::from(is_media)))
            );
        }

        // ratios 0.05, 0.1, missing (zero followers), 0.05
        assert_eq!(outcome.engagement_ratios, vec![0.05, 0.1, 0.05]);
        let keys: Vec<&str> = outcome
            .report
            .interaction_by_type
            .iter()
            .map(|g| g.key.as_str())
            .collect();
        assert_eq!(keys, ["Video", "Photo", "Status"]);
        assert_eq!(outcome.report.correlation_ranking[0].0, columns::TOTAL_INTERACTIONS);
    }

    #[test]
    fn unparsed_dates_keep_text_columns_out_of_the_ranking() {
        let dir = tempfile::tempdir().unwrap();
        let body = "\
Acme,1000,yesterday,Photo,50,40,5,5,Hello,,x
Acme,2000,last week,Video,200,150,30,20,Watch,,x
Acme,500,someday,Link,25,20,3,2,Read,Site,x
";
        let input = write_input(dir.path(), body);
        let outcome = run(&config(dir.path(), input)).unwrap();
        assert_eq!(outcome.report.unparsed_dates, 3);

        let ranked: Vec<&str> = outcome
            .report
            .correlation_ranking
            .iter()
            .map(|(name, _)| name.as_str())
            .collect();
        for text_column in [
            columns::CREATED,
            columns::POST_DAY,
            columns::POST_MONTH,
            columns::PAGE_NAME,
            columns::MESSAGE,
            columns::LINK_TEXT,
        ] {
            assert!(!ranked.contains(&text_column), "{text_column} in {ranked:?}");
        }
        assert!(ranked.contains(&columns::POST_HOUR));
        assert!(ranked.contains(&columns::ENGAGEMENT_RATIO));
    }

    #[test]
    fn missing_selected_column_aborts_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("posts.csv");
        std::fs::write(&path, "Page Name,Type\nAcme,Photo\n").unwrap();
        let config = config(dir.path(), path);

        let err = run(&config).unwrap_err();
        match err {
            PipelineError::MissingColumns { missing } => assert_eq!(missing.len(), 8),
            other => panic!("expected MissingColumns, got {other}"),
        }
        assert!(!config.output_path.exists());
    }

    #[test]
    fn missing_input_aborts_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path(), dir.path().join("absent.csv"));
        assert!(matches!(run(&config), Err(PipelineError::Io { .. })));
        assert!(!config.output_path.exists());
    }
}
