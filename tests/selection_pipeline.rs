//! Integration tests for reading, classifying and selecting property records.

use pareto_select::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

/// Property usage counts for a population of 1000 items.
fn write_records_tsv() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "key\tlabel\ttype\tcount").unwrap();
    writeln!(file, "P31\tinstance of\tWikibaseItem\t950").unwrap();
    writeln!(file, "P17\tcountry\tWikibaseItem\t50").unwrap();
    writeln!(file, "P625\tcoordinate location\tGlobeCoordinate\t120").unwrap();
    writeln!(file, "P18\timage\tCommonsMedia\tunknown").unwrap();
    writeln!(file, "P856\tofficial website\tUrl\t4").unwrap();
    writeln!(file, "P1448\tofficial name\tMonolingualtext\t0").unwrap();
    file.flush().unwrap();
    file
}

fn write_config(yaml: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", yaml).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_end_to_end_scenario() {
    let records = vec![
        FrequencyRecord::new("P31", "instance of", "WikibaseItem", 950),
        FrequencyRecord::new("P17", "country", "WikibaseItem", 50),
    ];
    let mut classifier =
        FrequencyClassifier::new(records, 1000.0, ParetoScale::standard(), 10.0).unwrap();

    let prepared = classifier.prepare().to_vec();
    assert_eq!(prepared[0].ratio, 0.95);
    assert_eq!(prepared[0].tier, 1);
    assert_eq!(prepared[0].percent_text(), "95.0");
    assert_eq!(prepared[1].ratio, 0.05);
    assert_eq!(prepared[1].tier, 2);
    assert_eq!(prepared[1].percent_text(), "5.0");

    let selected = classifier.select();
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].0, "P31");
}

#[test]
fn test_tsv_pipeline_skips_malformed() {
    let records_file = write_records_tsv();
    let config_file = write_config(
        "name: coverage\nminimum_percentage: 5.0\nplaceholders: [distinct, max_frequency]\n",
    );

    let config = SelectionConfig::from_file(config_file.path()).unwrap();
    let records = read_tsv(records_file.path()).unwrap();
    assert_eq!(records.len(), 6);

    let report = run_selection(&config, 1000.0, records).unwrap();
    assert_eq!(report.skipped, vec![4]);
    assert_eq!(report.classified.len(), 5);

    let tiers: Vec<(&str, u32)> = report
        .classified
        .iter()
        .map(|r| (r.key.as_str(), r.tier))
        .collect();
    assert_eq!(
        tiers,
        vec![("P31", 1), ("P17", 2), ("P625", 2), ("P856", 4), ("P1448", 0)]
    );

    assert_eq!(report.selected, vec!["P31", "P17", "P625"]);
    assert_eq!(report.summary.tier(2).n_classified, 2);
    assert_eq!(report.summary.tier(0).n_classified, 1);

    for record in &report.classified {
        assert!(record.extensions.contains_key("distinct"));
        assert!(record.extensions["max_frequency"].is_null());
    }
}

#[test]
fn test_tsv_pipeline_abort_policy() {
    let records_file = write_records_tsv();
    let config = SelectionConfig::from_yaml("name: strict\non_malformed: abort\n").unwrap();
    let records = read_records(records_file.path()).unwrap();

    let err = run_selection(&config, 1000.0, records).unwrap_err();
    assert!(matches!(err, ParetoError::MalformedRecord { position: 4, .. }));
}

#[test]
fn test_json_records() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(
        file,
        r#"[
            {{"key": "P31", "label": "instance of", "type": "WikibaseItem", "count": 950}},
            {{"key": "P17", "label": "country", "type": "WikibaseItem", "count": 50}}
        ]"#
    )
    .unwrap();
    file.flush().unwrap();

    let records = read_records(file.path()).unwrap();
    let config = SelectionConfig {
        minimum_percentage: 10.0,
        ..SelectionConfig::default()
    };
    let report = run_selection(&config, 1000.0, records).unwrap();
    assert_eq!(report.selected, vec!["P31"]);
}

#[test]
fn test_report_tsv_file() {
    let records = vec![
        Ok(FrequencyRecord::new("P31", "instance of", "WikibaseItem", 950)),
        Ok(FrequencyRecord::new("P17", "country", "WikibaseItem", 50)),
    ];
    let config = SelectionConfig {
        minimum_percentage: 10.0,
        ..SelectionConfig::default()
    };
    let report = run_selection(&config, 1000.0, records).unwrap();

    let out = NamedTempFile::new().unwrap();
    report.to_tsv(out.path(), true).unwrap();
    let text = std::fs::read_to_string(out.path()).unwrap();
    assert_eq!(text.lines().count(), 2);
    assert!(text.contains("P31"));
    assert!(!text.contains("P17"));
}

#[test]
fn test_level_reference_table() {
    let scale = ParetoScale::standard();
    let records = scale.records();
    assert_eq!(records.len(), 9);
    for pair in records.windows(2) {
        assert!(pair[0].threshold > pair[1].threshold);
        assert_eq!(pair[1].one_out_of, pair[0].one_out_of * 10);
    }

    for format in [TableFormat::Mediawiki, TableFormat::Latex] {
        let markup = scale.to_table(format);
        assert!(markup.contains("200000000"));
    }
}

#[test]
fn test_independent_passes_across_threads() {
    let handles: Vec<_> = (1..=4u64)
        .map(|n| {
            std::thread::spawn(move || {
                let records = vec![FrequencyRecord::new("P1", "p", "String", n * 100)];
                let mut classifier =
                    FrequencyClassifier::new(records, 1000.0, ParetoScale::standard(), 0.0)
                        .unwrap();
                classifier.prepare()[0].tier
            })
        })
        .collect();
    let tiers: Vec<u32> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(tiers, vec![2, 2, 2, 2]);
}
