use crate::prelude::*;

fn merge(raw: &[&str], policy: HeaderPolicy) -> FinalReport {
    let mut merger = Merger::new(policy);
    for content in raw {
        merger.push_raw(content);
    }
    merger.finish()
}

#[test]
fn line_classification() {
    for (line, expected) in [
        ("***********", LineKind::Decorative),
        ("* System: V1G1", LineKind::Decorative),
        ("Date,Time,Dn,De", LineKind::Descriptive),
        ("S,SYS_24hr_2022_006_000000", LineKind::Source),
        ("\"quoted\"", LineKind::Quoted),
        ("2022/01/06,00:00:05,0.12,0.34", LineKind::Data),
        ("", LineKind::Data),
        (" * not a header", LineKind::Data),
    ] {
        assert_eq!(LineKind::classify(line), expected, "bad class for \"{}\"", line);
        assert_eq!(expected.is_header(), expected != LineKind::Data);
    }
}

#[test]
fn single_segment() {
    let report = merge(
        &["*hdr1\nDinfo\nS,seg1\nrow1\nrow2\nGARBAGE\n"],
        HeaderPolicy::Accumulate,
    );
    assert_eq!(report.header, vec!["*hdr1\n", "Dinfo\n", "Source file(s),seg1\n"]);
    assert_eq!(report.data, vec!["row1\n", "row2\n"]);
    assert_eq!(
        report.to_string(),
        "*hdr1\nDinfo\nSource file(s),seg1\nrow1\nrow2\n"
    );
}

#[test]
fn trailing_line_dropped() {
    // single line: nothing classified
    let report = merge(&["*lonely header\n"], HeaderPolicy::Accumulate);
    assert!(report.is_empty());

    // no final newline
    let report = merge(&["row1\nrow2\nGARB"], HeaderPolicy::Accumulate);
    assert_eq!(report.data, vec!["row1\n", "row2\n"]);

    // CRLF terminations
    let report = merge(&["*hdr\r\nrow1\r\nGARBAGE\r\n"], HeaderPolicy::Accumulate);
    assert_eq!(report.header, vec!["*hdr\n"]);
    assert_eq!(report.data, vec!["row1\n"]);

    // empty raw report
    let report = merge(&[""], HeaderPolicy::Accumulate);
    assert!(report.is_empty());
}

#[test]
fn single_source_line() {
    let report = merge(
        &[
            "*hdr\nS,seg1\nrow1\nGARBAGE\n",
            "*hdr\nS,seg2\nrow2\nGARBAGE\n",
        ],
        HeaderPolicy::Accumulate,
    );
    let sources = report
        .lines()
        .filter(|line| line.starts_with(SOURCE))
        .collect::<Vec<_>>();
    assert_eq!(sources, vec!["Source file(s),seg1,seg2\n"]);
    assert_eq!(
        report.header,
        vec!["*hdr\n", "Source file(s),seg1,seg2\n", "*hdr\n"]
    );
    assert_eq!(report.data, vec!["row1\n", "row2\n"]);
}

const SOURCE: &str = "Source file(s)";

#[test]
fn sources_listed_once() {
    let report = merge(
        &[
            "S,seg1\nS,seg1\nrow1\nGARBAGE\n",
            "S,seg2, trailing fields\nrow2\nGARBAGE\n",
            "S,seg1\nrow3\nGARBAGE\n",
        ],
        HeaderPolicy::Accumulate,
    );
    assert_eq!(report.header, vec!["Source file(s),seg1,seg2\n"]);
    assert_eq!(report.data, vec!["row1\n", "row2\n", "row3\n"]);
}

#[test]
fn source_line_without_source() {
    let report = merge(&["*hdr\nS\nrow1\nGARBAGE\n"], HeaderPolicy::Accumulate);
    assert_eq!(report.header, vec!["*hdr\n"]);
    assert_eq!(report.data, vec!["row1\n"]);
}

#[test]
fn segment_ordering() {
    let report = merge(
        &[
            "*A\nDA\n\"A\"\nS,segA\na1\na2\nGARBAGE\n",
            "*B\nDB\n\"B\"\nS,segB\nb1\nb2\nGARBAGE\n",
        ],
        HeaderPolicy::Accumulate,
    );
    assert_eq!(
        report.header,
        vec![
            "*A\n",
            "DA\n",
            "\"A\"\n",
            "Source file(s),segA,segB\n",
            "*B\n",
            "DB\n",
            "\"B\"\n"
        ]
    );
    assert_eq!(report.data, vec!["a1\n", "a2\n", "b1\n", "b2\n"]);
}

#[test]
fn last_segment_header() {
    let report = merge(
        &[
            "*A\nS,segA\na1\nGARBAGE\n",
            "*B\nDB\nS,segB\nb1\nGARBAGE\n",
        ],
        HeaderPolicy::LastSegment,
    );
    assert_eq!(report.header, vec!["*B\n", "DB\n", "Source file(s),segA,segB\n"]);
    assert_eq!(report.data, vec!["a1\n", "b1\n"]);
}

#[test]
fn file_merging_is_idempotent() {
    let tmp = tempfile::TempDir::new().unwrap();
    let raw = [
        (
            "V1G1SYS_24hr_2022_006_000000_RAW.2022_006",
            "*hdr\nS,SYS_24hr_2022_006_000000\nrow1\nGARBAGE\n",
        ),
        (
            "V1G1SYS_24hr_2022_006_120000_RAW.2022_006",
            "*hdr\nS,SYS_24hr_2022_006_120000\nrow2\nGARBAGE\n",
        ),
    ];
    let mut paths = Vec::new();
    for (name, content) in raw {
        let path = tmp.path().join(name);
        std::fs::write(&path, content).unwrap();
        paths.push(path);
    }

    let output = tmp.path().join("V1G1_zDGPS.2022_006");
    let report = Merger::merge_files(&paths, HeaderPolicy::Accumulate).unwrap();
    report.to_file(&output).unwrap();
    let first = std::fs::read(&output).unwrap();

    let report = Merger::merge_files(&paths, HeaderPolicy::Accumulate).unwrap();
    report.to_file(&output).unwrap();
    let second = std::fs::read(&output).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        String::from_utf8(first).unwrap(),
        "*hdr\nSource file(s),SYS_24hr_2022_006_000000,SYS_24hr_2022_006_120000\n*hdr\nrow1\nrow2\n"
    );
}

#[test]
fn empty_merge() {
    let paths: Vec<std::path::PathBuf> = Vec::new();
    let report = Merger::merge_files(&paths, HeaderPolicy::Accumulate).unwrap();
    assert!(report.is_empty());
    assert_eq!(report.to_string(), "");
}
