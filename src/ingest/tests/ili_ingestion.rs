//! ILI ingestion tests

use super::*;
use crate::config::IngestConfig;
use crate::ingest::{ingest_ili, ingest_ili_with_config, ingest_ili_with_stats};

#[test]
fn test_two_row_file() {
    let file = create_temp_csv("idx,year,week,est\n0,2020,1,100\n0,2020,2,150\n");

    let dataset = ingest_ili(file.path()).unwrap();

    assert_eq!(dataset.year, vec![2020, 2020]);
    assert_eq!(dataset.week, vec![1, 2]);
    assert_eq!(dataset.est_inc, vec![100, 150]);
    assert_eq!(dataset.size(), 2);
    assert_eq!(dataset.flu_season, None);
}

#[test]
fn test_trailing_record_without_newline() {
    let file = create_temp_csv("idx,year,week,est\r\n0,2020,1,100\r\n1,2020,2,150");

    let dataset = ingest_ili(file.path()).unwrap();

    assert_eq!(dataset.est_inc, vec![100, 150]);
}

#[test]
fn test_many_rows_match_reference() {
    let rows = 1000;
    let file = create_temp_csv(&generate_ili_csv(rows));

    let dataset = ingest_ili(file.path()).unwrap();

    assert_eq!(dataset.size(), rows);
    assert_eq!(dataset.week.len(), rows);
    assert_eq!(dataset.est_inc.len(), rows);
    for (i, (year, week, est_inc)) in dataset.rows().enumerate() {
        assert_eq!(year, 2000 + (i / 52) as i32);
        assert_eq!(week, (i % 52 + 1) as i32);
        assert_eq!(est_inc, (i * 3) as i32);
    }
}

#[test]
fn test_growth_is_logarithmic_and_shrinks_to_fit() {
    let file = create_temp_csv(&generate_ili_csv(1000));
    let config = IngestConfig::default().with_initial_capacity(1);

    let (dataset, stats) = ingest_ili_with_stats(file.path(), &config).unwrap();

    // Capacity doubles at 1, 2, 4, ..., 512 committed rows.
    assert_eq!(stats.growths, 10);
    assert_eq!(stats.rows_accepted, 1000);
    assert_eq!(stats.records_seen, 1001);
    assert_eq!(dataset.size(), 1000);
    assert_eq!(dataset.year.len(), dataset.size());
}

#[test]
fn test_default_reservation_growths() {
    let file = create_temp_csv(&generate_ili_csv(1000));

    let (_, stats) = ingest_ili_with_stats(file.path(), &IngestConfig::default()).unwrap();

    assert_eq!(stats.growths, 5);
}

#[test]
fn test_chunk_size_does_not_change_result() {
    let content = generate_ili_csv(120);
    let file = create_temp_csv(&content);
    let reference = ingest_ili(file.path()).unwrap();

    for chunk_size in [1, 2, 3, 7, 64] {
        let config = IngestConfig::default().with_chunk_size(chunk_size);
        let (dataset, stats) = ingest_ili_with_stats(file.path(), &config).unwrap();
        assert_eq!(dataset, reference, "chunk size {}", chunk_size);
        assert_eq!(stats.bytes_read, content.len() as u64);
        assert_eq!(stats.chunks_read, content.len().div_ceil(chunk_size));
    }
}

#[test]
fn test_parsing_twice_is_identical() {
    let file = create_temp_csv(&generate_ili_csv(75));

    let first = ingest_ili(file.path()).unwrap();
    let second = ingest_ili(file.path()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_extra_trailing_columns_are_ignored() {
    let file = create_temp_csv("idx,year,week,est,a,b\n0,2019,52,7,foo,bar\n1,2020,1,9,,\n");

    let dataset = ingest_ili(file.path()).unwrap();

    assert_eq!(dataset.year, vec![2019, 2020]);
    assert_eq!(dataset.week, vec![52, 1]);
    assert_eq!(dataset.est_inc, vec![7, 9]);
}

#[test]
fn test_index_column_content_is_ignored() {
    let file = create_temp_csv("h\nnot-an-index,2020,1,100\n,2020,2,150\n");

    let dataset = ingest_ili(file.path()).unwrap();

    assert_eq!(dataset.size(), 2);
}

#[test]
fn test_whitespace_around_fields() {
    let file = create_temp_csv("idx , year\n 0 ,\t2020 , 1,  -3 \n");

    let dataset = ingest_ili(file.path()).unwrap();

    assert_eq!(dataset.year, vec![2020]);
    assert_eq!(dataset.est_inc, vec![-3]);
}

#[test]
fn test_header_only_and_empty_files() {
    for content in ["idx,year,week,est\n", "idx,year,week,est", ""] {
        let file = create_temp_csv(content);
        let dataset = ingest_ili(file.path()).unwrap();
        assert_eq!(dataset.size(), 0, "content {:?}", content);
        assert!(dataset.is_empty());
    }
}

#[test]
fn test_first_line_is_always_dropped() {
    // No header: the first data row is consumed as the header.
    let file = create_temp_csv("0,2020,1,100\n1,2020,2,150\n");

    let dataset = ingest_ili(file.path()).unwrap();

    assert_eq!(dataset.week, vec![2]);
}

#[test]
fn test_blank_lines_are_skipped() {
    let file = create_temp_csv("idx,year,week,est\n\n0,2020,1,100\n\n\n1,2020,2,150\n\n");

    let dataset = ingest_ili_with_config(file.path(), &IngestConfig::default()).unwrap();

    assert_eq!(dataset.week, vec![1, 2]);
}
