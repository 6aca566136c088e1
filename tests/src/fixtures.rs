//! Test fixtures: CSV payload builders.

/// The header row used by all fixture files. The leading `id` column
/// plays the row-identifier role of the source dataset.
pub const HEADER: &str = "id,trans_date_trans_time,amt,gender,dob,state,city_pop,is_fraud";

/// Build a CSV payload from data rows (without identifiers).
pub fn csv_payload(rows: &[&str]) -> String {
    let mut data = String::from(HEADER);
    data.push('\n');
    for (i, row) in rows.iter().enumerate() {
        data.push_str(&format!("{},{}\n", i, row));
    }
    data
}

/// A small mixed dataset:
/// - 2020-06-21 (Sunday) 10:00, M, adult, CA, fraud
/// - 2020-06-21 (Sunday) 10:15, F, teen, TX, legit
/// - 2020-06-22 (Monday) 14:05, F, senior, CA, fraud
pub fn sample_payload() -> String {
    csv_payload(&[
        "2020-06-21 10:00:00,42.50,M,1990-05-01,CA,120000,1",
        "2020-06-21 10:15:00,13.37,F,2004-03-12,TX,5500,0",
        "2020-06-22 14:05:00,99.99,F,1950-01-01,CA,120000,1",
    ])
}

/// A file with a header but no data rows.
pub fn empty_payload() -> String {
    format!("{}\n", HEADER)
}

/// A file missing the timestamp column entirely.
pub fn no_timestamp_payload() -> String {
    let mut data = String::from("id,amt,gender,dob,state,city_pop,is_fraud\n");
    data.push_str("0,42.50,M,1990-05-01,CA,120000,1\n");
    data
}

/// A file where some cells fail to parse.
pub fn dirty_payload() -> String {
    csv_payload(&[
        "not-a-timestamp,42.50,M,1990-05-01,CA,120000,1",
        "2020-06-21 10:15:00,13.37,F,2004-03-12,TX,5500,0",
        "2020-06-22 14:05:00,99.99,F,1950-01-01,CA,120000,1",
    ])
}
