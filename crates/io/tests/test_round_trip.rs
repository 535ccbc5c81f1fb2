//! Integration tests: tables written by this crate read back intact.

use arrow::array::{AsArray, RecordBatch};
use arrow::datatypes::{Float64Type, UInt8Type, UInt16Type, UInt32Type};
use cistern_io::{
    CalibrationPaths, IoError, ParquetCodec, ParquetOptions, read_calibration, read_rainfall,
    write_daily_csv, write_daily_parquet,
};
use cistern_synth::DailyRecord;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

/// Two years of alternating three-day wet and dry spells.
fn fixture() -> Vec<DailyRecord> {
    let mut out = Vec::new();
    for year in 1..=2u32 {
        for doy in 1..=365u16 {
            let (month, day_in_month) = cistern_calendar::Doy::new(doy).unwrap().month_day();
            let wet = (doy / 3) % 2 == 0;
            out.push(DailyRecord {
                synthetic_year: year,
                day_of_year: doy,
                month,
                day_in_month,
                rain_mm: if wet { f64::from(doy % 17) * 0.3125 } else { 0.0 },
                wet,
            });
        }
    }
    out
}

// ---------------------------------------------------------------------------
// 1. daily_csv_round_trip
// ---------------------------------------------------------------------------
#[test]
fn daily_csv_round_trip() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("daily.csv");
    let records = fixture();

    write_daily_csv(&path, "Iloilo Roxas", &records).expect("write succeeds");
    let table = read_rainfall(&path).expect("read succeeds");

    assert_eq!(table.station.as_deref(), Some("Iloilo Roxas"));
    assert_eq!(table.records, records);
}

// ---------------------------------------------------------------------------
// 2. rainfall_missing_columns
// ---------------------------------------------------------------------------
#[test]
fn rainfall_missing_columns() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("partial.csv");
    std::fs::write(&path, "synthetic_year,day_of_year,rain_mm\n1,1,0.0\n").unwrap();

    match read_rainfall(&path).unwrap_err() {
        IoError::MissingColumns { columns, .. } => {
            assert_eq!(columns, vec!["month", "day_in_month", "wet"]);
        }
        other => panic!("expected MissingColumns, got {other}"),
    }
}

// ---------------------------------------------------------------------------
// 3. parquet_columns
// ---------------------------------------------------------------------------
#[test]
fn parquet_columns() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("daily.parquet");
    let records = fixture();

    // Two row groups of one year each.
    let options = ParquetOptions {
        codec: ParquetCodec::Zstd,
        rows_per_group: 365,
    };
    write_daily_parquet(&path, "Iloilo Roxas", &records, options).expect("write succeeds");

    let file = std::fs::File::open(&path).unwrap();
    let builder = ParquetRecordBatchReaderBuilder::try_new(file).unwrap();
    assert_eq!(builder.metadata().num_row_groups(), 2);
    let batches: Vec<RecordBatch> = builder
        .build()
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();

    let mut years = Vec::new();
    let mut doys = Vec::new();
    let mut rain = Vec::new();
    let mut wet = Vec::new();
    for b in &batches {
        assert_eq!(b.column(0).as_string::<i32>().value(0), "Iloilo Roxas");
        years.extend(b.column(1).as_primitive::<UInt32Type>().values().iter().copied());
        doys.extend(b.column(2).as_primitive::<UInt16Type>().values().iter().copied());
        rain.extend(b.column(5).as_primitive::<Float64Type>().values().iter().copied());
        wet.extend(b.column(6).as_primitive::<UInt8Type>().values().iter().copied());
    }

    assert_eq!(years.len(), records.len());
    for (i, r) in records.iter().enumerate() {
        assert_eq!(years[i], r.synthetic_year);
        assert_eq!(doys[i], r.day_of_year);
        assert_eq!(rain[i], r.rain_mm);
        assert_eq!(wet[i], u8::from(r.wet));
    }
}

// ---------------------------------------------------------------------------
// 4. calibration_directory
// ---------------------------------------------------------------------------
#[test]
fn calibration_directory() {
    let dir = tempfile::tempdir().expect("create temp dir");
    std::fs::write(dir.path().join("transitions.csv"), "month,pDW\n1,0.15\n").unwrap();
    std::fs::write(
        dir.path().join("gamma.csv"),
        "month,gamma_k,gamma_theta,gamma_mean\n7,0.7,14.0,9.8\n",
    )
    .unwrap();
    std::fs::write(
        dir.path().join("spell_fits.csv"),
        "month,type,geom_p,nb_r,nb_p\nall,wet,0.4,,\nall,dry,,2,0.25\n",
    )
    .unwrap();

    let cal = read_calibration(&CalibrationPaths::in_dir(dir.path())).expect("read succeeds");
    assert_eq!(cal.transitions.wet_prob(1), 0.15);
    assert_eq!(cal.gamma.rows().len(), 1);
    assert_eq!(cal.spells.rows().len(), 2);
}

// ---------------------------------------------------------------------------
// 5. calibration_missing_file
// ---------------------------------------------------------------------------
#[test]
fn calibration_missing_file() {
    let dir = tempfile::tempdir().expect("create temp dir");
    std::fs::write(dir.path().join("transitions.csv"), "month,pDW\n").unwrap();

    match read_calibration(&CalibrationPaths::in_dir(dir.path())).unwrap_err() {
        IoError::FileNotFound { path } => assert!(path.ends_with("gamma.csv")),
        other => panic!("expected FileNotFound, got {other}"),
    }
}
