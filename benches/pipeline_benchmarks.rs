//! Performance benchmarks for the Attendance Engine.
//!
//! This benchmark suite measures end-to-end report generation:
//! - A single employee over one month
//! - 50 employees over one month
//! - 500 employees over one month
//! - 50 employees reconciled against an HR export
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use chrono::{Datelike, NaiveDate, Weekday};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use attendance_engine::config::ConfigLoader;
use attendance_engine::engine::AttendanceEngine;
use attendance_engine::ingest::RawTable;

const FILENAME: &str = "aug_2024_biometric.csv";

fn august() -> Vec<NaiveDate> {
    (1..=31)
        .filter_map(|d| NaiveDate::from_ymd_opt(2024, 8, d))
        .collect()
}

/// Creates a biometric export where employee `i` varies its clock-in and
/// misses a punch now and then.
fn create_export(employees: usize) -> RawTable {
    let cell = |s: String| Some(s);
    let dates = august();

    let mut header = vec![cell("Days".to_string()), None];
    header.extend(dates.iter().map(|d| cell(format!("{} {}", d.day(), d.format("%a")))));
    let mut rows = vec![header];

    for i in 0..employees {
        rows.push(vec![
            cell("Employee:".to_string()),
            None,
            None,
            cell(format!("{} : Employee {:04}", 1000 + i, i)),
        ]);
        let mut status = vec![cell("Status".to_string()), None];
        let mut ins = vec![cell("InTime".to_string()), None];
        let mut outs = vec![cell("OutTime".to_string()), None];
        for (d, date) in dates.iter().enumerate() {
            status.push(None);
            if date.weekday() == Weekday::Sun {
                ins.push(None);
                outs.push(None);
                continue;
            }
            let minute = (i * 7 + d * 13) % 90;
            ins.push(cell(format!("{:02}:{:02}", 9 + minute / 60, minute % 60)));
            if (i + d) % 17 == 0 {
                outs.push(None);
            } else {
                outs.push(cell(format!("{:02}:{:02}", 18 + minute / 60, minute % 60)));
            }
        }
        rows.push(status);
        rows.push(ins);
        rows.push(outs);
    }
    RawTable::new(rows)
}

/// Creates an HR export covering the same employees.
fn create_secondary(employees: usize) -> RawTable {
    let dates = august();
    let mut header = vec![Some("Full name".to_string())];
    header.extend(dates.iter().map(|d| Some(d.format("%d %b %Y").to_string())));
    let mut rows = vec![header];

    for i in 0..employees {
        let mut row = vec![Some(format!("Employee {:04}", i))];
        row.extend(dates.iter().map(|_| Some("GS|P|09:05|18:10".to_string())));
        rows.push(row);
    }
    RawTable::new(rows)
}

fn create_engine() -> AttendanceEngine {
    AttendanceEngine::new(ConfigLoader::load("./config/default").expect("Failed to load config"))
}

/// Benchmark: One employee, one month.
fn bench_single_employee(c: &mut Criterion) {
    let engine = create_engine();
    let table = create_export(1);

    c.bench_function("single_employee_month", |b| {
        b.iter(|| black_box(engine.process(black_box(&table), FILENAME, None).unwrap()))
    });
}

/// Benchmark: Growing employee counts.
fn bench_scaling(c: &mut Criterion) {
    let engine = create_engine();
    let mut group = c.benchmark_group("employees_per_month");

    for employees in [50usize, 500] {
        let table = create_export(employees);
        group.throughput(Throughput::Elements(employees as u64));
        group.bench_with_input(BenchmarkId::from_parameter(employees), &table, |b, table| {
            b.iter(|| black_box(engine.process(table, FILENAME, None).unwrap()))
        });
    }

    group.finish();
}

/// Benchmark: Reconciliation against the HR export.
fn bench_with_secondary(c: &mut Criterion) {
    let engine = create_engine();
    let table = create_export(50);
    let secondary = create_secondary(50);

    c.bench_function("reconciled_50_employees", |b| {
        b.iter(|| black_box(engine.process(&table, FILENAME, Some(&secondary)).unwrap()))
    });
}

criterion_group!(
    benches,
    bench_single_employee,
    bench_scaling,
    bench_with_secondary
);
criterion_main!(benches);
