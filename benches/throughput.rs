use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use arealog::{
    area::{extractor::extract, table::AreaLookupTable},
    ingest::{ingest_log, split_records},
    parser::normalize,
};

fn table() -> AreaLookupTable {
    let letters = "ABCDEFGHJKLMNOPQ";
    let regions = ["TA", "QR", "2A", "ZZ"];
    let mut tokens = Vec::new();
    for letter in letters.chars() {
        for row in 0..44 {
            for region in regions {
                tokens.push(format!("{letter}{row:02}{region}"));
            }
        }
    }
    AreaLookupTable::from_tokens(tokens).expect("table")
}

fn log(n: u64) -> String {
    let mut out = String::from("<ADIF_VER:5>3.1.4<EOH>\n");
    for i in 0..n {
        let call = format!("K{i}AA");
        let area = format!("F{:02}TA", i % 44);
        out.push_str(&format!(
            "<QSO_DATE:8>20240101<FREQ:6>14.205<STATION_CALLSIGN:5>4Z1KD<CALL:{}>{call}\
             <STX_STRING:3>599<SRX_STRING:9>599 {area}<COMMENT:12>tnx fer QSO<EOR>\n",
            call.len()
        ));
    }
    out
}

fn bench_normalize(c: &mut Criterion) {
    let text = log(50_000);
    let raws = split_records(&text);
    c.bench_function("normalize_50k", |b| {
        b.iter(|| {
            let _ = normalize(&raws);
        });
    });
}

fn bench_extract(c: &mut Criterion) {
    let table = table();
    let text = log(50_000);
    let records = normalize(split_records(&text));
    c.bench_function("extract_50k", |b| {
        b.iter(|| {
            let _ = extract(&records, &table, "4Z1KD");
        });
    });
}

fn bench_ingest_log(c: &mut Criterion) {
    let mut group = c.benchmark_group("ingest_log");
    let table = table();

    for n in [100u64, 1_000u64, 10_000u64] {
        let text = log(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &text, |b, text| {
            b.iter(|| {
                let _ = ingest_log(text, &table, "4Z1KD");
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_normalize, bench_extract, bench_ingest_log);
criterion_main!(benches);
