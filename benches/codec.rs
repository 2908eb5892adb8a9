use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ingot::{from_str, record, to_string, Config, Policy};
use serde::{Deserialize, Serialize};

record! {
    #[derive(Debug, Default, Clone, Serialize, Deserialize)]
    pub struct Server {
        pub host: String,
        pub port: u16,
        pub workers: u32,
        pub timeout: f64,
        pub verbose: bool,
    }
}

record! {
    #[derive(Debug, Default, Clone, Serialize, Deserialize)]
    pub struct Settings {
        pub primary: Server,
        pub fallback: Server,
    }
}

fn sample_settings() -> Settings {
    let server = Server {
        host: "example.org".to_string(),
        port: 8080,
        workers: 16,
        timeout: 2.5,
        verbose: false,
    };
    Settings {
        primary: server.clone(),
        fallback: server,
    }
}

/// Text with `sections` sections of `options` options each.
fn sample_text(sections: usize, options: usize) -> String {
    let mut text = String::new();
    for s in 0..sections {
        text.push_str(&format!("[section{s}]\n"));
        for o in 0..options {
            text.push_str(&format!("option{o}=value {s}.{o}\n"));
        }
    }
    text
}

fn benchmark_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for size in [10, 50, 100, 500].iter() {
        let text = sample_text(*size, 10);

        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| black_box(text).parse::<Config>())
        });
    }
    group.finish();
}

fn benchmark_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("write");

    for size in [10, 50, 100, 500].iter() {
        let config: Config = sample_text(*size, 10).parse().unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(size), &config, |b, config| {
            b.iter(|| black_box(config).to_bytes())
        });
    }
    group.finish();
}

fn benchmark_comments_and_whitespace(c: &mut Criterion) {
    let text: String = sample_text(100, 10)
        .lines()
        .map(|line| format!("  {line}  \n# note\n\n"))
        .collect();

    c.bench_function("parse_noisy", |b| b.iter(|| black_box(&text).parse::<Config>()));
}

fn benchmark_bind(c: &mut Criterion) {
    let mut group = c.benchmark_group("bind");
    let settings = sample_settings();
    let config = Config::from_record(&settings).unwrap();

    group.bench_function("generate", |b| {
        b.iter(|| Config::from_record(black_box(&settings)))
    });
    group.bench_function("populate_strict", |b| {
        b.iter(|| {
            let mut target = Settings::default();
            config.populate(&mut target, Policy::Strict).map(|()| target)
        })
    });
    group.bench_function("populate_lenient", |b| {
        b.iter(|| {
            let mut target = Settings::default();
            config.populate(&mut target, Policy::Lenient).map(|()| target)
        })
    });
    group.finish();
}

fn benchmark_serde(c: &mut Criterion) {
    let mut group = c.benchmark_group("serde");
    let settings = sample_settings();
    let text = to_string(&settings).unwrap();

    group.bench_function("to_string", |b| b.iter(|| to_string(black_box(&settings))));
    group.bench_function("from_str", |b| {
        b.iter(|| from_str::<Settings>(black_box(&text)))
    });
    group.finish();
}

fn benchmark_roundtrip(c: &mut Criterion) {
    let text = sample_text(50, 10);

    c.bench_function("roundtrip", |b| {
        b.iter(|| {
            let config: Config = black_box(&text).parse().unwrap();
            let _written = config.to_string();
        })
    });
}

criterion_group!(
    benches,
    benchmark_parse,
    benchmark_write,
    benchmark_comments_and_whitespace,
    benchmark_bind,
    benchmark_serde,
    benchmark_roundtrip
);
criterion_main!(benches);
