use ingot::{from_config, from_str, to_config, to_string, Config, Error, ValueError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "lowercase")]
enum Mode {
    Fast,
    Safe,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Engine {
    mode: Mode,
    threads: u16,
    ratio: f64,
    verbose: bool,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Output {
    path: String,
    max_files: Option<u32>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Settings {
    engine: Engine,
    output: Output,
    extra: Option<Output>,
}

fn sample() -> Settings {
    Settings {
        engine: Engine {
            mode: Mode::Safe,
            threads: 8,
            ratio: 0.75,
            verbose: false,
        },
        output: Output {
            path: "/var/log/app.log".to_string(),
            max_files: Some(10),
        },
        extra: None,
    }
}

#[test]
fn test_round_trip() {
    let settings = sample();
    let text = to_string(&settings).unwrap();
    assert_eq!(
        text,
        "[engine]\nmode=safe\nthreads=8\nratio=0.75\nverbose=false\n[output]\npath=/var/log/app.log\nmax_files=10\n"
    );

    let back: Settings = from_str(&text).unwrap();
    assert_eq!(back, settings);
}

#[test]
fn test_reads_hand_written_text() {
    let text = "\
# engine tuning
[Engine]
Mode = fast
threads = 0x10
ratio = 1e-1
verbose = T

[output]
path = out.log
";
    let settings: Settings = from_str(text).unwrap();
    assert_eq!(settings.engine.mode, Mode::Fast);
    assert_eq!(settings.engine.threads, 16);
    assert_eq!(settings.engine.ratio, 0.1);
    assert!(settings.engine.verbose);
    assert_eq!(settings.output.max_files, None);
    assert_eq!(settings.extra, None);
}

#[test]
fn test_optional_section_present() {
    let text = "[engine]\nmode=fast\nthreads=1\nratio=0\nverbose=0\n[output]\npath=a\n[extra]\npath=b\nmax_files=2\n";
    let settings: Settings = from_str(text).unwrap();
    assert_eq!(
        settings.extra,
        Some(Output {
            path: "b".to_string(),
            max_files: Some(2),
        })
    );
    assert_eq!(
        to_string(&settings).unwrap(),
        text.replace("verbose=0", "verbose=false")
    );
}

#[test]
fn test_missing_required_option() {
    let err = from_str::<Settings>("[engine]\nmode=fast\n[output]\npath=a\n").unwrap_err();
    assert!(matches!(err, Error::Custom(ref msg) if msg.contains("threads")));
}

#[test]
fn test_bad_value() {
    let text = "[engine]\nmode=fast\nthreads=-1\nratio=0\nverbose=0\n[output]\npath=a\n";
    let err = from_str::<Settings>(text).unwrap_err();
    match err {
        Error::Format { field, value, source } => {
            assert_eq!(field, "Threads");
            assert_eq!(value, "-1");
            assert_eq!(source, ValueError::Syntax);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_unknown_variant() {
    let text = "[engine]\nmode=turbo\nthreads=1\nratio=0\nverbose=0\n[output]\npath=a\n";
    let err = from_str::<Settings>(text).unwrap_err();
    assert!(matches!(err, Error::Custom(ref msg) if msg.contains("turbo")));
}

#[test]
fn test_deny_unknown_fields() {
    #[derive(Deserialize, Debug)]
    #[serde(deny_unknown_fields)]
    #[allow(dead_code)]
    struct Strict {
        output: Output,
    }

    let ok: Settings = from_str(
        "[engine]\nmode=fast\nthreads=1\nratio=0\nverbose=0\n[output]\npath=a\n[later]\nk=v\n",
    )
    .unwrap();
    assert_eq!(ok.output.path, "a");

    let err = from_str::<Strict>("[output]\npath=a\n[later]\nk=v\n").unwrap_err();
    assert!(matches!(err, Error::Custom(ref msg) if msg.contains("later")));
}

#[test]
fn test_serde_and_record_views_agree() {
    let config = to_config(&sample()).unwrap();
    assert_eq!(config.get("engine", "threads"), Some("8"));
    assert_eq!(config.get("Output", "Max_files"), Some("10"));
    assert!(!config.contains_section("extra"));

    let back: Settings = from_config(&config).unwrap();
    assert_eq!(back, sample());
}

#[test]
fn test_maps_keep_text_names() {
    let config: Config = "[Zeta]\nB=2\n[alpha]\na=1\n".parse().unwrap();
    let map: BTreeMap<String, BTreeMap<String, u8>> = from_config(&config).unwrap();

    assert_eq!(map["zeta"]["b"], 2);
    assert_eq!(map["alpha"]["a"], 1);

    let written = to_string(&map).unwrap();
    assert_eq!(written, "[alpha]\na=1\n[zeta]\nb=2\n");
}

#[test]
fn test_rejects_non_config_shapes() {
    #[derive(Serialize)]
    struct Flat {
        name: String,
    }

    #[derive(Serialize)]
    struct Nested {
        inner: Inner,
    }

    #[derive(Serialize)]
    struct Inner {
        deeper: Output,
    }

    let err = to_string(&Flat {
        name: "x".to_string(),
    })
    .unwrap_err();
    assert!(matches!(err, Error::FieldIsNotStruct { .. }));

    let err = to_string(&Nested {
        inner: Inner {
            deeper: Output {
                path: String::new(),
                max_files: None,
            },
        },
    })
    .unwrap_err();
    assert!(matches!(err, Error::UnsupportedType { ref field } if field == "deeper"));
}
