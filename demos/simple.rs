//! Reading, editing and writing a configuration, then binding it to types.
//!
//! Run with: cargo run --example simple

use ingot::{from_str, record, Config, Policy};
use serde::Deserialize;
use std::error::Error;

const SETTINGS: &str = "\
# application settings
[server]
host = localhost
port = 0x1F90

[logging]
level = info
";

record! {
    #[derive(Debug, Default)]
    pub struct Server {
        pub host: String,
        pub port: u16,
    }
}

record! {
    #[derive(Debug, Default)]
    pub struct Logging {
        pub level: String,
    }
}

record! {
    #[derive(Debug, Default)]
    pub struct Settings {
        pub server: Server,
        pub logging: Logging,
    }
}

#[derive(Debug, Deserialize)]
struct ServerOnly {
    server: ServerSection,
}

#[derive(Debug, Deserialize)]
struct ServerSection {
    host: String,
    port: u16,
}

fn main() -> Result<(), Box<dyn Error>> {
    let mut config: Config = SETTINGS.parse()?;

    config.add_option("server", "workers", "4");
    config.remove_section("logging");
    config.add_option("logging", "level", "debug");

    println!("Canonical output:\n{config}");

    // Record binding
    let mut settings = Settings::default();
    config.populate(&mut settings, Policy::Lenient)?;
    println!("Bound records: {settings:?}\n");

    let regenerated = Config::from_record(&settings)?;
    println!("Generated from records:\n{regenerated}");

    // Serde binding
    let server: ServerOnly = from_str(&config.to_string())?;
    assert_eq!(server.server.port, 8080);
    println!("✓ serde view: {}:{}", server.server.host, server.server.port);

    Ok(())
}
