use std::process::ExitCode;

use log::LevelFilter;

use rawframe_core::prelude::*;

// The payload defaults to 100 bytes of 'P'.
// For broadcasting, set "dst" to "ff:ff:ff:ff:ff:ff".
// A pre-computed CRC-32 can be given as e.g. "trailer": [1, 2, 3, 4], but
// most NICs overwrite or drop it unless FCS offloading is turned off.
const CONFIG: &str = r#"{
    "transmit": { "interface": "eth0", "no_fcs": false },
    "frame": {
        "dst": "01:02:03:04:05:06",
        "src": "01:02:03:04:05:06",
        "ether_type": 2049
    }
}"#;

fn run(config: &Config) -> Result<()> {
    let frame = config.frame.build()?;
    log::debug!("built {:?}", frame);

    let mut tx = Transmitter::open_with(&config.transmit)?;
    tx.send(&frame)?;
    tx.close();

    log::info!("sent {} bytes on '{}'", frame.len(), config.transmit.interface);

    Ok(())
}

/// Every error below `e` in its source chain, outermost first.
fn causes(e: &Error) -> Vec<String> {
    let mut causes = Vec::new();
    let mut source = std::error::Error::source(e);
    while let Some(cause) = source {
        causes.push(cause.to_string());
        source = cause.source();
    }
    causes
}

fn main() -> ExitCode {
    env_logger::builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let config = Config::from_json(CONFIG).expect("embedded config is invalid");

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            for cause in causes(&e) {
                log::error!("caused by: {}", cause);
            }
            ExitCode::FAILURE
        }
    }
}
