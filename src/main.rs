use std::sync::Arc;

use didcodec::prelude::*;
use lazy_static::lazy_static;
use tracing_subscriber::EnvFilter;

lazy_static! {
    static ref TABLE: Arc<StaticEnumTable> = Arc::new(
        StaticEnumTable::new().with_set(
            "OperatingMode",
            [(0, "Standby"), (1, "Heating"), (2, "Cooling")],
        )
    );
    static ref REGISTRY: Registry = build_registry().unwrap_or_else(|err| {
        tracing::error!(%err, "invalid codec catalog");
        Registry::new()
    });
}

fn build_registry() -> Result<Registry, ConfigError> {
    let table: Arc<dyn EnumTable> = TABLE.clone();
    let mut registry = Registry::new();
    registry.register(
        0x0100,
        ScaledInteger::new("FlowTemperature", 2, 2, Scaling::default().scale(10.0).signed(true))?,
    );
    registry.register(0x0101, Enumeration::new("OperatingMode", 1, "OperatingMode", table)?);
    registry.register(0x0102, MacAddress::new("MacAddress", 6)?);
    registry.register(
        0x0103,
        List::new(
            "ErrorHistory",
            9,
            vec![
                Byte::new("Count", 1, 0)?.into(),
                Record::new(
                    "Entries",
                    2,
                    vec![Byte::new("Code", 1, 0)?.into(), Boolean::new("Active", 1, 0)?.into()],
                )?
                .into(),
            ],
        )?,
    );
    Ok(registry)
}

fn show(did: u16, bytes: &[u8]) {
    match REGISTRY.decode(Did(did), bytes, Mode::Decoded) {
        Ok(value) => tracing::info!(did = %Did(did), %value, "decoded"),
        Err(err) => tracing::warn!(%err, "decode failed"),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    show(0x0100, &[0xd2, 0x04]);
    show(0x0101, &[0x01]);
    show(0x0101, &[0x07]);
    show(0x0102, &[0x00, 0x1a, 0x2b, 0x3c, 0x4d, 0x5e]);
    show(0x0103, &[0x02, 0x11, 0x01, 0x12, 0x00, 0x00, 0x00, 0x00, 0x00]);

    match REGISTRY.encode(Did(0x0101), &Value::from("cooling"), Mode::Decoded) {
        Ok(bytes) => tracing::info!(hex = %hex::encode(bytes), "encoded OperatingMode"),
        Err(err) => tracing::warn!(%err, "encode failed"),
    }

    for (did, info) in REGISTRY.describe_all() {
        println!("{did}: {} {} ({} bytes)", info.codec, info.name, info.len);
    }
}
