use log::{
    Record,
    kv::{Error, Key, Value, VisitSource},
};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::encode::{Color, Encode, Style, Write};
use serde::Deserialize;
use std::io;

use super::{mask_secret, mask_string};

/// Keys whose values are credentials and are never printed.
const SECRET_KEYS: [&str; 4] = ["token", "access_token", "refresh_token", "password"];
/// Keys whose values identify the user and are partially masked.
const PERSONAL_KEYS: [&str; 2] = ["email", "authorization"];

#[derive(Debug, Deserialize)]
pub struct RedactingConsoleEncoderConfig {
    pub pattern: Option<String>,
}

/// Pattern encoder that appends the record's key-value pairs, masking
/// credentials and personal data.
#[derive(Debug)]
pub struct RedactingConsoleEncoder {
    delegate: PatternEncoder,
}

impl RedactingConsoleEncoder {
    pub fn new(pattern: &str) -> Self {
        Self {
            delegate: PatternEncoder::new(pattern),
        }
    }
}

impl Encode for RedactingConsoleEncoder {
    fn encode(&self, w: &mut dyn Write, record: &Record) -> anyhow::Result<()> {
        self.delegate.encode(w, record)?;

        let mut visitor = RedactingVisitor {
            writer: w,
            io_err: None,
        };

        if let Err(kv_err) = record.key_values().visit(&mut visitor) {
            if let Some(io_err) = visitor.io_err {
                return Err(io_err.into());
            }
            write!(w, " [KV Error: {}]", kv_err)?;
        }

        w.write_all(b"\n")?;
        Ok(())
    }
}

fn redact(key: &str, value: &Value<'_>) -> String {
    let key = key.to_ascii_lowercase();
    if SECRET_KEYS.contains(&key.as_str()) {
        mask_secret(&value.to_string())
    } else if PERSONAL_KEYS.contains(&key.as_str()) {
        mask_string(&value.to_string())
    } else {
        value.to_string()
    }
}

struct RedactingVisitor<'a> {
    writer: &'a mut dyn Write,
    io_err: Option<io::Error>,
}

impl<'a, 'kvs> VisitSource<'kvs> for RedactingVisitor<'a> {
    fn visit_pair(&mut self, key: Key<'kvs>, value: Value<'kvs>) -> Result<(), Error> {
        let rendered = redact(key.as_str(), &value);

        let result = (|| {
            self.writer.set_style(Style::new().text(Color::Cyan))?;
            write!(self.writer, " {}=", key)?;

            self.writer.set_style(&Style::default())?;
            write!(self.writer, "{}", rendered)?;
            Ok::<(), io::Error>(())
        })();

        if let Err(e) = result {
            self.io_err = Some(e);
            return Err(Error::msg("io error during visit"));
        }

        Ok(())
    }
}

pub struct RedactingConsoleEncoderDeserializer;

impl log4rs::config::Deserialize for RedactingConsoleEncoderDeserializer {
    type Trait = dyn Encode;
    type Config = RedactingConsoleEncoderConfig;

    fn deserialize(
        &self,
        config: RedactingConsoleEncoderConfig,
        _: &log4rs::config::Deserializers,
    ) -> anyhow::Result<Box<dyn Encode>> {
        let pattern = config.pattern.as_deref().unwrap_or("{d} {l} {m}");
        Ok(Box::new(RedactingConsoleEncoder::new(pattern)))
    }
}
