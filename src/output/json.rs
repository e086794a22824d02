//
//  teamcity-cli
//  output/json.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # JSON Output Formatting
//!
//! | Function | Description | Use Case |
//! |----------|-------------|----------|
//! | [`write_json`] | Pretty-printed JSON | Human-readable output |
//! | [`write_json_compact`] | Minified JSON | Piping to other tools |
//! | [`write_json_to`] | Pretty JSON to any writer | Files, buffers, tests |
//!
//! Wire payloads produced by `tcity encode` go through these as well, so
//! property order and the recomputed `count` fields survive unchanged.

use serde::Serialize;
use std::io::Write;

/// Writes a value as pretty-printed JSON to stdout.
pub fn write_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Writes a value as pretty-printed JSON to a writer, followed by a newline.
pub fn write_json_to<W: Write, T: Serialize + ?Sized>(
    writer: &mut W,
    value: &T,
) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)?;
    Ok(())
}

/// Writes a value as compact single-line JSON to stdout.
pub fn write_json_compact<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string(value)?;
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::PropertyBag;

    #[test]
    fn test_write_json_to_buffer() {
        let mut bag = PropertyBag::new();
        bag.set("b", "2");
        bag.set("a", "1");

        let mut buffer = Vec::new();
        write_json_to(&mut buffer, &bag).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.ends_with('\n'));

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["count"], 2);
        assert_eq!(value["property"][0]["name"], "b");
    }
}
