//
//  teamcity-cli
//  output/yaml.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # YAML Output Formatting
//!
//! Typed configuration printed as YAML can be edited by hand and fed back
//! to `tcity encode`, which accepts both YAML and JSON documents.

use serde::Serialize;
use std::io::Write;

/// Writes a value as a YAML document to stdout.
pub fn write_yaml<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let yaml = serde_yaml::to_string(value)?;
    print!("{}", yaml);
    Ok(())
}

/// Writes a value as a YAML document to a writer.
pub fn write_yaml_to<W: Write, T: Serialize + ?Sized>(
    writer: &mut W,
    value: &T,
) -> anyhow::Result<()> {
    serde_yaml::to_writer(&mut *writer, value)?;
    Ok(())
}
