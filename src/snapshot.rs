//! Versioned binary snapshot codec.
//!
//! Fixed little-endian, length-prefixed strings (a 0 length means absent),
//! section-by-section — entities, attributes, relation types, values, then
//! edges. Manual `to_le_bytes`/`from_le_bytes` framing in the style of the
//! teacher crate's own binary payload encoders.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::catalog::attribute::DataType;
use crate::catalog::value::ValueData;
use crate::config::StoreConfig;
use crate::error::{Error, Result};
use crate::graph::Direction;
use crate::store::Store;

const MAGIC: &[u8; 8] = b"EAVGPERS";
const VERSION: u32 = 1;

fn write_u32(w: &mut impl Write, v: u32) -> io::Result<()> {
    w.write_all(&v.to_le_bytes())
}
fn write_u64(w: &mut impl Write, v: u64) -> io::Result<()> {
    w.write_all(&v.to_le_bytes())
}
fn write_i64(w: &mut impl Write, v: i64) -> io::Result<()> {
    w.write_all(&v.to_le_bytes())
}
fn write_f64(w: &mut impl Write, v: f64) -> io::Result<()> {
    w.write_all(&v.to_le_bytes())
}
fn write_str(w: &mut impl Write, s: Option<&str>) -> io::Result<()> {
    match s {
        Some(s) => {
            write_u32(w, s.len() as u32)?;
            w.write_all(s.as_bytes())
        }
        None => write_u32(w, 0),
    }
}
fn write_bytes(w: &mut impl Write, b: &[u8]) -> io::Result<()> {
    write_u32(w, b.len() as u32)?;
    w.write_all(b)
}

fn read_u32(r: &mut impl Read) -> Result<u32> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf).map_err(Error::Io)?;
    Ok(u32::from_le_bytes(buf))
}
fn read_u64(r: &mut impl Read) -> Result<u64> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf).map_err(Error::Io)?;
    Ok(u64::from_le_bytes(buf))
}
fn read_i64(r: &mut impl Read) -> Result<i64> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf).map_err(Error::Io)?;
    Ok(i64::from_le_bytes(buf))
}
fn read_f64(r: &mut impl Read) -> Result<f64> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf).map_err(Error::Io)?;
    Ok(f64::from_le_bytes(buf))
}
fn read_string(r: &mut impl Read) -> Result<Option<String>> {
    let len = read_u32(r)? as usize;
    if len == 0 {
        return Ok(None);
    }
    let mut buf = vec![0u8; len];
    r.read_exact(&mut buf).map_err(Error::Io)?;
    String::from_utf8(buf)
        .map(Some)
        .map_err(|e| Error::SnapshotCorrupt(format!("invalid utf8 in string: {e}")))
}
fn read_bytes(r: &mut impl Read) -> Result<Vec<u8>> {
    let len = read_u32(r)? as usize;
    let mut buf = vec![0u8; len];
    r.read_exact(&mut buf).map_err(Error::Io)?;
    Ok(buf)
}

fn data_type_code(dt: DataType) -> u32 {
    match dt {
        DataType::Int => 0,
        DataType::Double => 1,
        DataType::String => 2,
        DataType::Binary => 3,
        DataType::Entity => 4,
    }
}
fn data_type_from_code(code: u32) -> Result<DataType> {
    Ok(match code {
        0 => DataType::Int,
        1 => DataType::Double,
        2 => DataType::String,
        3 => DataType::Binary,
        4 => DataType::Entity,
        other => return Err(Error::SnapshotCorrupt(format!("unknown data type code {other}"))),
    })
}

fn direction_code(d: Direction) -> u32 {
    match d {
        Direction::Out => 0,
        Direction::In => 1,
        Direction::Both => 2,
    }
}
fn direction_from_code(code: u32) -> Result<Direction> {
    Ok(match code {
        0 => Direction::Out,
        1 => Direction::In,
        2 => Direction::Both,
        other => return Err(Error::SnapshotCorrupt(format!("unknown direction code {other}"))),
    })
}

pub(crate) fn save(store: &Store, path: &Path) -> Result<()> {
    let guard = store.read();
    let file = File::create(path).map_err(Error::Io)?;
    let mut w = BufWriter::new(file);

    w.write_all(MAGIC).map_err(Error::Io)?;
    write_u32(&mut w, VERSION).map_err(Error::Io)?;

    let mut entities = Vec::new();
    guard.catalog.for_each_entity(|e| {
        entities.push(e.clone());
        true
    });
    write_u64(&mut w, entities.len() as u64).map_err(Error::Io)?;
    for e in &entities {
        write_u64(&mut w, e.id).map_err(Error::Io)?;
        write_u32(&mut w, e.type_id).map_err(Error::Io)?;
        write_str(&mut w, e.name.as_deref()).map_err(Error::Io)?;
    }

    let mut attributes = Vec::new();
    guard.catalog.for_each_attribute(|a| {
        attributes.push(a.clone());
        true
    });
    write_u64(&mut w, attributes.len() as u64).map_err(Error::Io)?;
    for a in &attributes {
        write_u64(&mut w, a.id).map_err(Error::Io)?;
        write_u32(&mut w, data_type_code(a.data_type)).map_err(Error::Io)?;
        write_str(&mut w, Some(&a.name)).map_err(Error::Io)?;
    }

    let mut relation_types = Vec::new();
    guard.catalog.for_each_relation_type(|r| {
        relation_types.push(r.clone());
        true
    });
    write_u64(&mut w, relation_types.len() as u64).map_err(Error::Io)?;
    for r in &relation_types {
        write_u64(&mut w, r.id).map_err(Error::Io)?;
        write_str(&mut w, Some(&r.name)).map_err(Error::Io)?;
    }

    let mut values = Vec::new();
    for e in &entities {
        values.extend(guard.catalog.values_for_entity(e.id));
    }
    write_u64(&mut w, values.len() as u64).map_err(Error::Io)?;
    for v in &values {
        write_u64(&mut w, v.id).map_err(Error::Io)?;
        write_u64(&mut w, v.entity_id).map_err(Error::Io)?;
        write_u64(&mut w, v.attribute_id).map_err(Error::Io)?;
        write_u32(&mut w, data_type_code(v.data.data_type())).map_err(Error::Io)?;
        match &v.data {
            ValueData::Int(n) => write_i64(&mut w, *n).map_err(Error::Io)?,
            ValueData::Double(d) => write_f64(&mut w, *d).map_err(Error::Io)?,
            ValueData::String(s) => write_bytes(&mut w, s.as_bytes()).map_err(Error::Io)?,
            ValueData::Binary(b) => write_bytes(&mut w, b).map_err(Error::Io)?,
            ValueData::Entity(id) => write_u64(&mut w, *id).map_err(Error::Io)?,
        }
    }

    let mut edges = Vec::new();
    guard.graph.for_each_edge(|e| {
        edges.push(e.clone());
        true
    });
    write_u64(&mut w, edges.len() as u64).map_err(Error::Io)?;
    for e in &edges {
        write_u64(&mut w, e.id).map_err(Error::Io)?;
        write_u64(&mut w, e.source).map_err(Error::Io)?;
        write_u64(&mut w, e.target).map_err(Error::Io)?;
        write_u64(&mut w, e.relation_type_id).map_err(Error::Io)?;
        write_f64(&mut w, e.weight).map_err(Error::Io)?;
        write_u32(&mut w, direction_code(e.direction)).map_err(Error::Io)?;
        write_u64(&mut w, e.timestamp).map_err(Error::Io)?;
        write_str(&mut w, e.label.as_deref()).map_err(Error::Io)?;
    }

    w.flush().map_err(Error::Io)?;
    tracing::debug!(path = %path.display(), entities = entities.len(), edges = edges.len(), "snapshot saved");
    Ok(())
}

pub(crate) fn load(path: &Path) -> Result<Store> {
    let file = File::open(path).map_err(Error::Io)?;
    let mut r = BufReader::new(file);

    let mut magic = [0u8; 8];
    r.read_exact(&mut magic).map_err(Error::Io)?;
    if &magic != MAGIC {
        return Err(Error::SnapshotCorrupt("bad magic".to_string()));
    }
    let version = read_u32(&mut r)?;
    if version != VERSION {
        return Err(Error::SnapshotCorrupt(format!("unsupported version {version}")));
    }

    let store = Store::new(StoreConfig::default());
    {
        let mut guard = store.write();

        let entity_count = read_u64(&mut r)?;
        for _ in 0..entity_count {
            let id = read_u64(&mut r)?;
            let type_id = read_u32(&mut r)?;
            let name = read_string(&mut r)?;
            guard.catalog.add_entity(id, type_id, name.as_deref())?;
            store.bump_entity_id(id);
        }

        let attribute_count = read_u64(&mut r)?;
        for _ in 0..attribute_count {
            let id = read_u64(&mut r)?;
            let data_type = data_type_from_code(read_u32(&mut r)?)?;
            let name = read_string(&mut r)?
                .ok_or_else(|| Error::SnapshotCorrupt("attribute missing name".to_string()))?;
            guard.catalog.add_attribute(id, &name, data_type, None)?;
            store.bump_attribute_id(id);
        }

        let relation_type_count = read_u64(&mut r)?;
        for _ in 0..relation_type_count {
            let id = read_u64(&mut r)?;
            let name = read_string(&mut r)?
                .ok_or_else(|| Error::SnapshotCorrupt("relation type missing name".to_string()))?;
            guard.catalog.add_relation_type(id, &name)?;
            store.bump_relation_type_id(id);
        }

        let value_count = read_u64(&mut r)?;
        for _ in 0..value_count {
            let id = read_u64(&mut r)?;
            let entity_id = read_u64(&mut r)?;
            let attribute_id = read_u64(&mut r)?;
            let data_type = data_type_from_code(read_u32(&mut r)?)?;
            match data_type {
                DataType::Int => {
                    let v = read_i64(&mut r)?;
                    guard.catalog.add_value(id, entity_id, attribute_id, data_type, crate::catalog::ValueInput::Int(v))?;
                }
                DataType::Double => {
                    let v = read_f64(&mut r)?;
                    guard.catalog.add_value(id, entity_id, attribute_id, data_type, crate::catalog::ValueInput::Double(v))?;
                }
                DataType::String => {
                    let bytes = read_bytes(&mut r)?;
                    let s = String::from_utf8(bytes)
                        .map_err(|e| Error::SnapshotCorrupt(format!("invalid utf8 in value: {e}")))?;
                    guard.catalog.add_value(id, entity_id, attribute_id, data_type, crate::catalog::ValueInput::Str(&s))?;
                }
                DataType::Binary => {
                    let bytes = read_bytes(&mut r)?;
                    guard.catalog.add_value(id, entity_id, attribute_id, data_type, crate::catalog::ValueInput::Binary(&bytes))?;
                }
                DataType::Entity => {
                    let v = read_u64(&mut r)?;
                    guard.catalog.add_value(id, entity_id, attribute_id, data_type, crate::catalog::ValueInput::Entity(v))?;
                }
            };
            store.bump_value_id(id);
        }

        let edge_count = read_u64(&mut r)?;
        for _ in 0..edge_count {
            let id = read_u64(&mut r)?;
            let source = read_u64(&mut r)?;
            let target = read_u64(&mut r)?;
            let relation_type_id = read_u64(&mut r)?;
            let weight = read_f64(&mut r)?;
            let direction = direction_from_code(read_u32(&mut r)?)?;
            let timestamp = read_u64(&mut r)?;
            let label = read_string(&mut r)?;
            guard.graph.add_edge_ex(
                id,
                source,
                target,
                relation_type_id,
                weight,
                direction,
                label.as_deref(),
                timestamp,
            );
            store.bump_edge_id(id);
        }
    }

    tracing::debug!(path = %path.display(), "snapshot loaded");
    Ok(store)
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
