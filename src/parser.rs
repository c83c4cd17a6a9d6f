//! Result payload decoders.
//!
//! Mirrors of the two payload builders: the delimited-text decoder reads the
//! header-bearing table the service returns (one banner line precedes the
//! header), the markup decoder walks the geocode feed and flattens each
//! entity's identifier, locality and point coordinates into a record.
//!
//! No value validation happens here. Structural garbage fails fast; fields
//! the service left out are simply absent from the record.

use crate::error::{Error, Result};
use crate::schema;
use crate::types::ResultRecord;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// Decode a delimited-text result payload.
///
/// The service prepends exactly one banner line before the header row; it is
/// skipped, never interpreted.
pub fn decode_csv(text: &str) -> Result<Vec<ResultRecord>> {
    let table = match text.split_once('\n') {
        Some((_banner, rest)) => rest,
        None => {
            return Err(Error::Parse(
                "result payload is missing the header row".into(),
            ));
        }
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(table.as_bytes());
    let headers = reader.headers()?.clone();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let record: ResultRecord = headers
            .iter()
            .zip(row.iter())
            .map(|(header, value)| (header.to_string(), value.to_string()))
            .collect();
        records.push(record);
    }

    Ok(records)
}

/// Value of a named attribute on an element, unescaped.
fn attr_value(element: &BytesStart<'_>, name: &[u8]) -> Result<Option<String>> {
    for attr in element.attributes() {
        let attr = attr.map_err(|e| Error::Parse(format!("malformed attribute: {e}")))?;
        if attr.key.local_name().as_ref() == name {
            let value = attr.unescape_value()?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

/// Decode a geocode-feed markup result payload.
///
/// For each top-level `GeocodeEntity`: the `Id` attribute plus the locality
/// and point coordinates nested under `GeocodeResponse`, flattened under the
/// same dotted-path column names the delimited-text decoder produces.
/// Elements under `GeocodeRequest` are echoes of the request and are not
/// extracted.
pub fn decode_xml(text: &str) -> Result<Vec<ResultRecord>> {
    let mut reader = Reader::from_str(text);
    reader.trim_text(true);

    let mut records = Vec::new();
    let mut current: Option<ResultRecord> = None;
    let mut in_response = false;

    loop {
        match reader.read_event()? {
            Event::Start(element) => {
                match element.local_name().as_ref() {
                    b"GeocodeEntity" => {
                        let mut record = ResultRecord::new();
                        if let Some(id) = attr_value(&element, b"Id")? {
                            record.insert(schema::ID, id);
                        }
                        current = Some(record);
                    }
                    b"GeocodeResponse" => in_response = true,
                    _ => {}
                }
                extract_response_fields(&element, in_response, current.as_mut())?;
            }
            Event::Empty(element) => {
                if element.local_name().as_ref() == b"GeocodeEntity" {
                    // Entity with no children still yields a record
                    let mut record = ResultRecord::new();
                    if let Some(id) = attr_value(&element, b"Id")? {
                        record.insert(schema::ID, id);
                    }
                    records.push(record);
                } else {
                    extract_response_fields(&element, in_response, current.as_mut())?;
                }
            }
            Event::End(element) => match element.local_name().as_ref() {
                b"GeocodeEntity" => {
                    if let Some(record) = current.take() {
                        records.push(record);
                    }
                }
                b"GeocodeResponse" => in_response = false,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(records)
}

/// Pull locality and point coordinates off `Address`/`Point` elements, but
/// only inside a `GeocodeResponse`.
fn extract_response_fields(
    element: &BytesStart<'_>,
    in_response: bool,
    record: Option<&mut ResultRecord>,
) -> Result<()> {
    let Some(record) = record else {
        return Ok(());
    };
    if !in_response {
        return Ok(());
    }

    match element.local_name().as_ref() {
        b"Address" => {
            if let Some(locality) = attr_value(element, b"Locality")? {
                record.insert(schema::RESPONSE_LOCALITY, locality);
            }
        }
        b"Point" => {
            if let Some(latitude) = attr_value(element, b"Latitude")? {
                record.insert(schema::RESPONSE_LATITUDE, latitude);
            }
            if let Some(longitude) = attr_value(element, b"Longitude")? {
                record.insert(schema::RESPONSE_LONGITUDE, longitude);
            }
        }
        _ => {}
    }
    Ok(())
}
