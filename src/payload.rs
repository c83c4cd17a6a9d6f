//! Request payload builders.
//!
//! Transforms raw address records into the wire format the dataflow endpoint
//! accepts: either delimited text (banner line, header row, one row per
//! record over the full column superset) or the versioned geocode-feed
//! markup. Exactly these two targets exist; the selection is made through
//! [`crate::Format`].

use crate::error::{Error, Result};
use crate::schema;
use crate::types::AddressRecord;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};

/// Left-pad a postcode with zeros to the fixed wire width.
///
/// A missing postcode becomes all zeros rather than any "missing" marker.
/// Values already at or beyond the width pass through unchanged.
pub(crate) fn pad_postcode(postcode: Option<&str>) -> String {
    let raw = postcode.unwrap_or("");
    format!("{:0>width$}", raw, width = schema::POSTCODE_WIDTH)
}

/// Value of one request column for one input record.
///
/// Response columns and unused request columns travel empty; the service
/// fills the response side in.
fn request_field(column: &str, record: &AddressRecord) -> String {
    match column {
        schema::ID => record.id.to_string(),
        schema::REQUEST_CULTURE => schema::CULTURE.to_string(),
        schema::REQUEST_ADDRESS_LINE => record.street_address.clone().unwrap_or_default(),
        schema::REQUEST_LOCALITY => record.municipality.clone().unwrap_or_default(),
        schema::REQUEST_POSTAL_CODE => pad_postcode(record.postcode.as_deref()),
        schema::REQUEST_COUNTRY_REGION => schema::COUNTRY_REGION.to_string(),
        _ => String::new(),
    }
}

/// Serialize records as the delimited-text request payload.
///
/// One output row per input row, id taken from the record's explicit `id`.
/// The banner line precedes the header row.
pub fn encode_csv(records: &[AddressRecord]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(schema::COLUMNS)?;

    for record in records {
        let row: Vec<String> = schema::COLUMNS
            .iter()
            .map(|column| request_field(column, record))
            .collect();
        writer.write_record(&row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| Error::Parse(format!("failed to flush request payload: {e}")))?;
    let table = String::from_utf8(bytes)
        .map_err(|e| Error::Parse(format!("request payload is not valid UTF-8: {e}")))?;

    Ok(format!("{}\n{}", schema::CSV_BANNER, table))
}

/// Serialize records as the geocode-feed markup payload.
///
/// One `GeocodeEntity` per record under the versioned feed envelope, the
/// entity id rendered as a zero-padded fixed-width string.
pub fn encode_xml(records: &[AddressRecord]) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

    let mut feed = BytesStart::new("GeocodeFeed");
    feed.push_attribute(("xmlns", schema::GEOCODE_FEED_NS));
    feed.push_attribute(("Version", schema::GEOCODE_FEED_VERSION));
    writer.write_event(Event::Start(feed))?;

    for record in records {
        let id = format!("{:0width$}", record.id, width = schema::XML_ID_WIDTH);

        let mut entity = BytesStart::new("GeocodeEntity");
        entity.push_attribute(("Id", id.as_str()));
        entity.push_attribute(("xmlns", schema::GEOCODE_FEED_NS));
        writer.write_event(Event::Start(entity))?;

        let mut request = BytesStart::new("GeocodeRequest");
        request.push_attribute(("Culture", schema::XML_CULTURE));
        request.push_attribute(("IncludeNeighborhood", "0"));
        writer.write_event(Event::Start(request))?;

        let mut address = BytesStart::new("Address");
        address.push_attribute((
            "AddressLine",
            record.street_address.as_deref().unwrap_or(""),
        ));
        address.push_attribute(("AdminDistrict", ""));
        address.push_attribute(("Locality", record.municipality.as_deref().unwrap_or("")));
        address.push_attribute((
            "PostalCode",
            pad_postcode(record.postcode.as_deref()).as_str(),
        ));
        writer.write_event(Event::Empty(address))?;

        writer.write_event(Event::End(BytesEnd::new("GeocodeRequest")))?;
        writer.write_event(Event::End(BytesEnd::new("GeocodeEntity")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("GeocodeFeed")))?;

    String::from_utf8(writer.into_inner())
        .map_err(|e| Error::Parse(format!("request payload is not valid UTF-8: {e}")))
}
