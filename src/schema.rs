//! Fixed wire schema for the geocode dataflow.
//!
//! The remote service expects every request to carry the full superset of
//! request and response columns; response columns travel empty and are filled
//! in by the service. Column names follow the dotted-path convention
//! (`GeocodeRequest/...`, `GeocodeResponse/...`), which is part of the public
//! contract — callers select result fields by these names.

/// Identifier column, echoed back by the service
pub const ID: &str = "Id";
/// Request culture column
pub const REQUEST_CULTURE: &str = "GeocodeRequest/Culture";
/// Request street address column
pub const REQUEST_ADDRESS_LINE: &str = "GeocodeRequest/Address/AddressLine";
/// Request country column
pub const REQUEST_COUNTRY_REGION: &str = "GeocodeRequest/Address/CountryRegion";
/// Request municipality column
pub const REQUEST_LOCALITY: &str = "GeocodeRequest/Address/Locality";
/// Request postcode column
pub const REQUEST_POSTAL_CODE: &str = "GeocodeRequest/Address/PostalCode";
/// Geocoded locality column
pub const RESPONSE_LOCALITY: &str = "GeocodeResponse/Address/Locality";
/// Geocoded point latitude column
pub const RESPONSE_LATITUDE: &str = "GeocodeResponse/Point/Latitude";
/// Geocoded point longitude column
pub const RESPONSE_LONGITUDE: &str = "GeocodeResponse/Point/Longitude";

/// Culture value for the delimited-text request column.
///
/// Hardcoded: the input data carries no locale information.
pub const CULTURE: &str = "fi_FI";

/// Culture attribute value for the markup request. The service accepts the
/// hyphenated form here.
pub const XML_CULTURE: &str = "fi-FI";

/// Country value populated on every request row. Hardcoded instead of being
/// read from the source data — a known limitation of the upstream dataset.
pub const COUNTRY_REGION: &str = "Finland";

/// Postcodes are rendered left-padded with zeros to this width.
pub const POSTCODE_WIDTH: usize = 5;

/// Entity ids in the markup payload are rendered zero-padded to this width.
pub const XML_ID_WIDTH: usize = 3;

/// Banner line the service expects before the delimited-text header row, and
/// prepends to delimited-text results.
pub const CSV_BANNER: &str = "Bing Spatial Data Services, 2.0";

/// Namespace of the geocode feed envelope.
pub const GEOCODE_FEED_NS: &str = "http://schemas.microsoft.com/search/local/2010/5/geocode";

/// Version attribute of the geocode feed envelope.
pub const GEOCODE_FEED_VERSION: &str = "2.0";

/// The full request/response column set, in wire order.
pub const COLUMNS: [&str; 40] = [
    ID,
    REQUEST_CULTURE,
    "GeocodeRequest/Query",
    REQUEST_ADDRESS_LINE,
    "GeocodeRequest/Address/AdminDistrict",
    REQUEST_COUNTRY_REGION,
    "GeocodeRequest/Address/AdminDistrict2",
    "GeocodeRequest/Address/FormattedAddress",
    REQUEST_LOCALITY,
    REQUEST_POSTAL_CODE,
    "GeocodeRequest/Address/PostalTown",
    "GeocodeRequest/ConfidenceFilter/MinimumConfidence",
    "ReverseGeocodeRequest/IncludeEntityTypes",
    "ReverseGeocodeRequest/Location/Latitude",
    "ReverseGeocodeRequest/Location/Longitude",
    "GeocodeResponse/Address/AddressLine",
    "GeocodeResponse/Address/AdminDistrict",
    "GeocodeResponse/Address/CountryRegion",
    "GeocodeResponse/Address/AdminDistrict2",
    "GeocodeResponse/Address/FormattedAddress",
    RESPONSE_LOCALITY,
    "GeocodeResponse/Address/PostalCode",
    "GeocodeResponse/Address/PostalTown",
    "GeocodeResponse/Address/Neighborhood",
    "GeocodeResponse/Address/Landmark",
    "GeocodeResponse/Confidence",
    "GeocodeResponse/Name",
    "GeocodeResponse/EntityType",
    "GeocodeResponse/MatchCodes",
    RESPONSE_LATITUDE,
    RESPONSE_LONGITUDE,
    "GeocodeResponse/BoundingBox/EastLongitude",
    "GeocodeResponse/BoundingBox/NorthLatitude",
    "GeocodeResponse/BoundingBox/WestLongitude",
    "GeocodeResponse/BoundingBox/SouthLatitude",
    "GeocodeResponse/QueryParseValues",
    "GeocodeResponse/GeocodePoints",
    "StatusCode",
    "FaultReason",
    "TraceId",
];
