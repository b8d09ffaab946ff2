//! GeoKey directory model
//!
//! GeoKeys are the main way geographic information is stored in GeoTIFF
//! files. The external decoder hands the key entries over as already-typed
//! values; this module resolves that sparse, heterogeneously-typed mapping
//! eagerly into a closed, strongly-typed directory so that downstream code
//! never has to re-check key presence or value types.

use std::collections::HashMap;
use lazy_static::lazy_static;
use log::debug;

use crate::geo::constants::geo_keys;
use crate::raster::errors::{RasterError, RasterResult};

lazy_static! {
    // Parse the embedded code tables at startup
    static ref KEY_DEFINITIONS: KeyDefinitions = {
        let content = include_str!("../../geotiff_keys.toml");
        KeyDefinitions::from_str(content).unwrap_or_else(|e| {
            eprintln!("Warning: Failed to parse GeoTIFF key definitions: {}", e);
            KeyDefinitions::default()
        })
    };
}

/// Container for GeoKey id and EPSG code name tables
#[derive(Debug, Default)]
pub struct KeyDefinitions {
    // Maps GeoKey IDs to key names
    pub key_names: HashMap<u16, String>,
    // Maps model type codes to names
    pub model_type_names: HashMap<u16, String>,
    // Maps raster type codes to names
    pub raster_type_names: HashMap<u16, String>,
    // Maps geographic CS codes to names
    pub geographic_cs_names: HashMap<u16, String>,
    // Maps geodetic datum codes to names
    pub geodetic_datum_names: HashMap<u16, String>,
    // Maps ellipsoid codes to names
    pub ellipsoid_names: HashMap<u16, String>,
    // Maps angular unit codes to names
    pub angular_unit_names: HashMap<u16, String>,
    // Maps linear unit codes to names
    pub linear_unit_names: HashMap<u16, String>,
    // Maps projected CS codes to names
    pub projected_cs_names: HashMap<u16, String>,
}

impl KeyDefinitions {
    /// Parse key definitions from a TOML string
    pub fn from_str(content: &str) -> RasterResult<Self> {
        let toml_value: toml::Value = match content.parse() {
            Ok(value) => value,
            Err(e) => return Err(RasterError::GenericError(format!("Failed to parse TOML: {}", e))),
        };

        let mut defs = KeyDefinitions::default();

        Self::parse_code_table(&toml_value, "key_ids", &mut defs.key_names);
        Self::parse_code_table(&toml_value, "model_type_codes", &mut defs.model_type_names);
        Self::parse_code_table(&toml_value, "raster_type_codes", &mut defs.raster_type_names);
        Self::parse_code_table(&toml_value, "geographic_cs_codes", &mut defs.geographic_cs_names);
        Self::parse_code_table(&toml_value, "geodetic_datum_codes", &mut defs.geodetic_datum_names);
        Self::parse_code_table(&toml_value, "ellipsoid_codes", &mut defs.ellipsoid_names);
        Self::parse_code_table(&toml_value, "angular_unit_codes", &mut defs.angular_unit_names);
        Self::parse_code_table(&toml_value, "linear_unit_codes", &mut defs.linear_unit_names);
        Self::parse_code_table(&toml_value, "projected_cs_codes", &mut defs.projected_cs_names);

        Ok(defs)
    }

    /// Helper to parse code tables from TOML
    fn parse_code_table(toml_value: &toml::Value, table_name: &str, target: &mut HashMap<u16, String>) {
        if let Some(table) = toml_value.get(table_name).and_then(|v| v.as_table()) {
            for (k, v) in table {
                if let (Ok(id), Some(name)) = (k.parse::<u16>(), v.as_str()) {
                    target.insert(id, name.to_string());
                }
            }
        }
    }

    /// Get a GeoKey name by ID
    pub fn get_key_name(&self, key_id: u16) -> String {
        self.key_names.get(&key_id)
            .cloned()
            .unwrap_or_else(|| format!("Unknown-{}", key_id))
    }

    /// Get a code name from the appropriate table
    pub fn get_code_name(&self, code_type: &str, code_id: u16) -> String {
        let lookup_result = match code_type {
            "model_type" => self.model_type_names.get(&code_id),
            "raster_type" => self.raster_type_names.get(&code_id),
            "geographic_cs" => self.geographic_cs_names.get(&code_id),
            "geodetic_datum" => self.geodetic_datum_names.get(&code_id),
            "ellipsoid" => self.ellipsoid_names.get(&code_id),
            "angular_unit" => self.angular_unit_names.get(&code_id),
            "linear_unit" => self.linear_unit_names.get(&code_id),
            "projected_cs" => self.projected_cs_names.get(&code_id),
            _ => None,
        };

        lookup_result.map_or_else(
            || format!("{}", code_id),
            |s| s.clone()
        )
    }
}

/// Get a GeoKey name
pub fn get_key_name(key_id: u16) -> String {
    KEY_DEFINITIONS.get_key_name(key_id)
}

/// Get a code name
pub fn get_code_name(code_type: &str, code: u16) -> String {
    KEY_DEFINITIONS.get_code_name(code_type, code)
}

/// Look up a projected CS name in the embedded table
pub(crate) fn projected_cs_name(code: u16) -> Option<String> {
    KEY_DEFINITIONS.projected_cs_names.get(&code).cloned()
}

/// A single decoded GeoKey value
///
/// GeoKeys store SHORT values inline and reference the double/ASCII
/// parameter tags for everything else; by the time entries reach this
/// crate the decoder has already resolved those references.
#[derive(Debug, Clone, PartialEq)]
pub enum GeoKeyValue {
    Short(u16),
    Double(f64),
    Ascii(String),
}

impl GeoKeyValue {
    /// The value as a SHORT code, if it is one
    pub fn as_short(&self) -> Option<u16> {
        match self {
            GeoKeyValue::Short(v) => Some(*v),
            _ => None,
        }
    }

    /// The value as a double, widening SHORT codes
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            GeoKeyValue::Short(v) => Some(f64::from(*v)),
            GeoKeyValue::Double(v) => Some(*v),
            GeoKeyValue::Ascii(_) => None,
        }
    }

    /// The value as a string slice, if it is ASCII
    pub fn as_str(&self) -> Option<&str> {
        match self {
            GeoKeyValue::Ascii(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

/// Represents one entry of the decoded GeoKey directory
#[derive(Debug, Clone)]
pub struct GeoKeyEntry {
    pub key_id: u16,
    pub value: GeoKeyValue,
}

impl GeoKeyEntry {
    /// Create a new GeoKey entry
    pub fn new(key_id: u16, value: GeoKeyValue) -> Self {
        GeoKeyEntry { key_id, value }
    }

    /// Get the name of this key
    pub fn get_name(&self) -> String {
        get_key_name(self.key_id)
    }
}

/// The recognized GeoKey set, resolved into typed optional fields
///
/// Only the keys the georeferencing resolver consumes are kept; anything
/// else is logged and dropped. Every field distinguishes "absent" from any
/// legal value, so presence checks happen exactly once, here.
#[derive(Debug, Clone, Default)]
pub struct GeoKeyDirectory {
    pub model_type: Option<u16>,
    pub raster_type: Option<u16>,
    pub citation: Option<String>,
    pub geographic_type: Option<u16>,
    pub geog_citation: Option<String>,
    pub geodetic_datum: Option<u16>,
    pub ellipsoid: Option<u16>,
    pub angular_units: Option<u16>,
    pub projected_cs_type: Option<u16>,
    pub projection: Option<u16>,
    pub proj_coord_trans: Option<u16>,
    pub linear_units: Option<u16>,
}

impl GeoKeyDirectory {
    /// Resolve raw key entries into the typed directory
    ///
    /// Entries with an unexpected value type for their key are treated the
    /// same as unrecognized keys: logged at debug level and skipped.
    pub fn from_entries(entries: &[GeoKeyEntry]) -> Self {
        let mut dir = GeoKeyDirectory::default();

        for entry in entries {
            debug!("GeoKey: id={} ({}), value={:?}",
                 entry.key_id, entry.get_name(), entry.value);

            match entry.key_id {
                geo_keys::MODEL_TYPE => dir.model_type = entry.value.as_short(),
                geo_keys::RASTER_TYPE => dir.raster_type = entry.value.as_short(),
                geo_keys::CITATION => dir.citation = entry.value.as_str().map(String::from),
                geo_keys::GEOGRAPHIC_TYPE => dir.geographic_type = entry.value.as_short(),
                geo_keys::GEOG_CITATION => dir.geog_citation = entry.value.as_str().map(String::from),
                geo_keys::GEODETIC_DATUM => dir.geodetic_datum = entry.value.as_short(),
                geo_keys::GEOG_ANGULAR_UNITS => dir.angular_units = entry.value.as_short(),
                geo_keys::ELLIPSOID => dir.ellipsoid = entry.value.as_short(),
                geo_keys::PROJECTED_CS_TYPE => dir.projected_cs_type = entry.value.as_short(),
                geo_keys::PROJECTION => dir.projection = entry.value.as_short(),
                geo_keys::PROJ_COORD_TRANS => dir.proj_coord_trans = entry.value.as_short(),
                geo_keys::PROJ_LINEAR_UNITS => dir.linear_units = entry.value.as_short(),
                _ => debug!("Skipping unrecognized GeoKey {}", entry.key_id),
            }
        }

        dir
    }

    /// Whether no recognized key carried a value
    pub fn is_empty(&self) -> bool {
        self.model_type.is_none()
            && self.raster_type.is_none()
            && self.citation.is_none()
            && self.geographic_type.is_none()
            && self.geog_citation.is_none()
            && self.geodetic_datum.is_none()
            && self.ellipsoid.is_none()
            && self.angular_units.is_none()
            && self.projected_cs_type.is_none()
            && self.projection.is_none()
            && self.proj_coord_trans.is_none()
            && self.linear_units.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_directory_from_entries() {
        let entries = vec![
            GeoKeyEntry::new(geo_keys::MODEL_TYPE, GeoKeyValue::Short(1)),
            GeoKeyEntry::new(geo_keys::PROJECTED_CS_TYPE, GeoKeyValue::Short(32616)),
            GeoKeyEntry::new(geo_keys::CITATION, GeoKeyValue::Ascii("UTM Zone 16N".to_string())),
        ];

        let dir = GeoKeyDirectory::from_entries(&entries);
        assert_eq!(dir.model_type, Some(1));
        assert_eq!(dir.projected_cs_type, Some(32616));
        assert_eq!(dir.citation.as_deref(), Some("UTM Zone 16N"));
        assert_eq!(dir.geographic_type, None);
        assert!(!dir.is_empty());
    }

    #[test]
    fn unrecognized_keys_are_skipped() {
        let entries = vec![
            GeoKeyEntry::new(9999, GeoKeyValue::Short(7)),
            // A key whose value has the wrong type is skipped too
            GeoKeyEntry::new(geo_keys::GEOGRAPHIC_TYPE, GeoKeyValue::Ascii("bogus".to_string())),
        ];

        let dir = GeoKeyDirectory::from_entries(&entries);
        assert!(dir.is_empty());
    }

    #[test]
    fn key_names_resolve_from_embedded_table() {
        assert_eq!(get_key_name(3072), "ProjectedCSTypeGeoKey");
        assert_eq!(get_key_name(2048), "GeographicTypeGeoKey");
        assert_eq!(get_key_name(12345), "Unknown-12345");
        assert_eq!(get_code_name("geographic_cs", 4326), "WGS 84");
    }

    #[test]
    fn geo_key_value_accessors() {
        assert_eq!(GeoKeyValue::Short(42).as_short(), Some(42));
        assert_eq!(GeoKeyValue::Short(42).as_f64(), Some(42.0));
        assert_eq!(GeoKeyValue::Double(1.5).as_f64(), Some(1.5));
        assert_eq!(GeoKeyValue::Double(1.5).as_short(), None);
        assert_eq!(GeoKeyValue::Ascii("x".to_string()).as_str(), Some("x"));
    }
}
