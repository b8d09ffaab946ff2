//! Coordinate reference system resolution
//!
//! Translates the typed GeoKey directory into a CRS code. Resolution is
//! deliberately soft: an unrecognized or missing key set yields
//! [`Projection::Unresolved`], never an error, because many consumers only
//! need raw pixel values.

use log::debug;

use crate::geo::constants::{epsg, model_type};
use crate::geo::keys::{self, GeoKeyDirectory};

/// The resolved spatial reference of a raster
///
/// Distinguishes "keys were present but resolved to nothing standard"
/// (`Unresolved`) from "the source carried no geographic keys at all"
/// (`Missing`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    /// EPSG-style registry code, or the user-defined sentinel 32767
    Epsg(u32),
    /// Geographic keys were present but no code could be determined
    Unresolved,
    /// The source carried no geographic keys
    Missing,
}

impl Projection {
    /// The numeric code, if one was resolved
    pub fn code(&self) -> Option<u32> {
        match self {
            Projection::Epsg(code) => Some(*code),
            _ => None,
        }
    }

    /// Whether a numeric code was resolved
    pub fn is_resolved(&self) -> bool {
        matches!(self, Projection::Epsg(_))
    }
}

/// Outcome of CRS resolution over a GeoKey directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrsResolution {
    pub projection: Projection,
    /// Whether the resolved system is a geographic (lat/long) one
    pub is_geographic: bool,
}

/// Resolve a CRS code from the typed GeoKey directory
///
/// The reference keys win: a ProjectedCSType or GeographicType code that is
/// not the user-defined sentinel is returned directly. Otherwise the
/// directory describes a CRS assembled from component parameters; a WGS84
/// datum or ellipsoid with no projection layered on top resolves to plain
/// WGS84 geographic, anything else resolves to the user-defined code 32767.
pub fn resolve_crs(directory: &GeoKeyDirectory) -> CrsResolution {
    // CRS by reference
    if let Some(code) = directory.projected_cs_type {
        if u32::from(code) != epsg::USER_DEFINED {
            debug!("Resolved projected CRS {} ({})",
                 code, keys::get_code_name("projected_cs", code));
            return CrsResolution {
                projection: Projection::Epsg(u32::from(code)),
                is_geographic: false,
            };
        }
    }
    if let Some(code) = directory.geographic_type {
        if u32::from(code) != epsg::USER_DEFINED {
            debug!("Resolved geographic CRS {} ({})",
                 code, keys::get_code_name("geographic_cs", code));
            return CrsResolution {
                projection: Projection::Epsg(u32::from(code)),
                is_geographic: true,
            };
        }
    }

    if directory.is_empty() {
        return CrsResolution {
            projection: Projection::Unresolved,
            is_geographic: false,
        };
    }

    // CRS assembled from component parameters. A projection method on top
    // of the geographic parameters makes the result a projected system.
    let projected = directory.projected_cs_type.is_some()
        || directory.projection.is_some()
        || directory.proj_coord_trans.is_some();
    let is_geographic = !projected
        || directory.model_type == Some(model_type::GEOGRAPHIC);

    let wgs84_datum = directory.geodetic_datum
        .map_or(false, |d| u32::from(d) == epsg::WGS84_DATUM);
    let wgs84_ellipsoid = directory.ellipsoid
        .map_or(false, |e| u32::from(e) == epsg::WGS84_ELLIPSOID);

    if !projected && (wgs84_datum || wgs84_ellipsoid) {
        debug!("Geographic parameters resolve to WGS84");
        return CrsResolution {
            projection: Projection::Epsg(epsg::WGS84),
            is_geographic: true,
        };
    }

    debug!("CRS assembled from raw parameters, using user-defined code");
    CrsResolution {
        projection: Projection::Epsg(epsg::USER_DEFINED),
        is_geographic,
    }
}

/// Format a human-readable description of a CRS code
pub fn describe_projection(code: u32) -> String {
    match code {
        epsg::WGS84_WEB_MERCATOR => "WGS 84 / Web Mercator (EPSG:3857)".to_string(),
        epsg::WGS84 => "WGS 84 Geographic (EPSG:4326)".to_string(),
        epsg::USER_DEFINED => "User-defined coordinate system".to_string(),

        // UTM zones
        32601..=32660 => format!("WGS 84 / UTM zone {}N", code - 32600),
        32701..=32760 => format!("WGS 84 / UTM zone {}S", code - 32700),
        26901..=26923 => format!("NAD83 / UTM zone {}N", code - 26900),
        26701..=26722 => format!("NAD27 / UTM zone {}N", code - 26700),
        25828..=25838 => format!("ETRS89 / UTM zone {}N", code - 25800),

        // Fall back to the embedded code tables
        _ => {
            if code <= u32::from(u16::MAX) {
                if let Some(name) = keys::projected_cs_name(code as u16) {
                    return name;
                }
                let geographic = keys::get_code_name("geographic_cs", code as u16);
                if geographic != format!("{}", code) {
                    return geographic;
                }
            }
            format!("EPSG:{}", code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::constants::geo_keys;
    use crate::geo::keys::{GeoKeyEntry, GeoKeyValue};

    fn directory(entries: &[(u16, u16)]) -> GeoKeyDirectory {
        let entries: Vec<GeoKeyEntry> = entries.iter()
            .map(|&(id, v)| GeoKeyEntry::new(id, GeoKeyValue::Short(v)))
            .collect();
        GeoKeyDirectory::from_entries(&entries)
    }

    #[test]
    fn projected_code_resolves_directly() {
        let dir = directory(&[
            (geo_keys::MODEL_TYPE, 1),
            (geo_keys::PROJECTED_CS_TYPE, 32616),
        ]);
        let crs = resolve_crs(&dir);
        assert_eq!(crs.projection, Projection::Epsg(32616));
        assert!(!crs.is_geographic);
    }

    #[test]
    fn geographic_code_resolves_directly() {
        let dir = directory(&[
            (geo_keys::MODEL_TYPE, 2),
            (geo_keys::GEOGRAPHIC_TYPE, 4326),
        ]);
        let crs = resolve_crs(&dir);
        assert_eq!(crs.projection, Projection::Epsg(4326));
        assert!(crs.is_geographic);
    }

    #[test]
    fn wgs84_parameters_resolve_to_4326() {
        // User-defined geographic type assembled from a WGS84 datum
        let dir = directory(&[
            (geo_keys::MODEL_TYPE, 2),
            (geo_keys::GEOGRAPHIC_TYPE, 32767),
            (geo_keys::GEODETIC_DATUM, 6326),
        ]);
        let crs = resolve_crs(&dir);
        assert_eq!(crs.projection, Projection::Epsg(4326));
        assert!(crs.is_geographic);
    }

    #[test]
    fn user_defined_parameters_fall_back_to_32767() {
        let dir = directory(&[
            (geo_keys::MODEL_TYPE, 2),
            (geo_keys::GEOGRAPHIC_TYPE, 32767),
            (geo_keys::GEODETIC_DATUM, 32767),
            (geo_keys::ELLIPSOID, 7004),
        ]);
        let crs = resolve_crs(&dir);
        assert_eq!(crs.projection, Projection::Epsg(32767));
        assert!(crs.is_geographic);
    }

    #[test]
    fn user_defined_projection_is_not_geographic() {
        let dir = directory(&[
            (geo_keys::MODEL_TYPE, 1),
            (geo_keys::PROJECTED_CS_TYPE, 32767),
            (geo_keys::PROJECTION, 32767),
            (geo_keys::GEODETIC_DATUM, 6326),
        ]);
        let crs = resolve_crs(&dir);
        assert_eq!(crs.projection, Projection::Epsg(32767));
        assert!(!crs.is_geographic);
    }

    #[test]
    fn empty_directory_is_unresolved() {
        let dir = GeoKeyDirectory::default();
        let crs = resolve_crs(&dir);
        assert_eq!(crs.projection, Projection::Unresolved);
        assert_eq!(crs.projection.code(), None);
    }

    #[test]
    fn projection_descriptions() {
        assert_eq!(describe_projection(4326), "WGS 84 Geographic (EPSG:4326)");
        assert_eq!(describe_projection(32616), "WGS 84 / UTM zone 16N");
        assert_eq!(describe_projection(32767), "User-defined coordinate system");
        assert_eq!(describe_projection(3395), "WGS 84 / World Mercator");
        assert_eq!(describe_projection(99999), "EPSG:99999");
    }
}
