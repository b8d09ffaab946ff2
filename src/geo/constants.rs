//! GeoTIFF key and code constants
//!
//! This module defines constants used throughout the georeferencing code,
//! making the code more readable by replacing magic numbers with
//! descriptive names.

/// GeoTIFF Key ID constants
pub mod geo_keys {
    pub const MODEL_TYPE: u16 = 1024;        // GTModelTypeGeoKey
    pub const RASTER_TYPE: u16 = 1025;       // GTRasterTypeGeoKey
    pub const CITATION: u16 = 1026;          // GTCitationGeoKey
    pub const GEOGRAPHIC_TYPE: u16 = 2048;   // GeographicTypeGeoKey
    pub const GEOG_CITATION: u16 = 2049;     // GeogCitationGeoKey
    pub const GEODETIC_DATUM: u16 = 2050;    // GeogGeodeticDatumGeoKey
    pub const PRIME_MERIDIAN: u16 = 2051;    // GeogPrimeMeridianGeoKey
    pub const GEOG_LINEAR_UNITS: u16 = 2052; // GeogLinearUnitsGeoKey
    pub const GEOG_ANGULAR_UNITS: u16 = 2054; // GeogAngularUnitsGeoKey
    pub const ELLIPSOID: u16 = 2056;         // GeogEllipsoidGeoKey
    pub const PROJECTED_CS_TYPE: u16 = 3072; // ProjectedCSTypeGeoKey
    pub const PCS_CITATION: u16 = 3073;      // PCSCitationGeoKey
    pub const PROJECTION: u16 = 3074;        // ProjectionGeoKey
    pub const PROJ_COORD_TRANS: u16 = 3075;  // ProjCoordTransGeoKey
    pub const PROJ_LINEAR_UNITS: u16 = 3076; // ProjLinearUnitsGeoKey
    pub const VERTICAL_CS_TYPE: u16 = 4096;  // VerticalCSTypeGeoKey
}

/// GTModelTypeGeoKey values
pub mod model_type {
    pub const PROJECTED: u16 = 1;   // Projection coordinate system
    pub const GEOGRAPHIC: u16 = 2;  // Geographic latitude-longitude system
    pub const GEOCENTRIC: u16 = 3;  // Geocentric (X,Y,Z) coordinate system
}

/// EPSG code constants for common systems
pub mod epsg {
    pub const WGS84_WEB_MERCATOR: u32 = 3857; // Web Mercator
    pub const WGS84: u32 = 4326;              // WGS84 geographic
    pub const WGS84_DATUM: u32 = 6326;        // World Geodetic System 1984 datum
    pub const WGS84_ELLIPSOID: u32 = 7030;    // WGS84 ellipsoid

    /// GeoTIFF sentinel for a CRS assembled from raw parameters
    /// rather than a registry reference
    pub const USER_DEFINED: u32 = 32767;
}
