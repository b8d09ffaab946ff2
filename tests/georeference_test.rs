//! Integration tests for georeferencing resolution

use approx::assert_relative_eq;

use georaster::geo::constants::geo_keys;
use georaster::{
    describe_projection, DecodedRaster, ExtractOptions, GeoKeyEntry, GeoKeyValue, NoData,
    ParseOptions, Projection, RasterError, RasterModel, SampleBuffer, Window,
};

fn short_keys(entries: &[(u16, u16)]) -> Vec<GeoKeyEntry> {
    let _ = env_logger::builder().is_test(true).try_init();

    entries
        .iter()
        .map(|&(id, v)| GeoKeyEntry::new(id, GeoKeyValue::Short(v)))
        .collect()
}

#[test]
fn utm_raster_resolves_projection_and_bounds() {
    let mut decoded = DecodedRaster::new(vec![SampleBuffer::U16(vec![0; 12])], 4, 3);
    decoded.pixel_scale = Some(vec![30.0, 30.0, 0.0]);
    decoded.tie_point = Some(vec![0.0, 0.0, 0.0, 189600.0, 4904100.0, 0.0]);
    decoded.geo_keys = Some(short_keys(&[
        (geo_keys::MODEL_TYPE, 1),
        (geo_keys::RASTER_TYPE, 1),
        (geo_keys::PROJECTED_CS_TYPE, 32616),
    ]));

    let model = RasterModel::from_decoded(decoded, &ParseOptions::default()).unwrap();

    assert_eq!(model.projection(), Projection::Epsg(32616));
    assert!(!model.is_geographic());
    assert_eq!(model.pixel_width(), Some(30.0));
    assert_eq!(model.pixel_height(), Some(30.0));

    let bounds = model.bounds().unwrap();
    assert_eq!(bounds.min_x, 189600.0);
    assert_eq!(bounds.max_x, 189600.0 + 4.0 * 30.0);
    assert_eq!(bounds.max_y, 4904100.0);
    assert_eq!(bounds.min_y, 4904100.0 - 3.0 * 30.0);

    assert_eq!(describe_projection(32616), "WGS 84 / UTM zone 16N");
}

#[test]
fn sub_degree_pixel_scale_survives_to_the_last_digit() {
    let mut decoded = DecodedRaster::new(vec![SampleBuffer::U8(vec![0; 6])], 3, 2);
    decoded.pixel_scale = Some(vec![0.0002695191463334988, 0.0002695191463334987, 0.0]);
    decoded.tie_point = Some(vec![0.0, 0.0, 0.0, -125.57865783690451, 42.0, 0.0]);
    decoded.geo_keys = Some(short_keys(&[
        (geo_keys::MODEL_TYPE, 2),
        (geo_keys::GEOGRAPHIC_TYPE, 4326),
    ]));

    let model = RasterModel::from_decoded(decoded, &ParseOptions::default()).unwrap();

    assert_eq!(model.projection(), Projection::Epsg(4326));
    assert!(model.is_geographic());
    assert_relative_eq!(model.pixel_width().unwrap(), 0.0002695191463334988, max_relative = 1e-15);
    assert_relative_eq!(model.pixel_height().unwrap(), 0.0002695191463334987, max_relative = 1e-15);
    assert_relative_eq!(model.bounds().unwrap().min_x, -125.57865783690451, max_relative = 1e-15);
}

#[test]
fn fully_user_defined_crs_resolves_to_the_sentinel_code() {
    let mut decoded = DecodedRaster::new(vec![SampleBuffer::U8(vec![0; 4])], 2, 2);
    decoded.geo_keys = Some(short_keys(&[
        (geo_keys::MODEL_TYPE, 2),
        (geo_keys::GEOGRAPHIC_TYPE, 32767),
        (geo_keys::GEODETIC_DATUM, 32767),
        (geo_keys::ELLIPSOID, 7004),
    ]));

    let model = RasterModel::from_decoded(decoded, &ParseOptions::default()).unwrap();
    assert_eq!(model.projection(), Projection::Epsg(32767));
    assert_eq!(model.projection().code(), Some(32767));
    assert!(model.is_geographic());
}

#[test]
fn ungeoreferenced_raster_still_serves_pixel_values() {
    let decoded = DecodedRaster::new(vec![SampleBuffer::U8(vec![1, 2, 3, 4])], 2, 2);
    let model = RasterModel::from_decoded(decoded, &ParseOptions::default()).unwrap();

    // No geo keys and no affine tags at all
    assert_eq!(model.projection(), Projection::Missing);
    assert!(model.affine().is_none());
    assert!(model.bounds().is_none());
    assert_eq!(model.pixel_width(), None);

    // Raw pixel access keeps working
    let values = model.get_values(&ExtractOptions::new()).unwrap();
    assert_eq!(values.shape(), (1, 2, 2));

    // But a geographic window is a caller error without an affine
    let options = ExtractOptions {
        window: Some(Window::bounds(0.0, 0.0, 1.0, 1.0)),
        ..ExtractOptions::new()
    };
    assert!(matches!(
        model.get_values(&options),
        Err(RasterError::MissingGeoreference)
    ));
}

#[test]
fn construction_rejects_inconsistent_bands() {
    let decoded = DecodedRaster::new(vec![SampleBuffer::U8(vec![0; 5])], 2, 2);
    assert!(matches!(
        RasterModel::from_decoded(decoded, &ParseOptions::default()),
        Err(RasterError::BandSizeMismatch { band: 0, expected: 4, actual: 5 })
    ));

    let decoded = DecodedRaster::new(Vec::new(), 2, 2);
    assert!(matches!(
        RasterModel::from_decoded(decoded, &ParseOptions::default()),
        Err(RasterError::NoBands)
    ));

    let decoded = DecodedRaster::new(vec![SampleBuffer::U8(Vec::new())], 0, 3);
    assert!(matches!(
        RasterModel::from_decoded(decoded, &ParseOptions::default()),
        Err(RasterError::InvalidDimensions { .. })
    ));
}

#[test]
fn construction_time_stats_exclude_nodata() {
    let mut decoded = DecodedRaster::new(vec![SampleBuffer::I16(vec![0, 0, 5, 10])], 2, 2);
    decoded.no_data = Some(NoData::Text("0".to_string()));

    let options = ParseOptions { calc_stats: true };
    let model = RasterModel::from_decoded(decoded, &options).unwrap();

    assert_eq!(model.no_data_value(), Some(0.0));
    let stats = model.band_stats().unwrap();
    assert_eq!(stats.len(), 1);
    let band = stats[0].as_ref().unwrap();
    assert_eq!(band.min, 5.0);
    assert_eq!(band.max, 10.0);
    assert_eq!(band.sum, 15.0);
    assert_eq!(band.mean, 7.5);
}

#[test]
fn unparseable_nodata_text_degrades_to_none() {
    let mut decoded = DecodedRaster::new(vec![SampleBuffer::U8(vec![0; 4])], 2, 2);
    decoded.no_data = Some(NoData::Text("not-a-number".to_string()));

    let model = RasterModel::from_decoded(decoded, &ParseOptions::default()).unwrap();
    assert_eq!(model.no_data_value(), None);
}
