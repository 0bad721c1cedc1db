//! End-to-end properties of generated cities
//!
//! Covers zone placement for each layout model, weight bounds, nearest-station
//! distances and raster export behaviour on full-size (100×100) grids.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use city_layout_core::{
    BruteForceQuery, BucketIndex, Cell, City, CityConfig, CityError, CityGrid, FacilitySet,
    LayoutType, NearestFacility, Point2, ZoneType, UNREACHED_DISTANCE,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

const LAYOUTS: [LayoutType; 3] = [
    LayoutType::ConcentricRing,
    LayoutType::Sector,
    LayoutType::MultipleNuclei,
];

fn city(layout: LayoutType, seed: u64) -> City {
    City::new(&CityConfig::new(layout).with_seed(seed)).unwrap()
}

#[test]
fn test_weights_within_zone_bounds_for_every_layout() {
    for layout in LAYOUTS {
        let city = city(layout, 10);
        for cell in city.grid().cells() {
            let (lo, hi) = cell.zone().weight_bounds();
            assert!(
                (lo..=hi).contains(&cell.weight()),
                "{layout:?} cell {:?} ({:?}) weight {} outside [{lo}, {hi}]",
                cell.position(),
                cell.zone(),
                cell.weight()
            );
        }
    }
}

#[test]
fn test_industrial_weights_in_upper_half() {
    let city = city(LayoutType::ConcentricRing, 3);
    let industrial: Vec<f64> = city
        .grid()
        .cells()
        .iter()
        .filter(|c| c.zone() == ZoneType::Industrial)
        .map(Cell::weight)
        .collect();

    assert!(!industrial.is_empty());
    assert!(industrial.iter().all(|w| (0.5..=1.0).contains(w)));
}

#[test]
fn test_concentric_ring_center_and_corner() {
    let city = city(LayoutType::ConcentricRing, 1);
    let grid = city.grid();

    assert_eq!(grid.cell_at(50, 50).unwrap().zone(), ZoneType::Commercial);
    assert_eq!(grid.cell_at(0, 0).unwrap().zone(), ZoneType::Industrial);
}

#[test]
fn test_sector_east_and_north() {
    let city = city(LayoutType::Sector, 1);
    let grid = city.grid();

    // theta ~0: residential above the midline, industrial on and below it
    assert_eq!(grid.cell_at(95, 48).unwrap().zone(), ZoneType::Residential);
    assert_eq!(grid.cell_at(95, 52).unwrap().zone(), ZoneType::Industrial);
    // theta ~90 is commercial on both sides
    assert_eq!(grid.cell_at(50, 95).unwrap().zone(), ZoneType::Commercial);
    assert_eq!(grid.cell_at(50, 2).unwrap().zone(), ZoneType::Commercial);
}

#[test]
fn test_sector_has_no_generic_cells() {
    // |x| <= |v| holds exactly in floating point, so every bearing is defined
    for seed in [1, 2] {
        let city = city(LayoutType::Sector, seed);
        assert_eq!(city.grid().zone_count(ZoneType::Generic), 0);
    }
    for size in [1, 7, 40, 101] {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let grid = CityGrid::generate(LayoutType::Sector, size, &mut rng).unwrap();
        assert_eq!(grid.zone_count(ZoneType::Generic), 0, "size {size}");
    }
}

#[test]
fn test_multiple_nuclei_center_is_commercial() {
    let city = city(LayoutType::MultipleNuclei, 1);
    assert_eq!(
        city.grid().cell_at(50, 50).unwrap().zone(),
        ZoneType::Commercial
    );
}

#[test]
fn test_single_center_station_distances() {
    let city = city(LayoutType::ConcentricRing, 1);
    let grid = city.grid();

    assert_abs_diff_eq!(grid.cell_at(50, 50).unwrap().distance(), 0.0);
    assert_relative_eq!(
        grid.cell_at(0, 0).unwrap().distance(),
        50.0 * std::f64::consts::SQRT_2,
        max_relative = 1e-12
    );
}

#[test]
fn test_two_stations_record_true_minimum() {
    let config = CityConfig::new(LayoutType::Sector)
        .with_seed(8)
        .with_facilities(vec![[20.0, 30.0], [75.0, 60.0]]);
    let city = City::new(&config).unwrap();
    let a = Point2::new(20.0, 30.0);
    let b = Point2::new(75.0, 60.0);

    for cell in city.grid().cells() {
        let da = cell.distance_to(&a);
        let db = cell.distance_to(&b);
        assert_abs_diff_eq!(cell.distance(), da.min(db), epsilon = 1e-12);
        assert!(cell.distance() <= da && cell.distance() <= db);

        // Ties go to the first station
        assert_eq!(cell.nearest_facility(), Some(usize::from(db < da)));
    }
}

#[test]
fn test_no_cell_left_unreached() {
    for layout in LAYOUTS {
        let city = city(layout, 2);
        assert!(city
            .grid()
            .cells()
            .iter()
            .all(|c| c.is_reached() && c.distance() < UNREACHED_DISTANCE));
    }
}

#[test]
fn test_many_stations_index_matches_scan() {
    let coords: Vec<[f64; 2]> = (0..64_u32)
        .map(|k| [f64::from(k % 8) * 12.5 + 3.0, f64::from(k / 8) * 12.5 + 3.0])
        .collect();
    let set = FacilitySet::from_coords(&coords).unwrap();
    let brute = BruteForceQuery::new(&set);
    let index = BucketIndex::new(&set);

    let city = city(LayoutType::ConcentricRing, 6);
    for cell in city.grid().cells() {
        let p = cell.point();
        assert_eq!(brute.nearest(&p), index.nearest(&p));
    }
}

#[test]
fn test_export_idempotent() {
    for layout in LAYOUTS {
        let city = city(layout, 12);
        assert_eq!(city.rasters(), city.rasters());
        assert_eq!(city.weights(), city.weights());
        assert_eq!(city.distances(), city.distances());
        assert_eq!(city.zones(), city.zones());
    }
}

#[test]
fn test_same_seed_same_city() {
    for layout in LAYOUTS {
        assert_eq!(city(layout, 99).rasters(), city(layout, 99).rasters());
    }
}

#[test]
fn test_injected_rng_is_used() {
    let config = CityConfig::new(LayoutType::MultipleNuclei).with_size(30);
    let a = City::with_rng(&config, &mut ChaCha8Rng::seed_from_u64(5)).unwrap();
    let b = City::with_rng(&config, &mut ChaCha8Rng::seed_from_u64(5)).unwrap();
    let c = City::with_rng(&config, &mut ChaCha8Rng::seed_from_u64(6)).unwrap();

    assert_eq!(a.weights(), b.weights());
    assert_ne!(a.weights(), c.weights());
    // Zones do not depend on the RNG
    assert_eq!(a.zones(), c.zones());
}

#[test]
fn test_unknown_layout_code_builds_ring_city() {
    let fallback = City::new(&CityConfig::new(LayoutType::from_code(9)).with_seed(1)).unwrap();
    let ring = city(LayoutType::ConcentricRing, 1);
    assert_eq!(fallback.zones(), ring.zones());
}

#[test]
fn test_invalid_sizes_rejected() {
    for size in [0, -1, i64::MIN] {
        let err = City::new(&CityConfig::default().with_size(size)).unwrap_err();
        assert_eq!(err, CityError::InvalidCitySize(size));
    }

    let mut rng = ChaCha8Rng::seed_from_u64(0);
    assert!(CityGrid::generate(LayoutType::Sector, 0, &mut rng).is_err());
}

#[test]
fn test_empty_station_list_rejected() {
    let config = CityConfig::default().with_facilities(Vec::new());
    assert_eq!(City::new(&config).unwrap_err(), CityError::EmptyFacilitySet);
}
