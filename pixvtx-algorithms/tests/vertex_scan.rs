//! End-to-end tests for the extraction -> scan -> producer pipeline.

use approx::assert_relative_eq;
use pixvtx_algorithms::{
    ClusterVertexConfig, ClusterVertexProducer, Event, EventSetup, HitExtractor, ProducerModule,
    ScanConfig, ZScanner,
};
use pixvtx_core::geometry::{BarrelSensor, DetId, DetectorRegion, LocalPoint, MapGeometry};
use pixvtx_core::hit::{Cluster, PixelCoord, PixelRecHit};

/// Two barrel layers at radii 4 and 8 cm, sensors centered at z = 0.
fn two_layer_geometry() -> MapGeometry {
    let mut geometry = MapGeometry::new();
    geometry.insert(DetId(1), BarrelSensor::new(4.0, 0.0, 416, 160));
    geometry.insert(DetId(2), BarrelSensor::new(8.0, 0.0, 416, 160));
    geometry
}

/// Interior cluster with the given transverse size.
fn cluster_of_width(width: u16) -> Cluster {
    (0..width).map(|dy| PixelCoord::new(100, 40 + dy)).collect()
}

fn barrel_hit(det_id: DetId, z_hit: f64, width: u16) -> PixelRecHit {
    PixelRecHit::new(
        det_id,
        DetectorRegion::Barrel,
        LocalPoint::new(z_hit, 0.0, 0.0),
        cluster_of_width(width),
    )
}

/// Hits whose cluster widths match the width model exactly for a vertex
/// at `true_z`: on a layer of radius r, a hit at distance dz predicts
/// width 2 * dz / r + 0.5, so dz = r/4 and 3r/4 give widths 1 and 2
/// with zero residual.
fn hits_for_vertex(true_z: f64) -> Vec<PixelRecHit> {
    let mut hits = Vec::new();
    for (det_id, radius) in [(DetId(1), 4.0), (DetId(2), 8.0)] {
        for scale in [0.25, 0.75] {
            let dz: f64 = radius * scale;
            let width = (2.0 * dz / radius + 0.5).round() as u16;
            hits.push(barrel_hit(det_id, true_z + dz, width));
            hits.push(barrel_hit(det_id, true_z - dz, width));
        }
    }
    hits
}

#[test]
fn scan_picks_lowest_residual_among_tied_counts() {
    // A single hit at z = 0, r = 10, w = 0 is contained at every
    // candidate in [-1, 1]; residuals are 0.7, 0.5, 0.7, so z0 = 0
    // replaces z0 = -1 and z0 = 1 cannot replace it back.
    let mut geometry = MapGeometry::new();
    geometry.insert(DetId(1), BarrelSensor::new(10.0, 0.0, 416, 160));
    let rec_hits = vec![barrel_hit(DetId(1), 0.0, 0)];

    let hits = HitExtractor::new().extract(&rec_hits, &geometry);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].w, 0);

    let scanner = ZScanner::new(ScanConfig::new(-1.0, 1.0, 1.0).unwrap());
    let result = scanner.scan(&hits);

    assert_eq!(result.best_count, 1);
    assert_relative_eq!(result.best_z, 0.0);
    assert_relative_eq!(result.best_score, 0.5);
}

#[test]
fn producer_recovers_synthetic_vertex() {
    let true_z = 2.3;
    let geometry = two_layer_geometry();
    let setup = EventSetup::new(&geometry);

    let mut event = Event::new();
    event.put_rec_hits("siPixelRecHits", hits_for_vertex(true_z));

    let producer = ClusterVertexProducer::new(ClusterVertexConfig::default()).unwrap();
    producer.produce(&mut event, &setup);

    assert_eq!(event.vertices().len(), 1);
    let estimate = event.vertices()[0].z();
    assert!(
        (estimate - true_z).abs() < 0.11,
        "estimated {estimate}, expected {true_z}"
    );
}

#[test]
fn estimate_is_independent_of_hit_order() {
    let geometry = two_layer_geometry();
    let mut rec_hits = hits_for_vertex(-4.7);

    let extractor = HitExtractor::new();
    let scanner = ZScanner::new(ScanConfig::new(-15.9, 15.95, 0.1).unwrap());

    let forward = scanner.scan(&extractor.extract(&rec_hits, &geometry));
    rec_hits.reverse();
    let backward = scanner.scan(&extractor.extract(&rec_hits, &geometry));

    assert_eq!(forward.best_count, backward.best_count);
    assert_relative_eq!(forward.best_z, backward.best_z);
}

#[test]
fn unmatchable_widths_give_sentinel_vertex() {
    // Widths no candidate can predict: the producer still emits one
    // vertex, at the z = 0.0 sentinel.
    let geometry = two_layer_geometry();
    let setup = EventSetup::new(&geometry);

    let mut event = Event::new();
    event.put_rec_hits(
        "siPixelRecHits",
        vec![
            barrel_hit(DetId(1), 1.0, 100),
            barrel_hit(DetId(2), -3.0, 100),
        ],
    );

    let producer = ClusterVertexProducer::new(ClusterVertexConfig::default()).unwrap();
    producer.produce(&mut event, &setup);

    assert_eq!(event.vertices().len(), 1);
    assert_relative_eq!(event.vertices()[0].z(), 0.0);
}

#[test]
fn absent_collection_gives_empty_output() {
    let geometry = two_layer_geometry();
    let setup = EventSetup::new(&geometry);

    let mut event = Event::new();
    event.put_rec_hits("otherRecHits", hits_for_vertex(1.0));

    let producer = ClusterVertexProducer::new(ClusterVertexConfig::default()).unwrap();
    producer.produce(&mut event, &setup);

    assert!(event.vertices().is_empty());
}
