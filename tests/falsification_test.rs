//! Popperian Falsification Tests - Rasterization Claims
//!
//! Each test is a falsifiable claim about the rasterizers that can be
//! empirically refuted.
//!
//! Run: cargo test --test falsification_test

#![allow(clippy::unwrap_used, clippy::cast_possible_truncation)]

use line_raster::prelude::*;

fn cells(algorithm: Algorithm, x1: f64, y1: f64, x2: f64, y2: f64) -> Vec<(i32, i32)> {
    rasterize(algorithm, x1, y1, x2, y2).map(|s| (s.pixel.x, s.pixel.y)).collect()
}

// ============================================================================
// SECTION 1: BRESENHAM DERIVATION CHAIN (Claims 1-4)
// ============================================================================

/// Claim 1: Every snapshot of the derivation emits the same cells for every
/// integer segment.
/// Test: Exhaustive over a 13x13 grid of start and end points.
#[test]
fn claim_01_bresenham_chain_equivalent() {
    let range = -6..=6;
    for x1 in range.clone() {
        for y1 in range.clone() {
            for x2 in range.clone() {
                for y2 in range.clone() {
                    let (x1, y1, x2, y2) = (f64::from(x1), f64::from(y1), f64::from(x2), f64::from(y2));
                    let reference = cells(Algorithm::Bresenham, x1, y1, x2, y2);
                    for algorithm in Algorithm::BRESENHAM_CHAIN {
                        assert_eq!(
                            cells(algorithm, x1, y1, x2, y2),
                            reference,
                            "Claim 1 FALSIFIED: {algorithm} differs on ({x1}, {y1}) -> ({x2}, {y2})"
                        );
                    }
                }
            }
        }
    }
}

/// Claim 2: The first snapshot never leaves the bounding box of the floored
/// endpoints and stops on the end cell, even when its last step moves the
/// minor axis.
/// Test: Exhaustive from the origin over a 25x25 grid of end points.
#[test]
fn claim_02_first_snapshot_stops_on_end_cell() {
    for x2 in -12..=12 {
        for y2 in -12..=12 {
            let got = cells(Algorithm::Bresenham1, 0.0, 0.0, f64::from(x2), f64::from(y2));
            assert_eq!(got.last(), Some(&(x2, y2)), "Claim 2 FALSIFIED: ({x2}, {y2}) overshoots");
            for (x, y) in got {
                assert!(
                    x >= x2.min(0) && x <= x2.max(0) && y >= y2.min(0) && y <= y2.max(0),
                    "Claim 2 FALSIFIED: ({x}, {y}) outside ({x2}, {y2})"
                );
            }
        }
    }
}

/// Claim 3: Standard tie-breaking for (0,0) -> (5,2) yields exactly six cells.
#[test]
fn claim_03_step_count_standard_example() {
    let got = cells(Algorithm::Bresenham, 0.0, 0.0, 5.0, 2.0);
    assert_eq!(
        got,
        vec![(0, 0), (1, 0), (2, 1), (3, 1), (4, 2), (5, 2)],
        "Claim 3 FALSIFIED"
    );
}

/// Claim 4: Exactly diagonal segments produce the same cells whichever way
/// the major-axis tie is broken.
#[test]
fn claim_04_diagonal_tie_rule_invisible() {
    for (x2, y2) in [(6.0, 6.0), (-6.0, 6.0), (6.0, -6.0), (-6.0, -6.0)] {
        let first = cells(Algorithm::Bresenham1, 0.0, 0.0, x2, y2);
        let last = cells(Algorithm::Bresenham, 0.0, 0.0, x2, y2);
        assert_eq!(first, last, "Claim 4 FALSIFIED at ({x2}, {y2})");
        assert_eq!(first.len(), 7);
    }
}

// ============================================================================
// SECTION 2: ENDPOINTS AND DEGENERATE SEGMENTS (Claims 5-8)
// ============================================================================

/// Claim 5: A segment inside one cell emits exactly that cell, for every
/// strategy.
#[test]
fn claim_05_degenerate_segment_single_pixel() {
    for algorithm in Algorithm::ALL {
        assert_eq!(
            cells(algorithm, 3.0, 3.0, 3.0, 3.0),
            vec![(3, 3)],
            "Claim 5 FALSIFIED: {algorithm}"
        );
    }
}

/// Claim 6: DDA, Bresenham and sub-pixel Bresenham start on the floored
/// start point and finish on the floored end point.
#[test]
fn claim_06_endpoints_included() {
    let segments: [(f64, f64, f64, f64); 4] = [
        (1.3, 2.7, 9.6, 6.2),
        (7.8, 1.1, 2.4, 9.9),
        (-3.5, 4.25, 6.75, -2.5),
        (0.0, 0.0, 2.75, 1.0),
    ];
    for (x1, y1, x2, y2) in segments {
        let start = (x1.floor() as i32, y1.floor() as i32);
        let end = (x2.floor() as i32, y2.floor() as i32);
        for algorithm in [Algorithm::Dda, Algorithm::Bresenham, Algorithm::SubpixelBresenham] {
            let got = cells(algorithm, x1, y1, x2, y2);
            assert_eq!(got.first(), Some(&start), "Claim 6 FALSIFIED: {algorithm} start");
            assert_eq!(got.last(), Some(&end), "Claim 6 FALSIFIED: {algorithm} end");
        }
    }
}

/// Claim 7: The uniform sub-pixel DDA ends exactly on the literal end point.
#[test]
fn claim_07_subpixel_dda_round_trip() {
    let last = rasterize(Algorithm::SubpixelDda, 1.2, 1.2, 8.7, 1.2)
        .filter_map(|step| step.sample)
        .last();
    assert_eq!(last, Some(Point::new(8.7, 1.2)), "Claim 7 FALSIFIED");
}

/// Claim 8: The endpoint-including center sampler always finishes on the
/// floored end point, without a sample.
#[test]
fn claim_08_center_sampling_forces_end() {
    for (x1, y1, x2, y2) in [(0.5, 0.5, 5.5, 2.5), (1.3, 2.7, 9.6, 6.2), (7.8, 1.1, 2.4, 9.9)] {
        let last = rasterize(Algorithm::SubpixelDdaCenterSamplingIncludeEndpoint, x1, y1, x2, y2)
            .last()
            .unwrap();
        assert_eq!(last.pixel, Point::new(x2, y2).pixel(), "Claim 8 FALSIFIED");
        assert_eq!(last.sample, None, "Claim 8 FALSIFIED: end cell traced");
    }
}

// ============================================================================
// SECTION 3: TRACE ORDERING (Claims 9-11)
// ============================================================================

/// Claim 9: Samples advance monotonically along the major axis.
#[test]
fn claim_09_monotonic_sample_order() {
    let segments: [(f64, f64, f64, f64); 3] =
        [(1.3, 2.7, 9.6, 6.2), (7.8, 1.1, 2.4, 9.9), (9.5, 9.5, 0.5, 4.5)];
    for (x1, y1, x2, y2) in segments {
        let (dx, dy) = (x2 - x1, y2 - y1);
        let along = |p: Point| if dx.abs() > dy.abs() { p.x * dx.signum() } else { p.y * dy.signum() };
        for algorithm in Algorithm::ALL {
            let samples: Vec<f64> =
                rasterize(algorithm, x1, y1, x2, y2).filter_map(|s| s.sample).map(along).collect();
            assert!(
                samples.windows(2).all(|w| w[0] <= w[1]),
                "Claim 9 FALSIFIED: {algorithm} on ({x1}, {y1}) -> ({x2}, {y2})"
            );
        }
    }
}

/// Claim 10: Only the sub-pixel Bresenham variant records helper segments,
/// one per major-axis step.
#[test]
fn claim_10_helpers_only_from_subpixel_bresenham() {
    for algorithm in Algorithm::ALL {
        let trace = Trace::capture(algorithm, Segment::from_coords(1.3, 2.7, 9.6, 6.2));
        if algorithm == Algorithm::SubpixelBresenham {
            // Columns 1 through 8 are walked; column 9 is the end cell.
            assert_eq!(trace.helper_lines.len(), 8, "Claim 10 FALSIFIED");
        } else {
            assert!(trace.helper_lines.is_empty(), "Claim 10 FALSIFIED: {algorithm}");
        }
    }
}

/// Claim 11: Forwarding through collaborators preserves emission order.
#[test]
fn claim_11_drive_preserves_order() {
    let direct = rasterize(Algorithm::SubpixelBresenham, 7.8, 1.1, 2.4, 9.9).pixels();
    let mut sink: Vec<Pixel> = Vec::new();
    let mut samples: Vec<Point> = Vec::new();
    let emitted = drive(rasterize(Algorithm::SubpixelBresenham, 7.8, 1.1, 2.4, 9.9), &mut sink, &mut samples);
    assert_eq!(emitted, direct.len());
    assert_eq!(sink, direct, "Claim 11 FALSIFIED");
}

// ============================================================================
// SECTION 4: FLAGGED ANOMALY (Claims 12-13)
// ============================================================================

/// Claim 12: The closing sample of the endpoint-including center sampler may
/// overshoot the segment; it is emitted and flagged, never silently moved.
#[test]
fn claim_12_overshooting_sample_flagged() {
    let segment = Segment::from_coords(5.49375, 5.478125, 1.2, 10.21875);
    let trace = Trace::capture(Algorithm::SubpixelDdaCenterSamplingIncludeEndpoint, segment);

    assert_eq!(trace.anomalies.len(), 1, "Claim 12 FALSIFIED: anomaly not flagged");
    let Anomaly::SampleOutsideSegment { sample, parameter } = trace.anomalies[0];
    assert!(parameter > 1.0, "Claim 12 FALSIFIED: t = {parameter}");
    assert!(trace.samples.contains(&sample));
    assert_eq!(trace.pixels[trace.pixels.len() - 2], Pixel::new(0, 10));
    assert_eq!(trace.last_pixel(), Some(Pixel::new(1, 10)));
}

/// Claim 13: Integer and uniform strategies never flag anomalies.
#[test]
fn claim_13_no_spurious_anomalies() {
    let segment = Segment::from_coords(5.49375, 5.478125, 1.2, 10.21875);
    for algorithm in Algorithm::ALL {
        if algorithm == Algorithm::SubpixelDdaCenterSamplingIncludeEndpoint {
            continue;
        }
        let trace = Trace::capture(algorithm, segment);
        assert!(trace.anomalies.is_empty(), "Claim 13 FALSIFIED: {algorithm}");
    }
}

// ============================================================================
// SECTION 5: GOLDEN SEQUENCES (Claim 14)
// ============================================================================

/// Claim 14: A steep, right-to-left fractional segment rasterizes to the same
/// cells under every strategy.
#[test]
fn claim_14_steep_fractional_segment_agrees() {
    let expected = vec![(7, 1), (6, 2), (6, 3), (5, 4), (5, 5), (4, 6), (3, 7), (3, 8), (2, 9)];
    for algorithm in Algorithm::ALL {
        if algorithm == Algorithm::SubpixelDda {
            continue;
        }
        assert_eq!(cells(algorithm, 7.8, 1.1, 2.4, 9.9), expected, "Claim 14 FALSIFIED: {algorithm}");
    }
    assert_eq!(
        cells(Algorithm::SubpixelDda, 7.8, 1.1, 2.4, 9.9),
        vec![(7, 1), (7, 2), (6, 3), (5, 4), (5, 5), (4, 6), (3, 7), (3, 8), (2, 9)]
    );
}
