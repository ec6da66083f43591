//! Connector synthesis: curved ribbons joining adjacent blocks' shadows.
//!
//! For each adjacent block pair on different rows, a closed outline is
//! built that leaves the current block's shadow through its row-facing
//! edge, runs through the inter-row gap as a band `2r` wide centred on
//! the shared time boundary, and enters the next block's shadow. The two
//! corners where the band meets a shadow edge are rounded with concave
//! quarter arcs of radius `2r`, so the ribbon flares smoothly into both
//! shadows instead of meeting them at a mitre.
//!
//! Moving down a row and moving up a row produce exact vertical mirror
//! images of one another: every y offset flips sign, and the two arcs
//! reverse their sweep.
//!
//! When a block is narrower than the rounding curve needs, the flare
//! would bleed past the block's own shadow. Such connectors carry a
//! rectangular clip that trims the flare on the short side(s).
//!
//! Connectors are never colored here; renderers fill them with the
//! shared gradient so color follows y position.

use std::f64::consts::{FRAC_PI_2, PI};

use serde::{Deserialize, Serialize};

use crate::layout::Layout;
use crate::path::{PathData, Sweep};
use crate::types::{Block, Point, Rect};

/// A clip region referenced by a connector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipRect {
    /// Reference identifier (`clip-{pair index}`).
    pub id: String,
    /// Region the connector is clipped to.
    pub rect: Rect,
}

/// A synthesized connector between blocks `index` and `index + 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectorSpec {
    /// Index of the current (left) block of the pair.
    pub index: usize,
    /// The next block sits on a lower row than the current one.
    pub is_down: bool,
    /// The current block starts after the next one. Never true for
    /// time-ordered blocks; only shifts the clip anchor.
    pub is_right: bool,
    /// The current block is too narrow to host the rounding curve.
    pub is_curr_width_short: bool,
    /// The next block is too narrow to host the rounding curve.
    pub is_next_width_short: bool,
    /// Closed ribbon outline.
    pub path: PathData,
    /// Clip applied when either block is short.
    pub clip: Option<ClipRect>,
}

/// Geometry of one adjacent pair, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PairGeometry {
    /// Right boundary of the current block (`xPos(curr.end)`).
    x1: f64,
    /// Top of the current block's row.
    y1: f64,
    /// Left boundary of the next block (`xPos(next.start)`).
    x2: f64,
    /// Top of the next block's row.
    y2: f64,
    /// Block height.
    h: f64,
    /// Shadow inset `r`.
    r: f64,
    /// Rounding radius (`2r`).
    s: f64,
}

/// Synthesize the connector for one adjacent pair.
///
/// Returns `None` when both blocks sit on the same row: there is no
/// stage transition to bridge.
#[must_use]
pub fn synthesize(
    layout: &Layout,
    index: usize,
    curr: &Block,
    next: &Block,
) -> Option<ConnectorSpec> {
    let curr_row = layout.row_index(curr.stage);
    let next_row = layout.row_index(next.stage);
    if curr_row == next_row {
        return None;
    }

    let geometry = PairGeometry {
        x1: layout.x_pos(curr.end),
        y1: layout.y_pos(curr.stage),
        x2: layout.x_pos(next.start),
        y2: layout.y_pos(next.stage),
        h: layout.block_height(),
        r: layout.shadow_inset(),
        s: layout.shadow_radius(),
    };

    // Row pitch is positive, so a larger row index is a larger y.
    let is_down = next_row > curr_row;
    let is_right = curr.start > next.start;
    let is_curr_width_short = is_short(layout.block_width(curr.start, curr.end), &geometry);
    let is_next_width_short = is_short(layout.block_width(next.start, next.end), &geometry);

    let clip = (is_curr_width_short || is_next_width_short).then(|| {
        let anchor = layout.x_pos(if is_right { curr.start } else { curr.end });
        ClipRect {
            id: format!("clip-{index}"),
            rect: clip_rect(
                &geometry,
                anchor,
                is_down,
                is_curr_width_short,
                is_next_width_short,
            ),
        }
    });

    Some(ConnectorSpec {
        index,
        is_down,
        is_right,
        is_curr_width_short,
        is_next_width_short,
        path: ribbon_path(&geometry, is_down),
        clip,
    })
}

/// Synthesize connectors for every adjacent pair, ordered by pair index.
///
/// Pairs are visited right to left; each connector depends only on its
/// own pair, so the visiting order does not affect the result.
#[must_use]
pub fn synthesize_all(layout: &Layout, blocks: &[Block]) -> Vec<ConnectorSpec> {
    let mut connectors: Vec<ConnectorSpec> = blocks
        .windows(2)
        .enumerate()
        .rev()
        .filter_map(|(i, pair)| synthesize(layout, i, &pair[0], &pair[1]))
        .collect();
    connectors.reverse();

    tracing::debug!(
        pairs = blocks.len().saturating_sub(1),
        connectors = connectors.len(),
        clipped = connectors.iter().filter(|c| c.clip.is_some()).count(),
        "synthesized connectors"
    );

    connectors
}

/// A block is short when half its width plus the inset cannot contain
/// the rounding radius.
fn is_short(width: f64, geometry: &PairGeometry) -> bool {
    width / 2.0 + geometry.r < geometry.s
}

/// Build the closed ribbon outline.
///
/// `d` is `+1` going down and `-1` going up; `edge1` is the current
/// block's edge facing the next row and `edge2` the next block's edge
/// facing back. With `d = +1` the outline is:
///
/// ```text
///   (x1-r, edge1-r) start, inside the current block
///   (x1-r, edge1+r) down to the current shadow's outer edge
///   (x1-r-s, edge1+r) out along that edge
///   quarter arc to (x1-r, edge1+r+s)
///   (x1-r, edge2+r) down through the gap into the next block
///   (x2+r, edge2+r) across the band
///   (x2+r, edge2-r) back up to the next shadow's outer edge
///   (x2+r+s, edge2-r) out along that edge
///   quarter arc to (x2+r, edge2-r-s)
///   (x2+r, edge1-r) up the far side of the band
///   (x1-r, edge1-r) and back to the start
/// ```
fn ribbon_path(g: &PairGeometry, is_down: bool) -> PathData {
    let (d, edge1, edge2, sweep): (f64, f64, f64, Sweep) = if is_down {
        (1.0, g.y1 + g.h, g.y2, Sweep::Clockwise)
    } else {
        (-1.0, g.y1, g.y2 + g.h, Sweep::CounterClockwise)
    };
    let left = g.x1 - g.r;
    let right = g.x2 + g.r;
    let reach = g.r + g.s;
    let start = Point::new(left, d.mul_add(-g.r, edge1));

    PathData::new()
        .move_to(start)
        .line_to(Point::new(left, d.mul_add(g.r, edge1)))
        .line_to(Point::new(left - g.s, d.mul_add(g.r, edge1)))
        .arc(
            Point::new(left - g.s, d.mul_add(reach, edge1)),
            g.s,
            -d * FRAC_PI_2,
            0.0,
            sweep,
        )
        .line_to(Point::new(left, d.mul_add(g.r, edge2)))
        .line_to(Point::new(right, d.mul_add(g.r, edge2)))
        .line_to(Point::new(right, d.mul_add(-g.r, edge2)))
        .line_to(Point::new(right + g.s, d.mul_add(-g.r, edge2)))
        .arc(
            Point::new(right + g.s, d.mul_add(-reach, edge2)),
            g.s,
            d * FRAC_PI_2,
            PI,
            sweep,
        )
        .line_to(Point::new(right, d.mul_add(-g.r, edge1)))
        .line_to(start)
        .close()
}

/// Clip rectangle for a connector touching a short block.
///
/// Horizontally it covers the band (`2r`) around `anchor`, extended by
/// `s` on each side whose block is wide enough to host its flare.
/// Vertically it spans from the upper row's inset bottom to the lower
/// row's inset top, so the flares inside the gap are kept.
fn clip_rect(
    g: &PairGeometry,
    anchor: f64,
    is_down: bool,
    is_curr_width_short: bool,
    is_next_width_short: bool,
) -> Rect {
    let curr_extra = if is_curr_width_short { 0.0 } else { g.s };
    let next_extra = if is_next_width_short { 0.0 } else { g.s };
    let (upper, lower) = if is_down { (g.y1, g.y2) } else { (g.y2, g.y1) };
    let top = upper + g.h - g.r;
    let bottom = lower + g.r;

    Rect::new(
        anchor - g.r - curr_extra,
        top.min(bottom),
        curr_extra + 2.0f64.mul_add(g.r, next_extra),
        (bottom - top).abs(),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::compress::compress_stages;
    use crate::config::ChartConfig;
    use crate::parse::parse_samples;
    use crate::path::PathSegment;
    use crate::types::StageCode;

    fn layout_with(config: &ChartConfig) -> Layout {
        Layout::new(config).unwrap()
    }

    fn default_layout() -> Layout {
        layout_with(&ChartConfig::default())
    }

    fn assert_point(actual: Point, expected: Point) {
        assert!(
            actual.distance_squared(expected) < 1e-18,
            "expected {expected:?}, got {actual:?}"
        );
    }

    /// Approximate the first subpath as a polygon, `steps` chords per arc.
    /// The closing duplicate of the start point is dropped.
    #[allow(clippy::cast_precision_loss)]
    fn flatten(path: &PathData, steps: usize) -> Vec<Point> {
        let mut points: Vec<Point> = Vec::new();
        for (i, segment) in path.segments().iter().enumerate() {
            match *segment {
                PathSegment::MoveTo(p) if i == 0 => points.push(p),
                PathSegment::MoveTo(_) | PathSegment::Close => break,
                PathSegment::LineTo(p) => points.push(p),
                PathSegment::Arc(arc) => {
                    let delta = arc.signed_sweep_angle();
                    for step in 1..=steps {
                        let t = step as f64 / steps as f64;
                        points.push(arc.point_at(delta.mul_add(t, arc.start_angle)));
                    }
                }
            }
        }
        if points.len() > 1 && points[0].distance_squared(points[points.len() - 1]) < 1e-18 {
            points.pop();
        }
        points
    }

    #[test]
    fn flatten_samples_arcs_and_drops_closing_duplicate() {
        let path = PathData::new()
            .move_to(Point::new(0.0, 0.0))
            .line_to(Point::new(4.0, 0.0))
            .arc(Point::new(4.0, 4.0), 4.0, -FRAC_PI_2, 0.0, Sweep::Clockwise)
            .line_to(Point::new(0.0, 0.0))
            .close();
        let points = flatten(&path, 4);
        // Start, line end, four arc samples; the explicit return is dropped.
        assert_eq!(points.len(), 6);
        assert_point(points[5], Point::new(8.0, 4.0));
        for p in &points[2..6] {
            let r = p.distance_squared(Point::new(4.0, 4.0)).sqrt();
            assert!((r - 4.0).abs() < 1e-9);
        }
    }

    /// Explicit vertices of the outline (move/line targets and arc ends).
    fn vertices(path: &PathData) -> Vec<Point> {
        path.segments()
            .iter()
            .filter_map(|s| match *s {
                PathSegment::MoveTo(p) | PathSegment::LineTo(p) => Some(p),
                PathSegment::Arc(arc) => Some(arc.end_point()),
                PathSegment::Close => None,
            })
            .collect()
    }

    fn orientation(a: Point, b: Point, c: Point) -> f64 {
        (b.x - a.x).mul_add(c.y - a.y, -((b.y - a.y) * (c.x - a.x)))
    }

    /// Proper crossing of two segments (touching endpoints do not count).
    fn segments_cross(a: Point, b: Point, c: Point, d: Point) -> bool {
        let eps = 1e-9;
        let d1 = orientation(c, d, a);
        let d2 = orientation(c, d, b);
        let d3 = orientation(a, b, c);
        let d4 = orientation(a, b, d);
        ((d1 > eps && d2 < -eps) || (d1 < -eps && d2 > eps))
            && ((d3 > eps && d4 < -eps) || (d3 < -eps && d4 > eps))
    }

    fn assert_simple_polygon(points: &[Point]) {
        let n = points.len();
        for i in 0..n {
            for j in (i + 1)..n {
                // Skip neighbours, which share an endpoint.
                if j == i + 1 || (i == 0 && j == n - 1) {
                    continue;
                }
                let (a, b) = (points[i], points[(i + 1) % n]);
                let (c, d) = (points[j], points[(j + 1) % n]);
                assert!(
                    !segments_cross(a, b, c, d),
                    "edges {i} and {j} cross: {a:?}-{b:?} x {c:?}-{d:?}"
                );
            }
        }
    }

    fn signed_area(points: &[Point]) -> f64 {
        let n = points.len();
        (0..n)
            .map(|i| {
                let (a, b) = (points[i], points[(i + 1) % n]);
                a.x.mul_add(b.y, -(b.x * a.y))
            })
            .sum::<f64>()
            / 2.0
    }

    #[test]
    fn awake_to_core_goes_down() {
        let layout = default_layout();
        let blocks = compress_stages(&parse_samples("441").unwrap()).unwrap();
        let connectors = synthesize_all(&layout, &blocks);
        assert_eq!(connectors.len(), 1);
        let c = &connectors[0];
        assert_eq!(c.index, 0);
        assert_eq!(
            c.is_down,
            layout.y_pos(StageCode::Core) > layout.y_pos(StageCode::Awake)
        );
        assert!(c.is_down);
        assert!(!c.is_right);
    }

    #[test]
    fn downward_outline_matches_expected_vertices() {
        let layout = default_layout();
        let curr = Block::new(0, 2, StageCode::Awake);
        let next = Block::new(2, 3, StageCode::Core);
        let c = synthesize(&layout, 0, &curr, &next).unwrap();

        // x1 = x2 = 83, y1 = 30, y2 = 170, h = 40, r = 2, s = 4.
        let expected = [
            Point::new(81.0, 68.0),
            Point::new(81.0, 72.0),
            Point::new(77.0, 72.0),
            Point::new(81.0, 76.0),
            Point::new(81.0, 172.0),
            Point::new(85.0, 172.0),
            Point::new(85.0, 168.0),
            Point::new(89.0, 168.0),
            Point::new(85.0, 164.0),
            Point::new(85.0, 68.0),
            Point::new(81.0, 68.0),
        ];
        let actual = vertices(&c.path);
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(&expected) {
            assert_point(*a, *e);
        }
    }

    #[test]
    fn upward_outline_matches_expected_vertices() {
        let layout = default_layout();
        let curr = Block::new(0, 2, StageCode::Core);
        let next = Block::new(2, 3, StageCode::Awake);
        let c = synthesize(&layout, 0, &curr, &next).unwrap();
        assert!(!c.is_down);

        // x1 = x2 = 83, y1 = 170, y2 = 30, h = 40, r = 2, s = 4.
        let expected = [
            Point::new(81.0, 172.0),
            Point::new(81.0, 168.0),
            Point::new(77.0, 168.0),
            Point::new(81.0, 164.0),
            Point::new(81.0, 68.0),
            Point::new(85.0, 68.0),
            Point::new(85.0, 72.0),
            Point::new(89.0, 72.0),
            Point::new(85.0, 76.0),
            Point::new(85.0, 172.0),
            Point::new(81.0, 172.0),
        ];
        let actual = vertices(&c.path);
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(&expected) {
            assert_point(*a, *e);
        }
    }

    #[test]
    fn downward_arcs_sweep_clockwise() {
        let layout = default_layout();
        let curr = Block::new(0, 5, StageCode::Rem);
        let next = Block::new(5, 9, StageCode::Deep);
        let c = synthesize(&layout, 0, &curr, &next).unwrap();
        let arcs: Vec<_> = c
            .path
            .segments()
            .iter()
            .filter_map(|s| match s {
                PathSegment::Arc(arc) => Some(*arc),
                _ => None,
            })
            .collect();
        assert_eq!(arcs.len(), 2);
        for arc in arcs {
            assert_eq!(arc.sweep, Sweep::Clockwise);
            assert!((arc.radius - 4.0).abs() < f64::EPSILON);
            assert!((arc.sweep_angle() - FRAC_PI_2).abs() < 1e-12);
        }
    }

    #[test]
    fn upward_arcs_sweep_counter_clockwise() {
        let layout = default_layout();
        let curr = Block::new(0, 5, StageCode::Deep);
        let next = Block::new(5, 9, StageCode::Awake);
        let c = synthesize(&layout, 0, &curr, &next).unwrap();
        assert!(!c.is_down);
        for segment in c.path.segments() {
            if let PathSegment::Arc(arc) = segment {
                assert_eq!(arc.sweep, Sweep::CounterClockwise);
                assert!((arc.sweep_angle() - FRAC_PI_2).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn no_line_is_inserted_before_arcs() {
        // Each arc starts exactly where the preceding line ends.
        let layout = default_layout();
        for (a, b) in [
            (StageCode::Awake, StageCode::Insomnia),
            (StageCode::Insomnia, StageCode::Awake),
        ] {
            let c = synthesize(&layout, 0, &Block::new(0, 3, a), &Block::new(3, 6, b)).unwrap();
            assert_eq!(c.path.segments().len(), 12);
        }
    }

    #[test]
    fn up_and_down_are_vertical_mirrors() {
        let g_down = PairGeometry {
            x1: 120.0,
            y1: 30.0,
            x2: 120.0,
            y2: 170.0,
            h: 40.0,
            r: 2.0,
            s: 4.0,
        };
        // Reflect about y = 100: a row top t becomes 200 - (t + h).
        let g_up = PairGeometry {
            y1: 200.0 - (g_down.y1 + g_down.h),
            y2: 200.0 - (g_down.y2 + g_down.h),
            ..g_down
        };
        let down = ribbon_path(&g_down, true);
        let up = ribbon_path(&g_up, false);

        let down_vertices = vertices(&down);
        let up_vertices = vertices(&up);
        assert_eq!(down_vertices.len(), up_vertices.len());
        for (d, u) in down_vertices.iter().zip(&up_vertices) {
            assert_point(*u, Point::new(d.x, 200.0 - d.y));
        }

        for (ds, us) in down.segments().iter().zip(up.segments()) {
            match (ds, us) {
                (PathSegment::Arc(da), PathSegment::Arc(ua)) => {
                    assert_eq!(da.sweep, Sweep::Clockwise);
                    assert_eq!(ua.sweep, Sweep::CounterClockwise);
                    assert_point(ua.center, Point::new(da.center.x, 200.0 - da.center.y));
                }
                _ => assert_eq!(
                    std::mem::discriminant(ds),
                    std::mem::discriminant(us),
                    "segment kinds differ: {ds:?} vs {us:?}"
                ),
            }
        }
    }

    #[test]
    fn paths_are_closed_and_return_to_start() {
        let layout = default_layout();
        let raw = "4421031111100000222222211114444333311";
        let blocks = compress_stages(&parse_samples(raw).unwrap()).unwrap();
        let connectors = synthesize_all(&layout, &blocks);
        assert_eq!(connectors.len(), blocks.len() - 1);
        for c in &connectors {
            assert!(c.path.is_closed());
            let start = c.path.start_point().unwrap();
            let last_vertex = *vertices(&c.path).last().unwrap();
            assert_point(last_vertex, start);
        }
    }

    #[test]
    fn outlines_do_not_self_intersect() {
        for (bar_width, shadow_inset) in [(4.0, 2.0), (1.0, 2.0), (10.0, 0.5), (2.0, 5.0)] {
            let config = ChartConfig {
                bar_width,
                shadow_inset,
                ..ChartConfig::default()
            };
            let layout = layout_with(&config);
            for a in StageCode::ALL {
                for b in StageCode::ALL {
                    let Some(c) =
                        synthesize(&layout, 0, &Block::new(0, 3, a), &Block::new(3, 4, b))
                    else {
                        continue;
                    };
                    let polygon = flatten(&c.path, 8);
                    assert_simple_polygon(&polygon);
                    assert!(signed_area(&polygon).abs() > 0.0);
                }
            }
        }
    }

    #[test]
    fn same_row_pair_is_skipped() {
        let layout = default_layout();
        let curr = Block::new(0, 3, StageCode::Core);
        let next = Block::new(3, 5, StageCode::Core);
        assert!(synthesize(&layout, 0, &curr, &next).is_none());
    }

    #[test]
    fn single_block_has_no_connectors() {
        let layout = default_layout();
        let blocks = compress_stages(&parse_samples("2").unwrap()).unwrap();
        assert!(synthesize_all(&layout, &blocks).is_empty());
    }

    #[test]
    fn wide_blocks_need_no_clip() {
        let layout = default_layout();
        // width/2 + r = 4/2 + 2 = 4, not below s = 4.
        let curr = Block::new(0, 1, StageCode::Awake);
        let next = Block::new(1, 2, StageCode::Rem);
        let c = synthesize(&layout, 0, &curr, &next).unwrap();
        assert!(!c.is_curr_width_short);
        assert!(!c.is_next_width_short);
        assert!(c.clip.is_none());
    }

    #[test]
    fn equal_wide_blocks_emit_path_without_clip() {
        let layout = default_layout();
        let curr = Block::new(0, 10, StageCode::Core);
        let next = Block::new(10, 20, StageCode::Deep);
        let c = synthesize(&layout, 4, &curr, &next).unwrap();
        assert!(!c.path.is_empty());
        assert!(c.clip.is_none());
    }

    #[test]
    fn narrow_current_block_is_clipped() {
        let config = ChartConfig {
            bar_width: 2.0,
            ..ChartConfig::default()
        };
        let layout = layout_with(&config);
        // Current block is one 2px bar: 1 + 2 < 4.
        let curr = Block::new(0, 1, StageCode::Awake);
        let next = Block::new(1, 5, StageCode::Core);
        let c = synthesize(&layout, 7, &curr, &next).unwrap();
        assert!(c.is_curr_width_short);
        assert!(!c.is_next_width_short);

        let clip = c.clip.unwrap();
        assert_eq!(clip.id, "clip-7");
        // anchor = xPos(1) = 77; x = 77 - 2 - 0, width = 0 + 4 + 4.
        assert_eq!(clip.rect, Rect::new(75.0, 68.0, 8.0, 104.0));
    }

    #[test]
    fn narrow_next_block_is_clipped_on_the_right() {
        let config = ChartConfig {
            bar_width: 2.0,
            ..ChartConfig::default()
        };
        let layout = layout_with(&config);
        let curr = Block::new(0, 4, StageCode::Deep);
        let next = Block::new(4, 5, StageCode::Rem);
        let c = synthesize(&layout, 0, &curr, &next).unwrap();
        assert!(!c.is_down);
        assert!(!c.is_curr_width_short);
        assert!(c.is_next_width_short);

        // anchor = xPos(4) = 83; x = 83 - 2 - 4, width = 4 + 4 + 0.
        // Upper row is REM (100..140), lower is Deep (240..280).
        let rect = c.clip.unwrap().rect;
        assert_eq!(rect, Rect::new(77.0, 138.0, 8.0, 104.0));
    }

    #[test]
    fn clip_spans_gap_between_inset_edges() {
        let config = ChartConfig {
            bar_width: 1.0,
            ..ChartConfig::default()
        };
        let layout = layout_with(&config);
        for (a, b) in [
            (StageCode::Awake, StageCode::Deep),
            (StageCode::Deep, StageCode::Awake),
            (StageCode::Rem, StageCode::Core),
        ] {
            let c = synthesize(&layout, 0, &Block::new(0, 1, a), &Block::new(1, 2, b)).unwrap();
            let rect = c.clip.unwrap().rect;
            assert!(rect.height >= 0.0);
            assert!(rect.width > 0.0);
            let upper = layout.y_pos(a).min(layout.y_pos(b));
            let lower = layout.y_pos(a).max(layout.y_pos(b));
            assert!((rect.y - (upper + 40.0 - 2.0)).abs() < 1e-9);
            assert!((rect.bottom() - (lower + 2.0)).abs() < 1e-9);
        }
    }

    #[test]
    fn is_right_moves_clip_anchor_to_current_start() {
        let config = ChartConfig {
            bar_width: 1.0,
            ..ChartConfig::default()
        };
        let layout = layout_with(&config);
        // Out-of-order pair: never produced by the compressor.
        let curr = Block::new(10, 11, StageCode::Core);
        let next = Block::new(2, 3, StageCode::Awake);
        let c = synthesize(&layout, 0, &curr, &next).unwrap();
        assert!(c.is_right);
        // anchor = xPos(10) = 85; both short so x = 85 - 2.
        let rect = c.clip.unwrap().rect;
        assert!((rect.x - 83.0).abs() < 1e-9);
        assert!((rect.width - 4.0).abs() < 1e-9);
    }

    #[test]
    fn visiting_order_does_not_change_output() {
        let layout = default_layout();
        let blocks =
            compress_stages(&parse_samples("44211100003333222111444").unwrap()).unwrap();
        let forward: Vec<_> = blocks
            .windows(2)
            .enumerate()
            .filter_map(|(i, p)| synthesize(&layout, i, &p[0], &p[1]))
            .collect();
        assert_eq!(synthesize_all(&layout, &blocks), forward);
    }
}
