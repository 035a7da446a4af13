// Copyright 2025 the vizflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

extern crate std;

use alloc::vec;
use alloc::vec::Vec;

use kurbo::Point;
use vizflow_core::{LayerId, Mark, MarkDiff, MarkId, MarkPayload, Scene};
use vizflow_transforms::{AttrId, Dataset, Entity, Relation, TimeSeries, frame_for};

use crate::{
    BubbleMarkSpec, Endpoints, FlowMapSpec, GeoFeature, GeoGeometry, GeoProjection,
    ScaleContinuous, ScaleLinear, ScaleLog, ScaleSqrt,
};

fn series(pairs: &[(f64, Option<f64>)]) -> TimeSeries {
    TimeSeries::from_pairs(pairs.iter().copied()).unwrap()
}

fn nation(name: &str, region: &str, samples: [&[(f64, Option<f64>)]; 3]) -> Entity {
    Entity::new(name, region)
        .with_series("gdp", series(samples[0]))
        .with_series("net", series(samples[1]))
        .with_series("pop", series(samples[2]))
}

fn bubbles() -> BubbleMarkSpec {
    BubbleMarkSpec::new(
        LayerId(1),
        (AttrId(0), AttrId(1), AttrId(2)),
        ScaleContinuous::Log(ScaleLog::new((100.0, 2e5), (0.0, 960.0)).unwrap()),
        ScaleContinuous::Linear(ScaleLinear::new((0.0, 100.0), (600.0, 0.0)).unwrap()),
        ScaleContinuous::Sqrt(ScaleSqrt::new((0.0, 1.5e9), (1.0, 40.0)).unwrap()),
    )
}

fn radius_of(scene: &Scene, id: MarkId) -> f64 {
    match scene.payload(id) {
        Some(MarkPayload::Circle(c)) => c.circle.radius,
        other => panic!("expected a circle for {id:?}, got {other:?}"),
    }
}

fn enters(diffs: &[MarkDiff]) -> usize {
    diffs
        .iter()
        .filter(|d| matches!(d, MarkDiff::Enter { .. }))
        .count()
}

#[test]
fn sparse_entity_appears_only_in_reported_years() {
    let ds = Dataset::new(
        vec![nation(
            "Solo",
            "Europe",
            [
                &[(1990.0, Some(10.0)), (2000.0, Some(30.0))],
                &[(1990.0, Some(10.0)), (2000.0, Some(30.0))],
                &[(1990.0, Some(10.0)), (2000.0, Some(30.0))],
            ],
        )],
        ["gdp", "net", "pop"],
    );
    let spec = BubbleMarkSpec::new(
        LayerId(1),
        (AttrId(0), AttrId(1), AttrId(2)),
        ScaleContinuous::Linear(ScaleLinear::new((0.0, 100.0), (0.0, 100.0)).unwrap()),
        ScaleContinuous::Linear(ScaleLinear::new((0.0, 100.0), (0.0, 100.0)).unwrap()),
        ScaleContinuous::Linear(ScaleLinear::new((0.0, 100.0), (0.0, 100.0)).unwrap()),
    );

    let at_1995 = spec.marks(&frame_for(&ds, 1995.0)).unwrap();
    assert!(at_1995.marks.is_empty());
    assert!(at_1995.skipped.is_empty());

    let at_2000 = spec.marks(&frame_for(&ds, 2000.0)).unwrap();
    assert_eq!(at_2000.marks.len(), 1);
    let MarkPayload::Circle(c) = &at_2000.marks[0].payload else {
        panic!("expected circle");
    };
    assert!((c.circle.center - Point::new(30.0, 30.0)).hypot() < 1e-9);
    assert!((c.circle.radius - 30.0).abs() < 1e-9);
}

#[test]
fn smaller_bubbles_paint_above_larger_ones_after_every_update() {
    let ds = Dataset::new(
        vec![
            nation(
                "A",
                "Europe",
                [
                    &[(2000.0, Some(500.0)), (2001.0, Some(500.0))],
                    &[(2000.0, Some(10.0)), (2001.0, Some(10.0))],
                    &[(2000.0, Some(1e6)), (2001.0, Some(9e8))],
                ],
            ),
            nation(
                "B",
                "Asia",
                [
                    &[(2000.0, Some(800.0)), (2001.0, Some(800.0))],
                    &[(2000.0, Some(20.0)), (2001.0, Some(20.0))],
                    &[(2000.0, Some(5e8)), (2001.0, Some(2e6))],
                ],
            ),
            nation(
                "C",
                "Asia",
                [
                    &[(2000.0, Some(900.0)), (2001.0, Some(900.0))],
                    &[(2000.0, Some(30.0)), (2001.0, Some(30.0))],
                    &[(2000.0, Some(3e7)), (2001.0, Some(3e7))],
                ],
            ),
        ],
        ["gdp", "net", "pop"],
    );
    let spec = bubbles();
    let mut scene = Scene::new();

    for year in [2000.0, 2001.0] {
        let out = spec.marks(&frame_for(&ds, year)).unwrap();
        let _ = scene.tick(out.marks);
        let order = scene.draw_order();
        assert_eq!(order.len(), 3);
        let radii: Vec<f64> = order.iter().map(|id| radius_of(&scene, *id)).collect();
        assert!(
            radii.windows(2).all(|w| w[0] > w[1]),
            "year {year}: paint order radii {radii:?}"
        );
    }
}

#[test]
fn repeated_updates_never_duplicate_elements() {
    let ds = Dataset::new(
        vec![
            nation(
                "A",
                "Europe",
                [
                    &[(2000.0, Some(500.0)), (2001.0, Some(600.0))],
                    &[(2000.0, Some(10.0)), (2001.0, Some(12.0))],
                    &[(2000.0, Some(1e6)), (2001.0, Some(1.1e6))],
                ],
            ),
            nation(
                "B",
                "Asia",
                [
                    &[(2000.0, Some(800.0)), (2001.0, Some(900.0))],
                    &[(2000.0, Some(20.0)), (2001.0, Some(25.0))],
                    &[(2000.0, Some(5e8)), (2001.0, Some(5.1e8))],
                ],
            ),
        ],
        ["gdp", "net", "pop"],
    );
    let spec = bubbles();
    let mut scene = Scene::new();

    let first = scene.tick(spec.marks(&frame_for(&ds, 2000.0)).unwrap().marks);
    assert_eq!(enters(&first), 2);

    let second = scene.tick(spec.marks(&frame_for(&ds, 2001.0)).unwrap().marks);
    assert_eq!(enters(&second), 0);
    assert_eq!(second.len(), 2);
    assert!(second.iter().all(|d| matches!(d, MarkDiff::Update { .. })));
    assert_eq!(scene.len(), 2);

    let again = scene.tick(spec.marks(&frame_for(&ds, 2001.0)).unwrap().marks);
    assert!(again.is_empty());
}

#[test]
fn entity_without_data_exits_and_returns() {
    let ds = Dataset::new(
        vec![nation(
            "Gap",
            "Europe",
            [
                &[(1990.0, Some(500.0)), (1991.0, None), (1992.0, Some(700.0))],
                &[(1990.0, Some(1.0)), (1991.0, Some(1.0)), (1992.0, Some(2.0))],
                &[(1990.0, Some(1e6)), (1991.0, Some(1e6)), (1992.0, Some(1e6))],
            ],
        )],
        ["gdp", "net", "pop"],
    );
    let spec = bubbles();
    let mut scene = Scene::new();
    let id = spec.mark_id(vizflow_core::stable_key("Gap"));

    assert_eq!(enters(&scene.tick(spec.marks(&frame_for(&ds, 1990.0)).unwrap().marks)), 1);
    let gap = scene.tick(spec.marks(&frame_for(&ds, 1991.0)).unwrap().marks);
    assert!(matches!(gap.as_slice(), [MarkDiff::Exit { id: got, .. }] if *got == id));
    let back = scene.tick(spec.marks(&frame_for(&ds, 1992.0)).unwrap().marks);
    assert!(matches!(back.as_slice(), [MarkDiff::Enter { id: got, .. }] if *got == id));
}

#[test]
fn flow_links_resolve_once_endpoints_are_known() {
    let spec = FlowMapSpec::new(
        LayerId(30),
        LayerId(31),
        GeoProjection::mercator(960.0, (480.0, 320.0)),
    );
    let features = vec![GeoFeature::new(
        "NOR",
        GeoGeometry::Polygon(vec![vec![(5.0, 58.0), (31.0, 58.0), (31.0, 71.0), (5.0, 71.0)]]),
    )];
    let relations = vec![
        Relation::new("NOR", "TZA", 9e7),
        Relation::new("NOR", "MOZ", 4e7),
    ];
    let mut endpoints = Endpoints::new().with("NOR", 10.0, 62.0).with("TZA", 35.0, -6.0);
    let mut scene = Scene::new();

    let out = spec.marks(&features, &relations, &endpoints, Some("NOR"));
    assert_eq!(out.dropped.len(), 1);
    let diffs = scene.tick(out.marks);
    assert_eq!(enters(&diffs), 2);

    endpoints.insert("MOZ", 35.0, -18.0);
    let out = spec.marks(&features, &relations, &endpoints, Some("NOR"));
    assert!(out.dropped.is_empty());
    let diffs = scene.tick(out.marks);
    assert_eq!(enters(&diffs), 1);

    let out = spec.marks(&features, &relations, &endpoints, None);
    let diffs = scene.tick(out.marks);
    let exits = diffs
        .iter()
        .filter(|d| matches!(d, MarkDiff::Exit { .. }))
        .count();
    assert_eq!(exits, 2);
    assert_eq!(scene.len(), 1);
}

#[test]
fn hit_testing_finds_the_topmost_bubble() {
    let small = Mark::builder(MarkId::for_key(LayerId(1), 1))
        .z_index(crate::SERIES_POINTS)
        .datum(1)
        .circle((100.0, 100.0), 5.0)
        .build();
    let large = Mark::builder(MarkId::for_key(LayerId(1), 2))
        .z_index(crate::SERIES_POINTS)
        .datum(2)
        .circle((100.0, 100.0), 50.0)
        .build();
    let mut scene = Scene::new();
    let _ = scene.tick([large, small]);
    assert_eq!(scene.hit_test(Point::new(101.0, 100.0)).map(|h| h.datum), Some(1));
    assert_eq!(scene.hit_test(Point::new(140.0, 100.0)).map(|h| h.datum), Some(2));
    assert_eq!(scene.hit_test(Point::new(300.0, 100.0)), None);
}
