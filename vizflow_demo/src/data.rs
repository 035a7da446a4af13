// Copyright 2025 the vizflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sample data for the demo views.

use anyhow::Context as _;
use vizflow_charts::{BarDatum, Endpoints, GeoFeature, GeoGeometry, ScatterDatum};
use vizflow_transforms::{Dataset, Edge, Entity, Graph, Node, Relation};

/// Attribute names of the bubble chart: GDP per capita, internet users per 100, population.
pub(crate) const BUBBLE_ATTRS: (&str, &str, &str) =
    ("NY.GDP.PCAP.CD", "IT.NET.USER.P2", "SP.POP.TOTL");

/// A handful of countries in the flat shape the bubble chart reads. Reporting is sparse on
/// purpose: Freedonia has no 1995 sample and Sylvania reports a null population in 2001.
const NATIONS_JSON: &str = r#"[
  {
    "name": "Freedonia",
    "region": "Europe & Central Asia",
    "NY.GDP.PCAP.CD": [[1990, 9000], [2000, 21000], [2012, 43000]],
    "IT.NET.USER.P2": [[1990, 0.5], [2000, 30], [2012, 84]],
    "SP.POP.TOTL": [[1990, 5.4e7], [2000, 5.6e7], [2012, 5.9e7]]
  },
  {
    "name": "Sylvania",
    "region": "East Asia & Pacific",
    "NY.GDP.PCAP.CD": [[1990, 320], [1995, 600], [2000, 950], [2001, 1040], [2012, 6100]],
    "IT.NET.USER.P2": [[1990, 0.01], [1995, 0.1], [2000, 1.8], [2001, 2.6], [2012, 42]],
    "SP.POP.TOTL": [[1990, 1.1e9], [1995, 1.2e9], [2000, 1.26e9], [2001, null], [2012, 1.35e9]]
  },
  {
    "name": "Grand Fenwick",
    "region": "Europe & Central Asia",
    "NY.GDP.PCAP.CD": [[1990, 34000], [1995, 46000], [2000, 38000], [2012, 103000]],
    "IT.NET.USER.P2": [[1990, 1.2], [1995, 6], [2000, 52], [2012, 93]],
    "SP.POP.TOTL": [[1990, 380000], [1995, 405000], [2000, 436000], [2012, 530000]]
  },
  {
    "name": "Latveria",
    "region": "Sub-Saharan Africa",
    "NY.GDP.PCAP.CD": [[1990, 450], [1995, 380], [2000, 410], [2012, 1500]],
    "IT.NET.USER.P2": [[1990, 0], [1995, 0.02], [2000, 0.2], [2012, 16]],
    "SP.POP.TOTL": [[1990, 9.5e7], [1995, 1.08e8], [2000, 1.23e8], [2012, 1.69e8]]
  }
]"#;

/// Parses the bubble chart dataset.
pub(crate) fn nations() -> anyhow::Result<Dataset> {
    let entities: Vec<Entity> =
        serde_json::from_str(NATIONS_JSON).context("parse the sample nations")?;
    Ok(Dataset::new(
        entities,
        [BUBBLE_ATTRS.0, BUBBLE_ATTRS.1, BUBBLE_ATTRS.2],
    ))
}

fn block(id: &str, lon: f64, lat: f64, w: f64, h: f64) -> GeoFeature {
    GeoFeature::new(
        id,
        GeoGeometry::Polygon(vec![vec![
            (lon, lat),
            (lon + w, lat),
            (lon + w, lat + h),
            (lon, lat + h),
        ]]),
    )
}

/// Blocky stand-ins for country outlines, their centroids, and remittance flows in US$.
pub(crate) fn remittances() -> (Vec<GeoFeature>, Vec<Relation>, Endpoints) {
    let features = vec![
        block("USA", -125.0, 25.0, 58.0, 24.0),
        block("MEX", -117.0, 15.0, 30.0, 10.0),
        block("DEU", 6.0, 47.0, 9.0, 8.0),
        block("TUR", 26.0, 36.0, 18.0, 6.0),
        block("IND", 68.0, 8.0, 22.0, 26.0),
        block("ARE", 51.0, 22.0, 5.0, 4.0),
    ];
    let relations = vec![
        Relation::new("USA", "MEX", 2.2e10),
        Relation::new("USA", "IND", 1.1e10),
        Relation::new("DEU", "TUR", 1.8e9),
        Relation::new("ARE", "IND", 1.3e10),
        // No centroid for this one; it is reported and skipped.
        Relation::new("DEU", "ATL", 4.0e8),
    ];
    let endpoints = Endpoints::new()
        .with("USA", -98.0, 39.0)
        .with("MEX", -102.0, 23.0)
        .with("DEU", 10.0, 51.0)
        .with("TUR", 35.0, 39.0)
        .with("IND", 79.0, 22.0)
        .with("ARE", 54.0, 24.0);
    (features, relations, endpoints)
}

/// Shares of votes for a bar list.
pub(crate) fn vote_shares() -> Vec<BarDatum> {
    [("Messi", 47.9), ("Ronaldo", 23.7), ("Iniesta", 10.9), ("Xavi", 4.6)]
        .into_iter()
        .map(|(name, pct)| {
            BarDatum::new(name, pct, format!("{pct:.1}%"))
                .with_title(format!("{name}: {pct:.1}% of first-place votes"))
        })
        .collect()
}

/// Salary against goals.
pub(crate) fn salaries() -> Vec<ScatterDatum> {
    [
        ("LM", "Lionel Messi", 41_000_000.0, 46.0),
        ("CR", "Cristiano Ronaldo", 38_000_000.0, 55.0),
        ("RvP", "Robin van Persie", 9_000_000.0, 30.0),
        ("RF", "Radamel Falcao", 11_000_000.0, 28.0),
    ]
    .into_iter()
    .map(|(short, name, salary, goals)| ScatterDatum::new(short, salary, goals).with_title(name))
    .collect()
}

/// Who voted for whom, with pre-computed positions.
pub(crate) fn votes_graph() -> Graph {
    let nodes = vec![
        Node::new("messi", "Messi", (0.0, 0.0))
            .with_size(1365.0)
            .with_category("Barcelona")
            .with_property("votes", "Xavi|Iniesta|Neymar"),
        Node::new("ronaldo", "Ronaldo", (60.0, -30.0))
            .with_size(1250.0)
            .with_category("Real Madrid")
            .with_property("votes", "Bale|Falcao|Messi"),
        Node::new("xavi", "Xavi", (-40.0, 25.0))
            .with_size(120.0)
            .with_category("Barcelona")
            .with_property("votes", "Messi|Iniesta|Busquets"),
        Node::new("iniesta", "Iniesta", (-30.0, -35.0))
            .with_size(160.0)
            .with_category("Barcelona"),
        Node::new("falcao", "Falcao", (80.0, 30.0))
            .with_size(25.0)
            .with_category("Atletico"),
    ];
    let edges = vec![
        Edge::new("xavi", "messi", 5.0),
        Edge::new("messi", "xavi", 5.0),
        Edge::new("messi", "iniesta", 3.0),
        Edge::new("ronaldo", "falcao", 3.0),
        Edge::new("ronaldo", "messi", 1.0),
    ];
    Graph::new(nodes, edges)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nations_parse_with_gaps() {
        let ds = nations().unwrap();
        assert_eq!(ds.entities().len(), 4);
        assert_eq!(ds.time_extent(), Some((1990.0, 2012.0)));
        let sylvania = &ds.entities()[1];
        assert_eq!(sylvania.series(BUBBLE_ATTRS.2).unwrap().value_at(2001.0), None);
    }
}
