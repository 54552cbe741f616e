// Downloadable example CSV for a radar.
//
// Rows reference quadrants and rings by position so the sample imports
// cleanly into the radar it was generated for. Missing positions fall back
// to the default names.

use super::csv::escape_field;
use crate::model::{DEFAULT_QUADRANTS, DEFAULT_RINGS, Quadrant, Ring};

pub const SAMPLE_HEADER: &str = "name,quadrant,ring,description,isNew";

/// (name, quadrant position, ring position, description, isNew)
const SAMPLE_ROWS: &[(&str, usize, usize, &str, bool)] = &[
    ("React", 3, 0, "Our primary frontend framework", false),
    ("Kubernetes", 1, 0, "Container orchestration platform", false),
    ("Deno", 1, 2, "Alternative JavaScript runtime", true),
    ("Pair Programming", 0, 1, "Collaborative coding practice", false),
    ("Vite", 2, 0, "Fast build tool for web projects", true),
];

fn names_by_position<'a, T>(items: &'a [T], position: impl Fn(&T) -> usize, name: impl Fn(&'a T) -> &'a str) -> Vec<&'a str> {
    let mut sorted: Vec<&T> = items.iter().collect();
    sorted.sort_by_key(|item| position(item));
    sorted.into_iter().map(name).collect()
}

pub fn sample_csv(quadrants: &[Quadrant], rings: &[Ring]) -> String {
    let quadrant_names = names_by_position(quadrants, |q| usize::from(q.position), |q| q.name.as_str());
    let ring_names = names_by_position(rings, |r| r.position as usize, |r| r.name.as_str());

    let mut lines = vec![SAMPLE_HEADER.to_string()];
    for &(name, q, r, description, is_new) in SAMPLE_ROWS {
        let quadrant = quadrant_names.get(q).copied().unwrap_or(DEFAULT_QUADRANTS[q].0);
        let ring = ring_names.get(r).copied().unwrap_or(DEFAULT_RINGS[r].0);
        let is_new = if is_new { "true" } else { "false" };
        let row: Vec<String> = [name, quadrant, ring, description, is_new]
            .iter()
            .map(|field| escape_field(field))
            .collect();
        lines.push(row.join(","));
    }
    lines.join("\n")
}
