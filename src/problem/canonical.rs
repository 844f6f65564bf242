// src/problem/canonical.rs — Canonical form and spec identity hash

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::problem::{ProblemSpec, Sense, VarBounds};

/// Canonical projection of a spec: fixed field order, empty optional
/// collections collapsed to null so absent and empty payloads share
/// one identity.
#[derive(Debug, Serialize)]
pub struct CanonicalSpec<'a> {
    #[serde(rename = "A")]
    a: Option<&'a [Vec<f64>]>,
    #[serde(rename = "Q")]
    q: Option<&'a [Vec<f64>]>,
    b: Option<&'a [f64]>,
    bounds: Option<&'a [VarBounds]>,
    c: &'a [f64],
    sense: Sense,
}

pub fn canonical_form(spec: &ProblemSpec) -> CanonicalSpec<'_> {
    CanonicalSpec {
        a: spec.a.as_deref().filter(|rows| !rows.is_empty()),
        q: spec.q.as_deref().filter(|rows| !rows.is_empty()),
        b: spec.b.as_deref().filter(|v| !v.is_empty()),
        bounds: spec.bounds.as_deref().filter(|v| !v.is_empty()),
        c: &spec.c,
        sense: spec.sense,
    }
}

/// Compact canonical JSON. These exact bytes are what gets hashed;
/// stored payloads use the plain spec serialization instead.
pub fn canonical_json(spec: &ProblemSpec) -> String {
    serde_json::to_string(&canonical_form(spec)).unwrap_or_default()
}

/// Content identity of a spec: sha256 over the canonical JSON,
/// lowercase hex. Construction order and caller metadata never factor
/// in, so identical physical problems always collide here.
pub fn spec_hash(spec: &ProblemSpec) -> String {
    let mut hasher = Sha256::new();
    hasher.update(canonical_json(spec).as_bytes());
    hex::encode(hasher.finalize())
}
