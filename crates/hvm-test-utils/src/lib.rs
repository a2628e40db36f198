//! Testing utilities for the helm-values-manager workspace
//!
//! Shared fixtures, tree builders and proptest strategies.

#![allow(missing_docs)]

use hvm_analyzer::{Analyzer, ClassificationResult};
use hvm_values::{KeyPath, Mapping, Number, Value};
use proptest::prelude::*;

/// Upstream chart text with active and disabled entries
pub const CHART_VALUES: &str = "\
# Default values for web.
replicaCount: 1

image:
  repository: nginx
  tag: \"1.25\"
  pullPolicy: IfNotPresent
  # digest: sha256:abc

service:
  type: ClusterIP
  port: 80
  # nodePort: 30080

## -- Pod annotations
# podAnnotations: {}

resources: {}
  # limits:
  #   cpu: 100m

ingress:
  enabled: false
  hosts:
    - host: chart-example.local
";

/// Downstream values exercising every category against [`CHART_VALUES`]
pub const CUSTOM_VALUES: &str = "\
replicaCount: 3
image:
  repository: nginx
  tag: 1.25
  digest: sha256:def
service:
  type: NodePort
  port: 80
  nodePort: 30080
podAnnotations:
  prometheus.io/scrape: \"true\"
resources:
  limits:
    cpu: 200m
ingress:
  enabled: false
extraEnv:
  - name: MODE
    value: prod
";

pub fn yaml(text: &str) -> Value {
    Value::from_yaml_str(text).unwrap()
}

pub fn mapping(text: &str) -> Mapping {
    match yaml(text) {
        Value::Mapping(map) => map,
        Value::Null => Mapping::new(),
        other => panic!("expected a mapping document, got {other:?}"),
    }
}

pub fn path(dotted: &str) -> KeyPath {
    dotted.parse().unwrap()
}

pub fn analyze_yaml(upstream: &str, downstream: &str, source: Option<&str>) -> ClassificationResult {
    Analyzer::default()
        .analyze(&yaml(upstream), &yaml(downstream), source)
        .unwrap()
}

/// Paths at which the engine makes a decision for `downstream`
///
/// Descends only where both sides hold a non-empty mapping; every other
/// downstream key is a classification point.
pub fn classification_points(upstream: &Mapping, downstream: &Mapping) -> Vec<KeyPath> {
    let mut points = Vec::new();
    collect_points(&KeyPath::root(), upstream, downstream, &mut points);
    points
}

fn collect_points(prefix: &KeyPath, upstream: &Mapping, downstream: &Mapping, out: &mut Vec<KeyPath>) {
    for (key, down_value) in downstream {
        let path = prefix.child(key.as_str());
        match (upstream.get(key), down_value) {
            (Some(Value::Mapping(up_map)), Value::Mapping(down_map)) if !down_map.is_empty() => {
                collect_points(&path, up_map, down_map, out);
            }
            _ => out.push(path),
        }
    }
}

/// Scalar values with frequent cross-type collisions (`1` vs `"1"`)
pub fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (0i64..4).prop_map(|n| Value::Number(Number::from(n))),
        prop::sample::select(vec!["0", "1", "true", "x"]).prop_map(Value::from),
    ]
}

/// Small key alphabet so upstream and downstream overlap often
pub fn arb_key() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["a", "b", "c", "d"]).prop_map(str::to_string)
}

/// Arbitrary value tree of bounded depth
pub fn arb_value() -> impl Strategy<Value = Value> {
    arb_scalar().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..3).prop_map(Value::Sequence),
            prop::collection::btree_map(arb_key(), inner, 0..4).prop_map(Value::Mapping),
        ]
    })
}

/// Arbitrary mapping root
pub fn arb_mapping() -> impl Strategy<Value = Mapping> {
    prop::collection::btree_map(arb_key(), arb_value(), 0..4)
}
