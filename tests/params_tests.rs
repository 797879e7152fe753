// tests/params_tests.rs
//! Tests voor `Params`: standaardwaarden, YAML-configuratie en validatie.

extern crate udgraph;
use approx::assert_relative_eq;
use udgraph::{GraphError, Params};

#[test]
fn test_defaults() {
    let p = Params::default();
    assert_eq!(p.exact_threshold, 0);
    assert_relative_eq!(p.max_time_seconds, 0.0);
    assert_eq!(p.max_search_nodes, 0);
    assert_eq!(p.tabu_iter_limit, 100_000);
    assert_eq!(p.tabu_tenure, 9);
    assert_relative_eq!(p.tabu_alpha, 0.6);
    assert_eq!(p.isx_limit, 500);
    assert_eq!(p.runs, 1);
    assert_eq!(p.seed, 42);
    assert!(p.validate().is_ok());
}

#[test]
fn test_yaml_missing_keys_take_defaults() {
    let p = Params::from_yaml_str("seed: 7\ntabu_alpha: 0.25\nmax_time_seconds: 1.5\n").unwrap();
    assert_eq!(p.seed, 7);
    assert_relative_eq!(p.tabu_alpha, 0.25);
    assert_relative_eq!(p.max_time_seconds, 1.5);
    assert_eq!(p.tabu_tenure, 9);
    assert_eq!(p.runs, 1);
}

#[test]
fn test_yaml_errors() {
    assert!(matches!(
        Params::from_yaml_str("seed: [1, 2]\n"),
        Err(GraphError::Config(_))
    ));
    assert!(matches!(
        Params::from_yaml_str("runs: 0\n"),
        Err(GraphError::Config(_))
    ));
    assert!(matches!(
        Params::from_yaml_str("max_time_seconds: -1.0\n"),
        Err(GraphError::Config(_))
    ));
}

#[test]
fn test_yaml_file() {
    let path = std::env::temp_dir().join(format!("udgraph_{}_params.yaml", std::process::id()));
    std::fs::write(&path, "exact_threshold: 30\nmax_search_nodes: 5000\n").unwrap();
    let p = Params::from_yaml_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(p.exact_threshold, 30);
    assert_eq!(p.max_search_nodes, 5000);

    let missing = Params::from_yaml_file(path.with_extension("missing"));
    assert!(matches!(missing, Err(GraphError::FileAccess { .. })));
}

#[test]
fn test_builder_setters() {
    let mut p = Params::default();
    p.with_budget(2.5, 10_000).with_tabu(500, 4, 0.1);
    assert_relative_eq!(p.max_time_seconds, 2.5);
    assert_eq!(p.max_search_nodes, 10_000);
    assert_eq!(p.tabu_iter_limit, 500);
    assert_eq!(p.tabu_tenure, 4);
    assert_relative_eq!(p.tabu_alpha, 0.1);
}

#[test]
fn test_nan_alpha_is_rejected() {
    let mut p = Params::default();
    p.tabu_alpha = f64::NAN;
    assert!(matches!(p.validate(), Err(GraphError::Config(_))));
}

#[test]
fn test_non_finite_values_are_rejected() {
    let mut p = Params::default();
    p.max_time_seconds = f64::INFINITY;
    assert!(matches!(p.validate(), Err(GraphError::Config(_))));
    p.max_time_seconds = 0.0;
    p.tabu_alpha = f64::INFINITY;
    assert!(matches!(p.validate(), Err(GraphError::Config(_))));

    assert!(matches!(
        Params::from_yaml_str("max_time_seconds: .inf\n"),
        Err(GraphError::Config(_))
    ));
    // Groot maar eindig is toegestaan.
    let p = Params::from_yaml_str("max_time_seconds: 1.0e300\nisx_limit: 10\n").unwrap();
    assert_relative_eq!(p.max_time_seconds, 1.0e300);
    assert_eq!(p.isx_limit, 10);
}
