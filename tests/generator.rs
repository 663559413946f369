use hyperlayer::hyperbolic::{expected_degree, hyperbolic_distance, naive_edges};
use hyperlayer::{ConfigError, Edge, GeneratorConfig, HyperbolicGenerator, Workers};

fn sorted(mut edges: Vec<Edge>) -> Vec<Edge> {
    edges.sort_unstable();
    edges
}

#[test]
fn config_file_with_partial_fields() {
    let json = r#"{
        "nodes": 3000,
        "alpha": 0.9,
        "avg_deg": 12.0,
        "seed": 77,
        "workers": 3
    }"#;
    let config = GeneratorConfig::from_json(json).unwrap();
    assert_eq!(config.layer_height, 1.0);
    assert_eq!(config.block_size, hyperlayer::DEFAULT_BLOCK_SIZE);

    let generator = HyperbolicGenerator::new(config).unwrap();
    assert_eq!(generator.workers().count(), 3);
    let radius = generator.disk_radius();
    assert!((expected_degree(3000.0, 0.9, radius) - 12.0).abs() < 1e-3);
}

#[test]
fn unknown_values_are_reported() {
    let err = GeneratorConfig::from_json(r#"{ "nodes": "many" }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Json(_)));

    let config = GeneratorConfig::from_json(r#"{ "alpha": -1.0 }"#).unwrap();
    let err = HyperbolicGenerator::new(config).unwrap_err();
    assert!(err.to_string().contains("alpha"), "{err}");
}

#[test]
fn generated_edges_match_brute_force() {
    let config = GeneratorConfig::new()
        .nodes(1500)
        .alpha(0.75)
        .avg_deg(10.0)
        .layer_height(0.5)
        .seed(2024)
        .workers(4)
        .block_size(64);
    let graph = HyperbolicGenerator::new(config).unwrap().generate();

    assert!(graph.edges.iter().all(|e| e.0 < e.1));
    for e in graph.edges.iter().step_by(37) {
        let (u, v) = (e.0 as usize, e.1 as usize);
        let d = hyperbolic_distance(graph.radii[u], graph.angles[u], graph.radii[v], graph.angles[v]);
        assert!(d < graph.radius + 1e-9, "{e}: {d}");
    }
    assert_eq!(sorted(graph.edges), naive_edges(&graph.radii, &graph.angles, graph.radius));
}

#[test]
fn output_does_not_depend_on_the_worker_count() {
    let config = GeneratorConfig::new().nodes(20_000).avg_deg(8.0).seed(5);
    let reference = HyperbolicGenerator::with_workers(config.clone(), Workers::sequential())
        .unwrap()
        .generate();
    for workers in [2, 3, 8] {
        let graph = HyperbolicGenerator::with_workers(config.clone(), Workers::new(workers).unwrap())
            .unwrap()
            .generate();
        assert_eq!(graph.radii, reference.radii);
        assert_eq!(graph.angles, reference.angles);
        assert_eq!(sorted(graph.edges), sorted(reference.edges.clone()), "{workers} workers");
    }
}

#[test]
fn average_degree_is_close_to_the_target() {
    let config = GeneratorConfig::new().nodes(100_000).avg_deg(10.0).seed(11).workers(4);
    let generator = HyperbolicGenerator::new(config).unwrap();
    let graph = generator.generate();
    let degree = graph.average_degree();
    assert!((7.0..13.0).contains(&degree), "average degree {degree}");
    assert_eq!(generator.count_edges(), graph.num_edges() as u64);
}
