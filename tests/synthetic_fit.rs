use linfit::data::{SynthConfig, generate, write_csv};
use linfit::domain::{Column, TrainConfig};
use linfit::io::load_table;
use linfit::math::solve_least_squares;
use linfit::models::LinearRegression;

fn load_model(path: &std::path::Path) -> LinearRegression {
    let table = load_table(path, &["x1", "x2", "y"]).unwrap();
    let x1 = table.get("x1").unwrap();
    let x2 = table.get("x2").unwrap();
    let y = table.get("y").unwrap();
    assert!(matches!(x1, Column::Float(_)));
    LinearRegression::new(&[x1, x2], y)
}

#[test]
fn recovers_known_weights_from_generated_csv() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clean.csv");
    let data = generate(&SynthConfig {
        weights: vec![1.5, -0.5],
        rows: 50,
        seed: 7,
        ..SynthConfig::default()
    })
    .unwrap();
    write_csv(&path, &data).unwrap();

    let mut model = load_model(&path);
    assert_eq!(model.n_samples(), 50);

    let outcome = model
        .try_fit(&TrainConfig {
            learning_rate: 0.5,
            epochs: 20_000,
        })
        .unwrap();
    assert!(outcome.converged);
    assert!((model.weights()[0] - 1.5).abs() < 1e-2);
    assert!((model.weights()[1] + 0.5).abs() < 1e-2);

    let y = model.predict_single(&[2.0, 2.0]);
    assert!((y - 2.0).abs() < 5e-2);
}

#[test]
fn noisy_fit_matches_closed_form() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("noisy.csv");
    let data = generate(&SynthConfig {
        weights: vec![3.0, 1.0],
        rows: 100,
        noise: 0.1,
        seed: 11,
        ..SynthConfig::default()
    })
    .unwrap();
    write_csv(&path, &data).unwrap();

    let mut model = load_model(&path);
    let weights = model.fit(0.5, 20_000);
    let exact = solve_least_squares(model.features(), model.target()).unwrap();

    assert_eq!(weights.len(), 2);
    for (gd, cf) in weights.iter().zip(&exact) {
        assert!((gd - cf).abs() < 1e-6, "gd={gd} closed-form={cf}");
    }
}
