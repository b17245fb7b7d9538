//! Integration tests for the backpropagation and self-organizing map engines.

use ann::datasets::{classification_errors, noisy_ramp_patterns, primes_dataset, ramp_patterns};
use ann::{AnnError, BackpropConfig, BackpropNetwork, Config, Som, SomConfig, TrainingPattern};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[test]
fn test_primes_end_to_end() {
    let config = BackpropConfig {
        seed: Some(7),
        ..Default::default()
    };
    assert_eq!(
        (config.input_count, config.hidden_count, config.output_count),
        (10, 19, 1)
    );

    let patterns = primes_dataset(1000, config.input_count);
    let mut network = BackpropNetwork::from_config(&config);
    network.train(config.iterations, &patterns).unwrap();

    let errors = classification_errors(&patterns, |input| network.predict_class(input).unwrap());
    assert!(errors < 40, "{} of 1000 integers misclassified", errors);
}

#[test]
fn test_som_end_to_end() {
    let (features, labels) = ramp_patterns();
    let noisy = noisy_ramp_patterns();

    for seed in 0..12 {
        let config = SomConfig {
            seed: Some(seed),
            ..Default::default()
        };
        let mut som = Som::from_config(&config);
        assert_eq!(som.len(), 144);
        assert_eq!(som.radius(), 12);
        som.train(config.iterations, &features, &labels).unwrap();

        for (i, fv) in noisy.iter().enumerate() {
            let percent = som.predict_class(fv).unwrap();
            assert_eq!(percent.len(), 3);
            assert!(
                percent[i] > 85,
                "seed {}: noisy pattern {} predicted as {:?}",
                seed,
                i,
                percent
            );
        }
    }
}

#[test]
fn test_training_progress_reports_every_epoch() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let patterns = primes_dataset(16, 4);
    let mut network = BackpropNetwork::new(4, 3, 1, &mut rng);

    let mut seen = Vec::new();
    network
        .train_with_progress(5, &patterns, |epoch, total| seen.push((epoch, total)))
        .unwrap();
    assert_eq!(seen, (1..=5).map(|e| (e, 5)).collect::<Vec<_>>());

    let (features, labels) = ramp_patterns();
    let mut som = Som::new(3, 3, 10, 3, &mut rng);
    let mut count = 0;
    som.train_with_progress(4, &features, &labels, |_, _| count += 1)
        .unwrap();
    assert_eq!(count, 4);
}

#[test]
fn test_mismatched_dimensions_are_rejected() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let mut network = BackpropNetwork::new(3, 2, 1, &mut rng);
    let before = network.predict(&[1.0, 0.0, 1.0]).unwrap();

    let patterns = vec![
        TrainingPattern::new(vec![1.0, 0.0, 1.0], vec![1.0]),
        TrainingPattern::new(vec![1.0, 0.0], vec![0.0]),
    ];
    let err = network.train(10, &patterns).unwrap_err();
    assert_eq!(
        err,
        AnnError::DimensionMismatch {
            what: "training input",
            expected: 3,
            actual: 2
        }
    );
    assert_eq!(network.predict(&[1.0, 0.0, 1.0]).unwrap(), before);

    let mut som = Som::new(2, 2, 2, 1, &mut rng);
    let err = som
        .train(10, &[vec![0.1, 0.2], vec![0.3, 0.4]], &[vec![1.0]])
        .unwrap_err();
    assert_eq!(
        err,
        AnnError::ConfigurationMismatch {
            features: 2,
            prototypes: 1
        }
    );
    assert!(matches!(
        som.predict(&[0.5]),
        Err(AnnError::DimensionMismatch { .. })
    ));
}

#[test]
fn test_best_match_falls_back_to_second_node() {
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let som = Som::new(2, 2, 2, 1, &mut rng);

    // Nothing is closer than sqrt(2) to a far-away target.
    assert_eq!(som.best_match(&[100.0, 100.0]), 1);

    let single = Som::new(1, 1, 2, 1, &mut rng);
    assert_eq!(single.best_match(&[100.0, 100.0]), 1);
    assert_eq!(
        single.predict(&[100.0, 100.0]).unwrap_err(),
        AnnError::NoMatchingNode { index: 1, total: 1 }
    );
}

#[test]
fn test_prediction_does_not_change_the_model() {
    let config = Config::default();
    let mut backprop = BackpropConfig {
        seed: Some(11),
        ..config.backprop
    };
    backprop.input_count = 4;
    let network = BackpropNetwork::from_config(&backprop);
    let input = [1.0, 0.0, 1.0, 1.0];
    let first = network.predict(&input).unwrap();
    for _ in 0..3 {
        assert_eq!(network.predict(&input).unwrap(), first);
    }

    let som = Som::from_config(&SomConfig {
        seed: Some(11),
        ..config.som
    });
    let fv = &ramp_patterns().0[0];
    let first = som.predict(fv).unwrap().to_vec();
    assert_eq!(som.predict(fv).unwrap(), first.as_slice());
}

#[test]
fn test_same_seed_same_model() {
    let config = SomConfig {
        height: 4,
        width: 4,
        iterations: 20,
        seed: Some(21),
        ..Default::default()
    };
    let (features, labels) = ramp_patterns();

    let mut a = Som::from_config(&config);
    let mut b = Som::from_config(&config);
    a.train(config.iterations, &features, &labels).unwrap();
    b.train(config.iterations, &features, &labels).unwrap();

    for (x, y) in a.nodes().iter().zip(b.nodes()) {
        assert_eq!(x.fv(), y.fv());
        assert_eq!(x.pv(), y.pv());
    }
}
