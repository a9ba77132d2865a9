use neural_playground::config::load_or_default;
use neural_playground::som::{SomTrainer, TrainerStatus};
use std::env;
use std::process;
use std::time::Instant;

// Report interval, in training iterations.
const REPORT_EVERY: usize = 100;

// Trains a self-organizing map and prints the quantization error as it organises.
fn main() {
    env_logger::init();

    let path = env::args().nth(1);
    let config = match load_or_default(path.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Could not load config: {}", err);
            process::exit(1);
        }
    };

    let mut trainer = match SomTrainer::new(&config.som) {
        Ok(trainer) => trainer,
        Err(err) => {
            eprintln!("Could not build SOM: {}", err);
            process::exit(1);
        }
    };

    println!(
        "Dataset: {} ({} samples, {} dimensions), grid {}x{}",
        config.som.dataset.name(),
        trainer.dataset().len(),
        trainer.dataset().dimensions(),
        config.som.grid_size,
        config.som.grid_size
    );

    let train_start = Instant::now();
    loop {
        let params = trainer.current_parameters();
        let error = match trainer.quantization_error() {
            Ok(error) => error,
            Err(err) => {
                eprintln!("Quantization error unavailable: {}", err);
                process::exit(1);
            }
        };
        println!(
            "Iteration {:>5}  lr: {:.4}  radius: {:.4}  quantization error: {:.6}",
            trainer.iteration(),
            params.learning_rate,
            params.radius,
            error
        );

        if trainer.status() == TrainerStatus::Finished {
            break;
        }
        if let Err(err) = trainer.train_for(REPORT_EVERY) {
            eprintln!("Training failed: {}", err);
            process::exit(1);
        }
    }
    let train_time = train_start.elapsed().as_secs_f64();

    if let Some(bmu) = trainer.last_bmu() {
        println!("Last BMU: ({}, {}) at distance {:.6}", bmu.i, bmu.j, bmu.distance);
    }
    println!("Total training time: {:.2} seconds", train_time);
}
