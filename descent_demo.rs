use neural_playground::config::load_or_default;
use neural_playground::optimizers::{DescentRun, OptimizerKind, RunStatus};
use std::env;
use std::process;
use std::time::Instant;

// Races every optimizer on the configured loss surface.
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
    let gd = &config.gradient_descent;

    println!(
        "Surface: {} ({}), minimum at ({}, {})",
        gd.surface.name(),
        gd.surface.description(),
        gd.surface.minimum().x,
        gd.surface.minimum().y
    );
    println!(
        "Start ({}, {}), learning rate {}\n",
        gd.start[0], gd.start[1], gd.learning_rate
    );

    for kind in OptimizerKind::ALL {
        let mut run_config = gd.clone();
        run_config.optimizer = kind;
        let mut run = match DescentRun::new(&run_config) {
            Ok(run) => run,
            Err(err) => {
                eprintln!("Could not start {}: {}", kind.name(), err);
                process::exit(1);
            }
        };

        let start = Instant::now();
        let report = run.run_to_completion();
        let elapsed = start.elapsed().as_secs_f64() * 1000.0;

        let outcome = match report.status {
            RunStatus::Diverged => "diverged",
            _ if report.loss < gd.loss_threshold => "converged",
            _ => "hit iteration cap",
        };
        println!(
            "{:<9} {:<17} iterations: {:>5}  loss: {:>12.6}  point: ({:.4}, {:.4})  [{:.2} ms]",
            kind.name(),
            outcome,
            report.iteration,
            report.loss,
            report.point.x,
            report.point.y,
            elapsed
        );
    }
}
