use std::sync::mpsc;
use std::thread;

use ferrite_playground::{Playground, PlaygroundConfig, PlaygroundError, RunControl};
use tracing_subscriber::EnvFilter;

const SEED: u64 = 42;
const ITERATIONS: usize = 200;
const REPORT_EVERY: usize = 20;

// Trains the default circle playground on a worker thread and prints the
// loss curve as it arrives. Set RUST_LOG=debug for per-iteration logs.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = PlaygroundConfig::default().with_seed(SEED);
    println!("ferrite-playground demo");
    println!("dataset : {} x {} (noise {}%)",
        config.dataset.shape, config.dataset.sample_count, config.dataset.noise.as_percent());
    println!("model   : hidden {:?}, {:?}, lr {}",
        config.model.hidden_layers, config.model.activation, config.model.learning_rate);
    println!();

    let (tx, rx) = mpsc::channel();
    let worker = thread::spawn(move || -> Result<Playground, PlaygroundError> {
        let mut playground = Playground::new(&config)?;
        playground.run(ITERATIONS, &RunControl::new().with_progress(tx))?;
        Ok(playground)
    });

    for stats in rx {
        if stats.iteration % REPORT_EVERY == 0 || stats.iteration == 1 {
            println!(
                "iter {:>4}  train loss {:.4}  test loss {:.4}  train acc {:.1}%  test acc {:.1}%",
                stats.iteration,
                stats.train_loss,
                stats.test_loss,
                stats.train_accuracy * 100.0,
                stats.test_accuracy * 100.0,
            );
        }
    }

    let playground = worker.join().map_err(|_| "training thread panicked")??;
    let grid = playground.decision_grid(8)?;
    println!();
    println!("decision boundary (8x8, top row = max y):");
    for row in grid.classes.iter().rev() {
        let line: String = row.iter().map(|&c| if c == 0 { '.' } else { '#' }).collect();
        println!("  {line}");
    }
    Ok(())
}
