use super::evolution_engine::ProgressCallback;

/// Reports progress through the `log` facade
pub struct LogProgressCallback;

impl ProgressCallback for LogProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        log::debug!("Generation {} starting...", generation + 1);
    }

    fn on_generation_complete(&mut self, generation: usize, best_fitness: f64, avg_fitness: f64) {
        log::info!(
            "Generation {} complete. Best fitness: {:.4}, Avg fitness: {:.4}",
            generation + 1,
            best_fitness,
            avg_fitness
        );
    }
}

/// Discards all progress reports
pub struct NullProgressCallback;

impl ProgressCallback for NullProgressCallback {
    fn on_generation_start(&mut self, _generation: usize) {}

    fn on_generation_complete(&mut self, _generation: usize, _best_fitness: f64, _avg_fitness: f64) {}
}
