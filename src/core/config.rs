/// Query execution configuration
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub accumulator_shards: usize,  // shard count of the parallel scoring accumulator
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            accumulator_shards: num_cpus::get().max(1) * 16,
        }
    }
}
