/// Per-iteration statistics emitted by `train_loop`.
///
/// When a `progress_tx` channel is configured in `TrainConfig`, the loop sends
/// one `IterationStats` after every completed estimate-and-update step.
#[derive(Debug, Clone)]
pub struct IterationStats {
    /// 1-based iteration number.
    pub iteration: usize,
    /// Cost after this iteration's update.
    pub cost: f32,
    /// Wall-clock duration of this iteration in microseconds.
    pub elapsed_us: u64,
}
