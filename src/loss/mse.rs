pub struct MseLoss;

impl MseLoss {
    /// Squared error of one example, summed over outputs (not divided by
    /// the output width).
    pub fn loss(predicted: &[f32], expected: &[f32]) -> f32 {
        predicted.iter().zip(expected.iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum()
    }
}
