/// Routes low-certainty classifications to the fact-checker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceGate {
    threshold: f32,
}

impl ConfidenceGate {
    pub const DEFAULT_THRESHOLD: f32 = 0.70;

    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Strictly below the threshold escalates; equal does not.
    pub fn needs_verification(&self, confidence: f32) -> bool {
        confidence < self.threshold
    }
}

impl Default for ConfidenceGate {
    fn default() -> Self {
        Self::new(Self::DEFAULT_THRESHOLD)
    }
}
