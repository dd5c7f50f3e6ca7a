use std::collections::VecDeque;

use super::EmotionObservation;

/// Bounded newest-first ring of recent observations. Inserting at capacity
/// evicts the oldest entry; entries are never mutated in place.
#[derive(Debug, Clone)]
pub struct EmotionHistory {
    entries: VecDeque<EmotionObservation>,
    capacity: usize,
}

impl EmotionHistory {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn record(&mut self, observation: EmotionObservation) {
        self.entries.push_front(observation);
        self.entries.truncate(self.capacity);
    }

    /// Most recent observation, if any.
    pub fn latest(&self) -> Option<&EmotionObservation> {
        self.entries.front()
    }

    pub fn newest_first(&self) -> Vec<EmotionObservation> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::emotion::Emotion;

    fn observation(confidence: f64) -> EmotionObservation {
        EmotionObservation {
            emotion: Emotion::Happy,
            confidence,
            observed_at: Utc::now(),
        }
    }

    #[test]
    fn never_exceeds_capacity() {
        let mut history = EmotionHistory::new(5);
        for i in 0..12 {
            history.record(observation(i as f64 / 100.0));
        }
        assert_eq!(history.len(), 5);
    }

    #[test]
    fn keeps_exactly_the_most_recent_entries_newest_first() {
        let mut history = EmotionHistory::new(3);
        for i in 1..=5 {
            history.record(observation(i as f64 / 10.0));
        }
        let confidences: Vec<f64> = history
            .newest_first()
            .iter()
            .map(|o| o.confidence)
            .collect();
        assert_eq!(confidences, vec![0.5, 0.4, 0.3]);
        assert_eq!(history.latest().unwrap().confidence, 0.5);
    }

    #[test]
    fn zero_capacity_is_clamped_to_one() {
        let mut history = EmotionHistory::new(0);
        history.record(observation(0.9));
        history.record(observation(0.8));
        assert_eq!(history.len(), 1);
        assert_eq!(history.latest().unwrap().confidence, 0.8);
    }
}
