//! Incremental learner hook
//!
//! Gantree: L4_Learn → LearnerBridge
//!
//! Measurement samples are buffered and handed to an external incremental
//! learner in batches. The label set goes out with the first batch only.

use crate::config::LearnerConfig;
use pandora_core::{PandoraError, PandoraResult};
use std::collections::BTreeMap;
use std::fmt;

/// Anything that can be trained one batch at a time
/// Gantree: IncrementalLearner // 점진 학습기
pub trait IncrementalLearner: Send {
    /// Train on one batch. `classes` is `Some` on the first call only.
    fn partial_fit(
        &mut self,
        features: &[Vec<f64>],
        labels: &[String],
        classes: Option<&[String]>,
    ) -> PandoraResult<()>;
}

/// Buffers samples for an [`IncrementalLearner`]
/// Gantree: LearnerBridge // 학습 브리지
pub struct LearnerBridge {
    config: LearnerConfig,
    learner: Option<Box<dyn IncrementalLearner>>,
    features: Vec<Vec<f64>>,
    labels: Vec<String>,
    classes_sent: bool,
    batches_trained: usize,
}

impl LearnerBridge {
    /// Bridge without a learner; samples are ignored until one is set
    pub fn new(config: LearnerConfig) -> PandoraResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            learner: None,
            features: Vec::new(),
            labels: Vec::new(),
            classes_sent: false,
            batches_trained: 0,
        })
    }

    /// Bridge feeding `learner`
    pub fn with_learner(
        config: LearnerConfig,
        learner: Box<dyn IncrementalLearner>,
    ) -> PandoraResult<Self> {
        let mut bridge = Self::new(config)?;
        bridge.learner = Some(learner);
        Ok(bridge)
    }

    /// Replace the learner. The next batch carries the label set again.
    pub fn set_learner(&mut self, learner: Box<dyn IncrementalLearner>) {
        self.learner = Some(learner);
        self.classes_sent = false;
    }

    /// Buffer one sample; trains when the buffer fills and `train_on_fly`
    /// is set. Returns whether a batch was trained.
    /// Gantree: observe(features,label) -> Result<bool> // 샘플 추가
    pub fn observe(&mut self, features: Vec<f64>, label: &str) -> PandoraResult<bool> {
        if self.learner.is_none() {
            return Ok(false);
        }
        if !self.accepts(label) {
            return Err(PandoraError::LearnerError(format!(
                "label '{}' is not one of [{}]",
                label,
                self.config.classes.join(", ")
            )));
        }

        self.features.push(features);
        self.labels.push(label.to_string());

        if self.config.train_on_fly && self.features.len() >= self.config.buffer_size {
            return self.flush();
        }
        Ok(false)
    }

    /// Whether `label` is in the configured label set (an empty set accepts all)
    pub fn accepts(&self, label: &str) -> bool {
        self.config.classes.is_empty() || self.config.classes.iter().any(|c| c == label)
    }

    /// Train on whatever is buffered. The buffer is kept if training fails.
    /// Gantree: flush() -> Result<bool> // 배치 학습
    pub fn flush(&mut self) -> PandoraResult<bool> {
        let learner = match self.learner.as_mut() {
            Some(l) if !self.features.is_empty() => l,
            _ => return Ok(false),
        };

        let classes = if self.classes_sent {
            None
        } else {
            Some(self.config.classes.as_slice())
        };
        learner.partial_fit(&self.features, &self.labels, classes)?;

        log::debug!(
            "Trained incremental learner on {} samples (batch {})",
            self.features.len(),
            self.batches_trained + 1
        );
        self.features.clear();
        self.labels.clear();
        self.classes_sent = true;
        self.batches_trained += 1;
        Ok(true)
    }

    /// Whether a learner is attached
    pub fn is_enabled(&self) -> bool {
        self.learner.is_some()
    }

    /// Samples waiting for the next batch
    pub fn buffered(&self) -> usize {
        self.features.len()
    }

    /// Batches handed to the learner so far
    pub fn batches_trained(&self) -> usize {
        self.batches_trained
    }

    /// Configuration
    pub fn config(&self) -> &LearnerConfig {
        &self.config
    }
}

impl fmt::Debug for LearnerBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LearnerBridge")
            .field("config", &self.config)
            .field("enabled", &self.learner.is_some())
            .field("buffered", &self.features.len())
            .field("batches_trained", &self.batches_trained)
            .finish()
    }
}

// ============================================================================
// Built-in learner
// ============================================================================

/// Per-label running mean of feature vectors
/// Gantree: PatternLearner // 패턴 학습기
#[derive(Debug, Clone, Default)]
pub struct PatternLearner {
    classes: Vec<String>,
    sums: BTreeMap<String, Vec<f64>>,
    counts: BTreeMap<String, usize>,
    calls: usize,
}

impl PatternLearner {
    /// Empty learner
    pub fn new() -> Self {
        Self::default()
    }

    /// Label set received with the first batch
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Number of `partial_fit` calls
    pub fn calls(&self) -> usize {
        self.calls
    }

    /// Samples seen for `label`
    pub fn count(&self, label: &str) -> usize {
        self.counts.get(label).copied().unwrap_or(0)
    }

    /// Mean feature vector for `label`
    pub fn centroid(&self, label: &str) -> Option<Vec<f64>> {
        let n = *self.counts.get(label)? as f64;
        self.sums
            .get(label)
            .map(|sum| sum.iter().map(|s| s / n).collect())
    }

    /// Nearest centroid label
    pub fn predict(&self, features: &[f64]) -> Option<&str> {
        self.counts
            .keys()
            .filter_map(|label| {
                let c = self.centroid(label)?;
                let d: f64 = c.iter().zip(features).map(|(a, b)| (a - b).powi(2)).sum();
                Some((label.as_str(), d))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(label, _)| label)
    }
}

impl IncrementalLearner for PatternLearner {
    fn partial_fit(
        &mut self,
        features: &[Vec<f64>],
        labels: &[String],
        classes: Option<&[String]>,
    ) -> PandoraResult<()> {
        if features.len() != labels.len() {
            return Err(PandoraError::LearnerError(format!(
                "{} feature rows but {} labels",
                features.len(),
                labels.len()
            )));
        }
        // Widths are checked for the whole batch before any row is folded in
        let mut widths: BTreeMap<&str, usize> = BTreeMap::new();
        for (row, label) in features.iter().zip(labels) {
            let expected = match self.sums.get(label) {
                Some(sum) => sum.len(),
                None => *widths.entry(label.as_str()).or_insert(row.len()),
            };
            if expected != row.len() {
                return Err(PandoraError::LearnerError(format!(
                    "feature width {} differs from {} seen for '{}'",
                    row.len(),
                    expected,
                    label
                )));
            }
        }

        if let Some(classes) = classes {
            self.classes = classes.to_vec();
        }
        for (row, label) in features.iter().zip(labels) {
            let sum = self
                .sums
                .entry(label.clone())
                .or_insert_with(|| vec![0.0; row.len()]);
            for (s, v) in sum.iter_mut().zip(row) {
                *s += v;
            }
            *self.counts.entry(label.clone()).or_insert(0) += 1;
        }
        self.calls += 1;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Records every call for inspection
    #[derive(Default)]
    struct Recorder {
        calls: Arc<Mutex<Vec<(usize, Option<Vec<String>>)>>>,
    }

    impl IncrementalLearner for Recorder {
        fn partial_fit(
            &mut self,
            features: &[Vec<f64>],
            _labels: &[String],
            classes: Option<&[String]>,
        ) -> PandoraResult<()> {
            self.calls
                .lock()
                .unwrap()
                .push((features.len(), classes.map(|c| c.to_vec())));
            Ok(())
        }
    }

    fn config(buffer: usize) -> LearnerConfig {
        LearnerConfig::default()
            .with_buffer_size(buffer)
            .with_classes(["measurement", "learned"])
    }

    #[test]
    fn test_no_learner_disables_buffering() {
        let mut bridge = LearnerBridge::new(config(2)).unwrap();
        assert!(!bridge.observe(vec![1.0], "measurement").unwrap());
        assert_eq!(bridge.buffered(), 0);
        assert!(!bridge.is_enabled());
    }

    #[test]
    fn test_classes_first_batch_only() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let recorder = Recorder {
            calls: Arc::clone(&calls),
        };
        let mut bridge = LearnerBridge::with_learner(config(3), Box::new(recorder)).unwrap();

        let mut trained = 0;
        for i in 0..10 {
            if bridge.observe(vec![i as f64], "measurement").unwrap() {
                trained += 1;
            }
        }
        assert_eq!(trained, 3);
        assert_eq!(bridge.buffered(), 1);
        assert_eq!(bridge.batches_trained(), 3);

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0].0, 3);
        assert_eq!(
            calls[0].1,
            Some(vec!["measurement".to_string(), "learned".to_string()])
        );
        assert!(calls[1].1.is_none());
        assert!(calls[2].1.is_none());
    }

    #[test]
    fn test_manual_flush() {
        let mut bridge = LearnerBridge::with_learner(
            config(10).with_train_on_fly(false),
            Box::new(PatternLearner::new()),
        )
        .unwrap();
        for _ in 0..12 {
            assert!(!bridge.observe(vec![0.5], "learned").unwrap());
        }
        assert_eq!(bridge.buffered(), 12);
        assert!(bridge.flush().unwrap());
        assert_eq!(bridge.buffered(), 0);
        assert!(!bridge.flush().unwrap());
    }

    #[test]
    fn test_unknown_label() {
        let mut bridge =
            LearnerBridge::with_learner(config(2), Box::new(PatternLearner::new())).unwrap();
        let err = bridge.observe(vec![0.0], "gossip").unwrap_err();
        assert!(matches!(err, PandoraError::LearnerError(_)));
    }

    #[test]
    fn test_pattern_learner() {
        let mut learner = PatternLearner::new();
        let classes = vec!["low".to_string(), "high".to_string()];
        learner
            .partial_fit(
                &[vec![0.0, 1.0], vec![2.0, 3.0], vec![10.0, 10.0]],
                &["low".to_string(), "low".to_string(), "high".to_string()],
                Some(&classes),
            )
            .unwrap();
        assert_eq!(learner.classes(), classes.as_slice());
        assert_eq!(learner.count("low"), 2);
        assert_eq!(learner.centroid("low").unwrap(), vec![1.0, 2.0]);
        assert_eq!(learner.predict(&[9.0, 9.5]), Some("high"));
        assert_eq!(learner.calls(), 1);

        assert!(learner
            .partial_fit(&[vec![1.0]], &["low".to_string()], None)
            .is_err());
    }

    #[test]
    fn test_rejected_batch_leaves_learner_untouched() {
        let mut learner = PatternLearner::new();
        let low = || "low".to_string();
        learner.partial_fit(&[vec![1.0, 1.0]], &[low()], None).unwrap();

        // Second row has the wrong width; the first must not be counted either
        let batch = [vec![2.0, 2.0], vec![9.0]];
        for _ in 0..2 {
            assert!(learner.partial_fit(&batch, &[low(), low()], None).is_err());
            assert_eq!(learner.count("low"), 1);
            assert_eq!(learner.centroid("low").unwrap(), vec![1.0, 1.0]);
            assert_eq!(learner.calls(), 1);
        }

        // Mismatch inside a batch for a label not seen before
        let fresh = ["new".to_string(), "new".to_string()];
        assert!(learner
            .partial_fit(&[vec![0.0], vec![0.0, 0.0]], &fresh, Some(&fresh))
            .is_err());
        assert_eq!(learner.count("new"), 0);
        assert!(learner.classes().is_empty());
    }

    #[test]
    fn test_accepts() {
        let bridge =
            LearnerBridge::with_learner(config(2), Box::new(PatternLearner::new())).unwrap();
        assert!(bridge.accepts("learned"));
        assert!(!bridge.accepts("gossip"));
        let open =
            LearnerBridge::new(LearnerConfig::default().with_classes(Vec::<String>::new())).unwrap();
        assert!(open.accepts("anything"));
    }
}
