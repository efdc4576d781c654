use burn::data::dataset::Dataset;

use crate::domain::task_sample::TaskSample;

/// Rows the demo keeps from the transformed data
pub const DEMO_DATASET_SIZE: usize = 100;

/// A bounded, indexable view over preprocessed samples.
pub struct TaskDataset {
    samples: Vec<TaskSample>,
}

impl TaskDataset {
    pub fn new(samples: Vec<TaskSample>) -> Self { Self { samples } }

    pub fn samples(&self) -> &[TaskSample] { &self.samples }
}

impl Dataset<TaskSample> for TaskDataset {
    fn get(&self, index: usize) -> Option<TaskSample> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indexing() {
        let samples: Vec<TaskSample> = (0..3)
            .map(|i| TaskSample::new(format!("text {i}"), "0"))
            .collect();
        let dataset = TaskDataset::new(samples);

        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.get(0).unwrap().source, "text 0");
        assert_eq!(dataset.get(2).unwrap().source, "text 2");
        assert!(dataset.get(3).is_none());
    }
}
