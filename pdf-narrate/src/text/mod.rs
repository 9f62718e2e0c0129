//! Text processing module: unit splitting, normalization, and batch grouping.

pub mod segmenter;

pub use segmenter::segment;

/// A group of consecutive units submitted to the synthesizer together.
#[derive(Debug, Clone)]
pub struct Batch {
    /// 1-based position in the run; also the artifact index
    pub index: usize,
    /// Normalized sentence fragments, in source order
    pub units: Vec<String>,
}

impl Batch {
    /// Create a new batch.
    pub fn new(index: usize, units: Vec<String>) -> Self {
        Self { index, units }
    }

    /// The request payload: units joined with a literal comma.
    pub fn payload(&self) -> String {
        self.units.join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_joins_with_comma() {
        let batch = Batch::new(1, vec!["one".to_string(), "two".to_string()]);
        assert_eq!(batch.payload(), "one,two");
    }

    #[test]
    fn test_payload_single_unit() {
        let batch = Batch::new(2, vec!["only".to_string()]);
        assert_eq!(batch.payload(), "only");
    }
}
