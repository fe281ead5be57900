//! Upload progress reporting.
//!
//! Uploads are sent as a single request body, so progress is coarse: a
//! completed upload reports one event at 100%. Failed uploads report nothing.

/// Progress callback for upload operations.
pub type ProgressCallback<'a> = dyn Fn(TransferProgress) + Send + Sync + 'a;

/// Transfer progress information.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferProgress {
    /// Total bytes to transfer.
    pub total_bytes: u64,
    /// Bytes transferred so far.
    pub transferred_bytes: u64,
}

impl TransferProgress {
    /// Progress for a finished transfer of `total_bytes`.
    pub fn complete(total_bytes: u64) -> Self {
        Self {
            total_bytes,
            transferred_bytes: total_bytes,
        }
    }

    /// Calculate the progress percentage.
    pub fn percentage(&self) -> f64 {
        if self.total_bytes == 0 {
            100.0
        } else {
            (self.transferred_bytes as f64 / self.total_bytes as f64) * 100.0
        }
    }

    /// Whether the transfer has finished.
    pub fn is_complete(&self) -> bool {
        self.transferred_bytes >= self.total_bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_is_one_hundred_percent() {
        let progress = TransferProgress::complete(2048);
        assert_eq!(progress.percentage(), 100.0);
        assert!(progress.is_complete());
    }

    #[test]
    fn test_empty_transfer_is_complete() {
        assert_eq!(TransferProgress::complete(0).percentage(), 100.0);
    }

    #[test]
    fn test_partial_percentage() {
        let progress = TransferProgress {
            total_bytes: 200,
            transferred_bytes: 50,
        };
        assert_eq!(progress.percentage(), 25.0);
        assert!(!progress.is_complete());
    }
}
