use std::sync::Arc;

use bon::Builder;

use crate::missing::{MissingIndicator, MissingTokens};

/// The capacity a column is allocated with when none is given.
pub const DEFAULT_CAPACITY: usize = 128;
/// The headroom left behind by [IntColumn::compact](crate::IntColumn::compact).
pub const COMPACTION_SLACK: usize = 100;

fn default_missing_indicators() -> Arc<dyn MissingIndicator> {
    Arc::new(MissingTokens::default())
}

#[derive(Debug, Clone, Builder)]
/// Configuration options shared by a column and every copy made from it.
///
/// These have sane defaults, most callers only want to adjust the
/// missing value tokens to match the input data.
pub struct ColumnConfig {
    #[builder(default = DEFAULT_CAPACITY)]
    /// The capacity new and cleared columns are allocated with.
    pub default_capacity: usize,
    #[builder(default = COMPACTION_SLACK)]
    /// The number of spare slots kept after a compaction.
    pub compaction_slack: usize,
    #[builder(default = default_missing_indicators())]
    /// Recognises cell text that should be ingested as a missing value.
    pub missing_indicators: Arc<dyn MissingIndicator>,
    #[builder(default = true)]
    /// Whether an absent cell is ingested as a missing value.
    ///
    /// When `false` absent cells are rejected with [ColumnError::NullCell](crate::ColumnError::NullCell).
    pub null_as_missing: bool,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
