/// How mapping-shaped updates combine with the current snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MergePolicy {
    /// Nested mappings are overlaid recursively.
    #[default]
    Deep,
    /// Only the top level is overlaid; nested mappings are replaced wholesale.
    Shallow,
}

/// Store configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StoreConfig {
    pub merge: MergePolicy,
}

impl StoreConfig {
    /// Set the merge policy.
    pub fn merge_policy(mut self, merge: MergePolicy) -> Self {
        self.merge = merge;
        self
    }
}
