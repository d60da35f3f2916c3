use tracing::instrument;
use uuid::Uuid;

use crate::errors::{StoreError, StoreResult};
use crate::store::TagStore;

/// Builds a populated [`TagStore`] from slash-separated tag specs.
///
/// A spec like `work/urgent/today` creates each segment as a tag with
/// the preceding segment as its parent. Specs share structure through
/// the store's idempotent creation: `work/urgent` and `work/later`
/// produce one `work` root with two children.
pub struct StoreBuilder {
    auto_color: bool,
}

impl Default for StoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StoreBuilder {
    pub fn new() -> Self {
        Self { auto_color: false }
    }

    /// Assign every newly created tag a generated distinct color.
    pub fn auto_color(mut self, enabled: bool) -> Self {
        self.auto_color = enabled;
        self
    }

    #[instrument(level = "debug", skip(self))]
    pub fn build_from_specs(&self, specs: &[String]) -> StoreResult<TagStore> {
        let mut store = TagStore::new();
        for spec in specs {
            self.add_spec(&mut store, spec)?;
        }
        Ok(store)
    }

    #[instrument(level = "trace", skip(self, store))]
    fn add_spec(&self, store: &mut TagStore, spec: &str) -> StoreResult<()> {
        if spec.trim().is_empty() {
            return Err(StoreError::InvalidSpec {
                spec: spec.to_string(),
                reason: "empty spec".to_string(),
            });
        }

        let mut parent: Option<Uuid> = None;
        for segment in spec.split('/') {
            let name = segment.trim();
            if name.is_empty() {
                return Err(StoreError::InvalidSpec {
                    spec: spec.to_string(),
                    reason: "empty path segment".to_string(),
                });
            }

            // An existing name is reused as-is, never reparented
            let created = !store.contains(name);
            let id = store.new_tag(name, parent).id();

            if self.auto_color && created {
                let color = store.generate_color();
                if let Ok(tag) = store.get_mut(name) {
                    tag.color = Some(color);
                }
            }

            parent = Some(id);
        }
        Ok(())
    }
}
