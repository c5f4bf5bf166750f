use crate::core::card_model::CardModel;
use crate::domain::model::{CardContent, CardDesign};
use crate::domain::ports::QrEncoder;
use std::sync::Arc;
use tokio::sync::watch;

/// Immutable view of everything the user has edited so far.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardSnapshot {
    pub design: CardDesign,
    pub content: CardContent,
}

/// Holds the current snapshot and tells subscribers whenever an edit lands.
pub struct CardStore {
    tx: watch::Sender<Arc<CardSnapshot>>,
}

impl CardStore {
    pub fn new(initial: CardSnapshot) -> Self {
        let (tx, _rx) = watch::channel(Arc::new(initial));
        Self { tx }
    }

    pub fn snapshot(&self) -> Arc<CardSnapshot> {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<CardSnapshot>> {
        self.tx.subscribe()
    }

    /// Apply an edit to a copy of the current snapshot. Subscribers are only woken when
    /// the edit changed something.
    pub fn update(&self, edit: impl FnOnce(&mut CardSnapshot)) {
        self.tx.send_if_modified(|current| {
            let mut next = CardSnapshot::clone(current);
            edit(&mut next);
            if next == **current {
                return false;
            }
            *current = Arc::new(next);
            true
        });
    }
}

impl Default for CardStore {
    fn default() -> Self {
        Self::new(CardSnapshot::default())
    }
}

/// Recomputes the preview model only when the snapshot actually changed.
pub struct PreviewCache<E: QrEncoder> {
    encoder: E,
    cached: Option<(Arc<CardSnapshot>, Arc<CardModel>)>,
}

impl<E: QrEncoder> PreviewCache<E> {
    pub fn new(encoder: E) -> Self {
        Self {
            encoder,
            cached: None,
        }
    }

    pub fn model(&mut self, snapshot: &Arc<CardSnapshot>) -> Arc<CardModel> {
        if let Some((seen, model)) = &self.cached {
            if Arc::ptr_eq(seen, snapshot) || **seen == **snapshot {
                return model.clone();
            }
        }

        tracing::debug!("card snapshot changed, rebuilding preview model");
        let model = Arc::new(CardModel::build(
            &snapshot.design,
            &snapshot.content,
            &self.encoder,
        ));
        self.cached = Some((snapshot.clone(), model.clone()));
        model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::card_model::tests::FakeEncoder;
    use crate::domain::model::FieldId;

    #[tokio::test]
    async fn test_subscribers_see_edits() {
        let store = CardStore::default();
        let mut rx = store.subscribe();

        store.update(|s| s.content.name = "Alex".to_string());
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().content.name, "Alex");

        // no-op edit doesn't notify
        store.update(|s| s.content.name = "Alex".to_string());
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_fillet_edit_is_clamped_in_store() {
        let store = CardStore::default();
        store.update(|s| s.design.set_fillet_radius(99.0));
        assert_eq!(store.snapshot().design.fillet_radius(), 27.0);
    }

    #[test]
    fn test_preview_cache_reuses_model() {
        let store = CardStore::default();
        let mut cache = PreviewCache::new(FakeEncoder);

        let first = cache.model(&store.snapshot());
        let again = cache.model(&store.snapshot());
        assert!(Arc::ptr_eq(&first, &again));

        store.update(|s| s.content.job_title = "Prototyper".to_string());
        let rebuilt = cache.model(&store.snapshot());
        assert!(!Arc::ptr_eq(&first, &rebuilt));
        assert_eq!(rebuilt.text(FieldId::JobTitle).unwrap().text, "Prototyper");
    }
}
