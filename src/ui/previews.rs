/// Decoded image handles for everything on screen
///
/// Payloads are data URIs; turning them into texture handles means a base64
/// decode, so handles are cached per payload and dropped once the payload
/// is no longer shown.

use iced::widget::image::Handle;
use tracing::warn;

use crate::source::ImagePayload;
use crate::state::{Slot, TryOnWorkflow};

#[derive(Debug, Default)]
struct HandleCache {
    entries: Vec<(ImagePayload, Handle)>,
}

impl HandleCache {
    fn handle(&mut self, payload: &ImagePayload) -> Option<Handle> {
        if let Some((_, handle)) = self.entries.iter().find(|(p, _)| p == payload) {
            return Some(handle.clone());
        }

        let bytes = match payload.decode() {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("⚠️  Cannot preview {}: {}", payload, e);
                return None;
            }
        };

        let handle = Handle::from_bytes(bytes);
        self.entries.push((payload.clone(), handle.clone()));
        Some(handle)
    }

    fn retain(&mut self, live: &[&ImagePayload]) {
        self.entries.retain(|(payload, _)| live.contains(&payload));
    }
}

/// Handles for the current inputs, result and recent creations
#[derive(Debug, Default)]
pub struct Previews {
    pub model: Option<Handle>,
    pub item: Option<Handle>,
    pub result: Option<Handle>,
    pub recent: Vec<Handle>,
    cache: HandleCache,
    /// Workflow revision the handles were built from
    revision: Option<u64>,
}

impl Previews {
    pub fn slot(&self, slot: Slot) -> Option<&Handle> {
        match slot {
            Slot::Model => self.model.as_ref(),
            Slot::Item => self.item.as_ref(),
        }
    }

    /// Bring the handles in line with the workflow
    pub fn refresh(&mut self, workflow: &TryOnWorkflow) {
        if self.revision == Some(workflow.revision()) {
            return;
        }
        self.revision = Some(workflow.revision());

        let model = workflow.image(Slot::Model);
        let item = workflow.image(Slot::Item);
        let result = workflow.result();
        let recent: Vec<&ImagePayload> = workflow.recent().list().collect();

        self.model = model.and_then(|p| self.cache.handle(p));
        self.item = item.and_then(|p| self.cache.handle(p));
        self.result = result.and_then(|p| self.cache.handle(p));
        self.recent = recent.iter().filter_map(|p| self.cache.handle(p)).collect();

        let live: Vec<&ImagePayload> = model
            .into_iter()
            .chain(item)
            .chain(result)
            .chain(recent.iter().copied())
            .collect();
        self.cache.retain(&live);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(tag: &str) -> ImagePayload {
        ImagePayload::from_bytes("image/png", tag.as_bytes())
    }

    #[test]
    fn test_refresh_tracks_slots() {
        let mut workflow = TryOnWorkflow::new();
        workflow.set_model_image(Some(payload("model")));

        let mut previews = Previews::default();
        previews.refresh(&workflow);
        assert!(previews.slot(Slot::Model).is_some());
        assert!(previews.slot(Slot::Item).is_none());

        workflow.set_model_image(None);
        previews.refresh(&workflow);
        assert!(previews.model.is_none());
        assert!(previews.cache.entries.is_empty());
    }

    #[test]
    fn test_unchanged_payload_reuses_handle() {
        let mut workflow = TryOnWorkflow::new();
        workflow.set_item_image(Some(payload("item")));

        let mut previews = Previews::default();
        previews.refresh(&workflow);
        let first = previews.item.clone().unwrap();
        previews.refresh(&workflow);
        let second = previews.item.clone().unwrap();

        assert_eq!(first.id(), second.id());
    }

    #[test]
    fn test_undecodable_payload_has_no_preview() {
        let mut workflow = TryOnWorkflow::new();
        workflow.set_model_image(Some(ImagePayload::from_data_uri("https://example.org/a.png")));

        let mut previews = Previews::default();
        previews.refresh(&workflow);
        assert!(previews.model.is_none());
    }

    #[test]
    fn test_refresh_skips_unchanged_workflow() {
        let mut workflow = TryOnWorkflow::new();
        workflow.set_model_image(Some(payload("model")));

        let mut previews = Previews::default();
        previews.refresh(&workflow);
        previews.cache.entries.clear();

        previews.refresh(&workflow);
        assert!(previews.cache.entries.is_empty());

        workflow.set_item_image(Some(payload("item")));
        previews.refresh(&workflow);
        assert_eq!(previews.cache.entries.len(), 2);
    }
}
