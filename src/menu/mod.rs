//! The palette switcher.
//!
//! [`PaletteMenu`] is a host-independent model of the floating menu: a
//! toggle, five swatches and exactly one active palette. Selections are
//! written to a [`PreferenceStore`] and forwarded to whatever implements
//! [`PaletteSink`], normally a [`Ready`] handle to the engine that may
//! still be initializing. Whatever the menu shows when that handle
//! resolves is what the renderer receives, so the two only disagree during
//! startup. The web front end renders [`PaletteMenu::markup`] and routes
//! clicks back into the model.

mod markup;
mod store;

use std::cell::Cell;
use std::rc::Rc;

pub use store::{FileStore, MemoryStore, PreferenceStore};

use crate::engine::Ready;
use crate::error::BackdropError;
use crate::palette::PaletteId;
use crate::scene::SceneState;

/// Storage key holding the last selected palette id.
pub const STORAGE_KEY: &str = "selectedPalette";

/// Something whose colors follow the selected palette.
pub trait PaletteTarget {
    /// Recolor to `id`.
    fn change_palette(&mut self, id: PaletteId);
}

impl PaletteTarget for SceneState {
    fn change_palette(&mut self, id: PaletteId) {
        self.apply_palette(id);
    }
}

/// The menu's live selection, shared with deferred forwards.
pub type Selection = Rc<Cell<PaletteId>>;

/// Where the menu sends palette changes.
pub trait PaletteSink {
    /// Forward a user selection. Returns `false` when the receiver is not
    /// ready and nothing was applied.
    fn apply_now(&self, id: PaletteId) -> bool;

    /// Apply `selection`, read at that moment, once the receiver is ready.
    fn apply_when_ready(&self, selection: Selection);
}

impl<T: PaletteTarget + 'static> PaletteSink for Ready<T> {
    fn apply_now(&self, id: PaletteId) -> bool {
        let applied = self.with(|target| target.change_palette(id)).is_some();
        if !applied {
            log::debug!("renderer not ready, {id} deferred");
        }
        applied
    }

    fn apply_when_ready(&self, selection: Selection) {
        self.when_ready(move |target| target.change_palette(selection.get()));
    }
}

/// One selectable palette as shown in the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Swatch {
    /// Palette this swatch selects.
    pub id: PaletteId,
    /// Tooltip text.
    pub title: &'static str,
    /// CSS gradient used as the swatch background.
    pub gradient: String,
}

impl Swatch {
    fn new(id: PaletteId) -> Self {
        let palette = id.palette();
        Self {
            id,
            title: palette.name,
            gradient: palette.preview_css(),
        }
    }
}

/// Menu state: panel visibility and the single active swatch.
pub struct PaletteMenu<S, K> {
    store: S,
    sink: K,
    open: bool,
    active: Selection,
    /// A deferred forward of `active` is queued on the sink.
    deferred: bool,
    swatches: Vec<Swatch>,
}

impl<S: PreferenceStore, K: PaletteSink> PaletteMenu<S, K> {
    /// Build the menu closed and restore the stored selection.
    ///
    /// A known stored id becomes active and the selection is forwarded to
    /// `sink` once it is ready. With nothing stored, or an unrecognized
    /// value, the default palette is active and `sink` is not called.
    pub fn new(store: S, sink: K) -> Self {
        let mut menu = Self {
            store,
            sink,
            open: false,
            active: Rc::new(Cell::new(PaletteId::default())),
            deferred: false,
            swatches: PaletteId::ALL.into_iter().map(Swatch::new).collect(),
        };
        menu.restore();
        menu
    }

    fn defer_forward(&mut self) {
        if !self.deferred {
            self.deferred = true;
            self.sink.apply_when_ready(Rc::clone(&self.active));
        }
    }

    fn restore(&mut self) {
        let Some(stored) = self.store.get(STORAGE_KEY) else {
            return;
        };
        match stored.parse::<PaletteId>() {
            Ok(id) => {
                self.active.set(id);
                self.defer_forward();
            }
            Err(e) => log::debug!("ignoring stored preference: {e}"),
        }
    }

    /// Show or hide the panel. Returns the new visibility.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// Whether the panel is shown.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The active palette.
    #[must_use]
    pub fn active(&self) -> PaletteId {
        self.active.get()
    }

    /// Make `id` the active palette, persist it and forward it.
    ///
    /// A failed write is logged; the selection still takes effect. When the
    /// sink is not ready yet the forward waits for it.
    pub fn select(&mut self, id: PaletteId) {
        self.active.set(id);
        if let Err(e) = self.store.set(STORAGE_KEY, id.key()) {
            log::warn!("could not persist palette preference: {e}");
        }
        if !self.sink.apply_now(id) {
            self.defer_forward();
        }
    }

    /// [`select`](Self::select) from a `data-palette` value.
    ///
    /// # Errors
    ///
    /// Returns [`BackdropError::UnknownPalette`] for an unrecognized key;
    /// nothing is stored or forwarded.
    pub fn select_key(&mut self, key: &str) -> Result<PaletteId, BackdropError> {
        let id = key.parse()?;
        self.select(id);
        Ok(id)
    }

    /// The five swatches in menu order.
    #[must_use]
    pub fn swatches(&self) -> &[Swatch] {
        &self.swatches
    }

    /// The preference store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The palette sink.
    #[must_use]
    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// HTML for the current state.
    #[must_use]
    pub fn markup(&self) -> String {
        markup::render(&self.swatches, self.open, self.active().key())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    /// Records every forwarded id, split by path.
    #[derive(Default)]
    struct RecordingSink {
        /// Reject immediate forwards, as a sink still initializing does.
        pending: bool,
        now: RefCell<Vec<PaletteId>>,
        deferred: RefCell<Vec<Selection>>,
    }

    impl RecordingSink {
        fn pending() -> Self {
            Self {
                pending: true,
                ..Self::default()
            }
        }

        fn deferred_ids(&self) -> Vec<PaletteId> {
            self.deferred.borrow().iter().map(|s| s.get()).collect()
        }
    }

    impl PaletteSink for RecordingSink {
        fn apply_now(&self, id: PaletteId) -> bool {
            if self.pending {
                return false;
            }
            self.now.borrow_mut().push(id);
            true
        }

        fn apply_when_ready(&self, selection: Selection) {
            self.deferred.borrow_mut().push(selection);
        }
    }

    fn active_buttons(html: &str) -> usize {
        html.matches("class=\"active\"").count()
    }

    #[test]
    fn select_marks_one_swatch_and_stores_it() {
        let mut menu = PaletteMenu::new(MemoryStore::default(), RecordingSink::default());
        for id in PaletteId::ALL {
            menu.select(id);
            assert_eq!(menu.active(), id);
            assert_eq!(menu.store().get(STORAGE_KEY).as_deref(), Some(id.key()));

            let html = menu.markup();
            assert_eq!(active_buttons(&html), 1);
            let marker = format!("data-palette=\"{}\" class=\"active\"", id.key());
            assert!(html.contains(&marker), "{html}");
        }
        assert_eq!(*menu.sink().now.borrow(), PaletteId::ALL.to_vec());
        assert!(menu.sink().deferred.borrow().is_empty());
    }

    #[test]
    fn restore_applies_stored_palette_once_ready() {
        let store = MemoryStore::with_entry(STORAGE_KEY, "palette3");
        let menu = PaletteMenu::new(store, RecordingSink::default());
        assert_eq!(menu.active(), PaletteId::Palette3);
        assert_eq!(menu.sink().deferred_ids(), vec![PaletteId::Palette3]);
        assert!(menu.sink().now.borrow().is_empty());
    }

    #[test]
    fn selection_survives_a_reload() {
        let mut first = PaletteMenu::new(MemoryStore::default(), RecordingSink::default());
        first.select(PaletteId::Palette3);

        let reloaded = PaletteMenu::new(first.store().clone(), RecordingSink::default());
        assert_eq!(reloaded.active(), PaletteId::Palette3);
        assert_eq!(reloaded.sink().deferred_ids(), vec![PaletteId::Palette3]);
        assert!(reloaded.sink().now.borrow().is_empty());
        assert_eq!(active_buttons(&reloaded.markup()), 1);
    }

    #[test]
    fn restore_without_preference_defaults_silently() {
        let menu = PaletteMenu::new(MemoryStore::default(), RecordingSink::default());
        assert_eq!(menu.active(), PaletteId::Palette1);
        assert!(menu.sink().deferred.borrow().is_empty());
        assert!(menu.sink().now.borrow().is_empty());
    }

    #[test]
    fn restore_ignores_unknown_preference() {
        let store = MemoryStore::with_entry(STORAGE_KEY, "neon");
        let menu = PaletteMenu::new(store, RecordingSink::default());
        assert_eq!(menu.active(), PaletteId::Palette1);
        assert!(menu.sink().deferred.borrow().is_empty());
        assert_eq!(active_buttons(&menu.markup()), 1);
    }

    #[test]
    fn early_clicks_share_one_deferred_forward() {
        let store = MemoryStore::with_entry(STORAGE_KEY, "palette5");
        let mut menu = PaletteMenu::new(store, RecordingSink::pending());
        menu.select(PaletteId::Palette4);
        menu.select(PaletteId::Palette2);

        assert!(menu.sink().now.borrow().is_empty());
        assert_eq!(menu.sink().deferred_ids(), vec![PaletteId::Palette2]);
    }

    #[test]
    fn unknown_key_changes_nothing() {
        let mut menu = PaletteMenu::new(MemoryStore::default(), RecordingSink::default());
        menu.select(PaletteId::Palette2);
        let err = menu.select_key("palette7").unwrap_err();
        assert!(matches!(err, BackdropError::UnknownPalette(_)));
        assert_eq!(menu.active(), PaletteId::Palette2);
        assert_eq!(menu.store().get(STORAGE_KEY).as_deref(), Some("palette2"));
        assert_eq!(menu.sink().now.borrow().len(), 1);
    }

    #[test]
    fn toggle_flips_panel_markers() {
        let mut menu = PaletteMenu::new(MemoryStore::default(), RecordingSink::default());
        assert!(!menu.is_open());
        assert!(menu.markup().contains("class=\"palette-menu\""));

        assert!(menu.toggle());
        let html = menu.markup();
        assert!(html.contains("class=\"palette-toggle active\""));
        assert!(html.contains("class=\"palette-menu active\""));

        assert!(!menu.toggle());
        assert!(!menu.is_open());
    }

    #[test]
    fn markup_lists_every_palette_with_its_gradient() {
        let menu = PaletteMenu::new(MemoryStore::default(), RecordingSink::default());
        let html = menu.markup();
        assert!(html.starts_with("<div id=\"palette-switcher\">"));
        assert_eq!(html.matches("<button").count(), 5);
        assert!(html.contains(
            "data-palette=\"palette3\" title=\"Ocean\" \
             style=\"background: linear-gradient(135deg, #0077be 0%, #00c9ff 100%);\""
        ));
        assert_eq!(menu.swatches()[4].title, "Forest");
    }

    #[test]
    fn scene_matches_menu_after_clicks_before_ready() {
        let handle: Ready<SceneState> = Ready::pending();
        let store = MemoryStore::with_entry(STORAGE_KEY, "palette5");
        let mut menu = PaletteMenu::new(store, handle.clone());

        menu.select(PaletteId::Palette4);
        assert_eq!(menu.store().get(STORAGE_KEY).as_deref(), Some("palette4"));

        handle.resolve(SceneState::new(&crate::options::Options::default(), 100, 100));
        assert_eq!(handle.with(|s| s.palette()), Some(menu.active()));
        assert_eq!(menu.active(), PaletteId::Palette4);

        menu.select(PaletteId::Palette2);
        assert_eq!(handle.with(|s| s.palette()), Some(PaletteId::Palette2));
    }

    #[test]
    fn click_before_ready_without_preference_reaches_scene() {
        let handle: Ready<SceneState> = Ready::pending();
        let mut menu = PaletteMenu::new(MemoryStore::default(), handle.clone());
        menu.select(PaletteId::Palette3);

        handle.resolve(SceneState::new(&crate::options::Options::default(), 100, 100));
        assert_eq!(handle.with(|s| s.palette()), Some(PaletteId::Palette3));
    }
}
