use tablekit_core::{EntityKind, EntityRef, FloorPlan};

/// Tracks the single selected entity of the canvas.
///
/// `SelectionManager` is responsible for:
/// - Remembering which table or obstacle is selected, if any
/// - Answering "is this entity selected" for rendering
/// - Dropping a selection whose entity no longer exists
///
/// # Selection Model
///
/// - **Single selection**: at most one `(id, kind)` pair is selected
/// - **Transient**: the selection is never persisted with the plan
/// - **Stale references**: a selection may outlive its entity (e.g. after
///   an undo); [`SelectionManager::prune`] clears it against a plan
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionManager {
    /// The selected entity, if any
    selected: Option<EntityRef>,
}

impl SelectionManager {
    /// Creates a new `SelectionManager` with no selection.
    ///
    /// # Examples
    ///
    /// ```
    /// use tablekit_designer::selection_manager::SelectionManager;
    ///
    /// let manager = SelectionManager::new();
    /// assert_eq!(manager.selected(), None);
    /// ```
    pub fn new() -> Self {
        Self { selected: None }
    }

    /// Returns the selected entity.
    pub fn selected(&self) -> Option<&EntityRef> {
        self.selected.as_ref()
    }

    /// Returns the selected entity id when it has the given kind.
    pub fn selected_id_of(&self, kind: EntityKind) -> Option<&str> {
        self.selected
            .as_ref()
            .filter(|entity| entity.kind == kind)
            .map(|entity| entity.id.as_str())
    }

    /// Replaces the selection.
    pub fn select(&mut self, entity: EntityRef) {
        self.selected = Some(entity);
    }

    /// Clears the selection.
    ///
    /// # Returns
    ///
    /// `true` if something was selected before the call.
    pub fn deselect(&mut self) -> bool {
        self.selected.take().is_some()
    }

    /// Removes and returns the selection.
    pub fn take(&mut self) -> Option<EntityRef> {
        self.selected.take()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.as_ref().is_some_and(|entity| entity.id == id)
    }

    pub fn has_selection(&self) -> bool {
        self.selected.is_some()
    }

    /// Clears the selection if its entity is not part of `plan`.
    ///
    /// # Returns
    ///
    /// `true` if a stale selection was dropped.
    pub fn prune(&mut self, plan: Option<&FloorPlan>) -> bool {
        let Some(entity) = &self.selected else {
            return false;
        };
        let exists = plan.is_some_and(|plan| match entity.kind {
            EntityKind::Table => plan.table(&entity.id).is_some(),
            EntityKind::Obstacle => plan.obstacle(&entity.id).is_some(),
        });
        if !exists {
            self.selected = None;
        }
        !exists
    }
}
