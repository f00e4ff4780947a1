//! Two-level category navigation
//!
//! The controller is a state machine over the catalog: a display set of
//! sibling categories with exactly one "peeked" (active) entry, either at
//! the root level or drilled into one root's children. Level changes run
//! as fade-out / swap / fade-in transitions; while one is in flight every
//! mutating call is dropped, and the display-set swap is committed only
//! while the display is fully hidden.

use crate::catalog::{CategoryId, CategoryTree};
use crate::config::TransitionConfig;
use crate::scheduler::{StepTimer, TimerToken, TransitionStep};
use std::sync::Arc;
use std::time::Duration;

/// Navigation depth
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Root,
    Drilled,
}

/// Phase of the in-flight transition; `Idle` means unlocked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPhase {
    Idle,
    FadingOut,
    FadingIn,
}

/// What a `select_node` call did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Dropped: locked or unknown id (expected user-input race)
    Ignored,
    /// Active id moved within the current display set
    Peeked,
    /// Drill transition started; the swap commits when the fade-out ends
    DrillStarted,
    /// Active leaf selected again: caller should open the detail overlay
    OpenDetail(CategoryId),
}

/// What a `go_back` call did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackOutcome {
    Ignored,
    Started,
}

/// The swap a transition will commit once the display is hidden
struct PendingSwap {
    display: Vec<CategoryId>,
    level: Level,
    parent: Option<CategoryId>,
    active: CategoryId,
}

/// State machine over the category catalog
pub struct NavigationController {
    catalog: Arc<CategoryTree>,
    level: Level,
    display: Vec<CategoryId>,
    active: CategoryId,
    parent: Option<CategoryId>,
    phase: TransitionPhase,
    pending: Option<PendingSwap>,
    armed: Option<TimerToken>,
    fade_out: Duration,
    fade_in: Duration,
}

impl NavigationController {
    /// Start at the root level with the first root category peeked.
    /// The catalog guarantees at least one root.
    pub fn new(catalog: Arc<CategoryTree>, transition: &TransitionConfig) -> Self {
        let display = catalog.roots().to_vec();
        debug_assert!(!display.is_empty());
        let active = display[0];
        Self {
            catalog,
            level: Level::Root,
            display,
            active,
            parent: None,
            phase: TransitionPhase::Idle,
            pending: None,
            armed: None,
            fade_out: transition.fade_out(),
            fade_in: transition.fade_in(),
        }
    }

    /// Handle a click on a category card.
    ///
    /// Double clicks during an animation and clicks on ids that are not in
    /// the current display set are expected races and absorbed silently.
    pub fn select_node(&mut self, id: CategoryId, timer: &mut dyn StepTimer) -> SelectOutcome {
        if self.is_locked() {
            tracing::debug!(%id, "select dropped: transition in flight");
            return SelectOutcome::Ignored;
        }
        if !self.display.contains(&id) {
            tracing::debug!(%id, "select dropped: id not in display set");
            return SelectOutcome::Ignored;
        }

        if self.catalog.is_drillable(id) {
            if id == self.active {
                self.begin_drill(id, timer);
                SelectOutcome::DrillStarted
            } else {
                self.active = id;
                SelectOutcome::Peeked
            }
        } else if id == self.active {
            SelectOutcome::OpenDetail(id)
        } else {
            self.active = id;
            SelectOutcome::Peeked
        }
    }

    /// Return from the drilled level to the root display set.
    ///
    /// The node that was drilled into becomes the active root entry again.
    pub fn go_back(&mut self, timer: &mut dyn StepTimer) -> BackOutcome {
        if self.is_locked() {
            tracing::debug!("back dropped: transition in flight");
            return BackOutcome::Ignored;
        }
        let Some(parent) = self.parent else {
            return BackOutcome::Ignored;
        };
        debug_assert_eq!(self.level, Level::Drilled);

        self.begin_transition(
            PendingSwap {
                display: self.catalog.roots().to_vec(),
                level: Level::Root,
                parent: None,
                active: parent,
            },
            timer,
        );
        BackOutcome::Started
    }

    /// Advance the in-flight transition. Steps for a transition that was
    /// torn down or already completed are stale and ignored.
    pub fn on_step(&mut self, step: TransitionStep, timer: &mut dyn StepTimer) {
        match (self.phase, step) {
            (TransitionPhase::FadingOut, TransitionStep::CommitSwap) => {
                // The display is fully hidden here; this is the only place
                // the display set, level, parent and active id change
                // together.
                let Some(swap) = self.pending.take() else {
                    tracing::error!("fading out without a pending swap; unlocking");
                    self.phase = TransitionPhase::Idle;
                    self.armed = None;
                    return;
                };
                self.display = swap.display;
                self.level = swap.level;
                self.parent = swap.parent;
                self.active = swap.active;
                self.phase = TransitionPhase::FadingIn;
                self.armed = Some(timer.arm(self.fade_in, TransitionStep::FinishFadeIn));
            }
            (TransitionPhase::FadingIn, TransitionStep::FinishFadeIn) => {
                self.phase = TransitionPhase::Idle;
                self.armed = None;
            }
            (phase, step) => {
                tracing::debug!(?phase, ?step, "stale transition step ignored");
            }
        }
    }

    /// Cancel any in-flight transition and release the lock. Called on
    /// unmount; a pending swap must never commit against torn-down state.
    pub fn teardown(&mut self, timer: &mut dyn StepTimer) {
        if let Some(token) = self.armed.take() {
            timer.disarm(token);
        }
        self.pending = None;
        self.phase = TransitionPhase::Idle;
    }

    pub fn is_locked(&self) -> bool {
        self.phase != TransitionPhase::Idle
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    /// Ordered ids currently on display
    pub fn display(&self) -> &[CategoryId] {
        &self.display
    }

    pub fn active(&self) -> CategoryId {
        self.active
    }

    /// Root node drilled into, when at the drilled level
    pub fn parent(&self) -> Option<CategoryId> {
        self.parent
    }

    /// Context prompt above the cards
    pub fn prompt(&self) -> &'static str {
        match self.level {
            Level::Root => "Click on the cards to get a quick glance",
            Level::Drilled => {
                if self.parent_is_furniture() {
                    "Pick a Room"
                } else {
                    "Pick a Style"
                }
            }
        }
    }

    /// Card corner label at the drilled level
    pub fn sublevel_label(&self) -> Option<&'static str> {
        match self.level {
            Level::Root => None,
            Level::Drilled => {
                if self.parent_is_furniture() {
                    Some("ROOM")
                } else {
                    Some("STYLE")
                }
            }
        }
    }

    fn parent_is_furniture(&self) -> bool {
        self.parent
            .and_then(|id| self.catalog.get(id))
            .is_some_and(|n| n.title.eq_ignore_ascii_case("furniture"))
    }

    fn begin_drill(&mut self, id: CategoryId, timer: &mut dyn StepTimer) {
        let children = self.catalog.children_of(id).to_vec();
        debug_assert!(!children.is_empty(), "drill target validated as drillable");
        let active = children[0];
        self.begin_transition(
            PendingSwap {
                display: children,
                level: Level::Drilled,
                parent: Some(id),
                active,
            },
            timer,
        );
    }

    fn begin_transition(&mut self, swap: PendingSwap, timer: &mut dyn StepTimer) {
        self.pending = Some(swap);
        self.phase = TransitionPhase::FadingOut;
        self.armed = Some(timer.arm(self.fade_out, TransitionStep::CommitSwap));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{builtin_specs, CategorySpec};
    use crate::scheduler::ManualStepTimer;

    const KITCHEN: CategoryId = CategoryId(1);
    const FURNITURE: CategoryId = CategoryId(2);
    const LIGHT: CategoryId = CategoryId(3);
    const MODERN: CategoryId = CategoryId(101);
    const TRADITIONAL: CategoryId = CategoryId(102);

    fn controller() -> (NavigationController, ManualStepTimer) {
        let catalog = Arc::new(CategoryTree::from_specs(&builtin_specs()).unwrap());
        (
            NavigationController::new(catalog, &TransitionConfig::default()),
            ManualStepTimer::new(),
        )
    }

    /// Drive a started transition to completion
    fn finish_transition(nav: &mut NavigationController, timer: &mut ManualStepTimer) {
        while let Some(step) = timer.fire_next() {
            nav.on_step(step, timer);
        }
        assert!(!nav.is_locked());
    }

    #[test]
    fn test_initial_state() {
        let (nav, _) = controller();
        assert_eq!(nav.level(), Level::Root);
        assert_eq!(nav.active(), KITCHEN);
        assert_eq!(nav.display().len(), 6);
        assert!(!nav.is_locked());
        assert_eq!(nav.parent(), None);
    }

    #[test]
    fn test_select_inactive_node_peeks() {
        let (mut nav, mut timer) = controller();
        assert_eq!(nav.select_node(FURNITURE, &mut timer), SelectOutcome::Peeked);
        assert_eq!(nav.active(), FURNITURE);
        assert_eq!(nav.level(), Level::Root);
        assert!(!nav.is_locked());
    }

    #[test]
    fn test_select_active_parent_drills() {
        let (mut nav, mut timer) = controller();
        assert_eq!(
            nav.select_node(KITCHEN, &mut timer),
            SelectOutcome::DrillStarted
        );
        assert!(nav.is_locked());
        // Swap is not committed until the fade-out step fires
        assert_eq!(nav.level(), Level::Root);
        assert_eq!(nav.display().len(), 6);

        nav.on_step(timer.fire_next().unwrap(), &mut timer);
        assert_eq!(nav.level(), Level::Drilled);
        assert_eq!(nav.parent(), Some(KITCHEN));
        assert_eq!(nav.display(), &[MODERN, TRADITIONAL, CategoryId(103)]);
        assert_eq!(nav.active(), MODERN);
        // Still locked through the fade-in
        assert!(nav.is_locked());

        nav.on_step(timer.fire_next().unwrap(), &mut timer);
        assert!(!nav.is_locked());
    }

    #[test]
    fn test_mutators_dropped_while_locked() {
        let (mut nav, mut timer) = controller();
        nav.select_node(KITCHEN, &mut timer);
        assert!(nav.is_locked());

        assert_eq!(nav.select_node(FURNITURE, &mut timer), SelectOutcome::Ignored);
        assert_eq!(nav.select_node(KITCHEN, &mut timer), SelectOutcome::Ignored);
        assert_eq!(nav.go_back(&mut timer), BackOutcome::Ignored);
        assert_eq!(nav.active(), KITCHEN);
        assert_eq!(nav.level(), Level::Root);
        // Only the original transition's step is armed
        assert_eq!(timer.pending_count(), 1);
    }

    #[test]
    fn test_unknown_id_is_noop() {
        let (mut nav, mut timer) = controller();
        assert_eq!(
            nav.select_node(CategoryId(999), &mut timer),
            SelectOutcome::Ignored
        );
        // Sub-category ids are not in the root display set
        assert_eq!(nav.select_node(MODERN, &mut timer), SelectOutcome::Ignored);
        assert_eq!(nav.active(), KITCHEN);
    }

    #[test]
    fn test_back_at_root_is_noop() {
        let (mut nav, mut timer) = controller();
        assert_eq!(nav.go_back(&mut timer), BackOutcome::Ignored);
        assert_eq!(nav.go_back(&mut timer), BackOutcome::Ignored);
        assert_eq!(nav.level(), Level::Root);
        assert!(!nav.is_locked());
    }

    #[test]
    fn test_drill_then_back_restores_root() {
        let (mut nav, mut timer) = controller();
        nav.select_node(KITCHEN, &mut timer);
        finish_transition(&mut nav, &mut timer);
        assert_eq!(nav.level(), Level::Drilled);

        assert_eq!(nav.go_back(&mut timer), BackOutcome::Started);
        finish_transition(&mut nav, &mut timer);

        assert_eq!(nav.level(), Level::Root);
        assert_eq!(nav.parent(), None);
        assert_eq!(nav.display().len(), 6);
        assert_eq!(nav.active(), KITCHEN);
    }

    #[test]
    fn test_active_leaf_opens_detail() {
        let (mut nav, mut timer) = controller();
        nav.select_node(LIGHT, &mut timer);
        assert_eq!(
            nav.select_node(LIGHT, &mut timer),
            SelectOutcome::OpenDetail(LIGHT)
        );
        // Navigation state untouched by the delegation
        assert_eq!(nav.active(), LIGHT);
        assert_eq!(nav.level(), Level::Root);
        assert!(!nav.is_locked());
    }

    #[test]
    fn test_flagged_childless_node_acts_as_leaf() {
        let degenerate = CategorySpec {
            id: 9,
            title: "CLOSET".to_string(),
            subtitle: String::new(),
            description: String::new(),
            image: String::new(),
            has_subcategories: true,
            subcategories: vec![],
        };
        let catalog = Arc::new(CategoryTree::from_specs(&[degenerate]).unwrap());
        let mut nav = NavigationController::new(catalog, &TransitionConfig::default());
        let mut timer = ManualStepTimer::new();

        // Already active (only root): second select must open detail, not
        // drill into an empty display set.
        assert_eq!(
            nav.select_node(CategoryId(9), &mut timer),
            SelectOutcome::OpenDetail(CategoryId(9))
        );
        assert!(!nav.is_locked());
        assert_eq!(timer.pending_count(), 0);
    }

    #[test]
    fn test_peek_within_drilled_level() {
        let (mut nav, mut timer) = controller();
        nav.select_node(KITCHEN, &mut timer);
        finish_transition(&mut nav, &mut timer);

        assert_eq!(
            nav.select_node(TRADITIONAL, &mut timer),
            SelectOutcome::Peeked
        );
        assert_eq!(nav.active(), TRADITIONAL);
        assert_eq!(nav.level(), Level::Drilled);

        // Sub-categories are leaves: selecting the active one opens detail
        assert_eq!(
            nav.select_node(TRADITIONAL, &mut timer),
            SelectOutcome::OpenDetail(TRADITIONAL)
        );
    }

    #[test]
    fn test_teardown_cancels_in_flight_transition() {
        let (mut nav, mut timer) = controller();
        nav.select_node(KITCHEN, &mut timer);
        assert!(nav.is_locked());
        assert_eq!(timer.pending_count(), 1);

        nav.teardown(&mut timer);
        assert!(!nav.is_locked());
        assert_eq!(timer.pending_count(), 0);
        assert_eq!(nav.level(), Level::Root);

        // A stray step after teardown must not commit anything
        nav.on_step(TransitionStep::CommitSwap, &mut timer);
        assert_eq!(nav.level(), Level::Root);
        assert_eq!(nav.display().len(), 6);
        assert!(!nav.is_locked());
    }

    #[test]
    fn test_prompt_and_sublevel_label() {
        let (mut nav, mut timer) = controller();
        assert_eq!(nav.prompt(), "Click on the cards to get a quick glance");
        assert_eq!(nav.sublevel_label(), None);

        nav.select_node(KITCHEN, &mut timer);
        finish_transition(&mut nav, &mut timer);
        assert_eq!(nav.prompt(), "Pick a Style");
        assert_eq!(nav.sublevel_label(), Some("STYLE"));

        nav.go_back(&mut timer);
        finish_transition(&mut nav, &mut timer);

        nav.select_node(FURNITURE, &mut timer);
        nav.select_node(FURNITURE, &mut timer);
        finish_transition(&mut nav, &mut timer);
        assert_eq!(nav.prompt(), "Pick a Room");
        assert_eq!(nav.sublevel_label(), Some("ROOM"));
    }

    #[test]
    fn test_transition_uses_configured_durations() {
        let catalog = Arc::new(CategoryTree::from_specs(&builtin_specs()).unwrap());
        let config = TransitionConfig {
            fade_out_ms: 300,
            fade_in_ms: 500,
        };
        let mut nav = NavigationController::new(catalog, &config);
        let mut timer = ManualStepTimer::new();

        nav.select_node(KITCHEN, &mut timer);
        assert_eq!(timer.last_delay(), Some(Duration::from_millis(300)));

        nav.on_step(timer.fire_next().unwrap(), &mut timer);
        assert_eq!(timer.last_delay(), Some(Duration::from_millis(500)));
    }
}
