//! App - the views and the board that wires them to the store.
//!
//! - [`ProjectForm`]: collects input and calls `add_project`.
//! - [`ProjectList`]: one per status; store listener and drop target.
//! - [`ProjectItem`]: one per card; drag source.
//! - [`Board`]: builds one store and hands it to every view.

pub mod board;
pub mod component;
pub mod project_form;
pub mod project_item;
pub mod project_list;

pub use self::board::{Board, BoardBuilder, BuildError};
pub use self::component::Component;
pub use self::project_form::{FORM_ELEMENT_ID, ProjectForm};
pub use self::project_item::ProjectItem;
pub use self::project_list::{DROPPABLE_CLASS, ProjectList};

pub const PROJECT_INPUT_TEMPLATE: &str = "project-input";
pub const PROJECT_LIST_TEMPLATE: &str = "project-list";
pub const SINGLE_PROJECT_TEMPLATE: &str = "single-project";

/// Templates a surface must provide before a board can be built.
pub const REQUIRED_TEMPLATES: [&str; 3] = [
    PROJECT_INPUT_TEMPLATE,
    PROJECT_LIST_TEMPLATE,
    SINGLE_PROJECT_TEMPLATE,
];

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use chrono::{TimeZone, Utc};
    use rstest::rstest;
    use ulid::Ulid;

    use super::*;
    use crate::domain::{ProjectId, ProjectInput, ProjectStatus, ValidationError};
    use crate::drag::{DragSession, DropOutcome, DropTarget, TEXT_PLAIN};
    use crate::impls::{MemorySurface, MemoryTransfer};
    use crate::ports::{DataTransfer, DropEffect, Element, FixedClock, SharedSurface, UlidGenerator};

    fn board_with_surface() -> (Board, Rc<RefCell<MemorySurface>>) {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let memory = Rc::new(RefCell::new(MemorySurface::new()));
        let surface: SharedSurface = memory.clone();
        let board = BoardBuilder::new()
            .surface(surface)
            .id_generator(Box::new(UlidGenerator::new(FixedClock::new(at))))
            .clock(Box::new(FixedClock::new(at)))
            .build()
            .unwrap();
        (board, memory)
    }

    fn titles(list: &ProjectList) -> Vec<String> {
        list.projects().into_iter().map(|p| p.title).collect()
    }

    fn rendered_titles(memory: &Rc<RefCell<MemorySurface>>, host: &str) -> Vec<String> {
        use crate::ports::Surface;
        memory
            .borrow()
            .children(host)
            .unwrap_or_default()
            .iter()
            .map(|el| el.slot("h2").unwrap_or_default().to_string())
            .collect()
    }

    /// A, then B, both active.
    fn seeded() -> (Board, Rc<RefCell<MemorySurface>>, ProjectId, ProjectId) {
        let (board, memory) = board_with_surface();
        let a = board.store().add_project("A", "Desc one", 1);
        let b = board.store().add_project("B", "Desc two", 3);
        (board, memory, a, b)
    }

    #[test]
    fn build_fails_fast_on_missing_templates() {
        let mut bare = MemorySurface::empty();
        bare.register_template(PROJECT_LIST_TEMPLATE, Element::new(PROJECT_LIST_TEMPLATE));
        let surface: SharedSurface = Rc::new(RefCell::new(bare));

        let result = BoardBuilder::new().surface(surface).build();
        assert!(matches!(
            result,
            Err(BuildError::MissingTemplates(missing))
                if missing == vec![PROJECT_INPUT_TEMPLATE.to_string(), SINGLE_PROJECT_TEMPLATE.to_string()]
        ));
    }

    #[test]
    fn new_board_renders_form_and_empty_lists() {
        let (board, memory) = board_with_surface();
        let rendered = memory.borrow().render_text();

        assert_eq!(
            rendered,
            "[project-input#user-input]\n\
             [project-list#active-projects] ACTIVE PROJECTS\n\
             [project-list#finished-projects] FINISHED PROJECTS\n"
        );
        assert!(board.list(ProjectStatus::Active).projects().is_empty());
        assert_eq!(board.store().listener_count(), 2);
    }

    #[test]
    fn added_projects_show_in_active_list() {
        let (board, memory, _, _) = seeded();

        assert_eq!(titles(board.list(ProjectStatus::Active)), vec!["A", "B"]);
        assert!(titles(board.list(ProjectStatus::Finished)).is_empty());
        assert_eq!(rendered_titles(&memory, "active-projects"), vec!["A", "B"]);
    }

    #[test]
    fn item_renders_people_label_and_description() {
        let (_board, memory, a, b) = seeded();
        use crate::ports::Surface;
        let memory = memory.borrow();

        let first = memory.element(&a.to_string()).unwrap();
        assert_eq!(first.slot("h3"), Some("1 person"));
        assert_eq!(first.slot("p"), Some("Desc one"));
        assert_eq!(first.attribute("draggable"), Some("true"));

        let second = memory.element(&b.to_string()).unwrap();
        assert_eq!(second.slot("h3"), Some("3 people"));
    }

    #[test]
    fn move_rerenders_both_lists() {
        let (board, memory, a, _) = seeded();

        assert!(board.store().move_project(&a, ProjectStatus::Finished));

        assert_eq!(titles(board.list(ProjectStatus::Active)), vec!["B"]);
        assert_eq!(titles(board.list(ProjectStatus::Finished)), vec!["A"]);
        assert_eq!(rendered_titles(&memory, "active-projects"), vec!["B"]);
        assert_eq!(rendered_titles(&memory, "finished-projects"), vec!["A"]);
    }

    #[test]
    fn lists_keep_store_order_after_moving_back() {
        let (board, _, a, _) = seeded();

        board.store().move_project(&a, ProjectStatus::Finished);
        board.store().move_project(&a, ProjectStatus::Active);

        assert_eq!(titles(board.list(ProjectStatus::Active)), vec!["A", "B"]);
    }

    #[test]
    fn drag_from_item_to_finished_list_moves_once() {
        let (board, _, a, _) = seeded();
        let calls = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&calls);
        board.store().add_listener(move |_| *sink.borrow_mut() += 1);

        let item = board.item(&a).unwrap();
        let target = board.list(ProjectStatus::Finished);
        let mut session = DragSession::new();

        session.start(&item);
        assert_eq!(session.transfer().get_data(TEXT_PLAIN), Some(a.to_string()));
        assert_eq!(session.transfer().effect_allowed(), DropEffect::Move);
        assert!(session.over(target.clone()));
        assert_eq!(session.drop_on(&**target), DropOutcome::Delivered);
        session.end(&item);

        assert_eq!(*calls.borrow(), 1);
        assert_eq!(board.store().find(&a).unwrap().status, ProjectStatus::Finished);
    }

    #[test]
    fn drop_after_leave_does_not_move() {
        let (board, _, a, _) = seeded();
        let calls = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&calls);
        board.store().add_listener(move |_| *sink.borrow_mut() += 1);

        let item = board.item(&a).unwrap();
        let target = board.list(ProjectStatus::Finished);
        let mut session = DragSession::new();

        session.start(&item);
        session.over(target.clone());
        session.leave(&**target);
        assert_eq!(session.drop_on(&**target), DropOutcome::Rejected);

        assert_eq!(*calls.borrow(), 0);
        assert_eq!(board.store().find(&a).unwrap().status, ProjectStatus::Active);
    }

    #[test]
    fn drag_over_toggles_droppable_class() {
        let (board, memory, a, _) = seeded();
        use crate::ports::Surface;
        let item = board.item(&a).unwrap();
        let target = board.list(ProjectStatus::Finished);
        let mut session = DragSession::new();

        session.start(&item);
        session.over(target.clone());
        assert!(memory.borrow().element("finished-projects").unwrap().has_class(DROPPABLE_CLASS));

        session.leave(&**target);
        assert!(!memory.borrow().element("finished-projects").unwrap().has_class(DROPPABLE_CLASS));

        session.over(target.clone());
        session.drop_on(&**target);
        assert!(!memory.borrow().element("finished-projects").unwrap().has_class(DROPPABLE_CLASS));
    }

    #[test]
    fn non_text_payload_is_not_accepted() {
        let (board, memory, _, _) = seeded();
        use crate::ports::Surface;
        let mut transfer = MemoryTransfer::new();
        transfer.set_data("text/html", "<b>A</b>");
        let mut session = DragSession::with_transfer(Box::new(transfer));
        let target = board.list(ProjectStatus::Finished);

        assert!(!session.over(target.clone()));
        assert_eq!(session.drop_on(&**target), DropOutcome::Rejected);
        assert!(!memory.borrow().element("finished-projects").unwrap().has_class(DROPPABLE_CLASS));
    }

    #[rstest]
    #[case::garbage("not-an-id")]
    #[case::unknown_project("__unknown__")]
    fn drop_with_unresolvable_id_is_a_no_op(#[case] payload: &str) {
        let (board, _, _, _) = seeded();
        let before = board.store().snapshot();
        let payload = if payload == "__unknown__" {
            ProjectId::from_ulid(Ulid::new()).to_string()
        } else {
            payload.to_string()
        };

        let mut transfer = MemoryTransfer::new();
        transfer.set_data(TEXT_PLAIN, &payload);
        let mut session = DragSession::with_transfer(Box::new(transfer));
        let target = board.list(ProjectStatus::Finished);

        assert!(session.over(target.clone()));
        assert_eq!(session.drop_on(&**target), DropOutcome::Delivered);
        assert_eq!(board.store().snapshot(), before);
    }

    #[test]
    fn drop_on_own_list_does_not_notify() {
        let (board, _, a, _) = seeded();
        let calls = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&calls);
        board.store().add_listener(move |_| *sink.borrow_mut() += 1);

        assert_eq!(
            board.drag_project(&a, ProjectStatus::Active),
            Some(DropOutcome::Delivered)
        );
        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn drag_project_helper_runs_full_sequence() {
        let (board, _, a, b) = seeded();

        assert_eq!(
            board.drag_project(&b, ProjectStatus::Finished),
            Some(DropOutcome::Delivered)
        );
        assert_eq!(titles(board.list(ProjectStatus::Active)), vec!["A"]);
        assert_eq!(titles(board.list(ProjectStatus::Finished)), vec!["B"]);
        assert!(board.item(&a).is_some());

        let missing = ProjectId::from_ulid(Ulid::new());
        assert_eq!(board.drag_project(&missing, ProjectStatus::Finished), None);
    }

    #[test]
    fn form_submit_adds_project_and_clears() {
        let (board, memory) = board_with_surface();
        use crate::ports::Surface;

        board
            .form()
            .fill(ProjectInput::new("Launch", "Ship the thing", "2"))
            .unwrap();
        assert_eq!(
            memory.borrow().element(FORM_ELEMENT_ID).unwrap().slot("title"),
            Some("Launch")
        );

        let id = board.form().submit().unwrap();

        assert_eq!(board.form().input(), ProjectInput::default());
        assert_eq!(
            memory.borrow().element(FORM_ELEMENT_ID).unwrap().slot("title"),
            Some("")
        );
        let record = board.store().find(&id).unwrap();
        assert_eq!(record.title, "Launch");
        assert_eq!(record.people, 2);
        assert_eq!(titles(board.list(ProjectStatus::Active)), vec!["Launch"]);
    }

    #[test]
    fn form_rejects_invalid_input_without_touching_store() {
        let (board, _) = board_with_surface();

        board
            .form()
            .fill(ProjectInput::new("Launch", "Ship", "2"))
            .unwrap();
        let err = board.form().submit().unwrap_err();

        assert_eq!(err, ValidationError::DescriptionTooShort { min: 5 });
        assert!(board.store().is_empty());
        // 入力は保持される
        assert_eq!(board.form().input().title, "Launch");
    }

    #[test]
    fn detached_list_stops_rendering() {
        let (board, _, a, _) = seeded();
        let finished = board.list(ProjectStatus::Finished);

        finished.detach();
        assert!(!finished.is_subscribed());
        board.store().move_project(&a, ProjectStatus::Finished);

        assert!(titles(finished).is_empty());
        assert_eq!(board.store().listener_count(), 1);
    }

    #[test]
    fn dropping_a_list_unregisters_its_listener() {
        let (board, _) = board_with_surface();
        let store = Rc::clone(board.store());
        let extra = ProjectList::new(
            ProjectStatus::Active,
            "app-extra-host-does-not-exist",
            Rc::clone(&store),
            Rc::clone(board.surface()),
        );
        // unknown host: construction fails before subscribing
        assert!(extra.is_err());
        assert_eq!(store.listener_count(), 2);

        drop(board);
        assert_eq!(store.listener_count(), 0);
    }

    #[test]
    fn list_target_id_is_section_id() {
        let (board, _) = board_with_surface();
        assert_eq!(board.list(ProjectStatus::Active).target_id(), "active-projects");
        assert_eq!(board.list(ProjectStatus::Finished).target_id(), "finished-projects");
    }

    #[test]
    fn ending_drag_over_a_list_clears_droppable() {
        let (board, memory, a, _) = seeded();
        use crate::ports::Surface;
        let item = board.item(&a).unwrap();
        let target = board.list(ProjectStatus::Finished);
        let mut session = DragSession::new();

        session.start(&item);
        session.over(target.clone());
        assert!(memory.borrow().element("finished-projects").unwrap().has_class(DROPPABLE_CLASS));
        session.end(&item);

        assert!(!memory.borrow().element("finished-projects").unwrap().has_class(DROPPABLE_CLASS));
        assert_eq!(board.store().find(&a).unwrap().status, ProjectStatus::Active);
    }

    #[test]
    fn moving_to_another_list_disarms_the_first() {
        let (board, memory, a, _) = seeded();
        use crate::ports::Surface;
        let item = board.item(&a).unwrap();
        let finished = board.list(ProjectStatus::Finished);
        let active = board.list(ProjectStatus::Active);
        let mut session = DragSession::new();

        session.start(&item);
        session.over(finished.clone());
        session.over(active.clone());

        assert!(!memory.borrow().element("finished-projects").unwrap().has_class(DROPPABLE_CLASS));
        assert!(memory.borrow().element("active-projects").unwrap().has_class(DROPPABLE_CLASS));
        assert_eq!(session.drop_on(&**finished), DropOutcome::Rejected);
        assert_eq!(board.store().find(&a).unwrap().status, ProjectStatus::Active);

        session.end(&item);
        assert!(!memory.borrow().element("active-projects").unwrap().has_class(DROPPABLE_CLASS));
    }
}
