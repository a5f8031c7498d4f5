//! End-to-end page behaviour driven through the same events a browser would
//! deliver.

mod support;

use support::{NS, create, open_page};
use tasklist_core::storage::MemoryStore;
use tasklist_core::{KeyValueStore, Stats};
use tasklist_view::{Filter, Key, UiEvent};

#[test]
fn filters_show_the_right_items() {
    let store = MemoryStore::new();
    let mut page = open_page(&store, "");
    let milk = create(&mut page, "buy milk");
    create(&mut page, "write report");

    assert_eq!(page.surface().visible_titles(), vec!["buy milk", "write report"]);

    page.dispatch(UiEvent::Check(milk)).expect("toggle");

    page.dispatch(UiEvent::Navigate("#/active".into())).expect("navigate");
    assert_eq!(page.filter(), Filter::Active);
    assert_eq!(page.surface().visible_titles(), vec!["write report"]);

    page.dispatch(UiEvent::Navigate("#/completed".into())).expect("navigate");
    assert_eq!(page.surface().visible_titles(), vec!["buy milk"]);

    page.dispatch(UiEvent::Navigate("#/".into())).expect("navigate");
    assert_eq!(page.surface().visible_titles(), vec!["buy milk", "write report"]);
}

#[test]
fn filter_change_does_not_rebuild_or_persist() {
    let store = MemoryStore::new();
    let mut page = open_page(&store, "");
    let a = create(&mut page, "a");
    create(&mut page, "b");
    page.toggle(&a).expect("toggle");

    let before_keys = store.keys();
    let before_record = store.get(&format!("{NS}-{a}")).expect("get");
    let renders = page.surface().row_renders();

    page.navigate("#/completed");

    // only the active row "b" flips to hidden
    assert_eq!(page.surface().row_renders(), renders + 1);
    assert_eq!(page.row_count(), 2);
    assert_eq!(store.keys(), before_keys);
    assert_eq!(store.get(&format!("{NS}-{a}")).expect("get"), before_record);
}

#[test]
fn unknown_route_means_all() {
    let store = MemoryStore::new();
    let mut page = open_page(&store, "#/active");
    assert_eq!(page.filter(), Filter::Active);
    page.navigate("#/nonsense");
    assert_eq!(page.filter(), Filter::All);
}

#[test]
fn items_created_under_a_filter_respect_it() {
    let store = MemoryStore::new();
    let mut page = open_page(&store, "#/completed");
    let id = create(&mut page, "fresh");

    assert!(page.surface().row(&id).expect("row").hidden);
    page.toggle(&id).expect("toggle");
    assert!(!page.surface().row(&id).expect("row").hidden);
}

#[test]
fn whitespace_edit_removes_item() {
    let store = MemoryStore::new();
    let mut page = open_page(&store, "");
    let id = create(&mut page, "doomed");
    create(&mut page, "keeper");

    page.dispatch(UiEvent::BeginEdit(id.clone())).expect("edit");
    assert!(page.surface().row(&id).expect("row").editing);
    page.dispatch(UiEvent::EditInput {
        id: id.clone(),
        value: "   ".into(),
    })
    .expect("type");
    page.dispatch(UiEvent::EditKeypress {
        id: id.clone(),
        key: Key::Enter,
    })
    .expect("commit");

    assert!(page.collection().get(&id).is_none());
    assert!(page.surface().row(&id).is_none());
    assert_eq!(store.get(&format!("{NS}-{id}")).expect("get"), None);
    assert_eq!(page.surface().visible_titles(), vec!["keeper"]);

    // the blur that follows the Enter is harmless
    page.dispatch(UiEvent::EditBlur(id)).expect("blur");
    assert_eq!(page.row_count(), 1);
}

#[test]
fn edit_commit_on_blur_renames() {
    let store = MemoryStore::new();
    let mut page = open_page(&store, "");
    let id = create(&mut page, "draft");

    page.begin_edit(&id);
    page.edit_input(&id, "  final  ");
    page.dispatch(UiEvent::EditBlur(id.clone())).expect("blur");

    let row = page.surface().row(&id).expect("row").clone();
    assert_eq!(row.title, "final");
    assert!(!row.editing);
    assert_eq!(page.collection().get(&id).map(|i| i.title.as_str()), Some("final"));
}

#[test]
fn escape_discards_edit() {
    let store = MemoryStore::new();
    let mut page = open_page(&store, "");
    let id = create(&mut page, "original");

    page.begin_edit(&id);
    page.edit_input(&id, "changed");
    page.dispatch(UiEvent::EditKeydown {
        id: id.clone(),
        key: Key::Escape,
    })
    .expect("escape");
    page.dispatch(UiEvent::EditBlur(id.clone())).expect("blur");

    let row = page.surface().row(&id).expect("row").clone();
    assert_eq!(row.title, "original");
    assert_eq!(row.edit_value, "original");
    assert!(!row.editing);
    assert_eq!(page.collection().get(&id).map(|i| i.title.as_str()), Some("original"));
}

#[test]
fn new_item_input_ignores_blank_and_non_enter() {
    let store = MemoryStore::new();
    let mut page = open_page(&store, "");

    page.dispatch(UiEvent::NewTodoKeypress {
        key: Key::from_code(65),
        value: "typing".into(),
    })
    .expect("keypress");
    page.dispatch(UiEvent::NewTodoKeypress {
        key: Key::Enter,
        value: "   ".into(),
    })
    .expect("blank enter");
    assert!(page.collection().is_empty());
    assert_eq!(page.surface().new_input_clears(), 0);

    page.dispatch(UiEvent::NewTodoKeypress {
        key: Key::from_code(13),
        value: "  real  ".into(),
    })
    .expect("enter");
    assert_eq!(page.surface().visible_titles(), vec!["real"]);
    assert_eq!(page.surface().new_input_clears(), 1);
}

#[test]
fn footer_tracks_counts_and_selection() {
    let store = MemoryStore::new();
    let mut page = open_page(&store, "");
    assert!(!page.surface().footer().visible);

    let a = create(&mut page, "a");
    create(&mut page, "b");
    create(&mut page, "c");
    page.toggle(&a).expect("toggle");
    page.navigate("#/active");

    let footer = *page.surface().footer();
    assert!(footer.visible);
    assert_eq!(
        footer.stats,
        Stats {
            total: 3,
            completed: 1,
            remaining: 2
        }
    );
    assert_eq!(footer.selected, Filter::Active);
    assert!(!footer.all_completed);

    let html = page.surface().to_html();
    assert!(html.contains("2 items left"));
    assert!(html.contains("<a class=\"selected\" href=\"#/active\">"));
}

#[test]
fn clear_completed_and_toggle_all() {
    let store = MemoryStore::new();
    let mut page = open_page(&store, "");
    create(&mut page, "a");
    create(&mut page, "b");

    page.dispatch(UiEvent::ToggleAll).expect("toggle all");
    assert!(page.surface().footer().all_completed);
    assert_eq!(page.collection().stats().remaining, 0);

    page.dispatch(UiEvent::ToggleAll).expect("toggle all back");
    assert_eq!(page.collection().stats().completed, 0);

    page.dispatch(UiEvent::ToggleAll).expect("toggle all again");
    page.dispatch(UiEvent::ClearCompleted).expect("clear");
    assert!(page.collection().is_empty());
    assert_eq!(page.row_count(), 0);
    assert!(!page.surface().footer().visible);
}

#[test]
fn destroy_drops_row_and_record() {
    let store = MemoryStore::new();
    let mut page = open_page(&store, "");
    let id = create(&mut page, "bye");

    page.dispatch(UiEvent::Destroy(id.clone())).expect("destroy");
    assert_eq!(page.row_count(), 0);
    assert_eq!(store.get(NS).expect("get"), Some(String::new()));

    // further events for the destroyed item are ignored
    page.dispatch(UiEvent::Check(id.clone())).expect("check");
    page.dispatch(UiEvent::BeginEdit(id)).expect("edit");
    assert!(page.collection().is_empty());
}

#[test]
fn reload_rebuilds_page_once_in_order() {
    let store = MemoryStore::new();
    {
        let mut page = open_page(&store, "");
        let first = create(&mut page, "first");
        create(&mut page, "second");
        create(&mut page, "third");
        page.toggle(&first).expect("toggle");
    }

    let page = open_page(&store, "#/active");
    assert_eq!(page.row_count(), 3);
    let surface = page.surface();
    assert_eq!(surface.row_renders(), 3);
    let titles: Vec<&str> = surface.rows().iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["first", "second", "third"]);
    assert_eq!(surface.visible_titles(), vec!["second", "third"]);
    drop(surface);
    assert_eq!(page.collection().next_order(), 4);
}

#[test]
fn detaching_unsubscribes_the_page() {
    let store = MemoryStore::new();
    let page = open_page(&store, "");
    let mut collection = page.into_collection();
    assert_eq!(collection.events_mut().listener_count(), 0);
}
