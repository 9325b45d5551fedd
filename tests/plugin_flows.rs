//! End-to-end flows through `handle_event`: catalog loading, pointer and
//! keyboard drags, and exports through the worker.

use tierboard::app::{Focus, Key};
use tierboard::board::{BoardAction, Point};
use tierboard::catalog::{Channel, RequestTag};
use tierboard::domain::{ContainerId, Item, TierId};
use tierboard::worker::{TierboardWorker, WorkerMessage, WorkerResponse};
use tierboard::{handle_event, initialize, parse_tiers, Action, AppState, Config, Event};

const LISTING: &str = r#"{"page":1,"results":[
    {"id":10,"title":"Heat","poster_path":"/heat.jpg","vote_average":8.3},
    {"id":20,"title":"Alien","poster_path":"/alien.jpg"},
    {"id":30,"title":"Arrival","poster_path":"/arrival.jpg"}
]}"#;

// 40x80 pane with three tiers: results on row 5, S/A/B on rows 7/8/9, pool on row 11.
// Cards start at column 8 and repeat every 18 columns.
fn plugin(export_dir: Option<&str>) -> AppState {
    let config = Config {
        api_key: Some("key".to_string()),
        tiers: parse_tiers("S:#ef4444,A:#f97316,B:#eab308").unwrap(),
        export_dir: export_dir.map(str::to_string),
        ..Config::default()
    };
    let mut state = initialize(&config);
    state.set_viewport(40, 80);

    let (_, actions) = send(&mut state, Event::PermissionsResult { granted: true });
    let tag = actions
        .iter()
        .find_map(|action| match action {
            Action::Fetch { tag, .. } => Some(*tag),
            _ => None,
        })
        .expect("browse request");
    send(
        &mut state,
        Event::CatalogResponse {
            tag,
            status: 200,
            body: LISTING.as_bytes().to_vec(),
        },
    );
    state
}

fn send(state: &mut AppState, event: Event) -> (bool, Vec<Action>) {
    handle_event(state, &event).unwrap()
}

fn press(state: &mut AppState, col: isize, row: isize) {
    send(state, Event::PointerPress(Point::new(col, row)));
}

fn drag(state: &mut AppState, col: isize, row: isize) {
    send(state, Event::PointerDrag(Point::new(col, row)));
}

fn release(state: &mut AppState, col: isize, row: isize) {
    send(state, Event::PointerRelease(Point::new(col, row)));
}

fn titles(items: &[Item]) -> Vec<&str> {
    items.iter().map(|item| item.title.as_str()).collect()
}

fn tier<'a>(state: &'a AppState, id: &str) -> Vec<&'a str> {
    titles(state.partition().tier(&TierId::from(id)).unwrap().items())
}

#[test]
fn mouse_drag_from_results_onto_a_tier() {
    let mut state = plugin(None);
    assert_eq!(titles(&state.browse_results), vec!["Heat", "Alien", "Arrival"]);

    press(&mut state, 10, 5);
    drag(&mut state, 12, 5);
    assert!(state.is_dragging());

    drag(&mut state, 12, 8);
    let vm = state.compute_viewmodel(40, 80);
    let ghost = vm.drag.expect("drag ghost");
    assert_eq!((ghost.col, ghost.row), (10, 8));
    assert!(vm.bands[1].is_candidate);
    assert!(!vm.bands[0].is_candidate);

    release(&mut state, 12, 8);
    assert!(!state.is_dragging());
    assert_eq!(tier(&state, "A"), vec!["Heat"]);
    // the catalog listing is a source, not a container
    assert_eq!(state.browse_results.len(), 3);
    assert_eq!(state.summary().ranked, 1);
}

#[test]
fn dragging_a_ranked_result_onto_the_pool_unranks_it() {
    let mut state = plugin(None);
    send(&mut state, Event::Key(Key::Char('1')));
    assert_eq!(tier(&state, "S"), vec!["Heat"]);

    // clicking the result keeps the selection in the strip
    press(&mut state, 10, 5);
    release(&mut state, 10, 5);
    assert_eq!(state.focus, Focus::Results);
    assert_eq!(state.cursor, 0);

    press(&mut state, 10, 5);
    drag(&mut state, 12, 5);
    drag(&mut state, 12, 11);
    release(&mut state, 12, 11);

    assert!(tier(&state, "S").is_empty());
    assert_eq!(titles(state.partition().pool()), vec!["Heat"]);
    assert_eq!(state.partition().total_items(), 1);
}

#[test]
fn short_press_is_a_click_that_selects() {
    let mut state = plugin(None);
    press(&mut state, 28, 5);
    release(&mut state, 28, 5);

    assert!(!state.is_dragging());
    assert_eq!(state.focus, Focus::Results);
    assert_eq!(state.cursor, 1);
    assert_eq!(state.revision(), 0);
}

#[test]
fn dropping_a_ranked_card_on_a_pool_card_unranks_it_there() {
    let mut state = plugin(None);
    let heat = state.browse_results[0].clone();
    let alien = state.browse_results[1].clone();
    state.dispatch(&BoardAction::AddToPool(alien));
    state.dispatch(&BoardAction::AssignToTier { item: heat, tier: TierId::from("S") });

    press(&mut state, 9, 7);
    drag(&mut state, 9, 9);
    drag(&mut state, 9, 11);
    release(&mut state, 9, 11);

    assert!(tier(&state, "S").is_empty());
    assert_eq!(titles(state.partition().pool()), vec!["Heat", "Alien"]);
}

#[test]
fn escape_during_a_mouse_drag_leaves_the_board_alone() {
    let mut state = plugin(None);
    press(&mut state, 10, 5);
    drag(&mut state, 10, 7);
    assert!(state.is_dragging());

    send(&mut state, Event::Key(Key::Esc));
    assert!(!state.is_dragging());
    assert_eq!(state.revision(), 0);
    assert_eq!(state.partition().total_items(), 0);
}

#[test]
fn keyboard_drag_reorders_inside_a_tier() {
    let mut state = plugin(None);
    for item in state.browse_results.clone() {
        state.dispatch(&BoardAction::AssignToTier { item, tier: TierId::from("S") });
    }
    assert_eq!(tier(&state, "S"), vec!["Heat", "Alien", "Arrival"]);

    state.focus = Focus::Container(ContainerId::tier("S"));
    state.cursor = 0;
    send(&mut state, Event::Key(Key::Char(' ')));
    send(&mut state, Event::Key(Key::Right));
    send(&mut state, Event::Key(Key::Right));
    send(&mut state, Event::Key(Key::Enter));

    assert_eq!(tier(&state, "S"), vec!["Alien", "Arrival", "Heat"]);
}

#[test]
fn stale_catalog_responses_never_reach_the_board_view() {
    let mut state = plugin(None);
    let stale = RequestTag { channel: Channel::Browse, serial: 0 };
    let (render, actions) = send(
        &mut state,
        Event::CatalogResponse {
            tag: stale,
            status: 200,
            body: br#"{"results":[{"id":99,"title":"Stale","poster_path":"/s.jpg"}]}"#.to_vec(),
        },
    );
    assert!(!render);
    assert!(actions.is_empty());
    assert_eq!(titles(&state.browse_results), vec!["Heat", "Alien", "Arrival"]);
}

#[test]
fn export_round_trip_through_the_worker() {
    let dir = tempfile::tempdir().unwrap();
    let mut state = plugin(dir.path().to_str());
    send(&mut state, Event::Key(Key::Char('1')));

    let (_, actions) = send(&mut state, Event::Key(Key::Char('e')));
    let [Action::PostToWorker(message)] = actions.as_slice() else {
        panic!("expected a worker message, got {actions:?}");
    };
    assert!(matches!(message, WorkerMessage::ExportBoard { .. }));

    let mut worker = TierboardWorker::default();
    let response = worker.handle_message(message.clone());
    let WorkerResponse::Exported { path } = &response else {
        panic!("export failed: {response:?}");
    };
    let markdown = std::fs::read_to_string(path).unwrap();
    assert!(markdown.starts_with("# Movie Tier List"));
    assert!(markdown.contains("## S\n\n1. Heat"));

    send(&mut state, Event::WorkerResponse(response.clone()));
    assert_eq!(state.status, Some(format!("Exported to {path}")));
}
