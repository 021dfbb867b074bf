//! Session lifecycle: disposal, liveness and modal deferral

mod common;

use common::*;
use rainbow_parens::brackets::BracketSet;
use rainbow_parens::messages::{Msg, UiMsg};
use rainbow_parens::model::{AppModel, Document};
use rainbow_parens::runtime::Runtime;

#[test]
fn test_dispose_before_continuation_leaves_no_markers() {
    let (mut runtime, session) = runtime_with("(a (b))");
    runtime.dispatch(Msg::open(session.id));
    runtime.dispatch(Msg::dispose(session.id));
    assert!(runtime.run_until_idle(IDLE_TIMEOUT));

    assert_eq!(session.markup.lock().mutation_count(), 0);
    assert!(session.editor.is_disposed());
    assert!(runtime.model.session(session.id).is_none());
}

#[test]
fn test_dispose_with_pending_edit_drops_it() {
    let (mut runtime, session) = runtime_with("(a)");
    runtime.dispatch(Msg::open(session.id));
    assert!(runtime.run_until_idle(IDLE_TIMEOUT));

    runtime.dispatch(Msg::insert(session.id, 2, " (b)"));
    runtime.dispatch(Msg::dispose(session.id));
    let mutations = session.markup.lock().mutation_count();
    assert!(runtime.run_until_idle(IDLE_TIMEOUT));

    assert!(session.markup.lock().is_empty());
    assert_eq!(session.markup.lock().mutation_count(), mutations);
}

#[test]
fn test_hidden_editor_is_not_painted() {
    let (mut runtime, session) = runtime_with("(a)");
    session.editor.set_showing(false);
    runtime.dispatch(Msg::open(session.id));
    assert!(runtime.run_until_idle(IDLE_TIMEOUT));

    assert!(session.markup.lock().is_empty());
}

#[test]
fn test_viewer_is_not_painted() {
    let (mut runtime, session) = runtime_with("(a)");
    session.editor.set_viewer(true);
    runtime.dispatch(Msg::open(session.id));
    assert!(runtime.run_until_idle(IDLE_TIMEOUT));
    assert!(session.markup.lock().is_empty());

    runtime.dispatch(Msg::Ui(UiMsg::SetViewer {
        session: session.id,
        viewer: false,
    }));
    assert!(runtime.run_until_idle(IDLE_TIMEOUT));
    assert_eq!(session.markup.lock().len(), 2);
}

#[test]
fn test_disposed_project_is_not_painted() {
    let (mut runtime, session) = runtime_with("(a)");
    session.project.dispose();
    runtime.dispatch(Msg::open(session.id));
    assert!(runtime.run_until_idle(IDLE_TIMEOUT));

    assert!(session.markup.lock().is_empty());
}

#[test]
fn test_showing_again_repaints() {
    let (mut runtime, session) = runtime_with("(a (b))");
    runtime.dispatch(Msg::Ui(UiMsg::SetShowing {
        session: session.id,
        showing: false,
    }));
    runtime.dispatch(Msg::open(session.id));
    assert!(runtime.run_until_idle(IDLE_TIMEOUT));
    assert!(session.markup.lock().is_empty());

    runtime.dispatch(Msg::Ui(UiMsg::SetShowing {
        session: session.id,
        showing: true,
    }));
    assert!(runtime.run_until_idle(IDLE_TIMEOUT));
    assert_eq!(
        levels(&session.markup, &classic_theme()),
        vec![0, 1, 1, 0]
    );
}

#[test]
fn test_continuation_waits_for_modal_dialog() {
    let (mut runtime, session) = runtime_with("(a)");
    runtime.dispatch(Msg::Ui(UiMsg::EnterModal));
    runtime.dispatch(Msg::open(session.id));
    assert!(runtime.run_until_idle(IDLE_TIMEOUT));

    assert!(session.markup.lock().is_empty());
    assert_eq!(runtime.deferred_len(), 1);

    runtime.dispatch(Msg::Ui(UiMsg::ExitModal));
    assert_eq!(runtime.deferred_len(), 0);
    assert_eq!(session.markup.lock().len(), 2);
}

#[test]
fn test_deferred_continuation_for_disposed_session_is_noop() {
    let (mut runtime, session) = runtime_with("(a)");
    runtime.dispatch(Msg::Ui(UiMsg::EnterModal));
    runtime.dispatch(Msg::open(session.id));
    assert!(runtime.run_until_idle(IDLE_TIMEOUT));
    runtime.dispatch(Msg::dispose(session.id));

    runtime.dispatch(Msg::Ui(UiMsg::ExitModal));
    assert_eq!(runtime.deferred_len(), 0);
    assert_eq!(session.markup.lock().mutation_count(), 0);
}

#[test]
fn test_sessions_are_independent() {
    let mut model = AppModel::with_theme(fast_config(), classic_theme());
    let first = add_session(&mut model, Document::with_text("(a)", BracketSet::Parens));
    let second = add_session(&mut model, Document::with_text("((b))", BracketSet::Parens));
    let mut runtime = Runtime::new(model);

    runtime.dispatch(Msg::open(first.id));
    runtime.dispatch(Msg::open(second.id));
    runtime.dispatch(Msg::dispose(first.id));
    assert!(runtime.run_until_idle(IDLE_TIMEOUT));

    assert!(first.markup.lock().is_empty());
    assert_eq!(second.markup.lock().len(), 4);
}
