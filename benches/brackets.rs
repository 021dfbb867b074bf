//! Benchmarks for bracket matching and recompute passes
//!
//! Run with: cargo bench --bench brackets

use divan::Bencher;

use rainbow_parens::brackets::{
    match_brackets, resolve_dirty_range, BracketSet, EditDescriptor, LispSyntax, ScanSyntax,
    SyntaxTree, Tokenizer,
};
use rainbow_parens::config::HighlightConfig;
use rainbow_parens::liveness::{EditorHandle, ProjectHandle};
use rainbow_parens::model::{Document, EditorSession, RecomputeRequest, SessionId};
use rainbow_parens::theme::BracePalette;

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

// ============================================================================
// Sample source generation
// ============================================================================

fn generate_lisp(forms: usize) -> String {
    let mut source = String::with_capacity(forms * 80);
    for i in 0..forms {
        source.push_str(&format!(
            "(define (f{} x)\n  (let ((y (* x {})))\n    (if (> y 0) (list y \"(\") (- y))))\n\n",
            i, i
        ));
    }
    source
}

fn scanned(source: &str) -> ScanSyntax {
    let mut syntax = ScanSyntax::new(BracketSet::Parens);
    syntax.scan(source);
    syntax
}

// ============================================================================
// Matcher
// ============================================================================

#[divan::bench(args = [10, 100, 1000])]
fn match_whole_buffer(bencher: Bencher, forms: usize) {
    let source = generate_lisp(forms);
    let syntax = scanned(&source);
    let tokens = syntax.tokens(0..source.len());

    bencher.bench_local(|| match_brackets(divan::black_box(&tokens), 0..source.len()));
}

#[divan::bench(args = [100, 1000])]
fn resolve_edit_range(bencher: Bencher, forms: usize) {
    let source = generate_lisp(forms);
    let syntax = scanned(&source);
    let edit = EditDescriptor::insert(source.len() / 2, 1);

    bencher.bench_local(|| {
        let tree: &dyn SyntaxTree = &syntax;
        resolve_dirty_range(source.len(), tree, Some(divan::black_box(&edit)))
    });
}

// ============================================================================
// Syntax backends
// ============================================================================

#[divan::bench(args = [10, 100, 1000])]
fn lisp_full_parse(bencher: Bencher, forms: usize) {
    let source = generate_lisp(forms);
    bencher
        .with_inputs(|| LispSyntax::new(BracketSet::Parens).unwrap())
        .bench_local_refs(|syntax| syntax.parse(&source));
}

#[divan::bench(args = [10, 100, 1000])]
fn scanner_full_scan(bencher: Bencher, forms: usize) {
    let source = generate_lisp(forms);
    bencher
        .with_inputs(|| ScanSyntax::new(BracketSet::Parens))
        .bench_local_refs(|syntax| syntax.scan(&source));
}

// ============================================================================
// Recompute passes (simulating editing)
// ============================================================================

fn session_for(source: &str) -> EditorSession {
    EditorSession::new(
        SessionId(1),
        Document::with_text(source, BracketSet::Parens),
        ProjectHandle::new(),
        EditorHandle::new(),
    )
}

#[divan::bench(args = [100, 1000])]
fn full_rescan_pass(bencher: Bencher, forms: usize) {
    let source = generate_lisp(forms);
    let config = HighlightConfig::default();
    let palette = BracePalette::default();

    bencher
        .with_inputs(|| session_for(&source))
        .bench_local_refs(|session| {
            rainbow_parens::update::recompute_pass(
                session,
                RecomputeRequest::FullRescan,
                &config,
                &palette,
            )
        });
}

#[divan::bench(args = [100, 1000])]
fn keystroke_pass(bencher: Bencher, forms: usize) {
    let source = generate_lisp(forms);
    let config = HighlightConfig::default();
    let palette = BracePalette::default();

    bencher
        .with_inputs(|| {
            let mut session = session_for(&source);
            rainbow_parens::update::recompute_pass(
                &mut session,
                RecomputeRequest::FullRescan,
                &config,
                &palette,
            );
            let offset = source.len() / 2;
            let offset = (offset..source.len())
                .find(|&i| source.as_bytes()[i] == b'(')
                .unwrap_or(0);
            let edit = session.document.replace(offset, 0, "(g)").unwrap();
            session.markup.apply_edit(&edit);
            (session, edit)
        })
        .bench_local_refs(|(session, edit)| {
            rainbow_parens::update::recompute_pass(
                session,
                RecomputeRequest::Edit(*edit),
                &config,
                &palette,
            )
        });
}
