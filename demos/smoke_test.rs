//! Smoke test: Run the revision pipeline end to end without a terminal UI.

use redline::{annotate, strip_directives, DocumentEvent, RevisionAccumulator};

fn main() {
    println!("Redline Smoke Test");
    println!("==================");
    println!();

    let mut acc = RevisionAccumulator::new();
    acc.apply_all(&[
        DocumentEvent::title("Report"),
        DocumentEvent::Clear,
        DocumentEvent::delta("# "),
        DocumentEvent::delta("Intro\n"),
        DocumentEvent::delta("Body text."),
        DocumentEvent::Finish,
    ]);
    println!("Document: {:?}", acc.document());
    println!("Fresh annotation:\n{}", acc.annotated());
    println!();

    acc.apply_all(&[
        DocumentEvent::Clear,
        DocumentEvent::delta("# Intro\nBody text, revised."),
        DocumentEvent::Finish,
    ]);
    let annotated = acc.annotated();
    println!("Revision annotation:\n{annotated}");
    println!("Stripped:\n{}", strip_directives(&annotated));
    println!();

    println!("Scenario: {}", annotate("Hello world", "Hello there"));
}
