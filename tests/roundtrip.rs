//! Property-based round-trip guarantees for the persisted format.
//!
//! For any tree reachable through the operation set, decoding an encoded tree
//! and encoding it again must be byte-identical. Failed operations must not
//! perturb the encoding either.

use arbor::session::Session;
use arbor::store::encode_tree;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    NewFile(String),
    Remove(String),
    MkDir(String),
    CdInto(String),
    CdUp,
    Copy(String),
    Paste,
}

/// Small shared name pool so operations collide often enough to exercise the
/// duplicate, not-found, and duplicate-sibling paths.
fn name_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "a", "b", "notes.txt", "deep dir", "clipboard", "dup",
    ])
    .prop_map(str::to_owned)
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        name_strategy().prop_map(Op::NewFile),
        name_strategy().prop_map(Op::Remove),
        name_strategy().prop_map(Op::MkDir),
        name_strategy().prop_map(Op::CdInto),
        Just(Op::CdUp),
        name_strategy().prop_map(Op::Copy),
        Just(Op::Paste),
    ]
}

fn apply(session: &mut Session, op: &Op) {
    // data-level errors are expected outcomes, never corruption
    match op {
        Op::NewFile(name) => {
            let _ = session.create_file(name);
        }
        Op::Remove(name) => {
            let _ = session.remove_file(name);
        }
        Op::MkDir(name) => {
            let _ = session.make_directory(name);
        }
        Op::CdInto(name) => {
            let _ = session.change_directory_into(name);
        }
        Op::CdUp => {
            session.change_directory_up();
        }
        Op::Copy(name) => {
            let _ = session.copy(name);
        }
        Op::Paste => {
            let _ = session.paste();
        }
    }
}

proptest! {
    #[test]
    fn serialize_roundtrip_is_byte_identical(ops in prop::collection::vec(op_strategy(), 0..64)) {
        let mut session = Session::new();
        for op in &ops {
            apply(&mut session, op);
        }

        let first = encode_tree(session.tree());
        let reloaded = Session::load_from(first.as_bytes()).unwrap();
        let second = encode_tree(reloaded.tree());
        prop_assert_eq!(&first, &second);

        // and a second full cycle stays stable
        let again = Session::load_from(second.as_bytes()).unwrap();
        prop_assert_eq!(&second, &encode_tree(again.tree()));
    }

    #[test]
    fn reload_preserves_root_listing(ops in prop::collection::vec(op_strategy(), 0..64)) {
        let mut session = Session::new();
        for op in &ops {
            apply(&mut session, op);
        }
        // walk the cursor back to the root for a comparable snapshot
        while session.change_directory_up() == arbor::session::CursorMove::Moved {}

        let encoded = encode_tree(session.tree());
        let reloaded = Session::load_from(encoded.as_bytes()).unwrap();
        prop_assert_eq!(
            session.list_current_directory(),
            reloaded.list_current_directory()
        );
    }
}
