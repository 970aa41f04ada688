//! Tree decoder for the persisted block grammar.

use crate::error::{FsError, ParseError};
use crate::tree::{DirId, Tree};
use std::io::BufRead;

/// Decode a persisted tree description.
///
/// Files and child directories are appended in the order read, which
/// reproduces the stored head-to-tail order exactly. Any line that cannot be
/// classified is fatal: the caller discards the partial tree and falls back
/// to the fresh initial state.
///
/// Open blocks live on an explicit stack, so nesting depth is bounded by
/// input size rather than the call stack: arbitrarily deep (including
/// hostile) input parses or fails cleanly, never aborts.
pub fn read_tree<R: BufRead>(source: R) -> Result<Tree, FsError> {
    let mut reader = LineReader::new(source);

    let first = reader.next_line()?.ok_or(ParseError::EmptyInput)?;
    let root_name = match classify(&first, reader.line_no)? {
        Record::Dir(name) => name,
        Record::File(_) | Record::EndDir => {
            return Err(ParseError::UnknownRecord {
                line: reader.line_no,
                token: first_token(&first),
            }
            .into())
        }
    };
    check_name(&root_name, reader.line_no)?;

    let mut tree = Tree::with_root(root_name);
    let mut open: Vec<DirId> = vec![tree.root()];

    // each iteration consumes one record for the innermost open block; the
    // loop ends when the root block closes, ignoring anything after it
    while let Some(&current) = open.last() {
        let line = match reader.next_line()? {
            Some(line) => line,
            None => return Err(ParseError::UnexpectedEof { open: open.len() }.into()),
        };
        match classify(&line, reader.line_no)? {
            Record::EndDir => {
                open.pop();
            }
            Record::File(name) => {
                check_name(&name, reader.line_no)?;
                tree.append_file(current, &name)
                    .map_err(|e| bad_name(e, reader.line_no))?;
            }
            Record::Dir(name) => {
                check_name(&name, reader.line_no)?;
                let child = tree
                    .append_directory(&name, current)
                    .map_err(|e| bad_name(e, reader.line_no))?;
                open.push(child);
            }
        }
    }

    Ok(tree)
}

enum Record {
    Dir(String),
    File(String),
    EndDir,
}

fn classify(line: &str, line_no: usize) -> Result<Record, ParseError> {
    if line == "ENDDIR" {
        return Ok(Record::EndDir);
    }
    match line.split_once(' ') {
        Some(("DIR", name)) => Ok(Record::Dir(name.to_owned())),
        Some(("FILE", name)) => Ok(Record::File(name.to_owned())),
        None if line == "DIR" || line == "FILE" => Err(ParseError::MissingName {
            line: line_no,
            record: if line == "DIR" { "DIR" } else { "FILE" },
        }),
        _ => Err(ParseError::UnknownRecord {
            line: line_no,
            token: first_token(line),
        }),
    }
}

fn check_name(name: &str, line_no: usize) -> Result<(), ParseError> {
    if name.is_empty() {
        return Err(ParseError::MissingName {
            line: line_no,
            record: "DIR/FILE",
        });
    }
    Ok(())
}

fn bad_name(err: FsError, line_no: usize) -> FsError {
    ParseError::BadName {
        line: line_no,
        reason: err.to_string(),
    }
    .into()
}

fn first_token(line: &str) -> String {
    line.split_whitespace().next().unwrap_or("").to_owned()
}

/// Growable line reader: no fixed buffer, so arbitrarily long encoded names
/// are read without truncation.
struct LineReader<R> {
    inner: R,
    line_no: usize,
}

impl<R: BufRead> LineReader<R> {
    fn new(inner: R) -> Self {
        Self { inner, line_no: 0 }
    }

    fn next_line(&mut self) -> Result<Option<String>, FsError> {
        let mut line = String::new();
        let read = self.inner.read_line(&mut line)?;
        if read == 0 {
            return Ok(None);
        }
        self.line_no += 1;
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(Some(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::encode_tree;

    fn decode(input: &str) -> Result<Tree, FsError> {
        read_tree(input.as_bytes())
    }

    #[test]
    fn decodes_single_directory() {
        let tree = decode("DIR root\nENDDIR\n").unwrap();
        assert_eq!(tree.name(tree.root()), "root");
        assert!(tree.files(tree.root()).is_empty());
        assert!(tree.children(tree.root()).is_empty());
    }

    #[test]
    fn decoding_preserves_stored_order() {
        let input = "DIR root\n\
                     FILE b.txt\n\
                     FILE a.txt\n\
                     DIR docs\n\
                     FILE inner.txt\n\
                     ENDDIR\n\
                     ENDDIR\n";
        let tree = decode(input).unwrap();
        assert_eq!(encode_tree(&tree), input);
    }

    #[test]
    fn names_keep_embedded_spaces() {
        let tree = decode("DIR my root dir\nFILE a b c.txt\nENDDIR\n").unwrap();
        assert_eq!(tree.name(tree.root()), "my root dir");
        assert_eq!(tree.files(tree.root())[0].name(), "a b c.txt");
    }

    #[test]
    fn unknown_record_is_fatal() {
        let err = decode("DIR root\nGARBAGE x\nENDDIR\n").unwrap_err();
        assert!(matches!(
            err,
            FsError::Parse(ParseError::UnknownRecord { line: 2, .. })
        ));
    }

    #[test]
    fn missing_name_is_fatal() {
        assert!(matches!(
            decode("DIR root\nFILE\nENDDIR\n").unwrap_err(),
            FsError::Parse(ParseError::MissingName { line: 2, .. })
        ));
        assert!(matches!(
            decode("DIR root\nDIR \nENDDIR\n").unwrap_err(),
            FsError::Parse(ParseError::MissingName { line: 2, .. })
        ));
    }

    #[test]
    fn missing_terminator_is_fatal() {
        let err = decode("DIR root\nDIR docs\nENDDIR\n").unwrap_err();
        assert!(matches!(
            err,
            FsError::Parse(ParseError::UnexpectedEof { open: 1 })
        ));
    }

    #[test]
    fn empty_input_is_fatal() {
        assert!(matches!(
            decode("").unwrap_err(),
            FsError::Parse(ParseError::EmptyInput)
        ));
    }

    #[test]
    fn input_must_start_with_a_dir_record() {
        assert!(decode("FILE a.txt\n").is_err());
        assert!(decode("ENDDIR\n").is_err());
    }

    #[test]
    fn trailing_content_after_root_terminator_is_ignored() {
        let tree = decode("DIR root\nENDDIR\nleftover\n").unwrap();
        assert_eq!(encode_tree(&tree), "DIR root\nENDDIR\n");
    }

    #[test]
    fn tolerates_crlf_line_endings() {
        let tree = decode("DIR root\r\nFILE a.txt\r\nENDDIR\r\n").unwrap();
        assert_eq!(tree.files(tree.root())[0].name(), "a.txt");
    }

    #[test]
    fn legacy_duplicate_file_names_round_trip_unchanged() {
        // uniqueness is enforced at creation and paste, not on load
        let input = "DIR root\nFILE dup\nFILE dup\nENDDIR\n";
        let tree = decode(input).unwrap();
        assert_eq!(encode_tree(&tree), input);
    }

    #[test]
    fn very_deep_nesting_decodes_without_exhausting_the_stack() {
        let depth = 100_000;
        let mut input = String::from("DIR root\n");
        for _ in 0..depth {
            input.push_str("DIR d\n");
        }
        for _ in 0..=depth {
            input.push_str("ENDDIR\n");
        }
        let tree = decode(&input).unwrap();
        assert_eq!(encode_tree(&tree), input);
    }

    #[test]
    fn unterminated_deep_nesting_fails_cleanly() {
        let mut input = String::from("DIR root\n");
        for _ in 0..50_000 {
            input.push_str("DIR d\n");
        }
        assert!(matches!(
            decode(&input).unwrap_err(),
            FsError::Parse(ParseError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn over_length_persisted_name_is_rejected() {
        let input = format!("DIR root\nFILE {}\nENDDIR\n", "x".repeat(300));
        assert!(matches!(
            decode(&input).unwrap_err(),
            FsError::Parse(ParseError::BadName { line: 2, .. })
        ));
    }
}
