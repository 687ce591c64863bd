//! Reassembly tests covering terminators, garbage lines and overflow.
use super::*;

fn feed(reassembler: &mut SentenceReassembler, bytes: &[u8]) -> Option<SentenceBuf> {
    let mut last = None;
    for &b in bytes {
        if let Some(sentence) = reassembler.push(b) {
            last = Some(sentence);
        }
    }
    last
}

#[test]
/// CR is stripped and LF emits the line.
fn test_complete_sentence() {
    let mut reassembler = SentenceReassembler::new();
    let sentence = feed(&mut reassembler, b"$HEHDT,17.2,T*1B\r\n").expect("sentence");
    assert_eq!(sentence.as_bytes(), b"$HEHDT,17.2,T*1B");
    assert_eq!(reassembler.pending(), 0);
}

#[test]
/// Nothing is emitted before the line feed.
fn test_partial_sentence_is_pending() {
    let mut reassembler = SentenceReassembler::new();
    assert!(feed(&mut reassembler, b"$HEHDT,17").is_none());
    assert_eq!(reassembler.pending(), 9);
    let sentence = feed(&mut reassembler, b".2,T\n").expect("sentence");
    assert_eq!(sentence.as_bytes(), b"$HEHDT,17.2,T");
}

#[test]
/// Lines without a leading `$` and empty lines are discarded silently.
fn test_garbage_lines_are_dropped() {
    let mut reassembler = SentenceReassembler::new();
    assert!(feed(&mut reassembler, b"!AIVDM,1,1\r\n").is_none());
    assert!(feed(&mut reassembler, b"\r\n").is_none());
    assert!(feed(&mut reassembler, b"\n").is_none());
    assert_eq!(reassembler.pending(), 0);
    // The next valid line is unaffected.
    let sentence = feed(&mut reassembler, b"$HEDPT,2.5,0.0\n").expect("sentence");
    assert_eq!(sentence.as_bytes(), b"$HEDPT,2.5,0.0");
}

#[test]
/// Two sentences back to back are never interleaved.
fn test_back_to_back_sentences() {
    let mut reassembler = SentenceReassembler::new();
    let mut out = [SentenceBuf::new(); 2];
    let mut count = 0;
    for &b in b"$HEHDT,1.0,T\r\n$HEDPT,3.00,\r\n" {
        if let Some(sentence) = reassembler.push(b) {
            out[count] = sentence;
            count += 1;
        }
    }
    assert_eq!(count, 2);
    assert_eq!(out[0].as_bytes(), b"$HEHDT,1.0,T");
    assert_eq!(out[1].as_bytes(), b"$HEDPT,3.00,");
}

#[test]
/// Overlong lines are truncated to capacity, never overrun.
fn test_overflow_truncates() {
    let mut reassembler = SentenceReassembler::new();
    reassembler.push(b'$');
    for _ in 0..200 {
        reassembler.push(b'A');
    }
    assert_eq!(reassembler.pending(), REASSEMBLY_CAPACITY);
    assert!(reassembler.is_truncated());

    let sentence = reassembler.push(b'\n').expect("truncated sentence is still emitted");
    assert_eq!(sentence.len(), REASSEMBLY_CAPACITY);
    assert!(!reassembler.is_truncated());
}

#[test]
/// `reset` drops the pending line.
fn test_reset() {
    let mut reassembler = SentenceReassembler::new();
    feed(&mut reassembler, b"$HEHDT,1");
    reassembler.reset();
    assert!(reassembler.push(b'\n').is_none());
}
