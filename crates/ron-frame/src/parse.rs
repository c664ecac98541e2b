//! Op decoding and encoding against the previous op.

use ron_core::codec::{format_uuid, format_uuid_flat, parse_uuid};
use ron_core::config::FormatConfig;
use ron_core::constants::{FRAME_TERM, MAX_ATOMS};
use ron_core::Uuid;
use smallvec::SmallVec;

use crate::op::{AtomKind, Atoms, Op};
use crate::spec::{Context, SpecField, Term};

/// Outcome of decoding one op at some offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Step<'a> {
    /// A complete op ending at `end`.
    Op { op: Op<'a>, end: usize },
    /// Frame terminator or end of input at `at`.
    End { at: usize },
    /// Nothing parsable at `at`.
    Error { at: usize },
}

/// Decode the op starting at `pos`, relative to `context`.
pub(crate) fn parse_op<'a>(data: &'a [u8], pos: usize, context: &Context) -> Step<'a> {
    let mut p = skip_ws(data, pos);
    match data.get(p) {
        None => return Step::End { at: p },
        Some(&FRAME_TERM) => return Step::End { at: p },
        Some(_) => {}
    }
    let start = p;

    let mut spec = context.spec;
    for field in SpecField::ALL {
        p = skip_ws(data, p);
        if data.get(p) != Some(&field.separator()) {
            continue;
        }
        p += 1;
        let (uuid, used) = parse_uuid(&data[p..], context.spec.get(field));
        if used == 0 {
            return Step::Error { at: start };
        }
        spec.set(field, uuid);
        p += used;
    }

    let mut offsets: SmallVec<[u32; MAX_ATOMS]> = SmallVec::new();
    let mut body_start = None;
    let mut body_end = p;
    loop {
        p = skip_ws(data, p);
        let Some(kind) = data.get(p).copied().and_then(AtomKind::from_marker) else {
            break;
        };
        let Some(end) = scan_atom(data, p, kind) else {
            return Step::Error { at: start };
        };
        let base = *body_start.get_or_insert(p);
        offsets.push((p - base) as u32);
        body_end = end;
        p = end;
    }

    let mut term = None;
    p = skip_ws(data, p);
    if let Some(t) = data.get(p).copied().and_then(Term::from_byte) {
        term = Some(t);
        p += 1;
    }
    if p == start {
        return Step::Error { at: start };
    }

    let body = match body_start {
        Some(b) => &data[b..body_end],
        None => &[],
    };
    let op = Op::new(
        spec,
        Atoms::new(body, offsets),
        term.unwrap_or_else(|| context.default_term()),
    );
    Step::Op { op, end: p }
}

fn skip_ws(data: &[u8], mut p: usize) -> usize {
    while data.get(p).is_some_and(|b| b.is_ascii_whitespace()) {
        p += 1;
    }
    p
}

/// End offset of the atom whose marker sits at `p`.
fn scan_atom(data: &[u8], p: usize, kind: AtomKind) -> Option<usize> {
    let p = p + 1;
    match kind {
        AtomKind::Int => {
            let q = skip_sign(data, p);
            let end = skip_digits(data, q);
            (end > q).then_some(end)
        }
        AtomKind::Float => {
            let q = skip_sign(data, p);
            let mut end = skip_digits(data, q);
            let mut digits = end - q;
            if data.get(end) == Some(&b'.') {
                let frac = skip_digits(data, end + 1);
                digits += frac - end - 1;
                end = frac;
            }
            if digits == 0 {
                return None;
            }
            if matches!(data.get(end), Some(b'e' | b'E')) {
                let q = skip_sign(data, end + 1);
                let exp = skip_digits(data, q);
                if exp == q {
                    return None;
                }
                end = exp;
            }
            Some(end)
        }
        AtomKind::String => {
            let mut q = p;
            loop {
                match data.get(q)? {
                    b'\'' => return Some(q + 1),
                    b'\\' => q += 2,
                    _ => q += 1,
                }
            }
        }
        AtomKind::Uuid => {
            let (_, used) = parse_uuid(&data[p..], Uuid::ZERO);
            (used > 0).then_some(p + used)
        }
    }
}

fn skip_sign(data: &[u8], p: usize) -> usize {
    if matches!(data.get(p), Some(b'+' | b'-')) {
        p + 1
    } else {
        p
    }
}

fn skip_digits(data: &[u8], mut p: usize) -> usize {
    while data.get(p).is_some_and(u8::is_ascii_digit) {
        p += 1;
    }
    p
}

/// Append `op` encoded against `context`; returns bytes written.
///
/// Zipped output omits spec fields equal to the context and compresses the
/// rest against it. Flat output writes every field in full. The terminator
/// is always written.
pub(crate) fn format_op(
    out: &mut Vec<u8>,
    op: &Op<'_>,
    context: &Context,
    format: FormatConfig,
) -> usize {
    let start = out.len();
    for field in SpecField::ALL {
        let uuid = op.spec.get(field);
        let prev = context.spec.get(field);
        if format.zip {
            if uuid == prev {
                continue;
            }
            out.push(field.separator());
            format_uuid(out, uuid, prev);
        } else {
            out.push(field.separator());
            format_uuid_flat(out, uuid);
        }
    }
    let body = op.atoms.body();
    out.extend_from_slice(body);
    out.push(op.term.to_byte());
    if format.newlines {
        out.push(b'\n');
    }
    out.len() - start
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::Spec;

    fn op_at<'a>(data: &'a [u8], context: &Context) -> (Op<'a>, usize) {
        match parse_op(data, 0, context) {
            Step::Op { op, end } => (op, end),
            other => panic!("expected an op, got {other:?}"),
        }
    }

    #[test]
    fn parses_a_full_op() {
        let (op, end) = op_at(b"*lww#1D4ICC+XU5eRJ@1D4ICC+XU5eRJ:bar'foo';", &Context::NONE);
        assert_eq!(op.rdt(), Uuid::name_str("lww"));
        assert_eq!(op.location(), Uuid::name_str("bar"));
        assert_eq!(op.atoms.len(), 1);
        assert_eq!(op.atoms.get(0).unwrap().as_str().as_deref(), Some("foo"));
        assert_eq!(op.term, Term::Raw);
        assert_eq!(end, 42);
    }

    #[test]
    fn omitted_fields_come_from_context() {
        let prev = Spec::new(Uuid::name_str("lww"), Uuid::name(1), Uuid::name(2), Uuid::name(3));
        let context = Context::new(prev, Term::Header);
        let (op, _) = op_at(b":x=1", &context);
        assert_eq!(op.object(), Uuid::name(1));
        assert_eq!(op.location(), Uuid::name_str("x"));
        assert_eq!(op.term, Term::Reduced);
    }

    #[test]
    fn whitespace_between_tokens() {
        let (op, _) = op_at(b"  *lww  #obj\t=1 =2 ;", &Context::NONE);
        assert_eq!(op.object(), Uuid::name_str("obj"));
        assert_eq!(op.atoms.len(), 2);
        assert_eq!(op.atoms.get(1).unwrap().as_int(), Some(2));
    }

    #[test]
    fn frame_terminator_ends_input() {
        assert_eq!(parse_op(b"  .rest", 0, &Context::NONE), Step::End { at: 2 });
        assert_eq!(parse_op(b"", 0, &Context::NONE), Step::End { at: 0 });
    }

    #[test]
    fn garbage_is_an_error() {
        assert_eq!(parse_op(b"junk", 0, &Context::NONE), Step::Error { at: 0 });
        assert_eq!(parse_op(b"*lww='unterminated;", 0, &Context::NONE), Step::Error { at: 0 });
        assert_eq!(parse_op(b"*a=1; :b=x,", 5, &Context::NONE), Step::Error { at: 6 });
        let data = b"*lww=1 x";
        let Step::Op { op, end } = parse_op(data, 0, &Context::NONE) else {
            panic!("leading op should parse");
        };
        assert_eq!(end, 7);
        assert_eq!(parse_op(data, end, &Context::new(op.spec, op.term)), Step::Error { at: 7 });
    }

    #[test]
    fn separator_needs_a_uuid() {
        assert_eq!(parse_op(b"*lww#;", 0, &Context::NONE), Step::Error { at: 0 });
    }

    #[test]
    fn floats_need_digits() {
        assert!(matches!(parse_op(b"^1.5e-3;", 0, &Context::NONE), Step::Op { .. }));
        assert!(matches!(parse_op(b"^.;", 0, &Context::NONE), Step::Error { .. }));
    }

    #[test]
    fn format_then_parse() {
        let spec = Spec::new(
            Uuid::name_str("lww"),
            Uuid::event(0x0123_4567_89ab_cdef, 0x0fed_cba9_8765_4321),
            Uuid::event(0x0123_4567_89ab_ce00, 0x0fed_cba9_8765_4321),
            Uuid::name_str("key"),
        );
        let data = b"=5";
        let op = Op::new(spec, Atoms::new(data, [0u32].into_iter().collect()), Term::Reduced);
        for format in [FormatConfig::default(), FormatConfig::verbose()] {
            let context = Context::new(spec.with(SpecField::Location, Uuid::ZERO), Term::Header);
            let mut out = Vec::new();
            let written = format_op(&mut out, &op, &context, format);
            assert_eq!(written, out.len());
            let (back, end) = op_at(&out, &context);
            assert_eq!(back, op);
            assert_eq!(end, out.iter().rposition(|&b| b == b',').unwrap() + 1);
        }
    }
}
