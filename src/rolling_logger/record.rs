// -- record.rs --

use {
    super::{
        buffer::{BufferPool, LineBuffer},
        caller::Caller,
        header::format_header,
        severity::Severity,
    },
    chrono::NaiveDateTime,
    std::fmt::{self, Write},
};

// --

/// Caller-supplied body of a record.
#[derive(Copy, Clone)]
pub enum Payload<'a> {
    /// A single displayable value, written as is.
    Print(&'a dyn fmt::Display),
    /// A template with its arguments, as built by `format_args!`.
    Printf(fmt::Arguments<'a>),
}

/// Builds one complete record in a buffer drawn from `pool`.
///
/// The result always ends in exactly one newline added by us: a payload
/// already ending in `\n` is left alone.
pub fn assemble(
    pool: &BufferPool,
    severity: Severity,
    now: NaiveDateTime,
    caller: Caller,
    payload: Payload<'_>,
) -> LineBuffer {
    let mut buf = pool.acquire();
    format_header(&mut buf, severity, now, caller);
    // a Display impl that fails leaves whatever it wrote so far
    let _ = match payload {
        Payload::Print(msg) => write!(buf, "{}", msg),
        Payload::Printf(args) => buf.write_fmt(args),
    };
    buf.ensure_newline();
    buf
}

// --

#[cfg(test)]
mod tests {
    use {super::*, chrono::NaiveDate};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 7)
            .unwrap()
            .and_hms_micro_opt(8, 9, 5, 123)
            .unwrap()
    }

    fn body(buf: &LineBuffer) -> &str {
        let s = std::str::from_utf8(buf.as_bytes()).unwrap();
        &s[s.find("] ").unwrap() + 2..]
    }

    #[test]
    fn single_trailing_newline() {
        let pool = BufferPool::new(2);
        let caller = Caller::new("demo.go", 42);

        let a = assemble(&pool, Severity::Info, now(), caller, Payload::Print(&"x\n"));
        assert_eq!(body(&a), "x\n");
        let b = assemble(&pool, Severity::Info, now(), caller, Payload::Print(&"x"));
        assert_eq!(body(&b), "x\n");
        let c = assemble(&pool, Severity::Info, now(), caller, Payload::Printf(format_args!("{}\n", "x")));
        assert_eq!(body(&c), "x\n");
    }

    #[test]
    fn printf_style() {
        let pool = BufferPool::new(2);
        let buf = assemble(
            &pool,
            Severity::Error,
            now(),
            Caller::new("src/lib.rs", 9),
            Payload::Printf(format_args!("{} + {} = {}", 1, 2, 3)),
        );
        assert_eq!(
            buf.as_bytes(),
            b"E2024-03-07 08:09:05.000123 lib.rs:9] 1 + 2 = 3\n".as_ref()
        );
    }

    #[test]
    fn empty_payload_still_terminated() {
        let pool = BufferPool::new(2);
        let buf = assemble(&pool, Severity::Debug, now(), Caller::unknown(), Payload::Print(&""));
        assert_eq!(buf.as_bytes(), b"D2024-03-07 08:09:05.000123 ???:1] \n".as_ref());
    }

    #[test]
    fn recycled_buffer_has_no_residue() {
        let pool = BufferPool::new(1);
        let first = assemble(&pool, Severity::Info, now(), Caller::unknown(), Payload::Print(&"a much longer first message"));
        pool.release(first);
        let second = assemble(&pool, Severity::Info, now(), Caller::unknown(), Payload::Print(&"b"));
        assert_eq!(body(&second), "b\n");
    }
}
