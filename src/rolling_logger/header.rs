// -- header.rs --

use {
    super::{buffer::LineBuffer, caller::Caller, severity::Severity},
    chrono::{Datelike, NaiveDateTime, Timelike},
};

// --

/// Writes `Lyyyy-mm-dd hh:mm:ss.uuuuuu file:line] ` into `buf`.
///
/// Built by hand on the scratch array, generic formatting is far slower
/// on a path that runs once per record.
pub fn format_header(buf: &mut LineBuffer, severity: Severity, now: NaiveDateTime, caller: Caller) {
    let micros = (now.nanosecond() / 1000).min(999_999);
    let year = now.year().clamp(0, 9999) as u32;

    buf.tmp[0] = severity.as_char();
    buf.n_digits(4, 1, year, b'0');
    buf.tmp[5] = b'-';
    buf.two_digits(6, now.month());
    buf.tmp[8] = b'-';
    buf.two_digits(9, now.day());
    buf.tmp[11] = b' ';
    buf.two_digits(12, now.hour());
    buf.tmp[14] = b':';
    buf.two_digits(15, now.minute());
    buf.tmp[17] = b':';
    buf.two_digits(18, now.second());
    buf.tmp[20] = b'.';
    buf.n_digits(6, 21, micros, b'0');
    buf.tmp[27] = b' ';
    buf.flush_tmp(28);

    buf.extend_from_slice(caller.basename().as_bytes());
    buf.tmp[0] = b':';
    let n = buf.some_digits(1, caller.line);
    buf.tmp[n + 1] = b']';
    buf.tmp[n + 2] = b' ';
    buf.flush_tmp(n + 3);
}

// --

#[cfg(test)]
mod tests {
    use {super::*, chrono::NaiveDate};

    fn at(h: u32, m: u32, s: u32, us: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 7)
            .unwrap()
            .and_hms_micro_opt(h, m, s, us)
            .unwrap()
    }

    fn render(severity: Severity, now: NaiveDateTime, caller: Caller) -> String {
        let mut buf = LineBuffer::new();
        format_header(&mut buf, severity, now, caller);
        String::from_utf8(buf.as_bytes().to_vec()).unwrap()
    }

    #[test]
    fn exact_layout() {
        let h = render(Severity::Info, at(8, 9, 5, 123), Caller::new("demo.go", 42));
        assert_eq!(h, "I2024-03-07 08:09:05.000123 demo.go:42] ");
    }

    #[test]
    fn strips_directories_and_pads() {
        let h = render(
            Severity::Fatal,
            at(23, 59, 59, 999_999),
            Caller::new("/src/app/main.rs", 7),
        );
        assert_eq!(h, "F2024-03-07 23:59:59.999999 main.rs:7] ");
    }

    #[test]
    fn wide_line_numbers() {
        let h = render(Severity::Debug, at(0, 0, 0, 0), Caller::new("a.rs", 1_234_567));
        assert_eq!(h, "D2024-03-07 00:00:00.000000 a.rs:1234567] ");
    }

    #[test]
    fn leap_second_clamps_micros() {
        let now = NaiveDate::from_ymd_opt(2016, 12, 31)
            .unwrap()
            .and_hms_nano_opt(23, 59, 59, 1_999_999_999)
            .unwrap();
        let h = render(Severity::Warning, now, Caller::new("a.rs", 1));
        assert_eq!(h, "W2016-12-31 23:59:59.999999 a.rs:1] ");
    }
}
