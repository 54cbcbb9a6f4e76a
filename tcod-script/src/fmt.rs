//! Float text forms used by the listing.

/// printf-style `%.<precision>g`.
pub fn format_g(value: f64, precision: usize) -> String {
    if let Some(s) = non_finite(value) {
        return s.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let precision = precision.max(1);
    let sci = format!("{:.*e}", precision - 1, value);
    let (mantissa, exp) = split_exp(&sci);

    if exp < -4 || exp >= precision as i32 {
        format!("{}e{}{:02}", strip_zeros(mantissa), sign(exp), exp.abs())
    } else {
        let decimals = (precision as i32 - 1 - exp) as usize;
        strip_zeros(&format!("{:.*}", decimals, value)).to_string()
    }
}

/// Shortest round-trip form: always carries a fractional part or an
/// exponent, switches to exponent form outside `[1e-4, 1e16)`.
pub fn format_repr(value: f64) -> String {
    if let Some(s) = non_finite(value) {
        return s.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }

    let sci = format!("{:e}", value.abs());
    let (mantissa, exp) = split_exp(&sci);
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();

    let body = if (-4..16).contains(&exp) {
        if exp >= 0 {
            let int_len = exp as usize + 1;
            if digits.len() <= int_len {
                format!("{digits:0<int_len$}.0")
            } else {
                format!("{}.{}", &digits[..int_len], &digits[int_len..])
            }
        } else {
            format!("0.{}{}", "0".repeat((-exp - 1) as usize), digits)
        }
    } else {
        let (lead, rest) = digits.split_at(1);
        let mantissa = if rest.is_empty() { lead.to_string() } else { format!("{lead}.{rest}") };
        format!("{}e{}{:02}", mantissa, sign(exp), exp.abs())
    };

    if value.is_sign_negative() {
        format!("-{body}")
    } else {
        body
    }
}

fn non_finite(value: f64) -> Option<&'static str> {
    if value.is_nan() {
        Some("nan")
    } else if value.is_infinite() {
        Some(if value > 0.0 { "inf" } else { "-inf" })
    } else {
        None
    }
}

fn split_exp(sci: &str) -> (&str, i32) {
    match sci.split_once('e') {
        Some((m, e)) => (m, e.parse().unwrap_or(0)),
        None => (sci, 0),
    }
}

fn sign(exp: i32) -> char {
    if exp < 0 {
        '-'
    } else {
        '+'
    }
}

fn strip_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn g7() {
        assert_eq!(format_g(1.5, 7), "1.5");
        assert_eq!(format_g(100.0, 7), "100");
        assert_eq!(format_g(0.1f32 as f64, 7), "0.1");
        assert_eq!(format_g(1234567.0, 7), "1234567");
        assert_eq!(format_g(12345678.0, 7), "1.234568e+07");
        assert_eq!(format_g(0.0001, 7), "0.0001");
        assert_eq!(format_g(0.00001, 7), "1e-05");
        assert_eq!(format_g(-2.25, 7), "-2.25");
        assert_eq!(format_g(0.0, 7), "0");
        assert_eq!(format_g(f64::INFINITY, 7), "inf");
    }

    #[test]
    fn repr() {
        assert_eq!(format_repr(1.5), "1.5");
        assert_eq!(format_repr(1.0), "1.0");
        assert_eq!(format_repr(-3.0), "-3.0");
        assert_eq!(format_repr(120.0), "120.0");
        assert_eq!(format_repr(0.1f32 as f64), "0.10000000149011612");
        assert_eq!(format_repr(0.00025), "0.00025");
        assert_eq!(format_repr(1e16), "1e+16");
        assert_eq!(format_repr(1.5e-7), "1.5e-07");
        assert_eq!(format_repr(0.0), "0.0");
    }
}
