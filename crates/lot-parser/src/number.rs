use crate::combinators::{char, choice, one_of, option, some_chars, PResult};
use crate::stream::Stream;

pub fn digit<'a>(s: Stream<'a>) -> PResult<'a, char> {
    one_of("0123456789")(s)
}

pub fn digits<'a>(s: Stream<'a>) -> PResult<'a, String> {
    some_chars(digit)(s)
}

/// An unsigned integer literal, parsed to `i64`. Fails (rather than
/// panicking) on overflow, reporting the offending text.
pub fn integer<'a>(s: Stream<'a>) -> PResult<'a, i64> {
    let (text, rest) = digits(s)?;
    match text.parse::<i64>() {
        Ok(n) => Ok((n, rest)),
        Err(_) => Err(crate::error::ParseError::with_expected_got(
            "integer literal out of range",
            s,
            "integer",
            text,
        )),
    }
}

/// `-?digits(.digits)?`, parsed to `f64`.
pub fn floating<'a>(s: Stream<'a>) -> PResult<'a, f64> {
    let (neg, s2) = option(false, |s| char('-')(s).map(|(_, s)| (true, s)))(s)?;
    let (whole, s2) = digits(s2)?;
    let (frac, s2) = option(String::new(), |s| {
        let (_, s) = char('.')(s)?;
        digits(s)
    })(s2)?;
    let text = if frac.is_empty() { whole } else { format!("{whole}.{frac}") };
    match text.parse::<f64>() {
        Ok(n) => Ok((if neg { -n } else { n }, s2)),
        Err(_) => Err(crate::error::ParseError::with_expected_got("number literal", s, "number", text)),
    }
}

/// Either a float (if it contains a `.`) or an integer, as `f64`.
pub fn number<'a>(s: Stream<'a>) -> PResult<'a, f64> {
    choice(vec![
        Box::new(floating),
        Box::new(|s| integer(s).map(|(n, s)| (n as f64, s))),
    ])(s)
}
