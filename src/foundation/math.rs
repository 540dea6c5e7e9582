/// 32-bit FNV-1a, used to derive per-(domain, style) random streams.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Fnv1a32(u32);

impl Fnv1a32 {
    pub(crate) const OFFSET_BASIS: u32 = 0x811c_9dc5;
    const PRIME: u32 = 0x0100_0193;

    pub(crate) fn new_default() -> Self {
        Self(Self::OFFSET_BASIS)
    }

    pub(crate) fn write_str(&mut self, s: &str) {
        // UTF-16 code units, one round per unit.
        let mut h = self.0;
        for unit in s.encode_utf16() {
            h ^= u32::from(unit);
            h = h.wrapping_mul(Self::PRIME);
        }
        self.0 = h;
    }

    pub(crate) fn finish(self) -> u32 {
        self.0
    }
}

/// Hash of `"<domain>:<style>"` used to salt caller seeds.
pub(crate) fn stream_salt(domain: &str, style: &str) -> u32 {
    let mut h = Fnv1a32::new_default();
    h.write_str(domain);
    h.write_str(":");
    h.write_str(style);
    h.finish()
}

/// Clamp that tolerates `lo > hi` by letting `lo` win, matching `max(lo, min(hi, v))`.
pub(crate) fn clamp_f64(v: f64, lo: f64, hi: f64) -> f64 {
    lo.max(hi.min(v))
}

pub(crate) fn clamp_i64(v: i64, lo: i64, hi: i64) -> i64 {
    lo.max(hi.min(v))
}

/// Parse the leading decimal number of `s` (`"26px"` -> 26, `" .5"` -> 0.5).
///
/// Returns `None` when no digits are present.
pub(crate) fn parse_leading_f64(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0usize;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let mut digits = 0usize;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        digits += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
            digits += 1;
        }
    }
    if digits == 0 {
        return None;
    }
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_start {
            end = exp_end;
        }
    }
    s[..end].parse::<f64>().ok()
}

/// Shortest round-trip formatting for attribute output (`400`, `0.76`, `-12.5`).
pub(crate) fn format_number(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    format!("{v}")
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
