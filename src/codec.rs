//! Plain-text template records.
//!
//! The first line holds the slot count; every following line holds six
//! whitespace-separated numbers. The first six-number line is the header
//! (`origin.x origin.y 0 0 0 0`), the rest are minutiae. Numbers are written
//! with a trailing `.0` for whole values, e.g.
//!
//! ```text
//! 13.0
//! 120.0  85.0  0.0  0.0  0.0  0.0
//! -12.0  30.0  32.31098884280702  -4.331882603272325  1.0  90.0
//! ```

use crate::minutiae::{
    minutiae_for_capacity, Direction, Minutia, MinutiaKind, Template, DEFAULT_CAPACITY,
    FIELDS_PER_MINUTIA, HEADER_SLOTS,
};
use crate::origin::Point;
use crate::trace::{trace_event, trace_warn};
use crate::util::{MinutiaeError, MinutiaeResult};
use std::fmt::Write as _;

/// Encodes a template into its text record.
pub fn encode(template: &Template) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:?}", template.count() as f64);

    let origin = template.origin();
    write_record(
        &mut out,
        [f64::from(origin.x), f64::from(origin.y), 0.0, 0.0, 0.0, 0.0],
    );
    for m in template.minutiae() {
        write_record(
            &mut out,
            [
                f64::from(m.x),
                f64::from(m.y),
                m.radius,
                m.angle,
                f64::from(m.kind.code()),
                f64::from(m.direction_code()),
            ],
        );
    }
    out
}

fn write_record(out: &mut String, fields: [f64; FIELDS_PER_MINUTIA]) {
    for value in fields {
        let _ = write!(out, "{value:?}  ");
    }
    out.push('\n');
}

/// Decodes a text record produced by [`encode`] (or the historical format).
///
/// Blank lines are skipped. A data line without exactly six numeric tokens is
/// an error. Lines past the declared slot count are ignored with a warning;
/// ending before the count is reached is an error.
pub fn decode(text: &str) -> MinutiaeResult<Template> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line))
        .filter(|(_, line)| !line.trim().is_empty());

    let (size_line, size_text) = lines.next().ok_or(MinutiaeError::TemplateTruncated {
        expected: HEADER_SLOTS,
        got: 0,
    })?;
    let declared = parse_number(size_line, size_text.trim())?;
    let size = slot_count(declared)?;

    let mut filled = 1usize;
    let mut header: Option<Point> = None;
    // The declared size is untrusted; the parsed lines bound the vector.
    let reserve =
        ((size - HEADER_SLOTS) / FIELDS_PER_MINUTIA).min(minutiae_for_capacity(DEFAULT_CAPACITY));
    let mut minutiae = Vec::with_capacity(reserve);
    let mut ignored = 0usize;

    for (line_no, line) in lines {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != FIELDS_PER_MINUTIA {
            return Err(MinutiaeError::TemplateParse {
                line: line_no,
                reason: format!(
                    "expected {FIELDS_PER_MINUTIA} fields, found {}",
                    tokens.len()
                ),
            });
        }
        if filled + FIELDS_PER_MINUTIA > size {
            ignored += 1;
            trace_warn!("template_excess_line", line = line_no, declared = size);
            continue;
        }

        let mut fields = [0.0f64; FIELDS_PER_MINUTIA];
        for (slot, token) in fields.iter_mut().zip(&tokens) {
            *slot = parse_number(line_no, token)?;
        }
        filled += FIELDS_PER_MINUTIA;

        match header {
            None => {
                let x = to_i32(line_no, fields[0])?;
                let y = to_i32(line_no, fields[1])?;
                header = Some(Point::new(x, y));
            }
            Some(_) => minutiae.push(parse_minutia(line_no, &fields)?),
        }
    }

    if filled < size {
        return Err(MinutiaeError::TemplateTruncated {
            expected: size,
            got: filled,
        });
    }

    let origin = header.unwrap_or_default();
    trace_event!("template_decoded", minutiae = minutiae.len(), ignored = ignored);
    Ok(Template::new(origin, minutiae))
}

fn slot_count(declared: f64) -> MinutiaeResult<usize> {
    let valid = declared.is_finite()
        && declared.fract() == 0.0
        && declared >= HEADER_SLOTS as f64
        && declared <= u32::MAX as f64;
    if !valid {
        return Err(MinutiaeError::InvalidTemplateSize { count: declared });
    }
    let size = declared as usize;
    if (size - HEADER_SLOTS) % FIELDS_PER_MINUTIA != 0 {
        return Err(MinutiaeError::InvalidTemplateSize { count: declared });
    }
    Ok(size)
}

fn parse_minutia(line: usize, fields: &[f64; FIELDS_PER_MINUTIA]) -> MinutiaeResult<Minutia> {
    let code = to_i32(line, fields[4])?;
    let kind = u8::try_from(code)
        .ok()
        .and_then(MinutiaKind::from_code)
        .ok_or_else(|| MinutiaeError::TemplateParse {
            line,
            reason: format!("unknown minutia kind {}", fields[4]),
        })?;

    let direction = match kind {
        MinutiaKind::RidgeEnding => {
            let degrees = to_i32(line, fields[5])?;
            let dir = u16::try_from(degrees)
                .ok()
                .and_then(Direction::from_degrees)
                .ok_or_else(|| MinutiaeError::TemplateParse {
                    line,
                    reason: format!("invalid ridge direction {}", fields[5]),
                })?;
            Some(dir)
        }
        MinutiaKind::Bifurcation => None,
    };

    Ok(Minutia {
        x: to_i32(line, fields[0])?,
        y: to_i32(line, fields[1])?,
        radius: fields[2],
        angle: fields[3],
        kind,
        direction,
    })
}

fn parse_number(line: usize, token: &str) -> MinutiaeResult<f64> {
    token
        .parse::<f64>()
        .map_err(|_| MinutiaeError::TemplateParse {
            line,
            reason: format!("not a number: {token:?}"),
        })
}

fn to_i32(line: usize, value: f64) -> MinutiaeResult<i32> {
    if value.is_finite()
        && value.fract() == 0.0
        && value >= f64::from(i32::MIN)
        && value <= f64::from(i32::MAX)
    {
        Ok(value as i32)
    } else {
        Err(MinutiaeError::TemplateParse {
            line,
            reason: format!("expected an integer, found {value}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{decode, encode, slot_count};
    use crate::minutiae::{Direction, Minutia, Template};
    use crate::origin::Point;

    #[test]
    fn empty_template_encodes_header_only() {
        let text = encode(&Template::empty(Point::new(120, 85)));
        assert_eq!(text, "7.0\n120.0  85.0  0.0  0.0  0.0  0.0  \n");
    }

    #[test]
    fn slot_count_rejects_misaligned_sizes() {
        assert_eq!(slot_count(601.0), Ok(601));
        assert!(slot_count(600.0).is_err());
        assert!(slot_count(6.0).is_err());
        assert!(slot_count(7.5).is_err());
    }

    #[test]
    fn decodes_minutia_line() {
        let tpl = Template::new(
            Point::new(10, 20),
            vec![Minutia::ending(-12, 30, Direction::North)],
        );
        let text = encode(&tpl);
        assert!(text.starts_with("13.0\n"));
        assert_eq!(decode(&text).unwrap(), tpl);
    }
}
